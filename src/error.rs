//! Error type for lot operations.

/// Every way a lot operation can be refused.
///
/// None of these are fatal: the lot is left exactly as it was before the
/// failing call, and the caller decides whether to retry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LotError {
    /// `park` was called for a plate that already holds spots.
    #[error("vehicle {plate:?} is already parked")]
    DuplicatePlate {
        /// Offending plate.
        plate: String,
    },
    /// The vehicle kind string did not name a known kind.
    #[error("unrecognized vehicle kind {kind:?}")]
    UnrecognizedVehicleKind {
        /// The string as given by the caller.
        kind: String,
    },
    /// No floor had a free run long enough for the vehicle.
    #[error("no run of {spots_needed} free spot(s) for vehicle {plate:?}")]
    NoSpotAvailable {
        /// Plate that could not be placed.
        plate: String,
        /// Consecutive spots the vehicle needs.
        spots_needed: usize,
    },
    /// `leave` was called for a plate that is not parked.
    #[error("vehicle {plate:?} is not parked")]
    UnknownPlate {
        /// Plate that was looked up.
        plate: String,
    },
    /// A floor query used an index outside `0..num_floors`.
    #[error("floor {floor} out of range (lot has {num_floors} floors)")]
    InvalidFloorIndex {
        /// Requested floor.
        floor: usize,
        /// Number of floors in the lot.
        num_floors: usize,
    },
}

/// Result type for lot operations.
pub type Result<T> = std::result::Result<T, LotError>;
