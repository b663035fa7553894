//! Vehicle kinds and how much room each one takes.

use std::fmt;
use std::str::FromStr;

use crate::error::LotError;

/// The closed set of vehicle kinds the lot knows how to place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleKind {
    /// Single spot.
    Bike,
    /// Single spot.
    Car,
    /// Two consecutive spots.
    Truck,
}

impl VehicleKind {
    /// Every kind, in declaration order.
    pub const ALL: [VehicleKind; 3] = [VehicleKind::Bike, VehicleKind::Car, VehicleKind::Truck];

    /// Number of consecutive spots this kind occupies. Always at least 1.
    #[inline]
    pub const fn spots_needed(self) -> usize {
        match self {
            VehicleKind::Bike | VehicleKind::Car => 1,
            VehicleKind::Truck => 2,
        }
    }

    /// Lowercase name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            VehicleKind::Bike => "bike",
            VehicleKind::Car => "car",
            VehicleKind::Truck => "truck",
        }
    }
}

impl fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VehicleKind {
    type Err = LotError;

    /// Case-insensitive lookup by name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VehicleKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| LotError::UnrecognizedVehicleKind { kind: s.to_owned() })
    }
}

impl TryFrom<&str> for VehicleKind {
    type Error = LotError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Anything `ParkingLot::park` accepts as a vehicle kind: either an
/// already-resolved [`VehicleKind`] or a name to look up.
pub trait IntoVehicleKind {
    /// Resolve to a kind, failing with
    /// [`LotError::UnrecognizedVehicleKind`] for unknown names.
    fn into_vehicle_kind(self) -> Result<VehicleKind, LotError>;
}

impl IntoVehicleKind for VehicleKind {
    #[inline]
    fn into_vehicle_kind(self) -> Result<VehicleKind, LotError> {
        Ok(self)
    }
}

impl IntoVehicleKind for &str {
    fn into_vehicle_kind(self) -> Result<VehicleKind, LotError> {
        self.parse()
    }
}

impl IntoVehicleKind for &String {
    fn into_vehicle_kind(self) -> Result<VehicleKind, LotError> {
        self.parse()
    }
}

impl IntoVehicleKind for String {
    fn into_vehicle_kind(self) -> Result<VehicleKind, LotError> {
        self.parse()
    }
}
