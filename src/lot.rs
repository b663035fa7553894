//! The lot: floors plus the plate registry.

use std::collections::HashMap;
use std::fmt;

use parking_lot::Mutex;
use tracing::debug;

use crate::config::LotConfig;
use crate::error::{LotError, Result};
use crate::floor::Floor;
use crate::vehicle::IntoVehicleKind;

/// One spot held by a parked vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpotAssignment {
    /// Floor index.
    pub floor: usize,
    /// Spot index within the floor.
    pub spot: usize,
}

impl SpotAssignment {
    /// Create an assignment.
    pub const fn new(floor: usize, spot: usize) -> Self {
        Self { floor, spot }
    }
}

impl fmt::Display for SpotAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "floor {} spot {}", self.floor, self.spot)
    }
}

/// Point-in-time occupancy numbers for a lot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LotStats {
    /// Number of floors
    pub num_floors: usize,
    /// Spots on each floor
    pub spots_per_floor: usize,
    /// Free spots, indexed by floor
    pub available_per_floor: Vec<usize>,
    /// Free spots across the lot
    pub total_available: usize,
    /// Occupied spots across the lot
    pub occupied: usize,
    /// Vehicles currently parked
    pub vehicles: usize,
}

/// A multi-floor parking lot.
///
/// Vehicles are placed nearest-first: floors are tried in index order and
/// the first floor with a long enough free run wins; within that floor the
/// lowest-start run is taken.
///
/// # Locking
///
/// There are two lock tiers. The registry lock guards the plate map, and
/// `park`/`leave` hold it for their whole duration, including the calls
/// into floors. Each floor has its own lock around its free set. Locks are
/// always taken registry first, then at most one floor at a time.
///
/// Holding the registry lock while probing floors makes the duplicate-plate
/// check and the reservation a single atomic step. It also means all
/// `park`/`leave` calls on one lot run one after another.
pub struct ParkingLot {
    floors: Vec<Floor>,
    spots_per_floor: usize,
    registry: Mutex<HashMap<String, Vec<SpotAssignment>>>,
}

impl ParkingLot {
    /// Create a lot of `num_floors` floors with `spots_per_floor` spots each.
    pub fn new(num_floors: usize, spots_per_floor: usize) -> Self {
        Self::with_config(LotConfig::new(num_floors, spots_per_floor))
    }

    /// Create a lot from a configuration.
    pub fn with_config(config: LotConfig) -> Self {
        let floors = (0..config.num_floors)
            .map(|i| Floor::new(i, config.spots_per_floor))
            .collect();
        debug!(
            floors = config.num_floors,
            spots_per_floor = config.spots_per_floor,
            "lot created"
        );
        Self {
            floors,
            spots_per_floor: config.spots_per_floor,
            registry: Mutex::new(HashMap::new()),
        }
    }

    /// Park a vehicle and return the spots it now holds.
    ///
    /// `kind` is either a [`VehicleKind`](crate::VehicleKind) or a name such
    /// as `"truck"` (case-insensitive). Fails with
    /// [`LotError::UnrecognizedVehicleKind`] for unknown names,
    /// [`LotError::DuplicatePlate`] if `plate` is already parked, and
    /// [`LotError::NoSpotAvailable`] if no floor has a long enough free run.
    /// A failed call changes nothing.
    pub fn park(
        &self,
        plate: impl AsRef<str>,
        kind: impl IntoVehicleKind,
    ) -> Result<Vec<SpotAssignment>> {
        let plate = plate.as_ref();
        let kind = kind.into_vehicle_kind()?;
        let needed = kind.spots_needed();

        let mut registry = self.registry.lock();
        if registry.contains_key(plate) {
            debug!(plate, "park refused: already parked");
            return Err(LotError::DuplicatePlate {
                plate: plate.to_owned(),
            });
        }

        for floor in &self.floors {
            let Some(start) = floor.occupy(needed) else {
                continue;
            };
            let spots: Vec<SpotAssignment> = (start..start + needed)
                .map(|spot| SpotAssignment::new(floor.index(), spot))
                .collect();
            registry.insert(plate.to_owned(), spots.clone());
            debug!(plate, %kind, floor = floor.index(), start, "parked");
            return Ok(spots);
        }

        debug!(plate, %kind, spots = needed, "park refused: no space");
        Err(LotError::NoSpotAvailable {
            plate: plate.to_owned(),
            spots_needed: needed,
        })
    }

    /// Remove a parked vehicle and return the spots it released.
    ///
    /// Fails with [`LotError::UnknownPlate`] if `plate` is not parked.
    pub fn leave(&self, plate: impl AsRef<str>) -> Result<Vec<SpotAssignment>> {
        let plate = plate.as_ref();
        let mut registry = self.registry.lock();
        let spots = registry
            .remove(plate)
            .ok_or_else(|| LotError::UnknownPlate {
                plate: plate.to_owned(),
            })?;

        // Every entry was written by `park`: non-empty, one floor, consecutive.
        if let Some(first) = spots.first() {
            self.floors[first.floor].free(first.spot, spots.len());
            debug!(
                plate,
                floor = first.floor,
                start = first.spot,
                spots = spots.len(),
                "left"
            );
        }
        Ok(spots)
    }

    /// Free spots on `floor`.
    pub fn available_count(&self, floor: usize) -> Result<usize> {
        Ok(self.floor(floor)?.available_count())
    }

    /// Ascending free spot indices on `floor`.
    pub fn free_indices(&self, floor: usize) -> Result<Vec<usize>> {
        Ok(self.floor(floor)?.free_indices())
    }

    /// Whether every floor is full. True for a lot with no floors.
    pub fn is_full(&self) -> bool {
        self.floors.iter().all(Floor::is_full)
    }

    /// Spots held by `plate`, ordered by spot index. Empty if not parked.
    pub fn locate(&self, plate: impl AsRef<str>) -> Vec<SpotAssignment> {
        self.registry
            .lock()
            .get(plate.as_ref())
            .cloned()
            .unwrap_or_default()
    }

    /// Whether `plate` is currently parked.
    pub fn is_parked(&self, plate: impl AsRef<str>) -> bool {
        self.registry.lock().contains_key(plate.as_ref())
    }

    /// Number of floors.
    #[inline]
    pub fn num_floors(&self) -> usize {
        self.floors.len()
    }

    /// Spots on each floor.
    #[inline]
    pub fn spots_per_floor(&self) -> usize {
        self.spots_per_floor
    }

    /// Total spots in the lot.
    pub fn capacity(&self) -> usize {
        self.floors.len() * self.spots_per_floor
    }

    /// Free spots across all floors.
    pub fn total_available(&self) -> usize {
        self.floors.iter().map(Floor::available_count).sum()
    }

    /// Number of parked vehicles.
    pub fn vehicle_count(&self) -> usize {
        self.registry.lock().len()
    }

    /// Consistent snapshot of occupancy.
    ///
    /// Holds the registry lock while reading the floors, so no park or leave
    /// can land between the per-floor reads.
    pub fn stats(&self) -> LotStats {
        let registry = self.registry.lock();
        let available_per_floor: Vec<usize> =
            self.floors.iter().map(Floor::available_count).collect();
        let total_available: usize = available_per_floor.iter().sum();
        LotStats {
            num_floors: self.floors.len(),
            spots_per_floor: self.spots_per_floor,
            available_per_floor,
            total_available,
            occupied: self.capacity() - total_available,
            vehicles: registry.len(),
        }
    }

    fn floor(&self, floor: usize) -> Result<&Floor> {
        self.floors.get(floor).ok_or(LotError::InvalidFloorIndex {
            floor,
            num_floors: self.floors.len(),
        })
    }
}

impl Default for ParkingLot {
    fn default() -> Self {
        Self::with_config(LotConfig::default())
    }
}

impl fmt::Debug for ParkingLot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParkingLot")
            .field("floors", &self.floors)
            .field("vehicles", &self.vehicle_count())
            .finish()
    }
}
