//! Lot construction parameters.

/// Configuration for a [`ParkingLot`](crate::ParkingLot).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LotConfig {
    /// Number of floors. Zero is allowed and yields a lot that is always full.
    pub num_floors: usize,
    /// Spots on every floor. Zero is allowed.
    pub spots_per_floor: usize,
}

impl LotConfig {
    /// Create a configuration with the given layout.
    pub const fn new(num_floors: usize, spots_per_floor: usize) -> Self {
        Self {
            num_floors,
            spots_per_floor,
        }
    }

    /// Set the number of floors.
    pub const fn with_floors(mut self, num_floors: usize) -> Self {
        self.num_floors = num_floors;
        self
    }

    /// Set the number of spots per floor.
    pub const fn with_spots_per_floor(mut self, spots_per_floor: usize) -> Self {
        self.spots_per_floor = spots_per_floor;
        self
    }

    /// Total spots across all floors.
    pub const fn capacity(&self) -> usize {
        self.num_floors * self.spots_per_floor
    }
}

impl Default for LotConfig {
    fn default() -> Self {
        Self {
            num_floors: 10,
            spots_per_floor: 100,
        }
    }
}
