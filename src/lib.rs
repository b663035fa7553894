//! # parkade
//!
//! A multi-floor parking lot that hands out spots to vehicles of different
//! sizes and tracks who holds what, safely under concurrent access.
//!
//! ## Features
//!
//! - **Nearest-first placement**: lowest floor, then lowest-start free run
//! - **Multi-spot vehicles**: trucks take two consecutive spots
//! - **Run-tracking free sets**: free spots are kept as coalesced runs, so
//!   single-spot takes and frees are O(log n)
//! - **Thread-safe**: one lock per floor plus a registry lock
//!
//! ## Example
//!
//! ```rust
//! use parkade::{ParkingLot, SpotAssignment, VehicleKind};
//!
//! let lot = ParkingLot::new(1, 3);
//! lot.park("T1", VehicleKind::Truck).unwrap();
//! lot.park("C1", "car").unwrap();
//! assert!(lot.is_full());
//!
//! lot.leave("T1").unwrap();
//! assert_eq!(lot.available_count(0), Ok(2));
//! assert_eq!(lot.locate("C1"), vec![SpotAssignment::new(0, 2)]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod floor;
pub mod lot;
pub mod scenarios;
pub mod spot_set;
pub mod vehicle;

pub use config::LotConfig;
pub use error::LotError;
pub use floor::Floor;
pub use lot::{LotStats, ParkingLot, SpotAssignment};
pub use spot_set::SpotSet;
pub use vehicle::{IntoVehicleKind, VehicleKind};

#[cfg(test)]
mod proptests;
