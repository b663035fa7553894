//! Named end-to-end scenarios, run in order by the `parkade` binary.
//!
//! Each scenario builds its own lot, drives it through the public API and
//! returns `Err` on the first expectation that does not hold. A scenario that
//! panics is reported as crashed rather than failed.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;

use tracing::debug;

use crate::{LotError, ParkingLot, SpotAssignment, VehicleKind};

/// An expectation that did not hold.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct Failure(pub String);

impl From<LotError> for Failure {
    fn from(e: LotError) -> Self {
        Failure(format!("unexpected error: {e}"))
    }
}

type Check = std::result::Result<(), Failure>;

macro_rules! check {
    ($cond:expr) => {
        if !$cond {
            return Err(Failure(format!("check failed: {}", stringify!($cond))));
        }
    };
}

macro_rules! check_eq {
    ($left:expr, $right:expr) => {{
        let (left, right) = (&$left, &$right);
        if left != right {
            return Err(Failure(format!(
                "{} == {}: {:?} != {:?}",
                stringify!($left),
                stringify!($right),
                left,
                right
            )));
        }
    }};
}

/// A named scenario.
#[derive(Clone, Copy)]
pub struct Scenario {
    /// Name shown in reports.
    pub name: &'static str,
    run: fn() -> Check,
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.name)
            .finish()
    }
}

/// How a scenario ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every check held.
    Passed,
    /// A check failed.
    Failed(Failure),
    /// The scenario panicked; carries the panic message.
    Crashed(String),
}

impl Outcome {
    /// Whether the scenario passed.
    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Passed)
    }
}

impl Scenario {
    /// Run the scenario, catching panics.
    pub fn run(&self) -> Outcome {
        debug!(scenario = self.name, "running");
        match panic::catch_unwind(AssertUnwindSafe(self.run)) {
            Ok(Ok(())) => Outcome::Passed,
            Ok(Err(failure)) => Outcome::Failed(failure),
            Err(payload) => Outcome::Crashed(panic_message(payload.as_ref())),
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}

/// Scenarios whose name contains `filter`, in run order. `None` selects all.
pub fn matching(filter: Option<&str>) -> Vec<Scenario> {
    all()
        .into_iter()
        .filter(|s| filter.is_none_or(|f| s.name.contains(f)))
        .collect()
}

/// Every scenario, in run order.
pub fn all() -> Vec<Scenario> {
    macro_rules! scenarios {
        ($($f:ident),* $(,)?) => {
            vec![$(Scenario { name: stringify!($f), run: $f }),*]
        };
    }
    scenarios![
        park_single_car,
        park_truck,
        truck_fragmented_spots,
        leave_invalid_vehicle,
        is_full,
        free_spots,
        multiple_floors,
        duplicate_parking,
        invalid_vehicle_type,
        no_available_spots,
        zero_floors,
        zero_spots_per_floor,
        mixed_case_vehicle_type,
        duplicate_across_floors,
        truck_scattered_spots,
        spot_deallocation,
        stress,
        concurrent_distinct_plates,
        concurrent_same_plate,
    ]
}

fn park_single_car() -> Check {
    let lot = ParkingLot::new(1, 5);
    lot.park("CAR1", "Car")?;
    check_eq!(lot.available_count(0)?, 4);
    check_eq!(lot.locate("CAR1"), vec![SpotAssignment::new(0, 0)]);
    Ok(())
}

fn park_truck() -> Check {
    let lot = ParkingLot::new(1, 3);
    lot.park("TRUCK1", "Truck")?;
    check_eq!(lot.available_count(0)?, 1);
    let loc = lot.locate("TRUCK1");
    check_eq!(loc.len(), 2);
    check_eq!(loc[0].spot + 1, loc[1].spot);
    Ok(())
}

fn truck_fragmented_spots() -> Check {
    let lot = ParkingLot::new(1, 4);
    lot.park("C1", "Car")?;
    lot.park("C2", "Car")?;
    lot.park("C3", "Car")?;
    lot.leave("C2")?;
    // Free: {1} and {3}.
    check!(lot.park("TRUCK1", "Truck").is_err());
    Ok(())
}

fn leave_invalid_vehicle() -> Check {
    let lot = ParkingLot::new(1, 10);
    check!(matches!(
        lot.leave("GHOST"),
        Err(LotError::UnknownPlate { .. })
    ));
    Ok(())
}

fn is_full() -> Check {
    let lot = ParkingLot::new(1, 1);
    lot.park("C1", "Car")?;
    check!(lot.is_full());
    Ok(())
}

fn free_spots() -> Check {
    let lot = ParkingLot::new(1, 2);
    lot.park("TRUCK1", "Truck")?;
    lot.leave("TRUCK1")?;
    check_eq!(lot.available_count(0)?, 2);
    Ok(())
}

fn multiple_floors() -> Check {
    let lot = ParkingLot::new(2, 2);
    lot.park("C1", "Car")?;
    lot.park("C2", "Car")?;
    lot.park("C3", "Car")?;
    check_eq!(lot.available_count(0)?, 0);
    check_eq!(lot.available_count(1)?, 1);
    Ok(())
}

fn duplicate_parking() -> Check {
    let lot = ParkingLot::new(1, 2);
    lot.park("C1", "Car")?;
    check!(matches!(
        lot.park("C1", "Car"),
        Err(LotError::DuplicatePlate { .. })
    ));
    check_eq!(lot.available_count(0)?, 1);
    Ok(())
}

fn invalid_vehicle_type() -> Check {
    let lot = ParkingLot::new(1, 2);
    check!(matches!(
        lot.park("INVALID", "Bus"),
        Err(LotError::UnrecognizedVehicleKind { .. })
    ));
    Ok(())
}

fn no_available_spots() -> Check {
    let lot = ParkingLot::new(1, 1);
    lot.park("C1", "Car")?;
    check!(matches!(
        lot.park("C2", "Car"),
        Err(LotError::NoSpotAvailable { .. })
    ));
    Ok(())
}

fn zero_floors() -> Check {
    let lot = ParkingLot::new(0, 5);
    check!(lot.park("C1", "Car").is_err());
    check!(lot.is_full());
    Ok(())
}

fn zero_spots_per_floor() -> Check {
    let lot = ParkingLot::new(3, 0);
    check!(lot.park("C1", "Car").is_err());
    check!(lot.is_full());
    Ok(())
}

fn mixed_case_vehicle_type() -> Check {
    let lot = ParkingLot::new(1, 3);
    lot.park("CAR1", "cAr")?;
    lot.park("TRUCK1", "tRUCK")?;
    check_eq!(lot.available_count(0)?, 0);
    Ok(())
}

fn duplicate_across_floors() -> Check {
    let lot = ParkingLot::new(2, 5);
    lot.park("C1", "Car")?;
    check!(lot.park("C1", "Car").is_err());
    check_eq!(lot.vehicle_count(), 1);
    Ok(())
}

fn truck_scattered_spots() -> Check {
    let lot = ParkingLot::new(1, 5);
    for plate in ["C1", "C2", "C3", "C4"] {
        lot.park(plate, VehicleKind::Car)?;
    }
    lot.leave("C3")?;
    // Free: {2} and {4}.
    check!(lot.park("TRUCK1", "Truck").is_err());
    Ok(())
}

fn spot_deallocation() -> Check {
    let lot = ParkingLot::new(1, 3);
    let initial = lot.available_count(0)?;
    lot.park("C1", "Car")?;
    lot.leave("C1")?;
    check_eq!(lot.available_count(0)?, initial);
    Ok(())
}

fn stress() -> Check {
    let lot = ParkingLot::new(10, 100);
    for i in 0..900 {
        lot.park(format!("C{i}"), VehicleKind::Car)?;
    }
    check_eq!(lot.total_available(), 100);
    check_eq!(lot.available_count(9)?, 100);
    for i in 0..900 {
        lot.leave(format!("C{i}"))?;
    }
    check_eq!(lot.total_available(), 1000);
    Ok(())
}

fn concurrent_distinct_plates() -> Check {
    let lot = Arc::new(ParkingLot::new(4, 50));
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let lot = Arc::clone(&lot);
            thread::spawn(move || {
                (0..25)
                    .filter(|i| lot.park(format!("T{t}-{i}"), VehicleKind::Car).is_ok())
                    .count()
            })
        })
        .collect();

    let mut parked = 0;
    for h in handles {
        parked += h
            .join()
            .map_err(|_| Failure("worker thread panicked".into()))?;
    }
    check_eq!(parked, 200);
    check!(lot.is_full());

    let mut held: Vec<SpotAssignment> = (0..8)
        .flat_map(|t| (0..25).map(move |i| format!("T{t}-{i}")))
        .flat_map(|plate| lot.locate(plate))
        .collect();
    held.sort_unstable();
    held.dedup();
    check_eq!(held.len(), 200);
    Ok(())
}

fn concurrent_same_plate() -> Check {
    let lot = Arc::new(ParkingLot::new(2, 10));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let lot = Arc::clone(&lot);
            thread::spawn(move || lot.park("SAME", VehicleKind::Truck).is_ok())
        })
        .collect();

    let mut wins = 0;
    for h in handles {
        let won = h
            .join()
            .map_err(|_| Failure("worker thread panicked".into()))?;
        if won {
            wins += 1;
        }
    }
    check_eq!(wins, 1);
    check_eq!(lot.total_available(), 18);
    Ok(())
}
