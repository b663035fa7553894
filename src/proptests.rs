use super::*;

use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Reference free set: plain sorted set, scanned from the bottom every time.
#[derive(Clone, Debug)]
struct NaiveSpots {
    free: BTreeSet<usize>,
}

impl NaiveSpots {
    fn new(capacity: usize) -> Self {
        Self {
            free: (0..capacity).collect(),
        }
    }

    fn occupy(&mut self, n: usize) -> Option<usize> {
        if n == 0 {
            return None;
        }
        let sorted: Vec<usize> = self.free.iter().copied().collect();
        let start = sorted
            .windows(n)
            .find(|w| w[n - 1] - w[0] == n - 1)
            .map(|w| w[0])?;
        for i in start..start + n {
            self.free.remove(&i);
        }
        Some(start)
    }

    fn free(&mut self, start: usize, n: usize) {
        self.free.extend(start..start + n);
    }
}

fn validate_spot_set(s: &SpotSet) {
    let runs = s.runs();
    let mut total = 0usize;
    let mut prev_end: Option<usize> = None;
    for &(start, len) in &runs {
        assert!(len > 0, "empty run at {start}");
        assert!(
            start + len <= s.capacity(),
            "run {start}+{len} past capacity"
        );
        if let Some(end) = prev_end {
            assert!(start > end, "runs at {end} and {start} touch or overlap");
        }
        prev_end = Some(start + len);
        total += len;
    }
    assert_eq!(
        total,
        s.available_count(),
        "run lengths must sum to free count"
    );
    assert_eq!(s.largest_run(), runs.iter().map(|r| r.1).max().unwrap_or(0));
}

#[derive(Clone, Debug)]
enum SpotOp {
    Occupy(usize),
    /// Free the held block at this position (modulo held count).
    Free(usize),
}

fn spot_ops_strategy() -> impl Strategy<Value = Vec<SpotOp>> {
    let op = prop_oneof![
        60 => (1usize..=4).prop_map(SpotOp::Occupy),
        40 => any::<usize>().prop_map(SpotOp::Free),
    ];
    prop::collection::vec(op, 0..=400)
}

#[derive(Clone, Debug)]
enum LotOp {
    Park(u8, VehicleKind),
    Leave(u8),
}

fn kind_strategy() -> impl Strategy<Value = VehicleKind> {
    prop_oneof![
        Just(VehicleKind::Bike),
        Just(VehicleKind::Car),
        Just(VehicleKind::Truck),
    ]
}

fn lot_ops_strategy() -> impl Strategy<Value = Vec<LotOp>> {
    let op = prop_oneof![
        55 => (0u8..24, kind_strategy()).prop_map(|(p, k)| LotOp::Park(p, k)),
        45 => (0u8..24).prop_map(LotOp::Leave),
    ];
    prop::collection::vec(op, 0..=300)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 10_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_spot_set_matches_naive(capacity in 0usize..=40, ops in spot_ops_strategy()) {
        let mut s = SpotSet::new(capacity);
        let mut m = NaiveSpots::new(capacity);
        let mut held: Vec<(usize, usize)> = Vec::new();

        for op in ops {
            match op {
                SpotOp::Occupy(n) => {
                    let got = s.occupy(n);
                    prop_assert_eq!(got, m.occupy(n));
                    if let Some(start) = got {
                        held.push((start, n));
                    }
                }
                SpotOp::Free(pick) => {
                    if held.is_empty() {
                        continue;
                    }
                    let (start, n) = held.swap_remove(pick % held.len());
                    s.free(start, n);
                    m.free(start, n);
                }
            }

            prop_assert_eq!(s.available_count(), m.free.len());
        }

        validate_spot_set(&s);
        let expected: Vec<usize> = m.free.iter().copied().collect();
        prop_assert_eq!(s.free_indices(), expected);
        for &(start, n) in &held {
            for i in start..start + n {
                prop_assert!(!s.is_free(i));
            }
        }
    }

    #[test]
    fn prop_lot_matches_naive(
        num_floors in 0usize..=3,
        spots_per_floor in 0usize..=8,
        ops in lot_ops_strategy()
    ) {
        let lot = ParkingLot::new(num_floors, spots_per_floor);
        let mut floors: Vec<NaiveSpots> =
            (0..num_floors).map(|_| NaiveSpots::new(spots_per_floor)).collect();
        let mut registry: HashMap<String, Vec<SpotAssignment>> = HashMap::new();

        for op in ops {
            match op {
                LotOp::Park(p, kind) => {
                    let plate = format!("P{p}");
                    let got = lot.park(&plate, kind);
                    if registry.contains_key(&plate) {
                        prop_assert_eq!(got, Err(LotError::DuplicatePlate { plate }));
                        continue;
                    }
                    let n = kind.spots_needed();
                    let expected = floors
                        .iter_mut()
                        .enumerate()
                        .find_map(|(f, floor)| floor.occupy(n).map(|s| (f, s)))
                        .map(|(f, s)| {
                            (s..s + n).map(|spot| SpotAssignment::new(f, spot)).collect::<Vec<_>>()
                        });
                    match expected {
                        Some(spots) => {
                            prop_assert_eq!(got, Ok(spots.clone()));
                            registry.insert(plate, spots);
                        }
                        None => {
                            let is_no_space = matches!(got, Err(LotError::NoSpotAvailable { .. }));
                            prop_assert!(is_no_space);
                        }
                    }
                }
                LotOp::Leave(p) => {
                    let plate = format!("P{p}");
                    let got = lot.leave(&plate);
                    match registry.remove(&plate) {
                        Some(spots) => {
                            floors[spots[0].floor].free(spots[0].spot, spots.len());
                            prop_assert_eq!(got, Ok(spots));
                        }
                        None => {
                            prop_assert_eq!(got, Err(LotError::UnknownPlate { plate }));
                        }
                    }
                }
            }
        }

        // Held spots are disjoint and none of them is free.
        let mut seen: HashSet<SpotAssignment> = HashSet::new();
        for (plate, spots) in &registry {
            prop_assert_eq!(lot.locate(plate), spots.clone());
            for a in spots {
                prop_assert!(seen.insert(*a), "spot {} held twice", a);
                let free = lot.free_indices(a.floor).unwrap();
                prop_assert!(!free.contains(&a.spot));
            }
        }
        for (f, floor) in floors.iter().enumerate() {
            let expected: Vec<usize> = floor.free.iter().copied().collect();
            prop_assert_eq!(lot.free_indices(f).unwrap(), expected);
        }
        prop_assert_eq!(lot.total_available() + seen.len(), lot.capacity());
        prop_assert_eq!(lot.is_full(), lot.total_available() == 0);
    }

    #[test]
    fn prop_park_leave_round_trip(
        prefill in prop::collection::vec(kind_strategy(), 0..=30),
        kind in kind_strategy()
    ) {
        let lot = ParkingLot::new(3, 10);
        for (i, k) in prefill.into_iter().enumerate() {
            let _ = lot.park(format!("F{i}"), k);
        }
        let before = lot.stats();
        if lot.park("PROBE", kind).is_ok() {
            lot.leave("PROBE").unwrap();
        }
        prop_assert_eq!(lot.stats(), before);
    }
}

#[test]
fn exhaustive_free_order_small_floor() {
    // Occupy a 6-spot floor as three 2-spot blocks, free in every order.
    let blocks = [0usize, 2, 4];
    let orders = [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ];
    for order in orders {
        let mut s = SpotSet::new(6);
        for &b in &blocks {
            assert_eq!(s.occupy(2), Some(b));
        }
        for &i in &order {
            s.free(blocks[i], 2);
            validate_spot_set(&s);
        }
        assert_eq!(s.runs(), vec![(0, 6)]);
    }
}
