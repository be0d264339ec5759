//! Unit tests for ev-grid.

use ev_core::{AllocationPolicy, BreakerId, ChargerId, VehicleId};

use crate::Grid;

const EPS: f64 = 1e-9;

/// One breaker of `capacity` with one charger per entry in `ratings`.
fn single_breaker(capacity: f64, ratings: &[f64], policy: AllocationPolicy) -> Grid {
    let mut grid = Grid::new(policy);
    let b = grid.add_breaker(capacity).unwrap();
    for &r in ratings {
        grid.add_charger(b, r).unwrap();
    }
    grid
}

fn assert_conserved(grid: &Grid) {
    for b in grid.breakers() {
        let load = grid.breaker_load(b.id()).unwrap();
        assert!(load <= b.capacity() + EPS, "breaker {} load {load} > {}", b.id(), b.capacity());
    }
    for c in grid.chargers() {
        assert!(c.current_power() >= 0.0);
        assert!(c.current_power() <= c.nominal_power() + EPS);
    }
}

// ── Share computations ────────────────────────────────────────────────────────

#[cfg(test)]
mod allocation_tests {
    use crate::allocation::{fair_share, water_filling};

    use super::EPS;

    #[test]
    fn fair_share_splits_evenly() {
        let out = fair_share(30.0, &[48.0, 48.0, 10.0]);
        assert_eq!(out, vec![10.0, 10.0, 10.0]);
    }

    #[test]
    fn fair_share_caps_without_redistributing() {
        // share = 15; the 6-rated charger keeps 6 and the other 9 stays idle.
        let out = fair_share(30.0, &[6.0, 48.0]);
        assert_eq!(out, vec![6.0, 15.0]);
    }

    #[test]
    fn fair_share_empty_is_empty() {
        assert!(fair_share(30.0, &[]).is_empty());
    }

    #[test]
    fn water_filling_redistributes_leftover() {
        let out = water_filling(30.0, &[6.0, 48.0]);
        assert!((out[0] - 6.0).abs() < EPS);
        assert!((out[1] - 24.0).abs() < EPS);
    }

    #[test]
    fn water_filling_preserves_input_order() {
        let out = water_filling(40.0, &[48.0, 5.0, 48.0]);
        assert!((out[1] - 5.0).abs() < EPS);
        assert!((out[0] - 17.5).abs() < EPS);
        assert!((out[2] - 17.5).abs() < EPS);
    }

    #[test]
    fn water_filling_never_exceeds_ratings_when_undersubscribed() {
        let out = water_filling(100.0, &[10.0, 20.0]);
        assert_eq!(out, vec![10.0, 20.0]);
    }
}

// ── Wiring ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod wiring_tests {
    use ev_core::{BreakerAssignment, BuildingConfig, SimRng};

    use super::*;
    use crate::GridError;

    #[test]
    fn round_robin_assignment() {
        let building = BuildingConfig::default();
        let mut rng = SimRng::new(1);
        let grid = Grid::from_config(
            &building, AllocationPolicy::FairShare, BreakerAssignment::RoundRobin, &mut rng,
        )
        .unwrap();
        assert_eq!(grid.chargers().len(), 10);
        assert_eq!(grid.breakers().len(), 5);
        for c in grid.chargers() {
            assert_eq!(c.breaker().index(), c.id().index() % 5);
            assert!(building.charger_power_range.contains(c.nominal_power()));
        }
        assert_eq!(grid.breaker(BreakerId(0)).unwrap().chargers(), &[ChargerId(0), ChargerId(5)]);
    }

    #[test]
    fn random_assignment_attaches_every_charger_once() {
        let building = BuildingConfig { charger_count: 40, ..BuildingConfig::default() };
        let mut rng = SimRng::new(3);
        let grid = Grid::from_config(
            &building, AllocationPolicy::FairShare, BreakerAssignment::Random, &mut rng,
        )
        .unwrap();
        let attached: usize = grid.breakers().iter().map(|b| b.chargers().len()).sum();
        assert_eq!(attached, 40);
        for b in grid.breakers() {
            for &c in b.chargers() {
                assert_eq!(grid.charger(c).unwrap().breaker(), b.id());
            }
        }
    }

    #[test]
    fn unknown_breaker_rejected() {
        let mut grid = Grid::new(AllocationPolicy::FairShare);
        assert_eq!(
            grid.add_charger(BreakerId(3), 10.0),
            Err(GridError::UnknownBreaker(BreakerId(3)))
        );
    }

    #[test]
    fn non_positive_capacity_rejected() {
        let mut grid = Grid::new(AllocationPolicy::FairShare);
        assert!(matches!(grid.add_breaker(0.0), Err(GridError::NonPositive { .. })));
    }

    #[test]
    fn new_chargers_start_available_and_unpowered() {
        let grid = single_breaker(20.0, &[48.0, 48.0], AllocationPolicy::FairShare);
        for c in grid.chargers() {
            assert!(c.is_available());
            assert_eq!(c.current_power(), 0.0);
            assert!(c.bound_vehicle().is_none());
        }
        assert_eq!(grid.first_available(), Some(ChargerId(0)));
    }
}

// ── Activation / deactivation ─────────────────────────────────────────────────

#[cfg(test)]
mod transition_tests {
    use super::*;
    use crate::ChargerState;

    #[test]
    fn two_chargers_share_then_one_takes_all() {
        let mut grid = single_breaker(20.0, &[48.0, 48.0], AllocationPolicy::FairShare);
        assert!(grid.activate(ChargerId(0), VehicleId(0)));
        assert_eq!(grid.charger(ChargerId(0)).unwrap().current_power(), 20.0);

        assert!(grid.activate(ChargerId(1), VehicleId(1)));
        assert_eq!(grid.charger(ChargerId(0)).unwrap().current_power(), 10.0);
        assert_eq!(grid.charger(ChargerId(1)).unwrap().current_power(), 10.0);

        assert_eq!(grid.deactivate(ChargerId(0)), Some(VehicleId(0)));
        assert_eq!(grid.charger(ChargerId(1)).unwrap().current_power(), 20.0);
        assert_eq!(grid.charger(ChargerId(0)).unwrap().current_power(), 0.0);
        assert_conserved(&grid);
    }

    #[test]
    fn remaining_charger_capped_at_its_rating() {
        let mut grid = single_breaker(20.0, &[48.0, 12.0], AllocationPolicy::FairShare);
        grid.activate(ChargerId(0), VehicleId(0));
        grid.activate(ChargerId(1), VehicleId(1));
        grid.deactivate(ChargerId(0));
        assert_eq!(grid.charger(ChargerId(1)).unwrap().current_power(), 12.0);
    }

    #[test]
    fn three_uniform_chargers_get_a_third_each() {
        let mut grid = single_breaker(30.0, &[16.0, 16.0, 16.0], AllocationPolicy::FairShare);
        for i in 0..3 {
            grid.activate(ChargerId(i), VehicleId(i));
        }
        for c in grid.chargers() {
            assert!((c.current_power() - 10.0).abs() < EPS);
        }
    }

    #[test]
    fn activate_on_active_charger_is_noop() {
        let mut grid = single_breaker(20.0, &[48.0, 48.0], AllocationPolicy::FairShare);
        grid.activate(ChargerId(0), VehicleId(0));
        grid.activate(ChargerId(1), VehicleId(1));
        let before: Vec<_> = grid
            .chargers()
            .iter()
            .map(|c| (c.state(), c.bound_vehicle(), c.current_power()))
            .collect();

        assert!(!grid.activate(ChargerId(0), VehicleId(7)));

        let after: Vec<_> = grid
            .chargers()
            .iter()
            .map(|c| (c.state(), c.bound_vehicle(), c.current_power()))
            .collect();
        assert_eq!(before, after);
        assert_eq!(grid.charger(ChargerId(0)).unwrap().bound_vehicle(), Some(VehicleId(0)));
    }

    #[test]
    fn deactivate_available_charger_is_noop() {
        let mut grid = single_breaker(20.0, &[48.0], AllocationPolicy::FairShare);
        assert_eq!(grid.deactivate(ChargerId(0)), None);
        assert_eq!(grid.charger(ChargerId(0)).unwrap().state(), ChargerState::Available);
    }

    #[test]
    fn first_available_skips_active() {
        let mut grid = single_breaker(20.0, &[48.0, 48.0, 48.0], AllocationPolicy::FairShare);
        grid.activate(ChargerId(0), VehicleId(0));
        assert_eq!(grid.first_available(), Some(ChargerId(1)));
        grid.activate(ChargerId(1), VehicleId(1));
        grid.activate(ChargerId(2), VehicleId(2));
        assert_eq!(grid.first_available(), None);
        assert_eq!(grid.active_count(), 3);
    }

    #[test]
    fn reallocation_is_local_to_the_breaker() {
        let mut grid = Grid::new(AllocationPolicy::FairShare);
        let a = grid.add_breaker(20.0).unwrap();
        let b = grid.add_breaker(40.0).unwrap();
        let ca = grid.add_charger(a, 48.0).unwrap();
        let cb1 = grid.add_charger(b, 48.0).unwrap();
        let cb2 = grid.add_charger(b, 48.0).unwrap();

        grid.activate(ca, VehicleId(0));
        grid.activate(cb1, VehicleId(1));
        grid.activate(cb2, VehicleId(2));
        assert_eq!(grid.charger(ca).unwrap().current_power(), 20.0);
        assert_eq!(grid.charger(cb1).unwrap().current_power(), 20.0);
        assert_eq!(grid.total_allocated_power(), 60.0);
        assert_conserved(&grid);
    }

    #[test]
    fn water_filling_grid_uses_leftover() {
        let mut grid = single_breaker(30.0, &[6.0, 48.0], AllocationPolicy::WaterFilling);
        grid.activate(ChargerId(0), VehicleId(0));
        grid.activate(ChargerId(1), VehicleId(1));
        assert!((grid.charger(ChargerId(1)).unwrap().current_power() - 24.0).abs() < EPS);
        assert_conserved(&grid);
    }

    #[test]
    fn unknown_charger_is_ignored() {
        let mut grid = single_breaker(20.0, &[48.0], AllocationPolicy::FairShare);
        assert!(!grid.activate(ChargerId(9), VehicleId(0)));
        assert_eq!(grid.deactivate(ChargerId(9)), None);
        assert_eq!(grid.active_count(), 0);
    }

    #[test]
    fn conservation_under_churn() {
        let ratings = [6.0, 12.0, 24.0, 32.0, 48.0, 48.0];
        for policy in [AllocationPolicy::FairShare, AllocationPolicy::WaterFilling] {
            let mut grid = single_breaker(37.0, &ratings, policy);
            // Deterministic activate/release pattern covering every subset size.
            for round in 0..64u32 {
                let c = ChargerId(round % ratings.len() as u32);
                if round % 3 == 0 {
                    grid.deactivate(c);
                } else {
                    grid.activate(c, VehicleId(round));
                }
                assert_conserved(&grid);
                for ch in grid.chargers() {
                    assert!(ch.is_consistent());
                }
            }
        }
    }
}

// ── Repair ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod repair_tests {
    use super::*;

    #[test]
    fn active_without_vehicle_is_inconsistent_and_repairable() {
        let mut grid = single_breaker(20.0, &[48.0, 48.0], AllocationPolicy::FairShare);
        grid.activate(ChargerId(1), VehicleId(1));
        grid.charger_mut(ChargerId(0)).corrupt_active_without_vehicle();
        grid.reallocate(BreakerId(0));
        assert!(!grid.charger(ChargerId(0)).unwrap().is_consistent());
        assert_eq!(grid.charger(ChargerId(1)).unwrap().current_power(), 10.0);

        assert_eq!(grid.repair(ChargerId(0)), None);
        let c0 = grid.charger(ChargerId(0)).unwrap();
        assert!(c0.is_available());
        assert!(c0.is_consistent());
        assert_eq!(c0.current_power(), 0.0);
        assert_eq!(grid.charger(ChargerId(1)).unwrap().current_power(), 20.0);
    }
}
