//! Unit tests for ev-fleet.

#[cfg(test)]
mod battery_tests {
    use crate::Battery;

    #[test]
    fn construction_clamps_level() {
        assert_eq!(Battery::new(60.0, 75.0).level(), 60.0);
        assert_eq!(Battery::new(60.0, -3.0).level(), 0.0);
        assert_eq!(Battery::with_fraction(80.0, 0.25).level(), 20.0);
    }

    #[test]
    fn drain_stops_at_empty() {
        let mut b = Battery::new(50.0, 4.0);
        assert_eq!(b.drain(10.0), 4.0);
        assert_eq!(b.level(), 0.0);
        assert_eq!(b.drain(1.0), 0.0);
    }

    #[test]
    fn charge_clamps_and_reports_full() {
        let mut b = Battery::new(50.0, 45.0);
        assert!(!b.charge(2.0));
        assert_eq!(b.level(), 47.0);
        assert!(b.charge(10.0));
        assert_eq!(b.level(), 50.0);
        assert!(b.is_full());
    }

    #[test]
    fn exact_fill_counts_as_full() {
        let mut b = Battery::new(50.0, 40.0);
        assert!(b.charge(10.0));
        assert_eq!(b.headroom(), 0.0);
    }

    #[test]
    fn threshold_is_strict() {
        let b = Battery::new(100.0, 20.0);
        assert!(!b.is_below(0.2));
        assert!(b.is_below(0.21));
        assert!((b.fraction() - 0.2).abs() < 1e-12);
    }
}

#[cfg(test)]
mod vehicle_tests {
    use ev_core::{AgentRng, ChargerId, PolicyConfig, Range, VehicleId};

    use crate::{Battery, ChargingState, Vehicle};

    fn fixed_policy(km: f64) -> PolicyConfig {
        PolicyConfig {
            daily_km_range: Range::fixed(km),
            ..PolicyConfig::default()
        }
    }

    #[test]
    fn idle_vehicle_consumes_energy() {
        let mut v = Vehicle::new(VehicleId(0), Battery::new(60.0, 50.0));
        let mut rng = AgentRng::new(1, VehicleId(0));
        let out = v.step(&mut rng, &fixed_policy(50.0)); // 50 km × 0.2 kWh/km
        assert!((out.consumed_kwh - 10.0).abs() < 1e-12);
        assert!((v.charge_level() - 40.0).abs() < 1e-12);
        assert!(!out.wants_charger);
    }

    #[test]
    fn consumption_clamped_at_zero() {
        let mut v = Vehicle::new(VehicleId(0), Battery::new(60.0, 3.0));
        let mut rng = AgentRng::new(1, VehicleId(0));
        let out = v.step(&mut rng, &fixed_policy(100.0));
        assert_eq!(out.consumed_kwh, 3.0);
        assert_eq!(v.charge_level(), 0.0);
        assert!(out.wants_charger);
    }

    #[test]
    fn low_vehicle_wants_charger() {
        let mut v = Vehicle::new(VehicleId(0), Battery::new(100.0, 25.0));
        let mut rng = AgentRng::new(1, VehicleId(0));
        let out = v.step(&mut rng, &fixed_policy(50.0)); // → 15 kWh < 20
        assert!(out.wants_charger);
        assert_eq!(v.state(), ChargingState::Idle);
    }

    #[test]
    fn charging_vehicle_neither_drives_nor_requests() {
        let mut v = Vehicle::new(VehicleId(0), Battery::new(100.0, 5.0));
        assert!(v.bind(ChargerId(2)));
        let mut rng = AgentRng::new(1, VehicleId(0));
        let out = v.step(&mut rng, &fixed_policy(50.0));
        assert_eq!(out.consumed_kwh, 0.0);
        assert!(!out.wants_charger);
        assert_eq!(v.charge_level(), 5.0);
    }

    #[test]
    fn bind_is_exclusive() {
        let mut v = Vehicle::new(VehicleId(0), Battery::new(100.0, 5.0));
        assert!(v.bind(ChargerId(1)));
        assert!(!v.bind(ChargerId(2)));
        assert_eq!(v.bound_charger(), Some(ChargerId(1)));
        assert_eq!(v.state(), ChargingState::Charging);
        assert_eq!(v.unbind(), Some(ChargerId(1)));
        assert_eq!(v.state(), ChargingState::Idle);
        assert_eq!(v.bound_charger(), None);
    }

    #[test]
    fn consumption_draws_are_reproducible() {
        let policy = PolicyConfig::default();
        let run = || {
            let mut v = Vehicle::new(VehicleId(4), Battery::new(100.0, 100.0));
            let mut rng = AgentRng::new(7, VehicleId(4));
            (0..5).map(|_| v.step(&mut rng, &policy).consumed_kwh).collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }
}
