//! Share computations used by breaker reallocation.
//!
//! All functions take the breaker capacity and the nominal ratings of the
//! currently active chargers (in any order) and return one allocation per
//! rating, in the same order.  Every result satisfies
//! `0 <= out[i] <= ratings[i]` and `Σ out <= capacity` (up to float rounding).

use ev_core::AllocationPolicy;

/// Dispatch on the configured policy.
pub fn allocate(policy: AllocationPolicy, capacity: f64, ratings: &[f64]) -> Vec<f64> {
    match policy {
        AllocationPolicy::FairShare    => fair_share(capacity, ratings),
        AllocationPolicy::WaterFilling => water_filling(capacity, ratings),
    }
}

/// Equal split of the whole budget, each share capped at its charger's rating.
///
/// Capacity a capped charger cannot use is left idle.
pub fn fair_share(capacity: f64, ratings: &[f64]) -> Vec<f64> {
    if ratings.is_empty() {
        return Vec::new();
    }
    let share = capacity.max(0.0) / ratings.len() as f64;
    ratings.iter().map(|&rating| rating.min(share).max(0.0)).collect()
}

/// Max-min fair split: serve chargers from the lowest rating up, each getting
/// `min(rating, remaining / chargers_left)`, so capacity a small charger
/// cannot use is re-split among the larger ones.
pub fn water_filling(capacity: f64, ratings: &[f64]) -> Vec<f64> {
    let n = ratings.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| ratings[a].total_cmp(&ratings[b]));

    let mut out = vec![0.0; n];
    let mut remaining = capacity.max(0.0);
    for (served, &i) in order.iter().enumerate() {
        let share = remaining / (n - served) as f64;
        let given = ratings[i].min(share).max(0.0);
        out[i] = given;
        remaining = (remaining - given).max(0.0);
    }
    out
}
