//! The breaker entity and its reallocation pass.

use ev_core::{AllocationPolicy, BreakerId, ChargerId};

use crate::Charger;
use crate::allocation::allocate;

/// A capacity budget shared by a fixed group of chargers.
///
/// The attachment list is set while the grid is wired and never changes
/// during a run.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Breaker {
    id:       BreakerId,
    capacity: f64,
    chargers: Vec<ChargerId>,
}

impl Breaker {
    pub(crate) fn new(id: BreakerId, capacity: f64) -> Self {
        Self { id, capacity, chargers: Vec::new() }
    }

    #[inline]
    pub fn id(&self) -> BreakerId {
        self.id
    }

    /// Hard ceiling on the summed power of the attached active chargers.
    #[inline]
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Attached chargers, in creation order.
    #[inline]
    pub fn chargers(&self) -> &[ChargerId] {
        &self.chargers
    }

    pub(crate) fn attach(&mut self, charger: ChargerId) {
        self.chargers.push(charger);
    }

    /// Summed power of the attached active chargers.
    pub fn load(&self, chargers: &[Charger]) -> f64 {
        self.chargers
            .iter()
            .map(|c| &chargers[c.index()])
            .filter(|c| c.is_active())
            .map(Charger::current_power)
            .sum()
    }

    /// Discard the current allocation and redivide the whole capacity among
    /// the attached active chargers.  Does nothing if none are active.
    ///
    /// `chargers` is the grid's full charger list, indexed by `ChargerId`.
    /// Returns the number of chargers that received a new allocation.
    pub(crate) fn reallocate(&self, chargers: &mut [Charger], policy: AllocationPolicy) -> usize {
        let active: Vec<ChargerId> = self
            .chargers
            .iter()
            .copied()
            .filter(|c| chargers[c.index()].is_active())
            .collect();
        if active.is_empty() {
            return 0;
        }

        let ratings: Vec<f64> = active
            .iter()
            .map(|c| chargers[c.index()].nominal_power())
            .collect();
        let shares = allocate(policy, self.capacity, &ratings);
        for (c, share) in active.iter().zip(shares) {
            chargers[c.index()].set_power(share);
        }

        debug_assert!(
            self.load(chargers) <= self.capacity * (1.0 + 1e-9),
            "breaker {} over capacity",
            self.id,
        );
        active.len()
    }
}
