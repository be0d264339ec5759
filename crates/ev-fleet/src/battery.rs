//! Stored-energy bookkeeping.

/// A battery holding `level` kWh out of `capacity` kWh.
///
/// `0 <= level <= capacity` holds after every public method; excess drain or
/// charge is clamped away rather than reported as an error.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Battery {
    capacity_kwh: f64,
    level_kwh:    f64,
}

impl Battery {
    /// `level_kwh` is clamped into `[0, capacity_kwh]`.
    pub fn new(capacity_kwh: f64, level_kwh: f64) -> Self {
        Self {
            capacity_kwh,
            level_kwh: level_kwh.clamp(0.0, capacity_kwh),
        }
    }

    /// A battery starting at `fraction` of its capacity.
    pub fn with_fraction(capacity_kwh: f64, fraction: f64) -> Self {
        Self::new(capacity_kwh, capacity_kwh * fraction)
    }

    #[inline]
    pub fn capacity(&self) -> f64 {
        self.capacity_kwh
    }

    #[inline]
    pub fn level(&self) -> f64 {
        self.level_kwh
    }

    /// State of charge in `[0, 1]`.
    #[inline]
    pub fn fraction(&self) -> f64 {
        self.level_kwh / self.capacity_kwh
    }

    /// Energy still accepted before the battery is full.
    #[inline]
    pub fn headroom(&self) -> f64 {
        self.capacity_kwh - self.level_kwh
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.level_kwh >= self.capacity_kwh
    }

    /// `true` when the level is strictly below `threshold * capacity`.
    #[inline]
    pub fn is_below(&self, threshold: f64) -> bool {
        self.level_kwh < threshold * self.capacity_kwh
    }

    /// Remove up to `kwh`, stopping at empty.  Returns the energy removed.
    pub fn drain(&mut self, kwh: f64) -> f64 {
        let taken = kwh.max(0.0).min(self.level_kwh);
        self.level_kwh -= taken;
        taken
    }

    /// Add `kwh`, stopping at capacity.  Returns `true` if the battery is
    /// full afterwards (the clamp engaged or the charge landed exactly on
    /// capacity).
    pub fn charge(&mut self, kwh: f64) -> bool {
        self.level_kwh += kwh.max(0.0);
        if self.level_kwh >= self.capacity_kwh {
            self.level_kwh = self.capacity_kwh;
            return true;
        }
        false
    }
}
