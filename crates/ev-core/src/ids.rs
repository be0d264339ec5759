//! Strongly typed, zero-cost identifier wrappers.
//!
//! Every entity is stored in a `Vec` owned by the environment, and its ID is
//! its index into that `Vec`.  IDs are assigned in creation order, which is
//! also the first-fit scan order used when a vehicle requests a charger.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a vehicle in the environment's fleet.
    pub struct VehicleId(u32);
}

typed_id! {
    /// Index of a charging point.  Lower IDs are tried first by a charging request.
    pub struct ChargerId(u32);
}

typed_id! {
    /// Index of a circuit breaker.
    pub struct BreakerId(u32);
}
