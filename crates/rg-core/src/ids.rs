//! Dense, strongly typed indices.
//!
//! Boats, marks and obstacles all live in `Vec`s owned by their stores; the
//! id is the index.  Ids are `Copy + Ord + Hash`, which also makes the
//! ordered pair `(low, high)` a natural key for per-pair state.

use std::fmt;

/// Generate a typed index wrapper around a primitive integer.
macro_rules! dense_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty) => $label:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel for "no such entity".
            pub const INVALID: $name = $name(<$inner>::MAX);

            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// Every id in `0..count`, in ascending order.
            pub fn range(count: usize) -> impl Iterator<Item = $name> {
                (0..count).map(|i| $name(i as $inner))
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", $label, self.0)
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

dense_id! {
    /// Index of a boat in the fleet store.  Fleets are small (eleven boats in
    /// a full race) so `u16` is plenty.
    pub struct BoatId(u16) => "boat";
}

dense_id! {
    /// Index of a mark in `Course::marks`.
    pub struct MarkId(u16) => "mark";
}

dense_id! {
    /// Index of a static obstacle in `Course::obstacles`.
    pub struct ObstacleId(u16) => "obstacle";
}

impl BoatId {
    /// The pair `(a, b)` sorted so the lower id comes first.
    #[inline]
    pub fn ordered(a: BoatId, b: BoatId) -> (BoatId, BoatId) {
        if a <= b { (a, b) } else { (b, a) }
    }
}
