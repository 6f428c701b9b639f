//! Match sides and per-side data storage.
//!
//! ## Side
//!
//! A match always has exactly two sides: the human `Player` and the
//! simulated `Opponent`.
//!
//! ## SideMap
//!
//! Fixed two-slot storage indexed by `Side`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two participants in a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The human at the keyboard.
    Player,
    /// The simulated opponent.
    Opponent,
}

impl Side {
    /// Both sides, player first.
    pub const BOTH: [Side; 2] = [Side::Player, Side::Opponent];

    /// The other side.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    /// Slot index (player = 0, opponent = 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::Player => 0,
            Side::Opponent => 1,
        }
    }

    /// Whether this is the opponent side.
    #[must_use]
    pub const fn is_opponent(self) -> bool {
        matches!(self, Side::Opponent)
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Player => write!(f, "player"),
            Side::Opponent => write!(f, "opponent"),
        }
    }
}

/// Per-side data storage.
///
/// ```
/// use stock_ccg::core::{Side, SideMap};
///
/// let mut health: SideMap<i64> = SideMap::with_value(600);
/// health[Side::Opponent] -= 50;
///
/// assert_eq!(health[Side::Player], 600);
/// assert_eq!(health[Side::Opponent], 550);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    data: [T; 2],
}

impl<T> SideMap<T> {
    /// Create with values from a factory function.
    pub fn new(factory: impl Fn(Side) -> T) -> Self {
        Self {
            data: [factory(Side::Player), factory(Side::Opponent)],
        }
    }

    /// Create with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Create with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Iterate over (Side, &T) pairs, player first.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::BOTH.into_iter().zip(self.data.iter())
    }

    /// Iterate over (Side, &mut T) pairs, player first.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Side, &mut T)> {
        Side::BOTH.into_iter().zip(self.data.iter_mut())
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        &self.data[side.index()]
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        &mut self.data[side.index()]
    }
}
