//! Game tick timing
//!
//! Attack speeds are expressed in ticks, the game's base time unit.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Real-time length of one game tick in seconds
pub const TICK_SECONDS: f64 = 0.6;

/// A duration measured in game ticks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticks(pub u32);

impl Ticks {
    /// Duration in real-time seconds
    pub fn as_seconds(self) -> f64 {
        self.0 as f64 * TICK_SECONDS
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Ticks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 1 {
            write!(f, "1 tick")
        } else {
            write!(f, "{} ticks", self.0)
        }
    }
}
