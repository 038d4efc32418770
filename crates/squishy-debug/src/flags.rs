//! Overlay selection flags.

use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

/// Set of debug overlays to draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DebugDrawFlags(u8);

impl DebugDrawFlags {
    pub const NONE: Self = Self(0);
    /// One line per spring.
    pub const SPRINGS: Self = Self(1);
    /// Spheres on shell particles.
    pub const SHELL_PARTICLES: Self = Self(2);
    /// Spheres on fill particles.
    pub const FILL_PARTICLES: Self = Self(4);
    pub const ALL: Self = Self(7);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

impl BitOr for DebugDrawFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for DebugDrawFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}
