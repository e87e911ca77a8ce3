//! Tree instance identity

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which of the two independent family trees an operation targets.
///
/// Each side owns its own persistence slot; the two trees never share
/// state. The snapshot keys are fixed so existing snapshots keep working
/// across versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Fatherside,
    Motherside,
}

impl Side {
    /// Fixed key of this side's snapshot slot.
    pub fn snapshot_key(&self) -> &'static str {
        match self {
            Side::Fatherside => "familyTreeFatherside",
            Side::Motherside => "familyTreeMotherside",
        }
    }
}

impl Default for Side {
    fn default() -> Self {
        Side::Fatherside
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Fatherside => write!(f, "fatherside"),
            Side::Motherside => write!(f, "motherside"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_both_sides_when_resolving_keys_then_slots_are_distinct() {
        assert_ne!(
            Side::Fatherside.snapshot_key(),
            Side::Motherside.snapshot_key()
        );
    }
}
