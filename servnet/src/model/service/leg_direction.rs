use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// the two directions a service leg can be traversed in. a leg owns at
/// most one segment per direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LegDirection {
    AToB,
    BToA,
}

impl LegDirection {
    /// stable slot index used by the per-leg segment array.
    pub fn index(&self) -> usize {
        match self {
            LegDirection::AToB => 0,
            LegDirection::BToA => 1,
        }
    }

    pub fn opposite(&self) -> LegDirection {
        match self {
            LegDirection::AToB => LegDirection::BToA,
            LegDirection::BToA => LegDirection::AToB,
        }
    }

    pub fn both() -> [LegDirection; 2] {
        [LegDirection::AToB, LegDirection::BToA]
    }
}

impl Display for LegDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LegDirection::AToB => write!(f, "A->B"),
            LegDirection::BToA => write!(f, "B->A"),
        }
    }
}
