use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Deserialize, Serialize, Hash,
)]
pub struct ModeId(pub usize);

impl Display for ModeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// a transport mode registered on the physical network, referenced by
/// routed mode services groups.
#[derive(Debug, Clone)]
pub struct Mode {
    pub id: ModeId,
    pub source_id: String,
    pub name: String,
}
