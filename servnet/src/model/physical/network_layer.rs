use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::{LinkSegmentId, ModeId, NodeId};

#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Deserialize, Serialize, Hash,
)]
pub struct NetworkLayerId(pub usize);

impl Display for NetworkLayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// one layer of the physical network. carries the modes it supports and
/// membership lists into the network-wide node and link segment arenas.
#[derive(Debug, Clone)]
pub struct NetworkLayer {
    pub id: NetworkLayerId,
    pub source_id: String,
    pub supported_modes: Vec<ModeId>,
    pub nodes: Vec<NodeId>,
    pub link_segments: Vec<LinkSegmentId>,
}

impl NetworkLayer {
    pub fn supports(&self, mode: ModeId) -> bool {
        self.supported_modes.contains(&mode)
    }
}
