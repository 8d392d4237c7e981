use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::NodeId;

#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Deserialize, Serialize, Hash,
)]
pub struct LinkSegmentId(pub usize);

impl Display for LinkSegmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// a directed traversal of a physical link, running from its upstream
/// node to its downstream node.
#[derive(Debug, Clone)]
pub struct LinkSegment {
    pub id: LinkSegmentId,
    pub source_id: String,
    pub upstream: NodeId,
    pub downstream: NodeId,
}
