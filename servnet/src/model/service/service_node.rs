use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::model::physical::NodeId;

#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Deserialize, Serialize, Hash,
)]
pub struct ServiceNodeId(pub usize);

impl Display for ServiceNodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// a stop position of the service network, wrapping exactly one physical
/// network node. the physical node stays owned by the physical network;
/// only its handle is kept here.
#[derive(Debug, Clone)]
pub struct ServiceNode {
    pub id: ServiceNodeId,
    pub source_id: String,
    pub external_id: Option<String>,
    pub physical_node: NodeId,
}
