use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::model::physical::{ModeId, NetworkLayerId};

use super::{ServiceLegId, ServiceLegSegmentId, ServiceNodeId};

#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Deserialize, Serialize, Hash,
)]
pub struct ServiceLayerId(pub usize);

impl Display for ServiceLayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// one layer of the service network. has exactly one parent physical
/// layer and a supported mode set inherited from it; keeps membership
/// lists into the service-network-wide entity arenas.
#[derive(Debug, Clone)]
pub struct ServiceNetworkLayer {
    pub id: ServiceLayerId,
    pub source_id: String,
    pub external_id: Option<String>,
    pub parent_layer: NetworkLayerId,
    pub supported_modes: Vec<ModeId>,
    pub(crate) nodes: Vec<ServiceNodeId>,
    pub(crate) legs: Vec<ServiceLegId>,
    pub(crate) leg_segments: Vec<ServiceLegSegmentId>,
}

impl ServiceNetworkLayer {
    pub fn supports(&self, mode: ModeId) -> bool {
        self.supported_modes.contains(&mode)
    }

    pub fn nodes(&self) -> &[ServiceNodeId] {
        &self.nodes
    }

    pub fn legs(&self) -> &[ServiceLegId] {
        &self.legs
    }

    pub fn leg_segments(&self) -> &[ServiceLegSegmentId] {
        &self.leg_segments
    }
}
