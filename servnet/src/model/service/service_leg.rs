use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::{LegDirection, ServiceLegSegmentId, ServiceNodeId};

#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Deserialize, Serialize, Hash,
)]
pub struct ServiceLegId(pub usize);

impl Display for ServiceLegId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// an undirected pair of two distinct service nodes. owns up to two
/// directional segments, at most one per direction, kept in slots
/// indexed by [`LegDirection::index`].
#[derive(Debug, Clone)]
pub struct ServiceLeg {
    pub id: ServiceLegId,
    pub source_id: String,
    pub external_id: Option<String>,
    pub node_a: ServiceNodeId,
    pub node_b: ServiceNodeId,
    pub(crate) segments: [Option<ServiceLegSegmentId>; 2],
}

impl ServiceLeg {
    pub fn segment(&self, direction: LegDirection) -> Option<ServiceLegSegmentId> {
        self.segments[direction.index()]
    }

    /// populated segments in direction order, A->B first.
    pub fn segments(&self) -> impl Iterator<Item = ServiceLegSegmentId> + '_ {
        self.segments.iter().flatten().copied()
    }

    pub fn number_of_segments(&self) -> usize {
        self.segments.iter().flatten().count()
    }

    /// the service node reached when traversing the leg in `direction`.
    pub fn downstream_node(&self, direction: LegDirection) -> ServiceNodeId {
        match direction {
            LegDirection::AToB => self.node_b,
            LegDirection::BToA => self.node_a,
        }
    }

    pub fn upstream_node(&self, direction: LegDirection) -> ServiceNodeId {
        self.downstream_node(direction.opposite())
    }
}
