use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::model::physical::LinkSegmentId;

use super::{LegDirection, ServiceLegId};

#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Deserialize, Serialize, Hash,
)]
pub struct ServiceLegSegmentId(pub usize);

impl Display for ServiceLegSegmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// one direction of travel along a service leg, backed by an ordered,
/// contiguous chain of physical link segments. the chain may be empty
/// only while parsing is still in flight; validation rejects empty
/// chains before the graph is handed downstream.
#[derive(Debug, Clone)]
pub struct ServiceLegSegment {
    pub id: ServiceLegSegmentId,
    pub source_id: String,
    pub external_id: Option<String>,
    pub leg: ServiceLegId,
    pub direction: LegDirection,
    pub link_segments: Vec<LinkSegmentId>,
}

impl ServiceLegSegment {
    pub fn number_of_link_segments(&self) -> usize {
        self.link_segments.len()
    }

    pub fn first_link_segment(&self) -> Option<LinkSegmentId> {
        self.link_segments.first().copied()
    }

    pub fn last_link_segment(&self) -> Option<LinkSegmentId> {
        self.link_segments.last().copied()
    }
}
