use thiserror::Error;

use super::{service::LegDirection, EntityKind};

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("duplicate {kind} id '{source_id}' registered in identifier index")]
    DuplicateSourceId { kind: EntityKind, source_id: String },
    #[error("attempting to get {kind} with handle '{index}' not in the model")]
    UnknownHandle { kind: EntityKind, index: usize },
    #[error("service leg '{leg}' connects service node '{node}' to itself")]
    LegEndpointsNotDistinct { leg: String, node: String },
    #[error("service leg '{leg}' already carries a {direction} segment")]
    DuplicateLegDirection {
        leg: String,
        direction: LegDirection,
    },
    #[error("service leg segment '{segment}' is attached to service leg '{leg}' it does not traverse")]
    SegmentLegMismatch { segment: String, leg: String },
    #[error("service leg segment '{segment}' resolved to an empty link segment path")]
    EmptyLegSegmentPath { segment: String },
    #[error("service leg segment '{segment}' link segment path breaks at '{at}'")]
    DiscontiguousLegSegmentPath { segment: String, at: String },
}
