use servnet::model::ModelError;
use thiserror::Error;

use crate::document::ElementError;
use crate::io::DocumentIoError;

#[derive(Error, Debug)]
pub enum ServiceNetworkIoError {
    #[error("expected document root '{expected}', found '{found}'")]
    UnexpectedRoot { expected: String, found: String },
    #[error(
        "service network '{network}' references parent network '{reference}' \
         but the loaded physical network is '{loaded}'"
    )]
    ParentNetworkMismatch {
        network: String,
        reference: String,
        loaded: String,
    },
    #[error("service network layer '{layer}' references unknown physical layer '{reference}'")]
    UnknownParentLayer { layer: String, reference: String },
    #[error("service leg '{leg}' in layer '{layer}' declares more than two leg segments")]
    TooManyLegSegments { leg: String, layer: String },
    #[error("service network layer '{layer}' holds a structurally invalid leg: {source}")]
    InvalidLeg { layer: String, source: ModelError },
    #[error(transparent)]
    Element(#[from] ElementError),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Document(#[from] DocumentIoError),
}
