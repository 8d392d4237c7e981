use servnet::model::ModelError;
use thiserror::Error;

use crate::document::ElementError;
use crate::io::DocumentIoError;

#[derive(Error, Debug)]
pub enum RoutedServicesIoError {
    #[error("expected document root '{expected}', found '{found}'")]
    UnexpectedRoot { expected: String, found: String },
    #[error(
        "routed services '{routed}' reference parent service network '{reference}' \
         but the loaded service network is '{loaded}'"
    )]
    ParentServiceNetworkMismatch {
        routed: String,
        reference: String,
        loaded: String,
    },
    #[error("routed services layer '{layer}' references unknown service network layer '{reference}'")]
    UnknownServiceLayer { layer: String, reference: String },
    #[error(
        "services group in layer '{layer}' carries no mode reference and the layer \
         does not support exactly one mode"
    )]
    MissingMode { layer: String },
    #[error("services group in layer '{layer}' references unknown mode '{reference}'")]
    UnknownMode { layer: String, reference: String },
    #[error("services group in layer '{layer}' references mode '{mode}' the layer does not support")]
    UnsupportedMode { layer: String, mode: String },
    #[error(transparent)]
    Element(#[from] ElementError),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Document(#[from] DocumentIoError),
}
