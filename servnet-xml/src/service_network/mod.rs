mod reader;
mod service_network_error;
mod writer;

pub use reader::read_service_network;
pub use service_network_error::ServiceNetworkIoError;
pub use writer::write_service_network;
