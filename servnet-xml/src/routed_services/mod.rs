mod reader;
mod routed_services_error;
mod writer;

pub use reader::read_routed_services;
pub use routed_services_error::RoutedServicesIoError;
pub use writer::write_routed_services;
