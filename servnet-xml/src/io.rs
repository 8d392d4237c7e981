use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use minidom::Element;
use thiserror::Error;

use servnet::diagnostic::Diagnostics;
use servnet::model::physical::PhysicalNetwork;
use servnet::model::routed::RoutedServices;
use servnet::model::service::ServiceNetwork;
use servnet::model::IdIndex;

use crate::config::{RoutedServicesWriterSettings, ServiceNetworkWriterSettings};
use crate::routed_services::{read_routed_services, write_routed_services, RoutedServicesIoError};
use crate::service_network::{
    read_service_network, write_service_network, ServiceNetworkIoError,
};

const XML_DECLARATION: &[u8] = b"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

#[derive(Error, Debug)]
pub enum DocumentIoError {
    #[error("failure reading {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failure parsing {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: minidom::Error,
    },
    #[error("failure writing {}: {message}", .path.display())]
    Write { path: PathBuf, message: String },
}

/// parses a document file into its labeled tree.
pub fn read_element(path: &Path) -> Result<Element, DocumentIoError> {
    let content = std::fs::read_to_string(path).map_err(|source| DocumentIoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("reading {}", path.display());
    Element::from_str(&content).map_err(|source| DocumentIoError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// writes a document tree into `directory/file_name`, creating the
/// directory when missing.
pub fn write_element(
    element: &Element,
    directory: &Path,
    file_name: &str,
) -> Result<PathBuf, DocumentIoError> {
    std::fs::create_dir_all(directory).map_err(|source| DocumentIoError::Write {
        path: directory.to_path_buf(),
        message: source.to_string(),
    })?;
    let path = directory.join(file_name);
    let mut file = File::create(&path).map_err(|source| DocumentIoError::Write {
        path: path.clone(),
        message: source.to_string(),
    })?;
    file.write_all(XML_DECLARATION)
        .map_err(|source| DocumentIoError::Write {
            path: path.clone(),
            message: source.to_string(),
        })?;
    element
        .write_to(&mut file)
        .map_err(|source| DocumentIoError::Write {
            path: path.clone(),
            message: source.to_string(),
        })?;
    log::info!("wrote {}", path.display());
    Ok(path)
}

/// reads a service network document from `path`. the index is extended
/// with every created entity; pass the same index on to routed services
/// parsing afterwards.
pub fn read_service_network_file(
    path: &Path,
    physical: &PhysicalNetwork,
    index: &mut IdIndex,
    diagnostics: &mut Diagnostics,
) -> Result<ServiceNetwork, ServiceNetworkIoError> {
    let root = read_element(path)?;
    read_service_network(&root, physical, index, diagnostics)
}

pub fn read_routed_services_file(
    path: &Path,
    physical: &PhysicalNetwork,
    service_network: &ServiceNetwork,
    index: &IdIndex,
    diagnostics: &mut Diagnostics,
) -> Result<RoutedServices, RoutedServicesIoError> {
    let root = read_element(path)?;
    read_routed_services(&root, physical, service_network, index, diagnostics)
}

pub fn write_service_network_file(
    network: &ServiceNetwork,
    physical: &PhysicalNetwork,
    settings: &ServiceNetworkWriterSettings,
    diagnostics: &mut Diagnostics,
) -> Result<PathBuf, ServiceNetworkIoError> {
    let element = write_service_network(network, physical, diagnostics)?;
    let path = write_element(&element, &settings.output_directory, &settings.file_name)?;
    Ok(path)
}

pub fn write_routed_services_file(
    routed: &mut RoutedServices,
    service_network: &ServiceNetwork,
    physical: &PhysicalNetwork,
    settings: &RoutedServicesWriterSettings,
    diagnostics: &mut Diagnostics,
) -> Result<PathBuf, RoutedServicesIoError> {
    let element = write_routed_services(routed, service_network, physical, settings, diagnostics)?;
    let path = write_element(&element, &settings.output_directory, &settings.file_name)?;
    Ok(path)
}
