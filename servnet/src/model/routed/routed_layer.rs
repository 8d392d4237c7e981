use crate::model::{physical::ModeId, service::ServiceLayerId};

use super::RoutedService;

/// the routed services of one service network, partitioned per layer and
/// per transport mode.
#[derive(Debug, Clone)]
pub struct RoutedServices {
    pub source_id: String,
    pub external_id: Option<String>,
    /// document id of the service network the services run over.
    pub parent_service_network: String,
    layers: Vec<RoutedServicesLayer>,
}

impl RoutedServices {
    pub fn new(
        source_id: &str,
        external_id: Option<&str>,
        parent_service_network: &str,
    ) -> RoutedServices {
        RoutedServices {
            source_id: source_id.to_string(),
            external_id: external_id.map(String::from),
            parent_service_network: parent_service_network.to_string(),
            layers: vec![],
        }
    }

    pub fn add_layer(&mut self, layer: RoutedServicesLayer) {
        self.layers.push(layer);
    }

    pub fn layers(&self) -> &[RoutedServicesLayer] {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut [RoutedServicesLayer] {
        &mut self.layers
    }
}

/// one-to-one companion of a service network layer, holding that layer's
/// routed content grouped by mode.
#[derive(Debug, Clone)]
pub struct RoutedServicesLayer {
    pub source_id: String,
    pub external_id: Option<String>,
    pub parent_layer: ServiceLayerId,
    services_by_mode: Vec<RoutedModeServices>,
}

impl RoutedServicesLayer {
    pub fn new(
        source_id: &str,
        external_id: Option<&str>,
        parent_layer: ServiceLayerId,
    ) -> RoutedServicesLayer {
        RoutedServicesLayer {
            source_id: source_id.to_string(),
            external_id: external_id.map(String::from),
            parent_layer,
            services_by_mode: vec![],
        }
    }

    /// the mode group for `mode`, created on first use. groups keep the
    /// order in which modes first appear in the document.
    pub fn services_for_mode_mut(&mut self, mode: ModeId) -> &mut RoutedModeServices {
        if let Some(position) = self
            .services_by_mode
            .iter()
            .position(|group| group.mode == mode)
        {
            return &mut self.services_by_mode[position];
        }
        self.services_by_mode.push(RoutedModeServices {
            mode,
            services: vec![],
        });
        self.services_by_mode
            .last_mut()
            .expect("group inserted above")
    }

    pub fn services_by_mode(&self) -> &[RoutedModeServices] {
        &self.services_by_mode
    }

    pub fn services_by_mode_mut(&mut self) -> &mut [RoutedModeServices] {
        &mut self.services_by_mode
    }

    pub fn is_empty(&self) -> bool {
        self.services_by_mode
            .iter()
            .all(|group| group.services.is_empty())
    }
}

/// the routed services of one transport mode within a layer.
#[derive(Debug, Clone)]
pub struct RoutedModeServices {
    pub mode: ModeId,
    pub services: Vec<RoutedService>,
}
