//! Three-phase host for the builder: construct, build, refresh.

use log::info;

use crate::attributes::AttributeProvider;
use crate::builder::build_network;
use crate::config::NetworkConfig;
use crate::display::NetworkDisplay;
use crate::error::BuildError;
use crate::feature::{FeatureSource, RawFeature};
use crate::road::Network;

/// Owns the collaborators and the current network.
///
/// Features are read once, on the first [`setup`](Self::setup). Every later
/// build reuses them and replaces the network wholesale. A failed build keeps
/// the previous network and does not reach the display.
pub struct NetworkManager<S, A, D> {
    config: NetworkConfig,
    source: S,
    attributes: A,
    display: D,
    features: Option<Vec<RawFeature>>,
    network: Network,
}

impl<S, A, D> NetworkManager<S, A, D>
where
    S: FeatureSource,
    A: AttributeProvider,
    D: NetworkDisplay,
{
    pub fn new(config: NetworkConfig, source: S, attributes: A, display: D) -> Self {
        Self {
            config,
            source,
            attributes,
            display,
            features: None,
            network: Network::default(),
        }
    }

    /// Read features (first call only) and build the network.
    pub fn setup(&mut self) -> Result<&Network, BuildError> {
        self.rebuild(self.config.clone())
    }

    /// Hand the current network to the display.
    pub fn refresh(&mut self) {
        self.display.display_network(self.network.roads());
    }

    /// Rebuild from the cached features with `config`. The configuration is
    /// only replaced when the build succeeds.
    pub fn reconfigure(&mut self, config: NetworkConfig) -> Result<&Network, BuildError> {
        self.rebuild(config)
    }

    fn rebuild(&mut self, config: NetworkConfig) -> Result<&Network, BuildError> {
        // Read the source once; later builds reuse the cached features.
        let features = match self.features.take() {
            Some(features) => features,
            None => {
                info!("Reading road features...");
                let features = self.source.read_features()?;
                info!("Read {} road features", features.len());
                features
            }
        };

        let built = build_network(&features, &config, &self.attributes);
        self.features = Some(features);

        // Commit the network and its configuration together.
        self.network = built?;
        self.config = config;

        Ok(&self.network)
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Number of features read from the source, if it has been read.
    pub fn feature_count(&self) -> Option<usize> {
        self.features.as_ref().map(Vec::len)
    }
}
