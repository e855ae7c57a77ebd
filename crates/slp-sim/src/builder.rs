//! Fluent builder for constructing a [`Sim`].

use log::info;

use slp_core::{NodeId, RngStreams, SimConfig, SimRng};
use slp_network::{ForwardingPolicy, Network};

use crate::{Hunter, Sim, SimError, SimResult};

/// Fluent builder for [`Sim<P>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: field, energy model, seeds, phase ceiling
/// - `P: ForwardingPolicy`: hop selection (e.g.
///   [`slp_network::GreedyEnergyPolicy`])
///
/// # Optional inputs (have defaults)
///
/// | Method           | Default                                          |
/// |------------------|--------------------------------------------------|
/// | `.network(n)`    | Random field from `config` and both seeds        |
/// | `.source(id)`    | Field node farthest from the sink                |
/// | `.hunter(h)`     | `Hunter::at_sink()`                              |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, GreedyEnergyPolicy).build()?;
/// let outcome = sim.run(&mut NoopObserver);
/// ```
pub struct SimBuilder<P: ForwardingPolicy> {
    config:  SimConfig,
    policy:  P,
    network: Option<Network>,
    source:  Option<NodeId>,
    hunter:  Option<Hunter>,
}

impl<P: ForwardingPolicy> SimBuilder<P> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, policy: P) -> Self {
        Self { config, policy, network: None, source: None, hunter: None }
    }

    /// Supply a prebuilt network instead of generating one.
    ///
    /// Its own energy model is used; `config.field` is ignored.  The energy
    /// seed still drives harvesting.
    pub fn network(mut self, network: Network) -> Self {
        self.network = Some(network);
        self
    }

    /// Pin the source instead of picking the farthest field node.
    pub fn source(mut self, source: NodeId) -> Self {
        self.source = Some(source);
        self
    }

    /// Start from a custom hunter state.
    pub fn hunter(mut self, hunter: Hunter) -> Self {
        self.hunter = Some(hunter);
        self
    }

    /// Validate inputs, build or adopt the network, pick the source, and
    /// return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<P>> {
        // ── Validate and resolve the network ──────────────────────────────
        let (network, energy_rng) = match self.network {
            Some(net) => {
                if self.config.max_phases == Some(0) {
                    return Err(SimError::Config("max_phases must be at least 1".into()));
                }
                net.energy_config().validate()?;
                (net, SimRng::new(self.config.energy_seed))
            }
            None => {
                let mut streams =
                    RngStreams::new(self.config.position_seed, self.config.energy_seed);
                let net = Network::generate(&self.config, &mut streams)?;
                // The energy stream carries on from where initial energies
                // left off.
                (net, streams.energy)
            }
        };

        // ── Resolve the source ────────────────────────────────────────────
        let source = match self.source {
            Some(id) => {
                if id.is_sink() || network.get(id).is_none() {
                    return Err(SimError::InvalidSource(id));
                }
                id
            }
            None => network.farthest_from_sink().ok_or_else(|| {
                SimError::Config("network has no field nodes to act as source".into())
            })?,
        };
        info!("selected source node {source}");

        let hunter = self.hunter.unwrap_or_default();
        if network.get(hunter.position()).is_none() {
            return Err(SimError::Config(format!(
                "hunter starts at unknown node {}",
                hunter.position()
            )));
        }

        Ok(Sim {
            config: self.config,
            network,
            policy: self.policy,
            hunter,
            source,
            energy_rng,
            phase: 0,
            logs: Vec::new(),
        })
    }
}
