//! `slp-network` — sensor nodes, the neighbour graph, and hop selection.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`node`]    | `SensorNode`, `TransmitOutcome`                             |
//! | [`network`] | `Network` (nodes + neighbour lists), `NetworkBuilder`       |
//! | [`policy`]  | `ForwardingPolicy` trait, `HopDecision`, `GreedyEnergyPolicy` |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod network;
pub mod node;
pub mod policy;


pub use network::{DegreeStats, Network, NetworkBuilder};
pub use node::{SensorNode, TransmitOutcome};
pub use policy::{ForwardingPolicy, GreedyEnergyPolicy, HopDecision};
