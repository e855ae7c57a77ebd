//! `slp-core` — foundational types for the `slp_sim` workspace.
//!
//! This crate is a dependency of every other `slp-*` crate.  It intentionally
//! has no `slp-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `NodeId` (with the reserved `NodeId::SINK`)           |
//! | [`geo`]         | `Point`, Euclidean distance                           |
//! | [`config`]      | `SimConfig`, `FieldConfig`, `EnergyConfig`            |
//! | [`rng`]         | `SimRng`, `RngStreams` (positions / energy)           |
//! | [`error`]       | `SlpError`, `SlpResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required to load a `SimConfig` from TOML.                  |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{EnergyConfig, FieldConfig, SimConfig};
pub use error::{SlpError, SlpResult};
pub use geo::Point;
pub use ids::NodeId;
pub use rng::{RngStreams, SimRng};
