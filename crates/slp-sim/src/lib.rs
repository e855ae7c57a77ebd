//! `slp-sim` — phase loop orchestrator for the slp_sim simulator.
//!
//! # Phase loop
//!
//! ```text
//! until the hunter captures the source (or max_phases is reached):
//!   ① Harvest — every node, sink included, draws from the energy stream.
//!   ② Route   — one message from the fixed source, hop by hop through the
//!               ForwardingPolicy, until the sink or a dead end.
//!   ③ Record  — per-hop candidate sets, path, source energy.
//!   ④ Hunt    — the hunter steps back one hop if it sits on the path.
//!   ⑤ Stop    — on capture; otherwise next phase.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the runs of a trial batch on Rayon's thread pool. |
//! | `serde`    | Derives `Serialize`/`Deserialize` on phase records.    |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use slp_core::SimConfig;
//! use slp_network::GreedyEnergyPolicy;
//! use slp_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::default(), GreedyEnergyPolicy).build()?;
//! let outcome = sim.run(&mut NoopObserver);
//! println!("{outcome}: {} phase logs", sim.logs().len());
//! ```

pub mod builder;
pub mod error;
pub mod hunter;
pub mod observer;
pub mod phase;
pub mod sim;
pub mod trials;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use hunter::{Hunter, HunterState};
pub use observer::{NoopObserver, PhaseObserver};
pub use phase::{HopRecord, PhaseLog};
pub use sim::{RunOutcome, RunReport, Sim, simulate};
pub use trials::{TrialSummary, run_trials};
