//! The InterDex packing pass
//!
//! Fits classes into an ordered sequence of output dexes under three per-dex
//! budgets: the linear alloc estimate, unique method refs, and unique field
//! refs. The pass is deliberately single pass and first fit so the priority
//! order survives into the output.
//!
//! - **estimator**: linear alloc cost model
//! - **tracker**: per-dex emission state
//! - **pruner**: cold-start liveness fixed point
//! - **plugin**: extension hooks consulted while packing
//! - **mixed_mode**: bookkeeping for the (at most one) mixed mode dex
//! - **driver**: the state machine tying it all together
//! - **stats**: run-local diagnostic counters

pub mod driver;
pub mod estimator;
pub mod mixed_mode;
pub mod plugin;
pub mod pruner;
pub mod stats;
pub mod tracker;

pub use driver::InterDex;
pub use estimator::estimate_linear_alloc;
pub use mixed_mode::{DexStatus, MixedModeInfo};
pub use plugin::InterDexPlugin;
pub use pruner::find_unreferenced_coldstart_classes;
pub use stats::InterDexStats;
pub use tracker::{DexConfig, DexEmitTracker};
