//! dexpack: deterministic multidex layout packer
//!
//! Partitions a universe of classes into an ordered sequence of output dexes
//! under three per-dex budgets: a linear alloc estimate, unique method refs,
//! and unique field refs. An externally supplied priority list keeps classes
//! needed during application cold start colocated at the front; marker
//! entries in the list delimit the cold-start, extended, and scroll regions.
//!
//! ## Architecture
//!
//! - **dex**: the class model the packer consumes (interned types, method and
//!   field ref handles, class objects with code)
//! - **interdex**: the packing pass itself (linear alloc estimator, emit
//!   tracker, cold-start liveness pruner, plugin hooks, driver state machine)
//! - **apk**: appendable asset files (`mixed_mode.txt`)
//! - **common**: configuration, errors, and fixed constants
//!
//! ## Packing Flow
//!
//! ```text
//! Input dexes + priority list → Pruner → Primary Dex → Priority Walk → Tail
//!                                                           ↓
//!                                     markers seal cold-start / scroll dexes
//! ```

pub mod apk;
pub mod common;
pub mod dex;
pub mod interdex;

pub use common::{Config, Error, Result};

use apk::ApkManager;
use dex::{DexClasses, DexClassesVector, DexStore};
use interdex::{InterDex, InterDexPlugin, MixedModeInfo};

/// Run the packing pass over `dexen` and return the repacked sequence.
///
/// Convenience wrapper over [`InterDex`]; build the driver directly when the
/// run counters are needed afterwards.
pub fn run_interdex(
    store: &mut DexStore,
    dexen: Vec<DexClasses>,
    interdexorder: Vec<String>,
    plugins: Vec<Box<dyn InterDexPlugin>>,
    config: Config,
    mixed_mode_info: MixedModeInfo,
    apk_manager: ApkManager,
) -> Result<DexClassesVector> {
    let mut pass = InterDex::new(
        store,
        dexen,
        interdexorder,
        plugins,
        config,
        mixed_mode_info,
        apk_manager,
    );
    pass.run()
}
