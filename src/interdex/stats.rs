//! Run statistics
//!
//! Diagnostic counters scoped to one packing run.

use crate::dex::DexClass;

/// Counters accumulated over one packing run
#[derive(Debug, Default, Clone)]
pub struct InterDexStats {
    /// Direct methods across admitted classes.
    pub dmeth_count: usize,
    /// Static methods across admitted classes.
    pub smeth_count: usize,
    /// Virtual methods across admitted classes.
    pub vmeth_count: usize,
    /// Unique method refs summed over sealed dexes.
    pub methref_count: usize,
    /// Unique field refs summed over sealed dexes.
    pub fieldref_count: usize,
    /// Classes summed over sealed dexes.
    pub cls_count: usize,
    /// Cold-start classes dropped from the primary dex by pruning.
    pub cls_skipped_in_primary: usize,
    /// Cold-start classes dropped from secondary dexes by pruning.
    pub cls_skipped_in_secondary: usize,
}

impl InterDexStats {
    pub(crate) fn update_class_stats(&mut self, class: &DexClass) {
        self.smeth_count += class.dmethods.iter().filter(|m| m.is_static).count();
        self.dmeth_count += class.dmethods.len();
        self.vmeth_count += class.vmethods.len();
    }

    pub(crate) fn update_dex_stats(&mut self, cls_cnt: usize, mref_cnt: usize, fref_cnt: usize) {
        self.cls_count += cls_cnt;
        self.methref_count += mref_cnt;
        self.fieldref_count += fref_cnt;
    }
}
