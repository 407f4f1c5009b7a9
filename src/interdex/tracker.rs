//! Per-dex emission state

use std::collections::{HashMap, HashSet};

use crate::dex::{ClassId, FieldRefId, MethodRefId};

/// Mutable state for the dex currently being filled
#[derive(Debug, Default)]
pub struct DexEmitTracker {
    /// Classes pending in the open dex, in emission order. Never contains
    /// duplicates; every entry is also in `emitted`.
    pub outs: Vec<ClassId>,
    /// Unique method refs accumulated over `outs`.
    pub mrefs: HashSet<MethodRefId>,
    /// Unique field refs accumulated over `outs`.
    pub frefs: HashSet<FieldRefId>,
    /// Linear alloc estimate accumulated over `outs`.
    pub la_size: u64,
    /// Descriptor -> class over the whole input universe.
    pub clookup: HashMap<String, ClassId>,
    /// Classes already placed in any dex so far.
    pub emitted: HashSet<ClassId>,
}

impl DexEmitTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the open-dex state. The lookup table and the emitted set span
    /// the whole run and survive.
    pub fn start_new_dex(&mut self) {
        self.outs.clear();
        self.mrefs.clear();
        self.frefs.clear();
        self.la_size = 0;
    }
}

/// Region flags for the dex currently being filled. Reset on every dex
/// transition; the extended and scroll flags accumulate within a dex.
#[derive(Debug, Default, Clone, Copy)]
pub struct DexConfig {
    pub is_coldstart: bool,
    pub is_extended_set: bool,
    pub has_scroll_cls: bool,
}

impl DexConfig {
    pub fn reset(&mut self) {
        *self = DexConfig::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_new_dex_keeps_lookup_and_emitted() {
        let mut det = DexEmitTracker::new();
        det.la_size = 128;
        // handles are opaque; fabricate one via a store
        let mut store = crate::dex::DexStore::new();
        let ty = store.type_id("La/A;");
        let id = store.add_class(crate::dex::DexClass::new(ty, 0));
        det.outs.push(id);
        det.emitted.insert(id);
        det.clookup.insert("La/A;".to_string(), id);

        det.start_new_dex();

        assert!(det.outs.is_empty());
        assert_eq!(det.la_size, 0);
        assert!(det.emitted.contains(&id));
        assert!(det.clookup.contains_key("La/A;"));
    }
}
