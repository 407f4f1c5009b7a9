//! Plugin hooks consulted while packing

use crate::dex::{ClassId, DexClassesVector, DexStore, FieldRefId, MethodRefId};

/// Extension hooks for the packing pass.
///
/// Implementations may override any subset; the defaults are no-ops. Plugins
/// that veto classes through [`should_skip_class`](Self::should_skip_class)
/// are expected to place them somewhere themselves, via
/// [`additional_classes`](Self::additional_classes) or
/// [`leftover_classes`](Self::leftover_classes).
pub trait InterDexPlugin {
    /// Contribute member refs that will be present at emission time beyond
    /// what the class's own code declares.
    fn gather_mrefs(
        &self,
        store: &DexStore,
        class: ClassId,
        mrefs: &mut Vec<MethodRefId>,
        frefs: &mut Vec<FieldRefId>,
    ) {
        let _ = (store, class, mrefs, frefs);
    }

    /// Veto admission of a class. Consulted only on skip-checked emission
    /// paths.
    fn should_skip_class(&self, store: &DexStore, class: ClassId) -> bool {
        let _ = (store, class);
        false
    }

    /// Classes appended to the open dex just before it seals.
    fn additional_classes(
        &mut self,
        store: &DexStore,
        outdex: &DexClassesVector,
        classes: &[ClassId],
    ) -> Vec<ClassId> {
        let _ = (store, outdex, classes);
        Vec::new()
    }

    /// Classes appended once the whole universe has been emitted.
    fn leftover_classes(&mut self) -> Vec<ClassId> {
        Vec::new()
    }
}
