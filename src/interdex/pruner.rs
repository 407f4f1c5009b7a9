//! Cold-start liveness pruning
//!
//! Iteratively drops cold-start classes that no other cold-start class still
//! references. Classes dropped here are re-emitted later in the tail phase,
//! so the prune only affects placement, never membership.

use std::collections::HashSet;

use tracing::debug;

use crate::dex::{ClassId, DexStore};
use crate::interdex::tracker::DexEmitTracker;

/// Fixed point over the cold-start set: returns the classes that lost all
/// cold-to-cold references and are safe to move out of the cold-start prefix.
///
/// A class stays live when it is not renameable (reachable from non-managed
/// call sites), when code of a *different* cold-start class references it, or
/// when it is a structural reference of something already live. The live set
/// only shrinks, so the iteration terminates once the unreferenced count
/// stops changing.
pub fn find_unreferenced_coldstart_classes(
    store: &DexStore,
    scope: &[ClassId],
    det: &DexEmitTracker,
    interdexorder: &[String],
    static_prune_classes: bool,
) -> HashSet<ClassId> {
    let mut unreferenced_classes = HashSet::new();

    // no analysis unless we're actually pruning
    if !static_prune_classes {
        return unreferenced_classes;
    }

    let mut coldstart_classes: HashSet<ClassId> = HashSet::new();
    for entry in interdexorder {
        if let Some(&class_id) = det.clookup.get(entry) {
            coldstart_classes.insert(class_id);
        }
    }

    let mut input_scope: Vec<ClassId> = scope.to_vec();
    let mut prev_no_ref: Option<usize> = None;

    loop {
        let mut cold_cold_references: HashSet<ClassId> = HashSet::new();

        // Instruction-level references between distinct cold-start classes.
        for &class_id in &input_scope {
            if !coldstart_classes.contains(&class_id) {
                continue;
            }
            let class = store.class(class_id);
            for method in class.all_methods() {
                for insn in &method.code {
                    let target = if let Some(mref) = insn.method_ref() {
                        Some(store.method_ref_owner(mref))
                    } else if let Some(fref) = insn.field_ref() {
                        Some(store.field_ref_owner(fref))
                    } else {
                        insn.type_ref()
                    };
                    let Some(ty) = target else { continue };
                    let Some(called_cls) = store.class_of(ty) else { continue };
                    if called_cls != class_id && coldstart_classes.contains(&called_cls) {
                        cold_cold_references.insert(called_cls);
                    }
                }
            }
        }

        // Classes reachable from outside the managed world stay live.
        for &class_id in scope {
            if !store.class(class_id).renameable {
                cold_cold_references.insert(class_id);
            }
        }

        // Fold in structural references of everything referenced so far, even
        // when no opcode names them directly.
        for &class_id in &input_scope {
            if cold_cold_references.contains(&class_id) {
                let mut types = Vec::new();
                store.class(class_id).gather_types(&mut types);
                for ty in types {
                    if let Some(ref_cls) = store.class_of(ty) {
                        cold_cold_references.insert(ref_cls);
                    }
                }
            }
        }

        let mut no_ref = 0usize;
        let mut output_scope: Vec<ClassId> = Vec::new();
        for &class_id in &coldstart_classes {
            if store.class(class_id).renameable && !cold_cold_references.contains(&class_id) {
                no_ref += 1;
                unreferenced_classes.insert(class_id);
            } else {
                output_scope.push(class_id);
            }
        }
        debug!(count = no_ref, "classes in coldstart with no references");

        if prev_no_ref == Some(no_ref) {
            break;
        }
        prev_no_ref = Some(no_ref);
        input_scope = output_scope;
    }

    unreferenced_classes
}
