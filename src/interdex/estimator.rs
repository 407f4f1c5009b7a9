//! Linear alloc estimation
//!
//! Maps a class to the linear alloc space it is expected to consume at
//! runtime. The cost model is fixed and reproducible; the point is stable
//! packing decisions, not accuracy.

use crate::common::consts::{
    INSTANCE_FIELD_SIZE, METHOD_SIZE, OBJECT_VTABLE_SIZE, VTABLE_PENALTIES, VTABLE_SLOT_SIZE,
};
use crate::dex::{DexClass, DexStore};

fn matches_penalty(name: &str, penalty: &mut u32) -> bool {
    for (suffix, pen) in VTABLE_PENALTIES {
        if name.ends_with(suffix) {
            *penalty = *pen;
            return true;
        }
    }
    false
}

/// Estimate the linear alloc space consumed by `class` at runtime.
///
/// Interfaces carry no vtable. For everything else the vtable estimate starts
/// at the plain-object cost; a suffix match on the class's own descriptor, or
/// failing that on its super class's, replaces it with the matching penalty.
pub fn estimate_linear_alloc(store: &DexStore, class: &DexClass) -> u64 {
    let mut la_size = 0u64;
    if !class.is_interface() {
        let mut vtable_penalty = OBJECT_VTABLE_SIZE;
        if !matches_penalty(store.type_name(class.ty), &mut vtable_penalty) {
            if let Some(super_class) = class.super_class {
                matches_penalty(store.type_name(super_class), &mut vtable_penalty);
            }
        }
        la_size += u64::from(vtable_penalty);
        la_size += class.vmethods.len() as u64 * u64::from(VTABLE_SLOT_SIZE);
    }
    la_size += class.dmethods.len() as u64 * u64::from(METHOD_SIZE);
    la_size += class.vmethods.len() as u64 * u64::from(METHOD_SIZE);
    la_size += class.ifields.len() as u64 * u64::from(INSTANCE_FIELD_SIZE);
    la_size
}
