mod common;

use common::*;
use dexpack::dex::{DexMethod, DexStore, Insn};
use dexpack::interdex::{
    find_unreferenced_coldstart_classes, DexEmitTracker, InterDex, MixedModeInfo,
};
use dexpack::Config;
use tempfile::TempDir;

fn prune_config() -> Config {
    Config {
        static_prune_classes: true,
        ..quiet_config()
    }
}

/// Tracker with a lookup table over the given classes.
fn tracker_over(store: &DexStore, classes: &[dexpack::dex::ClassId]) -> DexEmitTracker {
    let mut det = DexEmitTracker::new();
    for &class_id in classes {
        det.clookup.insert(store.class_name(class_id).to_string(), class_id);
    }
    det
}

#[test]
fn pruning_disabled_returns_the_empty_set() {
    let mut store = DexStore::new();
    let x = simple_class(&mut store, "Lx/X;");
    let det = tracker_over(&store, &[x]);

    let unreferenced = find_unreferenced_coldstart_classes(
        &store,
        &[x],
        &det,
        &["Lx/X;".to_string()],
        false,
    );
    assert!(unreferenced.is_empty());
}

#[test]
fn lone_renameable_coldstart_class_is_pruned() {
    let mut store = DexStore::new();
    let x = simple_class(&mut store, "Lx/X;");
    // a non-renameable neighbour keeps the reference set non-empty without
    // touching X
    let anchor_ty = store.type_id("Lanchor/Anchor;");
    let mut anchor_class =
        dexpack::dex::DexClass::new(anchor_ty, dexpack::dex::access_flags::ACC_PUBLIC);
    anchor_class.renameable = false;
    let anchor = store.add_class(anchor_class);

    let det = tracker_over(&store, &[x, anchor]);
    let unreferenced = find_unreferenced_coldstart_classes(
        &store,
        &[x, anchor],
        &det,
        &["Lx/X;".to_string()],
        true,
    );
    assert_eq!(unreferenced.len(), 1);
    assert!(unreferenced.contains(&x));
}

#[test]
fn non_renameable_classes_are_never_pruned() {
    let mut store = DexStore::new();
    // reachable from native code: conservatively live
    let ty = store.type_id("Lx/X;");
    let mut class = dexpack::dex::DexClass::new(ty, dexpack::dex::access_flags::ACC_PUBLIC);
    class.renameable = false;
    let x = store.add_class(class);

    let det = tracker_over(&store, &[x]);
    let unreferenced =
        find_unreferenced_coldstart_classes(&store, &[x], &det, &["Lx/X;".to_string()], true);
    assert!(unreferenced.is_empty());
}

#[test]
fn cold_to_cold_references_keep_classes_alive() {
    let mut store = DexStore::new();
    let x = simple_class(&mut store, "Lx/X;");
    let x_ty = store.class(x).ty;

    // Y's code calls into X
    let mref = store.method_ref(x_ty, "init");
    let y_ty = store.type_id("Ly/Y;");
    let mut y_class = dexpack::dex::DexClass::new(y_ty, dexpack::dex::access_flags::ACC_PUBLIC);
    y_class.renameable = false;
    let mut method = DexMethod::new("boot");
    method.code.push(Insn::Invoke(mref));
    y_class.dmethods.push(method);
    let y = store.add_class(y_class);

    let det = tracker_over(&store, &[x, y]);
    let order = vec!["Lx/X;".to_string(), "Ly/Y;".to_string()];
    let unreferenced = find_unreferenced_coldstart_classes(&store, &[x, y], &det, &order, true);
    assert!(unreferenced.is_empty());
}

#[test]
fn pruning_cascades_until_the_set_is_stable() {
    let mut store = DexStore::new();
    let x = simple_class(&mut store, "Lx/X;");
    let x_ty = store.class(x).ty;

    // Z is the only referrer of X, and nothing references Z
    let mref = store.method_ref(x_ty, "helper");
    let z_ty = store.type_id("Lz/Z;");
    let mut z_class = dexpack::dex::DexClass::new(z_ty, dexpack::dex::access_flags::ACC_PUBLIC);
    let mut method = DexMethod::new("delegate");
    method.code.push(Insn::Invoke(mref));
    z_class.vmethods.push(method);
    let z = store.add_class(z_class);

    let w_ty = store.type_id("Lw/W;");
    let mut w_class = dexpack::dex::DexClass::new(w_ty, dexpack::dex::access_flags::ACC_PUBLIC);
    w_class.renameable = false;
    let w = store.add_class(w_class);

    let scope = vec![x, z, w];
    let det = tracker_over(&store, &scope);
    let order = vec!["Lw/W;".to_string(), "Lx/X;".to_string(), "Lz/Z;".to_string()];
    let unreferenced = find_unreferenced_coldstart_classes(&store, &scope, &det, &order, true);

    // first round drops Z, which orphans X on the next round
    assert_eq!(unreferenced.len(), 2);
    assert!(unreferenced.contains(&x));
    assert!(unreferenced.contains(&z));
    assert!(!unreferenced.contains(&w));
}

#[test]
fn repeated_runs_agree() {
    let mut store = DexStore::new();
    let x = simple_class(&mut store, "Lx/X;");
    let z = simple_class(&mut store, "Lz/Z;");
    let scope = vec![x, z];
    let det = tracker_over(&store, &scope);
    let order = vec!["Lx/X;".to_string(), "Lz/Z;".to_string()];

    let first = find_unreferenced_coldstart_classes(&store, &scope, &det, &order, true);
    let second = find_unreferenced_coldstart_classes(&store, &scope, &det, &order, true);
    assert_eq!(first, second);
}

#[test]
fn pruned_class_is_re_emitted_in_the_tail() {
    let mut store = DexStore::new();

    // Y anchors the cold-start set; X is renameable and unreferenced
    let y_ty = store.type_id("Ly/Y;");
    let mut y_class = dexpack::dex::DexClass::new(y_ty, dexpack::dex::access_flags::ACC_PUBLIC);
    y_class.renameable = false;
    let y = store.add_class(y_class);
    let x = simple_class(&mut store, "Lx/X;");

    let order = vec!["Lx/X;".to_string(), "Ly/Y;".to_string()];
    let dir = TempDir::new().unwrap();
    let (outdex, skipped) = {
        let mut pass = InterDex::new(
            &mut store,
            vec![vec![y, x]],
            order,
            Vec::new(),
            prune_config(),
            MixedModeInfo::default(),
            apk_in(&dir),
        );
        let outdex = pass.run().unwrap();
        (outdex, pass.stats().cls_skipped_in_secondary)
    };

    // X lost its cold-start slot ahead of Y and came back after it
    assert_eq!(outdex.len(), 1);
    assert_eq!(names(&store, &outdex[0]), vec!["Ly/Y;", "Lx/X;"]);
    assert_eq!(skipped, 1);
}
