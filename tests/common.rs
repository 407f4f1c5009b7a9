// Shared builders for packer tests

use dexpack::apk::ApkManager;
use dexpack::dex::{
    access_flags, ClassId, DexClass, DexClasses, DexClassesVector, DexMethod, DexStore, Insn,
};
use dexpack::interdex::MixedModeInfo;
use dexpack::Config;
use tempfile::TempDir;

/// Register a minimal concrete class extending Object.
pub fn simple_class(store: &mut DexStore, descriptor: &str) -> ClassId {
    let ty = store.type_id(descriptor);
    let object = store.type_id("Ljava/lang/Object;");
    let mut class = DexClass::new(ty, access_flags::ACC_PUBLIC);
    class.super_class = Some(object);
    store.add_class(class)
}

/// Register a class whose single method invokes `count` distinct methods of
/// a phantom type derived from `tag`.
pub fn class_with_method_refs(
    store: &mut DexStore,
    descriptor: &str,
    tag: &str,
    count: usize,
) -> ClassId {
    let owner = store.type_id(&format!("Lphantom/{tag};"));
    let mut method = DexMethod::new("run");
    for i in 0..count {
        let mref = store.method_ref(owner, &format!("m{i}"));
        method.code.push(Insn::Invoke(mref));
    }
    let ty = store.type_id(descriptor);
    let object = store.type_id("Ljava/lang/Object;");
    let mut class = DexClass::new(ty, access_flags::ACC_PUBLIC);
    class.super_class = Some(object);
    class.vmethods.push(method);
    store.add_class(class)
}

/// Config with canaries off and a roomy linear alloc budget; most scenarios
/// opt into the knobs they exercise.
pub fn quiet_config() -> Config {
    Config {
        emit_canaries: false,
        normal_primary_dex: true,
        ..Config::default()
    }
}

pub fn apk_in(dir: &TempDir) -> ApkManager {
    ApkManager::new(dir.path().join("assets"))
}

/// Run the pass with no plugins and no mixed mode info.
pub fn run_plain(
    store: &mut DexStore,
    dexen: Vec<DexClasses>,
    interdexorder: Vec<String>,
    config: Config,
) -> DexClassesVector {
    let dir = TempDir::new().unwrap();
    dexpack::run_interdex(
        store,
        dexen,
        interdexorder,
        Vec::new(),
        config,
        MixedModeInfo::default(),
        apk_in(&dir),
    )
    .expect("packing failed")
}

/// Names of the classes in one output dex.
pub fn names(store: &DexStore, dex: &[ClassId]) -> Vec<String> {
    dex.iter().map(|&c| store.class_name(c).to_string()).collect()
}

/// Every non-canary class across all output dexes, flattened in order.
pub fn non_canary_names(store: &DexStore, outdex: &DexClassesVector) -> Vec<String> {
    outdex
        .iter()
        .flatten()
        .map(|&c| store.class_name(c).to_string())
        .filter(|n| !n.starts_with("Lsecondary/dex"))
        .collect()
}
