mod common;

use common::*;
use dexpack::dex::{
    access_flags, ClassId, DexClass, DexClassesVector, DexMethod, DexStore, Insn,
};
use dexpack::interdex::estimate_linear_alloc;
use dexpack::Config;
use proptest::prelude::*;

type ClassSpec = (u8, Vec<(u8, u8)>);

/// Realize a generated universe: class `i` gets `vmeths` virtual methods and
/// one direct method invoking the listed (owner, name) pairs.
fn build_universe(store: &mut DexStore, spec: &[ClassSpec]) -> Vec<ClassId> {
    let object = store.type_id("Ljava/lang/Object;");
    spec.iter()
        .enumerate()
        .map(|(i, (vmeths, refs))| {
            let ty = store.type_id(&format!("Lgen/C{i};"));
            let mut class = DexClass::new(ty, access_flags::ACC_PUBLIC);
            class.super_class = Some(object);
            for v in 0..*vmeths {
                class.vmethods.push(DexMethod::new(format!("v{v}")));
            }
            let mut method = DexMethod::new("run");
            for (owner_tag, name_tag) in refs {
                let owner = store.type_id(&format!("Lowner/O{owner_tag};"));
                let mref = store.method_ref(owner, &format!("m{name_tag}"));
                method.code.push(Insn::Invoke(mref));
            }
            class.dmethods.push(method);
            store.add_class(class)
        })
        .collect()
}

fn shape(store: &DexStore, outdex: &DexClassesVector) -> Vec<Vec<String>> {
    outdex.iter().map(|dex| names(store, dex)).collect()
}

proptest! {
    #[test]
    fn packing_partitions_the_universe_and_respects_budgets(
        spec in proptest::collection::vec(
            (0u8..5, proptest::collection::vec((0u8..8, 0u8..40), 0..15)),
            1..20,
        ),
        la_limit in 150u64..5_000,
    ) {
        let config = Config { linear_alloc_limit: la_limit, ..quiet_config() };
        // every third class goes into the priority list
        let priority: Vec<String> =
            (0..spec.len()).step_by(3).map(|i| format!("Lgen/C{i};")).collect();

        let mut store = DexStore::new();
        let classes = build_universe(&mut store, &spec);
        let outdex = run_plain(&mut store, vec![classes.clone()], priority.clone(), config.clone());

        // partition: every input class lands in exactly one dex
        let mut seen = non_canary_names(&store, &outdex);
        seen.sort();
        let mut expected: Vec<String> =
            classes.iter().map(|&c| store.class_name(c).to_string()).collect();
        expected.sort();
        prop_assert_eq!(&seen, &expected);

        // budgets: a dex only exceeds the linear alloc limit when a single
        // class does so on its own
        for dex in &outdex {
            let la: u64 =
                dex.iter().map(|&c| estimate_linear_alloc(&store, store.class(c))).sum();
            prop_assert!(la <= la_limit || dex.len() == 1);
        }

        // determinism: an identically rebuilt universe packs identically
        let mut store2 = DexStore::new();
        let classes2 = build_universe(&mut store2, &spec);
        let outdex2 = run_plain(&mut store2, vec![classes2], priority, config);
        prop_assert_eq!(shape(&store, &outdex), shape(&store2, &outdex2));
    }
}
