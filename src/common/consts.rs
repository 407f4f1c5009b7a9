// Capacity limits, well-known descriptors, and the linear-alloc cost model

/// Dex format cap on unique method refs; the largest admitted count stays one
/// below this value.
pub const MAX_METHOD_REFS: usize = 64 * 1024 - 1;
/// Dex format cap on unique field refs; same one-below margin as method refs.
pub const MAX_FIELD_REFS: usize = 64 * 1024 - 1;

/// Descriptor prefix identifying canary classes.
pub const CANARY_PREFIX: &str = "Lsecondary/dex";
/// Highest dex number a canary name can encode.
pub const MAX_DEX_NUM: usize = 99;

/// Super class given to synthesised canaries.
pub const OBJECT_DESCRIPTOR: &str = "Ljava/lang/Object;";

// Priority-list markers. End markers are matched by substring, scroll markers
// by exact name.
pub const FIRST_END_MARKER: &str = "LDexEndMarker0;";
pub const LAST_END_MARKER: &str = "LDexEndMarker1;";
pub const END_MARKER_FRAGMENT: &str = "DexEndMarker";
pub const SCROLL_LIST_START: &str = "LScrollListStart;";
pub const SCROLL_LIST_END: &str = "LScrollListEnd;";

// Linear-alloc cost model, bug-compatible with the legacy DalvikStatsTool
// numbers rather than tuned for accuracy.
pub const OBJECT_VTABLE_SIZE: u32 = 48;
pub const METHOD_SIZE: u32 = 52;
pub const INSTANCE_FIELD_SIZE: u32 = 16;
pub const VTABLE_SLOT_SIZE: u32 = 4;

/// Name-suffix vtable penalties, checked in declaration order with the first
/// match winning.
pub const VTABLE_PENALTIES: &[(&str, u32)] = &[
    ("Layout;", 1500),
    ("View;", 1500),
    ("ViewGroup;", 1800),
    ("Activity;", 1500),
];

/// Canary descriptor for the dex at position `dexnum` in the output.
pub fn canary_class_name(dexnum: usize) -> String {
    format!("Lsecondary/dex{dexnum:02}/Canary;")
}
