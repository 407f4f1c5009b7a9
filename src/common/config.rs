//! Packer configuration

/// Configuration for one packing run
#[derive(Debug, Clone)]
pub struct Config {
    /// Linear alloc budget per dex, in bytes
    pub linear_alloc_limit: u64,
    /// Emit a canary class into every secondary dex
    pub emit_canaries: bool,
    /// Honor `LScrollListEnd;` as a dex boundary
    pub emit_scroll_set_marker: bool,
    /// Prune cold-start classes that lost all cold-to-cold references
    pub static_prune_classes: bool,
    /// Treat the primary dex like any other dex instead of keeping it intact
    pub normal_primary_dex: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            linear_alloc_limit: 11_600 * 1024,
            emit_canaries: true,
            emit_scroll_set_marker: false,
            static_prune_classes: false,
            normal_primary_dex: false,
        }
    }
}
