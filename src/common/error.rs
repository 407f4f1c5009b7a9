use thiserror::Error;

/// Result type for dexpack operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the dexpack packer
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(
        "would have to do an early flush on the primary dex: \
         linear alloc {la_size}/{la_limit}, method refs {mrefs}/{mref_limit}, \
         field refs {frefs}/{fref_limit}"
    )]
    PrimaryDexOverflow {
        la_size: u64,
        la_limit: u64,
        mrefs: usize,
        mref_limit: usize,
        frefs: usize,
        fref_limit: usize,
    },

    #[error("max dex number surpassed: {dexnum}")]
    DexNumberExceeded { dexnum: usize },

    #[error("only one mixed mode dex is supported")]
    SecondMixedModeDex,

    #[error("mixed mode class {name} left in the extended set with both touch flags off")]
    MixedModeClassStranded { name: String },
}
