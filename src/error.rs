//! Error type shared by configuration, sweep and report output.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("run count must be odd so a single median exists, got {0}")]
    EvenRunCount(usize),

    #[error("pass count must be at least 1")]
    ZeroPasses,

    #[error("maximum array size must be a power of two, got {0}")]
    MaxSizeNotPowerOfTwo(usize),

    #[error("maximum array size must be at least 2, got {0}")]
    MaxSizeTooSmall(usize),

    #[error("maximum array size {size} exceeds the supported limit of {limit}")]
    MaxSizeTooLarge { size: usize, limit: usize },

    #[error("at least one element width must be evaluated")]
    NoElementWidths,

    #[error("unsupported element size: {0} bytes (expected 1, 2, 4 or 8)")]
    UnknownElementWidth(usize),

    #[error("unknown duration unit '{0}' (expected ns, us, ms or s)")]
    UnknownUnit(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("timing table incomplete: {missing} of {total} cells never recorded")]
    IncompleteTable { missing: usize, total: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
