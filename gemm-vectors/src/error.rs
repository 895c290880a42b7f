use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenError {
    // ── Input errors ─────────────────────────────────────────────────────
    #[error("{name} [{lo}, {hi}] must fit in int8 [-128, 127]")]
    RangeOutOfBounds { name: &'static str, lo: i32, hi: i32 },
    #[error("{name} [{lo}, {hi}] is inverted (lo > hi)")]
    InvertedRange { name: &'static str, lo: i32, hi: i32 },
    #[error("dimension {name} must be positive")]
    ZeroDimension { name: &'static str },
    #[error("{m}x{k}x{n} matrices exceed addressable memory")]
    DimensionOverflow { m: usize, k: usize, n: usize },
    #[error("K={k} can overflow the int32 accumulator (worst-case |sum| = {bound})")]
    AccumulatorOverflow { k: usize, bound: i128 },

    // ── Output errors ────────────────────────────────────────────────────
    #[error("failed to write {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from decoding a hex token back into an integer.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum HexError {
    #[error("token {token:?} has {found} hex digits, expected {expected}")]
    Width {
        token: String,
        expected: usize,
        found: usize,
    },
    #[error("token {0:?} contains a non-hex digit")]
    Digit(String),
}

pub type Result<T> = std::result::Result<T, GenError>;
