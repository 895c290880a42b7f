//! INT8 GEMM test vectors.
//!
//! Draws A (M x K) and B (K x N) as random int8 matrices, computes the exact
//! product O = A x B with int32 accumulation, and writes all three as
//! fixed-width two's-complement hex tokens in row-major order:
//!
//!   A.hex, B.hex: 2 hex digits per element
//!   O.hex:        8 hex digits per element
//!
//! Runs are reproducible from a seed. The generator is a local ChaCha8 instance
//! passed down explicitly, never process-global state.

pub mod error;
pub mod generate;
pub mod hex;
pub mod matmul;
pub mod matrix;
pub mod range;
pub mod writer;

pub use error::{GenError, HexError, Result};
pub use generate::{generate_gemm_hex, make_rng, GemmConfig, GemmShape, GemmVectors, OutputConfig};
pub use hex::HexToken;
pub use matrix::Matrix;
pub use range::ValueRange;
