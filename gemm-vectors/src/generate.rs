use std::path::PathBuf;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::error::{GenError, Result};
use crate::hex::encode_tokens;
use crate::matmul::{accumulator_bound, accumulator_fits};
use crate::matrix::Matrix;
use crate::range::ValueRange;
use crate::writer::{txt_sibling, write_hex_file, write_int_file, TokenLayout};

/// GEMM dimensions: A is (m, k), B is (k, n), O is (m, n).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GemmShape {
    pub m: usize,
    pub k: usize,
    pub n: usize,
}

impl GemmShape {
    pub const fn new(m: usize, k: usize, n: usize) -> Self {
        Self { m, k, n }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GemmConfig {
    pub shape: GemmShape,
    pub a_range: ValueRange,
    pub b_range: ValueRange,
}

/// Ranges validated down to i8.
#[derive(Debug, Clone, Copy)]
struct CheckedRanges {
    a: (i8, i8),
    b: (i8, i8),
}

impl GemmConfig {
    pub fn new(shape: GemmShape) -> Self {
        Self { shape, a_range: ValueRange::FULL_I8, b_range: ValueRange::FULL_I8 }
    }

    pub fn with_ranges(mut self, a_range: ValueRange, b_range: ValueRange) -> Self {
        self.a_range = a_range;
        self.b_range = b_range;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.checked().map(|_| ())
    }

    fn checked(&self) -> Result<CheckedRanges> {
        let a = self.a_range.check_i8("a_range")?;
        let b = self.b_range.check_i8("b_range")?;

        for (name, dim) in [("M", self.shape.m), ("K", self.shape.k), ("N", self.shape.n)] {
            if dim == 0 {
                return Err(GenError::ZeroDimension { name });
            }
        }

        let GemmShape { m, k, n } = self.shape;
        let fits = |rows: usize, cols: usize, elem: usize| {
            rows.checked_mul(cols)
                .and_then(|len| len.checked_mul(elem))
                .is_some_and(|bytes| bytes <= isize::MAX as usize)
        };
        if !(fits(m, k, 1) && fits(k, n, 1) && fits(m, n, std::mem::size_of::<i32>())) {
            return Err(GenError::DimensionOverflow { m, k, n });
        }

        if !accumulator_fits(k, self.a_range, self.b_range) {
            return Err(GenError::AccumulatorOverflow {
                k,
                bound: accumulator_bound(k, self.a_range, self.b_range),
            });
        }
        Ok(CheckedRanges { a, b })
    }
}

/// Where and how the matrices are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub a_file: String,
    pub b_file: String,
    pub o_file: String,
    /// Non-positive means one token per line.
    pub tokens_per_line: i64,
    /// Also write `<stem>.txt` decimal dumps next to the hex files.
    pub dump_txt: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            a_file: "A.hex".into(),
            b_file: "B.hex".into(),
            o_file: "O.hex".into(),
            tokens_per_line: 1,
            dump_txt: false,
        }
    }
}

/// Paths written by one run, in write order.
pub type WrittenFiles = Vec<PathBuf>;

/// One set of test vectors: operands and their exact product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GemmVectors {
    pub a: Matrix<i8>,
    pub b: Matrix<i8>,
    pub o: Matrix<i32>,
}

impl GemmVectors {
    /// Validate `config`, draw A then B from `rng`, and multiply.
    pub fn generate<R: Rng>(config: &GemmConfig, rng: &mut R) -> Result<Self> {
        let ranges = config.checked()?;
        let GemmShape { m, k, n } = config.shape;

        let a = Matrix::random(rng, m, k, ranges.a.0, ranges.a.1);
        let b = Matrix::random(rng, k, n, ranges.b.0, ranges.b.1);
        let o = a.matmul(&b);

        debug!(m, k, n, a_range = %config.a_range, b_range = %config.b_range, "generated operands");
        Ok(Self { a, b, o })
    }

    pub fn write(&self, output: &OutputConfig) -> Result<WrittenFiles> {
        let layout = TokenLayout::from_signed(output.tokens_per_line);
        let dir = &output.dir;
        let mut written = Vec::with_capacity(6);

        let a_path = dir.join(&output.a_file);
        write_hex_file(&a_path, &encode_tokens(self.a.as_slice()), layout)?;
        written.push(a_path);

        let b_path = dir.join(&output.b_file);
        write_hex_file(&b_path, &encode_tokens(self.b.as_slice()), layout)?;
        written.push(b_path);

        let o_path = dir.join(&output.o_file);
        write_hex_file(&o_path, &encode_tokens(self.o.as_slice()), layout)?;
        written.push(o_path);

        if output.dump_txt {
            let a_txt = txt_sibling(dir, &output.a_file);
            write_int_file(&a_txt, &self.a)?;
            written.push(a_txt);

            let b_txt = txt_sibling(dir, &output.b_file);
            write_int_file(&b_txt, &self.b)?;
            written.push(b_txt);

            let o_txt = txt_sibling(dir, &output.o_file);
            write_int_file(&o_txt, &self.o)?;
            written.push(o_txt);
        }

        for path in &written {
            info!(path = %path.display(), "wrote");
        }
        Ok(written)
    }
}

/// Build the run's generator: seeded for reproducible vectors, OS entropy otherwise.
pub fn make_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// One full run: validate, generate, and write every requested file.
///
/// Nothing touches the filesystem until validation in [`GemmVectors::generate`]
/// has passed.
pub fn generate_gemm_hex(
    config: &GemmConfig,
    output: &OutputConfig,
    seed: Option<u64>,
) -> Result<(GemmVectors, WrittenFiles)> {
    let mut rng = make_rng(seed);
    let GemmShape { m, k, n } = config.shape;
    info!(m, k, n, seed = ?seed, out = %output.dir.display(), "generating GEMM vectors");

    let vectors = GemmVectors::generate(config, &mut rng)?;
    let written = vectors.write(output)?;
    Ok((vectors, written))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(m: usize, k: usize, n: usize) -> GemmConfig {
        GemmConfig::new(GemmShape::new(m, k, n))
    }

    #[test]
    fn test_validate_rejects_zero_dims() {
        for (cfg, dim) in [(shape(0, 1, 1), "M"), (shape(1, 0, 1), "K"), (shape(1, 1, 0), "N")] {
            match cfg.validate() {
                Err(GenError::ZeroDimension { name }) => assert_eq!(name, dim),
                other => panic!("expected ZeroDimension for {dim}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_range_checked_before_dims() {
        let cfg = shape(0, 0, 0).with_ranges(ValueRange::new(-200, 0), ValueRange::FULL_I8);
        assert!(matches!(cfg.validate(), Err(GenError::RangeOutOfBounds { name: "a_range", .. })));
    }

    #[test]
    fn test_validate_rejects_overflowing_k() {
        let cfg = shape(1, 131_072, 1);
        assert!(matches!(
            cfg.validate(),
            Err(GenError::AccumulatorOverflow { k: 131_072, bound: 2_147_483_648 })
        ));
        // Narrower ranges allow a longer K
        let cfg = shape(1, 131_072, 1).with_ranges(ValueRange::new(-2, 2), ValueRange::new(-2, 2));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_element_count_overflow() {
        let zero = ValueRange::new(0, 0);
        let big = isize::MAX as usize;
        // The last shape fits as i8 operands but not as the i32 product
        for (m, k, n) in [(usize::MAX, 2, 1), (1, usize::MAX, 2), (usize::MAX, 1, 2), (big, 1, 1)] {
            let cfg = shape(m, k, n).with_ranges(zero, zero);
            assert!(matches!(cfg.validate(), Err(GenError::DimensionOverflow { .. })), "{m}x{k}x{n}");
        }
    }

    #[test]
    fn test_generate_stops_on_bad_config() {
        let cfg = shape(usize::MAX, 2, 1).with_ranges(ValueRange::new(0, 0), ValueRange::new(0, 0));
        assert!(matches!(
            GemmVectors::generate(&cfg, &mut make_rng(Some(0))),
            Err(GenError::DimensionOverflow { m: usize::MAX, k: 2, n: 1 })
        ));
    }

    #[test]
    fn test_generate_shapes() {
        let mut rng = make_rng(Some(3));
        let v = GemmVectors::generate(&shape(3, 5, 2), &mut rng).unwrap();
        assert_eq!((v.a.rows(), v.a.cols()), (3, 5));
        assert_eq!((v.b.rows(), v.b.cols()), (5, 2));
        assert_eq!((v.o.rows(), v.o.cols()), (3, 2));
    }

    #[test]
    fn test_seed_reproducible_and_distinct() {
        let cfg = shape(4, 4, 4);
        let v1 = GemmVectors::generate(&cfg, &mut make_rng(Some(42))).unwrap();
        let v2 = GemmVectors::generate(&cfg, &mut make_rng(Some(42))).unwrap();
        let v3 = GemmVectors::generate(&cfg, &mut make_rng(Some(43))).unwrap();
        assert_eq!(v1, v2);
        assert_ne!(v1.a, v3.a);
    }

    #[test]
    fn test_b_drawn_after_a() {
        let cfg = shape(2, 3, 4);
        let v = GemmVectors::generate(&cfg, &mut make_rng(Some(5))).unwrap();

        let mut rng = make_rng(Some(5));
        let a = Matrix::random(&mut rng, 2, 3, -128, 127);
        let b = Matrix::random(&mut rng, 3, 4, -128, 127);
        assert_eq!(v.a, a);
        assert_eq!(v.b, b);
    }
}
