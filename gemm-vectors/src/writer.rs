use std::fmt::Display;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{GenError, Result};
use crate::matrix::Matrix;

/// Tokens per output line. Non-positive requests collapse to one per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLayout(usize);

impl TokenLayout {
    pub fn from_signed(tokens_per_line: i64) -> Self {
        if tokens_per_line <= 0 {
            return Self(1);
        }
        Self(usize::try_from(tokens_per_line).unwrap_or(usize::MAX))
    }

    pub fn per_line(&self) -> usize {
        self.0
    }
}

impl Default for TokenLayout {
    fn default() -> Self {
        Self(1)
    }
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> GenError + '_ {
    move |source| GenError::Io { path: path.to_path_buf(), source }
}

/// Create `path`'s parent directories and open it for writing, truncating
/// any existing file.
fn create(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err(parent))?;
    }
    let file = File::create(path).map_err(io_err(path))?;
    Ok(BufWriter::new(file))
}

/// Write `lines` to `path`, each terminated by `\n`. No lines still
/// produces a single `\n` so every file ends in a newline.
fn write_lines<I>(path: &Path, lines: I) -> Result<()>
where
    I: IntoIterator<Item = String>,
{
    let mut w = create(path)?;
    let write_all = || -> std::io::Result<()> {
        let mut any = false;
        for line in lines {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            any = true;
        }
        if !any {
            w.write_all(b"\n")?;
        }
        w.flush()
    };
    write_all().map_err(io_err(path))
}

/// Write tokens `layout.per_line()` to a line, space-separated.
/// Every line, including the last, ends in `\n`.
pub fn write_hex_file(path: &Path, tokens: &[String], layout: TokenLayout) -> Result<()> {
    write_lines(path, tokens.chunks(layout.per_line()).map(|line| line.join(" ")))?;

    debug!(path = %path.display(), tokens = tokens.len(), per_line = layout.per_line(), "wrote hex");
    Ok(())
}

/// Write a matrix as decimal integers: one row per line, space-separated.
pub fn write_int_file<T: Display>(path: &Path, matrix: &Matrix<T>) -> Result<()> {
    let rows = matrix.row_iter().map(|row| {
        row.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
    });
    write_lines(path, rows)?;

    debug!(path = %path.display(), rows = matrix.rows(), cols = matrix.cols(), "wrote txt");
    Ok(())
}

/// `<dir>/<stem of filename>.txt`, e.g. `A.hex` -> `A.txt`.
pub fn txt_sibling(dir: &Path, filename: &str) -> PathBuf {
    let mut name = Path::new(filename)
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| filename.into());
    name.push(".txt");
    dir.join(name)
}
