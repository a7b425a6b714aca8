//! Matrix Market coordinate text codec.
//!
//! See <https://math.nist.gov/MatrixMarket/formats.html>. Two layouts are used.
//!
//! A system matrix bundled with its right-hand side, as handed to an external
//! solver. The trailing `1 0` on the size line is a private marker saying that a
//! dense vector of `rows` entries follows the matrix entries:
//!
//! ```text
//! %%MatrixMarket matrix coordinate real general
//! <rows> <cols> <nnz> 1 0
//! <row> <col> <value>      nnz lines, 1-based, row-major
//! <row> <value>            rows lines, 1-based
//! ```
//!
//! A vector, as returned by the solver:
//!
//! ```text
//! %%MatrixMarket vector coordinate real general
//! 3
//! 1  -5.49999999999999822364e+00
//! 2   2.49999999999999955591e+00
//! 3   4.99999999999999911182e+00
//! ```
//!
//! Values are written with 16 fractional digits in scientific notation, enough for
//! an `f64` to survive the round trip exactly.

use std::fmt::{self, LowerExp};

use log::debug;
use num_traits::Float;

use crate::config::CompactionPolicy;
use crate::core::traits::CoordinateSource;
use crate::error::{CooError, Result};
use crate::matrix::SparseMatrix;
use crate::matrix::triplet::TripletStore;
use crate::utils::format::format_sci;

/// Header of a matrix (with bundled vector) payload.
pub const MATRIX_TAG: &str = "%%MatrixMarket matrix coordinate real general";
/// Header of a vector payload.
pub const VECTOR_TAG: &str = "%%MatrixMarket vector coordinate real general";

const TAG_PREFIX: &str = "%%MatrixMarket";
const VALUE_DIGITS: usize = 16;

/// Encode the system `a · x = b` for an external solver.
///
/// `b` must be a column vector with as many rows as `a`. Sparse sources are written
/// straight from their stored nonzeros; anything else is scanned densely. NaN and
/// infinite elements are rejected before anything is written.
pub fn encode_matrix_with_vector<T, A, B>(a: &A, b: &B) -> Result<Vec<u8>>
where
    T: Float + LowerExp,
    A: CoordinateSource<T> + ?Sized,
    B: CoordinateSource<T> + ?Sized,
{
    let (rows, cols) = a.dims();
    check_column_vector(b, rows)?;

    let entries = a
        .nonzero_entries()
        .unwrap_or_else(|| dense_nonzeros(a, rows, cols));
    for &(_, _, v) in &entries {
        check_finite(v)?;
    }
    let rhs = column_values(b, rows)?;

    let text = Payload {
        tag: MATRIX_TAG,
        // `1 0`: a dense vector follows the matrix entries
        size: format!("{} {} {} 1 0", rows, cols, entries.len()),
        entries: &entries,
        rhs: &rhs,
    }
    .to_string();

    debug!(
        "encoded [{},{}] matrix with {} nonzeros and vector: {} bytes",
        rows,
        cols,
        entries.len(),
        text.len()
    );
    Ok(text.into_bytes())
}

/// Encode a column vector in the layout `decode_vector` reads.
pub fn encode_vector<T, B>(b: &B) -> Result<Vec<u8>>
where
    T: Float + LowerExp,
    B: CoordinateSource<T> + ?Sized,
{
    let n = b.nrows();
    check_column_vector(b, n)?;
    let rhs = column_values(b, n)?;

    let text = Payload {
        tag: VECTOR_TAG,
        size: n.to_string(),
        entries: &[],
        rhs: &rhs,
    }
    .to_string();
    Ok(text.into_bytes())
}

/// Rendered body of an encoded payload.
struct Payload<'a, T> {
    tag: &'static str,
    size: String,
    entries: &'a [(usize, usize, T)],
    rhs: &'a [T],
}

impl<T: LowerExp + Copy> fmt::Display for Payload<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.tag)?;
        writeln!(f, "{}", self.size)?;
        for &(r, c, v) in self.entries {
            writeln!(f, "{} {} {}", r + 1, c + 1, format_sci(v, VALUE_DIGITS))?;
        }
        for (i, &v) in self.rhs.iter().enumerate() {
            writeln!(f, "{} {}", i + 1, format_sci(v, VALUE_DIGITS))?;
        }
        Ok(())
    }
}

/// Decode a vector payload into an `n × 1` sparse matrix.
///
/// Entries may come in any order and repeat; repeated indices are summed.
pub fn decode_vector(bytes: &[u8]) -> Result<SparseMatrix> {
    let lines = text_lines(bytes)?;

    match lines.first() {
        Some(tag) if tag.trim_start().starts_with(TAG_PREFIX) => {}
        Some(tag) => return Err(parse_error(1, tag, "missing Matrix Market header")),
        None => return Err(parse_error(1, "", "empty input")),
    }

    let size_line = lines
        .get(1)
        .ok_or_else(|| parse_error(2, "", "missing vector length"))?;
    let n: usize = size_line
        .trim()
        .parse()
        .map_err(|e| parse_error(2, size_line, format!("cannot parse vector length: {e}")))?;
    if n == 0 {
        return Err(parse_error(2, size_line, "vector length must be positive"));
    }

    let mut store = TripletStore::new();
    for (i, line) in lines.iter().enumerate().skip(2) {
        let lineno = i + 1;
        if line.trim().is_empty() {
            continue;
        }
        let mut tokens = line.split_whitespace();
        let (Some(index), Some(value), None) = (tokens.next(), tokens.next(), tokens.next())
        else {
            return Err(parse_error(lineno, line, "expected `index value`"));
        };
        let index: usize = index
            .parse()
            .map_err(|e| parse_error(lineno, line, format!("cannot parse index `{index}`: {e}")))?;
        if index == 0 || index > n {
            return Err(parse_error(
                lineno,
                line,
                format!("index {index} outside 1..={n}"),
            ));
        }
        let value: f64 = value
            .parse()
            .map_err(|e| parse_error(lineno, line, format!("cannot parse value `{value}`: {e}")))?;
        if !value.is_finite() {
            return Err(parse_error(lineno, line, "value is not finite"));
        }
        // 1-based on the wire; for an n × 1 matrix the position is the row
        store.push((index - 1) as u64, value);
    }

    let v = SparseMatrix::from_store(n, 1, CompactionPolicy::default(), store);
    v.compact();
    debug!("decoded vector of length {} with {} nonzeros", n, v.nnz());
    Ok(v)
}

/// Decode a residual history: one value per non-blank line.
///
/// ```text
/// 1.000000e+00
/// 0.000000e+00
/// ```
pub fn decode_residual_history(bytes: &[u8]) -> Result<Vec<f64>> {
    let lines = text_lines(bytes)?;
    let mut out = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().enumerate() {
        let token = line.trim();
        if token.is_empty() {
            continue;
        }
        let v: f64 = token
            .parse()
            .map_err(|e| parse_error(i + 1, line, format!("cannot parse value: {e}")))?;
        out.push(v);
    }
    Ok(out)
}

fn check_column_vector<T, B>(b: &B, rows: usize) -> Result<()>
where
    B: CoordinateSource<T> + ?Sized,
{
    let found = b.dims();
    if found != (rows, 1) {
        return Err(CooError::ShapeMismatch {
            expected: (rows, 1),
            found,
        });
    }
    Ok(())
}

fn dense_nonzeros<T, A>(a: &A, rows: usize, cols: usize) -> Vec<(usize, usize, T)>
where
    T: Float,
    A: CoordinateSource<T> + ?Sized,
{
    let mut out = Vec::new();
    for i in 0..rows {
        for j in 0..cols {
            let v = a.get(i, j);
            if !v.is_zero() {
                out.push((i, j, v));
            }
        }
    }
    out
}

fn column_values<T, B>(b: &B, rows: usize) -> Result<Vec<T>>
where
    T: Float,
    B: CoordinateSource<T> + ?Sized,
{
    (0..rows)
        .map(|i| {
            let v = b.get(i, 0);
            check_finite(v).map(|_| v)
        })
        .collect()
}

fn check_finite<T: Float>(v: T) -> Result<()> {
    if !v.is_finite() {
        return Err(CooError::InvalidValue(v.to_f64().unwrap_or(f64::NAN)));
    }
    Ok(())
}

fn text_lines(bytes: &[u8]) -> Result<Vec<&str>> {
    let text = std::str::from_utf8(bytes).map_err(|e| {
        let bad = e.valid_up_to();
        let line = bytes[..bad].iter().filter(|&&b| b == b'\n').count() + 1;
        let start = bytes[..bad]
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |i| i + 1);
        let end = bytes[bad..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(bytes.len(), |i| bad + i);
        let content = String::from_utf8_lossy(&bytes[start..end]);
        parse_error(
            line,
            content.trim_end_matches('\r'),
            format!("invalid UTF-8: {e}"),
        )
    })?;
    Ok(text.lines().collect())
}

fn parse_error(line: usize, content: &str, reason: impl Into<String>) -> CooError {
    CooError::Parse {
        line,
        content: content.to_string(),
        reason: reason.into(),
    }
}
