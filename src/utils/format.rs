//! C-style scientific number formatting.
//!
//! Rust prints `{:e}` as `1.5e0`; external tools reading Matrix Market files expect
//! the printf form `1.5e+00`, with an explicit exponent sign and at least two
//! exponent digits.

use std::fmt::LowerExp;

/// Format `value` like printf `%.{precision}e`.
pub fn format_sci<T: LowerExp>(value: T, precision: usize) -> String {
    let s = format!("{:.*e}", precision, value);
    let Some((mantissa, exponent)) = s.split_once('e') else {
        // NaN and infinities carry no exponent
        return s;
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}
