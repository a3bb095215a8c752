//! Conversions between basis-state indices and fixed-width bit-strings, and
//! extraction of the non-negligible amplitudes out of a raw state vector.
//!
//! Bit-strings come in two orders: the plain binary form (most significant
//! bit first) and the reversed, least-significant-qubit-first form where
//! character `w` is wire `w` of the register. The syndrome windows are
//! defined over the reversed form.

use num_complex::Complex64;
use thiserror::Error;

/// Minimum number of decimal digits kept when rounding amplitudes; anything
/// coarser would start merging genuinely distinct amplitudes of deep
/// circuits into one another.
const MIN_PRECISION: i32 = 8;

/// A bit-string contained a character outside {0, 1}.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("bit-string contains non-binary character {character:?} at position {position}")]
pub struct FormatError {
    pub character: char,
    pub position: usize,
}

/// Converts a basis-state index to a zero-padded binary string of the
/// requested width.
///
/// If the value does not fit in `width` bits the string is silently widened
/// to the smallest width that holds it. With `reversed`, the string is
/// least-significant-bit first, so character `w` is wire `w`.
///
/// # Examples
///
/// ```
/// use shor_code::core::codec::index_to_bitstring;
///
/// assert_eq!(index_to_bitstring(5, 4, false), "0101");
/// assert_eq!(index_to_bitstring(5, 4, true), "1010");
/// assert_eq!(index_to_bitstring(5, 2, false), "101"); // widened
/// ```
#[must_use]
pub fn index_to_bitstring(index: usize, width: usize, reversed: bool) -> String {
    let needed = if index == 0 {
        1
    } else {
        (usize::BITS - index.leading_zeros()) as usize
    };
    let width = width.max(needed);

    let bits = format!("{index:0width$b}");
    if reversed {
        bits.chars().rev().collect()
    } else {
        bits
    }
}

/// Converts a binary string back to a basis-state index.
///
/// The inverse of [`index_to_bitstring`] under the same `reversed` flag.
///
/// # Errors
///
/// Returns [`FormatError`] if any character is outside {0, 1}.
pub fn bitstring_to_index(bits: &str, reversed: bool) -> Result<usize, FormatError> {
    let mut index = 0_usize;
    let length = bits.chars().count();

    for (position, character) in bits.chars().enumerate() {
        let bit = match character {
            '0' => 0,
            '1' => 1,
            _ => return Err(FormatError { character, position }),
        };
        let shift = if reversed { position } else { length - 1 - position };
        index |= bit << shift;
    }
    Ok(index)
}

/// Extracts the basis states that survive rounding from a raw state vector.
///
/// Each amplitude has its real and imaginary components rounded to
/// `precision` decimal digits (never fewer than 8); entries that round to
/// zero are dropped. The result pairs the rounded amplitude with the
/// reversed (wire-order) bit-string of its index and is ordered by
/// ascending index; callers that expect a collapsed outcome inspect the
/// first entry.
///
/// # Panics
///
/// Panics if the vector length is not a power of two.
#[must_use]
pub fn extract_significant_amplitudes(
    amplitudes: &[Complex64],
    precision: i32,
) -> Vec<(Complex64, String)> {
    assert!(
        amplitudes.len().is_power_of_two(),
        "State vector length must be a power of two"
    );
    let width = amplitudes.len().ilog2() as usize;

    let digits = precision.max(MIN_PRECISION);
    let scale = 10_f64.powi(digits);
    let round = |value: f64| (value * scale).round() / scale;

    amplitudes
        .iter()
        .enumerate()
        .filter_map(|(index, amplitude)| {
            let rounded = Complex64::new(round(amplitude.re), round(amplitude.im));
            (rounded != Complex64::ZERO)
                .then(|| (rounded, index_to_bitstring(index, width, true)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    #[rstest]
    #[case(0, 4, false, "0000")]
    #[case(9, 4, false, "1001")]
    #[case(9, 4, true, "1001")]
    #[case(6, 4, true, "0110")]
    #[case(1, 17, true, "10000000000000000")]
    fn index_formats_as_expected(
        #[case] index: usize,
        #[case] width: usize,
        #[case] reversed: bool,
        #[case] expected: &str,
    ) {
        assert_eq!(index_to_bitstring(index, width, reversed), expected);
    }

    #[test]
    fn narrow_width_is_silently_widened() {
        assert_eq!(index_to_bitstring(255, 4, false), "11111111");
        assert_eq!(index_to_bitstring(0, 0, false), "0");
    }

    #[rstest]
    #[case(false)]
    #[case(true)]
    fn conversion_round_trips(#[case] reversed: bool) {
        for index in 0..64 {
            let bits = index_to_bitstring(index, 6, reversed);
            assert_eq!(bitstring_to_index(&bits, reversed), Ok(index));
        }
    }

    #[test]
    fn non_binary_character_is_rejected() {
        assert_eq!(
            bitstring_to_index("0120", false),
            Err(FormatError {
                character: '2',
                position: 2
            })
        );
    }

    #[test]
    fn extraction_keeps_ascending_index_order() {
        let mut amplitudes = vec![Complex64::ZERO; 8];
        amplitudes[6] = Complex64::new(0.6, 0.0);
        amplitudes[1] = Complex64::new(0.0, 0.8);

        let significant = extract_significant_amplitudes(&amplitudes, 8);
        assert_eq!(significant.len(), 2);
        assert_eq!(significant[0].1, "100"); // index 1, wire order
        assert_eq!(significant[1].1, "011"); // index 6, wire order
        assert_abs_diff_eq!(significant[0].0.im, 0.8);
        assert_abs_diff_eq!(significant[1].0.re, 0.6);
    }

    #[test]
    fn rounding_drops_numerical_noise() {
        let mut amplitudes = vec![Complex64::ZERO; 4];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        amplitudes[3] = Complex64::new(1e-12, -1e-12);

        let significant = extract_significant_amplitudes(&amplitudes, 8);
        assert_eq!(significant.len(), 1);
        assert_eq!(significant[0].1, "00");
    }

    #[test]
    fn precision_is_clamped_to_a_useful_floor() {
        let mut amplitudes = vec![Complex64::ZERO; 2];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        amplitudes[1] = Complex64::new(1e-4, 0.0);

        // Requesting 2 digits still rounds at 8, keeping the small entry.
        let significant = extract_significant_amplitudes(&amplitudes, 2);
        assert_eq!(significant.len(), 2);
    }
}
