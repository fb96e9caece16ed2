//! Roman numeral formatting for sense group labels.

use crate::{DictError, Result};

/// Numeral symbols ordered by descending weight, subtractive pairs included.
const NUMERALS: [(u32, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Converts a positive integer to Roman numerals.
///
/// # Errors
///
/// Returns an `InvalidArgument` error when `num` is zero or negative.
///
/// # Examples
///
/// ```
/// use dict_index::utils::to_roman;
///
/// assert_eq!(to_roman(1776).unwrap(), "MDCCLXXVI");
/// assert!(to_roman(0).is_err());
/// ```
pub fn to_roman(num: i64) -> Result<String> {
    if num <= 0 {
        return Err(DictError::invalid_argument(format!(
            "No Roman numeral for {}",
            num
        )));
    }
    let mut rest = num as u64;
    let mut roman = String::new();
    for (weight, symbol) in NUMERALS {
        let weight = weight as u64;
        while rest >= weight {
            roman.push_str(symbol);
            rest -= weight;
        }
    }
    Ok(roman)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_numbers() {
        let expected = ["I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X"];
        for (i, roman) in expected.iter().enumerate() {
            assert_eq!(to_roman(i as i64 + 1).unwrap(), *roman);
        }
    }

    #[test]
    fn test_subtractive_notation() {
        assert_eq!(to_roman(40).unwrap(), "XL");
        assert_eq!(to_roman(90).unwrap(), "XC");
        assert_eq!(to_roman(400).unwrap(), "CD");
        assert_eq!(to_roman(944).unwrap(), "CMXLIV");
        assert_eq!(to_roman(1776).unwrap(), "MDCCLXXVI");
        assert_eq!(to_roman(3999).unwrap(), "MMMCMXCIX");
    }

    #[test]
    fn test_non_positive_is_rejected() {
        assert!(to_roman(0).unwrap_err().is_invalid_argument());
        assert!(to_roman(-1).unwrap_err().is_invalid_argument());
    }
}
