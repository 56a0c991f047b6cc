/// Field validation and normalization
///
/// These functions are pure and deterministic. They are the single source of
/// normalization for both the validation path and the storage/filter paths,
/// so a value checked here and a value stored later can never drift apart.
///
/// Each validator returns the normalized value regardless of validity; the
/// caller must check the `valid` flag before trusting it.
///
/// # Example
///
/// ```
/// use rosterhub_shared::validation::validate_mobile;
///
/// let result = validate_mobile("+911234567890");
/// assert!(result.valid);
/// assert_eq!(result.cleaned, "1234567890");
/// ```

/// Outcome of normalizing a field: the cleaned value plus a validity flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated {
    /// Whether the cleaned value passes the format check
    pub valid: bool,

    /// The normalized value (returned even when invalid)
    pub cleaned: String,
}

/// Validates and normalizes a mobile number
///
/// Trims the input, then strips a leading `+91` or, failing that, a single
/// leading `0`. At most one prefix is stripped, in that priority order. The
/// result is valid iff exactly 10 ASCII decimal digits remain.
pub fn validate_mobile(input: &str) -> Validated {
    let trimmed = input.trim();

    let cleaned = trimmed
        .strip_prefix("+91")
        .or_else(|| trimmed.strip_prefix('0'))
        .unwrap_or(trimmed);

    let valid = cleaned.len() == 10 && cleaned.bytes().all(|b| b.is_ascii_digit());

    Validated {
        valid,
        cleaned: cleaned.to_string(),
    }
}

/// Validates and normalizes a PAN identifier
///
/// Trims and uppercases the input. Valid iff the normalized value is
/// 5 uppercase letters, 4 digits, 1 uppercase letter (e.g. `ABCDE1234F`).
/// Normalization is idempotent: validating an already-valid PAN returns it
/// unchanged.
pub fn validate_pan(input: &str) -> Validated {
    let cleaned = input.trim().to_uppercase();

    let chars: Vec<char> = cleaned.chars().collect();
    let valid = chars.len() == 10
        && chars[..5].iter().all(|c| c.is_ascii_uppercase())
        && chars[5..9].iter().all(|c| c.is_ascii_digit())
        && chars[9].is_ascii_uppercase();

    Validated { valid, cleaned }
}

/// Checks that a required field is non-empty after trimming
pub fn validate_required(value: &str) -> bool {
    !value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mobile_strips_country_code_prefix() {
        let result = validate_mobile("+911234567890");
        assert!(result.valid);
        assert_eq!(result.cleaned, "1234567890");
    }

    #[test]
    fn test_mobile_strips_single_zero_prefix() {
        let result = validate_mobile("01234567890");
        assert!(result.valid);
        assert_eq!(result.cleaned, "1234567890");
    }

    #[test]
    fn test_mobile_bare_ten_digits() {
        let result = validate_mobile("9876543210");
        assert!(result.valid);
        assert_eq!(result.cleaned, "9876543210");
    }

    #[test]
    fn test_mobile_strips_at_most_one_prefix() {
        // "+91" wins over "0"; the remaining leading zero stays put
        let result = validate_mobile("+910123456789");
        assert!(result.valid);
        assert_eq!(result.cleaned, "0123456789");

        // A single "0" is stripped, the second one is part of the number
        let result = validate_mobile("00123456789");
        assert!(result.valid);
        assert_eq!(result.cleaned, "0123456789");
    }

    #[test]
    fn test_mobile_trims_whitespace() {
        let result = validate_mobile("  +911234567890  ");
        assert!(result.valid);
        assert_eq!(result.cleaned, "1234567890");
    }

    #[test]
    fn test_mobile_rejects_wrong_length() {
        assert!(!validate_mobile("123456789").valid); // 9 digits
        assert!(!validate_mobile("12345678901").valid); // 11 digits
        assert!(!validate_mobile("").valid);
        assert!(!validate_mobile("+91").valid);
    }

    #[test]
    fn test_mobile_rejects_non_digits() {
        let result = validate_mobile("12345abcde");
        assert!(!result.valid);
        // The cleaned value is still returned
        assert_eq!(result.cleaned, "12345abcde");
    }

    #[test]
    fn test_pan_uppercases_input() {
        let result = validate_pan("abcde1234f");
        assert!(result.valid);
        assert_eq!(result.cleaned, "ABCDE1234F");
    }

    #[test]
    fn test_pan_valid_normalized_is_idempotent() {
        let first = validate_pan("abcde1234f");
        let second = validate_pan(&first.cleaned);
        assert!(second.valid);
        assert_eq!(second.cleaned, first.cleaned);
    }

    #[test]
    fn test_pan_rejects_bad_shapes() {
        assert!(!validate_pan("ABCD1234F").valid); // too short
        assert!(!validate_pan("ABCDE12345").valid); // digit in letter slot
        assert!(!validate_pan("ABCDE123FF").valid); // letter in digit slot
        assert!(!validate_pan("1BCDE1234F").valid); // digit in leading block
        assert!(!validate_pan("ABCDE1234FX").valid); // too long
        assert!(!validate_pan("").valid);
    }

    #[test]
    fn test_pan_trims_whitespace() {
        let result = validate_pan("  abcde1234f ");
        assert!(result.valid);
        assert_eq!(result.cleaned, "ABCDE1234F");
    }

    #[test]
    fn test_required_field() {
        assert!(validate_required("Jane Doe"));
        assert!(validate_required("  x "));
        assert!(!validate_required(""));
        assert!(!validate_required("   "));
    }
}
