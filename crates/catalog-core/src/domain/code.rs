//! Product code codec: stored integer <-> external `PROD-NNN` form.

use crate::error::DomainError;

const PREFIX: &str = "PROD-";

/// Render a stored code in its external form, zero-padded to at least
/// three digits. Padding is a minimum width; wider codes pass through
/// untruncated.
pub fn encode(code: i32) -> String {
    format!("{PREFIX}{code:03}")
}

/// Parse an external code back to its stored form. Exact inverse of
/// [`encode`] for every value the encoder can produce; anything else
/// (wrong prefix, non-digits, overflow) is rejected.
pub fn decode(display: &str) -> Result<i32, DomainError> {
    let digits = display
        .strip_prefix(PREFIX)
        .ok_or_else(|| DomainError::InvalidCodeFormat(display.to_string()))?;

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DomainError::InvalidCodeFormat(display.to_string()));
    }

    digits
        .parse::<i32>()
        .map_err(|_| DomainError::InvalidCodeFormat(display.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_pads_to_three_digits() {
        assert_eq!(encode(7), "PROD-007");
        assert_eq!(encode(42), "PROD-042");
        assert_eq!(encode(123), "PROD-123");
        assert_eq!(encode(0), "PROD-000");
    }

    #[test]
    fn encode_does_not_truncate_wide_codes() {
        assert_eq!(encode(1500), "PROD-1500");
        assert_eq!(encode(123456), "PROD-123456");
    }

    #[test]
    fn decode_inverts_encode() {
        for code in [0, 1, 7, 99, 100, 999, 1000, 1500, i32::MAX] {
            assert_eq!(decode(&encode(code)).unwrap(), code);
        }
    }

    #[test]
    fn decode_rejects_malformed_displays() {
        let malformed = [
            "",
            "7",
            "PROD",
            "PROD-",
            "prod-007",
            "PRD-7",
            "PROD-abc",
            "PROD-1a",
            "PROD-+7",
            "PROD--7",
            "PROD- 7",
            "PROD-7 ",
            "PROD-99999999999",
        ];
        for display in malformed {
            assert!(
                matches!(decode(display), Err(DomainError::InvalidCodeFormat(_))),
                "expected {display:?} to be rejected"
            );
        }
    }
}
