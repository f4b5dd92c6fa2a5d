//! Player body models and the identifier-derived default.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ProfileError, ProfileResult};

/// Length of an undashed profile identifier.
pub const IDENTIFIER_LEN: usize = 32;

/// Body shape a skin is rendered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Model {
    /// Classic model with 4px wide arms.
    Steve,
    /// Slim model with 3px wide arms.
    Alex,
}

impl Model {
    /// Model used by the game client for a profile without a custom skin.
    ///
    /// Equivalent to the parity of Java's `UUID::hashCode`: digits 7 and 15 of
    /// each half of the identifier hold the lowest bits of the folded hash.
    pub fn default_for(id: &str) -> ProfileResult<Model> {
        let digits = id.as_bytes();
        if digits.len() != IDENTIFIER_LEN {
            return Err(ProfileError::parse(
                "profile identifier",
                format!("expected {IDENTIFIER_LEN} hex digits, got {}", digits.len()),
            ));
        }

        let (high, low) = digits.split_at(IDENTIFIER_LEN / 2);
        let x = is_even(high[7])? != is_even(low[7])?;
        let y = is_even(high[15])? != is_even(low[15])?;

        Ok(if x != y { Model::Alex } else { Model::Steve })
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Model::Steve => f.write_str("Steve"),
            Model::Alex => f.write_str("Alex"),
        }
    }
}

// Nibble parity. For a-f the ASCII code is odd exactly when the value (10-15) is even.
fn is_even(digit: u8) -> ProfileResult<bool> {
    match digit {
        b'0'..=b'9' => Ok(digit & 1 == 0),
        b'a'..=b'f' => Ok(digit & 1 == 1),
        other => Err(ProfileError::parse(
            "profile identifier",
            format!("invalid hex digit {:?}", char::from(other)),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_identifiers() {
        let cases = [
            ("00000000000000000000000000000000", Model::Steve),
            ("00000001000000000000000000000000", Model::Alex),
            ("00000000000000010000000000000000", Model::Alex),
            ("00000001000000010000000000000000", Model::Steve),
            ("0000000a000000000000000000000000", Model::Steve),
            ("0000000b000000000000000000000000", Model::Alex),
            ("069a79f444e94726a5befca90e38aaf5", Model::Steve),
            ("087cc153c3434ff7ac497de1569affa1", Model::Steve),
            ("cabefc91b5df4c87886a6c604da2e46f", Model::Alex),
            ("853c80ef3c3749fdaa49938b674adae6", Model::Alex),
        ];

        for (id, expected) in cases {
            assert_eq!(Model::default_for(id).unwrap(), expected, "{id}");
        }
    }

    #[test]
    fn deterministic() {
        let id = "cabefc91b5df4c87886a6c604da2e46f";
        let first = Model::default_for(id).unwrap();
        for _ in 0..10 {
            assert_eq!(Model::default_for(id).unwrap(), first);
        }
    }

    #[test]
    fn uninspected_digits_do_not_matter() {
        let a = Model::default_for("fffffff1fffffff0fffffff0fffffff0").unwrap();
        let b = Model::default_for("00000001000000000000000000000000").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, Model::Alex);
    }

    #[test]
    fn invalid_digit_is_parse_error() {
        let err = Model::default_for("0000000g000000000000000000000000").unwrap_err();
        assert!(matches!(err, ProfileError::Parse { .. }));

        let err = Model::default_for("0000000A000000000000000000000000").unwrap_err();
        assert!(matches!(err, ProfileError::Parse { .. }));
    }

    #[test]
    fn wrong_length_is_parse_error() {
        let err = Model::default_for("069a79f4-44e9-4726-a5be-fca90e38aaf5").unwrap_err();
        assert!(matches!(err, ProfileError::Parse { .. }));
        assert!(matches!(
            Model::default_for(""),
            Err(ProfileError::Parse { .. })
        ));
    }

    #[test]
    fn display() {
        assert_eq!(Model::Steve.to_string(), "Steve");
        assert_eq!(Model::Alex.to_string(), "Alex");
    }
}
