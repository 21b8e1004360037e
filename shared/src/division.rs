use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An identifier that fits neither wire form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed division identifier: {0:?}")]
pub struct MalformedDivision(pub String);

/// A ward + division pair, the smallest administrative voting unit.
///
/// Two equivalent wire forms exist: compact (`"0102"`) and hyphenated
/// (`"01-02"`). Both parse to the same value, so the round-trip laws
/// `compact(hyphenated(x)) == compact(x)` and
/// `hyphenated(compact(x)) == hyphenated(x)` hold by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DivisionId {
    ward: u8,
    division: u8,
}

impl DivisionId {
    pub fn new(ward: u8, division: u8) -> Result<Self, MalformedDivision> {
        if ward > 99 || division > 99 {
            return Err(MalformedDivision(format!("{ward}-{division}")));
        }
        Ok(Self { ward, division })
    }

    /// Parse either wire form.
    ///
    /// Hyphenated input must be two groups of 1–2 digits. Compact input
    /// must be 1–4 digits and is left zero-padded before splitting, so
    /// `"5"` parses as ward 0, division 5. Anything else is rejected.
    pub fn parse(input: &str) -> Result<Self, MalformedDivision> {
        if let Some((ward, division)) = input.split_once('-') {
            Ok(Self {
                ward: parse_half(ward, input)?,
                division: parse_half(division, input)?,
            })
        } else {
            if input.is_empty() || input.len() > 4 || !input.bytes().all(|b| b.is_ascii_digit()) {
                return Err(MalformedDivision(input.to_string()));
            }
            let packed: u16 = input
                .parse()
                .map_err(|_| MalformedDivision(input.to_string()))?;
            Ok(Self {
                ward: (packed / 100) as u8,
                division: (packed % 100) as u8,
            })
        }
    }

    pub const fn ward(&self) -> u8 {
        self.ward
    }

    pub const fn division(&self) -> u8 {
        self.division
    }

    /// Compact wire form, e.g. `"0102"`.
    pub fn compact(&self) -> String {
        format!("{:02}{:02}", self.ward, self.division)
    }

    /// Hyphenated wire form, e.g. `"01-02"`.
    pub fn hyphenated(&self) -> String {
        format!("{:02}-{:02}", self.ward, self.division)
    }
}

fn parse_half(half: &str, input: &str) -> Result<u8, MalformedDivision> {
    if half.is_empty() || half.len() > 2 || !half.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MalformedDivision(input.to_string()));
    }
    half.parse().map_err(|_| MalformedDivision(input.to_string()))
}

impl fmt::Display for DivisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.ward, self.division)
    }
}

impl TryFrom<String> for DivisionId {
    type Error = MalformedDivision;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DivisionId> for String {
    fn from(id: DivisionId) -> Self {
        id.hyphenated()
    }
}

/// Compact form of an identifier given in either wire form.
pub fn compact_form(input: &str) -> Result<String, MalformedDivision> {
    DivisionId::parse(input).map(|id| id.compact())
}

/// Hyphenated form of an identifier given in either wire form.
pub fn hyphenated_form(input: &str) -> Result<String, MalformedDivision> {
    DivisionId::parse(input).map(|id| id.hyphenated())
}

#[cfg(test)]
mod tests {
    use super::{DivisionId, compact_form, hyphenated_form};

    #[test]
    fn parses_both_wire_forms_to_the_same_value() {
        let compact = DivisionId::parse("0102").expect("compact form should parse");
        let hyphenated = DivisionId::parse("01-02").expect("hyphenated form should parse");
        assert_eq!(compact, hyphenated);
        assert_eq!(compact.ward(), 1);
        assert_eq!(compact.division(), 2);
    }

    #[test]
    fn formats_round_trip() {
        for raw in ["0102", "01-02", "6619", "66-19", "5", "00-05"] {
            let id = DivisionId::parse(raw).expect("sample should parse");
            assert_eq!(DivisionId::parse(&id.compact()).expect("compact reparse"), id);
            assert_eq!(
                DivisionId::parse(&id.hyphenated()).expect("hyphenated reparse"),
                id
            );
        }
    }

    #[test]
    fn codec_matches_documented_examples() {
        assert_eq!(compact_form("01-02").expect("should parse"), "0102");
        assert_eq!(hyphenated_form("0102").expect("should parse"), "01-02");
        assert_eq!(hyphenated_form("5").expect("should parse"), "00-05");
    }

    #[test]
    fn codec_is_idempotent() {
        let compact = compact_form("01-02").expect("should parse");
        assert_eq!(compact_form(&compact).expect("reparse"), compact);
        let hyphenated = hyphenated_form("0102").expect("should parse");
        assert_eq!(hyphenated_form(&hyphenated).expect("reparse"), hyphenated);
    }

    #[test]
    fn short_compact_input_is_zero_padded() {
        let id = DivisionId::parse("315").expect("three digits should parse");
        assert_eq!(id.compact(), "0315");
        assert_eq!(id.hyphenated(), "03-15");
    }

    #[test]
    fn rejects_malformed_input() {
        for raw in ["", "12345", "ab", "01-2x", "1-2-3", "-12", "12-", "01 02", "ab-cd"] {
            assert!(DivisionId::parse(raw).is_err(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn rejects_out_of_range_parts() {
        assert!(DivisionId::new(100, 1).is_err());
        assert!(DivisionId::new(1, 100).is_err());
        assert!(DivisionId::new(99, 99).is_ok());
    }

    #[test]
    fn serde_uses_the_hyphenated_form() {
        let id: DivisionId = serde_json::from_str("\"01-02\"").expect("json should parse");
        assert_eq!(id.compact(), "0102");
        assert_eq!(
            serde_json::to_string(&id).expect("json should serialize"),
            "\"01-02\""
        );

        let compact: DivisionId = serde_json::from_str("\"0102\"").expect("compact should parse");
        assert_eq!(compact, id);
    }

    #[test]
    fn serde_rejects_malformed_identifiers() {
        assert!(serde_json::from_str::<DivisionId>("\"1-2-3\"").is_err());
    }
}
