//! Italian personal tax code (codice fiscale) validation.
//!
//! # Responsibility
//! - Normalize user input and check the fixed 16-character layout.
//! - Verify the trailing check character against the weighted checksum.
//!
//! # Invariants
//! - Validation is pure and deterministic; no I/O, no logging.
//! - Structural checks run before the checksum, so the checksum only ever
//!   sees `[A-Z0-9]`.
//! - Weight tables are the published national values and must not be
//!   "normalized": odd positions use [`odd_position_weight`], even positions
//!   use the plain alphabet/digit offset.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Total length of a personal tax code.
pub const TAX_CODE_LEN: usize = 16;

static TAX_CODE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z]{6}[0-9]{2}[A-Z][0-9]{2}[A-Z][0-9]{3}[A-Z]$").expect("valid tax code regex")
});

/// Weights for characters at 1-based odd positions (0-based even indices).
const ODD_DIGIT_WEIGHTS: [u32; 10] = [1, 0, 5, 7, 9, 13, 15, 17, 19, 21];
const ODD_LETTER_WEIGHTS: [u32; 26] = [
    1, 0, 5, 7, 9, 13, 15, 17, 19, 21, 2, 4, 18, 20, 11, 3, 6, 8, 12, 14, 16, 10, 22, 25, 24, 23,
];

/// Reason a tax code was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaxCodeError {
    /// Normalized input is not exactly 16 characters long.
    Length { actual: usize },
    /// Letters and digits are not in the expected positions.
    Pattern,
    /// Layout is valid but the trailing character does not match.
    CheckCharacter { expected: char, found: char },
}

impl Display for TaxCodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Length { actual } => write!(
                f,
                "tax code must be {TAX_CODE_LEN} characters long, got {actual}"
            ),
            Self::Pattern => write!(f, "tax code layout is invalid"),
            Self::CheckCharacter { expected, found } => write!(
                f,
                "tax code check character mismatch: expected `{expected}`, found `{found}`"
            ),
        }
    }
}

impl Error for TaxCodeError {}

/// Normalized, checksum-verified tax code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaxCode(String);

impl TaxCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for TaxCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns whether `code` is a well-formed tax code with a correct check
/// character. Surrounding whitespace and letter case are ignored.
pub fn is_valid_tax_code(code: &str) -> bool {
    validate_tax_code(code).is_ok()
}

/// Validates `code` and returns its normalized form.
///
/// # Errors
/// - `Length` when the trimmed input is not 16 characters.
/// - `Pattern` when the letter/digit layout does not match.
/// - `CheckCharacter` when the checksum does not match the last character.
pub fn validate_tax_code(code: &str) -> Result<TaxCode, TaxCodeError> {
    let normalized = normalize(code);
    let actual = normalized.chars().count();
    if actual != TAX_CODE_LEN {
        return Err(TaxCodeError::Length { actual });
    }
    if !TAX_CODE_RE.is_match(&normalized) {
        return Err(TaxCodeError::Pattern);
    }

    let bytes = normalized.as_bytes();
    let expected = checksum_char(&bytes[..TAX_CODE_LEN - 1]);
    let found = char::from(bytes[TAX_CODE_LEN - 1]);
    if expected != found {
        return Err(TaxCodeError::CheckCharacter { expected, found });
    }

    Ok(TaxCode(normalized))
}

/// Computes the check character for the first 15 characters of a code.
///
/// Returns `None` when `prefix` (after normalization) is not 15 ASCII
/// alphanumerics. The positional letter/digit layout is not enforced here.
pub fn check_character(prefix: &str) -> Option<char> {
    let normalized = normalize(prefix);
    if normalized.len() != TAX_CODE_LEN - 1
        || !normalized.bytes().all(|b| b.is_ascii_alphanumeric())
    {
        return None;
    }
    Some(checksum_char(normalized.as_bytes()))
}

/// Weight of `c` when it sits at an odd 1-based position.
pub fn odd_position_weight(c: u8) -> u32 {
    match c {
        b'0'..=b'9' => ODD_DIGIT_WEIGHTS[usize::from(c - b'0')],
        b'A'..=b'Z' => ODD_LETTER_WEIGHTS[usize::from(c - b'A')],
        _ => 0,
    }
}

/// Weight of `c` when it sits at an even 1-based position.
pub fn even_position_weight(c: u8) -> u32 {
    match c {
        b'0'..=b'9' => u32::from(c - b'0'),
        b'A'..=b'Z' => u32::from(c - b'A'),
        _ => 0,
    }
}

fn normalize(code: &str) -> String {
    code.trim().to_uppercase()
}

fn checksum_char(prefix: &[u8]) -> char {
    let sum: u32 = prefix
        .iter()
        .enumerate()
        .map(|(index, &c)| {
            if index % 2 == 0 {
                odd_position_weight(c)
            } else {
                even_position_weight(c)
            }
        })
        .sum();
    // sum % 26 < 26, so the cast cannot truncate.
    char::from(b'A' + (sum % 26) as u8)
}
