// 🔎 Digit/Year Extractor - Best-effort field extraction
//
// Looser than the parser: spreadsheets mix the three encodings with free
// text, so each field is searched with a layered fallback.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::parser::UNFORMATTED_LEN;

/// Plausible filing years; anything else is treated as noise
pub const YEAR_MIN: u16 = 1990;
pub const YEAR_MAX: u16 = 2030;

// Shared prefix of the canonical and tribunal-merged encodings.
static DIGIT_YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+-([0-9]{2})\.([0-9]{4})\.").unwrap());
static HYPHEN_DIGIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-([0-9]{2})").unwrap());
static LOOSE_YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(19[0-9]{2}|20[0-9]{2})").unwrap());

// ============================================================================
// CHECK DIGIT
// ============================================================================

/// CheckDigit - Result of a check-digit extraction
///
/// Keeps "nothing found" apart from a literal `00`; [`CheckDigit::legacy_value`]
/// collapses both to `0` for callers that expect the integer sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckDigit {
    Found(u8),
    Absent,
}

impl CheckDigit {
    /// Integer form: the digit, or `0` when absent
    pub fn legacy_value(&self) -> u8 {
        match self {
            CheckDigit::Found(d) => *d,
            CheckDigit::Absent => 0,
        }
    }

    pub fn as_option(&self) -> Option<u8> {
        match self {
            CheckDigit::Found(d) => Some(*d),
            CheckDigit::Absent => None,
        }
    }

    /// True when the router can use it (absent and `0` are both "unknown")
    pub fn is_identified(&self) -> bool {
        self.legacy_value() != 0
    }
}

/// Null-like spreadsheet cells: empty, whitespace, or the literal "nan"
pub fn is_null_cell(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan")
}

/// Digits of `raw` if it holds exactly 20 of them once separators are dropped
fn unformatted_digits(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    (digits.len() == UNFORMATTED_LEN).then_some(digits)
}

/// Extract the check digit with explicit absence
///
/// Tries, in order:
/// 1. `digits-DD.YYYY.` (canonical and merged share this prefix)
/// 2. 20 digits, positions `[7:9)`
/// 3. the first `-DD` anywhere; a heuristic that can pick digits out of
///    unrelated text, so treat its result as best effort
pub fn read_check_digit(raw: &str) -> CheckDigit {
    if is_null_cell(raw) {
        return CheckDigit::Absent;
    }
    let trimmed = raw.trim();

    if let Some(caps) = DIGIT_YEAR_RE.captures(trimmed) {
        if let Ok(d) = caps[1].parse() {
            return CheckDigit::Found(d);
        }
    }

    if let Some(digits) = unformatted_digits(trimmed) {
        if let Ok(d) = digits[7..9].parse() {
            return CheckDigit::Found(d);
        }
    }

    if let Some(caps) = HYPHEN_DIGIT_RE.captures(trimmed) {
        if let Ok(d) = caps[1].parse() {
            return CheckDigit::Found(d);
        }
    }

    CheckDigit::Absent
}

/// Extract the check digit, `0` meaning "absent"
pub fn extract_check_digit(raw: &str) -> u8 {
    read_check_digit(raw).legacy_value()
}

// ============================================================================
// YEAR
// ============================================================================

fn in_year_range(year: u16) -> bool {
    (YEAR_MIN..=YEAR_MAX).contains(&year)
}

/// Extract the filing year, validated against [`YEAR_MIN`]..=[`YEAR_MAX`]
///
/// Tries `digits-DD.YYYY.`, then positions `[9:13)` of a 20-digit number,
/// then the first `19dd`/`20dd` run in the text. A candidate out of range
/// falls through to the next step.
pub fn extract_year(raw: &str) -> Option<u16> {
    if is_null_cell(raw) {
        return None;
    }
    let trimmed = raw.trim();

    if let Some(caps) = DIGIT_YEAR_RE.captures(trimmed) {
        if let Ok(year) = caps[2].parse::<u16>() {
            if in_year_range(year) {
                return Some(year);
            }
        }
    }

    if let Some(digits) = unformatted_digits(trimmed) {
        if let Ok(year) = digits[9..13].parse::<u16>() {
            if in_year_range(year) {
                return Some(year);
            }
        }
    }

    // Only the first candidate is considered
    let year = LOOSE_YEAR_RE.captures(trimmed)?[1].parse::<u16>().ok()?;
    in_year_range(year).then_some(year)
}

// ============================================================================
// TESTS
// ============================================================================
