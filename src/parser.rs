// 🔢 Process Number Parser
// Recognizes the three textual encodings of a CNJ process number

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

// ============================================================================
// CORE TYPES
// ============================================================================

/// NumberFormat - Which textual encoding a process number is written in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberFormat {
    /// `NNNNNNN-DD.AAAA.J.TR.OOOO` (e.g. `0000046-15.2017.8.05.0216`)
    #[default]
    Canonical,
    /// `NNNNNNN-DD.AAAA.JTR.OOOO` (e.g. `0000046-15.2017.805.0216`)
    TribunalMerged,
    /// 20 bare digits (e.g. `00000461520178050216`)
    Unformatted,
}

impl NumberFormat {
    /// All encodings, in parser priority order
    pub const ALL: [NumberFormat; 3] = [
        NumberFormat::Canonical,
        NumberFormat::TribunalMerged,
        NumberFormat::Unformatted,
    ];

    /// Human-readable name for display
    pub fn name(&self) -> &str {
        match self {
            NumberFormat::Canonical => "Canonical (CNJ)",
            NumberFormat::TribunalMerged => "Tribunal merged",
            NumberFormat::Unformatted => "Unformatted (20 digits)",
        }
    }

    /// Stable key, shared with the saved configuration of older sessions
    pub fn key(&self) -> &str {
        match self {
            NumberFormat::Canonical => "padrao_cnj",
            NumberFormat::TribunalMerged => "tribunal_805",
            NumberFormat::Unformatted => "sem_formatacao",
        }
    }

    /// Sample number rendered in this encoding
    pub fn example(&self) -> &str {
        match self {
            NumberFormat::Canonical => "0000046-15.2017.8.05.0216",
            NumberFormat::TribunalMerged => "0000046-15.2017.805.0216",
            NumberFormat::Unformatted => "00000461520178050216",
        }
    }
}

impl fmt::Display for NumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown number format: {0} (expected canonical, merged or digits)")]
pub struct UnknownFormat(pub String);

impl FromStr for NumberFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "canonical" | "cnj" | "padrao_cnj" => Ok(NumberFormat::Canonical),
            "merged" | "tribunal" | "tribunal_805" => Ok(NumberFormat::TribunalMerged),
            "digits" | "unformatted" | "sem_formatacao" => Ok(NumberFormat::Unformatted),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

/// ProcessNumber - The six structural fields of a judicial case number
///
/// Pure value: produced by [`ProcessNumber::parse`], never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProcessNumber {
    pub sequential: u32, // 7 digits
    pub check_digit: u8, // 2 digits
    pub year: u16,       // 4 digits
    pub segment: u8,     // 1 digit, judiciary branch
    pub court: u8,       // 2 digits
    pub origin: u16,     // 4 digits
}

// ============================================================================
// PATTERNS
// ============================================================================

// `[0-9]` rather than `\d`: the latter also matches non-ASCII digits.
static CANONICAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{7})-([0-9]{2})\.([0-9]{4})\.([0-9])\.([0-9]{2})\.([0-9]{4})$").unwrap()
});
static MERGED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{7})-([0-9]{2})\.([0-9]{4})\.([0-9]{3})\.([0-9]{4})$").unwrap()
});

/// Length of the unformatted encoding
pub const UNFORMATTED_LEN: usize = 20;

// ============================================================================
// PARSING
// ============================================================================

impl ProcessNumber {
    /// Decompose a raw string into its structural fields
    ///
    /// Encodings are tried in [`NumberFormat::ALL`] order; the first full
    /// match wins. Returns `None` for anything else, never panics.
    ///
    /// # Examples:
    /// ```
    /// use cnj_triage::ProcessNumber;
    /// let n = ProcessNumber::parse("0000046-15.2017.805.0216").unwrap();
    /// assert_eq!((n.check_digit, n.segment, n.court), (15, 8, 5));
    /// ```
    pub fn parse(raw: &str) -> Option<ProcessNumber> {
        Self::parse_with_format(raw).map(|(number, _)| number)
    }

    /// Like [`ProcessNumber::parse`], also reporting which encoding matched
    pub fn parse_with_format(raw: &str) -> Option<(ProcessNumber, NumberFormat)> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        if let Some(caps) = CANONICAL_RE.captures(trimmed) {
            let number = ProcessNumber {
                sequential: caps[1].parse().ok()?,
                check_digit: caps[2].parse().ok()?,
                year: caps[3].parse().ok()?,
                segment: caps[4].parse().ok()?,
                court: caps[5].parse().ok()?,
                origin: caps[6].parse().ok()?,
            };
            return Some((number, NumberFormat::Canonical));
        }

        if let Some(caps) = MERGED_RE.captures(trimmed) {
            // "805" → segment 8, court 05
            let tribunal = &caps[4];
            let number = ProcessNumber {
                sequential: caps[1].parse().ok()?,
                check_digit: caps[2].parse().ok()?,
                year: caps[3].parse().ok()?,
                segment: tribunal[..1].parse().ok()?,
                court: tribunal[1..].parse().ok()?,
                origin: caps[5].parse().ok()?,
            };
            return Some((number, NumberFormat::TribunalMerged));
        }

        // Only this encoding strips separators before matching.
        let digits: String = trimmed.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.len() == UNFORMATTED_LEN {
            return Self::from_digits(&digits).map(|number| (number, NumberFormat::Unformatted));
        }

        None
    }

    /// Slice exactly 20 ASCII digits positionally
    fn from_digits(digits: &str) -> Option<ProcessNumber> {
        if digits.len() != UNFORMATTED_LEN || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        Some(ProcessNumber {
            sequential: digits[0..7].parse().ok()?,
            check_digit: digits[7..9].parse().ok()?,
            year: digits[9..13].parse().ok()?,
            segment: digits[13..14].parse().ok()?,
            court: digits[14..16].parse().ok()?,
            origin: digits[16..20].parse().ok()?,
        })
    }

    /// Render into the requested encoding, zero-padding every field
    pub fn render(&self, format: NumberFormat) -> String {
        match format {
            NumberFormat::Canonical => format!(
                "{:07}-{:02}.{:04}.{}.{:02}.{:04}",
                self.sequential, self.check_digit, self.year, self.segment, self.court, self.origin
            ),
            NumberFormat::TribunalMerged => format!(
                "{:07}-{:02}.{:04}.{}{:02}.{:04}",
                self.sequential, self.check_digit, self.year, self.segment, self.court, self.origin
            ),
            NumberFormat::Unformatted => format!(
                "{:07}{:02}{:04}{}{:02}{:04}",
                self.sequential, self.check_digit, self.year, self.segment, self.court, self.origin
            ),
        }
    }
}

impl fmt::Display for ProcessNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(NumberFormat::Canonical))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn expected() -> ProcessNumber {
        ProcessNumber {
            sequential: 46,
            check_digit: 15,
            year: 2017,
            segment: 8,
            court: 5,
            origin: 216,
        }
    }

    #[test]
    fn test_parse_canonical() {
        let (number, format) = ProcessNumber::parse_with_format("0000046-15.2017.8.05.0216").unwrap();
        assert_eq!(number, expected());
        assert_eq!(format, NumberFormat::Canonical);
    }

    #[test]
    fn test_parse_tribunal_merged() {
        let (number, format) = ProcessNumber::parse_with_format("0000046-15.2017.805.0216").unwrap();
        assert_eq!(number, expected());
        assert_eq!(format, NumberFormat::TribunalMerged);
    }

    #[test]
    fn test_parse_unformatted() {
        let (number, format) = ProcessNumber::parse_with_format("00000461520178050216").unwrap();
        assert_eq!(number, expected());
        assert_eq!(format, NumberFormat::Unformatted);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(ProcessNumber::parse("  0000046-15.2017.8.05.0216\t"), Some(expected()));
    }

    #[test]
    fn test_unformatted_strips_separators() {
        // Not a dotted form, but 20 digits once separators go away
        assert_eq!(ProcessNumber::parse("0000046 15 2017 8 05 0216"), Some(expected()));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(ProcessNumber::parse(""), None);
        assert_eq!(ProcessNumber::parse("   "), None);
        assert_eq!(ProcessNumber::parse("nan"), None);
        assert_eq!(ProcessNumber::parse("processo sem numero"), None);
        // 19 and 21 digits
        assert_eq!(ProcessNumber::parse("0000046152017805021"), None);
        assert_eq!(ProcessNumber::parse("000004615201780502160"), None);
    }

    #[test]
    fn test_dotted_forms_are_anchored() {
        // Trailing junk breaks the dotted patterns; digit count (21) breaks the fallback
        assert_eq!(ProcessNumber::parse("0000046-15.2017.8.05.02169"), None);
        // Non-ASCII digits never count
        assert_eq!(ProcessNumber::parse("٠٠٠٠٠٤٦-15.2017.8.05.0216"), None);
    }

    #[test]
    fn test_render_all_formats() {
        let n = expected();
        assert_eq!(n.render(NumberFormat::Canonical), "0000046-15.2017.8.05.0216");
        assert_eq!(n.render(NumberFormat::TribunalMerged), "0000046-15.2017.805.0216");
        assert_eq!(n.render(NumberFormat::Unformatted), "00000461520178050216");
        assert_eq!(n.to_string(), "0000046-15.2017.8.05.0216");
    }

    #[test]
    fn test_format_keys_and_parsing() {
        assert_eq!("canonical".parse::<NumberFormat>().unwrap(), NumberFormat::Canonical);
        assert_eq!("tribunal_805".parse::<NumberFormat>().unwrap(), NumberFormat::TribunalMerged);
        assert_eq!("DIGITS".parse::<NumberFormat>().unwrap(), NumberFormat::Unformatted);
        assert!("xml".parse::<NumberFormat>().is_err());
        assert_eq!(NumberFormat::default(), NumberFormat::Canonical);

        for format in NumberFormat::ALL {
            assert_eq!(format.key().parse::<NumberFormat>().unwrap(), format);
            let parsed = ProcessNumber::parse_with_format(format.example()).unwrap();
            assert_eq!(parsed.1, format);
        }
    }
}
