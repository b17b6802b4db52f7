// 🖨️ Formatter - Re-render a process number in a chosen encoding

use crate::parser::{NumberFormat, ProcessNumber};

/// Re-render `raw` in `target`, or return it unchanged if it does not parse
///
/// # Examples:
/// ```
/// use cnj_triage::{format_number, NumberFormat};
/// assert_eq!(
///     format_number("00000461520178050216", NumberFormat::Canonical),
///     "0000046-15.2017.8.05.0216"
/// );
/// assert_eq!(format_number("n/a", NumberFormat::Canonical), "n/a");
/// ```
pub fn format_number(raw: &str, target: NumberFormat) -> String {
    match ProcessNumber::parse(raw) {
        Some(number) => number.render(target),
        None => raw.to_string(),
    }
}

/// Render the same number in every encoding, in [`NumberFormat::ALL`] order
pub fn format_all(raw: &str) -> Option<Vec<(NumberFormat, String)>> {
    let number = ProcessNumber::parse(raw)?;
    Some(
        NumberFormat::ALL
            .iter()
            .map(|format| (*format, number.render(*format)))
            .collect(),
    )
}
