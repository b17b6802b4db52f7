// 📄 Spreadsheet I/O - CSV ⇄ RecordBatch
// PJe exports are usually `;`-separated; other sources use `,` or tabs.

use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::pipeline::RecordBatch;

/// Bytes inspected when guessing the delimiter
const SNIFF_LEN: usize = 1024;

/// Guess the delimiter from a sample of the file
///
/// `;` wins when it is at least as frequent as `,`; a tab wins only when
/// neither appears on the header line.
pub fn detect_delimiter(sample: &str) -> u8 {
    let head = &sample[..floor_char_boundary(sample, SNIFF_LEN)];
    let header = head.lines().next().unwrap_or("");

    let semicolons = head.matches(';').count();
    let commas = head.matches(',').count();

    if !header.contains(';') && !header.contains(',') && header.contains('\t') {
        return b'\t';
    }
    if semicolons > 0 && semicolons >= commas {
        b';'
    } else {
        b','
    }
}

fn floor_char_boundary(s: &str, max: usize) -> usize {
    if s.len() <= max {
        return s.len();
    }
    let mut idx = max;
    while !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

/// Parse CSV text with a known delimiter
///
/// Rows whose field count differs from the header are skipped, as is a
/// leading UTF-8 BOM.
pub fn parse_csv(content: &str, delimiter: u8) -> Result<RecordBatch> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .context("Failed to read CSV header")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect::<Vec<_>>();

    let mut batch = RecordBatch::new(headers);
    let mut skipped = 0usize;

    for (line_num, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to parse CSV line {}", line_num + 2))?;
        if record.len() != batch.columns.len() {
            skipped += 1;
            debug!(line = line_num + 2, fields = record.len(), "Skipping malformed row");
            continue;
        }
        batch.push_row(record.iter().map(|s| s.to_string()).collect());
    }

    if skipped > 0 {
        warn!(skipped, "Rows with the wrong number of fields were skipped");
    }
    Ok(batch)
}

/// Read CSV text, trying `;` first and sniffing otherwise
pub fn read_csv_str(content: &str) -> Result<RecordBatch> {
    let batch = parse_csv(content, b';')?;
    if batch.columns.len() > 1 {
        return Ok(batch);
    }

    let delimiter = detect_delimiter(content);
    if delimiter == b';' {
        return Ok(batch);
    }
    let shown = (delimiter as char).escape_default().to_string();
    debug!(delimiter = %shown, "Falling back to detected delimiter");
    parse_csv(content, delimiter)
}

/// Read a CSV file into a batch
pub fn read_csv(path: &Path) -> Result<RecordBatch> {
    let bytes = fs::read(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    let content = String::from_utf8_lossy(&bytes);
    read_csv_str(&content).with_context(|| format!("Failed to parse CSV: {}", path.display()))
}

/// Render a batch as CSV text
pub fn write_csv_string(batch: &RecordBatch, delimiter: u8) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_writer(Vec::new());

    writer.write_record(&batch.columns)?;
    for row in &batch.rows {
        writer.write_record(row)?;
    }

    let bytes = writer.into_inner().context("Failed to flush CSV writer")?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}

/// Write a batch to a CSV file
pub fn write_csv(path: &Path, batch: &RecordBatch, delimiter: u8) -> Result<()> {
    let content = write_csv_string(batch, delimiter)?;
    fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))?;
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_semicolon_csv() {
        let content = "numeroProcesso;nomeTarefa\n0000046-15.2017.8.05.0216;Minutar\n00000461520178050216;\"Analisar; urgente\"\n";
        let batch = read_csv_str(content).unwrap();
        assert_eq!(batch.columns, vec!["numeroProcesso", "nomeTarefa"]);
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.rows[1][1], "Analisar; urgente");
    }

    #[test]
    fn test_read_comma_csv_falls_back() {
        let content = "numeroProcesso,nomeTarefa\n0000046-15.2017.8.05.0216,Minutar\n";
        let batch = read_csv_str(content).unwrap();
        assert_eq!(batch.columns, vec!["numeroProcesso", "nomeTarefa"]);
        assert_eq!(batch.rows[0][0], "0000046-15.2017.8.05.0216");
    }

    #[test]
    fn test_read_tab_csv() {
        let content = "numeroProcesso\tnomeTarefa\n0000046-15.2017.8.05.0216\tMinutar\n";
        let batch = read_csv_str(content).unwrap();
        assert_eq!(batch.columns.len(), 2);
        assert_eq!(batch.rows[0][1], "Minutar");
    }

    #[test]
    fn test_single_column_csv() {
        let content = "numeroProcesso\n0000046-15.2017.8.05.0216\n";
        let batch = read_csv_str(content).unwrap();
        assert_eq!(batch.columns, vec!["numeroProcesso"]);
        assert_eq!(batch.len(), 1);
    }

    #[test]
    fn test_bad_rows_skipped_and_bom_stripped() {
        let content = "\u{feff}a;b\n1;2\n3;4;5\n6;7\n";
        let batch = read_csv_str(content).unwrap();
        assert_eq!(batch.columns, vec!["a", "b"]);
        assert_eq!(batch.rows, vec![vec!["1", "2"], vec!["6", "7"]]);
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter("a;b;c\n1;2;3"), b';');
        assert_eq!(detect_delimiter("a,b,c\n1,2,3"), b',');
        assert_eq!(detect_delimiter("a\tb\n1\t2"), b'\t');
        assert_eq!(detect_delimiter("only"), b',');
    }

    #[test]
    fn test_write_and_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let batch = RecordBatch::new(vec!["numeroProcesso".to_string(), "owner".to_string()])
            .with_row(&["0000046-15.2017.8.05.0216", "ABEL"])
            .with_row(&["", "digit not identified"]);
        write_csv(&path, &batch, b';').unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("numeroProcesso;owner\n"));
        assert_eq!(read_csv(&path).unwrap(), batch);
    }

    #[test]
    fn test_missing_file() {
        let err = read_csv(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(err.to_string().contains("Failed to open file"));
    }
}
