// 🔄 Record Pipeline - Extractor → Router/Classifier over a batch of rows
//
// Row-independent: a bad row gets sentinels, it never stops the batch.
// The only refusal is a missing process-number column.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::ClassifierConfig;
use crate::extractor::{extract_year, read_check_digit, CheckDigit};
use crate::formatter::format_number;
use crate::meta2::{classify, Meta2Class};
use crate::parser::NumberFormat;
use crate::routing::{assign_owner, OwnerAssignment, OwnerRoutingTable};

// ============================================================================
// DERIVED COLUMNS
// ============================================================================

pub const CHECK_DIGIT_COLUMN: &str = "checkDigit";
pub const YEAR_COLUMN: &str = "year";
pub const OWNER_COLUMN: &str = "owner";
pub const META2_COLUMN: &str = "meta2Classification";
pub const FORMATTED_COLUMN: &str = "formattedNumber";

/// Columns appended by [`process_batch`], in order
pub const DERIVED_COLUMNS: [&str; 5] = [
    CHECK_DIGIT_COLUMN,
    YEAR_COLUMN,
    OWNER_COLUMN,
    META2_COLUMN,
    FORMATTED_COLUMN,
];

/// Bookkeeping columns of the PJe export that nobody reads
pub const DEFAULT_DROP_COLUMNS: [&str; 16] = [
    "cargoJudicial",
    "ultimoMovimento",
    "podeMovimentarEmLote",
    "podeMinutarEmLote",
    "podeIntimarEmLote",
    "podeDesignarAudienciaEmLote",
    "podeDesignarPericiaEmLote",
    "podeRenajudEmLote",
    "sigiloso",
    "prioridade",
    "dataChegada",
    "conferido",
    "idTaskInstance",
    "idTaskInstanceProximo",
    "idProcesso",
    "classeJudicial",
];

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("Column not found: '{column}' (available: {available:?}, similar: {similar:?})")]
    ColumnNotFound {
        column: String,
        available: Vec<String>,
        similar: Vec<String>,
    },
}

// ============================================================================
// RECORD BATCH
// ============================================================================

/// RecordBatch - Materialized spreadsheet: header + text rows
///
/// Empty cells (and cells missing from short rows) are null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecordBatch {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// `name`, or `name_2`, `name_3`, ... if already taken
pub(crate) fn unique_column_name(columns: &[String], name: &str) -> String {
    let mut unique = name.to_string();
    let mut n = 2;
    while columns.contains(&unique) {
        unique = format!("{}_{}", name, n);
        n += 1;
    }
    unique
}

impl RecordBatch {
    pub fn new(columns: Vec<String>) -> Self {
        RecordBatch {
            columns,
            rows: Vec::new(),
        }
    }

    /// Builder pattern: add a row
    pub fn with_row<S: AsRef<str>>(mut self, cells: &[S]) -> Self {
        self.push_row(cells.iter().map(|c| c.as_ref().to_string()).collect());
        self
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell text, `""` when the row is short
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn column_values(&self, name: &str) -> Option<Vec<&str>> {
        let col = self.column_index(name)?;
        Some((0..self.rows.len()).map(|row| self.cell(row, col)).collect())
    }

    /// Columns that probably hold process numbers
    pub fn similar_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| {
                let lower = c.to_lowercase();
                lower.contains("processo") || lower.contains("numero")
            })
            .cloned()
            .collect()
    }

    /// Append a column; never touches existing cells
    ///
    /// A name already in use gets a numeric suffix (`owner_2`). Returns the
    /// name actually used.
    pub fn append_column(&mut self, name: &str, values: Vec<String>) -> String {
        let unique = unique_column_name(&self.columns, name);

        // Short rows are padded; cells past the header stay after the new one
        let width = self.columns.len();
        let mut values = values.into_iter();
        for row in &mut self.rows {
            if row.len() < width {
                row.resize(width, String::new());
            }
            row.insert(width, values.next().unwrap_or_default());
        }
        self.columns.push(unique.clone());
        unique
    }

    /// Remove the named columns, except `protected`
    ///
    /// Unknown names are ignored. Returns how many columns went away.
    pub fn drop_columns<S: AsRef<str>>(&mut self, names: &[S], protected: &str) -> usize {
        let doomed: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.as_str() != protected && names.iter().any(|n| n.as_ref() == c.as_str()))
            .map(|(i, _)| i)
            .collect();

        for idx in doomed.iter().rev() {
            self.columns.remove(*idx);
            for row in &mut self.rows {
                if *idx < row.len() {
                    row.remove(*idx);
                }
            }
        }

        doomed.len()
    }
}

// ============================================================================
// PER-RECORD CLASSIFICATION
// ============================================================================

/// Derived fields of one record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordClassification {
    pub raw: String,
    pub check_digit: CheckDigit,
    pub year: Option<u16>,
    pub owner: OwnerAssignment,
    pub meta2: Meta2Class,
    pub formatted: String,
}

impl RecordClassification {
    /// Cell values for [`DERIVED_COLUMNS`]
    pub fn derived_cells(&self) -> [String; 5] {
        [
            self.check_digit.legacy_value().to_string(),
            self.year.map(|y| y.to_string()).unwrap_or_default(),
            self.owner.label(),
            self.meta2.label().to_string(),
            self.formatted.clone(),
        ]
    }
}

/// Classify a single raw value ("test a number")
pub fn probe(
    raw: &str,
    table: &OwnerRoutingTable,
    cutoff_year: u16,
    format: NumberFormat,
) -> RecordClassification {
    let check_digit = read_check_digit(raw);
    let year = extract_year(raw);

    RecordClassification {
        raw: raw.to_string(),
        check_digit,
        year,
        owner: assign_owner(check_digit.as_option(), table),
        meta2: classify(year, cutoff_year),
        formatted: format_number(raw, format),
    }
}

pub fn classify_record(raw: &str, config: &ClassifierConfig, format: NumberFormat) -> RecordClassification {
    probe(raw, &config.routing_table, config.meta_cutoff_year, format)
}

/// Classify every row and append the derived columns
///
/// Rows keep their order; original columns are never rewritten.
pub fn process_batch(
    batch: &mut RecordBatch,
    config: &ClassifierConfig,
    format: NumberFormat,
) -> Result<Vec<RecordClassification>, PipelineError> {
    let column = &config.process_number_column;
    let col = match batch.column_index(column) {
        Some(col) => col,
        None => {
            let similar = batch.similar_columns();
            warn!(column = %column, ?similar, "Process number column missing");
            return Err(PipelineError::ColumnNotFound {
                column: column.clone(),
                available: batch.columns.clone(),
                similar,
            });
        }
    };

    let results: Vec<RecordClassification> = (0..batch.len())
        .map(|row| classify_record(batch.cell(row, col), config, format))
        .collect();

    let mut derived: [Vec<String>; 5] = Default::default();
    for result in &results {
        for (values, cell) in derived.iter_mut().zip(result.derived_cells()) {
            values.push(cell);
        }
    }
    for (name, values) in DERIVED_COLUMNS.iter().zip(derived) {
        let used = batch.append_column(name, values);
        if used != *name {
            debug!(column = %name, renamed = %used, "Derived column name already taken");
        }
    }

    info!(
        rows = results.len(),
        column = %column,
        format = format.key(),
        "Batch classified"
    );
    Ok(results)
}

// ============================================================================
// BATCH SUMMARY
// ============================================================================

/// How many unidentified examples to keep
const EXAMPLE_LIMIT: usize = 3;

#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub total_records: usize,
    pub meta2_count: usize,
    pub years_identified: usize,
    pub digits_identified: usize,
    pub unassigned_count: usize,
    /// Sorted by count, descending
    pub by_owner: Vec<(String, usize)>,
    pub meta2_by_owner: Vec<(String, usize)>,
    pub by_classification: Vec<(Meta2Class, usize)>,
    pub by_year: BTreeMap<u16, usize>,
    pub oldest_year: Option<u16>,
    pub newest_year: Option<u16>,
    pub unidentified_digit_examples: Vec<String>,
    pub processed_at: DateTime<Utc>,
}

fn ranked(counts: BTreeMap<String, usize>) -> Vec<(String, usize)> {
    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    // Stable: ties stay alphabetical
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

impl BatchSummary {
    pub fn from_classifications(results: &[RecordClassification]) -> Self {
        let mut by_owner: BTreeMap<String, usize> = BTreeMap::new();
        let mut meta2_by_owner: BTreeMap<String, usize> = BTreeMap::new();
        let mut by_year: BTreeMap<u16, usize> = BTreeMap::new();

        for r in results {
            *by_owner.entry(r.owner.label()).or_default() += 1;
            if r.meta2.is_meta2() {
                *meta2_by_owner.entry(r.owner.label()).or_default() += 1;
            }
            if let Some(year) = r.year {
                *by_year.entry(year).or_default() += 1;
            }
        }

        let by_classification = Meta2Class::ALL
            .iter()
            .map(|class| (*class, results.iter().filter(|r| r.meta2 == *class).count()))
            .filter(|(_, count)| *count > 0)
            .collect();

        BatchSummary {
            total_records: results.len(),
            meta2_count: results.iter().filter(|r| r.meta2.is_meta2()).count(),
            years_identified: results.iter().filter(|r| r.year.is_some()).count(),
            digits_identified: results.iter().filter(|r| r.check_digit.is_identified()).count(),
            unassigned_count: results.iter().filter(|r| !r.owner.is_assigned()).count(),
            by_owner: ranked(by_owner),
            meta2_by_owner: ranked(meta2_by_owner),
            by_classification,
            oldest_year: by_year.keys().next().copied(),
            newest_year: by_year.keys().next_back().copied(),
            by_year,
            unidentified_digit_examples: results
                .iter()
                .filter(|r| !r.check_digit.is_identified())
                .take(EXAMPLE_LIMIT)
                .map(|r| r.raw.clone())
                .collect(),
            processed_at: Utc::now(),
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{} records: {} Meta 2 | {} years identified, {} digits identified, {} without owner",
            self.total_records,
            self.meta2_count,
            self.years_identified,
            self.digits_identified,
            self.unassigned_count
        )
    }

    /// Human-readable list of what went wrong, empty when nothing did
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        let missing_years = self.total_records - self.years_identified;
        if missing_years > 0 {
            problems.push(format!("{} records without an identified year", missing_years));
        }
        let missing_digits = self.total_records - self.digits_identified;
        if missing_digits > 0 {
            problems.push(format!("{} records without an identified digit", missing_digits));
        }
        if self.unassigned_count > 0 {
            problems.push(format!("{} records without an owner", self.unassigned_count));
        }

        problems
    }
}

// ============================================================================
// TESTS
// ============================================================================
