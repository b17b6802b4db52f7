// 🔗 Spreadsheet Merge - Join two batches on a process-number column
//
// Keys are compared after light normalization so "0000046-15.2017 .8.05.0216"
// and "0000046-15.2017.8.05.0216" meet.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::info;

use crate::extractor::is_null_cell;
use crate::pipeline::{unique_column_name, PipelineError, RecordBatch};

static LOOKS_LIKE_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+[-.][0-9]+").unwrap());
static DOTS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.+").unwrap());
static HYPHENS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").unwrap());

/// Suffix for right-hand columns whose name is already taken
pub const RIGHT_SUFFIX: &str = "_y";

const COMMON_EXAMPLES: usize = 10;
const EXCLUSIVE_EXAMPLES: usize = 5;

// ============================================================================
// KEY NORMALIZATION
// ============================================================================

/// Normalize a cell for key comparison
///
/// Null-like cells ("", "nan", "None") become `""` and never match.
pub fn normalize_for_comparison(value: &str) -> String {
    if is_null_cell(value) || value.trim() == "None" {
        return String::new();
    }

    let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    if !LOOKS_LIKE_NUMBER_RE.is_match(&compact) {
        return compact;
    }

    let collapsed = DOTS_RE.replace_all(&compact, ".");
    HYPHENS_RE.replace_all(&collapsed, "-").into_owned()
}

fn resolve(batch: &RecordBatch, column: &str) -> Result<usize, PipelineError> {
    batch
        .column_index(column)
        .ok_or_else(|| PipelineError::ColumnNotFound {
            column: column.to_string(),
            available: batch.columns.clone(),
            similar: batch.similar_columns(),
        })
}

// ============================================================================
// COMPATIBILITY ANALYSIS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Compatibility {
    pub unique_left: usize,
    pub unique_right: usize,
    pub common: usize,
    pub only_left: usize,
    pub only_right: usize,
    /// `common / max(unique_left, unique_right)`, in percent
    pub score: f64,
    pub common_examples: Vec<String>,
    pub only_left_examples: Vec<String>,
    pub only_right_examples: Vec<String>,
    pub null_left: usize,
    pub null_right: usize,
}

fn key_set(batch: &RecordBatch, col: usize) -> (BTreeSet<String>, usize) {
    let mut keys = BTreeSet::new();
    let mut nulls = 0;
    for row in 0..batch.len() {
        let cell = batch.cell(row, col);
        if is_null_cell(cell) {
            nulls += 1;
        }
        let key = normalize_for_comparison(cell);
        if !key.is_empty() {
            keys.insert(key);
        }
    }
    (keys, nulls)
}

/// How well two key columns line up
pub fn analyze_compatibility(
    left: &RecordBatch,
    left_on: &str,
    right: &RecordBatch,
    right_on: &str,
) -> Result<Compatibility, PipelineError> {
    let (left_keys, null_left) = key_set(left, resolve(left, left_on)?);
    let (right_keys, null_right) = key_set(right, resolve(right, right_on)?);

    let common: Vec<&String> = left_keys.intersection(&right_keys).collect();
    let only_left: Vec<&String> = left_keys.difference(&right_keys).collect();
    let only_right: Vec<&String> = right_keys.difference(&left_keys).collect();

    let denominator = left_keys.len().max(right_keys.len());
    let score = if denominator > 0 {
        common.len() as f64 / denominator as f64 * 100.0
    } else {
        0.0
    };

    let examples = |keys: &[&String], n: usize| -> Vec<String> {
        keys.iter().take(n).map(|k| k.to_string()).collect()
    };

    Ok(Compatibility {
        unique_left: left_keys.len(),
        unique_right: right_keys.len(),
        common: common.len(),
        only_left: only_left.len(),
        only_right: only_right.len(),
        score,
        common_examples: examples(&common, COMMON_EXAMPLES),
        only_left_examples: examples(&only_left, EXCLUSIVE_EXAMPLES),
        only_right_examples: examples(&only_right, EXCLUSIVE_EXAMPLES),
        null_left,
        null_right,
    })
}

// ============================================================================
// JOIN
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinKind {
    /// Only keys present on both sides
    Inner,
    /// Every left row, matched or not
    Left,
    /// Every row from both sides
    Outer,
}

impl FromStr for JoinKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "inner" => Ok(JoinKind::Inner),
            "left" => Ok(JoinKind::Left),
            "outer" => Ok(JoinKind::Outer),
            other => Err(format!("unknown join kind: {} (expected inner, left or outer)", other)),
        }
    }
}

impl Compatibility {
    /// Join kind that keeps the most useful rows for this overlap
    pub fn suggested_join(&self) -> (JoinKind, &'static str) {
        if self.score > 80.0 {
            (JoinKind::Inner, "high overlap: inner join keeps matched rows only")
        } else if self.score > 50.0 {
            (JoinKind::Left, "medium overlap: left join keeps every row of the first sheet")
        } else {
            (JoinKind::Outer, "low overlap: outer join keeps every row of both sheets")
        }
    }
}

/// Join `right` onto `left` by normalized key
///
/// Output columns: all of `left`, then `right` minus its key column;
/// clashing right-hand names get [`RIGHT_SUFFIX`]. Left row order is kept;
/// an outer join appends unmatched right rows at the end.
pub fn merge_batches(
    left: &RecordBatch,
    right: &RecordBatch,
    left_on: &str,
    right_on: &str,
    kind: JoinKind,
) -> Result<RecordBatch, PipelineError> {
    let left_key = resolve(left, left_on)?;
    let right_key = resolve(right, right_on)?;

    let right_cols: Vec<usize> = (0..right.columns.len()).filter(|c| *c != right_key).collect();
    let mut columns = left.columns.clone();
    for &c in &right_cols {
        let name = &right.columns[c];
        let name = if columns.contains(name) {
            unique_column_name(&columns, &format!("{}{}", name, RIGHT_SUFFIX))
        } else {
            name.clone()
        };
        columns.push(name);
    }
    let mut merged = RecordBatch::new(columns);

    let mut index: HashMap<String, Vec<usize>> = HashMap::new();
    for row in 0..right.len() {
        let key = normalize_for_comparison(right.cell(row, right_key));
        if !key.is_empty() {
            index.entry(key).or_default().push(row);
        }
    }

    let left_width = left.columns.len();
    let left_cells = |row: usize| -> Vec<String> {
        (0..left_width).map(|c| left.cell(row, c).to_string()).collect()
    };
    let right_cells =
        |row: usize| -> Vec<String> { right_cols.iter().map(|&c| right.cell(row, c).to_string()).collect() };

    let mut matched_right = vec![false; right.len()];
    for row in 0..left.len() {
        let key = normalize_for_comparison(left.cell(row, left_key));
        match index.get(&key) {
            Some(rows) => {
                for &r in rows {
                    matched_right[r] = true;
                    let mut cells = left_cells(row);
                    cells.extend(right_cells(r));
                    merged.push_row(cells);
                }
            }
            None if kind != JoinKind::Inner => {
                let mut cells = left_cells(row);
                cells.extend(std::iter::repeat(String::new()).take(right_cols.len()));
                merged.push_row(cells);
            }
            None => {}
        }
    }

    if kind == JoinKind::Outer {
        for (r, matched) in matched_right.iter().enumerate() {
            if *matched {
                continue;
            }
            let mut cells = vec![String::new(); left_width];
            cells[left_key] = right.cell(r, right_key).to_string();
            cells.extend(right_cells(r));
            merged.push_row(cells);
        }
    }

    info!(
        left = left.len(),
        right = right.len(),
        rows = merged.len(),
        ?kind,
        "Merged spreadsheets"
    );
    Ok(merged)
}

// ============================================================================
// TESTS
// ============================================================================
