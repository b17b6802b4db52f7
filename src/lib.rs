// CNJ Triage - Core Library
// Parses judicial process numbers, routes them to servidores by check digit
// and classifies them against the Meta 2 cutoff year.

pub mod parser;
pub mod extractor;
pub mod formatter;
pub mod routing;
pub mod meta2;
pub mod config;
pub mod pipeline;
pub mod spreadsheet;    // CSV collaborator (I/O lives outside the core)
pub mod merge;          // Join two spreadsheets on process number

// Re-export commonly used types
pub use parser::{NumberFormat, ProcessNumber, UnknownFormat};
pub use extractor::{
    extract_check_digit, extract_year, read_check_digit, is_null_cell,
    CheckDigit, YEAR_MIN, YEAR_MAX,
};
pub use formatter::{format_number, format_all};
pub use routing::{
    assign_owner, DigitDistribution, DigitRange, OwnerAssignment,
    OwnerRoutingTable, RangeIssue, Severity,
};
pub use meta2::{classify, Meta2Class};
pub use config::{ClassifierConfig, ConfigError};
pub use pipeline::{
    classify_record, probe, process_batch,
    BatchSummary, PipelineError, RecordBatch, RecordClassification,
    DERIVED_COLUMNS, DEFAULT_DROP_COLUMNS,
};
pub use spreadsheet::{read_csv, read_csv_str, write_csv, write_csv_string, detect_delimiter};
pub use merge::{analyze_compatibility, merge_batches, normalize_for_comparison, Compatibility, JoinKind};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
