// 🧭 Owner Routing - Check digit → servidor
// Ranges as data: first matching range in insertion order wins

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::config::ConfigError;

/// Highest check digit
pub const DIGIT_MAX: u8 = 99;

// ============================================================================
// DIGIT RANGE
// ============================================================================

/// DigitRange - Inclusive `[min, max]` over check digits
///
/// Stored as the raw list read from configuration so a malformed entry
/// (fewer than two bounds) survives a load/save cycle. Such entries never
/// match anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DigitRange(Vec<i64>);

impl DigitRange {
    pub fn new(min: i64, max: i64) -> Self {
        DigitRange(vec![min, max])
    }

    /// Wrap bounds as found in a config file, well-formed or not
    pub fn from_raw(bounds: Vec<i64>) -> Self {
        DigitRange(bounds)
    }

    /// `(min, max)`, or `None` for a malformed entry
    pub fn bounds(&self) -> Option<(i64, i64)> {
        match self.0.as_slice() {
            [min, max, ..] => Some((*min, *max)),
            _ => None,
        }
    }

    pub fn contains(&self, digit: i64) -> bool {
        self.bounds()
            .is_some_and(|(min, max)| min <= digit && digit <= max)
    }

    pub fn raw(&self) -> &[i64] {
        &self.0
    }
}

impl fmt::Display for DigitRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bounds() {
            Some((min, max)) => write!(f, "[{}, {}]", min, max),
            None => write!(f, "{:?}", self.0),
        }
    }
}

// ============================================================================
// ROUTING TABLE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
struct OwnerEntry {
    name: String,
    ranges: Vec<DigitRange>,
}

/// OwnerRoutingTable - Owner name → ordered digit ranges
///
/// Owner order is insertion order and is what breaks ties between
/// overlapping ranges. Serializes as a JSON object in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnerRoutingTable {
    owners: Vec<OwnerEntry>,
}

impl OwnerRoutingTable {
    /// Create an empty table
    pub fn new() -> Self {
        OwnerRoutingTable { owners: Vec::new() }
    }

    /// Builder pattern: append an owner with well-formed ranges
    ///
    /// An existing owner of the same name has its ranges replaced in place.
    pub fn with_owner(mut self, name: &str, ranges: &[(i64, i64)]) -> Self {
        let ranges = ranges
            .iter()
            .map(|(min, max)| DigitRange::new(*min, *max))
            .collect();
        self.upsert(name.to_string(), ranges);
        self
    }

    fn upsert(&mut self, name: String, ranges: Vec<DigitRange>) {
        match self.owners.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.ranges = ranges,
            None => self.owners.push(OwnerEntry { name, ranges }),
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.owners.iter().position(|e| e.name == name)
    }

    fn entry_mut(&mut self, name: &str) -> Result<&mut OwnerEntry, ConfigError> {
        self.owners
            .iter_mut()
            .find(|e| e.name == name)
            .ok_or_else(|| ConfigError::OwnerNotFound(name.to_string()))
    }

    /// Owners with their ranges, in routing order
    pub fn owners(&self) -> impl Iterator<Item = (&str, &[DigitRange])> {
        self.owners.iter().map(|e| (e.name.as_str(), e.ranges.as_slice()))
    }

    pub fn owner_names(&self) -> Vec<&str> {
        self.owners.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn ranges(&self, name: &str) -> Option<&[DigitRange]> {
        self.owners
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.ranges.as_slice())
    }

    pub fn contains_owner(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// First owner whose range contains `digit`
    ///
    /// Raw lookup: unlike [`assign_owner`], digit `0` is looked up too.
    pub fn route(&self, digit: u8) -> Option<&str> {
        let digit = i64::from(digit);
        self.owners
            .iter()
            .find(|e| e.ranges.iter().any(|r| r.contains(digit)))
            .map(|e| e.name.as_str())
    }

    // ------------------------------------------------------------------------
    // Mutation (single session owns the table; persistence is a separate save)
    // ------------------------------------------------------------------------

    /// Add an owner at the end of the routing order with a `[0, 0]` placeholder range
    pub fn add_owner(&mut self, name: &str) -> Result<(), ConfigError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ConfigError::EmptyOwnerName);
        }
        if self.contains_owner(name) {
            return Err(ConfigError::OwnerExists(name.to_string()));
        }
        self.owners.push(OwnerEntry {
            name: name.to_string(),
            ranges: vec![DigitRange::new(0, 0)],
        });
        Ok(())
    }

    /// Remove an owner, returning its ranges
    pub fn remove_owner(&mut self, name: &str) -> Result<Vec<DigitRange>, ConfigError> {
        let idx = self
            .position(name)
            .ok_or_else(|| ConfigError::OwnerNotFound(name.to_string()))?;
        Ok(self.owners.remove(idx).ranges)
    }

    /// Rename an owner without moving it in the routing order
    pub fn rename_owner(&mut self, old: &str, new: &str) -> Result<(), ConfigError> {
        let new = new.trim();
        if new.is_empty() {
            return Err(ConfigError::EmptyOwnerName);
        }
        let idx = self
            .position(old)
            .ok_or_else(|| ConfigError::OwnerNotFound(old.to_string()))?;
        if new == old {
            return Ok(());
        }
        if self.contains_owner(new) {
            return Err(ConfigError::OwnerExists(new.to_string()));
        }
        self.owners[idx].name = new.to_string();
        Ok(())
    }

    /// Append a range to an owner, returning its index
    pub fn add_range(&mut self, owner: &str, min: i64, max: i64) -> Result<usize, ConfigError> {
        let entry = self.entry_mut(owner)?;
        entry.ranges.push(DigitRange::new(min, max));
        Ok(entry.ranges.len() - 1)
    }

    pub fn update_range(
        &mut self,
        owner: &str,
        index: usize,
        min: i64,
        max: i64,
    ) -> Result<(), ConfigError> {
        let entry = self.entry_mut(owner)?;
        let len = entry.ranges.len();
        let range = entry
            .ranges
            .get_mut(index)
            .ok_or_else(|| ConfigError::RangeIndexOutOfBounds {
                owner: owner.to_string(),
                index,
                len,
            })?;
        *range = DigitRange::new(min, max);
        Ok(())
    }

    pub fn remove_range(&mut self, owner: &str, index: usize) -> Result<DigitRange, ConfigError> {
        let entry = self.entry_mut(owner)?;
        if index >= entry.ranges.len() {
            return Err(ConfigError::RangeIndexOutOfBounds {
                owner: owner.to_string(),
                index,
                len: entry.ranges.len(),
            });
        }
        Ok(entry.ranges.remove(index))
    }

    // ------------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------------

    /// Route every digit 0..=99 and group them by resulting label
    ///
    /// Groups appear in order of their lowest digit; consecutive digits are
    /// collapsed into `(start, end)` intervals.
    pub fn distribution(&self) -> Vec<DigitDistribution> {
        let mut groups: Vec<DigitDistribution> = Vec::new();

        for digit in 0..=DIGIT_MAX {
            let label = assign_owner(Some(digit), self).label();
            let idx = match groups.iter().position(|g| g.label == label) {
                Some(idx) => idx,
                None => {
                    groups.push(DigitDistribution {
                        label,
                        intervals: Vec::new(),
                    });
                    groups.len() - 1
                }
            };

            let intervals = &mut groups[idx].intervals;
            match intervals.last_mut() {
                Some((_, end)) if *end + 1 == digit => *end = digit,
                _ => intervals.push((digit, digit)),
            }
        }

        groups
    }

    /// Advisory checks; routing never depends on these
    pub fn validate(&self) -> Vec<RangeIssue> {
        let mut issues = Vec::new();

        for entry in &self.owners {
            for (index, range) in entry.ranges.iter().enumerate() {
                match range.bounds() {
                    None => issues.push(RangeIssue::Malformed {
                        owner: entry.name.clone(),
                        index,
                    }),
                    Some((min, max)) if min > max => issues.push(RangeIssue::Inverted {
                        owner: entry.name.clone(),
                        index,
                        min,
                        max,
                    }),
                    Some((min, max)) if min < 0 || max > i64::from(DIGIT_MAX) => {
                        issues.push(RangeIssue::OutOfDomain {
                            owner: entry.name.clone(),
                            index,
                            min,
                            max,
                        })
                    }
                    Some(_) => {}
                }
            }
        }

        // Digit 0 is the "unknown" marker and is never routed
        let mut run: Option<(u8, u8, Vec<String>)> = None;
        let mut claims: Vec<(u8, Vec<String>)> = Vec::new();
        for digit in 1..=DIGIT_MAX {
            let owners: Vec<String> = self
                .owners
                .iter()
                .filter(|e| e.ranges.iter().any(|r| r.contains(i64::from(digit))))
                .map(|e| e.name.clone())
                .collect();
            claims.push((digit, owners));
        }

        // Gaps and overlaps, each collapsed over consecutive digits
        let mut gap: Option<(u8, u8)> = None;
        for (digit, owners) in claims {
            if owners.is_empty() {
                gap = match gap {
                    Some((start, end)) if end + 1 == digit => Some((start, digit)),
                    Some((start, end)) => {
                        issues.push(RangeIssue::Gap { from: start, to: end });
                        Some((digit, digit))
                    }
                    None => Some((digit, digit)),
                };
            }

            if owners.len() > 1 {
                run = match run {
                    Some((start, end, prev)) if end + 1 == digit && prev == owners => {
                        Some((start, digit, prev))
                    }
                    Some((start, end, prev)) => {
                        issues.push(RangeIssue::Overlap {
                            from: start,
                            to: end,
                            owners: prev,
                        });
                        Some((digit, digit, owners))
                    }
                    None => Some((digit, digit, owners)),
                };
            }
        }
        if let Some((from, to)) = gap {
            issues.push(RangeIssue::Gap { from, to });
        }
        if let Some((from, to, owners)) = run {
            issues.push(RangeIssue::Overlap { from, to, owners });
        }

        issues
    }
}

impl Serialize for OwnerRoutingTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.owners.len()))?;
        for entry in &self.owners {
            map.serialize_entry(&entry.name, &entry.ranges)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for OwnerRoutingTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = OwnerRoutingTable;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of owner name to digit ranges")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut table = OwnerRoutingTable::new();
                // Document order is routing order
                while let Some((name, ranges)) = access.next_entry::<String, Vec<DigitRange>>()? {
                    table.upsert(name, ranges);
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

// ============================================================================
// ASSIGNMENT
// ============================================================================

/// Result of routing a check digit
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OwnerAssignment {
    Owner(String),
    /// Digit absent, or the `0` sentinel
    DigitNotIdentified,
    /// Digit found but no range covers it
    Unconfigured(u8),
}

impl OwnerAssignment {
    pub fn label(&self) -> String {
        match self {
            OwnerAssignment::Owner(name) => name.clone(),
            OwnerAssignment::DigitNotIdentified => "digit not identified".to_string(),
            OwnerAssignment::Unconfigured(d) => format!("no owner configured for digit {}", d),
        }
    }

    pub fn owner(&self) -> Option<&str> {
        match self {
            OwnerAssignment::Owner(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_assigned(&self) -> bool {
        matches!(self, OwnerAssignment::Owner(_))
    }
}

impl fmt::Display for OwnerAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Route a check digit to its owner
///
/// `None` and `0` short-circuit to [`OwnerAssignment::DigitNotIdentified`]
/// without consulting the table.
pub fn assign_owner(check_digit: Option<u8>, table: &OwnerRoutingTable) -> OwnerAssignment {
    let digit = match check_digit {
        None | Some(0) => return OwnerAssignment::DigitNotIdentified,
        Some(d) => d,
    };

    match table.route(digit) {
        Some(name) => OwnerAssignment::Owner(name.to_string()),
        None => OwnerAssignment::Unconfigured(digit),
    }
}

// ============================================================================
// INSPECTION TYPES
// ============================================================================

/// Digits routed to one label, as collapsed intervals
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DigitDistribution {
    pub label: String,
    pub intervals: Vec<(u8, u8)>,
}

impl DigitDistribution {
    pub fn digit_count(&self) -> usize {
        self.intervals
            .iter()
            .map(|(start, end)| usize::from(end - start) + 1)
            .sum()
    }

    /// "1-19, 25" style rendering
    pub fn intervals_text(&self) -> String {
        self.intervals
            .iter()
            .map(|(start, end)| {
                if start == end {
                    start.to_string()
                } else {
                    format!("{}-{}", start, end)
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Warning, // Changes or hides routing decisions
    Info,    // Harmless but probably unintended
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RangeIssue {
    Malformed { owner: String, index: usize },
    Inverted { owner: String, index: usize, min: i64, max: i64 },
    OutOfDomain { owner: String, index: usize, min: i64, max: i64 },
    Overlap { from: u8, to: u8, owners: Vec<String> },
    Gap { from: u8, to: u8 },
}

impl RangeIssue {
    pub fn severity(&self) -> Severity {
        match self {
            RangeIssue::Malformed { .. } | RangeIssue::Inverted { .. } | RangeIssue::Overlap { .. } => {
                Severity::Warning
            }
            RangeIssue::OutOfDomain { .. } | RangeIssue::Gap { .. } => Severity::Info,
        }
    }
}

impl fmt::Display for RangeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeIssue::Malformed { owner, index } => {
                write!(f, "{}: range #{} has fewer than two bounds and is ignored", owner, index + 1)
            }
            RangeIssue::Inverted { owner, index, min, max } => {
                write!(f, "{}: range #{} [{}, {}] has min > max and matches nothing", owner, index + 1, min, max)
            }
            RangeIssue::OutOfDomain { owner, index, min, max } => {
                write!(f, "{}: range #{} [{}, {}] reaches outside 0-99", owner, index + 1, min, max)
            }
            RangeIssue::Overlap { from, to, owners } => write!(
                f,
                "digits {}-{} claimed by {}; {} wins",
                from,
                to,
                owners.join(", "),
                owners.first().map(String::as_str).unwrap_or("")
            ),
            RangeIssue::Gap { from, to } => write!(f, "digits {}-{} have no owner", from, to),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn two_owner_table() -> OwnerRoutingTable {
        OwnerRoutingTable::new()
            .with_owner("ABEL", &[(1, 19)])
            .with_owner("CARLOS", &[(20, 39)])
    }

    #[test]
    fn test_assign_owner_basic() {
        let table = two_owner_table();
        assert_eq!(assign_owner(Some(15), &table), OwnerAssignment::Owner("ABEL".to_string()));
        assert_eq!(assign_owner(Some(25), &table).label(), "CARLOS");
        assert_eq!(
            assign_owner(Some(50), &table).label(),
            "no owner configured for digit 50"
        );
    }

    #[test]
    fn test_inclusive_bounds() {
        let table = two_owner_table();
        assert_eq!(assign_owner(Some(1), &table).owner(), Some("ABEL"));
        assert_eq!(assign_owner(Some(19), &table).owner(), Some("ABEL"));
        assert_eq!(assign_owner(Some(20), &table).owner(), Some("CARLOS"));
        assert_eq!(assign_owner(Some(39), &table).owner(), Some("CARLOS"));
        assert_eq!(assign_owner(Some(40), &table), OwnerAssignment::Unconfigured(40));
    }

    #[test]
    fn test_zero_and_absent_skip_table() {
        // Even a table that claims 0 does not get it
        let table = OwnerRoutingTable::new().with_owner("ZERO", &[(0, 99)]);
        assert_eq!(assign_owner(Some(0), &table), OwnerAssignment::DigitNotIdentified);
        assert_eq!(assign_owner(None, &table), OwnerAssignment::DigitNotIdentified);
        assert_eq!(
            assign_owner(Some(0), &OwnerRoutingTable::new()).label(),
            "digit not identified"
        );
        assert_eq!(table.route(0), Some("ZERO"));
    }

    #[test]
    fn test_first_match_wins_on_overlap() {
        let table = OwnerRoutingTable::new()
            .with_owner("FIRST", &[(10, 30)])
            .with_owner("SECOND", &[(20, 40)]);
        assert_eq!(assign_owner(Some(25), &table).owner(), Some("FIRST"));
        assert_eq!(assign_owner(Some(35), &table).owner(), Some("SECOND"));
    }

    #[test]
    fn test_multiple_ranges_per_owner() {
        let table = OwnerRoutingTable::new()
            .with_owner("ANA", &[(1, 9), (50, 59)])
            .with_owner("BIA", &[(10, 49)]);
        assert_eq!(assign_owner(Some(55), &table).owner(), Some("ANA"));
        assert_eq!(assign_owner(Some(30), &table).owner(), Some("BIA"));
    }

    #[test]
    fn test_malformed_range_is_skipped() {
        let json = r#"{"BROKEN": [[5]], "OK": [[1, 10]]}"#;
        let table: OwnerRoutingTable = serde_json::from_str(json).unwrap();
        assert_eq!(assign_owner(Some(5), &table).owner(), Some("OK"));
        assert_eq!(table.ranges("BROKEN").unwrap()[0].bounds(), None);
    }

    #[test]
    fn test_range_contains_is_inclusive() {
        let range = DigitRange::new(20, 39);
        assert!(range.contains(20));
        assert!(range.contains(39));
        assert!(!range.contains(40));
        assert!(!DigitRange::new(39, 20).contains(30));
        assert!(!DigitRange::from_raw(vec![30]).contains(30));
    }

    #[test]
    fn test_serde_preserves_insertion_order() {
        let json = r#"{"ZECA":[[1,50]],"ABEL":[[1,99]]}"#;
        let table: OwnerRoutingTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.owner_names(), vec!["ZECA", "ABEL"]);
        assert_eq!(assign_owner(Some(10), &table).owner(), Some("ZECA"));
        assert_eq!(serde_json::to_string(&table).unwrap(), json);
    }

    #[test]
    fn test_add_and_remove_owner() {
        let mut table = two_owner_table();
        table.add_owner("  DANI ").unwrap();
        assert_eq!(table.owner_names(), vec!["ABEL", "CARLOS", "DANI"]);
        assert_eq!(table.ranges("DANI").unwrap(), &[DigitRange::new(0, 0)]);

        assert!(matches!(table.add_owner("ABEL"), Err(ConfigError::OwnerExists(_))));
        assert!(matches!(table.add_owner("   "), Err(ConfigError::EmptyOwnerName)));

        let removed = table.remove_owner("ABEL").unwrap();
        assert_eq!(removed, vec![DigitRange::new(1, 19)]);
        assert_eq!(assign_owner(Some(15), &table), OwnerAssignment::Unconfigured(15));
        assert!(matches!(table.remove_owner("ABEL"), Err(ConfigError::OwnerNotFound(_))));
    }

    #[test]
    fn test_rename_keeps_position() {
        let mut table = two_owner_table();
        table.rename_owner("ABEL", "ABEL SILVA").unwrap();
        assert_eq!(table.owner_names(), vec!["ABEL SILVA", "CARLOS"]);
        assert_eq!(assign_owner(Some(3), &table).owner(), Some("ABEL SILVA"));

        assert!(matches!(table.rename_owner("CARLOS", "ABEL SILVA"), Err(ConfigError::OwnerExists(_))));
        assert!(matches!(table.rename_owner("NOBODY", "X"), Err(ConfigError::OwnerNotFound(_))));
        assert!(table.rename_owner("CARLOS", "CARLOS").is_ok());
    }

    #[test]
    fn test_range_mutations() {
        let mut table = two_owner_table();
        let idx = table.add_range("CARLOS", 40, 49).unwrap();
        assert_eq!(idx, 1);
        assert_eq!(assign_owner(Some(45), &table).owner(), Some("CARLOS"));

        table.update_range("CARLOS", 1, 60, 69).unwrap();
        assert_eq!(assign_owner(Some(45), &table), OwnerAssignment::Unconfigured(45));
        assert_eq!(assign_owner(Some(65), &table).owner(), Some("CARLOS"));

        assert_eq!(table.remove_range("CARLOS", 1).unwrap(), DigitRange::new(60, 69));
        assert!(matches!(
            table.remove_range("CARLOS", 5),
            Err(ConfigError::RangeIndexOutOfBounds { index: 5, len: 1, .. })
        ));
        assert!(table.update_range("NOBODY", 0, 1, 2).is_err());
    }

    #[test]
    fn test_distribution_collapses_runs() {
        let table = OwnerRoutingTable::new()
            .with_owner("ANA", &[(1, 9), (50, 59)])
            .with_owner("BIA", &[(10, 49)]);
        let dist = table.distribution();

        assert_eq!(dist[0].label, "digit not identified");
        assert_eq!(dist[0].intervals, vec![(0, 0)]);
        assert_eq!(dist[1].label, "ANA");
        assert_eq!(dist[1].intervals, vec![(1, 9), (50, 59)]);
        assert_eq!(dist[1].intervals_text(), "1-9, 50-59");
        assert_eq!(dist[1].digit_count(), 19);
        assert_eq!(dist[2].label, "BIA");

        // Each unconfigured digit has its own label
        let unconfigured: usize = dist
            .iter()
            .filter(|d| d.label.starts_with("no owner"))
            .map(|d| d.digit_count())
            .sum();
        assert_eq!(unconfigured, 40);
    }

    #[test]
    fn test_validate_reports_problems() {
        let table = OwnerRoutingTable::new()
            .with_owner("ANA", &[(1, 30), (80, 70)])
            .with_owner("BIA", &[(20, 60), (90, 120)]);
        let issues = table.validate();

        assert!(issues.contains(&RangeIssue::Inverted {
            owner: "ANA".to_string(),
            index: 1,
            min: 80,
            max: 70
        }));
        assert!(issues.contains(&RangeIssue::OutOfDomain {
            owner: "BIA".to_string(),
            index: 1,
            min: 90,
            max: 120
        }));
        assert!(issues.contains(&RangeIssue::Overlap {
            from: 20,
            to: 30,
            owners: vec!["ANA".to_string(), "BIA".to_string()]
        }));
        assert!(issues.contains(&RangeIssue::Gap { from: 61, to: 89 }));
        assert_eq!(
            RangeIssue::Gap { from: 61, to: 89 }.to_string(),
            "digits 61-89 have no owner"
        );
    }

    #[test]
    fn test_validate_clean_table() {
        let table = OwnerRoutingTable::new()
            .with_owner("ANA", &[(1, 49)])
            .with_owner("BIA", &[(50, 99)]);
        assert!(table.validate().is_empty());
    }
}
