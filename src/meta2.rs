// 📅 Meta 2 Classifier - Filing year vs. configured cutoff

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Meta2Class {
    /// Filed before the cutoff year
    Meta2,
    /// Filed in or after the cutoff year
    OutsideMeta2,
    /// No usable year
    YearNotIdentified,
}

impl Meta2Class {
    pub const ALL: [Meta2Class; 3] = [
        Meta2Class::Meta2,
        Meta2Class::OutsideMeta2,
        Meta2Class::YearNotIdentified,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Meta2Class::Meta2 => "Meta 2",
            Meta2Class::OutsideMeta2 => "outside Meta 2",
            Meta2Class::YearNotIdentified => "year not identified",
        }
    }

    pub fn is_meta2(&self) -> bool {
        *self == Meta2Class::Meta2
    }
}

impl fmt::Display for Meta2Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a filing year against `cutoff_year`
pub fn classify(year: Option<u16>, cutoff_year: u16) -> Meta2Class {
    match year {
        None => Meta2Class::YearNotIdentified,
        Some(y) if y < cutoff_year => Meta2Class::Meta2,
        Some(_) => Meta2Class::OutsideMeta2,
    }
}
