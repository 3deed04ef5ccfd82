// src/extractors/category.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three independent extraction buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Formula,
    Table,
    Figure,
}

impl Category {
    /// Every category, in the order files are written and rendered.
    pub const ALL: [Category; 3] = [Category::Formula, Category::Table, Category::Figure];

    pub fn name(self) -> &'static str {
        match self {
            Category::Formula => "formula",
            Category::Table => "table",
            Category::Figure => "figure",
        }
    }

    /// `formulas.json`, `tables.json`, `figures.json`
    pub fn json_file_name(self) -> String {
        format!("{}s.json", self.name())
    }

    /// Name of the rendered image for the 1-based position `index`.
    pub fn image_file_name(self, index: usize) -> String {
        format!("{}_{}.png", self.name(), index)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
