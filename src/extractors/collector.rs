// src/extractors/collector.rs
use std::collections::BTreeSet;

use crate::extractors::category::Category;
use crate::extractors::normalize::normalize_tex;
use crate::extractors::patterns::find_matches;

/// Per-run owner of the three snippet sets.
///
/// Sets are ordered so that the persisted lists come out the same on every run;
/// nothing relies on that order beyond reproducibility.
#[derive(Debug, Default, Clone)]
pub struct SnippetCollector {
    formulas: BTreeSet<String>,
    tables: BTreeSet<String>,
    figures: BTreeSet<String>,
}

impl SnippetCollector {
    pub fn new() -> Self {
        Self::default()
    }

    fn set(&self, category: Category) -> &BTreeSet<String> {
        match category {
            Category::Formula => &self.formulas,
            Category::Table => &self.tables,
            Category::Figure => &self.figures,
        }
    }

    fn set_mut(&mut self, category: Category) -> &mut BTreeSet<String> {
        match category {
            Category::Formula => &mut self.formulas,
            Category::Table => &mut self.tables,
            Category::Figure => &mut self.figures,
        }
    }

    /// Inserts an already-normalized snippet. Returns `false` if it was present.
    pub fn add(&mut self, category: Category, snippet: String) -> bool {
        self.set_mut(category).insert(snippet)
    }

    /// Current members of one category.
    pub fn snapshot(&self, category: Category) -> Vec<String> {
        self.set(category).iter().cloned().collect()
    }

    pub fn len(&self, category: Category) -> usize {
        self.set(category).len()
    }

    /// Runs every category's pattern over `content`, normalizes each match and
    /// adds it. Returns how many snippets were new to the collector.
    pub fn ingest(&mut self, content: &str) -> usize {
        let mut added = 0;
        for category in Category::ALL {
            for raw in find_matches(content, category) {
                if self.add(category, normalize_tex(raw)) {
                    added += 1;
                }
            }
        }
        added
    }
}
