// src/extractors/patterns.rs

// --- Imports ---
use crate::extractors::category::Category;
use once_cell::sync::Lazy;
use regex::Regex;

// --- Regex Patterns (Lazy Static) ---
// Alternatives are tried left to right at each position; the first one that
// matches wins. Environment bodies are non-greedy, so a nested block of the
// same kind is cut short at the first inner `\end{...}`.
static FORMULA_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?s)",
        r"\\\(.*?\\\)",                                   // \( ... \)
        r"|\\\[.*?\\\]",                                  // \[ ... \]
        r"|\$.*?\$",                                      // $ ... $
        r"|\\begin\{equation\}.*?\\end\{equation\}",
        r"|\\begin\{align\*?\}.*?\\end\{align\*?\}",      // align / align*
        r"|\\begin\{gather\*?\}.*?\\end\{gather\*?\}",    // gather / gather*
        r"|\\begin\{multline\*?\}.*?\\end\{multline\*?\}",
        r"|\\begin\{cases\}.*?\\end\{cases\}",
        r"|\\begin\{array\}.*?\\end\{array\}",
        r"|\\begin\{bmatrix\}.*?\\end\{bmatrix\}",
        r"|\\begin\{pmatrix\}.*?\\end\{pmatrix\}",
    ))
    .expect("Failed to compile FORMULA_RE")
});

static TABLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?s)",
        r"\\begin\{table\*?\}.*?\\end\{table\*?\}",       // table / table*
        r"|\\begin\{tabular\}.*?\\end\{tabular\}",        // bare tabular
    ))
    .expect("Failed to compile TABLE_RE")
});

static FIGURE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?s)",
        r"\\begin\{figure\*?\}.*?\\end\{figure\*?\}",     // figure / figure*
        r"|\\includegraphics\[.*?\]\{.*?\}",
    ))
    .expect("Failed to compile FIGURE_RE")
});

/// Returns the compiled pattern for a category.
pub fn pattern_for(category: Category) -> &'static Regex {
    match category {
        Category::Formula => &*FORMULA_RE,
        Category::Table => &*TABLE_RE,
        Category::Figure => &*FIGURE_RE,
    }
}

/// All non-overlapping matches of `category`'s pattern, in document order.
/// Slices borrow from `content`; nothing is normalized here.
pub fn find_matches(content: &str, category: Category) -> Vec<&str> {
    pattern_for(category)
        .find_iter(content)
        .map(|m| m.as_str())
        .collect()
}
