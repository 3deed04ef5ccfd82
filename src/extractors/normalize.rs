// src/extractors/normalize.rs
use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Failed to compile WHITESPACE_RUN_RE"));

/// Collapses every whitespace run (newlines included) to one space and trims the ends.
pub fn normalize_tex(raw: &str) -> String {
    WHITESPACE_RUN_RE.replace_all(raw, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "",
        "   ",
        "$x+y$",
        "  $x  +\ty$\n",
        "\\begin{equation}\n a+b \n\\end{equation}",
        "\\begin{tabular}{cc}\r\n1 & 2 \\\\\r\n\r\n3 & 4\r\n\\end{tabular}",
        "\u{00a0}non-breaking\u{2003}em space\u{3000}",
        "ünïcödé  $\\alpha$\n\n",
    ];

    #[test]
    fn collapses_newlines_and_trims() {
        assert_eq!(
            normalize_tex("\\begin{equation}\n a+b \n\\end{equation}"),
            "\\begin{equation} a+b \\end{equation}"
        );
        assert_eq!(normalize_tex("  $x  +\ty$\n"), "$x + y$");
        assert_eq!(normalize_tex(" \n\t "), "");
    }

    #[test]
    fn is_idempotent() {
        for s in SAMPLES {
            let once = normalize_tex(s);
            assert_eq!(normalize_tex(&once), once, "not idempotent for {:?}", s);
        }
    }

    #[test]
    fn output_has_no_whitespace_runs_or_edges() {
        for s in SAMPLES {
            let out = normalize_tex(s);
            let chars: Vec<char> = out.chars().collect();
            assert!(
                chars.windows(2).all(|w| !(w[0].is_whitespace() && w[1].is_whitespace())),
                "adjacent whitespace in {:?}",
                out
            );
            assert!(!out.starts_with(char::is_whitespace), "leading whitespace in {:?}", out);
            assert!(!out.ends_with(char::is_whitespace), "trailing whitespace in {:?}", out);
        }
    }

    #[test]
    fn single_spaces_are_left_alone() {
        assert_eq!(normalize_tex("$x + y = z$"), "$x + y = z$");
    }

    #[test]
    fn information_separators_are_not_whitespace() {
        // U+001C..U+001F are outside Unicode White_Space.
        assert_eq!(normalize_tex("$a\x1c\x1cb$"), "$a\u{1c}\u{1c}b$");
        assert_eq!(normalize_tex("\x1f$a$"), "\u{1f}$a$");
    }
}
