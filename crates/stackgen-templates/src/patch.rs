//! Regex-based find/replace rules for already-generated files

use std::fs;
use std::path::Path;

use regex::Regex;
use tracing::debug;

use crate::error::Result;

/// How a rule's pattern is applied to the target text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchMode {
    /// Pattern may span constructs across the full text; replacements
    /// may reference captured groups. Use when the edit needs
    /// cross-line context (e.g. inserting a line after another line).
    WholeFile,
    /// Each line is matched and replaced independently; line
    /// boundaries are preserved.
    PerLine,
}

/// A pattern/replacement pair spliced into generated text.
///
/// Rules are stateless and reusable; a rule matching zero times is not
/// an error. Nothing guards against double-application, that is the
/// caller's concern.
#[derive(Debug, Clone)]
pub struct PatchRule {
    pattern: Regex,
    replacement: String,
    mode: PatchMode,
}

impl PatchRule {
    /// Whole-file rule; `replacement` may use `${1}`-style group refs
    pub fn whole_file(pattern: &str, replacement: impl Into<String>) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            replacement: replacement.into(),
            mode: PatchMode::WholeFile,
        })
    }

    /// Line-mode rule applied to each line independently
    pub fn per_line(pattern: &str, replacement: impl Into<String>) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            replacement: replacement.into(),
            mode: PatchMode::PerLine,
        })
    }

    /// Apply this rule to `content`, returning the new text
    pub fn apply(&self, content: &str) -> String {
        match self.mode {
            PatchMode::WholeFile => self
                .pattern
                .replace_all(content, self.replacement.as_str())
                .into_owned(),
            PatchMode::PerLine => {
                let mut out = String::with_capacity(content.len());
                for line in content.split_inclusive('\n') {
                    let (body, newline) = match line.strip_suffix('\n') {
                        Some(body) => (body, "\n"),
                        None => (line, ""),
                    };
                    let (body, carriage) = match body.strip_suffix('\r') {
                        Some(body) => (body, "\r"),
                        None => (body, ""),
                    };
                    out.push_str(&self.pattern.replace_all(body, self.replacement.as_str()));
                    out.push_str(carriage);
                    out.push_str(newline);
                }
                out
            }
        }
    }
}

/// Apply rules in list order to the same evolving content, so rule
/// N+1 sees the output of rule N.
pub fn apply_to_content(content: &str, rules: &[PatchRule]) -> String {
    rules
        .iter()
        .fold(content.to_string(), |text, rule| rule.apply(&text))
}

/// Apply rules to the file at `path`, rewriting it in place only when
/// the content actually changed. Returns whether a write happened.
pub fn apply_rules(path: impl AsRef<Path>, rules: &[PatchRule]) -> Result<bool> {
    let path = path.as_ref();
    let original = fs::read_to_string(path)?;
    let patched = apply_to_content(&original, rules);
    if patched == original {
        return Ok(false);
    }
    fs::write(path, patched)?;
    debug!("Patched {}", path.display());
    Ok(true)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_whole_file_rule_spans_lines_with_captures() {
        let rule = PatchRule::whole_file(
            r#"(import vue from "@vitejs/plugin-vue";?\n)"#,
            "${1}import tailwindcss from \"@tailwindcss/vite\";\n",
        )
        .unwrap();
        let input = "import vue from \"@vitejs/plugin-vue\";\nexport default {};\n";
        let output = rule.apply(input);
        assert!(output.contains("import tailwindcss from \"@tailwindcss/vite\";"));
        assert!(output.ends_with("export default {};\n"));
    }

    #[test]
    fn test_per_line_rule_preserves_line_boundaries() {
        let rule = PatchRule::per_line(r"^\.env\..*", "").unwrap();
        let input = ".env.local\nnode_modules/\n.env.production\ndist\n";
        assert_eq!(rule.apply(input), "\nnode_modules/\n\ndist\n");
    }

    #[test]
    fn test_per_line_anchor_does_not_match_mid_file() {
        // The anchor binds to each line, not only the file start.
        let rule = PatchRule::per_line(r"^version = .*", "dynamic = [\"version\"]").unwrap();
        let input = "[project]\nversion = \"0.1.0\"\n";
        assert_eq!(rule.apply(input), "[project]\ndynamic = [\"version\"]\n");
    }

    #[test]
    fn test_rules_apply_in_order_to_evolving_content() {
        // R2 only matches text produced by R1.
        let r1 = PatchRule::whole_file("alpha", "beta").unwrap();
        let r2 = PatchRule::whole_file("beta", "gamma").unwrap();

        assert_eq!(apply_to_content("alpha", &[r1.clone(), r2.clone()]), "gamma");
        // Reversed, R2 finds nothing in the original and stays a no-op.
        assert_eq!(apply_to_content("alpha", &[r2, r1]), "beta");
    }

    #[test]
    fn test_zero_matches_is_not_an_error() {
        let rule = PatchRule::per_line("never-present", "x").unwrap();
        assert_eq!(rule.apply("some text\n"), "some text\n");
    }

    #[test]
    fn test_apply_rules_rewrites_only_on_change() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("target.txt");
        fs::write(&path, "hello world\n").unwrap();

        let noop = PatchRule::whole_file("absent", "x").unwrap();
        assert!(!apply_rules(&path, &[noop]).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello world\n");

        let change = PatchRule::whole_file("world", "there").unwrap();
        assert!(apply_rules(&path, &[change]).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello there\n");
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        assert!(PatchRule::whole_file("(unclosed", "x").is_err());
    }
}
