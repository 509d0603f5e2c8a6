//! Pattern rules for segmentation
//!
//! This module defines the regex-backed rules a language uses to find
//! scope-opening constructs and to derive cross-reference anchors.

use regex::Regex;

use crate::error::{Result, SidenoteError};

/// Compile a pattern, reporting failures as configuration errors
pub(crate) fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| SidenoteError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// A construct that opens a new named block (function, class, module...)
///
/// Patterns are matched in multi-line mode and should be anchored with `^`.
/// The first capture group is the label given to the block.
#[derive(Debug, Clone)]
pub struct ScopeRule {
    /// Compiled regex pattern
    pub pattern: Regex,
}

/// A scope keyword found in some code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeMatch {
    /// Byte offset where the match starts
    pub start: usize,
    /// Byte offset where the match ends
    pub end: usize,
    /// Keyword label, whitespace trimmed
    pub label: String,
}

impl ScopeRule {
    /// Create a new scope rule
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            pattern: compile(&format!("(?m){}", pattern))?,
        })
    }

    /// Find the first match in text starting at position
    pub fn find_at(&self, text: &str, start: usize) -> Option<ScopeMatch> {
        if start >= text.len() {
            return None;
        }
        let caps = self.pattern.captures_at(text, start)?;
        let whole = caps.get(0)?;
        let label = caps.get(1).unwrap_or(whole).as_str().trim().to_string();
        Some(ScopeMatch {
            start: whole.start(),
            end: whole.end(),
            label,
        })
    }

    /// Whether the rule matches at the very start of a line of code
    pub fn matches_line(&self, line: &str) -> bool {
        self.pattern.find(line).is_some_and(|m| m.start() == 0)
    }
}

/// Find the earliest match of any rule at or after `start`
///
/// Ties go to the rule listed first.
pub fn find_scope(rules: &[ScopeRule], text: &str, start: usize) -> Option<ScopeMatch> {
    let mut best: Option<ScopeMatch> = None;
    for rule in rules {
        if let Some(found) = rule.find_at(text, start) {
            if best.as_ref().map_or(true, |b| found.start < b.start) {
                best = Some(found);
            }
        }
    }
    best
}

/// A rule deriving a cross-reference anchor from the start of a section
#[derive(Debug, Clone)]
pub struct LinkRule {
    /// Pattern anchored at the start of the code
    pub pattern: Regex,
    /// Expansion template, `$name` / `${1}` syntax
    pub template: String,
}

impl LinkRule {
    /// Create a new link rule
    pub fn new(pattern: &str, template: &str) -> Result<Self> {
        Ok(Self {
            pattern: compile(&format!(r"\A(?:{})", pattern))?,
            template: template.to_string(),
        })
    }

    /// Expand the template if the pattern matches at the start of `code`
    pub fn anchor_for(&self, code: &str) -> Option<String> {
        let caps = self.pattern.captures(code)?;
        let mut anchor = String::new();
        caps.expand(&self.template, &mut anchor);
        if anchor.is_empty() {
            None
        } else {
            Some(anchor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_rule_label() {
        let rule = ScopeRule::new(r"^[ \t]*(def) ").unwrap();
        let found = rule.find_at("x = 1\n    def f():\n", 0).unwrap();
        assert_eq!(found.start, 6);
        assert_eq!(found.label, "def");
        assert_eq!(rule.find_at("x = 1\n    def f():\n", 7), None);
    }

    #[test]
    fn test_scope_rule_without_group() {
        let rule = ScopeRule::new(r"^[ \t]*namespace \w+").unwrap();
        let found = rule.find_at("  namespace foo {", 0).unwrap();
        assert_eq!(found.label, "namespace foo");
    }

    #[test]
    fn test_matches_line() {
        let rule = ScopeRule::new(r"^[ \t]*(class) ").unwrap();
        assert!(rule.matches_line("class Foo:"));
        assert!(rule.matches_line("    class Foo:"));
        assert!(!rule.matches_line("x = class_ "));
    }

    #[test]
    fn test_find_scope_earliest() {
        let rules = vec![
            ScopeRule::new(r"^[ \t]*(class) ").unwrap(),
            ScopeRule::new(r"^[ \t]*(def) ").unwrap(),
        ];
        let found = find_scope(&rules, "def a():\nclass B:\n", 0).unwrap();
        assert_eq!(found.label, "def");
        let found = find_scope(&rules, "def a():\nclass B:\n", 1).unwrap();
        assert_eq!(found.label, "class");
        assert_eq!(found.start, 9);
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(
            ScopeRule::new(r"^(unclosed"),
            Err(SidenoteError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_link_rule() {
        let rule = LinkRule::new(r"\s*def\s+(?P<name>\w+)", "${name}").unwrap();
        assert_eq!(rule.anchor_for("def parse(x):\n"), Some("parse".to_string()));
        assert_eq!(rule.anchor_for("x = 1\ndef parse(x):\n"), None);
    }
}
