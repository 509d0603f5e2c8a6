//! Documentation/code sections and the primitives that split and merge them
//!
//! Every segmentation pass is built on the handful of operations here. They
//! never reorder text: splitting cuts a section's code into adjacent pieces,
//! merging concatenates two neighbours.

use std::collections::BTreeMap;
use std::ops::Range;

use regex::Regex;

/// Annotation key holding a section's cross-reference anchor
pub const ANCHOR: &str = "anchor";

/// Processing marker carried by a section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionFlag {
    /// Comment delimiters were already stripped from the documentation
    Stripped,
}

/// One documentation/code pairing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    /// Prose text, rendered in the documentation column
    pub docs: String,
    /// Source text, rendered in the code column
    pub code: String,
    /// Indentation width of the code, relative to neighbours
    pub level: usize,
    /// Construct keyword that opened this block (e.g. "def", "@decorator")
    pub scope: Option<String>,
    /// Processing marker, see [`SectionFlag`]
    pub flag: Option<SectionFlag>,
    /// Late annotations such as the cross-reference anchor
    pub annotations: BTreeMap<String, String>,
}

/// A byte range of a section's code that becomes documentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocSpan {
    /// Range removed from the code
    pub range: Range<usize>,
    /// Documentation text extracted from that range
    pub docs: String,
}

impl Section {
    /// Create a code-only section
    pub fn code(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Default::default()
        }
    }

    /// Create a documentation-only section
    pub fn docs(docs: impl Into<String>) -> Self {
        Self {
            docs: docs.into(),
            ..Default::default()
        }
    }

    /// Whether the section holds any non-blank code
    pub fn has_code(&self) -> bool {
        !self.code.trim().is_empty()
    }

    /// Whether the section holds any non-blank documentation
    pub fn has_docs(&self) -> bool {
        !self.docs.trim().is_empty()
    }

    /// Whether the documentation already had its delimiters removed
    pub fn is_stripped(&self) -> bool {
        self.flag == Some(SectionFlag::Stripped)
    }

    /// Cross-reference anchor attached by keyword linking
    pub fn anchor(&self) -> Option<&str> {
        self.annotations.get(ANCHOR).map(|s| s.as_str())
    }
}

/// Split a section's code at byte offset `pos`
///
/// The head keeps the documentation, scope, flag and annotations; the tail
/// starts with empty documentation and no scope. `pos` is moved forward to
/// the next char boundary and clamped to the code length.
pub fn split_by_position(section: Section, pos: usize) -> (Section, Section) {
    let mut pos = pos.min(section.code.len());
    while !section.code.is_char_boundary(pos) {
        pos += 1;
    }

    let Section {
        docs,
        mut code,
        level,
        scope,
        flag,
        annotations,
    } = section;
    let tail_code = code.split_off(pos);

    let head = Section {
        docs,
        code,
        level,
        scope,
        flag,
        annotations,
    };
    let tail = Section {
        level,
        ..Section::code(tail_code)
    };
    (head, tail)
}

/// Move the given ranges of a section's code into documentation
///
/// Produces the head (original documentation plus the code before the first
/// span), then for every span a documentation-only section tagged with
/// `flag`, followed by the code up to the next span. Spans must be sorted
/// and non-overlapping. With no spans the section comes back unchanged.
pub fn split_by_spans(
    section: Section,
    spans: Vec<DocSpan>,
    flag: Option<SectionFlag>,
) -> Vec<Section> {
    let Some(first) = spans.first() else {
        return vec![section];
    };

    let first_start = first.range.start;
    let level = section.level;
    let code = section.code.clone();

    let mut out = Vec::with_capacity(spans.len() * 2 + 1);
    out.push(Section {
        code: code[..first_start].to_string(),
        ..section
    });

    for (i, span) in spans.iter().enumerate() {
        out.push(Section {
            docs: span.docs.clone(),
            level,
            flag,
            ..Default::default()
        });

        let next = spans.get(i + 1).map_or(code.len(), |s| s.range.start);
        if span.range.end < next {
            out.push(Section {
                level,
                ..Section::code(&code[span.range.end..next])
            });
        }
    }

    out
}

/// Split a section wherever `pattern` matches its code
///
/// The documentation of each match is its first capture group when the
/// pattern has one, otherwise the whole match.
pub fn split_by_pattern(
    section: Section,
    pattern: &Regex,
    flag: Option<SectionFlag>,
) -> Vec<Section> {
    let spans: Vec<DocSpan> = pattern
        .captures_iter(&section.code)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            if whole.as_str().is_empty() {
                return None;
            }
            let docs = caps.get(1).unwrap_or(whole).as_str().to_string();
            Some(DocSpan {
                range: whole.range(),
                docs,
            })
        })
        .collect();

    split_by_spans(section, spans, flag)
}

/// Merge two adjacent sections into one
///
/// Documentation and code are concatenated in order. The result keeps the
/// first section's level and flag and the second section's scope, falling
/// back to the first's.
pub fn merge(first: Section, second: Section) -> Section {
    let mut annotations = first.annotations;
    annotations.extend(second.annotations);

    Section {
        docs: first.docs + &second.docs,
        code: first.code + &second.code,
        level: first.level,
        scope: second.scope.or(first.scope),
        flag: first.flag.or(second.flag),
        annotations,
    }
}

/// Drop sections that carry neither documentation nor code
pub fn filter_empty(sections: Vec<Section>) -> Vec<Section> {
    sections
        .into_iter()
        .filter(|s| s.has_code() || s.has_docs())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_code(sections: &[Section]) -> String {
        sections.iter().map(|s| s.code.as_str()).collect()
    }

    #[test]
    fn test_split_by_position() {
        let mut section = Section::code("first\nsecond\n");
        section.docs = "doc".to_string();
        section.scope = Some("def".to_string());

        let (head, tail) = split_by_position(section, 6);
        assert_eq!(head.code, "first\n");
        assert_eq!(head.docs, "doc");
        assert_eq!(head.scope.as_deref(), Some("def"));
        assert_eq!(tail.code, "second\n");
        assert!(tail.docs.is_empty());
        assert!(tail.scope.is_none());
    }

    #[test]
    fn test_split_by_position_char_boundary() {
        let (head, tail) = split_by_position(Section::code("é!"), 1);
        assert_eq!(head.code, "é");
        assert_eq!(tail.code, "!");
    }

    #[test]
    fn test_split_by_pattern_no_match() {
        let pattern = Regex::new(r"(?m)^#(.*)\n").unwrap();
        let section = Section::code("x = 1\n");
        let out = split_by_pattern(section.clone(), &pattern, Some(SectionFlag::Stripped));
        assert_eq!(out, vec![section]);
    }

    #[test]
    fn test_split_by_pattern_alternates() {
        let pattern = Regex::new(r"(?m)^#(.*)\n").unwrap();
        let out = split_by_pattern(
            Section::code("a\n#one\nb\n#two\nc\n"),
            &pattern,
            Some(SectionFlag::Stripped),
        );

        let shape: Vec<(&str, &str)> = out
            .iter()
            .map(|s| (s.docs.as_str(), s.code.as_str()))
            .collect();
        assert_eq!(
            shape,
            vec![("", "a\n"), ("one", ""), ("", "b\n"), ("two", ""), ("", "c\n")]
        );
        assert!(out[1].is_stripped());
        assert!(!out[2].is_stripped());
        assert_eq!(all_code(&out), "a\nb\nc\n");
    }

    #[test]
    fn test_split_by_spans_skips_empty_code() {
        let spans = vec![
            DocSpan { range: 0..4, docs: "one".into() },
            DocSpan { range: 4..8, docs: "two".into() },
        ];
        let out = split_by_spans(Section::code("#one#twox"), spans, None);
        let docs: Vec<&str> = out.iter().map(|s| s.docs.as_str()).collect();
        assert_eq!(docs, vec!["", "one", "two", ""]);
        assert_eq!(out[3].code, "x");
    }

    #[test]
    fn test_merge() {
        let mut first = Section::code("@deco\n");
        first.scope = Some("@deco".to_string());
        first.level = 2;
        let mut second = Section::code("def f(): pass\n");
        second.scope = Some("def".to_string());
        second.docs = "doc".to_string();

        let merged = merge(first, second);
        assert_eq!(merged.code, "@deco\ndef f(): pass\n");
        assert_eq!(merged.docs, "doc");
        assert_eq!(merged.scope.as_deref(), Some("def"));
        assert_eq!(merged.level, 2);
    }

    #[test]
    fn test_filter_empty_is_idempotent() {
        let sections = vec![
            Section::code("  \n"),
            Section::docs("doc"),
            Section::default(),
            Section::code("x"),
        ];
        let once = filter_empty(sections);
        assert_eq!(once.len(), 2);
        assert_eq!(filter_empty(once.clone()), once);
    }
}
