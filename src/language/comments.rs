//! Comment capabilities
//!
//! Inline comments, paired block comments and quoted docstrings all run
//! before the base pipeline, so level and merge logic only ever sees text
//! that is already classified as documentation or code.

use regex::Regex;

use super::capability::{Capability, Contribution};
use super::definition::{LanguageDefinition, Syntax};
use super::passes::{SET_SECTIONS_LEVELS, STRIP_DOCS_INDENTATION};
use super::pipeline::Pass;
use super::rules::compile;
use super::section::{split_by_pattern, split_by_spans, DocSpan, Section, SectionFlag};
use crate::error::Result;

pub const PARSE_INLINE: &str = "parse_inline";
pub const PARSE_BLOCK_COMMENTS: &str = "parse_block_comments";
pub const PARSE_DOCSTRINGS: &str = "parse_docstrings";
pub const STRIP_COMMENT_DECORATION: &str = "strip_comment_decoration";

/// Byte offset of the char after `pos`
fn advance(text: &str, pos: usize) -> usize {
    pos + text[pos..].chars().next().map_or(1, char::len_utf8)
}

/// Apply a span finder to the code of every section
fn split_sections<F>(sections: Vec<Section>, find_spans: F) -> Vec<Section>
where
    F: Fn(&str) -> Vec<DocSpan>,
{
    sections
        .into_iter()
        .flat_map(|section| {
            let spans = find_spans(&section.code);
            split_by_spans(section, spans, Some(SectionFlag::Stripped))
        })
        .collect()
}

/// Line-prefixed comments (`#`, `//`, `--`...)
#[derive(Debug, Clone)]
pub struct InlineComment {
    /// Prefix that starts a comment line
    pub delimiter: String,
    /// Text after the delimiter that marks a line as code (shebangs, pragmas)
    ignored: Option<Regex>,
}

impl InlineComment {
    /// Create an inline comment capability with no ignored patterns
    pub fn new(delimiter: &str) -> Self {
        Self {
            delimiter: delimiter.to_string(),
            ignored: None,
        }
    }

    /// Create an inline comment capability that leaves matching lines as code
    ///
    /// Each pattern is matched against the text right after the delimiter.
    pub fn with_ignored(delimiter: &str, patterns: &[&str]) -> Result<Self> {
        let mut comment = Self::new(delimiter);
        if !patterns.is_empty() {
            let alternatives: Vec<String> = patterns.iter().map(|p| format!("(?:{})", p)).collect();
            comment.ignored = Some(compile(&format!(r"\A(?:{})", alternatives.join("|")))?);
        }
        Ok(comment)
    }

    /// Whether the text following the delimiter marks the line as code
    pub fn is_ignored(&self, rest: &str) -> bool {
        self.ignored
            .as_ref()
            .is_some_and(|re| re.is_match(rest.trim_end_matches(['\n', '\r'])))
    }

    /// Documentation carried by a line, delimiter removed
    fn comment_body<'a>(&self, line: &'a str) -> Option<&'a str> {
        let body = line
            .trim_start_matches([' ', '\t'])
            .strip_prefix(self.delimiter.as_str())?;
        if self.is_ignored(body) {
            None
        } else {
            Some(body)
        }
    }

    /// Maximal runs of consecutive comment lines
    pub fn find_spans(&self, code: &str) -> Vec<DocSpan> {
        let mut spans = Vec::new();
        let mut run: Option<(usize, String)> = None;
        let mut offset = 0;

        for line in code.split_inclusive('\n') {
            match self.comment_body(line) {
                Some(body) => run.get_or_insert_with(|| (offset, String::new())).1.push_str(body),
                None => {
                    if let Some((start, docs)) = run.take() {
                        spans.push(DocSpan { range: start..offset, docs });
                    }
                }
            }
            offset += line.len();
        }
        if let Some((start, docs)) = run {
            spans.push(DocSpan { range: start..offset, docs });
        }

        spans
    }
}

impl Capability for InlineComment {
    fn name(&self) -> &'static str {
        "inline_comment"
    }

    fn configure(&self, language: &mut LanguageDefinition) {
        language.syntax.inline = Some(self.clone());
    }

    fn passes(&self) -> Vec<Contribution> {
        vec![Contribution::before(
            SET_SECTIONS_LEVELS,
            Pass::new(PARSE_INLINE, parse_inline),
        )]
    }
}

/// Turn runs of inline comment lines into documentation
pub fn parse_inline(syntax: &Syntax, sections: Vec<Section>) -> Vec<Section> {
    let Some(inline) = &syntax.inline else {
        return sections;
    };
    split_sections(sections, |code| inline.find_spans(code))
}

/// Paired comment delimiters (`/* */`, `{- -}`, `=begin`/`=end`...)
#[derive(Debug, Clone)]
pub struct BlockComment {
    /// Start delimiter at a line start, capturing the indentation before it
    start: Regex,
    /// End delimiter
    end: Regex,
    /// Literal right after a start delimiter that marks a pragma, not a comment
    ignore_start: Option<String>,
    /// Literal right before an end delimiter that disqualifies it
    ignore_end: Option<String>,
}

impl BlockComment {
    /// Create a block comment capability from start and end patterns
    pub fn new(start: &str, end: &str) -> Result<Self> {
        Ok(Self {
            start: compile(&format!(r"(?m)^([ \t]*)(?:{})", start))?,
            end: compile(&format!("(?m){}", end))?,
            ignore_start: None,
            ignore_end: None,
        })
    }

    /// Create a block comment whose start delimiter must sit in the first column
    ///
    /// Indented text matching `start` is code.
    pub fn in_first_column(start: &str, end: &str) -> Result<Self> {
        Ok(Self {
            start: compile(&format!(r"(?m)^()(?:{})", start))?,
            ..Self::new(start, end)?
        })
    }

    /// Skip comments whose start is followed by `start` or whose end is
    /// preceded by `end` (e.g. `#` for `{-# ... #-}` pragmas)
    pub fn ignoring(mut self, start: &str, end: &str) -> Self {
        self.ignore_start = Some(start.to_string());
        self.ignore_end = Some(end.to_string());
        self
    }

    /// Nearest acceptable end delimiter at or after `from`
    fn find_end(&self, code: &str, from: usize) -> Option<(usize, usize)> {
        let mut at = from;
        while at <= code.len() {
            let m = self.end.find_at(code, at)?;
            let disqualified = self
                .ignore_end
                .as_deref()
                .is_some_and(|mark| code[..m.start()].ends_with(mark));
            if !disqualified {
                return Some((m.start(), m.end()));
            }
            at = if m.end() > m.start() {
                m.end()
            } else if m.end() < code.len() {
                advance(code, m.end())
            } else {
                return None;
            };
        }
        None
    }

    /// The next complete comment starting at or after `pos`
    pub fn next_span(&self, code: &str, mut pos: usize) -> Option<DocSpan> {
        while pos <= code.len() {
            let caps = self.start.captures_at(code, pos)?;
            let whole = caps.get(0)?;
            let indent = caps.get(1).map_or("", |m| m.as_str());
            let body_start = whole.end();

            if self
                .ignore_start
                .as_deref()
                .is_some_and(|mark| code[body_start..].starts_with(mark))
            {
                if body_start >= code.len() {
                    return None;
                }
                pos = advance(code, body_start.max(whole.start()));
                continue;
            }

            let (end_start, end_end) = self.find_end(code, body_start)?;
            return Some(DocSpan {
                range: whole.start()..end_end,
                docs: format!("{}{}", indent, &code[body_start..end_start]),
            });
        }
        None
    }
}

/// Every block comment in `code`, across all configured delimiter pairs
///
/// The earliest start wins; scanning resumes after that comment's end.
pub fn find_block_spans(kinds: &[BlockComment], code: &str) -> Vec<DocSpan> {
    let mut spans = Vec::new();
    let mut pos = 0;

    while pos < code.len() {
        let next = kinds
            .iter()
            .filter_map(|kind| kind.next_span(code, pos))
            .min_by_key(|span| span.range.start);
        let Some(span) = next else {
            break;
        };
        pos = if span.range.end > span.range.start {
            span.range.end
        } else {
            advance(code, span.range.start)
        };
        spans.push(span);
    }

    spans
}

impl Capability for BlockComment {
    fn name(&self) -> &'static str {
        "block_comment"
    }

    fn configure(&self, language: &mut LanguageDefinition) {
        language.syntax.block_comments.push(self.clone());
    }

    fn passes(&self) -> Vec<Contribution> {
        vec![Contribution::before(
            SET_SECTIONS_LEVELS,
            Pass::new(PARSE_BLOCK_COMMENTS, parse_block_comments),
        )]
    }
}

/// Turn block comments into documentation
pub fn parse_block_comments(syntax: &Syntax, sections: Vec<Section>) -> Vec<Section> {
    if syntax.block_comments.is_empty() {
        return sections;
    }
    split_sections(sections, |code| find_block_spans(&syntax.block_comments, code))
}

/// Double-quoted string literals used as documentation
#[derive(Debug, Clone)]
pub struct Docstring {
    pattern: Regex,
}

impl Docstring {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: compile(r#"(?m)^([ \t]*"(?:[^"\\]|\\(?s:.))*)"[ \t]*$"#)?,
        })
    }
}

/// Drop the opening quote and resolve backslash escapes
fn unquote(raw: &str) -> String {
    let raw = raw.trim_start_matches('\n');
    let unquoted = match raw.find('"') {
        Some(idx) => format!("{}{}", &raw[..idx], &raw[idx + 1..]),
        None => raw.to_string(),
    };

    let mut out = String::with_capacity(unquoted.len());
    let mut chars = unquoted.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    out
}

impl Capability for Docstring {
    fn name(&self) -> &'static str {
        "docstring"
    }

    fn configure(&self, language: &mut LanguageDefinition) {
        language.syntax.docstring = Some(self.clone());
    }

    fn passes(&self) -> Vec<Contribution> {
        vec![Contribution::before(
            SET_SECTIONS_LEVELS,
            Pass::new(PARSE_DOCSTRINGS, parse_docstrings),
        )]
    }
}

/// Turn docstrings into documentation
pub fn parse_docstrings(syntax: &Syntax, sections: Vec<Section>) -> Vec<Section> {
    let Some(docstring) = &syntax.docstring else {
        return sections;
    };
    sections
        .into_iter()
        .flat_map(|section| {
            let mut parts =
                split_by_pattern(section, &docstring.pattern, Some(SectionFlag::Stripped));
            for part in parts.iter_mut().skip(1) {
                if part.is_stripped() && part.code.is_empty() {
                    part.docs = unquote(&part.docs);
                }
            }
            parts
        })
        .collect()
}

/// Box-drawing comment styles (`/////`, ` * `) found in the C family
#[derive(Debug, Clone)]
pub struct CommentDecoration {
    pattern: Regex,
}

impl CommentDecoration {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: compile(r"(?m)^[ \t]*(?:/+|\*+)([ \t].*)?$")?,
        })
    }

    /// Remove leading `/` or `*` runs from every documentation line
    pub fn strip(&self, docs: &str) -> String {
        self.pattern.replace_all(docs, "${1}").into_owned()
    }
}

impl Capability for CommentDecoration {
    fn name(&self) -> &'static str {
        "comment_decoration"
    }

    fn configure(&self, language: &mut LanguageDefinition) {
        language.syntax.decoration = Some(self.clone());
    }

    fn passes(&self) -> Vec<Contribution> {
        vec![Contribution::before(
            STRIP_DOCS_INDENTATION,
            Pass::new(STRIP_COMMENT_DECORATION, strip_comment_decoration),
        )]
    }
}

/// Strip comment decoration from documentation
pub fn strip_comment_decoration(syntax: &Syntax, mut sections: Vec<Section>) -> Vec<Section> {
    let Some(decoration) = &syntax.decoration else {
        return sections;
    };
    for section in &mut sections {
        if section.has_docs() {
            section.docs = decoration.strip(&section.docs);
        }
    }
    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    fn python_inline() -> InlineComment {
        InlineComment::with_ignored("#", &[r"!.+", r"\s*-\*-\s*coding:.+\s*-\*-"]).unwrap()
    }

    fn shape(sections: &[Section]) -> Vec<(&str, &str)> {
        sections.iter().map(|s| (s.docs.as_str(), s.code.as_str())).collect()
    }

    #[test]
    fn test_inline_runs() {
        let spans = python_inline().find_spans("x = 1\n# one\n  # two\ny = 2\n# three");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].range, 6..20);
        assert_eq!(spans[0].docs, " one\n two\n");
        assert_eq!(spans[1].docs, " three");
    }

    #[test]
    fn test_inline_ignored_lines_stay_code() {
        let inline = python_inline();
        let code = "#!/usr/bin/env python\n# -*- coding: utf-8 -*-\n# real\n#!late\n# more\n";
        let spans = inline.find_spans(code);
        let docs: Vec<&str> = spans.iter().map(|s| s.docs.as_str()).collect();
        assert_eq!(docs, vec![" real\n", " more\n"]);
        assert!(inline.is_ignored("!/usr/bin/env python\n"));
        assert!(!inline.is_ignored(" plain"));
    }

    #[test]
    fn test_parse_inline_sections() {
        let mut syntax = Syntax::default();
        syntax.inline = Some(python_inline());
        let out = parse_inline(&syntax, vec![Section::code("def f():\n    # doc\n    pass\n")]);
        assert_eq!(
            shape(&out),
            vec![("", "def f():\n"), (" doc\n", ""), ("", "    pass\n")]
        );
        assert!(out[1].is_stripped());
    }

    #[test]
    fn test_block_comment_c_style() {
        let block = BlockComment::new(r"/\*+", r"\*+/").unwrap();
        let spans = find_block_spans(&[block], "int a;\n/** hello\n * world\n */\nint b;\n");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].docs, " hello\n * world\n ");
        assert_eq!(spans[0].range, 7..29);
    }

    #[test]
    fn test_block_comment_keeps_indent() {
        let block = BlockComment::new(r#"""""#, r#"""""#).unwrap();
        let spans = find_block_spans(&[block], "def f():\n    \"\"\"Doc.\"\"\"\n    pass\n");
        assert_eq!(spans[0].docs, "    Doc.");
    }

    #[test]
    fn test_block_comment_skips_pragmas() {
        let block = BlockComment::new(r"\{-", r"-\}").unwrap().ignoring("#", "#");
        let code = "{-# LANGUAGE GADTs #-}\nmodule M where\n{- | Docs -}\nx = 1\n";
        let spans = find_block_spans(&[block], code);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].docs, " | Docs ");
    }

    #[test]
    fn test_block_comment_unterminated_is_code() {
        let block = BlockComment::new(r"/\*", r"\*/").unwrap();
        assert!(find_block_spans(&[block], "/* never closed\nint x;\n").is_empty());
    }

    #[test]
    fn test_block_comment_mid_line_is_code() {
        let block = BlockComment::new(r"/\*", r"\*/").unwrap();
        assert!(find_block_spans(&[block], "int x; /* trailing */\n").is_empty());
    }

    #[test]
    fn test_block_comment_multiple_kinds() {
        let double = BlockComment::new(r#"""""#, r#"""""#).unwrap();
        let single = BlockComment::new("'''", "'''").unwrap();
        let code = "'''one'''\nx\n\"\"\"two\"\"\"\n";
        let spans = find_block_spans(&[double, single], code);
        let docs: Vec<&str> = spans.iter().map(|s| s.docs.as_str()).collect();
        assert_eq!(docs, vec!["one", "two"]);
    }

    #[test]
    fn test_docstring() {
        let mut syntax = Syntax::default();
        syntax.docstring = Some(Docstring::new().unwrap());
        let code = "(defn f\n  \"Adds \\\"one\\\".\n  More.\"\n  [x] (inc x))\n";
        let out = parse_docstrings(&syntax, vec![Section::code(code)]);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].code, "(defn f\n");
        assert_eq!(out[1].docs, "  Adds \"one\".\n  More.");
        assert_eq!(out[2].code, "\n  [x] (inc x))\n");
    }

    #[test]
    fn test_docstring_ignores_inline_strings() {
        let mut syntax = Syntax::default();
        syntax.docstring = Some(Docstring::new().unwrap());
        let out = parse_docstrings(&syntax, vec![Section::code("(println \"hi\")\n")]);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_comment_decoration() {
        let decoration = CommentDecoration::new().unwrap();
        assert_eq!(decoration.strip(" hello\n * world\n ***\n"), " hello\n world\n\n");
        assert_eq!(decoration.strip("/ box\n**bold**"), " box\n**bold**");
    }

    #[test]
    fn test_block_comment_in_first_column() {
        let block = BlockComment::in_first_column(r"[Cc](?:[ \t]|$)", "$").unwrap();
        let code = "C Sum.\n      x = 1\n  c = 2\n";
        let spans = find_block_spans(&[block], code);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].range, 0..6);
        assert_eq!(spans[0].docs, "Sum.");
    }
}
