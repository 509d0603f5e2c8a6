//! Highlighter and documentation renderer boundary
//!
//! Highlighting and Markdown rendering live outside this crate; these traits
//! are what a caller plugs in. The divider protocol lets a whole file be
//! highlighted in one call and cut back into per-section fragments.

use regex::Regex;

use crate::error::{Result, SidenoteError};
use crate::language::links::anchor_markup;
use crate::language::rules::compile;
use crate::language::{LanguageDefinition, Section};

/// Marker word embedded in the divider comment
const DIVIDER: &str = "DIVIDER";

/// Named documentation renderer extensions
///
/// A language enables a fixed set; the renderer decides what each one does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocExtension {
    /// Join hard-wrapped lines inside a paragraph
    LineConnector,
    /// Definition lists that tolerate blank lines
    DefinitionLists,
    /// `TODO:` / `FIXME:` callouts
    Todo,
    /// Pydoc-style `Args:` / `Returns:` blocks
    Pydoc,
    /// Bare URLs become links
    AutoLink,
    /// `$...$` math spans
    Math,
    /// Fenced code blocks
    FencedCode,
    /// Highlighting inside fenced code blocks
    CodeHilite,
    /// Pipe tables
    Tables,
    /// Haddock markup (`'identifier'`, `"Module"`, `@code@`)
    Haddock,
    /// References matching `pattern` link to another namespace's page
    NamespaceLinks { pattern: String },
    /// Section anchors from keyword links can be linked to
    SectionLinks,
}

/// Extensions every language starts with
pub fn default_doc_extensions() -> Vec<DocExtension> {
    vec![
        DocExtension::LineConnector,
        DocExtension::DefinitionLists,
        DocExtension::Todo,
        DocExtension::Pydoc,
        DocExtension::AutoLink,
        DocExtension::Math,
        DocExtension::FencedCode,
        DocExtension::CodeHilite,
        DocExtension::Tables,
    ]
}

/// Syntax highlighter collaborator
pub trait Highlighter {
    /// Highlight code written in `language`, returning markup
    fn highlight(&self, code: &str, language: &str) -> String;

    /// Guess a language name from file content
    fn guess_language(&self, content: &str) -> Option<String>;
}

/// Documentation renderer collaborator
pub trait DocRenderer {
    /// Render documentation text with the given extensions enabled
    fn render(&self, docs: &str, extensions: &[DocExtension]) -> String;
}

/// Divider submitted between sections' code
pub fn divider_text(delimiter: &str) -> String {
    format!("\n{}{}\n", delimiter, DIVIDER)
}

/// Pattern matching the divider as a highlighter renders it
pub fn divider_html(delimiter: &str) -> Result<Regex> {
    let marker = regex::escape(&html_escape::encode_text(delimiter));
    compile(&format!(
        r#"\n*<span class="c1?">{}{}</span>\n*"#,
        marker, DIVIDER
    ))
}

/// Highlight every section's code, one fragment per section
///
/// Languages with a line comment are highlighted in a single call, with
/// dividers between sections. Others are highlighted section by section.
pub fn highlight_sections(
    language: &LanguageDefinition,
    sections: &[Section],
    highlighter: &dyn Highlighter,
) -> Result<Vec<String>> {
    if sections.is_empty() {
        return Ok(Vec::new());
    }

    let Some(delimiter) = language.inline_delimiter() else {
        return Ok(sections
            .iter()
            .map(|s| highlighter.highlight(&s.code, &language.name))
            .collect());
    };

    let codes: Vec<&str> = sections.iter().map(|s| s.code.as_str()).collect();
    let joined = codes.join(&divider_text(delimiter));
    let output = highlighter.highlight(&joined, &language.name);

    let fragments: Vec<String> = divider_html(delimiter)?
        .split(&output)
        .map(str::to_string)
        .collect();
    if fragments.len() != sections.len() {
        return Err(SidenoteError::DividerMismatch {
            language: language.name.clone(),
            expected: sections.len(),
            found: fragments.len(),
        });
    }
    Ok(fragments)
}

/// A section ready for the page template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSection {
    pub docs_html: String,
    pub code_html: String,
    pub anchor: Option<String>,
}

/// Render documentation and code of every section
///
/// A divider mismatch is logged and the file falls back to escaped,
/// unhighlighted code.
pub fn render_sections(
    language: &LanguageDefinition,
    sections: &[Section],
    highlighter: &dyn Highlighter,
    renderer: &dyn DocRenderer,
) -> Vec<RenderedSection> {
    let code_fragments = match highlight_sections(language, sections, highlighter) {
        Ok(fragments) => fragments,
        Err(e) => {
            log::warn!("{}; rendering code without highlighting", e);
            sections
                .iter()
                .map(|s| html_escape::encode_text(&s.code).into_owned())
                .collect()
        }
    };

    sections
        .iter()
        .zip(code_fragments)
        .map(|(section, code_html)| {
            let anchor = section.anchor().map(str::to_string);
            let code_html = match &anchor {
                Some(anchor) => format!("{}{}", anchor_markup(anchor), code_html),
                None => code_html,
            };
            RenderedSection {
                docs_html: renderer.render(&section.docs, &language.doc_extensions),
                code_html,
                anchor,
            }
        })
        .collect()
}

/// Highlighter that only escapes HTML
///
/// Divider comments are wrapped the way a real highlighter marks a comment,
/// so the divider protocol works without one.
#[derive(Debug, Clone, Copy, Default)]
pub struct EscapeHighlighter;

/// Shebang interpreters and the language they run
const INTERPRETERS: &[(&str, &str)] = &[
    ("python", "python"),
    ("ruby", "ruby"),
    ("perl", "perl"),
    ("lua", "lua"),
    ("tclsh", "tcl"),
    ("escript", "erlang"),
    ("node", "javascript"),
    ("coffee", "coffeescript"),
];

impl Highlighter for EscapeHighlighter {
    fn highlight(&self, code: &str, _language: &str) -> String {
        code.split_inclusive('\n')
            .map(|line| {
                let (text, newline) = match line.strip_suffix('\n') {
                    Some(text) => (text, "\n"),
                    None => (line, ""),
                };
                let escaped = html_escape::encode_text(text);
                if is_divider_line(text) {
                    format!("<span class=\"c1\">{}</span>{}", escaped, newline)
                } else {
                    format!("{}{}", escaped, newline)
                }
            })
            .collect()
    }

    fn guess_language(&self, content: &str) -> Option<String> {
        let content = content.trim_start();
        let first_line = content.lines().next()?;

        if let Some(command) = first_line.strip_prefix("#!") {
            return INTERPRETERS
                .iter()
                .find(|(interpreter, _)| command.contains(interpreter))
                .map(|(_, name)| name.to_string());
        }

        let name = if content.starts_with("<?php") {
            "php"
        } else if content.starts_with("(ns ") {
            "clojure"
        } else if content.starts_with("#lang") {
            "scheme"
        } else if content.starts_with("{-# LANGUAGE") {
            "haskell"
        } else {
            return None;
        };
        Some(name.to_string())
    }
}

/// Whether a line is a divider comment: a short delimiter then the marker
fn is_divider_line(line: &str) -> bool {
    line.strip_suffix(DIVIDER).is_some_and(|delimiter| {
        !delimiter.is_empty()
            && delimiter.len() <= 3
            && !delimiter.chars().any(|c| c.is_alphanumeric() || c.is_whitespace())
    })
}

/// Renderer that escapes documentation into paragraphs
///
/// Extensions are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainDocRenderer;

impl DocRenderer for PlainDocRenderer {
    fn render(&self, docs: &str, _extensions: &[DocExtension]) -> String {
        let mut paragraphs = Vec::new();
        let mut current: Vec<&str> = Vec::new();

        for line in docs.lines() {
            if line.trim().is_empty() {
                if !current.is_empty() {
                    paragraphs.push(current.join("\n"));
                    current.clear();
                }
            } else {
                current.push(line.trim_end());
            }
        }
        if !current.is_empty() {
            paragraphs.push(current.join("\n"));
        }

        paragraphs
            .iter()
            .map(|p| format!("<p>{}</p>", html_escape::encode_text(p)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
