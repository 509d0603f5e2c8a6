//! Language-agnostic passes
//!
//! The base pipeline every source language starts from. Merges change which
//! sections are adjacent, so levels are recomputed before each merge pass.

use super::definition::Syntax;
use super::pipeline::{Pass, Pipeline};
use super::section::{merge, Section};

pub const SET_SECTIONS_LEVELS: &str = "set_sections_levels";
pub const STRIP_DOCS_INDENTATION: &str = "strip_docs_indentation";
pub const MERGE_UP: &str = "merge_up";
pub const MERGE_DOWN: &str = "merge_down";
pub const ABSORB: &str = "absorb";

/// The base pipeline, before any capability contributes to it
pub fn base_pipeline() -> Pipeline {
    let levels = Pass::new(SET_SECTIONS_LEVELS, set_sections_levels);
    Pipeline::new(vec![
        levels,
        Pass::new(STRIP_DOCS_INDENTATION, strip_docs_indentation),
        levels,
        Pass::new(MERGE_UP, merge_up),
        levels,
        Pass::new(MERGE_DOWN, merge_down),
        levels,
        Pass::new(ABSORB, absorb),
    ])
}

/// Width of the leading spaces and tabs of the first non-blank line
pub fn indent_width(text: &str) -> usize {
    leading_indent(text).len()
}

/// Leading spaces and tabs of the first non-blank line
pub(crate) fn leading_indent(text: &str) -> &str {
    text.lines()
        .find(|line| !line.trim().is_empty())
        .map_or("", |line| {
            let rest = line.trim_start_matches([' ', '\t']);
            &line[..line.len() - rest.len()]
        })
}

/// Merge each section into the one before it while `should_merge` holds
pub(crate) fn fold_adjacent<P, C>(
    sections: Vec<Section>,
    mut should_merge: P,
    combine: C,
) -> Vec<Section>
where
    P: FnMut(&Section, &Section) -> bool,
    C: Fn(Section, Section) -> Section,
{
    let mut out: Vec<Section> = Vec::with_capacity(sections.len());
    for section in sections {
        match out.pop() {
            Some(prev) if should_merge(&prev, &section) => out.push(combine(prev, section)),
            Some(prev) => {
                out.push(prev);
                out.push(section);
            }
            None => out.push(section),
        }
    }
    out
}

/// Set each section's level from its code's indentation
///
/// Sections without code inherit the level of the section before them.
pub fn set_sections_levels(_: &Syntax, mut sections: Vec<Section>) -> Vec<Section> {
    let mut previous = 0;
    for section in &mut sections {
        if section.has_code() {
            section.level = indent_width(&section.code);
        } else {
            section.level = previous;
        }
        previous = section.level;
    }
    sections
}

/// Left-align documentation regardless of how deeply it was nested
pub fn strip_docs_indentation(_: &Syntax, mut sections: Vec<Section>) -> Vec<Section> {
    for section in &mut sections {
        let indent = leading_indent(&section.docs);
        if indent.is_empty() {
            continue;
        }
        let indent = indent.to_string();
        section.docs = section
            .docs
            .split_inclusive('\n')
            .map(|line| line.strip_prefix(indent.as_str()).unwrap_or(line))
            .collect();
    }
    sections
}

/// Whether the last code line opens a scope
fn opens_scope(syntax: &Syntax, code: &str) -> bool {
    let Some(last_line) = code.trim().lines().last() else {
        return false;
    };
    let last_line = last_line.trim();
    syntax.scope_rules.iter().any(|rule| rule.matches_line(last_line))
}

/// Pull documentation written just inside a new scope up into it
pub fn merge_up(syntax: &Syntax, sections: Vec<Section>) -> Vec<Section> {
    fold_adjacent(
        sections,
        |prev, section| {
            !section.has_code()
                && !prev.has_docs()
                && prev.has_code()
                && opens_scope(syntax, &prev.code)
        },
        merge_keeping_scope,
    )
}

/// Attach code to the documentation written just above it
pub fn merge_down(_: &Syntax, sections: Vec<Section>) -> Vec<Section> {
    fold_adjacent(
        sections,
        |prev, section| {
            !prev.has_code() && prev.has_docs() && !section.has_docs() && section.has_code()
        },
        merge,
    )
}

/// Fold undocumented, more deeply indented code into the enclosing block
pub fn absorb(_: &Syntax, sections: Vec<Section>) -> Vec<Section> {
    fold_adjacent(
        sections,
        |prev, section| !section.has_docs() && section.level > prev.level,
        |mut prev, section| {
            if !prev.code.is_empty() && !prev.code.ends_with('\n') {
                prev.code.push('\n');
            }
            prev.code.push_str(&section.code);
            prev.annotations.extend(section.annotations);
            prev
        },
    )
}

fn merge_keeping_scope(prev: Section, section: Section) -> Section {
    let scope = prev.scope.clone();
    let mut merged = merge(prev, section);
    if scope.is_some() {
        merged.scope = scope;
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::rules::ScopeRule;

    fn python_syntax() -> Syntax {
        let mut syntax = Syntax::default();
        syntax.scope_rules.push(ScopeRule::new(r"^[ \t]*(def) ").unwrap());
        syntax.scope_rules.push(ScopeRule::new(r"^[ \t]*(class) ").unwrap());
        syntax
    }

    #[test]
    fn test_indent_width() {
        assert_eq!(indent_width("    x"), 4);
        assert_eq!(indent_width("\n\n\t y\n"), 2);
        assert_eq!(indent_width("x\n    y"), 0);
        assert_eq!(indent_width(""), 0);
    }

    #[test]
    fn test_levels_inherit_for_docs() {
        let sections = vec![
            Section::code("  a\n"),
            Section::docs("doc"),
            Section::code("\n\n      b\n"),
        ];
        let out = set_sections_levels(&Syntax::default(), sections);
        let levels: Vec<usize> = out.iter().map(|s| s.level).collect();
        assert_eq!(levels, vec![2, 2, 6]);
    }

    #[test]
    fn test_strip_docs_indentation() {
        let out = strip_docs_indentation(
            &Syntax::default(),
            vec![Section::docs("    Summary.\n\n    More.\n      nested\n")],
        );
        assert_eq!(out[0].docs, "Summary.\n\nMore.\n  nested\n");
    }

    #[test]
    fn test_merge_up_requires_scope_opener() {
        let syntax = python_syntax();

        let out = merge_up(&syntax, vec![Section::code("def f():\n"), Section::docs("doc\n")]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].docs, "doc\n");
        assert_eq!(out[0].code, "def f():\n");

        let out = merge_up(&syntax, vec![Section::code("x = 1\n"), Section::docs("doc\n")]);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_merge_up_keeps_existing_docs_apart() {
        let mut prev = Section::code("def f():\n");
        prev.docs = "earlier".to_string();
        let out = merge_up(&python_syntax(), vec![prev, Section::docs("doc\n")]);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_merge_down() {
        let mut code = Section::code("class A:\n");
        code.scope = Some("class".to_string());
        let out = merge_down(&Syntax::default(), vec![Section::docs("doc\n"), code]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].docs, "doc\n");
        assert_eq!(out[0].code, "class A:\n");
        assert_eq!(out[0].scope.as_deref(), Some("class"));
    }

    #[test]
    fn test_merge_down_skips_documented_code() {
        let mut documented = Section::code("x\n");
        documented.docs = "other".to_string();
        let out = merge_down(&Syntax::default(), vec![Section::docs("doc\n"), documented]);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_absorb_chain() {
        let syntax = Syntax::default();
        let sections = set_sections_levels(
            &syntax,
            vec![
                Section::code("def f():"),
                Section::code("    a = 1\n"),
                Section::code("        b = 2\n"),
                Section::code("def g():\n"),
            ],
        );
        let out = absorb(&syntax, sections);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].code, "def f():\n    a = 1\n        b = 2\n");
        assert_eq!(out[1].code, "def g():\n");
    }

    #[test]
    fn test_absorb_leaves_documented_sections() {
        let syntax = Syntax::default();
        let mut nested = Section::code("    a = 1\n");
        nested.docs = "doc".to_string();
        let sections = set_sections_levels(&syntax, vec![Section::code("def f():\n"), nested]);
        assert_eq!(absorb(&syntax, sections).len(), 2);
    }

    #[test]
    fn test_base_pipeline_order() {
        assert_eq!(
            base_pipeline().names(),
            vec![
                SET_SECTIONS_LEVELS,
                STRIP_DOCS_INDENTATION,
                SET_SECTIONS_LEVELS,
                MERGE_UP,
                SET_SECTIONS_LEVELS,
                MERGE_DOWN,
                SET_SECTIONS_LEVELS,
                ABSORB,
            ]
        );
    }
}
