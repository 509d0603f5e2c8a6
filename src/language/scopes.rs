//! Block-boundary capabilities
//!
//! Indentation-based and brace-based languages find the start of the next
//! block differently, but both cut sections at scope keywords and label the
//! new section with the keyword they cut on.

use std::collections::VecDeque;

use super::capability::{Capability, Contribution};
use super::definition::{LanguageDefinition, Syntax};
use super::passes::{fold_adjacent, indent_width, ABSORB, MERGE_UP};
use super::pipeline::Pass;
use super::rules::{find_scope, ScopeRule};
use super::section::{merge, split_by_position, Section};

pub const SPLIT_BY_SCOPES: &str = "split_by_scopes";
pub const MERGE_DECORATORS: &str = "merge_decorators";

/// Split sections until no split applies
///
/// `split` returns the section unchanged or cut into pieces. The first piece
/// is final; the remaining pieces are split again, in order.
fn split_each<F>(sections: Vec<Section>, split: F) -> Vec<Section>
where
    F: Fn(Section) -> Vec<Section>,
{
    let mut queue: VecDeque<Section> = sections.into();
    let mut out = Vec::with_capacity(queue.len());

    while let Some(section) = queue.pop_front() {
        let mut parts = split(section).into_iter();
        if let Some(head) = parts.next() {
            out.push(head);
        }
        for part in parts.rev() {
            queue.push_front(part);
        }
    }

    out
}

/// Offset of the first non-blank line
fn first_content_offset(code: &str) -> usize {
    let mut offset = 0;
    for line in code.split_inclusive('\n') {
        if !line.trim().is_empty() {
            return offset;
        }
        offset += line.len();
    }
    offset
}

/// Offset of the first line indented less than the section's first line
fn dedent_boundary(code: &str) -> Option<usize> {
    let mut base = None;
    let mut offset = 0;

    for line in code.split_inclusive('\n') {
        if !line.trim().is_empty() {
            let width = indent_width(line);
            match base {
                None => base = Some(width),
                Some(base) if width < base => return Some(offset),
                Some(_) => {}
            }
        }
        offset += line.len();
    }

    None
}

/// Cut a section at the next scope keyword that is not its own
///
/// A keyword on the section's first non-blank line labels the section
/// itself and the search moves past it.
fn split_at_next_scope(rules: &[ScopeRule], mut section: Section) -> Vec<Section> {
    if rules.is_empty() || !section.has_code() {
        return vec![section];
    }

    let first_line = first_content_offset(&section.code);
    let mut found = find_scope(rules, &section.code, 0);

    if let Some(own) = found.clone().filter(|m| m.start <= first_line) {
        section.scope = Some(own.label);
        found = find_scope(rules, &section.code, own.end.max(first_line + 1));
    }

    let Some(next) = found else {
        return vec![section];
    };
    let (head, mut tail) = split_by_position(section, next.start);
    tail.scope = Some(next.label);
    vec![head, tail]
}

/// Indentation-significant languages (Python, Ruby...)
#[derive(Debug, Clone, Copy, Default)]
pub struct IndentBlock;

impl Capability for IndentBlock {
    fn name(&self) -> &'static str {
        "indent_block"
    }

    fn passes(&self) -> Vec<Contribution> {
        vec![Contribution::before(
            MERGE_UP,
            Pass::new(SPLIT_BY_SCOPES, split_by_indented_scopes),
        )]
    }
}

/// Split at dedents and at scope keywords
pub fn split_by_indented_scopes(syntax: &Syntax, sections: Vec<Section>) -> Vec<Section> {
    split_each(sections, |section| {
        let Some(pos) = dedent_boundary(&section.code) else {
            return split_at_next_scope(&syntax.scope_rules, section);
        };

        let (head, mut tail) = split_by_position(section, pos);
        tail.level = indent_width(&tail.code);
        let mut parts = split_at_next_scope(&syntax.scope_rules, head);
        parts.push(tail);
        parts
    })
}

/// Brace-delimited languages (C, JavaScript...)
#[derive(Debug, Clone, Copy, Default)]
pub struct BraceBlock;

impl Capability for BraceBlock {
    fn name(&self) -> &'static str {
        "brace_block"
    }

    fn passes(&self) -> Vec<Contribution> {
        vec![Contribution::before(
            MERGE_UP,
            Pass::new(SPLIT_BY_SCOPES, split_by_keyword_scopes),
        )]
    }
}

/// Split at scope keywords only
pub fn split_by_keyword_scopes(syntax: &Syntax, sections: Vec<Section>) -> Vec<Section> {
    split_each(sections, |section| split_at_next_scope(&syntax.scope_rules, section))
}

/// Decorators attach to the declaration below them
#[derive(Debug, Clone)]
pub struct DecoratorMerge {
    /// Text in a scope label that marks a decorator, e.g. "@"
    pub marker: String,
}

impl DecoratorMerge {
    pub fn new(marker: &str) -> Self {
        Self {
            marker: marker.to_string(),
        }
    }
}

impl Capability for DecoratorMerge {
    fn name(&self) -> &'static str {
        "decorator_merge"
    }

    fn configure(&self, language: &mut LanguageDefinition) {
        language.syntax.decorator_marker = Some(self.marker.clone());
    }

    fn passes(&self) -> Vec<Contribution> {
        vec![Contribution::before(
            ABSORB,
            Pass::new(MERGE_DECORATORS, merge_decorators),
        )]
    }
}

/// Merge decorator sections forward into the section that follows
///
/// The merged section takes the following section's scope, even when it has
/// none, so each decorator absorbs exactly one section.
pub fn merge_decorators(syntax: &Syntax, sections: Vec<Section>) -> Vec<Section> {
    let Some(marker) = syntax.decorator_marker.as_deref() else {
        return sections;
    };
    fold_adjacent(
        sections,
        |prev, _| prev.scope.as_deref().is_some_and(|scope| scope.contains(marker)),
        |decorator, next| {
            let scope = next.scope.clone();
            Section {
                scope,
                ..merge(decorator, next)
            }
        },
    )
}
