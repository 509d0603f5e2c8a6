//! Segmentation engine
//!
//! This module turns source text into documentation/code sections:
//! - Section primitives (split, merge, filter)
//! - The named pass pipeline and the base passes
//! - Capability units languages are composed from
//! - Built-in language definitions

pub mod builtin;
pub mod capability;
pub mod comments;
pub mod definition;
pub mod links;
pub mod passes;
pub mod pipeline;
pub mod rules;
pub mod scopes;
pub mod section;

pub use capability::{Capability, Contribution};
pub use comments::{BlockComment, CommentDecoration, Docstring, InlineComment};
pub use definition::{LanguageDefinition, LanguageKind, Syntax, DEFAULT_OUTPUT_SUFFIX};
pub use links::{anchor_markup, KeywordLink};
pub use pipeline::{Pass, PassFn, Pipeline, Placement};
pub use rules::{LinkRule, ScopeRule};
pub use scopes::{BraceBlock, DecoratorMerge, IndentBlock};
pub use section::{filter_empty, merge, split_by_pattern, split_by_position, Section, SectionFlag};
