//! Language definitions for segmentation
//!
//! This module provides the LanguageDefinition struct that combines
//! file associations, comment syntax, scope rules and the pass pipeline
//! for a programming language.

use std::collections::BTreeMap;
use std::path::Path;

use super::capability::Capability;
use super::comments::{BlockComment, CommentDecoration, Docstring, InlineComment};
use super::passes::base_pipeline;
use super::pipeline::{Pass, Pipeline, Placement};
use super::rules::{LinkRule, ScopeRule};
use super::section::{filter_empty, Section};
use crate::error::Result;
use crate::render::{default_doc_extensions, DocExtension};

/// Suffix used for output files unless configured otherwise
pub const DEFAULT_OUTPUT_SUFFIX: &str = ".html";

/// Configuration consumed by the passes
///
/// Capabilities fill these in when they are added to a language.
#[derive(Debug, Clone, Default)]
pub struct Syntax {
    /// Line comment syntax
    pub inline: Option<InlineComment>,
    /// Block comment delimiter pairs
    pub block_comments: Vec<BlockComment>,
    /// Docstring syntax
    pub docstring: Option<Docstring>,
    /// Box-drawing decoration stripped from documentation
    pub decoration: Option<CommentDecoration>,
    /// Constructs that open a new named block
    pub scope_rules: Vec<ScopeRule>,
    /// Rules deriving cross-reference anchors
    pub link_rules: Vec<LinkRule>,
    /// Prepended to every anchor
    pub anchor_prefix: String,
    /// Scope label text marking a decorator
    pub decorator_marker: Option<String>,
}

/// How a language's files are segmented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageKind {
    /// Source code, run through the pipeline
    Source,
    /// Prose, the whole file is documentation
    Prose,
}

/// A complete language definition for segmentation
#[derive(Debug, Clone)]
pub struct LanguageDefinition {
    /// Language name (e.g., "Python", "C")
    pub name: String,
    /// Other names the language answers to (e.g., "coffeescript")
    pub aliases: Vec<String>,
    /// File extensions without the dot (e.g., ["py", "pyx"])
    pub extensions: Vec<String>,
    /// Exact file names with a fixed output name (e.g., "__init__.py" -> "index.html")
    pub filename_substitutes: BTreeMap<String, String>,
    /// Source or prose
    pub kind: LanguageKind,
    /// Configuration read by the passes
    pub syntax: Syntax,
    /// Documentation renderer extensions enabled for this language
    pub doc_extensions: Vec<DocExtension>,
    pipeline: Pipeline,
    capabilities: Vec<&'static str>,
}

impl LanguageDefinition {
    /// Create a source language with the base pipeline and no capabilities
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            aliases: Vec::new(),
            extensions: Vec::new(),
            filename_substitutes: BTreeMap::new(),
            kind: LanguageKind::Source,
            syntax: Syntax::default(),
            doc_extensions: default_doc_extensions(),
            pipeline: base_pipeline(),
            capabilities: Vec::new(),
        }
    }

    /// Create a prose language; files are documentation from top to bottom
    pub fn prose(name: &str) -> Self {
        Self {
            kind: LanguageKind::Prose,
            pipeline: Pipeline::default(),
            ..Self::new(name)
        }
    }

    /// Add a file extension
    pub fn add_extension(&mut self, ext: &str) {
        self.extensions
            .push(ext.trim_start_matches('.').to_lowercase());
    }

    /// Add another name for the language
    pub fn add_alias(&mut self, alias: &str) {
        self.aliases.push(alias.to_string());
    }

    /// Map an exact file name to a fixed output name
    pub fn add_filename_substitute(&mut self, filename: &str, output: &str) {
        self.filename_substitutes
            .insert(filename.to_string(), output.to_string());
    }

    /// Add a scope rule
    pub fn add_scope_rule(&mut self, rule: ScopeRule) {
        self.syntax.scope_rules.push(rule);
    }

    /// Enable a documentation renderer extension
    pub fn add_doc_extension(&mut self, extension: DocExtension) {
        if !self.doc_extensions.contains(&extension) {
            self.doc_extensions.push(extension);
        }
    }

    /// Add a capability
    ///
    /// The capability configures the language, then its passes are placed.
    /// Adding a second capability of the same kind only adds configuration.
    pub fn add_capability<C: Capability>(&mut self, capability: C) -> Result<()> {
        capability.configure(self);

        let name = capability.name();
        if self.capabilities.contains(&name) {
            return Ok(());
        }
        for contribution in capability.passes() {
            self.pipeline.place(contribution.placement, contribution.pass)?;
        }
        self.capabilities.push(name);
        Ok(())
    }

    /// Place a language-specific pass
    pub fn insert_pass(&mut self, placement: Placement, pass: Pass) -> Result<()> {
        self.pipeline.place(placement, pass)
    }

    /// Remove a pass the language does not want
    pub fn remove_pass(&mut self, name: &str) -> Result<()> {
        self.pipeline.remove(name)
    }

    /// Whether a capability was added
    pub fn has_capability(&self, name: &str) -> bool {
        self.capabilities.iter().any(|c| *c == name)
    }

    /// Capability names in the order they were added
    pub fn capabilities(&self) -> &[&'static str] {
        &self.capabilities
    }

    /// The pass pipeline
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Line comment delimiter, if the language has one
    pub fn inline_delimiter(&self) -> Option<&str> {
        self.syntax.inline.as_ref().map(|c| c.delimiter.as_str())
    }

    /// Whether `name` is this language's name or one of its aliases
    pub fn answers_to(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }

    /// Segment source text into documentation/code sections
    pub fn parse(&self, text: &str) -> Vec<Section> {
        let sections = match self.kind {
            LanguageKind::Prose => vec![Section::docs(text)],
            LanguageKind::Source => self.pipeline.run(&self.syntax, vec![Section::code(text)]),
        };
        let sections = filter_empty(sections);
        log::debug!("{}: {} sections", self.name, sections.len());
        sections
    }

    /// Output file name for a source file name
    pub fn transform_filename(&self, filename: &str) -> String {
        self.transform_filename_with(filename, DEFAULT_OUTPUT_SUFFIX)
    }

    /// Output file name for a source file name, with a custom suffix
    ///
    /// Exact substitutions win, then the language's extension is replaced by
    /// `suffix`. Anything else is returned unchanged.
    pub fn transform_filename_with(&self, filename: &str, suffix: &str) -> String {
        let path = Path::new(filename);
        if let Some(output) = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| self.filename_substitutes.get(name))
        {
            return path.with_file_name(output).to_string_lossy().into_owned();
        }

        for ext in &self.extensions {
            let dotted = format!(".{}", ext);
            let Some(cut) = filename.len().checked_sub(dotted.len()) else {
                continue;
            };
            if cut > 0
                && filename
                    .get(cut..)
                    .is_some_and(|tail| tail.eq_ignore_ascii_case(&dotted))
            {
                return format!("{}{}", &filename[..cut], suffix);
            }
        }

        filename.to_string()
    }
}
