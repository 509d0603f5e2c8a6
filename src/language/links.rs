//! Keyword links
//!
//! Attaches a cross-reference anchor to every section whose code starts with
//! a linkable declaration, so rendered pages can link straight to it.

use super::capability::{Capability, Contribution};
use super::definition::{LanguageDefinition, Syntax};
use super::passes::ABSORB;
use super::pipeline::Pass;
use super::rules::LinkRule;
use super::section::{Section, ANCHOR};
use crate::render::DocExtension;

pub const ADD_LINKS: &str = "add_links";

/// Derive anchors from declarations at the start of sections
#[derive(Debug, Clone)]
pub struct KeywordLink {
    /// Rules tried in order; the first match wins
    pub rules: Vec<LinkRule>,
    /// Prepended to every anchor
    pub prefix: String,
}

impl KeywordLink {
    pub fn new(rules: Vec<LinkRule>) -> Self {
        Self {
            rules,
            prefix: String::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }
}

impl Capability for KeywordLink {
    fn name(&self) -> &'static str {
        "keyword_link"
    }

    fn configure(&self, language: &mut LanguageDefinition) {
        language.syntax.link_rules.extend(self.rules.iter().cloned());
        language.syntax.anchor_prefix = self.prefix.clone();
        language.add_doc_extension(DocExtension::SectionLinks);
    }

    fn passes(&self) -> Vec<Contribution> {
        vec![Contribution::after(ABSORB, Pass::new(ADD_LINKS, add_links))]
    }
}

/// Attach an anchor to each section that starts with a linkable declaration
pub fn add_links(syntax: &Syntax, mut sections: Vec<Section>) -> Vec<Section> {
    for section in &mut sections {
        let anchor = syntax
            .link_rules
            .iter()
            .find_map(|rule| rule.anchor_for(&section.code));
        if let Some(anchor) = anchor {
            section
                .annotations
                .insert(ANCHOR.to_string(), format!("{}{}", syntax.anchor_prefix, anchor));
        }
    }
    sections
}

/// Markup placed in front of a section's rendered code
pub fn anchor_markup(anchor: &str) -> String {
    let id = html_escape::encode_double_quoted_attribute(anchor);
    format!("<a class=\"section-anchor\" id=\"{}\" href=\"#{}\"></a>", id, id)
}
