//! Composable segmentation behaviour
//!
//! A capability owns some configuration (delimiters, patterns) and
//! contributes named passes at fixed points of the base pipeline. Languages
//! are built by adding capabilities in order, never by layering definitions
//! on top of each other.

use super::definition::LanguageDefinition;
use super::pipeline::{Pass, Placement};

/// A pass together with where it goes in the pipeline
#[derive(Debug, Clone, Copy)]
pub struct Contribution {
    pub placement: Placement,
    pub pass: Pass,
}

impl Contribution {
    pub const fn before(anchor: &'static str, pass: Pass) -> Self {
        Self {
            placement: Placement::Before(anchor),
            pass,
        }
    }

    pub const fn after(anchor: &'static str, pass: Pass) -> Self {
        Self {
            placement: Placement::After(anchor),
            pass,
        }
    }
}

/// A unit of segmentation behaviour
pub trait Capability {
    /// Name recorded on the language, e.g. "inline_comment"
    fn name(&self) -> &'static str;

    /// Store this capability's configuration on the language
    fn configure(&self, _language: &mut LanguageDefinition) {}

    /// Passes this capability adds, in the order they are placed
    fn passes(&self) -> Vec<Contribution>;
}
