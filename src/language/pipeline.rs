//! Ordered, named segmentation passes
//!
//! A [`Pipeline`] is the list of passes a language runs over a file. Capability
//! units splice their passes in relative to the named passes of the base
//! pipeline while the language is being defined; afterwards it is only read.

use super::definition::Syntax;
use super::section::Section;
use crate::error::{Result, SidenoteError};

/// Signature shared by every pass: old section sequence in, new one out
pub type PassFn = fn(&Syntax, Vec<Section>) -> Vec<Section>;

/// A named pass
#[derive(Clone, Copy)]
pub struct Pass {
    /// Name used for insertion points and logging
    pub name: &'static str,
    /// The transformation itself
    pub run: PassFn,
}

impl Pass {
    /// Create a named pass
    pub const fn new(name: &'static str, run: PassFn) -> Self {
        Self { name, run }
    }
}

impl std::fmt::Debug for Pass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

/// Where a contributed pass goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Immediately before the first pass with this name
    Before(&'static str),
    /// Immediately after the first pass with this name
    After(&'static str),
}

/// Ordered list of passes
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    passes: Vec<Pass>,
}

impl Pipeline {
    /// Create a pipeline from passes in order
    pub fn new(passes: Vec<Pass>) -> Self {
        Self { passes }
    }

    fn position(&self, name: &str) -> Result<usize> {
        self.passes
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| SidenoteError::UnknownPass(name.to_string()))
    }

    /// Insert a pass before the first pass named `anchor`
    pub fn insert_before(&mut self, anchor: &str, pass: Pass) -> Result<()> {
        let idx = self.position(anchor)?;
        self.passes.insert(idx, pass);
        Ok(())
    }

    /// Insert a pass after the first pass named `anchor`
    pub fn insert_after(&mut self, anchor: &str, pass: Pass) -> Result<()> {
        let idx = self.position(anchor)?;
        self.passes.insert(idx + 1, pass);
        Ok(())
    }

    /// Insert a pass at the given placement
    pub fn place(&mut self, placement: Placement, pass: Pass) -> Result<()> {
        match placement {
            Placement::Before(anchor) => self.insert_before(anchor, pass),
            Placement::After(anchor) => self.insert_after(anchor, pass),
        }
    }

    /// Remove every pass named `name`
    pub fn remove(&mut self, name: &str) -> Result<()> {
        self.position(name)?;
        self.passes.retain(|p| p.name != name);
        Ok(())
    }

    /// Pass names in execution order
    pub fn names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|p| p.name).collect()
    }

    /// Whether a pass with this name is present
    pub fn contains(&self, name: &str) -> bool {
        self.passes.iter().any(|p| p.name == name)
    }

    /// Run every pass in order
    pub fn run(&self, syntax: &Syntax, mut sections: Vec<Section>) -> Vec<Section> {
        for pass in &self.passes {
            sections = (pass.run)(syntax, sections);
            log::trace!("{}: {} sections", pass.name, sections.len());
        }
        sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &Syntax, sections: Vec<Section>) -> Vec<Section> {
        sections
    }

    fn append_x(_: &Syntax, mut sections: Vec<Section>) -> Vec<Section> {
        sections.push(Section::code("x"));
        sections
    }

    fn pipeline() -> Pipeline {
        Pipeline::new(vec![
            Pass::new("a", noop),
            Pass::new("b", noop),
            Pass::new("a", noop),
        ])
    }

    #[test]
    fn test_insert_before_first_occurrence() {
        let mut p = pipeline();
        p.insert_before("a", Pass::new("pre", noop)).unwrap();
        assert_eq!(p.names(), vec!["pre", "a", "b", "a"]);
    }

    #[test]
    fn test_insert_after() {
        let mut p = pipeline();
        p.insert_after("b", Pass::new("post", noop)).unwrap();
        assert_eq!(p.names(), vec!["a", "b", "post", "a"]);
    }

    #[test]
    fn test_remove_all_occurrences() {
        let mut p = pipeline();
        p.remove("a").unwrap();
        assert_eq!(p.names(), vec!["b"]);
    }

    #[test]
    fn test_unknown_anchor() {
        let mut p = pipeline();
        assert!(matches!(
            p.insert_before("missing", Pass::new("x", noop)),
            Err(SidenoteError::UnknownPass(name)) if name == "missing"
        ));
        assert!(p.remove("missing").is_err());
    }

    #[test]
    fn test_run_in_order() {
        let p = Pipeline::new(vec![Pass::new("one", append_x), Pass::new("two", append_x)]);
        let out = p.run(&Syntax::default(), Vec::new());
        assert_eq!(out.len(), 2);
    }
}
