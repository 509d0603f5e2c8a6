//! Haskell language definition
//!
//! Haskell is indentation-significant, but splitting on indentation breaks
//! Haddock documentation apart. Sections follow the comments instead.

use crate::error::Result;
use crate::language::comments::{BlockComment, InlineComment};
use crate::language::definition::LanguageDefinition;
use crate::render::DocExtension;

/// Create Haskell language definition
pub fn haskell_language() -> Result<LanguageDefinition> {
    let mut lang = LanguageDefinition::new("Haskell");
    lang.add_extension("hs");

    // Haddock chapter headings (`-- * Section`) stay code
    lang.add_capability(InlineComment::with_ignored("--", &[r"( (\*)* .*)"])?)?;

    // Pragmas: `{-# LANGUAGE ... #-}`
    lang.add_capability(BlockComment::new(r"\{-", r"-\}")?.ignoring("#", "#"))?;

    lang.add_doc_extension(DocExtension::Haddock);

    Ok(lang)
}
