//! Comment-only language definitions
//!
//! These languages get documentation from comments but no scope splitting;
//! sections follow the comment blocks.

use crate::error::Result;
use crate::language::comments::{BlockComment, InlineComment};
use crate::language::definition::LanguageDefinition;

/// Create Lua language definition
pub fn lua_language() -> Result<LanguageDefinition> {
    let mut lang = LanguageDefinition::new("Lua");
    lang.add_extension("lua");

    // `--[[` opens a block comment, not a line comment
    lang.add_capability(InlineComment::with_ignored("--", &[r"\[\[", r"\]\]"])?)?;
    lang.add_capability(BlockComment::new(r"--\[\[", r"(?:--)?\]\]")?)?;

    Ok(lang)
}

/// Create Erlang language definition
pub fn erlang_language() -> Result<LanguageDefinition> {
    let mut lang = LanguageDefinition::new("Erlang");
    lang.add_extension("erl");
    lang.add_capability(InlineComment::new("%%"))?;
    Ok(lang)
}

/// Create Tcl language definition
pub fn tcl_language() -> Result<LanguageDefinition> {
    let mut lang = LanguageDefinition::new("Tcl");
    lang.add_extension("tcl");
    lang.add_capability(InlineComment::new("#"))?;
    Ok(lang)
}

/// Create CoffeeScript language definition
pub fn coffeescript_language() -> Result<LanguageDefinition> {
    let mut lang = LanguageDefinition::new("Coffee-Script");
    lang.add_alias("CoffeeScript");
    lang.add_extension("coffee");

    // `###` delimits a block comment
    lang.add_capability(InlineComment::with_ignored("#", &["#"])?)?;
    lang.add_capability(BlockComment::new("###", "###")?)?;

    Ok(lang)
}

/// Create Perl language definition
pub fn perl_language() -> Result<LanguageDefinition> {
    let mut lang = LanguageDefinition::new("Perl");
    lang.add_extension("pl");
    lang.add_capability(InlineComment::with_ignored("#", &[r"!.+"])?)?;
    Ok(lang)
}

/// Create SQL language definition
pub fn sql_language() -> Result<LanguageDefinition> {
    let mut lang = LanguageDefinition::new("SQL");
    lang.add_extension("sql");
    lang.add_capability(InlineComment::new("--"))?;
    Ok(lang)
}

/// Create Scheme language definition
pub fn scheme_language() -> Result<LanguageDefinition> {
    let mut lang = LanguageDefinition::new("Scheme");
    lang.add_extension("scm");
    lang.add_capability(InlineComment::new(";;"))?;
    lang.add_capability(BlockComment::new(r"#\|", r"\|#")?)?;
    Ok(lang)
}
