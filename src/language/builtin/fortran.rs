//! Fortran language definition

use crate::error::Result;
use crate::language::comments::{BlockComment, InlineComment};
use crate::language::definition::LanguageDefinition;
use crate::language::rules::ScopeRule;
use crate::language::scopes::IndentBlock;

/// Create Fortran language definition
pub fn fortran_language() -> Result<LanguageDefinition> {
    let mut lang = LanguageDefinition::new("Fortran");
    lang.add_extension("f");
    lang.add_extension("f90");

    lang.add_scope_rule(ScopeRule::new(r"^[ \t]*(subroutine) ")?);
    lang.add_scope_rule(ScopeRule::new(r"^[ \t]*(function)")?);
    lang.add_scope_rule(ScopeRule::new(r"^[ \t]*(module)")?);
    lang.add_scope_rule(ScopeRule::new(r"^[ \t]*(program)")?);

    lang.add_capability(IndentBlock)?;
    // Fixed-form comment lines: `C` in the first column, to the end of the line
    lang.add_capability(BlockComment::in_first_column(r"[Cc](?:[ \t]|$)", "$")?)?;
    lang.add_capability(InlineComment::new("!"))?;

    Ok(lang)
}
