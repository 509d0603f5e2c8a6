//! Ruby language definition

use crate::error::Result;
use crate::language::comments::{BlockComment, InlineComment};
use crate::language::definition::LanguageDefinition;
use crate::language::rules::ScopeRule;
use crate::language::scopes::IndentBlock;

/// Create Ruby language definition
pub fn ruby_language() -> Result<LanguageDefinition> {
    let mut lang = LanguageDefinition::new("Ruby");
    lang.add_extension("rb");

    lang.add_scope_rule(ScopeRule::new(r"^[ \t]*(module) ")?);
    lang.add_scope_rule(ScopeRule::new(r"^[ \t]*(class) ")?);
    lang.add_scope_rule(ScopeRule::new(r"^[ \t]*(def) ")?);

    lang.add_capability(IndentBlock)?;
    lang.add_capability(InlineComment::new("#"))?;
    // TODO: heredoc (`<<-DOC`) and `__END__` documentation blocks
    lang.add_capability(BlockComment::new("=begin", "=end")?)?;

    Ok(lang)
}
