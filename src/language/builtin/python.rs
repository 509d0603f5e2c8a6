//! Python language definition

use crate::error::Result;
use crate::language::comments::{BlockComment, InlineComment};
use crate::language::definition::LanguageDefinition;
use crate::language::links::KeywordLink;
use crate::language::rules::{LinkRule, ScopeRule};
use crate::language::scopes::{DecoratorMerge, IndentBlock};

/// Create Python language definition
pub fn python_language() -> Result<LanguageDefinition> {
    let mut lang = LanguageDefinition::new("Python");
    lang.add_alias("python3");
    lang.add_extension("py");
    lang.add_extension("pyx");

    // Package modules serve as the index of their directory
    lang.add_filename_substitute("__init__.py", "index.html");

    lang.add_scope_rule(ScopeRule::new(r"^[ \t]*(?:async[ \t]+)?(def) ")?);
    lang.add_scope_rule(ScopeRule::new(r"^[ \t]*(class) ")?);
    lang.add_scope_rule(ScopeRule::new(r"^[ \t]*(@\w+)")?);

    lang.add_capability(IndentBlock)?;

    // Docstrings, both quote styles
    lang.add_capability(BlockComment::new(r#"""""#, r#"""""#)?)?;
    lang.add_capability(BlockComment::new("'''", "'''")?)?;

    // Shebangs and encoding declarations stay code
    lang.add_capability(InlineComment::with_ignored(
        "#",
        &[r"!.+", r"\s*-\*-\s*coding:.+\s*-\*-"],
    )?)?;

    lang.add_capability(DecoratorMerge::new("@"))?;

    // Decorators are merged in front of their declaration
    let decorators = r"(?:[ \t]*@[^\n]*\n)*";
    let def = format!(r"\s*{}[ \t]*(?:async[ \t]+)?def\s+(?P<name>\w+)", decorators);
    let class = format!(r"\s*{}[ \t]*class\s+(?P<name>\w+)", decorators);
    lang.add_capability(KeywordLink::new(vec![
        LinkRule::new(&def, "${name}")?,
        LinkRule::new(&class, "${name}")?,
    ]))?;

    Ok(lang)
}
