//! C family language definitions (C/C++, JavaScript, PHP)

use crate::error::Result;
use crate::language::comments::{BlockComment, CommentDecoration, InlineComment};
use crate::language::definition::LanguageDefinition;
use crate::language::passes::MERGE_UP;
use crate::language::rules::ScopeRule;
use crate::language::scopes::BraceBlock;

/// Declaration keywords that open a block in C and C++
const C_SCOPE_KEYWORDS: &[&str] = &[
    "class",
    "function",
    "namespace",
    "public",
    "private",
    "protected",
    "abstract",
    "inline",
    "virtual",
    "void",
    "int",
    "double",
    "bool",
    "float",
];

/// Comment handling shared by the whole family
fn c_family(name: &str, scope_rules: Vec<ScopeRule>) -> Result<LanguageDefinition> {
    let mut lang = LanguageDefinition::new(name);
    for rule in scope_rules {
        lang.add_scope_rule(rule);
    }

    lang.add_capability(BraceBlock)?;
    lang.add_capability(InlineComment::new("//"))?;
    lang.add_capability(BlockComment::new(r"/\*+", r"\*+/")?)?;
    lang.add_capability(CommentDecoration::new()?)?;

    Ok(lang)
}

/// Create C language definition (also works for C++)
pub fn c_language() -> Result<LanguageDefinition> {
    let keywords = C_SCOPE_KEYWORDS.join("|");
    let mut lang = c_family("C", vec![ScopeRule::new(&format!(r"^[ \t]*({}) \w+", keywords))?])?;
    lang.add_alias("c++");
    lang.add_alias("cpp");
    lang.add_extension("c");
    lang.add_extension("cpp");
    lang.add_extension("h");
    lang.add_extension("cc");
    Ok(lang)
}

/// Create JavaScript language definition
///
/// Fewer declaration keywords than C, but functions can be defined inside
/// any expression (`name = function(args) { ... }`).
pub fn javascript_language() -> Result<LanguageDefinition> {
    let mut lang = c_family(
        "JavaScript",
        vec![
            ScopeRule::new(r"^[ \t]*(class)\b")?,
            ScopeRule::new(r"^.*(function)[ \t]*\(")?,
        ],
    )?;
    lang.add_alias("js");
    lang.add_extension("js");
    Ok(lang)
}

/// Create PHP language definition
///
/// PHP code keeps comments after a declaration apart from it.
pub fn php_language() -> Result<LanguageDefinition> {
    let keywords = C_SCOPE_KEYWORDS.join("|");
    let mut lang = c_family("PHP", vec![ScopeRule::new(&format!(r"^[ \t]*({}) \w+", keywords))?])?;
    lang.add_extension("php");
    lang.remove_pass(MERGE_UP)?;
    Ok(lang)
}
