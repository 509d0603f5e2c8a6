//! Clojure and ClojureScript language definition

use crate::error::Result;
use crate::language::comments::{Docstring, InlineComment};
use crate::language::definition::LanguageDefinition;
use crate::language::links::KeywordLink;
use crate::language::rules::{LinkRule, ScopeRule};
use crate::language::scopes::IndentBlock;
use crate::render::DocExtension;

/// Create Clojure language definition
pub fn clojure_language() -> Result<LanguageDefinition> {
    let mut lang = LanguageDefinition::new("Clojure");
    lang.add_alias("clojurescript");
    lang.add_extension("cljs");
    lang.add_extension("clj");

    // `(defn ^:private name`, `(defmacro name`, `(ns name`
    lang.add_scope_rule(ScopeRule::new(r"^[ \t]*\((def\S*)(?:\s+\^:\S*)*\s+[^\s\)]*")?);
    lang.add_scope_rule(ScopeRule::new(r"^[ \t]*\((ns)\s+[^\s\)]*")?);

    lang.add_capability(IndentBlock)?;
    lang.add_capability(InlineComment::new(";;"))?;
    lang.add_capability(Docstring::new()?)?;

    lang.add_capability(
        KeywordLink::new(vec![
            LinkRule::new(r"\s*\(def\S*(?:\s+\^:\S*)*\s+(?P<name>[^\s\)]+)", "${name}")?,
            LinkRule::new(r"\s*\(ns\s+(?P<name>[^\s\)]+)", "${name}")?,
        ])
        .with_prefix("_"),
    )?;

    // `other.ns/fn` references in docs link to that namespace's page
    lang.add_doc_extension(DocExtension::NamespaceLinks {
        pattern: r"\S+/".to_string(),
    });

    Ok(lang)
}
