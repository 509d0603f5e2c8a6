//! Plain text and Markdown definitions

use crate::language::definition::LanguageDefinition;

/// Create plain text language definition
pub fn plain_text_language() -> LanguageDefinition {
    let mut lang = LanguageDefinition::prose("PlainText");
    lang.add_alias("text");
    lang.add_extension("txt");
    lang.add_filename_substitute("index.txt", "index.html");
    lang
}

/// Create Markdown language definition
pub fn markdown_language() -> LanguageDefinition {
    let mut lang = LanguageDefinition::prose("Markdown");
    lang.add_extension("md");
    lang.add_extension("markdown");
    lang.add_filename_substitute("index.md", "index.html");
    lang
}
