//! Language registry
//!
//! This module provides the Registry that maps file extensions to language
//! definitions and resolves the language of a source file.

use std::collections::HashMap;
use std::path::Path;

use crate::config::Config;
use crate::error::{Result, SidenoteError};
use crate::language::builtin;
use crate::language::LanguageDefinition;
use crate::render::Highlighter;

/// Extension-indexed set of language definitions
///
/// Built once, then only read.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    /// Loaded language definitions, by name
    languages: HashMap<String, LanguageDefinition>,
    /// Extension to language name mapping
    extension_map: HashMap<String, String>,
}

impl Registry {
    /// Create a registry with the built-in languages
    pub fn builtin() -> Result<Self> {
        Self::with_languages(builtin::all_languages()?)
    }

    /// Create a registry from the given languages
    pub fn with_languages(languages: Vec<LanguageDefinition>) -> Result<Self> {
        let mut registry = Self::default();
        for lang in languages {
            registry.add_language(lang)?;
        }
        Ok(registry)
    }

    /// Create a registry with the built-in languages and configured extensions
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut registry = Self::builtin()?;
        for (ext, name) in &config.extensions {
            registry.alias_extension(ext, name)?;
        }
        Ok(registry)
    }

    /// Claim an extension for a language, failing if another language has it
    fn claim(&self, ext: &str, name: &str) -> Result<()> {
        match self.extension_map.get(ext) {
            Some(owner) if owner != name => Err(SidenoteError::DuplicateExtension {
                extension: ext.to_string(),
                first: owner.clone(),
                second: name.to_string(),
            }),
            _ => Ok(()),
        }
    }

    /// Add a language definition
    pub fn add_language(&mut self, lang: LanguageDefinition) -> Result<()> {
        for ext in &lang.extensions {
            self.claim(ext, &lang.name)?;
        }

        let name = lang.name.clone();
        for ext in &lang.extensions {
            self.extension_map.insert(ext.clone(), name.clone());
        }
        log::debug!("registered {} ({})", name, lang.extensions.join(", "));
        self.languages.insert(name, lang);
        Ok(())
    }

    /// Map another extension to an existing language
    pub fn alias_extension(&mut self, ext: &str, language: &str) -> Result<()> {
        let name = self
            .by_name(language)
            .map(|lang| lang.name.clone())
            .ok_or_else(|| SidenoteError::UnknownLanguage(language.to_string()))?;
        let ext = ext.trim_start_matches('.').to_lowercase();
        self.claim(&ext, &name)?;

        if let Some(lang) = self.languages.get_mut(&name) {
            if !lang.extensions.contains(&ext) {
                lang.add_extension(&ext);
            }
        }
        self.extension_map.insert(ext, name);
        Ok(())
    }

    /// Get a language definition by name or alias, ignoring case
    pub fn by_name(&self, name: &str) -> Option<&LanguageDefinition> {
        self.languages
            .get(name)
            .or_else(|| self.languages.values().find(|lang| lang.answers_to(name)))
    }

    /// Detect language from filename
    pub fn detect_language(&self, filename: &Path) -> Option<&LanguageDefinition> {
        let ext = filename.extension()?.to_str()?.to_lowercase();
        let name = self.extension_map.get(&ext)?;
        self.languages.get(name)
    }

    /// Resolve the language of a source file
    ///
    /// A forced name wins and must exist. Otherwise the extension decides,
    /// then the guesser's verdict on the content. `Ok(None)` means the file
    /// is not in a known language.
    pub fn lookup(
        &self,
        filename: &str,
        content: Option<&str>,
        forced: Option<&str>,
        guesser: Option<&dyn Highlighter>,
    ) -> Result<Option<&LanguageDefinition>> {
        if let Some(forced) = forced {
            return self
                .by_name(forced)
                .map(Some)
                .ok_or_else(|| SidenoteError::UnknownLanguage(forced.to_string()));
        }

        if let Some(lang) = self.detect_language(Path::new(filename)) {
            return Ok(Some(lang));
        }

        let guessed = content
            .zip(guesser)
            .and_then(|(content, guesser)| guesser.guess_language(content));
        let Some(guessed) = guessed else {
            log::debug!("{}: no language", filename);
            return Ok(None);
        };

        let lang = self.by_name(&guessed);
        log::debug!(
            "{}: content looks like {}, {}",
            filename,
            guessed,
            if lang.is_some() { "supported" } else { "unsupported" }
        );
        Ok(lang)
    }

    /// List available languages
    pub fn list_languages(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.languages.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::EscapeHighlighter;
    use rstest::rstest;

    fn registry() -> Registry {
        Registry::builtin().unwrap()
    }

    #[rstest]
    #[case("main.py", Some("Python"))]
    #[case("lib/core.PYX", Some("Python"))]
    #[case("main.c", Some("C"))]
    #[case("main.cc", Some("C"))]
    #[case("app.js", Some("JavaScript"))]
    #[case("index.php", Some("PHP"))]
    #[case("solver.f90", Some("Fortran"))]
    #[case("Main.hs", Some("Haskell"))]
    #[case("core.cljs", Some("Clojure"))]
    #[case("app.coffee", Some("Coffee-Script"))]
    #[case("notes.txt", Some("PlainText"))]
    #[case("README.md", Some("Markdown"))]
    #[case("no_extension", None)]
    #[case("archive.zip", None)]
    fn test_detect_language(#[case] filename: &str, #[case] expected: Option<&str>) {
        let registry = registry();
        let found = registry.detect_language(Path::new(filename)).map(|l| l.name.as_str());
        assert_eq!(found, expected);
    }

    #[rstest]
    #[case("python")]
    #[case("PYTHON")]
    #[case("coffeescript")]
    #[case("clojurescript")]
    fn test_by_name_ignores_case(#[case] name: &str) {
        assert!(registry().by_name(name).is_some());
    }

    #[test]
    fn test_duplicate_extension() {
        let mut other = LanguageDefinition::new("Snake");
        other.add_extension("py");
        let mut registry = registry();
        assert!(matches!(
            registry.add_language(other),
            Err(SidenoteError::DuplicateExtension { extension, first, second })
                if extension == "py" && first == "Python" && second == "Snake"
        ));
        assert_eq!(
            registry.detect_language(Path::new("a.py")).map(|l| l.name.as_str()),
            Some("Python")
        );
    }

    #[test]
    fn test_lookup_forced() {
        let registry = registry();
        let lang = registry.lookup("a.c", None, Some("ruby"), None).unwrap();
        assert_eq!(lang.map(|l| l.name.as_str()), Some("Ruby"));
        assert!(matches!(
            registry.lookup("a.c", None, Some("cobol"), None),
            Err(SidenoteError::UnknownLanguage(name)) if name == "cobol"
        ));
    }

    #[test]
    fn test_lookup_guesses_from_content() {
        let registry = registry();
        let guesser = EscapeHighlighter;
        let lang = registry
            .lookup("script", Some("#!/usr/bin/env ruby\nputs 1\n"), None, Some(&guesser))
            .unwrap();
        assert_eq!(lang.map(|l| l.name.as_str()), Some("Ruby"));

        let lang = registry
            .lookup("data.bin", Some("\u{0}\u{1}"), None, Some(&guesser))
            .unwrap();
        assert!(lang.is_none());
        assert!(registry.lookup("script", Some("puts 1"), None, None).unwrap().is_none());
    }

    #[test]
    fn test_from_config() {
        let config = Config::from_toml_str("[extensions]\npyi = \"python\"\n").unwrap();
        let registry = Registry::from_config(&config).unwrap();
        let lang = registry.detect_language(Path::new("stubs.pyi")).unwrap();
        assert_eq!(lang.name, "Python");
        assert_eq!(lang.transform_filename("stubs.pyi"), "stubs.html");

        let config = Config::from_toml_str("[extensions]\npy = \"Ruby\"\n").unwrap();
        assert!(Registry::from_config(&config).is_err());

        let config = Config::from_toml_str("[extensions]\nx = \"Nope\"\n").unwrap();
        assert!(matches!(
            Registry::from_config(&config),
            Err(SidenoteError::UnknownLanguage(_))
        ));
    }

    #[test]
    fn test_list_languages() {
        let registry = registry();
        let names = registry.list_languages();
        assert_eq!(names.len(), 17);
        assert_eq!(names[0], "C");
        assert!(names.contains(&"Python"));
    }
}
