//! sidenote - splits source files into documentation/code sections
//!
//! Each language is a pipeline of passes built from capability units
//! (inline comments, block comments, docstrings, scope splitting). The
//! resulting sections are rendered side by side: prose on the left,
//! highlighted code on the right.
//!
//! ```no_run
//! use sidenote::{segment, Registry};
//!
//! let registry = Registry::builtin()?;
//! if let Some(lang) = registry.lookup("app.py", None, None, None)? {
//!     for section in segment(lang, "# Entry point\ndef main():\n    pass\n") {
//!         println!("{:?} | {:?}", section.docs, section.code);
//!     }
//! }
//! # Ok::<(), sidenote::SidenoteError>(())
//! ```

pub mod config;
pub mod error;
pub mod language;
pub mod registry;
pub mod render;

pub use config::Config;
pub use error::{Result, SidenoteError};
pub use language::{LanguageDefinition, Section};
pub use registry::Registry;
pub use render::{DocExtension, DocRenderer, Highlighter};

/// Segment source text with a language definition
pub fn segment(language: &LanguageDefinition, text: &str) -> Vec<Section> {
    language.parse(text)
}

/// Output file name for a source file
pub fn transform_filename(language: &LanguageDefinition, filename: &str) -> String {
    language.transform_filename(filename)
}
