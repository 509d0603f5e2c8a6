//! Built-in language definitions
//!
//! This module provides segmentation definitions for
//! common programming languages.

mod c;
mod clojure;
mod fortran;
mod haskell;
mod prose;
mod python;
mod ruby;
mod scripting;

use super::definition::LanguageDefinition;
use crate::error::Result;

pub use c::{c_language, javascript_language, php_language};
pub use clojure::clojure_language;
pub use fortran::fortran_language;
pub use haskell::haskell_language;
pub use prose::{markdown_language, plain_text_language};
pub use python::python_language;
pub use ruby::ruby_language;
pub use scripting::{
    coffeescript_language, erlang_language, lua_language, perl_language, scheme_language,
    sql_language, tcl_language,
};

/// Get all built-in language definitions
pub fn all_languages() -> Result<Vec<LanguageDefinition>> {
    Ok(vec![
        plain_text_language(),
        markdown_language(),
        python_language()?,
        fortran_language()?,
        php_language()?,
        c_language()?,
        javascript_language()?,
        ruby_language()?,
        haskell_language()?,
        lua_language()?,
        erlang_language()?,
        tcl_language()?,
        coffeescript_language()?,
        perl_language()?,
        sql_language()?,
        scheme_language()?,
        clojure_language()?,
    ])
}
