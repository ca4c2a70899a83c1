//! `cse-core` - keep only export-tagged symbols in CoDeSys 2.3 symbol files.
//!
//! The pipeline has three stages:
//!
//! - **Indexing**: [`project::index_project`] scans a `.pro` project buffer
//!   and records, per POU, the variables annotated with the export tag
//! - **Filtering**: [`symbols::SymbolFilter`] streams a `.SYM_XML` file and
//!   copies only the body lines naming an indexed variable, marking it used
//! - **Checking**: [`check::unused_symbols`] lists tagged variables the
//!   symbol file never mentioned
//!
//! # Example
//!
//! ```
//! use cse_core::check::unused_symbols;
//! use cse_core::config::ExportConfig;
//! use cse_core::project::index_project;
//! use cse_core::symbols::{filter_symbols, QualifiedName};
//!
//! let config = ExportConfig::default();
//! let project = b"CoDeSys+PROGRAM PLC_PRG\nVAR\nCounter : INT; (* @EXPORT *)\nEND_VAR\n";
//! let mut index = index_project(project, &config.project).unwrap();
//!
//! let symbols = "<SymbolVarList>\n<V>PLC_PRG.Counter</V>\n<V>PLC_PRG.Other</V>\n</SymbolVarList>\n";
//! let mut output = Vec::new();
//! filter_symbols(
//!     symbols.as_bytes(),
//!     &mut index,
//!     &mut output,
//!     &config.symbols,
//!     &mut |_: &QualifiedName<'_>| {},
//! )
//! .unwrap();
//!
//! assert_eq!(
//!     String::from_utf8(output).unwrap(),
//!     "<SymbolVarList>\n<V>PLC_PRG.Counter</V>\n</SymbolVarList>\n"
//! );
//! assert!(unused_symbols(&index).is_empty());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

/// Consistency check over a used index.
pub mod check;
/// Export configuration and its TOML form.
pub mod config;
/// Errors for indexing and filtering.
pub mod error;
/// POU and variable index.
pub mod index;
/// Project file indexing.
pub mod project;
/// Symbol file filtering.
pub mod symbols;
mod text;

pub use check::{unused_symbols, UnusedSymbol};
pub use config::ExportConfig;
pub use error::CseError;
pub use index::{Pou, ProjectIndex, Variable, GLOBAL_LABEL};
pub use project::index_project;
pub use symbols::{filter_symbols, FilterObserver, FilterReport, QualifiedName, SymbolFilter};

use std::io::{BufRead, Write};

/// Result of [`export_symbols`].
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    /// Index with its `used` flags set by the filter.
    pub index: ProjectIndex,
    /// Line counts and marker status of the filter pass.
    pub report: FilterReport,
    /// Exported variables that no symbol line referenced.
    pub unused: Vec<UnusedSymbol>,
}

/// Runs the whole pipeline: index `project`, filter `symbols` into `dest`,
/// then check for unused tags.
///
/// Nothing is written to `dest` when the project signature is wrong.
pub fn export_symbols<R, W, O>(
    project: &[u8],
    symbols: R,
    dest: W,
    config: &ExportConfig,
    observer: &mut O,
) -> Result<ExportOutcome, CseError>
where
    R: BufRead,
    W: Write,
    O: FilterObserver + ?Sized,
{
    let mut index = index_project(project, &config.project)?;
    let report = filter_symbols(symbols, &mut index, dest, &config.symbols, observer)?;
    let unused = unused_symbols(&index);
    Ok(ExportOutcome {
        index,
        report,
        unused,
    })
}
