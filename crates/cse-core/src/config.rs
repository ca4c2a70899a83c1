//! Export configuration: the literals the pipeline relies on.
//!
//! Every value defaults to what CoDeSys 2.3 produces. A `cse.toml` file may
//! override any of them:
//!
//! ```toml
//! [project]
//! signature = "CoDeSys+"
//! export_tag = "@EXPORT"
//! extension = ".pro"
//!
//! [symbols]
//! extension = ".SYM_XML"
//! block_start = "<SymbolVarList>"
//! block_end = "</SymbolVarList>"
//!
//! [output]
//! suffix = "_CSE"
//! ```

use std::path::Path;

use serde::Deserialize;
use smol_str::SmolStr;

use crate::error::CseError;

/// File name of the optional configuration looked up next to a symbol file.
pub const CONFIG_FILE_NAME: &str = "cse.toml";

/// Leading bytes of a CoDeSys 2.3 project file.
pub const DEFAULT_PROJECT_SIGNATURE: &str = "CoDeSys+";
/// Default export marker.
pub const DEFAULT_EXPORT_TAG: &str = "@EXPORT";
/// Project file extension.
pub const DEFAULT_PROJECT_EXTENSION: &str = ".pro";
/// Symbol file extension.
pub const DEFAULT_SYMBOL_EXTENSION: &str = ".SYM_XML";
/// Opening tag of the symbol list.
pub const DEFAULT_BLOCK_START: &str = "<SymbolVarList>";
/// Closing tag of the symbol list.
pub const DEFAULT_BLOCK_END: &str = "</SymbolVarList>";
/// Suffix appended to the destination base name.
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_CSE";

/// Complete configuration for one export run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExportConfig {
    /// `[project]` table.
    pub project: ProjectFormat,
    /// `[symbols]` table.
    pub symbols: SymbolFileFormat,
    /// `[output]` table.
    pub output: OutputNaming,
}

/// Project file literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFormat {
    /// Byte prefix every project file must start with.
    pub signature: SmolStr,
    /// Marker that flags a declaration for export when found in a comment or pragma.
    pub export_tag: SmolStr,
    /// Extension of the project file derived from the symbol file name.
    pub extension: SmolStr,
}

impl Default for ProjectFormat {
    fn default() -> Self {
        Self {
            signature: SmolStr::new_inline(DEFAULT_PROJECT_SIGNATURE),
            export_tag: SmolStr::new_inline(DEFAULT_EXPORT_TAG),
            extension: SmolStr::new_inline(DEFAULT_PROJECT_EXTENSION),
        }
    }
}

/// Symbol file literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolFileFormat {
    /// Extension a symbol file must carry, compared case-insensitively.
    pub extension: SmolStr,
    /// Marker of the line that opens the filtered body.
    pub block_start: SmolStr,
    /// Marker of the line that closes the filtered body.
    pub block_end: SmolStr,
}

impl Default for SymbolFileFormat {
    fn default() -> Self {
        Self {
            extension: SmolStr::new_inline(DEFAULT_SYMBOL_EXTENSION),
            block_start: SmolStr::new_inline(DEFAULT_BLOCK_START),
            block_end: SmolStr::new_inline(DEFAULT_BLOCK_END),
        }
    }
}

/// How the destination file is named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputNaming {
    /// Inserted between the source base name and its extension.
    pub suffix: SmolStr,
}

impl Default for OutputNaming {
    fn default() -> Self {
        Self {
            suffix: SmolStr::new_inline(DEFAULT_OUTPUT_SUFFIX),
        }
    }
}

impl ExportConfig {
    /// Reads and validates a `cse.toml` file.
    ///
    /// # Errors
    ///
    /// Returns [`CseError::InvalidConfig`] when the file cannot be read, is not
    /// valid TOML, or holds an empty or malformed value.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CseError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| {
            CseError::InvalidConfig(format!("{}: {err}", path.display()).into())
        })?;
        let raw: CseToml = toml::from_str(&text).map_err(|err| {
            CseError::InvalidConfig(format!("{}: {err}", path.display()).into())
        })?;
        raw.into_config()
    }

    /// Parses and validates configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`CseError::InvalidConfig`] for invalid TOML or values.
    pub fn from_toml_str(text: &str) -> Result<Self, CseError> {
        let raw: CseToml =
            toml::from_str(text).map_err(|err| CseError::InvalidConfig(err.to_string().into()))?;
        raw.into_config()
    }

    /// Replaces the export tag, rejecting an empty one.
    pub fn with_export_tag(mut self, tag: &str) -> Result<Self, CseError> {
        self.project.export_tag = non_empty("project.export_tag", Some(tag.to_string()), "")?;
        Ok(self)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CseToml {
    project: Option<ProjectSection>,
    symbols: Option<SymbolsSection>,
    output: Option<OutputSection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProjectSection {
    signature: Option<String>,
    export_tag: Option<String>,
    extension: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SymbolsSection {
    extension: Option<String>,
    block_start: Option<String>,
    block_end: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct OutputSection {
    suffix: Option<String>,
}

impl CseToml {
    fn into_config(self) -> Result<ExportConfig, CseError> {
        let project = self.project.unwrap_or_default();
        let symbols = self.symbols.unwrap_or_default();
        let output = self.output.unwrap_or_default();

        let project = ProjectFormat {
            signature: non_empty(
                "project.signature",
                project.signature,
                DEFAULT_PROJECT_SIGNATURE,
            )?,
            export_tag: non_empty("project.export_tag", project.export_tag, DEFAULT_EXPORT_TAG)?,
            extension: extension(
                "project.extension",
                project.extension,
                DEFAULT_PROJECT_EXTENSION,
            )?,
        };
        let symbols = SymbolFileFormat {
            extension: extension(
                "symbols.extension",
                symbols.extension,
                DEFAULT_SYMBOL_EXTENSION,
            )?,
            block_start: non_empty("symbols.block_start", symbols.block_start, DEFAULT_BLOCK_START)?,
            block_end: non_empty("symbols.block_end", symbols.block_end, DEFAULT_BLOCK_END)?,
        };
        // An empty suffix would make the destination overwrite the source.
        let output = OutputNaming {
            suffix: non_empty("output.suffix", output.suffix, DEFAULT_OUTPUT_SUFFIX)?,
        };
        Ok(ExportConfig {
            project,
            symbols,
            output,
        })
    }
}

fn non_empty(key: &str, value: Option<String>, default: &str) -> Result<SmolStr, CseError> {
    match value {
        None => Ok(SmolStr::new(default)),
        Some(value) if value.is_empty() => Err(CseError::InvalidConfig(
            format!("{key} must not be empty").into(),
        )),
        Some(value) => Ok(SmolStr::new(value)),
    }
}

fn extension(key: &str, value: Option<String>, default: &str) -> Result<SmolStr, CseError> {
    let value = non_empty(key, value, default)?;
    if !value.starts_with('.') || value.len() < 2 {
        return Err(CseError::InvalidConfig(
            format!("{key} must look like '.ext', got '{value}'").into(),
        ));
    }
    Ok(value)
}
