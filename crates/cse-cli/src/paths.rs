//! File names derived from the symbol file argument.

use std::path::{Path, PathBuf};

use cse_core::config::ExportConfig;

/// Input and output locations for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPaths {
    pub symbols: PathBuf,
    pub project: PathBuf,
    pub output: PathBuf,
}

/// Splits `Plant.SYM_XML` into `Plant`, comparing the extension without case.
pub fn symbol_base_name<'a>(file_name: &'a str, extension: &str) -> Option<&'a str> {
    let split = file_name.len().checked_sub(extension.len())?;
    let (base, ext) = (file_name.get(..split)?, file_name.get(split..)?);
    if base.is_empty() || !ext.eq_ignore_ascii_case(extension) {
        return None;
    }
    Some(base)
}

/// Derives project and destination paths next to the symbol file:
/// `<base><project ext>` and `<base><suffix><symbol ext>`.
pub fn derive_paths(
    symbols: &Path,
    project: Option<PathBuf>,
    output: Option<PathBuf>,
    config: &ExportConfig,
) -> anyhow::Result<RunPaths> {
    let extension = config.symbols.extension.as_str();
    let file_name = symbols
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| anyhow::anyhow!("invalid symbol file name '{}'", symbols.display()))?;
    let Some(base) = symbol_base_name(file_name, extension) else {
        anyhow::bail!("the symbol file name must have the {extension} extension");
    };
    let dir = symbols.parent().unwrap_or_else(|| Path::new(""));
    let project = project
        .unwrap_or_else(|| dir.join(format!("{base}{}", config.project.extension)));
    let output = output.unwrap_or_else(|| {
        dir.join(format!("{base}{}{extension}", config.output.suffix))
    });
    if same_file(&output, symbols) {
        anyhow::bail!(
            "destination '{}' would overwrite the symbol file",
            output.display()
        );
    }
    Ok(RunPaths {
        symbols: symbols.to_path_buf(),
        project,
        output,
    })
}

/// Absolute form of `path`. A file that does not exist yet is resolved
/// through its parent directory.
fn resolve(path: &Path) -> Option<PathBuf> {
    if let Ok(path) = path.canonicalize() {
        return Some(path);
    }
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    Some(parent.canonicalize().ok()?.join(path.file_name()?))
}

/// Whether two paths name the same file, however they are spelled.
fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (resolve(a), resolve(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
