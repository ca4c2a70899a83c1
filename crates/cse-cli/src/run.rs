//! The export run: index the project, filter the symbol file, report.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use tracing::debug;

use cse_core::config::{ExportConfig, CONFIG_FILE_NAME};
use cse_core::symbols::{FilterReport, QualifiedName, SymbolFilter};
use cse_core::{index_project, unused_symbols, Pou, UnusedSymbol};

use crate::cli::Cli;
use crate::paths::{derive_paths, RunPaths};
use crate::style;

/// Everything a run produced, as printed by `--json`.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub symbol_file: PathBuf,
    pub project_file: PathBuf,
    pub output_file: PathBuf,
    pub export_tag: String,
    pub pous: Vec<Pou>,
    pub copied: Vec<String>,
    pub filter: FilterReport,
    pub unused: Vec<UnusedSymbol>,
    pub warnings: Vec<String>,
}

pub fn run_export(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    let human = !cli.json;
    if human && !cli.quiet {
        style::print_banner(&config.project.export_tag);
    }

    let paths = derive_paths(&cli.symbol_file, cli.project, cli.output, &config)?;
    debug!(?paths, "resolved file names");

    let report = export(&paths, &config, human)?;

    if human {
        for warning in &report.warnings {
            println!("{}", style::warning(format!("WARNING: {warning}")));
        }
        for symbol in &report.unused {
            println!("{}", style::warning("WARNING !"));
            println!("{}", style::warning(capitalize(&symbol.to_string())));
        }
        println!(
            "{}",
            style::success(format!(
                ">>> File \"{}\" created successfully",
                report.output_file.display()
            ))
        );
    } else {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}

fn export(paths: &RunPaths, config: &ExportConfig, human: bool) -> anyhow::Result<RunReport> {
    // The project is indexed completely before the destination exists, so a
    // bad project never leaves an output file behind.
    let buffer = std::fs::read(&paths.project).with_context(|| {
        format!("unable to read the project file {}", paths.project.display())
    })?;
    let mut index = index_project(&buffer, &config.project).with_context(|| {
        format!("{} is not a valid CoDeSys project file", paths.project.display())
    })?;

    if human {
        println!(">>> Indexing POUs... found {}", index.len());
        for pou in index.pous() {
            println!("{}", pou.label());
        }
        println!(">>> End of indexed POUs");
        println!();
        println!(">>> Exported tags:");
    }

    let src = File::open(&paths.symbols)
        .with_context(|| format!("unable to open file {}", paths.symbols.display()))?;
    let dest = File::create(&paths.output)
        .with_context(|| format!("unable to open file {}", paths.output.display()))?;

    let mut copied = Vec::new();
    let filter = SymbolFilter::new(&config.symbols)
        .run(
            BufReader::new(src),
            &mut index,
            BufWriter::new(dest),
            &mut |name: &QualifiedName<'_>| {
                if human {
                    println!("+++ {name}");
                }
                copied.push(name.to_string());
            },
        )
        .with_context(|| format!("failed to write {}", paths.output.display()))?;

    if human {
        println!();
        println!(">>> End of exported tags");
    }

    let warnings = filter.warnings(&config.symbols);
    let unused = unused_symbols(&index);
    Ok(RunReport {
        symbol_file: paths.symbols.clone(),
        project_file: paths.project.clone(),
        output_file: paths.output.clone(),
        export_tag: config.project.export_tag.to_string(),
        pous: index.pous().cloned().collect(),
        copied,
        filter,
        unused,
        warnings,
    })
}

/// Explicit `--config`, else `cse.toml` beside the symbol file, else defaults.
fn load_config(cli: &Cli) -> anyhow::Result<ExportConfig> {
    let path = match &cli.config {
        Some(path) => Some(path.clone()),
        None => {
            let dir = cli.symbol_file.parent().unwrap_or_else(|| Path::new(""));
            let candidate = dir.join(CONFIG_FILE_NAME);
            candidate.is_file().then_some(candidate)
        }
    };
    let config = match path {
        Some(path) => {
            debug!(path = %path.display(), "loading configuration");
            ExportConfig::load(&path)?
        }
        None => ExportConfig::default(),
    };
    match &cli.tag {
        Some(tag) => Ok(config.with_export_tag(tag)?),
        None => Ok(config),
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
