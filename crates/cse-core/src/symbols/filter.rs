//! Streaming filter over a symbol file.

use std::io::{BufRead, Write};

use serde::Serialize;
use tracing::{debug, warn};

use super::qualified::QualifiedName;
use crate::config::SymbolFileFormat;
use crate::error::CseError;
use crate::index::ProjectIndex;
use crate::text::contains;

/// Receives a notification for every body line copied to the output.
pub trait FilterObserver {
    /// Called once per copied body line, after the variable is marked used.
    fn symbol_copied(&mut self, name: &QualifiedName<'_>);
}

impl<F> FilterObserver for F
where
    F: FnMut(&QualifiedName<'_>),
{
    fn symbol_copied(&mut self, name: &QualifiedName<'_>) {
        (self)(name);
    }
}

/// Line counts and marker status of one filter run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterReport {
    /// Lines copied before the body, start-marker line included.
    pub preamble_lines: usize,
    /// Body lines copied because their name is exported.
    pub copied_lines: usize,
    /// Body lines left out, malformed ones included.
    pub dropped_lines: usize,
    /// Dropped body lines that carried no usable name.
    pub malformed_lines: usize,
    /// Lines copied after the body, end-marker line included.
    pub trailer_lines: usize,
    /// Whether a line containing the block start marker was seen.
    pub start_marker_found: bool,
    /// Whether the body was closed by a line containing the block end marker.
    pub end_marker_found: bool,
}

impl FilterReport {
    /// Advisory messages about the symbol file layout.
    #[must_use]
    pub fn warnings(&self, format: &SymbolFileFormat) -> Vec<String> {
        let mut warnings = Vec::new();
        if !self.start_marker_found {
            warnings.push(format!(
                "block start marker '{}' not found: the whole file was copied unchanged",
                format.block_start
            ));
        } else if !self.end_marker_found {
            warnings.push(format!(
                "block end marker '{}' not found: the file ends inside the symbol block",
                format.block_end
            ));
        }
        warnings
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Preamble,
    Body,
    Trailer,
}

/// Copies a symbol file, keeping only the body lines whose qualified name
/// is in the export index.
///
/// Preamble and trailer are copied byte for byte, line terminators included.
/// The end-marker line is checked like any body line and always written once,
/// so the output keeps the closing marker.
#[derive(Debug, Clone, Copy)]
pub struct SymbolFilter<'a> {
    format: &'a SymbolFileFormat,
}

impl<'a> SymbolFilter<'a> {
    /// Creates a filter for symbol files laid out as `format` describes.
    #[must_use]
    pub fn new(format: &'a SymbolFileFormat) -> Self {
        Self { format }
    }

    /// Streams `src` into `dest`, marking every matched variable in `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CseError::Io`] when reading `src` or writing `dest` fails.
    /// Output written before the failure is left in place.
    pub fn run<R, W, O>(
        &self,
        mut src: R,
        index: &mut ProjectIndex,
        mut dest: W,
        observer: &mut O,
    ) -> Result<FilterReport, CseError>
    where
        R: BufRead,
        W: Write,
        O: FilterObserver + ?Sized,
    {
        let start = self.format.block_start.as_bytes();
        let end = self.format.block_end.as_bytes();
        let mut report = FilterReport::default();
        let mut phase = Phase::Preamble;
        let mut line = Vec::new();

        loop {
            line.clear();
            if src.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            match phase {
                Phase::Preamble => {
                    dest.write_all(&line)?;
                    report.preamble_lines += 1;
                    if contains(&line, start) {
                        report.start_marker_found = true;
                        phase = Phase::Body;
                        // `<SymbolVarList></SymbolVarList>`: empty block on one line.
                        if contains(&line, end) {
                            report.end_marker_found = true;
                            phase = Phase::Trailer;
                        }
                    }
                }
                Phase::Body => {
                    let is_end = contains(&line, end);
                    let copied = match QualifiedName::from_line(&line) {
                        Some(name) => {
                            let matched = mark_used(index, &name);
                            if matched {
                                debug!(symbol = %name, "symbol copied");
                                observer.symbol_copied(&name);
                            }
                            matched
                        }
                        None => {
                            if !is_end {
                                report.malformed_lines += 1;
                            }
                            false
                        }
                    };
                    if is_end {
                        dest.write_all(&line)?;
                        report.end_marker_found = true;
                        report.trailer_lines += 1;
                        if copied {
                            report.copied_lines += 1;
                        }
                        phase = Phase::Trailer;
                    } else if copied {
                        dest.write_all(&line)?;
                        report.copied_lines += 1;
                    } else {
                        report.dropped_lines += 1;
                    }
                }
                Phase::Trailer => {
                    dest.write_all(&line)?;
                    report.trailer_lines += 1;
                }
            }
        }
        dest.flush()?;

        if !report.start_marker_found {
            warn!(marker = %self.format.block_start, "symbol block start not found");
        } else if !report.end_marker_found {
            warn!(marker = %self.format.block_end, "symbol block end not found");
        }
        Ok(report)
    }
}

/// Marks the first variable matching `name` as used.
fn mark_used(index: &mut ProjectIndex, name: &QualifiedName<'_>) -> bool {
    match index.variable_mut(name.pou, name.symbol) {
        Some(variable) => {
            variable.used = true;
            true
        }
        None => false,
    }
}

/// Runs [`SymbolFilter`] with the given format.
pub fn filter_symbols<R, W, O>(
    src: R,
    index: &mut ProjectIndex,
    dest: W,
    format: &SymbolFileFormat,
    observer: &mut O,
) -> Result<FilterReport, CseError>
where
    R: BufRead,
    W: Write,
    O: FilterObserver + ?Sized,
{
    SymbolFilter::new(format).run(src, index, dest, observer)
}
