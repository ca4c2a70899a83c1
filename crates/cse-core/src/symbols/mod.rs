//! Symbol file filtering.

mod filter;
mod qualified;

pub use filter::{filter_symbols, FilterObserver, FilterReport, SymbolFilter};
pub use qualified::QualifiedName;
