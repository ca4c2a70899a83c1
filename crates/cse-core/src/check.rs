//! Consistency check between the export index and a filtered symbol file.

use std::fmt;

use serde::Serialize;
use smol_str::SmolStr;

use crate::index::{pou_label, ProjectIndex};

/// A variable tagged for export that no symbol-file line referenced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnusedSymbol {
    /// Empty for globals.
    pub pou: SmolStr,
    /// Bare variable name.
    pub symbol: SmolStr,
}

impl UnusedSymbol {
    /// `POU.symbol`, or `<Global variables>.symbol`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", pou_label(&self.pou), self.symbol)
    }
}

impl fmt::Display for UnusedSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "the symbol {} is tagged for export but was not found in the symbol file; \
             you should probably perform a full rebuild of your project",
            self.qualified_name()
        )
    }
}

/// One entry per variable still unused, in index order.
#[must_use]
pub fn unused_symbols(index: &ProjectIndex) -> Vec<UnusedSymbol> {
    index
        .pous()
        .flat_map(|pou| {
            pou.variables
                .iter()
                .filter(|variable| !variable.used)
                .map(|variable| UnusedSymbol {
                    pou: pou.name.clone(),
                    symbol: variable.symbol_name.clone(),
                })
        })
        .collect()
}
