//! Export index: POUs and the export-tagged variables they declare.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use smol_str::SmolStr;

/// Label used wherever the global scope has to be shown to a user.
pub const GLOBAL_LABEL: &str = "<Global variables>";

/// One export-tagged variable declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variable {
    /// Bare identifier as declared, without POU qualifier.
    pub symbol_name: SmolStr,
    /// Set once a symbol-file line referencing this variable has been copied.
    pub used: bool,
}

impl Variable {
    /// Creates an unused variable.
    #[must_use]
    pub fn new(symbol_name: impl Into<SmolStr>) -> Self {
        Self {
            symbol_name: symbol_name.into(),
            used: false,
        }
    }
}

/// Program Organization Unit. The empty name is the global scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pou {
    /// POU name as declared; empty for globals.
    pub name: SmolStr,
    /// Exported variables in declaration order, duplicates included.
    pub variables: Vec<Variable>,
}

impl Pou {
    /// Creates a POU with no variables.
    #[must_use]
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            variables: Vec::new(),
        }
    }

    /// Returns true for the global variables scope.
    #[must_use]
    pub fn is_global(&self) -> bool {
        self.name.is_empty()
    }

    /// Name for display, never blank.
    #[must_use]
    pub fn label(&self) -> &str {
        pou_label(&self.name)
    }

    /// First variable with exactly this name.
    pub fn variable_mut(&mut self, symbol_name: &str) -> Option<&mut Variable> {
        self.variables
            .iter_mut()
            .find(|variable| variable.symbol_name == symbol_name)
    }
}

/// Maps a POU name to its display label.
#[must_use]
pub fn pou_label(name: &str) -> &str {
    if name.is_empty() {
        GLOBAL_LABEL
    } else {
        name
    }
}

/// Ordered POU index built from one project file.
///
/// POUs keep discovery order; a name seen again reuses its existing entry.
/// Only the `used` flags change once indexing is done.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProjectIndex {
    pous: IndexMap<SmolStr, Pou>,
}

impl ProjectIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the POU with this name, appending it first if unseen.
    pub fn pou_entry(&mut self, name: &str) -> &mut Pou {
        self.pous
            .entry(SmolStr::new(name))
            .or_insert_with(|| Pou::new(name))
    }

    /// Appends an exported variable to the named POU.
    pub fn push_variable(&mut self, pou: &str, symbol_name: impl Into<SmolStr>) {
        self.pou_entry(pou).variables.push(Variable::new(symbol_name));
    }

    /// POU with exactly this name.
    #[must_use]
    pub fn pou(&self, name: &str) -> Option<&Pou> {
        self.pous.get(name)
    }

    /// Mutable access to the POU with exactly this name.
    pub fn pou_mut(&mut self, name: &str) -> Option<&mut Pou> {
        self.pous.get_mut(name)
    }

    /// First variable matching `pou` and `symbol_name` exactly.
    pub fn variable_mut(&mut self, pou: &str, symbol_name: &str) -> Option<&mut Variable> {
        self.pou_mut(pou)?.variable_mut(symbol_name)
    }

    /// POUs in discovery order.
    pub fn pous(&self) -> impl Iterator<Item = &Pou> {
        self.pous.values()
    }

    /// Number of POUs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pous.len()
    }

    /// Returns true when no POU was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pous.is_empty()
    }

    /// Number of exported variables across all POUs.
    #[must_use]
    pub fn variable_count(&self) -> usize {
        self.pous.values().map(|pou| pou.variables.len()).sum()
    }

    /// Number of variables already matched in a symbol file.
    #[must_use]
    pub fn used_count(&self) -> usize {
        self.pous
            .values()
            .flat_map(|pou| pou.variables.iter())
            .filter(|variable| variable.used)
            .count()
    }
}

impl FromIterator<Pou> for ProjectIndex {
    fn from_iter<T: IntoIterator<Item = Pou>>(iter: T) -> Self {
        let mut index = Self::new();
        for pou in iter {
            index.pou_entry(&pou.name).variables.extend(pou.variables);
        }
        index
    }
}

/// One line per POU, variables indented below, `*` marking used ones.
impl fmt::Display for ProjectIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pou in self.pous() {
            writeln!(f, "{}", pou.label())?;
            for variable in &pou.variables {
                let mark = if variable.used { "*" } else { " " };
                writeln!(f, "  {mark} {}", variable.symbol_name)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_are_reused_by_name() {
        let mut index = ProjectIndex::new();
        index.push_variable("PLC_PRG", "Counter");
        index.push_variable("", "Alarm");
        index.push_variable("PLC_PRG", "Speed");

        let names: Vec<_> = index.pous().map(|pou| pou.name.as_str()).collect();
        assert_eq!(names, vec!["PLC_PRG", ""]);
        assert_eq!(index.variable_count(), 3);
        assert_eq!(index.pou("PLC_PRG").map(|pou| pou.variables.len()), Some(2));
    }

    #[test]
    fn global_scope_has_a_label() {
        let pou = Pou::new("");
        assert!(pou.is_global());
        assert_eq!(pou.label(), GLOBAL_LABEL);
        assert_eq!(Pou::new("MAIN").label(), "MAIN");
    }

    #[test]
    fn lookup_returns_first_duplicate() {
        let mut index = ProjectIndex::new();
        index.push_variable("MAIN", "X");
        index.push_variable("MAIN", "X");

        index.variable_mut("MAIN", "X").expect("variable").used = true;
        let flags: Vec<_> = index
            .pou("MAIN")
            .expect("pou")
            .variables
            .iter()
            .map(|variable| variable.used)
            .collect();
        assert_eq!(flags, vec![true, false]);
        assert_eq!(index.used_count(), 1);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let mut index = ProjectIndex::new();
        index.push_variable("MAIN", "X");
        assert!(index.variable_mut("main", "X").is_none());
        assert!(index.variable_mut("MAIN", "x").is_none());
    }
}
