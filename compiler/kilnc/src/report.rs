//! Per-form results of a session.

use std::fmt;

use kiln_diagnostic::Diagnostic;

/// What one form contributed to the report, already rendered.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ReportEntry {
    /// `type List: Nil, Cons`
    TypeDefined { types: Vec<String>, tags: Vec<String> },
    /// `expr : type`
    Evaluated { expr: String, ty: String },
    /// `let name : scheme`
    Bound { name: String, scheme: String },
    Failed(Diagnostic),
}

impl fmt::Display for ReportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportEntry::TypeDefined { types, tags } => {
                write!(f, "type {}: {}", types.join(", "), tags.join(", "))
            }
            ReportEntry::Evaluated { expr, ty } => write!(f, "{expr} : {ty}"),
            ReportEntry::Bound { name, scheme } => write!(f, "let {name} : {scheme}"),
            ReportEntry::Failed(diag) => write!(f, "{diag}"),
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Report {
    pub entries: Vec<ReportEntry>,
}

impl Report {
    pub fn push(&mut self, entry: ReportEntry) {
        self.entries.push(entry);
    }

    pub fn has_errors(&self) -> bool {
        self.entries
            .iter()
            .any(|e| matches!(e, ReportEntry::Failed(_)))
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter_map(|e| match e {
            ReportEntry::Failed(diag) => Some(diag),
            _ => None,
        })
    }

    /// One entry per line.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}
