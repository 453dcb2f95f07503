//! Per-node evaluation breakdowns.

use std::fmt;

use serde::Serialize;

/// How one node of a query tree contributed to the result.
///
/// Operator nodes carry their keyword as the label; term nodes carry the quoted term. Each
/// node records the size of the set it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Explanation {
    /// Operator keyword or quoted term.
    pub label: String,
    /// Number of documents the node matched.
    pub matches: usize,
    /// Operand explanations, left then right. Empty for terms.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Self>,
}

impl Explanation {
    /// Creates a leaf explanation.
    pub fn leaf(label: impl Into<String>, matches: usize) -> Self {
        Self {
            label: label.into(),
            matches,
            children: Vec::new(),
        }
    }

    /// Creates an operator explanation over its operands.
    pub fn node(label: impl Into<String>, matches: usize, children: Vec<Self>) -> Self {
        Self {
            label: label.into(),
            matches,
            children,
        }
    }

    /// Writes this node and its descendants at the given depth.
    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        let noun = if self.matches == 1 { "match" } else { "matches" };
        writeln!(f, "{indent}{}  [{} {noun}]", self.label, self.matches)?;
        for child in &self.children {
            child.fmt_tree(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, 0)
    }
}
