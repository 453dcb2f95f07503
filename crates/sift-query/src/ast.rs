//! Query abstract syntax tree.
//!
//! Every interior node is binary, so an operator with the wrong number of operands cannot
//! be represented once a query has been built.

use std::{fmt, str::FromStr};

use sift_corpus::Term;

use crate::error::QueryError;

/// Deepest operator nesting accepted from query text or a [`RawQuery`](crate::RawQuery).
///
/// Parsing and raw conversion reject anything deeper. Trees assembled directly through the
/// [`QueryExpr`] constructors are not checked, and evaluating, formatting, or dropping them
/// recurses once per level, so callers building trees by hand should stay within this bound
/// (see [`QueryExpr::depth`]).
pub const MAX_DEPTH: usize = 256;

/// A binary set operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Intersection of both operands.
    And,
    /// Union of both operands.
    Or,
    /// Left operand minus the right operand.
    AndNot,
}

impl Operator {
    /// Returns the operator's textual spelling in query strings.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::AndNot => "AND NOT",
        }
    }

    /// Returns the operator's tag in the loosely-typed query form.
    pub fn tag(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
            Self::AndNot => "andnot",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for Operator {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "and" => Ok(Self::And),
            "or" => Ok(Self::Or),
            "andnot" | "and_not" | "and-not" | "and not" => Ok(Self::AndNot),
            _ => Err(QueryError::invalid(format!("unknown operator '{s}'"))),
        }
    }
}

/// A parsed query expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryExpr {
    /// Documents containing the term.
    Term(Term),

    /// Documents matching both sides.
    And(Box<Self>, Box<Self>),

    /// Documents matching either side.
    Or(Box<Self>, Box<Self>),

    /// Documents matching the left side and not the right side.
    AndNot(Box<Self>, Box<Self>),
}

impl QueryExpr {
    /// Creates a term leaf.
    pub fn term(term: impl Into<Term>) -> Self {
        Self::Term(term.into())
    }

    /// Creates an intersection node.
    pub fn and(left: Self, right: Self) -> Self {
        Self::And(Box::new(left), Box::new(right))
    }

    /// Creates a union node.
    pub fn or(left: Self, right: Self) -> Self {
        Self::Or(Box::new(left), Box::new(right))
    }

    /// Creates a difference node.
    pub fn and_not(left: Self, right: Self) -> Self {
        Self::AndNot(Box::new(left), Box::new(right))
    }

    /// Creates a node for the given operator.
    pub fn binary(op: Operator, left: Self, right: Self) -> Self {
        match op {
            Operator::And => Self::and(left, right),
            Operator::Or => Self::or(left, right),
            Operator::AndNot => Self::and_not(left, right),
        }
    }

    /// Returns the node's operator and operands, or `None` for a term leaf.
    pub fn as_binary(&self) -> Option<(Operator, &Self, &Self)> {
        match self {
            Self::Term(_) => None,
            Self::And(l, r) => Some((Operator::And, l.as_ref(), r.as_ref())),
            Self::Or(l, r) => Some((Operator::Or, l.as_ref(), r.as_ref())),
            Self::AndNot(l, r) => Some((Operator::AndNot, l.as_ref(), r.as_ref())),
        }
    }

    /// Returns the number of operator levels above the deepest leaf; a lone term is 0.
    ///
    /// Walks the tree with an explicit stack, so it is safe to call on trees of any depth.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 0)];
        while let Some((expr, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            if let Some((_, left, right)) = expr.as_binary() {
                stack.push((left, depth + 1));
                stack.push((right, depth + 1));
            }
        }
        deepest
    }

    /// Returns the leaf terms in left-to-right order.
    pub fn terms(&self) -> Vec<&Term> {
        let mut terms = Vec::new();
        self.collect_terms(&mut terms);
        terms
    }

    /// Appends leaf terms to `out`.
    fn collect_terms<'a>(&'a self, out: &mut Vec<&'a Term>) {
        match self {
            Self::Term(term) => out.push(term),
            Self::And(l, r) | Self::Or(l, r) | Self::AndNot(l, r) => {
                l.collect_terms(out);
                r.collect_terms(out);
            }
        }
    }

    /// Formats the expression as a tree structure with the given indentation level.
    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let prefix = "  ".repeat(indent);
        let (name, l, r) = match self {
            Self::Term(t) => return writeln!(f, "{prefix}Term({:?})", t.as_str()),
            Self::And(l, r) => ("And", l, r),
            Self::Or(l, r) => ("Or", l, r),
            Self::AndNot(l, r) => ("AndNot", l, r),
        };
        writeln!(f, "{prefix}{name}")?;
        l.fmt_tree(f, indent + 1)?;
        r.fmt_tree(f, indent + 1)
    }

    /// Formats the expression as a query string.
    ///
    /// Compound operands are parenthesized, so the output parses back to the same tree:
    /// `(Paris AND NOT France) OR Lear`.
    pub fn to_query_string(&self) -> String {
        match self {
            Self::Term(t) => quote_term(t.as_str()),
            Self::And(l, r) => binary_string(Operator::And, l, r),
            Self::Or(l, r) => binary_string(Operator::Or, l, r),
            Self::AndNot(l, r) => binary_string(Operator::AndNot, l, r),
        }
    }
}

impl fmt::Display for QueryExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, 0)
    }
}

/// Formats a binary node, parenthesizing compound operands.
fn binary_string(op: Operator, left: &QueryExpr, right: &QueryExpr) -> String {
    format!("{} {} {}", operand_string(left), op.keyword(), operand_string(right))
}

/// Formats an operand, parenthesizing compound expressions.
fn operand_string(expr: &QueryExpr) -> String {
    match expr {
        QueryExpr::Term(_) => expr.to_query_string(),
        _ => format!("({})", expr.to_query_string()),
    }
}

/// Quotes a term if it would not lex back as a single bare term.
fn quote_term(text: &str) -> String {
    let needs_quotes = text.is_empty()
        || matches!(text, "AND" | "OR" | "NOT")
        || text
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '(' | ')' | '"' | '\\'));

    if !needs_quotes {
        return text.to_string();
    }

    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for ch in text.chars() {
        if matches!(ch, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}
