//! Loosely-typed query trees.
//!
//! [`RawQuery`] mirrors what a JSON client or another program might hand over: a bare
//! string for a term, or an object with an operator tag and a list of operands. Nothing
//! about it is checked until it is converted into a [`QueryExpr`], which is where unknown
//! operators, wrong operand counts, empty terms, and trees nested past [`MAX_DEPTH`] are
//! rejected.

use serde::{Deserialize, Serialize};

use crate::{MAX_DEPTH, Operator, QueryError, QueryExpr};

/// An unvalidated query tree.
///
/// ```
/// use sift_query::{QueryExpr, RawQuery};
///
/// let raw = RawQuery::node("or", vec![
///     RawQuery::node("andnot", vec![RawQuery::term("Paris"), RawQuery::term("France")]),
///     RawQuery::term("Lear"),
/// ]);
/// let expr = QueryExpr::try_from(raw).unwrap();
/// assert_eq!(expr.to_query_string(), "(Paris AND NOT France) OR Lear");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawQuery {
    /// A term leaf.
    Term(String),

    /// An operator node.
    Node {
        /// Operator tag: `and`, `or`, or `andnot` (case-insensitive).
        op: String,
        /// Operands.
        args: Vec<Self>,
    },
}

impl RawQuery {
    /// Creates a term leaf.
    pub fn term(text: impl Into<String>) -> Self {
        Self::Term(text.into())
    }

    /// Creates an operator node.
    pub fn node(op: impl Into<String>, args: Vec<Self>) -> Self {
        Self::Node {
            op: op.into(),
            args,
        }
    }
}

impl TryFrom<RawQuery> for QueryExpr {
    type Error = QueryError;

    fn try_from(raw: RawQuery) -> Result<Self, Self::Error> {
        validate(raw, 0)
    }
}

/// Converts a raw node that sits `depth` operators below the root.
fn validate(raw: RawQuery, depth: usize) -> Result<QueryExpr, QueryError> {
    match raw {
        RawQuery::Term(text) if text.is_empty() => Err(QueryError::invalid("empty term")),
        RawQuery::Term(text) => Ok(QueryExpr::term(text)),
        RawQuery::Node { .. } if depth >= MAX_DEPTH => Err(QueryError::invalid(format!(
            "query nested too deeply (limit is {MAX_DEPTH})"
        ))),
        RawQuery::Node { op, args } => {
            let operator: Operator = op.parse()?;
            let [left, right] = <[RawQuery; 2]>::try_from(args).map_err(|args| {
                QueryError::invalid(format!(
                    "operator '{op}' takes 2 operands, got {}",
                    args.len()
                ))
            })?;
            Ok(QueryExpr::binary(
                operator,
                validate(left, depth + 1)?,
                validate(right, depth + 1)?,
            ))
        }
    }
}

impl From<&QueryExpr> for RawQuery {
    fn from(expr: &QueryExpr) -> Self {
        let (op, left, right) = match expr {
            QueryExpr::Term(term) => return Self::term(term.as_str()),
            QueryExpr::And(l, r) => (Operator::And, l, r),
            QueryExpr::Or(l, r) => (Operator::Or, l, r),
            QueryExpr::AndNot(l, r) => (Operator::AndNot, l, r),
        };
        Self::node(op.tag(), vec![Self::from(&**left), Self::from(&**right)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_json(json: &str) -> Result<QueryExpr, QueryError> {
        let raw: RawQuery = serde_json::from_str(json).unwrap();
        QueryExpr::try_from(raw)
    }

    #[test]
    fn builds_canonical_query_from_json() {
        let expr = from_json(
            r#"{"op": "or", "args": [{"op": "andnot", "args": ["Paris", "France"]}, "Lear"]}"#,
        )
        .unwrap();
        assert_eq!(
            expr,
            QueryExpr::or(
                QueryExpr::and_not(QueryExpr::term("Paris"), QueryExpr::term("France")),
                QueryExpr::term("Lear"),
            )
        );
    }

    #[test]
    fn bare_string_is_a_term() {
        assert_eq!(from_json(r#""Lear""#).unwrap(), QueryExpr::term("Lear"));
    }

    #[test]
    fn unknown_operator_is_invalid() {
        let err = from_json(r#"{"op": "xor", "args": ["a", "b"]}"#).unwrap_err();
        assert!(err.is_invalid());
        assert!(err.message().contains("unknown operator 'xor'"));
    }

    #[test]
    fn wrong_arity_is_invalid() {
        let err = from_json(r#"{"op": "and", "args": ["a"]}"#).unwrap_err();
        assert!(err.is_invalid());
        assert!(err.message().contains("got 1"));

        let err = from_json(r#"{"op": "or", "args": ["a", "b", "c"]}"#).unwrap_err();
        assert!(err.message().contains("got 3"));

        let err = from_json(r#"{"op": "andnot", "args": []}"#).unwrap_err();
        assert!(err.message().contains("got 0"));
    }

    #[test]
    fn nested_errors_propagate() {
        let err = from_json(r#"{"op": "or", "args": ["a", {"op": "not", "args": ["b"]}]}"#)
            .unwrap_err();
        assert!(err.is_invalid());
    }

    #[test]
    fn empty_term_is_invalid() {
        let err = from_json(r#"{"op": "and", "args": ["a", ""]}"#).unwrap_err();
        assert!(err.message().contains("empty term"));
    }

    /// A left-deep chain of `levels` OR nodes.
    fn or_chain(levels: usize) -> RawQuery {
        (0..levels).fold(RawQuery::term("a"), |left, _| {
            RawQuery::node("or", vec![left, RawQuery::term("b")])
        })
    }

    #[test]
    fn nesting_up_to_the_limit_is_accepted() {
        let expr = QueryExpr::try_from(or_chain(MAX_DEPTH)).unwrap();
        assert_eq!(expr.depth(), MAX_DEPTH);
    }

    #[test]
    fn nesting_past_the_limit_is_invalid() {
        let err = QueryExpr::try_from(or_chain(MAX_DEPTH + 1)).unwrap_err();
        assert!(err.is_invalid());
        assert!(err.message().contains("nested too deeply"));
    }

    #[test]
    fn converts_back_to_raw() {
        let expr = QueryExpr::or(
            QueryExpr::and_not(QueryExpr::term("Paris"), QueryExpr::term("France")),
            QueryExpr::term("Lear"),
        );
        let json = serde_json::to_string(&RawQuery::from(&expr)).unwrap();
        assert_eq!(
            json,
            r#"{"op":"or","args":[{"op":"andnot","args":["Paris","France"]},"Lear"]}"#
        );
        assert_eq!(from_json(&json).unwrap(), expr);
    }
}
