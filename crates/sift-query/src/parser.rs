//! Query parser.
//!
//! Parses a token stream into a query AST using recursive descent.
//!
//! # Grammar
//!
//! ```text
//! query    → or_expr
//! or_expr  → and_expr ("OR" and_expr)*
//! and_expr → primary (["AND"] ["NOT"] primary)*
//! primary  → TERM | QUOTED | "(" or_expr ")"
//! ```
//!
//! Adjacent operands are joined with an implicit AND. `NOT` is only valid after a left
//! operand, where it turns the join into a difference.
//!
//! # Precedence (highest to lowest)
//!
//! 1. Grouping: `(...)`
//! 2. AND / AND NOT (left-associative)
//! 3. OR (left-associative)
//!
//! Open groups and the operator depth of the resulting tree are both capped at
//! [`MAX_DEPTH`]; deeper queries are a parse error.

use std::mem;

use crate::{
    ast::{MAX_DEPTH, Operator, QueryExpr},
    error::{ParseError, QueryError},
    lexer::{Spanned, Token, tokenize_spanned},
};

/// Recursive descent parser for query expressions.
struct Parser {
    /// Token stream to parse.
    tokens: Vec<Spanned>,
    /// Current position in token stream.
    position: usize,
    /// Number of groups currently open.
    nesting: usize,
}

/// A parsed subexpression and its operator depth.
type Parsed = (QueryExpr, usize);

impl Parser {
    /// Creates a new parser from a token stream.
    fn new(tokens: Vec<Spanned>) -> Self {
        Self {
            tokens,
            position: 0,
            nesting: 0,
        }
    }

    /// Parses the token stream into a query expression.
    fn parse(mut self) -> Result<Option<QueryExpr>, ParseError> {
        if self.tokens.is_empty() {
            return Ok(None);
        }

        let (expr, _) = self.parse_or_expr()?;

        if let Some(spanned) = self.tokens.get(self.position) {
            let message = match spanned.token {
                Token::RParen => "unexpected closing parenthesis".to_string(),
                ref token => format!("unexpected token: {token:?}"),
            };
            return Err(ParseError::new(message, Some(spanned.position)));
        }

        Ok(Some(expr))
    }

    /// Parses: or_expr → and_expr ("OR" and_expr)*
    fn parse_or_expr(&mut self) -> Result<Parsed, ParseError> {
        let mut left = self.parse_and_expr()?;

        while self.check(&Token::Or) {
            let position = self.current_position();
            self.advance(); // consume OR
            let right = self.parse_and_expr()?;
            left = join(Operator::Or, left, right, position)?;
        }

        Ok(left)
    }

    /// Parses: and_expr → primary (["AND"] ["NOT"] primary)*
    fn parse_and_expr(&mut self) -> Result<Parsed, ParseError> {
        let mut left = self.parse_primary()?;

        loop {
            let position = self.current_position();

            let explicit_and = self.check(&Token::And);
            if explicit_and {
                self.advance(); // consume AND
            }

            let negated = self.check(&Token::Not);
            if negated {
                self.advance(); // consume NOT
            }

            if !explicit_and && !negated && !self.can_start_primary() {
                break;
            }

            let right = self.parse_primary()?;
            let op = if negated { Operator::AndNot } else { Operator::And };
            left = join(op, left, right, position)?;
        }

        Ok(left)
    }

    /// Checks if the current token can start a primary expression.
    fn can_start_primary(&self) -> bool {
        matches!(
            self.peek(),
            Some(Token::Term(_) | Token::Quoted(_) | Token::LParen)
        )
    }

    /// Parses: primary → TERM | QUOTED | "(" or_expr ")"
    fn parse_primary(&mut self) -> Result<Parsed, ParseError> {
        let position = self.current_position();

        match self.peek().cloned() {
            Some(Token::Term(text)) => {
                self.advance();
                Ok((QueryExpr::term(text), 0))
            }

            Some(Token::Quoted(text)) => {
                if text.is_empty() {
                    return Err(ParseError::new("empty quoted term", position));
                }
                self.advance();
                Ok((QueryExpr::term(text), 0))
            }

            Some(Token::LParen) => self.parse_group(),

            Some(Token::RParen) => Err(ParseError::new(
                "unexpected closing parenthesis",
                position,
            )),

            Some(Token::Or) => Err(ParseError::new(
                "unexpected OR (needs expression before it)",
                position,
            )),

            Some(Token::And) => Err(ParseError::new(
                "unexpected AND (needs expression before it)",
                position,
            )),

            Some(Token::Not) => Err(ParseError::new(
                "NOT needs a left operand to subtract from",
                position,
            )),

            None => Err(ParseError::new("unexpected end of query", None)),
        }
    }

    /// Parses a parenthesized group, consuming the surrounding parentheses.
    fn parse_group(&mut self) -> Result<Parsed, ParseError> {
        if self.nesting >= MAX_DEPTH {
            return Err(too_deep(self.current_position()));
        }

        self.advance(); // consume (
        self.nesting += 1;
        let inner = self.parse_or_expr()?;
        self.nesting -= 1;

        if !self.check(&Token::RParen) {
            return Err(ParseError::new(
                "expected closing parenthesis",
                self.current_position(),
            ));
        }
        self.advance(); // consume )

        Ok(inner)
    }

    /// Returns the current token without consuming it.
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position).map(|s| &s.token)
    }

    /// Returns the byte position of the current token, or `None` at end of input.
    fn current_position(&self) -> Option<usize> {
        self.tokens.get(self.position).map(|s| s.position)
    }

    /// Checks if the current token matches the given token.
    fn check(&self, token: &Token) -> bool {
        self.peek()
            .is_some_and(|t| mem::discriminant(t) == mem::discriminant(token))
    }

    /// Advances to the next token.
    fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }
}

/// Joins two operands under `op`, rejecting trees deeper than [`MAX_DEPTH`].
fn join(
    op: Operator,
    (left, left_depth): Parsed,
    (right, right_depth): Parsed,
    position: Option<usize>,
) -> Result<Parsed, ParseError> {
    let depth = left_depth.max(right_depth) + 1;
    if depth > MAX_DEPTH {
        return Err(too_deep(position));
    }
    Ok((QueryExpr::binary(op, left, right), depth))
}

/// The error for a query nested past [`MAX_DEPTH`].
fn too_deep(position: Option<usize>) -> ParseError {
    ParseError::new(
        format!("query nested too deeply (limit is {MAX_DEPTH})"),
        position,
    )
}

/// Parses a query string into an AST.
///
/// Returns `Ok(None)` for empty queries, `Ok(Some(expr))` for valid queries,
/// or `Err(QueryError)` for invalid syntax.
pub fn parse(input: &str) -> Result<Option<QueryExpr>, QueryError> {
    let tokens = tokenize_spanned(input)?;
    Parser::new(tokens)
        .parse()
        .map_err(|e| QueryError::from(e).with_query(input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QueryErrorKind;

    fn term(s: &str) -> QueryExpr {
        QueryExpr::term(s)
    }

    fn and(l: QueryExpr, r: QueryExpr) -> QueryExpr {
        QueryExpr::and(l, r)
    }

    fn or(l: QueryExpr, r: QueryExpr) -> QueryExpr {
        QueryExpr::or(l, r)
    }

    fn and_not(l: QueryExpr, r: QueryExpr) -> QueryExpr {
        QueryExpr::and_not(l, r)
    }

    fn parse_err(input: &str) -> QueryError {
        parse(input).unwrap_err()
    }

    #[test]
    fn empty_query() {
        assert_eq!(parse("").unwrap(), None);
        assert_eq!(parse("   ").unwrap(), None);
    }

    #[test]
    fn single_term() {
        assert_eq!(parse("Paris").unwrap(), Some(term("Paris")));
    }

    #[test]
    fn canonical_query() {
        assert_eq!(
            parse("(Paris AND NOT France) OR Lear").unwrap(),
            Some(or(and_not(term("Paris"), term("France")), term("Lear")))
        );
    }

    #[test]
    fn explicit_and() {
        assert_eq!(
            parse("Paris AND Lear").unwrap(),
            Some(and(term("Paris"), term("Lear")))
        );
    }

    #[test]
    fn implicit_and() {
        assert_eq!(parse("Paris Lear").unwrap(), parse("Paris AND Lear").unwrap());
    }

    #[test]
    fn bare_not_after_operand() {
        assert_eq!(
            parse("Paris NOT France").unwrap(),
            Some(and_not(term("Paris"), term("France")))
        );
    }

    #[test]
    fn and_is_left_associative() {
        assert_eq!(
            parse("a AND b AND NOT c").unwrap(),
            Some(and_not(and(term("a"), term("b")), term("c")))
        );
    }

    #[test]
    fn and_binds_tighter_than_or() {
        assert_eq!(
            parse("Paris AND NOT France OR Lear").unwrap(),
            Some(or(and_not(term("Paris"), term("France")), term("Lear")))
        );
        assert_eq!(
            parse("a OR b AND c").unwrap(),
            Some(or(term("a"), and(term("b"), term("c"))))
        );
    }

    #[test]
    fn or_is_left_associative() {
        assert_eq!(
            parse("a OR b OR c").unwrap(),
            Some(or(or(term("a"), term("b")), term("c")))
        );
    }

    #[test]
    fn not_of_group() {
        assert_eq!(
            parse("Paris AND NOT (France OR Lear)").unwrap(),
            Some(and_not(term("Paris"), or(term("France"), term("Lear"))))
        );
    }

    #[test]
    fn nested_groups() {
        assert_eq!(
            parse("((Paris))").unwrap(),
            Some(term("Paris"))
        );
    }

    #[test]
    fn quoted_terms_are_literal() {
        assert_eq!(
            parse("\"AND\" OR \"King Lear\"").unwrap(),
            Some(or(term("AND"), term("King Lear")))
        );
    }

    #[test]
    fn lowercase_keywords_are_terms() {
        assert_eq!(
            parse("Paris or Lear").unwrap(),
            Some(and(and(term("Paris"), term("or")), term("Lear")))
        );
    }

    #[test]
    fn query_string_round_trips() {
        for input in [
            "(Paris AND NOT France) OR Lear",
            "Paris AND NOT (France OR Lear)",
            "a OR (b AND c)",
            "\"OR\" AND \"King Lear\"",
        ] {
            let expr = parse(input).unwrap().unwrap();
            assert_eq!(expr.to_query_string(), input);
            assert_eq!(parse(&expr.to_query_string()).unwrap(), Some(expr));
        }
    }

    #[test]
    fn leading_not_is_rejected() {
        let err = parse_err("NOT France");
        assert!(err.message().contains("left operand"));
        assert_eq!(err.position(), Some(0));
        assert!(err.suggestion().is_some());
    }

    #[test]
    fn not_inside_group_without_operand_is_rejected() {
        let err = parse_err("Paris OR (NOT France)");
        assert_eq!(err.position(), Some(10));
    }

    #[test]
    fn double_not_is_rejected() {
        let err = parse_err("Paris AND NOT NOT France");
        assert_eq!(err.position(), Some(14));
    }

    #[test]
    fn unclosed_paren_error() {
        let err = parse_err("(Paris AND Lear");
        assert!(err.message().contains("closing parenthesis"));
        assert_eq!(err.position(), None);
        assert_eq!(err.query.as_deref(), Some("(Paris AND Lear"));
    }

    #[test]
    fn unexpected_closing_paren() {
        let err = parse_err("Paris)");
        assert!(err.message().contains("unexpected closing parenthesis"));
        assert_eq!(err.position(), Some(5));
    }

    #[test]
    fn dangling_operators() {
        assert!(parse_err("Paris OR").message().contains("end of query"));
        assert!(parse_err("Paris AND").message().contains("end of query"));
        assert!(parse_err("Paris AND NOT").message().contains("end of query"));
        assert!(parse_err("OR Lear").message().contains("unexpected OR"));
        assert!(parse_err("AND Lear").message().contains("unexpected AND"));
    }

    #[test]
    fn empty_quoted_term_is_rejected() {
        let err = parse_err("Paris OR \"\"");
        assert!(err.message().contains("empty"));
        assert_eq!(err.position(), Some(9));
    }

    #[test]
    fn lex_errors_surface_as_query_errors() {
        let err = parse_err("\"unclosed");
        assert!(matches!(err.kind, QueryErrorKind::Lex { position: 0, .. }));
    }

    #[test]
    fn deeply_nested_query() {
        let depth = 200;
        let input = format!("{}Lear{}", "(".repeat(depth), ")".repeat(depth));
        assert_eq!(parse(&input).unwrap(), Some(term("Lear")));
    }

    #[test]
    fn runaway_nesting_is_an_error_not_a_crash() {
        let depth = 200_000;
        let input = format!("{}Lear{}", "(".repeat(depth), ")".repeat(depth));
        let err = parse_err(&input);
        assert!(err.message().contains("nested too deeply"));
        assert_eq!(err.position(), Some(MAX_DEPTH));
    }

    #[test]
    fn nesting_at_the_limit_parses() {
        let input = format!("{}Lear{}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
        assert_eq!(parse(&input).unwrap(), Some(term("Lear")));
    }

    #[test]
    fn long_or_chain_is_bounded() {
        let at_limit = vec!["a"; MAX_DEPTH + 1].join(" OR ");
        assert_eq!(parse(&at_limit).unwrap().unwrap().depth(), MAX_DEPTH);

        let too_long = vec!["a"; 100_000].join(" OR ");
        let err = parse_err(&too_long);
        assert!(err.message().contains("nested too deeply"));
        // The first rejected OR is the one that would make the tree MAX_DEPTH + 1 deep.
        assert_eq!(err.position(), Some(2 + 5 * MAX_DEPTH));
    }

    #[test]
    fn long_implicit_and_chain_is_bounded() {
        let err = parse_err(&vec!["a"; 100_000].join(" "));
        assert!(err.message().contains("nested too deeply"));
    }

    #[test]
    fn groups_add_to_chain_depth() {
        let chain = vec!["a"; MAX_DEPTH].join(" OR ");
        assert_eq!(parse(&format!("({chain}) OR b")).unwrap().unwrap().depth(), MAX_DEPTH);

        let err = parse_err(&format!("(({chain}) OR b) OR c"));
        assert!(err.message().contains("nested too deeply"));
    }
}
