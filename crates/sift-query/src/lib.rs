//! Boolean query parsing and AST for sift.
//!
//! Queries are binary trees over terms with three operators:
//!
//! - **AND**: `Paris AND Lear` (or just `Paris Lear`) - documents containing both
//! - **OR**: `Paris OR Lear` - documents containing either
//! - **AND NOT**: `Paris AND NOT France` - documents containing the left side but not the right
//! - **Grouping**: `(Paris AND NOT France) OR Lear` - precedence control
//! - **Quoting**: `"OR"` - a literal term that would otherwise be a keyword
//!
//! There is no standalone NOT: negation always subtracts from a left operand.
//!
//! Query text and [`RawQuery`] trees nested deeper than [`MAX_DEPTH`] operators are rejected
//! with a [`QueryError`] rather than parsed.
//!
//! # Example
//!
//! ```
//! use sift_query::{QueryExpr, parse};
//!
//! let expr = parse("(Paris AND NOT France) OR Lear").unwrap().unwrap();
//! assert_eq!(
//!     expr,
//!     QueryExpr::or(
//!         QueryExpr::and_not(QueryExpr::term("Paris"), QueryExpr::term("France")),
//!         QueryExpr::term("Lear"),
//!     )
//! );
//! ```

#![warn(missing_docs)]

mod ast;
mod error;
mod lexer;
mod parser;
mod raw;

pub use ast::{MAX_DEPTH, Operator, QueryExpr};
pub use error::{LexError, ParseError, QueryError, QueryErrorKind};
pub use lexer::{Token, tokenize};
pub use parser::parse;
pub use raw::RawQuery;
