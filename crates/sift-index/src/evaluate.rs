//! Boolean query evaluation.
//!
//! Evaluation is a post-order fold over the query tree:
//! - a term evaluates to its postings, or the empty set if the index has never seen it
//! - `AND` is intersection, `OR` is union, `AND NOT` is difference
//!
//! Both operands of every operator are always evaluated. An empty left operand of `OR` does
//! not short-circuit the union, and an empty left operand of `AND NOT` still yields the empty
//! set. Term leaves are borrowed from the index so that no postings are copied until an
//! operator combines them.
//!
//! The fold recurses once per tree level. Trees from query text or a [`RawQuery`] are
//! bounded by [`MAX_DEPTH`](crate::MAX_DEPTH); trees built by hand should respect the same
//! bound.

use std::borrow::Cow;

use sift_query::{Operator, QueryError, QueryExpr, RawQuery, parse};

use crate::{Explanation, InvertedIndex, PostingsSet};

/// Evaluates `expr` against `index`, returning the matching documents.
///
/// The result is a fresh set; the index is never modified.
pub fn evaluate(index: &InvertedIndex, expr: &QueryExpr) -> PostingsSet {
    eval(index, expr).into_owned()
}

/// The empty set shared by every absent term.
static EMPTY: PostingsSet = PostingsSet::new();

/// Evaluates a node, borrowing term postings from the index.
fn eval<'i>(index: &'i InvertedIndex, expr: &QueryExpr) -> Cow<'i, PostingsSet> {
    match expr {
        QueryExpr::Term(term) => Cow::Borrowed(index.postings(term.as_str()).unwrap_or(&EMPTY)),
        QueryExpr::And(left, right) => eval_binary(index, Operator::And, left, right),
        QueryExpr::Or(left, right) => eval_binary(index, Operator::Or, left, right),
        QueryExpr::AndNot(left, right) => eval_binary(index, Operator::AndNot, left, right),
    }
}

/// Evaluates both operands, then combines them.
fn eval_binary<'i>(
    index: &'i InvertedIndex,
    op: Operator,
    left: &QueryExpr,
    right: &QueryExpr,
) -> Cow<'i, PostingsSet> {
    Cow::Owned(combine(op, &eval(index, left), &eval(index, right)))
}

/// Applies one operator's set semantics.
fn combine(op: Operator, left: &PostingsSet, right: &PostingsSet) -> PostingsSet {
    match op {
        Operator::And => left.intersection(right),
        Operator::Or => left.union(right),
        Operator::AndNot => left.difference(right),
    }
}

/// Evaluates a node and records how many documents each node matched.
fn explain_node<'i>(
    index: &'i InvertedIndex,
    expr: &QueryExpr,
) -> (Cow<'i, PostingsSet>, Explanation) {
    match expr {
        QueryExpr::Term(term) => {
            let set = index.postings(term.as_str()).unwrap_or(&EMPTY);
            let explanation = Explanation::leaf(format!("{:?}", term.as_str()), set.len());
            (Cow::Borrowed(set), explanation)
        }
        QueryExpr::And(left, right) => explain_binary(index, Operator::And, left, right),
        QueryExpr::Or(left, right) => explain_binary(index, Operator::Or, left, right),
        QueryExpr::AndNot(left, right) => explain_binary(index, Operator::AndNot, left, right),
    }
}

/// Explains both operands, then combines their sets.
fn explain_binary<'i>(
    index: &'i InvertedIndex,
    op: Operator,
    left: &QueryExpr,
    right: &QueryExpr,
) -> (Cow<'i, PostingsSet>, Explanation) {
    let (left_set, left_explanation) = explain_node(index, left);
    let (right_set, right_explanation) = explain_node(index, right);
    let set = combine(op, &left_set, &right_set);
    let explanation = Explanation::node(
        op.keyword(),
        set.len(),
        vec![left_explanation, right_explanation],
    );
    (Cow::Owned(set), explanation)
}

/// Evaluates queries against a built index.
///
/// Holds only a shared reference, so any number of evaluators can run concurrently over the
/// same index.
#[derive(Debug, Clone, Copy)]
pub struct QueryEvaluator<'a> {
    /// The index queries run against.
    index: &'a InvertedIndex,
}

impl<'a> QueryEvaluator<'a> {
    /// Creates an evaluator over `index`.
    pub const fn new(index: &'a InvertedIndex) -> Self {
        Self { index }
    }

    /// Returns the underlying index.
    pub const fn index(&self) -> &'a InvertedIndex {
        self.index
    }

    /// Evaluates a query tree.
    pub fn evaluate(&self, expr: &QueryExpr) -> PostingsSet {
        evaluate(self.index, expr)
    }

    /// Evaluates a query tree, returning the per-node breakdown.
    ///
    /// The root's match count equals the size of [`evaluate`](Self::evaluate)'s result.
    pub fn explain(&self, expr: &QueryExpr) -> Explanation {
        explain_node(self.index, expr).1
    }

    /// Parses and evaluates a textual query.
    ///
    /// Returns `Ok(None)` when the query contains no terms. Queries nested deeper than
    /// [`MAX_DEPTH`](crate::MAX_DEPTH) are rejected before evaluation.
    pub fn search(&self, query: &str) -> Result<Option<PostingsSet>, QueryError> {
        Ok(parse(query)?.map(|expr| self.evaluate(&expr)))
    }

    /// Validates and evaluates an untyped query tree.
    pub fn evaluate_raw(&self, raw: RawQuery) -> Result<PostingsSet, QueryError> {
        let expr = QueryExpr::try_from(raw)?;
        Ok(self.evaluate(&expr))
    }
}

#[cfg(test)]
mod tests {
    use sift_corpus::MemoryCorpus;

    use super::*;
    use crate::{MAX_DEPTH, build};

    fn index() -> InvertedIndex {
        build(
            &MemoryCorpus::new()
                .with_document("docA", ["Paris", "Lear"])
                .with_document("docB", ["Paris", "France"])
                .with_document("docC", ["Lear"]),
        )
        .unwrap()
    }

    fn ids(set: &PostingsSet) -> Vec<&str> {
        set.iter().map(|id| id.as_str()).collect()
    }

    fn term(text: &str) -> QueryExpr {
        QueryExpr::term(text)
    }

    #[test]
    fn term_returns_postings() {
        let index = index();
        assert_eq!(ids(&evaluate(&index, &term("Paris"))), vec!["docA", "docB"]);
    }

    #[test]
    fn absent_term_is_empty() {
        let index = index();
        assert!(evaluate(&index, &term("Berlin")).is_empty());
        assert!(evaluate(&index, &term("paris")).is_empty());
    }

    #[test]
    fn and_intersects() {
        let index = index();
        let expr = QueryExpr::and(term("Paris"), term("Lear"));
        assert_eq!(ids(&evaluate(&index, &expr)), vec!["docA"]);
    }

    #[test]
    fn or_unions() {
        let index = index();
        let expr = QueryExpr::or(term("France"), term("Lear"));
        assert_eq!(ids(&evaluate(&index, &expr)), vec!["docA", "docB", "docC"]);
    }

    #[test]
    fn and_not_subtracts() {
        let index = index();
        let expr = QueryExpr::and_not(term("Paris"), term("France"));
        assert_eq!(ids(&evaluate(&index, &expr)), vec!["docA"]);
    }

    #[test]
    fn canonical_query() {
        let index = index();
        let expr = QueryExpr::or(
            QueryExpr::and_not(term("Paris"), term("France")),
            term("Lear"),
        );
        assert_eq!(ids(&evaluate(&index, &expr)), vec!["docA", "docC"]);
    }

    #[test]
    fn empty_left_of_or_still_unions() {
        let index = index();
        let expr = QueryExpr::or(
            QueryExpr::and_not(term("Paris"), term("Paris")),
            term("France"),
        );
        let result = evaluate(&index, &expr);
        assert_eq!(ids(&result), vec!["docB"]);
        assert_eq!(&result, index.postings("France").unwrap());

        let expr = QueryExpr::or(term("Berlin"), term("Lear"));
        assert_eq!(ids(&evaluate(&index, &expr)), vec!["docA", "docC"]);
    }

    #[test]
    fn empty_left_of_and_not_is_empty() {
        let index = index();
        let expr = QueryExpr::and_not(term("Berlin"), term("Paris"));
        assert!(evaluate(&index, &expr).is_empty());
    }

    #[test]
    fn or_of_nonempty_left_is_not_left_alone() {
        let index = index();
        let expr = QueryExpr::or(term("France"), term("Lear"));
        let result = evaluate(&index, &expr);
        assert_ne!(&result, index.postings("France").unwrap());
    }

    #[test]
    fn evaluation_leaves_index_untouched() {
        let index = index();
        let before = index.clone();
        let expr = QueryExpr::or(
            QueryExpr::and(term("Paris"), term("Lear")),
            QueryExpr::and_not(term("Lear"), term("Paris")),
        );
        evaluate(&index, &expr);
        evaluate(&index, &expr);
        assert_eq!(index, before);
    }

    #[test]
    fn search_parses_then_evaluates() {
        let index = index();
        let evaluator = QueryEvaluator::new(&index);

        let hits = evaluator.search("(Paris AND NOT France) OR Lear").unwrap().unwrap();
        assert_eq!(ids(&hits), vec!["docA", "docC"]);

        let hits = evaluator.search("Paris Lear").unwrap().unwrap();
        assert_eq!(ids(&hits), vec!["docA"]);

        assert_eq!(evaluator.search("   ").unwrap(), None);
        assert!(evaluator.search("Paris AND").is_err());
    }

    #[test]
    fn evaluate_raw_validates_first() {
        let index = index();
        let evaluator = QueryEvaluator::new(&index);

        let raw = RawQuery::node("or", vec![RawQuery::term("France"), RawQuery::term("Lear")]);
        assert_eq!(ids(&evaluator.evaluate_raw(raw).unwrap()), vec!["docA", "docB", "docC"]);

        let raw = RawQuery::node("xor", vec![RawQuery::term("France"), RawQuery::term("Lear")]);
        assert!(evaluator.evaluate_raw(raw).unwrap_err().is_invalid());

        let raw = RawQuery::node("and", vec![RawQuery::term("France")]);
        assert!(evaluator.evaluate_raw(raw).unwrap_err().is_invalid());
    }

    #[test]
    fn explain_counts_every_node() {
        let index = index();
        let expr = QueryExpr::or(
            QueryExpr::and_not(term("Paris"), term("France")),
            term("Lear"),
        );
        let explanation = QueryEvaluator::new(&index).explain(&expr);

        assert_eq!(explanation.label, "OR");
        assert_eq!(explanation.matches, 2);
        assert_eq!(explanation.children[0].label, "AND NOT");
        assert_eq!(explanation.children[0].matches, 1);
        assert_eq!(explanation.children[0].children[1].label, "\"France\"");
        assert_eq!(explanation.children[1].matches, 2);
    }

    #[test]
    fn runaway_nesting_is_rejected_before_evaluation() {
        let index = index();
        let evaluator = QueryEvaluator::new(&index);

        let nested = format!("{}Lear{}", "(".repeat(100_000), ")".repeat(100_000));
        let err = evaluator.search(&nested).unwrap_err();
        assert!(err.message().contains("nested too deeply"));

        let chain = vec!["Lear"; 100_000].join(" OR ");
        assert!(evaluator.search(&chain).is_err());
    }

    #[test]
    fn chain_at_the_depth_limit_evaluates() {
        let index = index();
        let chain = (0..MAX_DEPTH).fold(term("France"), |left, _| {
            QueryExpr::or(left, term("Lear"))
        });
        assert_eq!(chain.depth(), MAX_DEPTH);

        let evaluator = QueryEvaluator::new(&index);
        assert_eq!(ids(&evaluator.evaluate(&chain)), vec!["docA", "docB", "docC"]);
        assert_eq!(evaluator.explain(&chain).matches, 3);
    }
}
