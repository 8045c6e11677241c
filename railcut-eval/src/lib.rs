// Bound-set evaluation for LUT cascade decomposition.
//
// A function of n variables decomposes through a k-input LUT stage as
// f(X) = h(g_1(B∪S), .., g_r(B∪S), F) where B is a bound set of k variables
// feeding the stage, F the free set feeding only the outer function, and S
// an optional shared subset of B allowed on both sides. The number of wires
// r between the stages (the "rails") is the ceiling log of the column
// multiplicity: the count of distinct cofactors of f over the bound set.
//
// The pieces, bottom up:
//
//   - digits: count distinct cofactor columns for one split, optionally
//     producing the column-pattern matrix (which bound minterms map to
//     which distinct column).
//   - hash: open-addressed canonicaliser for columns wider than 16 bits.
//   - chase: the C(n,k) subset walk as a stream of single transpositions,
//     so each split costs one truth-table variable swap to reach.
//   - cofs: per-LUT-size product-cofactor tables for shared evaluation.
//   - shared: how far a candidate shared subset collapses the columns.
//   - search: the evaluator handle driving the walk, the shared search and
//     the sampled fallback for functions too wide to walk.
//   - encode: the packed (multiplicity, shared mask, bound mask) result.
//   - report: human-readable reports and distribution studies.
//
// The truth table under evaluation is permuted in place during a walk and
// restored before control returns; callers holding other views of the same
// table during a call would observe torn state.

mod chase;
mod cofs;
mod digits;
mod encode;
mod hash;
mod report;
mod search;
mod shared;

pub use encode::SplitCode;
pub use report::{myu_distribution, report_best, report_one, MyuDistribution};
pub use search::{BestSplit, BsEval, SplitSearch, SplitsSearch};
