// Thin facade over the railcut crates: re-exports the evaluator surface so
// one dependency suffices for embedders, while bin.rs drives it from the
// command line.

pub use railcut_eval::{
    myu_distribution, report_best, report_one, BestSplit, BsEval, MyuDistribution, SplitCode,
    SplitSearch, SplitsSearch,
};
