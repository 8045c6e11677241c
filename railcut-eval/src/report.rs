// Human-readable reports and the random-function generator used to study
// multiplicity distributions. These return values rather than printing so
// the CLI (and tests) decide how to render them.

use std::fmt;

use rand::RngCore;

use railcut_base::{ceil_log2, tt_get_bit, tt_set_bit, tt_to_hex, tt_word_num};

use crate::search::BsEval;

/// Column multiplicity of one function under the natural split.
pub fn report_one(tt: &[u64], nvars: usize, nbound: usize) -> String {
    let mut eval = BsEval::new();
    let myu = eval.column_count(tt, nvars, nvars - nbound);
    format!(
        "Function: {}\nThe column multiplicity of the {}-var function with bound-sets of size {} is {}.",
        tt_to_hex(tt, nvars),
        nvars,
        nbound,
        myu
    )
}

/// Walk all splits of one function and report the winner.
pub fn report_best(tt: &mut [u64], nvars: usize, nbound: usize, shared: bool) -> String {
    let mut eval = BsEval::new();
    eval.prepare_walk(nvars, nbound);
    let original = tt_to_hex(tt, nvars);
    let best = eval.eval_best(tt, nvars, 0, nvars - nbound, shared, 0);
    let perm = best
        .perm
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "The minimum {} of the {}-var function with bound-sets of size {} is {}.\n\
         Original: {}\nPermuted: {}\nPermutation is {}",
        if shared { "number of rails" } else { "column multiplicity" },
        nvars,
        nbound,
        best.cost,
        original,
        tt_to_hex(&best.tt, nvars),
        perm
    )
}

/// Histograms of the cost of `nfuncs` random functions. When `shared` is
/// set the cost is a rail count and only `myu` is meaningful; otherwise
/// `myu` holds multiplicities and `rails` their logarithms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MyuDistribution {
    pub nfuncs: usize,
    pub nbound: usize,
    pub shared: bool,
    pub try_all: bool,
    pub myu: Vec<usize>,
    pub rails: Vec<usize>,
}

/// Evaluate `nfuncs` random functions drawn from the evaluator's generator:
/// uniform truth tables when `nmints` is zero, otherwise functions with
/// exactly `nmints` positive minterms. With `try_all` every split is walked,
/// otherwise only the natural split is scored. Deterministic for a given
/// evaluator seed.
pub fn myu_distribution(
    eval: &mut BsEval,
    nvars: usize,
    nbound: usize,
    nfuncs: usize,
    nmints: usize,
    try_all: bool,
    shared: bool,
) -> MyuDistribution {
    if try_all {
        eval.prepare_walk(nvars, nbound);
    }
    let nwords = tt_word_num(nvars);
    let mut fun = vec![0u64; nwords];
    let mut myu_hist = vec![0usize; (1 << nbound) + 1];
    let mut rails_hist = vec![0usize; nbound + 2];
    for _ in 0..nfuncs {
        if nmints == 0 {
            for w in fun.iter_mut() {
                *w = eval.rng.next_u64();
            }
        } else {
            fun.fill(0);
            for _ in 0..nmints {
                let mut m = eval.rng.next_u32() as usize % (1 << nvars);
                while tt_get_bit(&fun, m) {
                    m = eval.rng.next_u32() as usize % (1 << nvars);
                }
                tt_set_bit(&mut fun, m);
            }
        }
        let cost = if try_all {
            eval.eval_best(&mut fun, nvars, 0, nvars - nbound, shared, 0).cost
        } else if shared {
            eval.rail_count(&fun, nvars, nvars - nbound)
        } else {
            eval.column_count(&fun, nvars, nvars - nbound)
        };
        myu_hist[cost] += 1;
        rails_hist[ceil_log2(cost)] += 1;
    }
    MyuDistribution {
        nfuncs,
        nbound,
        shared,
        try_all,
        myu: myu_hist,
        rails: rails_hist,
    }
}

fn write_histogram(f: &mut fmt::Formatter<'_>, hist: &[usize], total: usize) -> fmt::Result {
    let mut first = true;
    for (value, &count) in hist.iter().enumerate() {
        if count == 0 {
            continue;
        }
        if !first {
            write!(f, "  ")?;
        }
        write!(f, "{}={} ({:.2} %)", value, count, 100.0 * count as f64 / total as f64)?;
        first = false;
    }
    writeln!(f)
}

impl fmt::Display for MyuDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.try_all { "MINIMUM" } else { "ORIGINAL" };
        if self.shared {
            writeln!(
                f,
                "Distribution of the {} number of rails for bound set size {} with one shared variable:",
                kind, self.nbound
            )?;
            write_histogram(f, &self.myu, self.nfuncs)
        } else {
            writeln!(
                f,
                "Distribution of the {} column multiplicity for bound set size {} with no shared variables:",
                kind, self.nbound
            )?;
            write_histogram(f, &self.myu, self.nfuncs)?;
            writeln!(
                f,
                "Distribution of the {} number of rails for bound set size {} with no shared variables:",
                kind, self.nbound
            )?;
            write_histogram(f, &self.rails, self.nfuncs)
        }
    }
}
