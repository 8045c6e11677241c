// Shared-variable evaluation. Letting a bound variable also feed the outer
// function collapses the columns that differ only in that variable, so the
// effective column multiplicity under a candidate shared set is the largest
// number of pattern rows that survive any one assignment of the set. The
// search grows the shared set one variable at a time until the rail budget
// is met.

use railcut_base::{ceil_log2, tt_intersect, tt_word_num, TRUTH6};

use crate::cofs::CofactorSets;

/// Sentinel rail count meaning "no shared set fits".
const RAILS_NONE: usize = 100;

pub(crate) struct SharedChoice {
    pub(crate) rails: usize,
    pub(crate) set: u32,
    pub(crate) size: usize,
}

/// Does the pattern row intersect the literal of bound variable `var` with
/// the given polarity? Works for any row width; variables beyond the sixth
/// select alternating limb blocks.
fn row_hits_literal(row: &[u64], var: usize, neg: bool) -> bool {
    if var < 6 {
        let mask = if neg { !TRUTH6[var] } else { TRUTH6[var] };
        row.iter().any(|&w| w & mask != 0)
    } else {
        let block = 1usize << (var - 6);
        row.iter()
            .enumerate()
            .any(|(i, &w)| w != 0 && ((i & block != 0) != neg))
    }
}

/// Fast path for a single shared variable: with nrails = ceil(log2 myu),
/// look for one bound variable both of whose cofactors keep at most
/// 2^(nrails-1) rows alive. Returns nrails - 1 when found, nrails
/// otherwise.
pub(crate) fn check_one_shared(pat: &[u64], nbound: usize, myu: usize) -> usize {
    debug_assert!(myu > 2);
    let nrails = ceil_log2(myu);
    let cap = 1usize << (nrails - 1);
    let row_words = tt_word_num(nbound);
    for var in 0..nbound {
        let mut both = true;
        for neg in [false, true] {
            let mut count = 0;
            for m in 0..myu {
                let row = &pat[m * row_words..(m + 1) * row_words];
                if row_hits_literal(row, var, neg) {
                    count += 1;
                    if count > cap {
                        both = false;
                        break;
                    }
                }
            }
            if !both {
                break;
            }
        }
        if both {
            return nrails - 1;
        }
    }
    nrails
}

/// Number of pattern rows with a nonempty intersection with one product
/// cofactor.
fn surviving_rows(pat: &[u64], myu: usize, row_words: usize, cof: &[u64]) -> usize {
    (0..myu)
        .filter(|&m| tt_intersect(&pat[m * row_words..(m + 1) * row_words], cof, false))
        .count()
}

/// Largest survivor count across the 2^card assignments of one subset, or 0
/// as soon as any assignment exceeds `cap`.
pub(crate) fn surviving_rows_max(
    pat: &[u64],
    myu: usize,
    row_words: usize,
    cofs: &[u64],
    card: usize,
    cap: usize,
) -> usize {
    let mut best = 0;
    for m in 0..(1usize << card) {
        let count = surviving_rows(pat, myu, row_words, &cofs[m * row_words..(m + 1) * row_words]);
        if count > cap {
            return 0;
        }
        best = best.max(count);
    }
    best
}

/// Walk the cofactor-set groups by growing cardinality, skipping sets that
/// touch carry places, and return the first cardinality level containing a
/// set that meets the rail budget (keeping the lowest rail count seen on
/// that level). `pat` holds `myu` rows over the bound side of `nbound`
/// variables.
pub(crate) fn shared_search(
    pat: &[u64],
    cofs: &CofactorSets,
    nbound: usize,
    myu: usize,
    nrails: usize,
    cvar_mask: u32,
) -> Option<SharedChoice> {
    let row_words = tt_word_num(nbound);
    debug_assert_eq!(row_words, cofs.nwords);
    let max_shared = nbound.saturating_sub(nrails);
    let budget = 1usize << nrails;
    let mut best_rails = RAILS_NONE;
    let mut best_set = 0u32;
    let mut best_size = 0usize;
    for card in 1..max_shared {
        for &(set, start) in &cofs.groups[card] {
            if set & cvar_mask != 0 {
                continue;
            }
            let myu_cur = surviving_rows_max(pat, myu, row_words, cofs.cofactors_at(start), card, budget);
            if myu_cur == 0 {
                continue;
            }
            let rails_cur = ceil_log2(myu_cur);
            if rails_cur > nrails {
                continue;
            }
            if best_rails > rails_cur {
                best_rails = rails_cur;
                best_set = set;
                best_size = card;
            }
        }
        if best_rails <= nrails {
            break;
        }
    }
    if best_rails == RAILS_NONE {
        None
    } else {
        Some(SharedChoice { rails: best_rails, set: best_set, size: best_size })
    }
}
