// Best-split search. The evaluator walks every assignment of variables to
// the bound places using the memoised Chase pair stream: each step costs one
// adjacent variable swap on the truth table plus one digitiser scan. The
// handle owns all scratch state and the lazily built per-size caches, so it
// is allocated once and reused across many functions; it is not thread-safe
// and parallel callers allocate one handle per thread.

use std::collections::HashMap;

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use tracing::debug;

use railcut_base::{
    ceil_log2, invariant, tt_exchange_vars, tt_move_var, tt_word_num, MAX_TT_VARS,
};

use crate::chase::chase_pairs;
use crate::cofs::CofactorSets;
use crate::digits::Scratch;
use crate::encode::SplitCode;
use crate::shared::{shared_search, SharedChoice};

const DEFAULT_SEED: u64 = 0;

/// Reusable bound-set evaluator. Chase pair streams are memoised per
/// (permuted-variable, bound-size) pair and cofactor-set tables per LUT
/// width; neither cache shrinks for the lifetime of the handle.
pub struct BsEval {
    nperm: usize,  // variables permuted by the prepared walk
    nbound: usize, // bound places chosen by the prepared walk
    nlut: usize,   // LUT width of the prepared cofactor sets
    pairs: HashMap<(usize, usize), Vec<(usize, usize)>>,
    cofs: HashMap<usize, CofactorSets>,
    pub(crate) scr: Scratch,
    pub(crate) rng: SmallRng,
}

/// The winning split of one walk: its cost (column multiplicity, or rail
/// count on the pattern-aware path), the permuted truth table achieving it,
/// and the variable-of-place permutation that produced it.
#[derive(Clone, Debug)]
pub struct BestSplit {
    pub cost: usize,
    pub tt: Vec<u64>,
    pub perm: Vec<usize>,
}

/// Outcome of `find_split`: the encoded winner (None when no split fits the
/// rail budget) and the best raw column multiplicity seen on the walk.
#[derive(Clone, Debug)]
pub struct SplitSearch {
    pub code: Option<SplitCode>,
    pub myu: usize,
}

/// Outcome of `find_split_all`: every encoded candidate tied for best
/// (empty when nothing fits the rail budget) and the best raw column
/// multiplicity seen.
#[derive(Clone, Debug)]
pub struct SplitsSearch {
    pub codes: Vec<SplitCode>,
    pub myu: usize,
}

#[derive(Clone)]
struct ScoredSet {
    vars: Vec<usize>,
    myu: usize,
}

struct AllBest {
    myu: usize,
    size: usize,
    codes: Vec<SplitCode>,
}

impl BsEval {
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    pub fn with_seed(seed: u64) -> Self {
        BsEval {
            nperm: 0,
            nbound: 0,
            nlut: 0,
            pairs: HashMap::new(),
            cofs: HashMap::new(),
            scr: Scratch::new(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = SmallRng::seed_from_u64(seed);
    }

    /// Select (and on first use build) the Chase pair stream walking all
    /// choices of `nbound` bound places among `nperm` permuted variables.
    pub fn prepare_walk(&mut self, nperm: usize, nbound: usize) {
        assert!(nbound >= 1 && nperm > nbound && nperm <= MAX_TT_VARS);
        self.nperm = nperm;
        self.nbound = nbound;
        self.pairs
            .entry((nperm, nbound))
            .or_insert_with(|| chase_pairs(nperm, nbound));
    }

    /// Select (and on first use build) the cofactor-set tables for a bound
    /// side of `nlut` variables.
    pub fn prepare_lut(&mut self, nlut: usize) {
        assert!(nlut >= 1 && nlut <= MAX_TT_VARS);
        self.nlut = nlut;
        self.cofs.entry(nlut).or_insert_with(|| CofactorSets::new(nlut));
    }

    /// Column multiplicity of `tt` with `nfree` free variables in the low
    /// places.
    pub fn column_count(&mut self, tt: &[u64], nvars: usize, nfree: usize) -> usize {
        self.scr.column_count(tt, nvars, nfree, false)
    }

    /// Pattern-aware split cost; see `Scratch::rail_count`.
    pub fn rail_count(&mut self, tt: &[u64], nvars: usize, nfree: usize) -> usize {
        self.scr.rail_count(tt, nvars, nfree)
    }

    /// Walk all bound-set choices and keep the cheapest split. `tt` is
    /// permuted in place during the walk and restored to its original
    /// variable order before returning. Ties are broken by reservoir
    /// sampling so every cheapest split is equally likely. When
    /// `jump_ratio` is nonzero, one uniformly chosen step of the walk is
    /// snapshotted and promoted to the result with probability
    /// 1/jump_ratio, which lets outer loops diversify.
    pub fn eval_best(
        &mut self,
        tt: &mut [u64],
        nvars: usize,
        ncarry: usize,
        nfree: usize,
        shared: bool,
        jump_ratio: u32,
    ) -> BestSplit {
        let nperm = nvars - ncarry;
        assert_eq!(self.nperm, nperm);
        assert_eq!(self.nbound, nvars - nfree - ncarry);
        assert!(nfree >= 1);
        let nwords = tt_word_num(nvars);
        debug_assert_eq!(tt.len(), nwords);
        let mut place_of_var: Vec<usize> = (0..nvars).collect();
        let mut var_of_place: Vec<usize> = (0..nvars).collect();
        let mut best = BestSplit {
            cost: 1 << nvars,
            tt: vec![0u64; nwords],
            perm: (0..nvars).collect(),
        };
        let mut snap: Option<BestSplit> = None;
        let pairs = self.pairs.get(&(nperm, self.nbound)).expect("walk not prepared");
        let jump_at = if jump_ratio > 0 {
            self.rng.next_u32() as usize % pairs.len()
        } else {
            usize::MAX
        };
        let mut ties = 0u32;
        for (step, &(var0, var1)) in pairs.iter().enumerate() {
            let cost = if shared {
                self.scr.rail_count(tt, nvars, nfree)
            } else {
                self.scr.column_count(tt, nvars, nfree, false)
            };
            if step == jump_at {
                snap = Some(BestSplit {
                    cost,
                    tt: tt.to_vec(),
                    perm: var_of_place.clone(),
                });
            }
            if cost < best.cost {
                best.cost = cost;
                best.tt.copy_from_slice(tt);
                best.perm.copy_from_slice(&var_of_place);
                ties = 1;
            } else if cost == best.cost {
                ties += 1;
                if self.rng.next_u32() % ties == 0 {
                    best.tt.copy_from_slice(tt);
                    best.perm.copy_from_slice(&var_of_place);
                }
            }
            tt_exchange_vars(tt, nvars, &mut place_of_var, &mut var_of_place, var0, var1);
        }
        for v in 0..nperm {
            tt_move_var(tt, nvars, &mut place_of_var, &mut var_of_place, v, v);
        }
        if jump_ratio > 0 && self.rng.next_u32() % jump_ratio == 0 {
            if let Some(snap) = snap {
                debug!(cost = snap.cost, "promoting jump snapshot");
                return snap;
            }
        }
        best
    }

    /// Shared-variable evaluation of the current split of `tt`: rebuild the
    /// column pattern, then search the cofactor sets for the smallest
    /// shared subset meeting the rail budget, excluding carry places.
    pub(crate) fn shared_eval_best(
        &mut self,
        tt: &[u64],
        nvars: usize,
        ncarry: usize,
        nfree: usize,
        myu_expected: usize,
        nrails: usize,
    ) -> Option<SharedChoice> {
        let nbound = nvars - nfree;
        assert_eq!(self.nlut, nbound);
        let cvar_mask = if ncarry > 0 {
            ((1u32 << ncarry) - 1) << (nbound - ncarry)
        } else {
            0
        };
        let myu = self.scr.column_count(tt, nvars, nfree, true);
        debug_assert_eq!(myu, myu_expected);
        debug_assert!(ceil_log2(myu) >= nrails);
        let cofs = self.cofs.get(&self.nlut).expect("cofactor sets not prepared");
        shared_search(&self.scr.pat, cofs, nbound, myu, nrails, cvar_mask)
    }

    /// Find the bound set and shared set of one cascade stage: walk all
    /// splits without sharing, then if the winner still exceeds the rail
    /// budget try shared sets for every budget up to `nrails`, stopping at
    /// the first fit. The top `ncarry` variables are held fixed and counted
    /// as part of the LUT.
    pub fn find_split(
        &mut self,
        tt: &[u64],
        nvars: usize,
        ncarry: usize,
        nrails: usize,
        nlut: usize,
        jump_ratio: u32,
    ) -> SplitSearch {
        self.prepare_walk(nvars - ncarry, nlut - ncarry);
        self.prepare_lut(nlut);
        let mut copy = tt.to_vec();
        let best = self.eval_best(&mut copy, nvars, ncarry, nvars - nlut, false, jump_ratio);
        let myu_walk = best.cost;
        let mut rails_min = ceil_log2(myu_walk);
        let mut shared_set = 0u32;
        for budget in 1..=nrails {
            if rails_min <= budget {
                break;
            }
            if let Some(choice) =
                self.shared_eval_best(&best.tt, nvars, ncarry, nvars - nlut, myu_walk, budget)
            {
                rails_min = choice.rails;
                shared_set = choice.set;
            }
        }
        debug!(myu = myu_walk, rails = rails_min, shared = shared_set, "split search done");
        if rails_min > nrails {
            return SplitSearch { code: None, myu: myu_walk };
        }
        let myu_fit = 1usize << rails_min;
        let code = SplitCode::from_parts(&best.perm, nvars, nlut, shared_set, myu_fit);
        SplitSearch { code: Some(code), myu: myu_walk }
    }

    /// Collect every split tied for best. Candidates come either from the
    /// full Chase walk or, when `nsubsets` and `nbest` are given and the
    /// walk would be too large, from three rounds of random subset
    /// sampling; candidates within `myu_increase` of the running best are
    /// also shared-evaluated. Ties on (multiplicity, shared-set size) are
    /// all collected; the list is empty when nothing fits the rail budget.
    pub fn find_split_all(
        &mut self,
        tt: &[u64],
        nvars: usize,
        ncarry: usize,
        nrails: usize,
        nlut: usize,
        myu_increase: usize,
        nsubsets: usize,
        nbest: usize,
    ) -> SplitsSearch {
        let nfree = nvars - nlut;
        let nperm = nvars - ncarry;
        self.prepare_walk(nperm, nlut - ncarry);
        self.prepare_lut(nlut);
        let mut copy = tt.to_vec();
        let mut place_of_var: Vec<usize> = (0..nvars).collect();
        let mut var_of_place: Vec<usize> = (0..nvars).collect();
        let mut myu_orig_best = 1usize << nvars;
        let mut myu_seen = 1usize << nvars;
        let mut best = AllBest { myu: 1 << nvars, size: nvars, codes: Vec::new() };
        if nsubsets > 0 && nbest > 0 && nvars > nlut + 1 {
            let mut all_sets = self.sample_bound_sets(tt, nvars, ncarry, nlut, nsubsets, nbest);
            all_sets.sort_by_key(|s| s.myu);
            for set in all_sets.iter().take(nbest) {
                myu_orig_best = myu_orig_best.min(set.myu);
                myu_seen = myu_seen.min(set.myu);
                for (k, &var) in set.vars.iter().enumerate() {
                    tt_move_var(
                        &mut copy,
                        nvars,
                        &mut place_of_var,
                        &mut var_of_place,
                        var,
                        nvars - nlut + k,
                    );
                }
                self.consider_split(
                    &copy,
                    &var_of_place,
                    nvars,
                    ncarry,
                    nrails,
                    nlut,
                    set.myu,
                    myu_orig_best,
                    myu_increase,
                    &mut best,
                );
            }
        } else {
            let pairs = std::mem::take(self.pairs.get_mut(&(nperm, nlut - ncarry)).unwrap());
            for &(var0, var1) in pairs.iter() {
                let myu_this = self.scr.column_count(&copy, nvars, nfree, false);
                myu_orig_best = myu_orig_best.min(myu_this);
                myu_seen = myu_seen.min(myu_this);
                self.consider_split(
                    &copy,
                    &var_of_place,
                    nvars,
                    ncarry,
                    nrails,
                    nlut,
                    myu_this,
                    myu_orig_best,
                    myu_increase,
                    &mut best,
                );
                tt_exchange_vars(&mut copy, nvars, &mut place_of_var, &mut var_of_place, var0, var1);
            }
            self.pairs.insert((nperm, nlut - ncarry), pairs);
        }
        for v in 0..nperm {
            tt_move_var(&mut copy, nvars, &mut place_of_var, &mut var_of_place, v, v);
        }
        if copy[..] != *tt {
            let _ = invariant("truth table failed to restore after split search");
        }
        if best.myu > (1usize << nrails) {
            return SplitsSearch { codes: Vec::new(), myu: myu_seen };
        }
        debug!(
            myu = best.myu,
            candidates = best.codes.len(),
            "collected tied best splits"
        );
        SplitsSearch { codes: best.codes, myu: myu_seen }
    }

    /// Shared-evaluate one candidate split and fold it into the running
    /// best, collecting ties on (multiplicity, shared-set size).
    #[allow(clippy::too_many_arguments)]
    fn consider_split(
        &mut self,
        copy: &[u64],
        var_of_place: &[usize],
        nvars: usize,
        ncarry: usize,
        nrails: usize,
        nlut: usize,
        myu_this: usize,
        myu_orig_best: usize,
        myu_increase: usize,
        best: &mut AllBest,
    ) {
        if myu_this > myu_orig_best + myu_increase {
            return;
        }
        let nfree = nvars - nlut;
        let mut myu_adj = myu_this;
        let mut shared = 0u32;
        let mut size = 0usize;
        if myu_this > 2 {
            let mut rails_min = usize::MAX;
            let mut shared_this = 0u32;
            let mut size_this = 0usize;
            for budget in 1..=nrails {
                if rails_min <= budget {
                    break;
                }
                if let Some(c) =
                    self.shared_eval_best(copy, nvars, ncarry, nfree, myu_this, budget)
                {
                    rails_min = c.rails;
                    shared_this = c.set;
                    size_this = c.size;
                }
            }
            if rails_min <= nrails {
                myu_adj = 1 << rails_min;
                shared = shared_this;
                size = size_this;
            }
        }
        if best.myu > myu_adj || (best.myu == myu_adj && best.size >= size) {
            let tied = best.myu == myu_adj && best.size == size;
            best.myu = myu_adj;
            best.size = size;
            let code = SplitCode::from_parts(var_of_place, nvars, nlut, shared, myu_adj);
            if !tied {
                best.codes.clear();
            }
            best.codes.push(code);
        }
    }

    /// Three rounds of random bound-set sampling for functions too wide for
    /// the full walk: score `nsubsets` random candidate sets, then reseed
    /// the variable pool from the winners and repeat.
    fn sample_bound_sets(
        &mut self,
        tt: &[u64],
        nvars: usize,
        ncarry: usize,
        nlut: usize,
        nsubsets: usize,
        nbest: usize,
    ) -> Vec<ScoredSet> {
        let size = nlut - ncarry;
        let mut all = Vec::with_capacity(3 * nsubsets);
        let mut sets: Vec<ScoredSet> = Vec::new();
        for round in 0..3 {
            let pool: Vec<usize> = if round == 0 {
                (0..nvars - ncarry).collect()
            } else {
                winners_pool(&sets, nbest)
            };
            if pool.len() <= size {
                break;
            }
            sets = self.random_subsets(&pool, size, nsubsets);
            self.score_sets(&mut sets, tt, nvars, ncarry, nlut);
            sets.sort_by_key(|s| s.myu);
            all.extend_from_slice(&sets);
        }
        all
    }

    fn random_subsets(&mut self, pool: &[usize], size: usize, nsubsets: usize) -> Vec<ScoredSet> {
        assert!(pool.len() > size);
        let mut sets = Vec::with_capacity(nsubsets);
        for _ in 0..nsubsets {
            let mut vars: Vec<usize> = Vec::with_capacity(size);
            while vars.len() < size {
                let var = pool[self.rng.next_u32() as usize % pool.len()];
                if let Err(pos) = vars.binary_search(&var) {
                    vars.insert(pos, var);
                }
            }
            sets.push(ScoredSet { vars, myu: 0 });
        }
        sets
    }

    /// Score each candidate set by moving its variables to the bound places
    /// and reading the column multiplicity; the table is restored (and
    /// checked) afterwards.
    fn score_sets(
        &mut self,
        sets: &mut [ScoredSet],
        tt: &[u64],
        nvars: usize,
        ncarry: usize,
        nlut: usize,
    ) {
        let mut copy = tt.to_vec();
        let mut place_of_var: Vec<usize> = (0..nvars).collect();
        let mut var_of_place: Vec<usize> = (0..nvars).collect();
        for set in sets.iter_mut() {
            debug_assert_eq!(set.vars.len(), nlut - ncarry);
            for (k, &var) in set.vars.iter().enumerate() {
                tt_move_var(
                    &mut copy,
                    nvars,
                    &mut place_of_var,
                    &mut var_of_place,
                    var,
                    nvars - nlut + k,
                );
            }
            set.myu = self.scr.column_count(&copy, nvars, nvars - nlut, false);
        }
        for v in 0..nvars {
            tt_move_var(&mut copy, nvars, &mut place_of_var, &mut var_of_place, v, v);
        }
        if copy[..] != *tt {
            let _ = invariant("truth table failed to restore after subset scoring");
        }
    }
}

impl Default for BsEval {
    fn default() -> Self {
        Self::new()
    }
}

fn winners_pool(sets: &[ScoredSet], nbest: usize) -> Vec<usize> {
    let mut pool: Vec<usize> = sets
        .iter()
        .take(nbest)
        .flat_map(|s| s.vars.iter().copied())
        .collect();
    pool.sort_unstable();
    pool.dedup();
    pool
}
