// Column-multiplicity digitisers. Viewing the table as 2^(n-k) cofactor
// columns of 2^k bits each (k free variables in the low places, the bound
// side above them), these count the distinct columns, optionally emitting
// the column-pattern matrix: bit j of pattern row m is set iff bound minterm
// j maps to the m-th distinct column, rows ordered by first appearance.
//
// Column width picks the strategy: 2-/4-/8-/16-bit digits are canonicalised
// through a mark array reset by used-list, 32-bit digits and whole-limb
// blocks go through the open-addressed column hash. Every path leaves its
// scratch state pristine (all -1) on exit.

use railcut_base::{
    tt_get_byte, tt_get_half, tt_get_hex, tt_get_qua, tt_get_u32, tt_set_bit, tt_word_num,
    MAX_TT_VARS,
};

use crate::hash::ColumnHash;
use crate::shared::check_one_shared;

pub(crate) struct Scratch {
    marks: Vec<i32>, // digit -> pattern row, -1 when unseen; sized for 16-bit digits
    used: Vec<u32>,  // digits touched during the current scan
    hash: ColumnHash,
    pub(crate) pat: Vec<u64>, // column-pattern matrix, row-major
}

impl Scratch {
    pub(crate) fn new() -> Self {
        Scratch {
            marks: vec![-1; 1 << 16],
            used: Vec::with_capacity(100),
            hash: ColumnHash::new(),
            pat: Vec::new(),
        }
    }

    /// Column multiplicity of `tt` for `nfree` free variables in the low
    /// places. With `with_pat` the column-pattern matrix is rebuilt in
    /// `self.pat` as a side effect.
    pub(crate) fn column_count(
        &mut self,
        tt: &[u64],
        nvars: usize,
        nfree: usize,
        with_pat: bool,
    ) -> usize {
        assert!(nvars <= MAX_TT_VARS);
        assert!(nfree >= 1 && nfree < nvars);
        let nbound = nvars - nfree;
        let ndigits = 1usize << nbound;
        let row_words = tt_word_num(nbound);
        let pat = if with_pat {
            let need = ndigits * row_words;
            if self.pat.len() < need {
                self.pat.resize(need, 0);
            }
            self.pat[..need].fill(0);
            Some(&mut self.pat[..])
        } else {
            None
        };
        match nfree {
            1 => cm_marked(ndigits, row_words, |i| tt_get_qua(tt, i), &mut self.marks, &mut self.used, pat),
            2 => cm_marked(ndigits, row_words, |i| tt_get_hex(tt, i), &mut self.marks, &mut self.used, pat),
            3 => cm_marked(ndigits, row_words, |i| tt_get_byte(tt, i), &mut self.marks, &mut self.used, pat),
            4 => cm_marked(ndigits, row_words, |i| tt_get_half(tt, i), &mut self.marks, &mut self.used, pat),
            5 => {
                self.hash.begin(ndigits, 1);
                let distinct = cm_hashed(ndigits, row_words, |h, i| h.lookup_u32(tt_get_u32(tt, i)), &mut self.hash, pat);
                self.hash.reset();
                distinct
            }
            _ => {
                let nwords = 1usize << (nfree - 6);
                self.hash.begin(ndigits, nwords);
                let distinct = cm_hashed(
                    ndigits,
                    row_words,
                    |h, i| h.lookup_words(&tt[i * nwords..(i + 1) * nwords]),
                    &mut self.hash,
                    pat,
                );
                self.hash.reset();
                distinct
            }
        }
    }

    /// Pattern-aware cost of a split: 1 when at most two columns remain,
    /// otherwise the rail count after trying every single bound variable as
    /// shared.
    pub(crate) fn rail_count(&mut self, tt: &[u64], nvars: usize, nfree: usize) -> usize {
        let myu = self.column_count(tt, nvars, nfree, true);
        if myu <= 2 {
            1
        } else {
            check_one_shared(&self.pat, nvars - nfree, myu)
        }
    }
}

fn cm_marked(
    ndigits: usize,
    row_words: usize,
    digit: impl Fn(usize) -> usize,
    marks: &mut [i32],
    used: &mut Vec<u32>,
    mut pat: Option<&mut [u64]>,
) -> usize {
    debug_assert!(used.is_empty());
    for i in 0..ndigits {
        let d = digit(i);
        if marks[d] < 0 {
            marks[d] = used.len() as i32;
            used.push(d as u32);
        }
        if let Some(p) = pat.as_deref_mut() {
            tt_set_bit(&mut p[marks[d] as usize * row_words..], i);
        }
    }
    let distinct = used.len();
    for &d in used.iter() {
        marks[d as usize] = -1;
    }
    used.clear();
    distinct
}

fn cm_hashed(
    ndigits: usize,
    row_words: usize,
    lookup: impl Fn(&mut ColumnHash, usize) -> usize,
    hash: &mut ColumnHash,
    mut pat: Option<&mut [u64]>,
) -> usize {
    for i in 0..ndigits {
        let m = lookup(hash, i);
        if let Some(p) = pat.as_deref_mut() {
            tt_set_bit(&mut p[m * row_words..], i);
        }
    }
    hash.distinct()
}
