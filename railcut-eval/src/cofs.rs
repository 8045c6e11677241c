// Product-cofactor tables for the shared-variable search. For a bound side
// of `nvars` variables, every subset s of those variables contributes 2^|s|
// bit-vectors over the 2^nvars bound minterms: the product terms selecting
// the minterms where the subset takes each of its assignments. Entries are
// grouped by subset cardinality so the search can grow the shared set one
// variable at a time.

use railcut_base::{tt_and_sharp, tt_elementary, tt_word_num};

pub(crate) struct CofactorSets {
    pub(crate) nwords: usize, // limbs per product cofactor
    pub(crate) words: Vec<u64>, // append-only cofactor storage
    pub(crate) groups: Vec<Vec<(u32, u32)>>, // per cardinality: (subset mask, start limb)
}

impl CofactorSets {
    pub(crate) fn new(nvars: usize) -> Self {
        let nwords = tt_word_num(nvars);
        let elems = tt_elementary(nvars);
        let mut words = Vec::with_capacity(1000);
        let mut groups = vec![Vec::new(); nvars + 1];
        for set in 0..(1u32 << nvars) {
            let card = set.count_ones() as usize;
            groups[card].push((set, words.len() as u32));
            push_product_cofactors(set, nwords, &elems, &mut words);
        }
        CofactorSets { nwords, words, groups }
    }

    pub(crate) fn cofactors_at(&self, start: u32) -> &[u64] {
        &self.words[start as usize..]
    }
}

fn push_product_cofactors(set: u32, nwords: usize, elems: &[u64], words: &mut Vec<u64>) {
    let vars: Vec<usize> = (0..32).filter(|v| (set >> v) & 1 != 0).collect();
    let start = words.len();
    words.resize(start + (nwords << vars.len()), u64::MAX);
    for m in 0..(1usize << vars.len()) {
        let cof = &mut words[start + m * nwords..start + (m + 1) * nwords];
        for (bit, &v) in vars.iter().enumerate() {
            tt_and_sharp(cof, &elems[v * nwords..(v + 1) * nwords], (m >> bit) & 1 == 0);
        }
    }
}
