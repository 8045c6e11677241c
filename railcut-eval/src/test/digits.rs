use super::util::random_table;
use crate::search::BsEval;
use railcut_base::{tt_from_hex, tt_swap_vars, tt_word_num};
use test_log::test;

#[test]
fn test_mux_multiplicity() {
    // x2 ? x1 : x0 with one bound variable on top: two distinct cofactors,
    // one rail.
    let tt = tt_from_hex("ca", 3).unwrap();
    let mut eval = BsEval::new();
    assert_eq!(eval.column_count(&tt, 3, 2), 2);
    assert_eq!(eval.rail_count(&tt, 3, 2), 1);
}

#[test]
fn test_xor_multiplicity() {
    let tt = tt_from_hex("6996", 4).unwrap();
    let mut eval = BsEval::new();
    assert_eq!(eval.column_count(&tt, 4, 2), 2);
}

#[test]
fn test_constant_false() {
    let tt = vec![0u64; tt_word_num(5)];
    let mut eval = BsEval::new();
    assert_eq!(eval.column_count(&tt, 5, 3), 1);
}

#[test]
fn test_identity_projection() {
    // f = x0: with x0 on the free side every bound cofactor is the same
    // projection, so the multiplicity is 1; moved to the bound side it
    // splits into two constant cofactors.
    let mut tt = tt_from_hex("aaaa", 4).unwrap();
    let mut eval = BsEval::new();
    assert_eq!(eval.column_count(&tt, 4, 2), 1);
    tt_swap_vars(&mut tt, 4, 0, 3);
    assert_eq!(eval.column_count(&tt, 4, 2), 2);
}

#[test]
fn test_multiplicity_upper_bound() {
    let mut state = 0xfeed;
    for nvars in [7, 8] {
        for _ in 0..4 {
            let tt = random_table(nvars, &mut state);
            let mut eval = BsEval::new();
            for nfree in 1..nvars {
                let myu = eval.column_count(&tt, nvars, nfree);
                assert!(myu >= 1);
                assert!(myu <= 1 << (nvars - nfree));
                if nfree == 1 {
                    assert!(myu <= 4);
                }
                if nfree == 2 {
                    assert!(myu <= 16);
                }
            }
        }
    }
}

#[test]
fn test_bound_side_permutation_invariance() {
    let mut state = 0xabcd;
    let nvars = 8;
    let tt = random_table(nvars, &mut state);
    let mut eval = BsEval::new();
    for nfree in [2, 3, 5] {
        let myu = eval.column_count(&tt, nvars, nfree);
        for hi in nfree + 1..nvars {
            let mut permuted = tt.clone();
            tt_swap_vars(&mut permuted, nvars, nfree, hi);
            assert_eq!(eval.column_count(&permuted, nvars, nfree), myu);
        }
    }
}

#[test]
fn test_pattern_partition() {
    let mut state = 0x5eed;
    let nvars = 8;
    let tt = random_table(nvars, &mut state);
    let mut eval = BsEval::new();
    for nfree in 1..nvars {
        let nbound = nvars - nfree;
        let row_words = tt_word_num(nbound);
        let myu = eval.scr.column_count(&tt, nvars, nfree, true);
        let rows: Vec<&[u64]> = (0..myu)
            .map(|m| &eval.scr.pat[m * row_words..(m + 1) * row_words])
            .collect();
        // Rows are pairwise disjoint.
        for i in 0..myu {
            for j in i + 1..myu {
                for w in 0..row_words {
                    assert_eq!(rows[i][w] & rows[j][w], 0, "nfree={}", nfree);
                }
            }
        }
        // Together they cover every bound minterm.
        let full = if 1 << nbound >= 64 {
            u64::MAX
        } else {
            (1u64 << (1 << nbound)) - 1
        };
        for w in 0..row_words {
            let mut union = 0u64;
            for row in &rows {
                union |= row[w];
            }
            assert_eq!(union, full, "nfree={} word={}", nfree, w);
        }
    }
}
