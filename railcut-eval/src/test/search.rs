use super::util::{parity_table, random_table};
use crate::report::{myu_distribution, report_best, report_one};
use crate::search::BsEval;
use railcut_base::tt_from_hex;
use test_log::test;

#[test]
fn test_walk_restores_table() {
    let mut state = 0xc0de;
    let mut tt = random_table(7, &mut state);
    let orig = tt.clone();
    let mut eval = BsEval::new();
    eval.prepare_walk(7, 3);
    let best = eval.eval_best(&mut tt, 7, 0, 4, false, 0);
    assert_eq!(tt, orig);
    assert!(best.cost >= 1 && best.cost <= 8);
    assert_eq!(best.perm.len(), 7);
}

#[test]
fn test_xor_is_two_everywhere() {
    // Parity has two distinct cofactors under every bound-set choice, so
    // the walk's minimum is exactly 2.
    let mut tt = tt_from_hex("6996", 4).unwrap();
    let mut eval = BsEval::new();
    eval.prepare_walk(4, 2);
    let best = eval.eval_best(&mut tt, 4, 0, 2, false, 0);
    assert_eq!(best.cost, 2);
}

#[test]
fn test_search_separates_projection_variable() {
    let mut tt = tt_from_hex("aaaa", 4).unwrap();
    let mut eval = BsEval::new();
    eval.prepare_walk(4, 2);
    let best = eval.eval_best(&mut tt, 4, 0, 2, false, 0);
    assert_eq!(best.cost, 1);
    // Cost 1 means the function depends on no bound variable, so the
    // winning permutation keeps x0 on the free side.
    let place = best.perm.iter().position(|&v| v == 0).unwrap();
    assert!(place < 2);
}

#[test]
fn test_jump_snapshot_still_restores_table() {
    let mut state = 0xd1ce;
    let mut tt = random_table(6, &mut state);
    let orig = tt.clone();
    let mut eval = BsEval::new();
    eval.prepare_walk(6, 3);
    // jump_ratio 1 always promotes the snapshot.
    let best = eval.eval_best(&mut tt, 6, 0, 3, false, 1);
    assert_eq!(tt, orig);
    assert!(best.cost >= 1 && best.cost <= 8);
}

#[test]
fn test_distribution_is_deterministic_per_seed() {
    let mut a = BsEval::with_seed(7);
    let mut b = BsEval::with_seed(7);
    let da = myu_distribution(&mut a, 8, 4, 50, 0, true, false);
    let db = myu_distribution(&mut b, 8, 4, 50, 0, true, false);
    assert_eq!(da, db);
    assert_eq!(da.myu.iter().sum::<usize>(), 50);
    assert_eq!(da.rails.iter().sum::<usize>(), 50);
    let mut c = BsEval::with_seed(8);
    let dc = myu_distribution(&mut c, 8, 4, 50, 3, true, false);
    assert_eq!(dc.myu.iter().sum::<usize>(), 50);
    // Three positive minterms admit at most four distinct columns.
    for (myu, &count) in dc.myu.iter().enumerate() {
        if count > 0 {
            assert!(myu <= 4);
        }
    }
}

#[test]
fn test_find_split_parity() {
    let tt = parity_table(5);
    let mut eval = BsEval::new();
    let found = eval.find_split(&tt, 5, 0, 2, 3, 0);
    assert_eq!(found.myu, 2);
    let code = found.code.expect("parity always fits");
    assert_eq!(code.myu, 2);
    assert_eq!(code.shared_mask, 0);
    assert_eq!(code.bound_mask.count_ones(), 3);
}

#[test]
fn test_find_split_mux_needs_two_rails() {
    // Every split of the 2:1 mux has three distinct cofactors, and with a
    // two-variable bound side there is no room for a shared variable under
    // a one-rail budget.
    let tt = tt_from_hex("ca", 3).unwrap();
    let mut eval = BsEval::new();
    let narrow = eval.find_split(&tt, 3, 0, 1, 2, 0);
    assert_eq!(narrow.myu, 3);
    assert!(narrow.code.is_none());
    let wide = eval.find_split(&tt, 3, 0, 2, 2, 0);
    assert_eq!(wide.myu, 3);
    let code = wide.code.expect("two rails fit");
    assert_eq!(code.myu, 4);
    assert_eq!(code.bound_mask.count_ones(), 2);
}

#[test]
fn test_find_split_all_collects_ties() {
    let tt = parity_table(5);
    let mut eval = BsEval::new();
    let found = eval.find_split_all(&tt, 5, 0, 2, 3, 0, 0, 0);
    assert_eq!(found.myu, 2);
    // All C(5,3) splits tie at multiplicity 2 with no shared set.
    assert_eq!(found.codes.len(), 10);
    for code in &found.codes {
        assert_eq!(code.myu, 2);
        assert_eq!(code.shared_mask, 0);
        assert_eq!(code.bound_mask.count_ones(), 3);
    }
}

#[test]
fn test_find_split_all_sampled() {
    let tt = parity_table(8);
    let mut eval = BsEval::new();
    let found = eval.find_split_all(&tt, 8, 0, 1, 4, 0, 6, 3);
    assert_eq!(found.myu, 2);
    assert_eq!(found.codes.len(), 3);
    for code in &found.codes {
        assert_eq!(code.myu, 2);
        assert_eq!(code.bound_mask.count_ones(), 4);
    }
}

#[test]
fn test_reports_render() {
    let tt = tt_from_hex("6996", 4).unwrap();
    let one = report_one(&tt, 4, 2);
    assert!(one.contains("6996"));
    assert!(one.contains("is 2."));
    let mut tt = tt_from_hex("ca", 3).unwrap();
    let best = report_best(&mut tt, 3, 1, false);
    assert!(best.contains("is 2."));
    assert!(best.contains("Permutation is"));
}
