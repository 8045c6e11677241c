use std::collections::BTreeSet;

use crate::chase::chase_pairs;
use test_log::test;

fn binomial(n: usize, k: usize) -> usize {
    let mut res = 1usize;
    for i in 0..k {
        res = res * (n - i) / (i + 1);
    }
    res
}

#[test]
fn test_terminator() {
    for (n, t) in [(3, 1), (4, 2), (6, 3)] {
        let pairs = chase_pairs(n, t);
        assert_eq!(*pairs.last().unwrap(), (0, 0));
    }
}

#[test]
fn test_walk_visits_every_subset_once() {
    for (n, t) in [(3, 1), (4, 2), (5, 1), (5, 2), (6, 3), (7, 4), (8, 3)] {
        let pairs = chase_pairs(n, t);
        // One evaluation per pair, terminator included, covers each subset
        // exactly once.
        assert_eq!(pairs.len(), binomial(n, t), "pair count (n={}, t={})", n, t);
        let mut var_of_place: Vec<usize> = (0..n).collect();
        let mut place_of_var: Vec<usize> = (0..n).collect();
        let mut seen = BTreeSet::new();
        for &(var0, var1) in &pairs {
            let mut bound: Vec<usize> = (n - t..n).map(|p| var_of_place[p]).collect();
            bound.sort_unstable();
            assert!(seen.insert(bound), "subset revisited (n={}, t={})", n, t);
            let p0 = place_of_var[var0];
            let p1 = place_of_var[var1];
            if p0 == p1 {
                continue;
            }
            var_of_place.swap(p0, p1);
            place_of_var[var0] = p1;
            place_of_var[var1] = p0;
        }
        assert_eq!(seen.len(), binomial(n, t), "subset count (n={}, t={})", n, t);
    }
}

#[test]
fn test_steps_exchange_one_element() {
    let n = 6;
    let t = 3;
    let pairs = chase_pairs(n, t);
    let mut chosen: BTreeSet<usize> = (n - t..n).collect();
    for &(leaving, entering) in &pairs[..pairs.len() - 1] {
        assert!(chosen.contains(&leaving));
        assert!(!chosen.contains(&entering));
        chosen.remove(&leaving);
        chosen.insert(entering);
    }
}
