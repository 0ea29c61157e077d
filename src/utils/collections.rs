//! Order-preserving grouping and partitioning over slices.

use std::collections::HashMap;
use std::hash::Hash;

/// Split items into `(accepted, rejected)` by predicate, keeping relative order.
pub fn partition<T, F>(items: Vec<T>, mut predicate: F) -> (Vec<T>, Vec<T>)
where
    F: FnMut(&T) -> bool,
{
    let mut accepted = Vec::new();
    let mut rejected = Vec::new();
    for item in items {
        if predicate(&item) {
            accepted.push(item);
        } else {
            rejected.push(item);
        }
    }
    (accepted, rejected)
}

/// Group items by key.
///
/// Groups come back in the order their key was first seen; members keep their
/// relative input order.
pub fn group_by_key<'a, T, K, F>(items: &'a [T], key: F) -> Vec<(K, Vec<&'a T>)>
where
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<&'a T>)> = Vec::new();

    for item in items {
        let k = key(item);
        match index.get(&k) {
            Some(&i) => groups[i].1.push(item),
            None => {
                index.insert(k.clone(), groups.len());
                groups.push((k, vec![item]));
            }
        }
    }

    groups
}

/// Count how many times each key occurs.
pub fn count_occurrences<I, K>(keys: I) -> HashMap<K, usize>
where
    I: IntoIterator<Item = K>,
    K: Eq + Hash,
{
    let mut counts = HashMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_keeps_order_in_both_halves() {
        let (even, odd) = partition(vec![1, 2, 3, 4, 5, 6], |n| n % 2 == 0);
        assert_eq!(even, vec![2, 4, 6]);
        assert_eq!(odd, vec![1, 3, 5]);
    }

    #[test]
    fn partition_of_empty_is_empty() {
        let (a, b) = partition(Vec::<u8>::new(), |_| true);
        assert!(a.is_empty());
        assert!(b.is_empty());
    }

    #[test]
    fn group_by_key_orders_groups_by_first_appearance() {
        let words = ["bob", "alice", "bill", "amy", "carl"];
        let groups = group_by_key(&words, |w| w.chars().next().unwrap_or(' '));
        let keys: Vec<char> = groups.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!['b', 'a', 'c']);
        assert_eq!(groups[0].1, vec![&"bob", &"bill"]);
        assert_eq!(groups[1].1, vec![&"alice", &"amy"]);
    }

    #[test]
    fn count_occurrences_tallies_each_key() {
        let counts = count_occurrences(["z", "b", "z", "d", "z"]);
        assert_eq!(counts["z"], 3);
        assert_eq!(counts["b"], 1);
        assert_eq!(counts.get("q"), None);
    }
}
