pub mod geo;

pub use geo::*;

/// Returns the item with the greatest key. Unlike [`Iterator::max_by_key`],
/// ties keep the first item found.
pub fn first_max_by_key<I, K, F>(items: I, mut key: F) -> Option<I::Item>
where
    I: IntoIterator,
    K: Ord,
    F: FnMut(&I::Item) -> K,
{
    let mut best: Option<(K, I::Item)> = None;
    for item in items {
        let k = key(&item);
        match &best {
            Some((best_key, _)) if k <= *best_key => {}
            _ => best = Some((k, item)),
        }
    }
    best.map(|(_, item)| item)
}

#[test]
fn first_max_keeps_first_on_tie() {
    let items = ["ab", "cd", "e", "fg"];
    assert_eq!(first_max_by_key(items, |s| s.len()), Some("ab"));
}

#[test]
fn first_max_of_empty_is_none() {
    let items: [&str; 0] = [];
    assert_eq!(first_max_by_key(items, |s| s.len()), None);
}
