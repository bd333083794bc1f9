use rand::seq::SliceRandom;

/// Uniformly shuffled copy of `items` (Fisher-Yates via `rand`).
pub fn shuffled<T: Clone>(items: &[T]) -> Vec<T> {
    let mut out = items.to_vec();
    out.shuffle(&mut rand::thread_rng());
    out
}

/// Up to `count` elements sampled without replacement. Order is not
/// meaningful; shuffle downstream if it matters.
pub fn sample<T: Clone>(items: &[T], count: usize) -> Vec<T> {
    items
        .choose_multiple(&mut rand::thread_rng(), count)
        .cloned()
        .collect()
}
