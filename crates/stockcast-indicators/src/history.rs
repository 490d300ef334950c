//! Window helpers shared by the indicators.
//!
//! MACD's signal line and the Stochastic %D both need the history of a
//! derived value. That history is rebuilt from scratch on every prefix of the
//! input rather than updated incrementally, which costs O(n * period) but keeps
//! every historical point bit-identical to a standalone evaluation at that
//! index. An incremental implementation can replace [`expanding_window`]
//! without touching its callers.

/// Trailing `n` elements of `data` (all of it if shorter).
#[inline]
pub fn trailing<T>(data: &[T], n: usize) -> &[T] {
    &data[data.len().saturating_sub(n)..]
}

/// Evaluate `f` on every prefix `data[..end]` with `end` in `min_len..=data.len()`.
///
/// Returns an empty vector when `data` is shorter than `min_len`. A `min_len`
/// of zero is treated as one so `f` never sees an empty prefix.
pub fn expanding_window<'a, T, U>(
    data: &'a [T],
    min_len: usize,
    mut f: impl FnMut(&'a [T]) -> U,
) -> Vec<U> {
    let first = min_len.max(1);
    if data.len() < first {
        return vec![];
    }

    let mut result = Vec::with_capacity(data.len() - first + 1);
    for end in first..=data.len() {
        result.push(f(&data[..end]));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing() {
        let data = [1, 2, 3, 4, 5];
        assert_eq!(trailing(&data, 2), &[4, 5]);
        assert_eq!(trailing(&data, 10), &data);
        assert!(trailing(&data, 0).is_empty());
    }

    #[test]
    fn test_expanding_window_prefix_lengths() {
        let data = [1.0, 2.0, 3.0, 4.0];
        let lens = expanding_window(&data, 2, |prefix| prefix.len());
        assert_eq!(lens, vec![2, 3, 4]);

        let sums = expanding_window(&data, 3, |prefix| prefix.iter().sum::<f64>());
        assert_eq!(sums, vec![6.0, 10.0]);
    }

    #[test]
    fn test_expanding_window_short_input() {
        let data = [1.0, 2.0];
        assert!(expanding_window(&data, 3, |p| p.len()).is_empty());
        assert_eq!(expanding_window(&data, 0, |p| p.len()), vec![1, 2]);
    }
}
