/// Top-down merge sort. Stable: on ties the element from the left half goes
/// first.
pub fn mergesort<T: PartialOrd + Clone>(items: &[T]) -> Vec<T> {
    if items.len() <= 1 {
        return items.to_vec();
    }
    let (left, right) = items.split_at(items.len() / 2);
    merge(mergesort(left), mergesort(right))
}

fn merge<T: PartialOrd>(left: Vec<T>, right: Vec<T>) -> Vec<T> {
    let mut out = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    while let (Some(l), Some(r)) = (left.peek(), right.peek()) {
        let next = if r < l { right.next() } else { left.next() };
        out.extend(next);
    }
    out.extend(left);
    out.extend(right);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_sorted<T: PartialOrd>(v: &[T]) -> bool {
        v.windows(2).all(|w| w[0] <= w[1])
    }

    #[test]
    fn test_empty_and_single() {
        assert!(mergesort::<i32>(&[]).is_empty());
        assert_eq!(mergesort(&[42]), vec![42]);
    }

    #[test]
    fn test_sorts_integers() {
        let input = [5, 3, 9, 1, 5, 0, -2, 8, 3];
        let out = mergesort(&input);
        assert_eq!(out, vec![-2, 0, 1, 3, 3, 5, 5, 8, 9]);
    }

    #[test]
    fn test_output_is_sorted_permutation() {
        // Deterministic pseudo-random inputs of many lengths.
        let mut seed = 0x2545_f491_u64;
        for len in 0..64 {
            let input: Vec<u64> = (0..len)
                .map(|_| {
                    seed ^= seed << 13;
                    seed ^= seed >> 7;
                    seed ^= seed << 17;
                    seed % 50
                })
                .collect();
            let out = mergesort(&input);
            assert!(is_sorted(&out));

            let mut expected = input.clone();
            expected.sort_unstable();
            assert_eq!(out, expected);
        }
    }

    #[test]
    fn test_stable_on_ties() {
        #[derive(Debug, Clone, PartialEq)]
        struct Item(u8, &'static str);
        impl PartialOrd for Item {
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                self.0.partial_cmp(&other.0)
            }
        }
        let input = [Item(2, "a"), Item(1, "b"), Item(2, "c"), Item(1, "d")];
        let out: Vec<_> = mergesort(&input).into_iter().map(|i| i.1).collect();
        assert_eq!(out, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_sorts_floats_and_strings() {
        assert_eq!(mergesort(&[2.5, -1.0, 0.0]), vec![-1.0, 0.0, 2.5]);
        assert_eq!(mergesort(&["pear", "apple", "fig"]), vec!["apple", "fig", "pear"]);
    }
}
