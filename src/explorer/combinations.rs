/// Iterator over all `k`-element combinations of a slice, in lexicographic index order.
///
/// Each item keeps the order of the source slice, so combinations of a descending slice are
/// themselves descending.
pub(crate) struct Combinations<'a, T> {
    items: &'a [T],
    indices: Vec<usize>,
    done: bool,
}

impl<'a, T: Copy> Combinations<'a, T> {
    pub(crate) fn new(items: &'a [T], k: usize) -> Self {
        Self { items, indices: (0..k).collect(), done: k > items.len() }
    }
}

impl<T: Copy> Iterator for Combinations<'_, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.indices.iter().map(|&i| self.items[i]).collect();

        // Find the rightmost index that can still move right
        let n = self.items.len();
        let k = self.indices.len();
        match (0..k).rev().find(|&i| self.indices[i] < n - k + i) {
            Some(i) => {
                self.indices[i] += 1;
                for j in i + 1..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
            }
            None => self.done = true,
        }

        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            (1, None)
        }
    }
}

pub(crate) fn combinations<T: Copy>(items: &[T], k: usize) -> Combinations<'_, T> {
    Combinations::new(items, k)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairs_of_four() {
        let combos: Vec<_> = combinations(&[1, 2, 3, 4], 2).collect();
        assert_eq!(combos.len(), 6);
        assert_eq!(combos[0], vec![1, 2]);
        assert_eq!(combos[1], vec![1, 3]);
        assert_eq!(combos[5], vec![3, 4]);
    }

    #[test]
    fn test_triples_of_five_count() {
        assert_eq!(combinations(&[9, 8, 7, 6, 5], 3).count(), 10);
    }

    #[test]
    fn test_keeps_source_order() {
        let combos: Vec<_> = combinations(&[14, 13, 7], 2).collect();
        assert_eq!(combos, vec![vec![14, 13], vec![14, 7], vec![13, 7]]);
    }

    #[test]
    fn test_k_larger_than_len_is_empty() {
        assert_eq!(combinations(&[1, 2], 3).count(), 0);
    }

    #[test]
    fn test_k_equal_len_yields_once() {
        let combos: Vec<_> = combinations(&[3, 2, 1], 3).collect();
        assert_eq!(combos, vec![vec![3, 2, 1]]);
    }

    #[test]
    fn test_size_hint_after_exhaustion() {
        let mut it = combinations(&[1, 2], 2);
        assert_eq!(it.next(), Some(vec![1, 2]));
        assert_eq!(it.next(), None);
        assert_eq!(it.size_hint(), (0, Some(0)));
    }
}
