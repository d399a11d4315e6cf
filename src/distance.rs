//! Levenshtein edit distance over arbitrary token sequences.

/// Minimum number of insertions, deletions and substitutions turning `a` into `b`.
///
/// Uses two rolling rows of the classic dynamic-programming table, so memory is
/// `O(|b|)` while the result matches the full `(|a|+1) x (|b|+1)` table.
pub fn edit_distance<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0usize; b.len() + 1];

    for (i, left) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, right) in b.iter().enumerate() {
            let cost = usize::from(left != right);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

/// Edit distance between the Unicode scalar values of two strings.
pub fn char_distance(a: &str, b: &str) -> usize {
    let left = a.chars().collect::<Vec<char>>();
    let right = b.chars().collect::<Vec<char>>();
    edit_distance(&left, &right)
}

/// Edit distance between the whitespace-separated words of two strings.
pub fn word_distance(a: &str, b: &str) -> usize {
    let left = a.split_whitespace().collect::<Vec<&str>>();
    let right = b.split_whitespace().collect::<Vec<&str>>();
    edit_distance(&left, &right)
}
