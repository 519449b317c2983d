/// Keep the first occurrence of each item, in order.
///
/// Items are compared with `==`, which for document nodes means node identity.
pub fn first_occurrences<T, I>(items: I) -> Vec<T>
where
    T: PartialEq,
    I: IntoIterator<Item = T>,
{
    let mut out: Vec<T> = Vec::new();
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_first_occurrence_order() {
        assert_eq!(first_occurrences(["A", "B", "A"]), vec!["A", "B"]);
        assert_eq!(first_occurrences([3, 1, 3, 2, 1]), vec![3, 1, 2]);
    }

    #[test]
    fn test_empty() {
        assert!(first_occurrences(Vec::<u8>::new()).is_empty());
    }
}
