use itertools::Itertools;

use crate::Item;

/// Emits a [range-list][crate] describing the provided items, coalescing consecutive items into
/// ranges.
///
/// The items do not need to be sorted and may contain duplicates. An empty input produces an
/// empty string, which [`parse()`][crate::parse] does not accept because the format has no way
/// to express an empty set.
///
/// # Example
///
/// ```
/// assert_eq!(cpulist::emit([7, 0, 1, 2, 3, 5, 8]), "0-3,5,7-8");
/// ```
pub fn emit<I>(items: I) -> String
where
    I: IntoIterator<Item = Item>,
{
    items
        .into_iter()
        .sorted_unstable()
        .dedup()
        .map(|item| (item, item))
        .coalesce(|(start, end), (next_start, next_end)| {
            if end.checked_add(1) == Some(next_start) {
                Ok((start, next_end))
            } else {
                Err(((start, end), (next_start, next_end)))
            }
        })
        .map(|(start, end)| {
            if start == end {
                start.to_string()
            } else {
                format!("{start}-{end}")
            }
        })
        .join(",")
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn emit_smoke_test() {
        assert_eq!(emit([]), "");
        assert_eq!(emit([555]), "555");
        assert_eq!(emit([0, 1, 2, 3]), "0-3");
        assert_eq!(emit([3, 1, 2, 1]), "1-3");
        assert_eq!(emit([0, 2, 4]), "0,2,4");
        assert_eq!(emit(0..16), "0-15");
    }

    #[test]
    fn emit_handles_top_of_range() {
        assert_eq!(emit([u32::MAX - 1, u32::MAX]), "4294967294-4294967295");
    }

    #[test]
    fn emitted_lists_parse_back() {
        let items = vec![0, 1, 2, 3, 5, 7, 8, 100];

        assert_eq!(crate::parse(&emit(items.clone())).unwrap(), items);
    }
}
