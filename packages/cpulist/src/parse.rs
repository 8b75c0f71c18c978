use std::ops::RangeInclusive;

use itertools::Itertools;

use crate::{Error, Item};

/// Parses a [range-list][crate] and returns the numeric items in ascending order, removing
/// duplicates.
///
/// The whole string is rejected if any token in it is malformed.
///
/// See [package-level documentation][crate] for details.
pub fn parse(cpulist: &str) -> crate::Result<Vec<Item>> {
    parse_ranges(cpulist).map(|ranges| ranges.into_iter().flatten().sorted().dedup().collect())
}

/// Checks whether `item` is a member of the set described by a [range-list][crate].
///
/// The string is validated in full before membership is decided, so a malformed token anywhere
/// in the list is an error even if an earlier token already contains `item`. Ranges are not
/// expanded, so this is cheap even for very wide ranges.
///
/// See [package-level documentation][crate] for details.
pub fn contains(cpulist: &str, item: Item) -> crate::Result<bool> {
    parse_ranges(cpulist).map(|ranges| ranges.iter().any(|range| range.contains(&item)))
}

fn parse_ranges(cpulist: &str) -> crate::Result<Vec<RangeInclusive<Item>>> {
    cpulist.split(',').map(parse_token).collect()
}

fn parse_token(token: &str) -> crate::Result<RangeInclusive<Item>> {
    if token.is_empty() {
        return Err(Error::invalid_syntax(token, "tokens must not be empty"));
    }

    let mut bounds = token.split('-');

    match (bounds.next(), bounds.next(), bounds.next()) {
        (Some(single), None, _) => {
            let item = parse_number(single, "token is neither a range nor an integer")?;
            Ok(item..=item)
        }
        (Some(range_start), Some(range_end_inc), None) => {
            let range_start = parse_number(range_start, "range start is not an integer")?;
            let range_end_inc = parse_number(range_end_inc, "range end is not an integer")?;

            if range_start > range_end_inc {
                return Err(Error::invalid_syntax(token, "range start must be <= end"));
            }

            Ok(range_start..=range_end_inc)
        }
        _ => Err(Error::invalid_syntax(
            token,
            "a token may contain at most one '-' separator",
        )),
    }
}

fn parse_number(value: &str, problem: &str) -> crate::Result<Item> {
    // `u32::from_str` would also accept a leading '+', which is not part of the format.
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::invalid_syntax(value, problem));
    }

    value
        .parse::<Item>()
        .map_err(|inner| Error::invalid_syntax(value, &format!("{problem} ({inner})")))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn parse_smoke_test() {
        assert_eq!(parse("555").unwrap(), vec![555]);

        assert_eq!(parse("0,1,2,3").unwrap(), vec![0, 1, 2, 3]);

        assert_eq!(parse("2,3,1").unwrap(), vec![1, 2, 3]);

        assert_eq!(parse("0-5,1-6").unwrap(), vec![0, 1, 2, 3, 4, 5, 6]);

        assert_eq!(parse("0-0,1-1,3-3").unwrap(), vec![0, 1, 3]);

        assert_eq!(parse("0-3,5,7-8").unwrap(), vec![0, 1, 2, 3, 5, 7, 8]);
    }

    #[test]
    fn membership_follows_ranges() {
        assert!(contains("0-3,5,7-8", 5).unwrap());
        assert!(contains("0-3,5,7-8", 0).unwrap());
        assert!(contains("0-3,5,7-8", 8).unwrap());
        assert!(!contains("0-3,5,7-8", 4).unwrap());
        assert!(!contains("0-3,5,7-8", 9).unwrap());
    }

    #[test]
    fn membership_of_wide_range_does_not_expand() {
        assert!(contains("0-4294967295", 4_294_967_295).unwrap());
    }

    #[test]
    fn membership_validates_whole_list() {
        // 0 is in the first token but the list as a whole is still garbage.
        contains("0-3,x", 0).unwrap_err();
    }

    #[test]
    fn empty_is_error() {
        parse("").unwrap_err();
        parse("1,,2").unwrap_err();
        parse("1,").unwrap_err();
        parse(",1").unwrap_err();
    }

    #[test]
    fn range_direction_fail_is_error() {
        parse("2-1").unwrap_err();
    }

    #[test]
    fn multiple_separators_are_error() {
        parse("1-2-3").unwrap_err();
        parse("0-3,1--2").unwrap_err();
    }

    #[test]
    fn stride_is_error() {
        parse("0-8:2").unwrap_err();
    }

    #[test]
    fn garbage_is_error() {
        parse("a-b").unwrap_err();
        parse("foo").unwrap_err();
        parse("123-foo").unwrap_err();
        parse("foo-123").unwrap_err();
        parse("+5").unwrap_err();
        parse("-5").unwrap_err();
        parse(" 5").unwrap_err();
        parse("5\n").unwrap_err();
        parse("99999999999").unwrap_err();
    }
}
