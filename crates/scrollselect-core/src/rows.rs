//! Row arithmetic over a sectioned list.
//!
//! Every walk skips empty sections and reports running off either end of the
//! list as `None`. Callers treat `None` as "stop", never as a failure.

use crate::{Direction, ListAdapter, RowAddress};

pub fn is_valid(list: &dyn ListAdapter, address: RowAddress) -> bool {
    address.section < list.section_count() && address.row < list.row_count(address.section)
}

/// First row of the first non-empty section.
pub fn first_row_address(list: &dyn ListAdapter) -> Option<RowAddress> {
    (0..list.section_count())
        .find(|&s| list.row_count(s) > 0)
        .map(|s| RowAddress::new(s, 0))
}

/// Last row of the last non-empty section.
pub fn last_row_address(list: &dyn ListAdapter) -> Option<RowAddress> {
    (0..list.section_count())
        .rev()
        .find_map(|s| match list.row_count(s) {
            0 => None,
            n => Some(RowAddress::new(s, n - 1)),
        })
}

pub fn next_row(list: &dyn ListAdapter, address: RowAddress) -> Option<RowAddress> {
    if address.row + 1 < list.row_count(address.section) {
        return Some(RowAddress::new(address.section, address.row + 1));
    }
    (address.section + 1..list.section_count())
        .find(|&s| list.row_count(s) > 0)
        .map(|s| RowAddress::new(s, 0))
}

pub fn previous_row(list: &dyn ListAdapter, address: RowAddress) -> Option<RowAddress> {
    if address.row > 0 {
        return Some(RowAddress::new(address.section, address.row - 1));
    }
    (0..address.section)
        .rev()
        .find_map(|s| match list.row_count(s) {
            0 => None,
            n => Some(RowAddress::new(s, n - 1)),
        })
}

/// Walks `by` rows from `from` in `direction`.
///
/// `Direction::None` only resolves a zero-length walk.
pub fn offset_row(
    list: &dyn ListAdapter,
    from: RowAddress,
    by: usize,
    direction: Direction,
) -> Option<RowAddress> {
    if !is_valid(list, from) {
        return None;
    }
    let step: fn(&dyn ListAdapter, RowAddress) -> Option<RowAddress> = match direction {
        Direction::Forward => next_row,
        Direction::Backward => previous_row,
        Direction::None if by == 0 => return Some(from),
        Direction::None => return None,
    };
    let mut at = from;
    for _ in 0..by {
        at = step(list, at)?;
    }
    Some(at)
}

/// Number of single-row steps separating `a` and `b`, always walked in
/// natural (forward) order from the lower address to the higher one.
///
/// Returns `None` when either address is outside the list.
pub fn row_count_between(list: &dyn ListAdapter, a: RowAddress, b: RowAddress) -> Option<usize> {
    if !is_valid(list, a) || !is_valid(list, b) {
        return None;
    }
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    if lo.section == hi.section {
        return Some(hi.row - lo.row);
    }
    // Rest of `lo`'s section, every full section in between, then up to `hi`.
    let mut steps = list.row_count(lo.section) - lo.row;
    for s in lo.section + 1..hi.section {
        steps += list.row_count(s);
    }
    Some(steps + hi.row)
}
