use std::ops::Range;

use crate::api::GridError;

/// Split `0..total` into contiguous pages of at most `per_page` items.
///
/// Every range is full except possibly the last one, which holds the
/// remainder. `total <= per_page` gives a single range; `total == 0` gives
/// none.
///
/// # Example
///
/// ```
/// use pip_grid::paginate;
///
/// assert_eq!(paginate(100, 40).unwrap(), vec![0..40, 40..80, 80..100]);
/// assert_eq!(paginate(12, 40).unwrap(), vec![0..12]);
/// ```
pub fn paginate(total: usize, per_page: usize) -> Result<Vec<Range<usize>>, GridError> {
    if per_page == 0 {
        return Err(GridError::InvalidLayout(
            "a page must hold at least one row and one column".to_string(),
        ));
    }
    Ok((0..total)
        .step_by(per_page)
        .map(|start| start..(start + per_page).min(total))
        .collect())
}

/// Page count for `total` items, `ceil(total / per_page)`.
pub fn page_count(total: usize, per_page: usize) -> usize {
    if per_page == 0 {
        0
    } else {
        total.div_ceil(per_page)
    }
}
