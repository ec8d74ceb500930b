use crate::errors::{KindnessError, KindnessResult};

/// One page of a list. `total_pages` is never zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub total_pages: usize,
    pub effective_page: usize,
}

impl<T> Page<'_, T> {
    pub fn has_previous(&self) -> bool {
        self.effective_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.effective_page < self.total_pages
    }

    pub fn previous_page(&self) -> usize {
        self.effective_page.saturating_sub(1).max(1)
    }

    pub fn next_page(&self) -> usize {
        (self.effective_page + 1).min(self.total_pages)
    }

    pub fn page_numbers(&self) -> std::ops::RangeInclusive<usize> {
        1..=self.total_pages
    }
}

pub fn total_pages(len: usize, page_size: usize) -> KindnessResult<usize> {
    if page_size == 0 {
        return Err(KindnessError::InvalidPageSize(page_size));
    }
    Ok(len.div_ceil(page_size).max(1))
}

/// Out-of-range page requests clamp into `1..=total_pages`.
pub fn paginate<T>(
    records: &[T],
    page_size: usize,
    requested_page: usize,
) -> KindnessResult<Page<'_, T>> {
    let total_pages = total_pages(records.len(), page_size)?;
    let effective_page = requested_page.clamp(1, total_pages);

    if effective_page != requested_page {
        tracing::debug!(requested_page, effective_page, total_pages, "clamped page request");
    }

    let start = ((effective_page - 1) * page_size).min(records.len());
    let end = (start + page_size).min(records.len());

    Ok(Page {
        items: &records[start..end],
        total_pages,
        effective_page,
    })
}
