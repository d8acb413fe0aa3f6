use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("page {requested} is outside 1..={total_pages}")]
pub struct PageOutOfRange {
    pub requested: u32,
    pub total_pages: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current_page: u32,
    total_pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
        }
    }
}

impl Pagination {
    /// Starts at `page` with an unknown total. The page is taken as-is; it has
    /// not been checked against a fetch yet.
    pub fn starting_at(page: u32) -> Self {
        Self {
            current_page: page.max(1),
            total_pages: 1,
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn set_page(&mut self, page: u32) -> Result<(), PageOutOfRange> {
        if page < 1 || page > self.total_pages {
            return Err(PageOutOfRange {
                requested: page,
                total_pages: self.total_pages,
            });
        }
        self.current_page = page;
        Ok(())
    }

    /// Only a fetch response may call this. A current page beyond the new
    /// total is left untouched.
    pub fn set_total_pages(&mut self, total_pages: u32) {
        self.total_pages = total_pages.max(1);
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Used when traversal restores a page straight from the address bar.
    pub(crate) fn restore(&mut self, page: u32) {
        self.current_page = page.max(1);
    }

    pub fn previous_page(&self) -> Option<u32> {
        (self.current_page > 1).then(|| (self.current_page - 1).min(self.total_pages))
    }

    pub fn next_page(&self) -> Option<u32> {
        (self.current_page < self.total_pages).then_some(self.current_page + 1)
    }
}
