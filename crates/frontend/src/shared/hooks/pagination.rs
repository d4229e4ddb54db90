use leptos::prelude::*;

/// 1-based page window over `total_items`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub total_items: usize,
    pub per_page: usize,
    pub current_page: usize,
}

impl Pagination {
    pub fn new(total_items: usize, per_page: usize) -> Self {
        Self {
            total_items,
            per_page: per_page.max(1),
            current_page: 1,
        }
    }

    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.per_page)
    }

    pub fn go_to(&mut self, page: usize) {
        self.current_page = page.min(self.total_pages()).max(1);
    }

    pub fn next(&mut self) {
        self.go_to(self.current_page + 1);
    }

    pub fn prev(&mut self) {
        self.go_to(self.current_page.saturating_sub(1));
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Keeps the current page inside the new range
    pub fn set_total(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.go_to(self.current_page);
    }

    pub fn start_index(&self) -> usize {
        (self.current_page - 1) * self.per_page
    }

    pub fn end_index(&self) -> usize {
        (self.start_index() + self.per_page).min(self.total_items)
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    /// Items on the current page
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.start_index().min(items.len());
        let end = self.end_index().min(items.len());
        &items[start..end]
    }
}

/// Pagination state that follows a changing item count
pub fn use_pagination(total_items: Signal<usize>, per_page: usize) -> RwSignal<Pagination> {
    let state = RwSignal::new(Pagination::new(total_items.get_untracked(), per_page));

    Effect::new(move |_| {
        let total = total_items.get();
        if state.with_untracked(|p| p.total_items != total) {
            state.update(|p| p.set_total(total));
        }
    });

    state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_bounds() {
        let mut p = Pagination::new(23, 10);
        assert_eq!(p.total_pages(), 3);
        assert!(!p.has_prev());
        assert!(p.has_next());
        assert_eq!((p.start_index(), p.end_index()), (0, 10));

        p.go_to(3);
        assert_eq!((p.start_index(), p.end_index()), (20, 23));
        assert!(!p.has_next());
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut p = Pagination::new(23, 10);
        p.go_to(99);
        assert_eq!(p.current_page, 3);
        p.next();
        assert_eq!(p.current_page, 3);
        p.go_to(0);
        assert_eq!(p.current_page, 1);
        p.prev();
        assert_eq!(p.current_page, 1);
    }

    #[test]
    fn test_empty_list_stays_on_first_page() {
        let p = Pagination::new(0, 10);
        assert_eq!(p.total_pages(), 0);
        assert_eq!(p.current_page, 1);
        assert_eq!((p.start_index(), p.end_index()), (0, 0));
        assert!(p.slice::<u8>(&[]).is_empty());
    }

    #[test]
    fn test_shrinking_total_moves_back() {
        let mut p = Pagination::new(50, 10);
        p.go_to(5);
        p.set_total(12);
        assert_eq!(p.current_page, 2);
        let items: Vec<usize> = (0..12).collect();
        assert_eq!(p.slice(&items), &[10, 11]);
    }
}
