//! # Pagination Control
//!
//! A stateless view of the server's `Pagination` plus the intents a user
//! can raise from it.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   Rows per page: [10 ▾]        Page 2 of 5        [ ‹ ]  [ › ]          │
//! │                                                                         │
//! │   select size s  → [ChangePage(1), ChangePageSize(s)]                   │
//! │   press ‹        → ChangePage(previous_page)  if enabled               │
//! │   press ›        → ChangePage(next_page)      if enabled               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A button is enabled only when the server's flag says so, its target is a
//! legal page and the target differs from the current page. The control
//! never derives `total_pages` or `has_next` itself.

use serde::Serialize;

use crate::pagination::Pagination;
use crate::query::PageSize;

/// A request raised by the control. The caller folds it into its query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageIntent {
    ChangePage(u32),
    ChangePageSize(PageSize),
}

/// Previous/next button state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavButton {
    pub target: u32,
    pub enabled: bool,
}

/// One entry of the rows-per-page selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageSizeOption {
    pub size: PageSize,
    pub selected: bool,
}

/// Everything needed to draw the control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlView {
    /// `Page X of Y`
    pub label: String,
    pub page: u32,
    pub last_page: u32,
    pub page_size: PageSize,
    pub options: Vec<PageSizeOption>,
    pub previous: NavButton,
    pub next: NavButton,
}

impl ControlView {
    pub fn press_previous(&self) -> Option<PageIntent> {
        Self::press(&self.previous)
    }

    pub fn press_next(&self) -> Option<PageIntent> {
        Self::press(&self.next)
    }

    /// Resize intents, page reset first.
    pub fn select_page_size(&self, size: PageSize) -> [PageIntent; 2] {
        [PageIntent::ChangePage(1), PageIntent::ChangePageSize(size)]
    }

    fn press(button: &NavButton) -> Option<PageIntent> {
        button
            .enabled
            .then_some(PageIntent::ChangePage(button.target))
    }
}

/// Renders `ControlView`s.
pub struct PaginationControl;

impl PaginationControl {
    pub fn render(pagination: &Pagination, page_size: PageSize) -> ControlView {
        let page = pagination.display_page();
        let last_page = pagination.last_page();

        let button = |allowed: bool, target: u32| NavButton {
            target,
            enabled: allowed && pagination.in_range(target) && target != pagination.page,
        };

        ControlView {
            label: format!("Page {} of {}", page, last_page),
            page,
            last_page,
            page_size,
            options: PageSize::options()
                .map(|size| PageSizeOption {
                    size,
                    selected: size == page_size,
                })
                .collect(),
            previous: button(pagination.has_previous, pagination.previous_page),
            next: button(pagination.has_next, pagination.next_page),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: u32) -> PageSize {
        PageSize::new(n).unwrap()
    }

    #[test]
    fn test_render_middle_page() {
        let view = PaginationControl::render(&Pagination::derive(2, 10, 45), size(10));

        assert_eq!(view.label, "Page 2 of 5");
        assert_eq!(view.press_previous(), Some(PageIntent::ChangePage(1)));
        assert_eq!(view.press_next(), Some(PageIntent::ChangePage(3)));
        assert_eq!(view.options.iter().filter(|o| o.selected).count(), 1);
        assert!(view.options[0].selected);
    }

    #[test]
    fn test_last_page_disables_next() {
        let view = PaginationControl::render(&Pagination::derive(3, 20, 45), size(20));

        assert_eq!(view.label, "Page 3 of 3");
        assert!(!view.next.enabled);
        assert_eq!(view.press_next(), None);
        assert_eq!(view.press_previous(), Some(PageIntent::ChangePage(2)));
    }

    #[test]
    fn test_empty_list() {
        let view = PaginationControl::render(&Pagination::empty(10), size(10));

        assert_eq!(view.label, "Page 1 of 1");
        assert_eq!(view.press_previous(), None);
        assert_eq!(view.press_next(), None);
    }

    #[test]
    fn test_server_flag_wins_over_arithmetic() {
        // total_pages says there is more, the server says there is not
        let mut p = Pagination::derive(2, 10, 45);
        p.has_next = false;

        let view = PaginationControl::render(&p, size(10));
        assert_eq!(view.press_next(), None);
    }

    #[test]
    fn test_out_of_range_target_is_disabled() {
        // Server claims a next page beyond total_pages
        let mut p = Pagination::derive(5, 10, 45);
        p.has_next = true;
        p.next_page = 6;

        let view = PaginationControl::render(&p, size(10));
        assert!(!view.next.enabled);
        assert!(view.previous.enabled);
    }

    #[test]
    fn test_select_page_size_resets_first() {
        let view = PaginationControl::render(&Pagination::derive(4, 10, 100), size(10));
        assert_eq!(
            view.select_page_size(size(40)),
            [PageIntent::ChangePage(1), PageIntent::ChangePageSize(size(40))]
        );
    }

    #[test]
    fn test_render_does_not_touch_input() {
        let p = Pagination::derive(9, 10, 20);
        let before = p;
        let view = PaginationControl::render(&p, size(10));

        assert_eq!(p, before);
        assert_eq!(view.page, 2);
        assert_eq!(view.label, "Page 2 of 2");
    }
}
