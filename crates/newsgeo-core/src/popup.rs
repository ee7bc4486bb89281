// crates/newsgeo-core/src/popup.rs

//! # Popup view model
//!
//! Paginated article list of one place. Independent of the renderer's popup
//! element: the host redraws from [`PopupView::render`] after each transition.

use crate::aggregate::PlaceArticleIndex;
use crate::model::ArticleSummary;
use serde::Serialize;

/// Articles per popup page.
pub const PAGE_SIZE: usize = 3;

/// Text shown when a place has no articles.
pub const EMPTY_POPUP: &str = "no related articles";

#[derive(Debug, Clone, PartialEq)]
pub struct PopupView {
    place: String,
    page: usize,
    items: Vec<ArticleSummary>,
}

impl PopupView {
    /// Opens the popup of `place` at page 0. Unknown places open empty.
    pub fn open(place: &str, index: &PlaceArticleIndex) -> Self {
        PopupView {
            place: place.to_string(),
            page: 0,
            items: index.get(place).cloned().unwrap_or_default(),
        }
    }

    pub fn place(&self) -> &str {
        &self.place
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn items(&self) -> &[ArticleSummary] {
        &self.items
    }

    pub fn total_pages(&self) -> usize {
        self.items.len().div_ceil(PAGE_SIZE).max(1)
    }

    /// Moves to page `p`, clamped into `[0, total_pages - 1]`.
    pub fn go_to(&mut self, p: i64) {
        let last = self.total_pages() as i64 - 1;
        self.page = p.clamp(0, last) as usize;
    }

    pub fn next(&mut self) {
        self.go_to(self.page as i64 + 1);
    }

    pub fn prev(&mut self) {
        self.go_to(self.page as i64 - 1);
    }

    pub fn has_prev(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages()
    }

    /// Items of the current page.
    pub fn page_items(&self) -> &[ArticleSummary] {
        let start = (self.page * PAGE_SIZE).min(self.items.len());
        let end = (start + PAGE_SIZE).min(self.items.len());
        &self.items[start..end]
    }

    pub fn render(&self) -> PopupPage {
        PopupPage {
            place: self.place.clone(),
            page: self.page,
            total_pages: self.total_pages(),
            pager: format!("{} / {}", self.page + 1, self.total_pages()),
            prev_enabled: self.has_prev(),
            next_enabled: self.has_next(),
            lines: self
                .page_items()
                .iter()
                .map(|it| PopupLine {
                    title: it.title.clone(),
                    link: Some(it.url.clone()).filter(|u| !u.is_empty()),
                    date: it.date_part().to_string(),
                })
                .collect(),
            empty_text: self.items.is_empty().then_some(EMPTY_POPUP),
        }
    }
}

/// Renderer-agnostic content of the current popup page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopupPage {
    pub place: String,
    pub page: usize,
    pub total_pages: usize,
    pub pager: String,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub lines: Vec<PopupLine>,
    pub empty_text: Option<&'static str>,
}

/// Title (a link when a URL is known) and publication date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopupLine {
    pub title: String,
    pub link: Option<String>,
    pub date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(place: &str, n: usize) -> PlaceArticleIndex {
        let items = (0..n)
            .map(|i| ArticleSummary {
                title: format!("article {i}"),
                url: if i % 2 == 0 {
                    format!("https://news.example/{i}")
                } else {
                    String::new()
                },
                pub_date: format!("2020-01-{:02} 10:00:00", i + 1),
            })
            .collect();
        PlaceArticleIndex::from([(place.to_string(), items)])
    }

    #[test]
    fn seven_items_make_three_pages() {
        let idx = index("모란봉", 7);
        let mut popup = PopupView::open("모란봉", &idx);
        assert_eq!(popup.total_pages(), 3);
        assert!(!popup.has_prev());

        popup.go_to(2);
        assert_eq!(popup.page_items().len(), 1);
        assert_eq!(popup.page_items()[0].title, "article 6");
        assert!(!popup.has_next());
        assert!(popup.has_prev());
    }

    #[test]
    fn page_requests_are_clamped() {
        let idx = index("p", 4);
        let mut popup = PopupView::open("p", &idx);
        popup.go_to(-1);
        assert_eq!(popup.page(), 0);
        popup.go_to(99);
        assert_eq!(popup.page(), 1);
        popup.next();
        assert_eq!(popup.page(), 1);
        popup.prev();
        popup.prev();
        assert_eq!(popup.page(), 0);
    }

    #[test]
    fn empty_place_has_single_page() {
        let popup = PopupView::open("없는곳", &PlaceArticleIndex::new());
        assert_eq!(popup.total_pages(), 1);
        assert!(!popup.has_prev() && !popup.has_next());
        let page = popup.render();
        assert_eq!(page.pager, "1 / 1");
        assert_eq!(page.empty_text, Some(EMPTY_POPUP));
    }

    #[test]
    fn reopening_resets_page() {
        let idx = index("p", 9);
        let mut popup = PopupView::open("p", &idx);
        popup.go_to(2);
        let popup = PopupView::open("p", &idx);
        assert_eq!(popup.page(), 0);
    }

    #[test]
    fn lines_link_only_with_url() {
        let page = PopupView::open("p", &index("p", 2)).render();
        assert!(page.lines[0].link.is_some());
        assert!(page.lines[1].link.is_none());
        assert_eq!(page.lines[1].date, "2020-01-02");
    }
}
