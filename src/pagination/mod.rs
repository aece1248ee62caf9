use serde::{Deserialize, Serialize};

pub const WINDOW_RADIUS: u64 = 2;

pub const FIRST_PAGE_LABEL: &str = "First page";
pub const LAST_PAGE_LABEL: &str = "Last page";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct PaginationInfo {
    pub total_count: u64,
    pub current_page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ResultRange {
    pub start: u64,
    pub end: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct NavVisibility {
    pub show_first: bool,
    pub show_last: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonKind {
    First,
    Numbered,
    Last,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageButton {
    pub page: u64,
    pub label: String,
    pub kind: ButtonKind,
    pub active: bool,
    pub visible: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PaginationView {
    pub total_count: u64,
    pub current_page: u64,
    pub total_pages: u64,
    pub range: ResultRange,
    pub buttons: Vec<PageButton>,
}

impl PaginationView {
    pub fn window(&self) -> Vec<u64> {
        self.buttons
            .iter()
            .filter(|b| b.kind == ButtonKind::Numbered)
            .map(|b| b.page)
            .collect()
    }
}

/// Compute the displayed result range.
///
/// An empty result set yields `0..0`. Values are not validated; a zero
/// `per_page` gives a meaningless range but never panics.
pub fn compute_range(info: &PaginationInfo) -> ResultRange {
    let start = if info.total_count == 0 {
        0
    } else {
        info.current_page
            .saturating_sub(1)
            .saturating_mul(info.per_page)
            .saturating_add(1)
    };
    let end = info
        .total_count
        .min(start.saturating_add(info.per_page).saturating_sub(1));
    ResultRange { start, end }
}

pub fn compute_window(info: &PaginationInfo) -> Vec<u64> {
    let start = info.current_page.saturating_sub(WINDOW_RADIUS).max(1);
    let end = info
        .current_page
        .saturating_add(WINDOW_RADIUS)
        .min(info.total_pages);
    (start..=end).collect()
}

pub fn compute_nav_visibility(info: &PaginationInfo) -> NavVisibility {
    NavVisibility {
        show_first: info.current_page != 1,
        show_last: info.current_page != info.total_pages,
    }
}

pub fn build_pagination_view(info: &PaginationInfo) -> PaginationView {
    let nav = compute_nav_visibility(info);
    let window = compute_window(info);

    let mut buttons = Vec::with_capacity(window.len() + 2);
    buttons.push(PageButton {
        page: 1,
        label: FIRST_PAGE_LABEL.to_string(),
        kind: ButtonKind::First,
        active: false,
        visible: nav.show_first,
    });
    for page in window {
        buttons.push(PageButton {
            page,
            label: page.to_string(),
            kind: ButtonKind::Numbered,
            active: page == info.current_page,
            visible: true,
        });
    }
    buttons.push(PageButton {
        page: info.total_pages,
        label: LAST_PAGE_LABEL.to_string(),
        kind: ButtonKind::Last,
        active: false,
        visible: nav.show_last,
    });

    PaginationView {
        total_count: info.total_count,
        current_page: info.current_page,
        total_pages: info.total_pages,
        range: compute_range(info),
        buttons,
    }
}

pub fn clamp_page(page: u64, total_pages: u64) -> u64 {
    page.clamp(1, total_pages.max(1))
}
