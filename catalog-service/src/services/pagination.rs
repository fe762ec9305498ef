/// Page buttons shown around the current page.
pub const DEFAULT_WINDOW: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationItem {
    Page(u32),
    Ellipsis,
    Prev(u32),
    Next(u32),
}

/// First and last page of the window centred on `current`.
///
/// When the window hits either end of `1..=total_pages` it slides towards the
/// other end, so it always holds `min(window, total_pages)` pages.
fn window_bounds(current: u32, total_pages: u32, window: u32) -> (u32, u32) {
    let side = (window - 1) / 2;
    let mut start = current.saturating_sub(side).max(1);
    let mut end = current.saturating_add(side).min(total_pages);

    if end - start + 1 < window {
        start = end.saturating_sub(window - 1).max(1);
    }
    if end - start + 1 < window {
        end = start.saturating_add(window - 1).min(total_pages);
    }

    (start, end)
}

/// Navigation items for the pagination bar, in display order.
///
/// A single page needs no bar at all. `current` is clamped into
/// `1..=total_pages` and a zero `window` is treated as 1.
pub fn plan(current: u32, total_pages: u32, window: u32) -> Vec<PaginationItem> {
    if total_pages <= 1 {
        return Vec::new();
    }

    let current = current.clamp(1, total_pages);
    let (start, end) = window_bounds(current, total_pages, window.max(1));
    let mut items = Vec::with_capacity((end - start) as usize + 7);

    if current > 1 {
        items.push(PaginationItem::Prev(current - 1));
    }

    if start > 1 {
        items.push(PaginationItem::Page(1));
        if start > 2 {
            items.push(PaginationItem::Ellipsis);
        }
    }

    items.extend((start..=end).map(PaginationItem::Page));

    if end < total_pages {
        if end < total_pages - 1 {
            items.push(PaginationItem::Ellipsis);
        }
        items.push(PaginationItem::Page(total_pages));
    }

    if current < total_pages {
        items.push(PaginationItem::Next(current + 1));
    }

    items
}
