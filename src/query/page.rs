/// Half-open window `[start, end)` over a sorted, filtered result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    pub start: usize,
    pub end: usize,
}

impl Page {
    pub fn new(start: usize, end: usize) -> Page {
        Page { start, end }
    }
}

/// Applies `page` to `items`, clipping the window to the collection bounds.
/// `None` keeps everything.
pub fn paginate<T>(items: Vec<T>, page: Option<Page>) -> Vec<T> {
    let Some(page) = page else {
        return items;
    };
    let start = page.start.min(items.len());
    let end = page.end.clamp(start, items.len());
    items.into_iter().skip(start).take(end - start).collect()
}
