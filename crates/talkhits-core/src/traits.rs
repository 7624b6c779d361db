use crate::types::{GroupedPage, HitsPage};

/// Supplies ordered batches of hits; each call is a "request more results".
///
/// Returns `Ok(None)` once the source has nothing further to deliver.
pub trait HitSource {
    fn next_page(&mut self) -> anyhow::Result<Option<HitsPage>>;
}

/// Consumes grouped batches in order.
pub trait HitRenderer {
    fn render(&mut self, page: &GroupedPage) -> anyhow::Result<()>;
}
