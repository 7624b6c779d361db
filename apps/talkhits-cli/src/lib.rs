//! talkhits-cli
//!
//! Replays saved search responses through the grouping transform and renders
//! the result. The binary lives in `src/bin/talkhits.rs`.

pub mod render;
pub mod source;

use tracing::debug;

use talkhits_core::traits::{HitRenderer, HitSource};
use talkhits_group::{group_page, GroupingOptions};

pub use render::{JsonRenderer, TextRenderer};
pub use source::JsonHitSource;

/// Pull pages from `source`, group and render each one.
///
/// Stops when the source is exhausted, when a page reports no further
/// results, or after `max_pages`. Returns the number of pages rendered.
pub fn drive(
    source: &mut dyn HitSource,
    renderer: &mut dyn HitRenderer,
    options: GroupingOptions,
    max_pages: Option<usize>,
) -> anyhow::Result<usize> {
    let mut rendered = 0;
    while max_pages.is_none_or(|max| rendered < max) {
        let Some(page) = source.next_page()? else { break };
        let grouped = group_page(&page, options);
        debug!(page = rendered, hits = page.hits.len(), items = grouped.items.len(), "rendering page");
        renderer.render(&grouped)?;
        rendered += 1;
        if !page.has_more {
            break;
        }
    }
    Ok(rendered)
}
