//! Collapse consecutive segment hits of one talk into a single display item.
//!
//! Input precondition: the segments of a talk are contiguous, the first
//! carries `_distinctSeqID = 0` (or none) and the followers carry strictly
//! increasing positive values. Nothing is reordered; a continuation always
//! folds into the item emitted just before it.

use tracing::debug;

use talkhits_core::config::GroupingSettings;
use talkhits_core::types::{
    DisplayItem, GroupedItem, GroupedPage, HitsPage, ResultRecord, Transcriptions,
};

use crate::relevance::transcript_if_relevant;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupingOptions {
    /// A continuation whose sequence number is not greater than the previous
    /// segment of the current group is emitted on its own instead of merged.
    pub strict_ordering: bool,
}

impl From<&GroupingSettings> for GroupingOptions {
    fn from(settings: &GroupingSettings) -> Self {
        Self { strict_ordering: settings.strict_ordering }
    }
}

enum Placement {
    Start,
    Continue(i64),
    Fallback,
}

fn placement(seq: Option<i64>) -> Placement {
    match seq {
        None | Some(0) => Placement::Start,
        Some(n) if n > 0 => Placement::Continue(n),
        Some(_) => Placement::Fallback,
    }
}

/// Accumulator of the fold. `last_seq` is the sequence number of the most
/// recent segment merged into the trailing item, `None` when that item does
/// not open a group.
#[derive(Default)]
struct Fold {
    items: Vec<DisplayItem>,
    last_seq: Option<i64>,
}

impl Fold {
    fn step(mut self, record: &ResultRecord, options: GroupingOptions) -> Self {
        match placement(record.distinct_seq_id) {
            Placement::Start => {
                self.items.push(start_group(record));
                self.last_seq = Some(0);
            }
            Placement::Continue(seq) => {
                let in_order = !options.strict_ordering || self.last_seq.is_some_and(|last| seq > last);
                match self.items.pop() {
                    Some(base) if in_order => {
                        self.items.push(merge_into(base, record));
                        self.last_seq = Some(seq);
                    }
                    Some(base) => {
                        debug!(object_id = %record.object_id, seq, last_seq = ?self.last_seq, "out-of-order continuation, not merged");
                        self.items.push(base);
                        self.push_plain(record);
                    }
                    None => {
                        debug!(object_id = %record.object_id, seq, "continuation without a preceding hit");
                        self.push_plain(record);
                    }
                }
            }
            Placement::Fallback => {
                debug!(object_id = %record.object_id, seq = ?record.distinct_seq_id, "unexpected sequence number");
                self.push_plain(record);
            }
        }
        self
    }

    fn push_plain(&mut self, record: &ResultRecord) {
        self.items.push(DisplayItem::Plain(record.clone()));
        self.last_seq = None;
    }
}

fn start_group(record: &ResultRecord) -> DisplayItem {
    let transcriptions: Transcriptions = transcript_if_relevant(record)
        .map(|entry| (entry.object_id.clone(), entry))
        .into_iter()
        .collect();
    DisplayItem::Grouped(GroupedItem { record: record.clone(), transcriptions })
}

/// Rebuild `base` with the relevant segments of itself and `record` added.
/// The document-level fields always stay those of `base`.
fn merge_into(base: DisplayItem, record: &ResultRecord) -> DisplayItem {
    let (base_record, mut transcriptions) = match base {
        DisplayItem::Plain(record) => (record, Transcriptions::new()),
        DisplayItem::Grouped(GroupedItem { record, transcriptions }) => (record, transcriptions),
    };
    if let Some(entry) = transcript_if_relevant(&base_record) {
        transcriptions.entry(entry.object_id.clone()).or_insert(entry);
    }
    if let Some(entry) = transcript_if_relevant(record) {
        transcriptions.insert(entry.object_id.clone(), entry);
    }
    DisplayItem::Grouped(GroupedItem { record: base_record, transcriptions })
}

/// Group hits with the default options.
pub fn transform_to_transcripts(records: &[ResultRecord]) -> Vec<DisplayItem> {
    transform_with(records, GroupingOptions::default())
}

pub fn transform_with(records: &[ResultRecord], options: GroupingOptions) -> Vec<DisplayItem> {
    let fold = records
        .iter()
        .fold(Fold::default(), |fold, record| fold.step(record, options));
    debug!(input = records.len(), output = fold.items.len(), "grouped hits");
    fold.items
}

/// Group one page of hits, passing `has_more` through.
pub fn group_page(page: &HitsPage, options: GroupingOptions) -> GroupedPage {
    GroupedPage { items: transform_with(&page.hits, options), has_more: page.has_more }
}
