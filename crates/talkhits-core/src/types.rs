//! Domain types for search hits and the display items derived from them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub type ObjectId = String;
pub type Attributes = Map<String, Value>;
pub type Transcriptions = BTreeMap<ObjectId, TranscriptEntry>;

/// Relevance classification the backend attaches to a highlighted attribute.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MatchLevel {
    None,
    Partial,
    Full,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HighlightMatch {
    pub value: String,
    pub match_level: MatchLevel,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matched_words: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fully_highlighted: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SnippetMatch {
    pub value: String,
    pub match_level: MatchLevel,
}

/// Wrapper matching the `{ "text": ... }` nesting of highlight and snippet results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextField<T> {
    pub text: T,
}

/// One hit as returned by the search backend.
///
/// A transcript is indexed as one record per segment; segments of the same
/// talk share a distinct key and arrive contiguously, the first with
/// `_distinctSeqID = 0` and the followers with increasing positive values.
///
/// Highlight and snippet payloads stay untyped here so that a malformed hit
/// never fails the whole batch; they are validated when projected into a
/// [`TranscriptEntry`]. Every other attribute (`start`, `text`, `title`, ...)
/// is kept verbatim in `attributes`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultRecord {
    #[serde(rename = "objectID")]
    pub object_id: ObjectId,
    #[serde(
        rename = "_distinctSeqID",
        alias = "distinctSeqID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub distinct_seq_id: Option<i64>,
    #[serde(
        rename = "_highlightResult",
        alias = "highlightResult",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub highlight_result: Option<Value>,
    #[serde(
        rename = "_snippetResult",
        alias = "snippetResult",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub snippet_result: Option<Value>,
    #[serde(flatten)]
    pub attributes: Attributes,
}

impl ResultRecord {
    pub fn new(object_id: impl Into<ObjectId>) -> Self {
        Self {
            object_id: object_id.into(),
            distinct_seq_id: None,
            highlight_result: None,
            snippet_result: None,
            attributes: Attributes::new(),
        }
    }

    /// Segment offset in seconds, if present and numeric.
    pub fn start(&self) -> Option<f64> {
        self.attributes.get("start").and_then(Value::as_f64)
    }

    pub fn text(&self) -> Option<&str> {
        self.attributes.get("text").and_then(Value::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.attributes.get("title").and_then(Value::as_str)
    }
}

/// Minimized projection of a relevant segment, kept inside a [`GroupedItem`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranscriptEntry {
    #[serde(rename = "objectID")]
    pub object_id: ObjectId,
    pub start: f64,
    pub text: String,
    #[serde(rename = "_highlightResult")]
    pub highlight_result: TextField<HighlightMatch>,
    #[serde(rename = "_snippetResult")]
    pub snippet_result: TextField<SnippetMatch>,
}

/// A logical document plus its relevant matching segments.
///
/// The record is nested rather than flattened so that a hit attribute named
/// `transcriptions` cannot shadow the map.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GroupedItem {
    pub record: ResultRecord,
    pub transcriptions: Transcriptions,
}

/// What the grouping transform hands to a renderer.
///
/// Serialized adjacently tagged (`{"kind": ..., "item": ...}`); hit attributes
/// never share a level with the tag.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", content = "item", rename_all = "snake_case")]
pub enum DisplayItem {
    Plain(ResultRecord),
    Grouped(GroupedItem),
}

/// Whether a grouped item with no relevant segments is still shown as a transcript.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EmptyGroupPolicy {
    #[default]
    Plain,
    Grouped,
}

/// Rendering branch chosen for a display item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderKind {
    Plain,
    Transcript,
}

impl DisplayItem {
    pub fn record(&self) -> &ResultRecord {
        match self {
            DisplayItem::Plain(record) => record,
            DisplayItem::Grouped(item) => &item.record,
        }
    }

    pub fn object_id(&self) -> &str {
        &self.record().object_id
    }

    pub fn transcriptions(&self) -> Option<&Transcriptions> {
        match self {
            DisplayItem::Plain(_) => None,
            DisplayItem::Grouped(item) => Some(&item.transcriptions),
        }
    }

    /// Grouped and carrying at least one transcript entry.
    pub fn has_transcript(&self) -> bool {
        self.transcriptions().is_some_and(|t| !t.is_empty())
    }

    pub fn render_kind(&self, policy: EmptyGroupPolicy) -> RenderKind {
        match (self, policy) {
            (DisplayItem::Grouped(_), EmptyGroupPolicy::Grouped) => RenderKind::Transcript,
            _ if self.has_transcript() => RenderKind::Transcript,
            _ => RenderKind::Plain,
        }
    }
}

/// One batch of hits as delivered by a [`crate::traits::HitSource`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HitsPage {
    pub hits: Vec<ResultRecord>,
    pub has_more: bool,
}

/// A batch after grouping; `has_more` is passed through untouched.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct GroupedPage {
    pub items: Vec<DisplayItem>,
    pub has_more: bool,
}
