use serde::de::DeserializeOwned;
use serde_json::Value;

use talkhits_core::types::{HighlightMatch, MatchLevel, ResultRecord, SnippetMatch, TextField, TranscriptEntry};

/// Project a hit into a transcript entry when its text actually matched.
///
/// Returns `None` when the highlight level is `none`, and also when any field
/// the entry needs (`_highlightResult.text`, `_snippetResult.text`, `start`,
/// `text`) is missing or has the wrong shape.
pub fn transcript_if_relevant(record: &ResultRecord) -> Option<TranscriptEntry> {
    let highlight: HighlightMatch = text_of(record.highlight_result.as_ref()?)?;
    if highlight.match_level == MatchLevel::None {
        return None;
    }
    let snippet: SnippetMatch = text_of(record.snippet_result.as_ref()?)?;

    Some(TranscriptEntry {
        object_id: record.object_id.clone(),
        start: record.start()?,
        text: record.text()?.to_owned(),
        highlight_result: TextField { text: highlight },
        snippet_result: TextField { text: snippet },
    })
}

fn text_of<T: DeserializeOwned>(result: &Value) -> Option<T> {
    serde_json::from_value(result.get("text")?.clone()).ok()
}
