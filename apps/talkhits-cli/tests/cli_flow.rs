use std::fs;
use tempfile::TempDir;

use talkhits_cli::{drive, JsonHitSource, JsonRenderer, TextRenderer};
use talkhits_core::traits::HitSource;
use talkhits_core::types::{EmptyGroupPolicy, HitsPage, ResultRecord};
use talkhits_group::GroupingOptions;

const RESPONSES: &str = r#"[
  {
    "page": 0,
    "nbPages": 2,
    "hits": [
      {"objectID": "rust-0", "_distinctSeqID": 0, "title": "Rust in production", "start": 5, "text": "welcome",
       "_highlightResult": {"text": {"value": "welcome", "matchLevel": "none", "matchedWords": []}},
       "_snippetResult": {"text": {"value": "welcome", "matchLevel": "none"}}},
      {"objectID": "rust-7", "_distinctSeqID": 1, "title": "Rust in production", "start": 125, "text": "the borrow checker saved us",
       "_highlightResult": {"text": {"value": "the <em>borrow</em> checker saved us", "matchLevel": "full", "matchedWords": ["borrow"]}},
       "_snippetResult": {"text": {"value": "the <em>borrow</em> checker saved us", "matchLevel": "full"}}},
      {"objectID": "rust-3", "_distinctSeqID": 2, "title": "Rust in production", "start": 61, "text": "borrowing rules",
       "_highlightResult": {"text": {"value": "<em>borrow</em>ing rules", "matchLevel": "partial", "matchedWords": ["borrow"]}},
       "_snippetResult": {"text": {"value": "<em>borrow</em>ing rules", "matchLevel": "partial"}}}
    ]
  },
  {
    "page": 1,
    "nbPages": 2,
    "hits": [
      {"objectID": "go-0", "title": "Go at scale", "start": 0, "text": "intro",
       "_highlightResult": {"text": {"value": "intro", "matchLevel": "none"}},
       "_snippetResult": {"text": {"value": "intro", "matchLevel": "none"}}}
    ]
  }
]"#;

#[test]
fn text_rendering_of_saved_responses() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("responses.json");
    fs::write(&path, RESPONSES).unwrap();

    let mut source = JsonHitSource::from_path(&path).expect("source");
    let mut renderer = TextRenderer::new(Vec::new(), EmptyGroupPolicy::Plain, 80);
    let pages = drive(&mut source, &mut renderer, GroupingOptions::default(), None).expect("drive");
    assert_eq!(pages, 2);

    let text = String::from_utf8(renderer.into_inner()).unwrap();
    let expected = "\
rust-0  Rust in production  (2 matching segments)
    [01:01] <em>borrow</em>ing rules
    [02:05] the <em>borrow</em> checker saved us
-- more results available --
go-0  Go at scale
";
    assert_eq!(text, expected);
}

#[test]
fn json_rendering_tags_items() {
    let mut source = JsonHitSource::from_json(RESPONSES).expect("source");
    let mut renderer = JsonRenderer::new(Vec::new());
    drive(&mut source, &mut renderer, GroupingOptions::default(), Some(1)).expect("drive");

    let text = String::from_utf8(renderer.into_inner()).unwrap();
    let page: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
    assert_eq!(page["has_more"], true);
    let items = page["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["kind"], "grouped");
    assert_eq!(items[0]["item"]["record"]["objectID"], "rust-0");
    let transcriptions = items[0]["item"]["transcriptions"].as_object().unwrap();
    let mut keys: Vec<&String> = transcriptions.keys().collect();
    keys.sort();
    assert_eq!(keys, vec!["rust-3", "rust-7"]);
    assert_eq!(transcriptions["rust-7"]["_highlightResult"]["text"]["matchLevel"], "full");
}

/// Counts how often more results were requested.
struct EndlessSource {
    requests: usize,
    has_more: bool,
}

impl HitSource for EndlessSource {
    fn next_page(&mut self) -> anyhow::Result<Option<HitsPage>> {
        self.requests += 1;
        let hit = ResultRecord::new(format!("hit-{}", self.requests));
        Ok(Some(HitsPage { hits: vec![hit], has_more: self.has_more }))
    }
}

#[test]
fn drive_respects_page_limit_and_has_more() {
    let mut limited = EndlessSource { requests: 0, has_more: true };
    let mut renderer = JsonRenderer::new(Vec::new());
    let pages = drive(&mut limited, &mut renderer, GroupingOptions::default(), Some(3)).unwrap();
    assert_eq!(pages, 3);
    assert_eq!(limited.requests, 3);

    let mut last = EndlessSource { requests: 0, has_more: false };
    let pages = drive(&mut last, &mut renderer, GroupingOptions::default(), Some(3)).unwrap();
    assert_eq!(pages, 1);
    assert_eq!(last.requests, 1);
}

#[test]
fn empty_input_still_renders_one_empty_page() {
    let mut source = JsonHitSource::from_json("[]").expect("source");
    let mut renderer = JsonRenderer::new(Vec::new());
    let pages = drive(&mut source, &mut renderer, GroupingOptions::default(), None).unwrap();
    assert_eq!(pages, 1);
    let text = String::from_utf8(renderer.into_inner()).unwrap();
    assert_eq!(text, "{\"items\":[],\"has_more\":false}\n");
}

#[test]
fn hit_kind_attribute_does_not_replace_the_item_tag() {
    let mut source = JsonHitSource::from_json(r#"[{"objectID": "a", "kind": "keynote"}]"#).expect("source");
    let mut renderer = JsonRenderer::new(Vec::new());
    drive(&mut source, &mut renderer, GroupingOptions::default(), None).unwrap();

    let text = String::from_utf8(renderer.into_inner()).unwrap();
    let page: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
    assert_eq!(page["items"][0]["kind"], "grouped");
    assert_eq!(page["items"][0]["item"]["record"]["kind"], "keynote");
}
