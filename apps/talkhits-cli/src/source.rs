//! Reads search responses saved as JSON and replays them page by page.

use serde::Deserialize;
use std::collections::VecDeque;
use std::io::Read;
use std::path::Path;

use talkhits_core::error::{Error, Result};
use talkhits_core::traits::HitSource;
use talkhits_core::types::{HitsPage, ResultRecord};

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: Vec<ResultRecord>,
    #[serde(default)]
    page: Option<u64>,
    #[serde(default, rename = "nbPages")]
    nb_pages: Option<u64>,
}

/// Accepted layouts: several responses, a single response, or bare hits.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ResponseBody {
    Pages(Vec<SearchResponse>),
    Single(SearchResponse),
    Hits(Vec<ResultRecord>),
}

pub struct JsonHitSource {
    pages: VecDeque<HitsPage>,
}

impl JsonHitSource {
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::NotFound(path.display().to_string()));
        }
        Self::from_reader(std::fs::File::open(path)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let body: ResponseBody = serde_json::from_reader(reader)?;
        Ok(Self { pages: into_pages(body) })
    }

    pub fn from_json(s: &str) -> Result<Self> {
        Self::from_reader(s.as_bytes())
    }
}

fn into_pages(body: ResponseBody) -> VecDeque<HitsPage> {
    let responses = match body {
        ResponseBody::Pages(responses) => responses,
        ResponseBody::Single(response) => vec![response],
        ResponseBody::Hits(hits) => return VecDeque::from([HitsPage { hits, has_more: false }]),
    };
    if responses.is_empty() {
        return VecDeque::from([HitsPage::default()]);
    }
    let total = responses.len();
    responses
        .into_iter()
        .enumerate()
        .map(|(index, response)| {
            let has_more = match (response.page, response.nb_pages) {
                (Some(page), Some(nb_pages)) => page + 1 < nb_pages,
                _ => index + 1 < total,
            };
            HitsPage { hits: response.hits, has_more }
        })
        .collect()
}

impl HitSource for JsonHitSource {
    fn next_page(&mut self) -> anyhow::Result<Option<HitsPage>> {
        Ok(self.pages.pop_front())
    }
}
