//! Scripted fetcher for unit tests
//!
//! Routes are matched in insertion order against the request URL and query
//! parameters. Unmatched requests fail with a 404 so a missing fixture behaves
//! like an unavailable source.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{JsonFetcher, SourceError};
use crate::data::commons::COMMONS_API_URL;
use crate::data::random_animal::RANDOM_ANIMAL_URL;
use crate::data::wikipedia::WIKIPEDIA_API_URL;

/// A request as seen by the mock
#[derive(Debug, Clone)]
pub(crate) struct Request {
    pub url: String,
    pub params: Vec<(String, String)>,
}

impl Request {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_random(&self) -> bool {
        self.url == RANDOM_ANIMAL_URL
    }

    pub fn is_search(&self) -> bool {
        self.url == WIKIPEDIA_API_URL && self.param("list") == Some("search")
    }

    pub fn is_page_info(&self) -> bool {
        self.url == WIKIPEDIA_API_URL && self.param("titles").is_some()
    }

    pub fn is_commons(&self) -> bool {
        self.url == COMMONS_API_URL
    }
}

type Matcher = Box<dyn Fn(&Request) -> bool + Send + Sync>;

struct Route {
    matcher: Matcher,
    response: Result<Value, u16>,
}

pub(crate) struct MockFetcher {
    routes: Vec<Route>,
    calls: Mutex<Vec<Request>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn route(
        mut self,
        matcher: impl Fn(&Request) -> bool + Send + Sync + 'static,
        body: Value,
    ) -> Self {
        self.routes.push(Route {
            matcher: Box::new(matcher),
            response: Ok(body),
        });
        self
    }

    pub fn fail(
        mut self,
        matcher: impl Fn(&Request) -> bool + Send + Sync + 'static,
        status: u16,
    ) -> Self {
        self.routes.push(Route {
            matcher: Box::new(matcher),
            response: Err(status),
        });
        self
    }

    pub fn with_random_animal(self, body: Value) -> Self {
        self.route(Request::is_random, body)
    }

    pub fn with_search(self, query: &str, titles: &[&str]) -> Self {
        let query = query.to_string();
        let hits: Vec<Value> = titles
            .iter()
            .enumerate()
            .map(|(i, title)| json!({ "ns": 0, "title": title, "pageid": 1000 + i }))
            .collect();
        self.route(
            move |r| r.is_search() && r.param("srsearch") == Some(query.as_str()),
            json!({ "batchcomplete": "", "query": { "search": hits } }),
        )
    }

    pub fn with_page(self, title: &str, pageid: u64, extract: &str, thumbnail: &str) -> Self {
        let mut page = json!({
            "pageid": pageid,
            "ns": 0,
            "title": title,
            "extract": extract,
            "terms": { "description": [format!("{} description", title)] },
        });
        if !thumbnail.is_empty() {
            page["thumbnail"] = json!({ "source": thumbnail, "width": 800, "height": 600 });
        }
        let title = title.to_string();
        let mut pages = serde_json::Map::new();
        pages.insert(pageid.to_string(), page);
        let body = json!({ "query": { "pages": pages } });
        self.route(
            move |r| r.is_page_info() && r.param("titles") == Some(title.as_str()),
            body,
        )
    }

    pub fn with_missing_page(self, title: &str) -> Self {
        let body = json!({
            "query": { "pages": { "-1": { "ns": 0, "title": title, "missing": "" } } }
        });
        let title = title.to_string();
        self.route(
            move |r| r.is_page_info() && r.param("titles") == Some(title.as_str()),
            body,
        )
    }

    pub fn with_commons(self, query: &str, urls: &[&str]) -> Self {
        let pages: serde_json::Map<String, Value> = urls
            .iter()
            .enumerate()
            .map(|(i, url)| {
                let id = 5000 + i;
                (
                    id.to_string(),
                    json!({
                        "pageid": id,
                        "ns": 6,
                        "index": i + 1,
                        "title": format!("File:{}", i),
                        "imageinfo": [{ "url": url }],
                    }),
                )
            })
            .collect();
        let query = query.to_string();
        self.route(
            move |r| r.is_commons() && r.param("gsrsearch") == Some(query.as_str()),
            json!({ "query": { "pages": pages } }),
        )
    }

    pub fn calls(&self) -> Vec<Request> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, predicate: impl Fn(&Request) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|r| predicate(r)).count()
    }
}

#[async_trait]
impl JsonFetcher for MockFetcher {
    async fn get_json(&self, url: &str, params: &[(&str, &str)]) -> Result<Value, SourceError> {
        let request = Request {
            url: url.to_string(),
            params: params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        };
        self.calls.lock().unwrap().push(request.clone());

        match self.routes.iter().find(|route| (route.matcher)(&request)) {
            Some(Route {
                response: Ok(body), ..
            }) => Ok(body.clone()),
            Some(Route {
                response: Err(status),
                ..
            }) => Err(SourceError::Status(*status)),
            None => Err(SourceError::Status(404)),
        }
    }
}
