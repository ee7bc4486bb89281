// crates/newsgeo-core/src/loader/corpus.rs
use super::{open_stream, DataSource, SourceConfig};
use crate::error::Result;
use crate::model::ArticleRecord;
use log::{info, warn};
use std::io::Read;

/// A corpus fetch that has been issued but not yet applied.
///
/// The `ticket` orders requests: only the response to the most recently
/// issued request is accepted by [`CorpusLoader::accept`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusRequest {
    pub ticket: u64,
    pub year: i32,
    pub source: DataSource,
}

impl CorpusRequest {
    /// Reads and parses the corpus synchronously.
    pub fn fetch(&self) -> Result<Vec<ArticleRecord>> {
        let reader = open_stream(&self.source)?;
        let articles = parse_corpus(reader)?;
        info!(
            "corpus {} (ticket {}): {} articles",
            self.year,
            self.ticket,
            articles.len()
        );
        Ok(articles)
    }
}

/// Issues corpus requests and discards responses that arrive out of order.
#[derive(Debug, Clone)]
pub struct CorpusLoader {
    config: SourceConfig,
    latest: u64,
}

impl CorpusLoader {
    pub fn new(config: SourceConfig) -> Self {
        CorpusLoader { config, latest: 0 }
    }

    /// Allocates a new ticket for `year`; any earlier ticket becomes stale.
    pub fn request(&mut self, year: i32) -> CorpusRequest {
        self.latest += 1;
        CorpusRequest {
            ticket: self.latest,
            year,
            source: self.config.corpus_source(year),
        }
    }

    /// `true` if `ticket` belongs to the most recent request.
    pub fn is_current(&self, ticket: u64) -> bool {
        ticket != 0 && ticket == self.latest
    }

    /// Gate for a completed response: returns it only if it is current.
    pub fn accept<T>(&self, ticket: u64, response: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(response)
        } else {
            warn!(
                "discarding stale corpus response (ticket {ticket}, latest {})",
                self.latest
            );
            None
        }
    }

    /// Invalidates any request in flight.
    pub fn cancel_all(&mut self) {
        self.latest += 1;
    }
}

/// Parses a JSON array of article records.
pub fn parse_corpus(reader: impl Read) -> Result<Vec<ArticleRecord>> {
    Ok(serde_json::from_reader(reader)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_request_supersedes_earlier() {
        let mut loader = CorpusLoader::new(SourceConfig::default());
        let first = loader.request(2019);
        let second = loader.request(2020);

        // 2020 resolves first, 2019 last: the late 2019 response is dropped.
        assert_eq!(loader.accept(second.ticket, "2020"), Some("2020"));
        assert_eq!(loader.accept(first.ticket, "2019"), None);
    }

    #[test]
    fn cancel_invalidates_in_flight() {
        let mut loader = CorpusLoader::new(SourceConfig::default());
        let req = loader.request(2021);
        loader.cancel_all();
        assert!(!loader.is_current(req.ticket));
    }

    #[test]
    fn parses_array_of_records() {
        let json = r#"[{"title":"a","url":"u","pubDate":"2020-01-02T00:00:00","locations":["평양"]},{}]"#;
        let articles = parse_corpus(json.as_bytes()).unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].locations, vec!["평양"]);
        assert!(articles[1].title.is_none());
    }
}
