// crates/newsgeo-core/src/model/article.rs
use crate::common::NO_TITLE;
use crate::error::{MapError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// One article of a per-year corpus.
///
/// Every field is optional in the source data; missing or `null` values are
/// tolerated here and replaced by placeholders when summarized.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, rename = "pubDate")]
    pub pub_date: Option<String>,
    /// Free-text location mentions. `null` entries are dropped.
    #[serde(default, deserialize_with = "lenient_locations")]
    pub locations: Vec<String>,
}

fn lenient_locations<'de, D>(d: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Option<String>>> = Option::deserialize(d)?;
    Ok(raw.unwrap_or_default().into_iter().flatten().collect())
}

impl ArticleRecord {
    /// Publication date (calendar day as written in the timestamp).
    pub fn published_on(&self) -> Result<NaiveDate> {
        let raw = self.pub_date.as_deref().unwrap_or_default();
        parse_pub_date(raw)
    }

    /// Popup entry with placeholders for missing fields.
    pub fn summary(&self) -> ArticleSummary {
        ArticleSummary {
            title: self
                .title
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| NO_TITLE.to_string()),
            url: self.url.clone().unwrap_or_default(),
            pub_date: self.pub_date.clone().unwrap_or_default(),
        }
    }
}

/// Parses the timestamp formats found in the crawled corpora.
///
/// Accepted: RFC 3339, `YYYY-MM-DDTHH:MM:SS[.f]`, `YYYY-MM-DD HH:MM:SS[.f]`
/// and a bare `YYYY-MM-DD`. Offsets are not applied; the written calendar day
/// is returned.
pub fn parse_pub_date(raw: &str) -> Result<NaiveDate> {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| MapError::InvalidTimestamp(raw.to_string()))
}

/// `{title, url, pubDate}` entry of the place → article index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub title: String,
    pub url: String,
    #[serde(rename = "pubDate")]
    pub pub_date: String,
}

impl ArticleSummary {
    /// Date portion of the publication timestamp (text before the first
    /// space or `T`).
    pub fn date_part(&self) -> &str {
        self.pub_date
            .split([' ', 'T'])
            .next()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn parses_corpus_timestamp_shapes() {
        let d = parse_pub_date("2020-03-17T00:00:00").unwrap();
        assert_eq!((d.year(), d.month(), d.day()), (2020, 3, 17));
        assert_eq!(parse_pub_date("2020-03-17 09:30:00").unwrap().day(), 17);
        assert_eq!(parse_pub_date("2020-03-17").unwrap().month(), 3);
        assert_eq!(parse_pub_date("2020-03-17T23:00:00+09:00").unwrap().day(), 17);
        assert!(matches!(parse_pub_date("soon"), Err(MapError::InvalidTimestamp(_))));
    }

    #[test]
    fn deserializes_sparse_records() {
        let a: ArticleRecord =
            serde_json::from_str(r#"{"title":null,"locations":["평양",null," 개성 "]}"#).unwrap();
        assert_eq!(a.locations, vec!["평양".to_string(), " 개성 ".to_string()]);

        let s = a.summary();
        assert_eq!(s.title, NO_TITLE);
        assert_eq!(s.url, "");
        assert_eq!(s.pub_date, "");

        let b: ArticleRecord = serde_json::from_str(r#"{"locations":null}"#).unwrap();
        assert!(b.locations.is_empty());
    }

    #[test]
    fn date_part_strips_time() {
        let s = ArticleSummary {
            title: "t".into(),
            url: String::new(),
            pub_date: "2021-07-01T00:00:00".into(),
        };
        assert_eq!(s.date_part(), "2021-07-01");
    }
}
