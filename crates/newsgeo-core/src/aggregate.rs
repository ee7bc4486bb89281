// crates/newsgeo-core/src/aggregate.rs

//! # Regional Aggregator
//!
//! Turns the filtered corpus into per-region and per-place counts. Results
//! are always recomputed from scratch; nothing here is cached.

use crate::model::{ArticleRecord, ArticleSummary, GeographyFeature, RegionStat};
use crate::text::{normalize_name, normalized_overlap};
use std::collections::BTreeMap;

/// Place name → articles mentioning it, in corpus order.
pub type PlaceArticleIndex = BTreeMap<String, Vec<ArticleSummary>>;

/// Normalized location tokens of an article.
fn tokens(article: &ArticleRecord) -> impl Iterator<Item = String> + '_ {
    article.locations.iter().map(|l| normalize_name(l))
}

/// `true` if any location token of `article` overlaps the normalized `region`.
fn mentions(article: &ArticleRecord, region: &str) -> bool {
    tokens(article).any(|t| normalized_overlap(region, &t))
}

/// Counts at province or county level.
///
/// A region's count is the number of articles with at least one location
/// token overlapping its name. Percentages are relative to the sum of counts
/// (0 everywhere when that sum is 0). Sorted by count, highest first; ties
/// keep catalog order. Region names are reported normalized.
pub fn region_stats<'a>(
    regions: impl IntoIterator<Item = &'a GeographyFeature>,
    articles: &[ArticleRecord],
) -> Vec<RegionStat> {
    if articles.is_empty() {
        return Vec::new();
    }
    let counts: Vec<(String, usize)> = regions
        .into_iter()
        .map(|region| {
            let name = normalize_name(&region.name);
            let count = articles.iter().filter(|a| mentions(a, &name)).count();
            (name, count)
        })
        .collect();
    with_percentages(counts, None)
}

fn with_percentages(counts: Vec<(String, usize)>, denominator: Option<usize>) -> Vec<RegionStat> {
    let total = denominator.unwrap_or_else(|| counts.iter().map(|(_, c)| c).sum());
    let mut stats: Vec<RegionStat> = counts
        .into_iter()
        .map(|(name, count)| RegionStat {
            name,
            count,
            percentage: if total > 0 {
                count as f64 / total as f64 * 100.0
            } else {
                0.0
            },
        })
        .collect();
    stats.sort_by(|a, b| b.count.cmp(&a.count));
    stats
}

/// Articles mentioning the county `name` (symmetric containment).
pub fn articles_in_region<'a>(articles: &'a [ArticleRecord], name: &str) -> Vec<&'a ArticleRecord> {
    let name = normalize_name(name);
    articles.iter().filter(|a| mentions(a, &name)).collect()
}

/// Point-level result: per-place counts plus the popup index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceAggregate {
    pub stats: Vec<RegionStat>,
    pub index: PlaceArticleIndex,
}

/// Counts at point level.
///
/// `articles` is the subset already scoped to the active county. Matching is
/// strict: a location token names a place only if it equals the place name
/// after normalization (first such place wins). Every matching token adds one
/// to the place's count and one entry to its index list. Percentages are
/// relative to `articles.len()`. Places without mentions are omitted.
pub fn place_stats(places: &[&GeographyFeature], articles: &[&ArticleRecord]) -> PlaceAggregate {
    if articles.is_empty() || places.is_empty() {
        return PlaceAggregate::default();
    }
    let keyed: Vec<(String, &str)> = places
        .iter()
        .map(|p| (normalize_name(&p.name), p.name.as_str()))
        .filter(|(k, _)| !k.is_empty())
        .collect();

    let mut order: Vec<&str> = Vec::new();
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    let mut index = PlaceArticleIndex::new();

    for article in articles {
        for token in tokens(article) {
            let Some(&(_, place)) = keyed.iter().find(|(k, _)| *k == token) else {
                continue;
            };
            let c = counts.entry(place).or_insert_with(|| {
                order.push(place);
                0
            });
            *c += 1;
            index
                .entry(place.to_string())
                .or_default()
                .push(article.summary());
        }
    }

    let counted = order
        .into_iter()
        .map(|p| (p.to_string(), counts[p]))
        .collect();
    PlaceAggregate {
        stats: with_percentages(counted, Some(articles.len())),
        index,
    }
}
