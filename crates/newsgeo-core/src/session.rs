// crates/newsgeo-core/src/session.rs

//! # Map session
//!
//! The single mutable state holder behind the map. Event handlers (search,
//! drill, back, reset, hover, click) all go through one [`MapSession`], and
//! every change to its inputs triggers a full synchronous recompute through
//! [`compute_view`] before anything is drawn again.

use crate::aggregate::{articles_in_region, place_stats, region_stats, PlaceArticleIndex};
use crate::catalog::GeographyCatalog;
use crate::common::UNKNOWN_REGION;
use crate::error::{MapError, Result};
use crate::filter::{SearchParams, TimeWindow};
use crate::loader::{CorpusLoader, CorpusRequest, SourceConfig};
use crate::model::geography::string_property;
use crate::model::{ArticleRecord, GeographyFeature, Level, RegionStat};
use crate::navigator::{FilterFrame, Navigator};
use crate::popup::{PopupPage, PopupView};
use crate::render::{legend, LegendEntry, MapEvent, RenderPlan};
use crate::text::{names_equal, names_overlap, normalize_name};
use crate::traits::NameMatch;
use geojson::{Feature, FeatureCollection};
use log::{debug, error, info};
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Session shared between event handlers; always read through the live
/// reference.
pub type SharedSession = Rc<RefCell<MapSession>>;

/// Load state of the geography layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "lowercase")]
pub enum GeographyStatus {
    Pending,
    Ready,
    /// Loading failed; map interaction is disabled until a retry succeeds.
    Unavailable(String),
}

/// Everything derived from (catalog, drill stack, filtered articles).
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub level: Level,
    pub stats: Vec<RegionStat>,
    /// Populated at point level only.
    pub place_index: PlaceArticleIndex,
    pub plan: RenderPlan,
}

/// Recomputes the whole view from its inputs.
pub fn compute_view(
    catalog: &GeographyCatalog,
    frames: &[FilterFrame],
    articles: &[ArticleRecord],
) -> ViewState {
    let level = Level::from_depth(frames.len());
    let top = frames.last();
    let bounds = top.and_then(|f| f.bounds.as_ref());

    let (stats, place_index, features) = match (level, top) {
        (Level::Point, Some(county)) => {
            let scoped = articles_in_region(articles, &county.name);
            let places = catalog.places_in(&county.name);
            let agg = place_stats(&places, &scoped);
            let counts: HashMap<&str, usize> =
                agg.stats.iter().map(|s| (s.name.as_str(), s.count)).collect();
            let features = places
                .iter()
                .filter_map(|p| counts.get(p.name.as_str()).map(|c| p.with_article_count(*c)))
                .collect();
            (agg.stats, agg.index, features)
        }
        (Level::County, Some(province)) => {
            let regions = catalog.counties_in(&province.name);
            let stats = region_stats(regions.iter().copied(), articles);
            let features = annotate(regions.iter().copied(), &stats);
            (stats, PlaceArticleIndex::new(), features)
        }
        _ => {
            let regions = catalog.provinces();
            let stats = region_stats(regions, articles);
            let features = annotate(regions, &stats);
            (stats, PlaceArticleIndex::new(), features)
        }
    };

    let collection = FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    };
    ViewState {
        level,
        stats,
        place_index,
        plan: RenderPlan::build(collection, level, bounds),
    }
}

/// Copies region features with `article_count` joined by normalized name.
fn annotate<'a>(
    regions: impl IntoIterator<Item = &'a GeographyFeature>,
    stats: &[RegionStat],
) -> Vec<Feature> {
    let counts: HashMap<&str, usize> = stats.iter().map(|s| (s.name.as_str(), s.count)).collect();
    regions
        .into_iter()
        .map(|r| {
            let count = counts.get(normalize_name(&r.name).as_str()).copied().unwrap_or(0);
            r.with_article_count(count)
        })
        .collect()
}

/// Hover tooltip content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub name: String,
    pub count: usize,
    pub percentage: f64,
    pub text: String,
}

/// Result of feeding a renderer event to the session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventOutcome {
    /// Nothing happened (no geography, missing name field, ...).
    Ignored,
    ShowTooltip(Tooltip),
    HideTooltip,
    /// A region was selected; a new render plan is available.
    Drilled { level: Level },
    PopupOpened(PopupPage),
}

#[derive(Debug)]
pub struct MapSession {
    config: SourceConfig,
    geography: GeographyStatus,
    catalog: Option<GeographyCatalog>,
    params: SearchParams,
    loader: CorpusLoader,
    pending: Option<(u64, TimeWindow)>,
    articles: Option<Vec<ArticleRecord>>,
    filtered: Vec<ArticleRecord>,
    navigator: Navigator,
    view: Option<ViewState>,
    popup: Option<PopupView>,
    loading: bool,
}

impl MapSession {
    pub fn new(config: SourceConfig) -> Self {
        MapSession {
            loader: CorpusLoader::new(config.clone()),
            config,
            geography: GeographyStatus::Pending,
            catalog: None,
            params: SearchParams::default(),
            pending: None,
            articles: None,
            filtered: Vec::new(),
            navigator: Navigator::new(),
            view: None,
            popup: None,
            loading: false,
        }
    }

    pub fn shared(self) -> SharedSession {
        Rc::new(RefCell::new(self))
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // INPUTS
    // -----------------------------------------------------------------------

    /// Installs the result of loading the three layers. A failure is logged
    /// and leaves the session in [`GeographyStatus::Unavailable`]; calling
    /// this again with a successful load recovers.
    pub fn load_geography(&mut self, result: Result<GeographyCatalog>) -> bool {
        match result {
            Ok(catalog) => {
                self.catalog = Some(catalog);
                self.geography = GeographyStatus::Ready;
                self.refresh();
                true
            }
            Err(e) => {
                error!("geography load failed: {e}");
                self.catalog = None;
                self.view = None;
                self.popup = None;
                self.geography = GeographyStatus::Unavailable(e.to_string());
                false
            }
        }
    }

    pub fn geography_status(&self) -> &GeographyStatus {
        &self.geography
    }

    pub fn catalog(&self) -> Option<&GeographyCatalog> {
        self.catalog.as_ref()
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut SearchParams {
        &mut self.params
    }

    /// Validates the form and issues a corpus request.
    ///
    /// Fails with [`MapError::Validation`](crate::MapError::Validation)
    /// without touching any state when no year is selected.
    pub fn begin_search(&mut self) -> Result<CorpusRequest> {
        let window = self.params.to_window()?;
        if !self.config.years.contains(&window.year) {
            return Err(MapError::Validation(format!(
                "year {} is outside {}..={}",
                window.year,
                self.config.years.start(),
                self.config.years.end()
            )));
        }
        let request = self.loader.request(window.year);
        info!(
            "search {:?} → {} (ticket {})",
            window,
            request.source.display(),
            request.ticket
        );
        self.pending = Some((request.ticket, window));
        self.loading = true;
        Ok(request)
    }

    /// Applies a corpus response. Returns `false` if the response belongs to
    /// a request that has since been superseded (it is dropped).
    ///
    /// On success the time window is applied and the drill stack cleared. A
    /// failed fetch clears the filtered set, which surfaces "no results".
    pub fn complete_search(
        &mut self,
        ticket: u64,
        response: Result<Vec<ArticleRecord>>,
    ) -> bool {
        let Some(response) = self.loader.accept(ticket, response) else {
            return false;
        };
        let window = match self.pending.take() {
            Some((t, w)) if t == ticket => w,
            _ => return false,
        };
        self.loading = false;
        match response {
            Ok(articles) => {
                self.filtered = window.apply(&articles);
                info!(
                    "{} of {} articles in window",
                    self.filtered.len(),
                    articles.len()
                );
                self.articles = Some(articles);
                self.navigator.reset();
            }
            Err(e) => {
                error!("corpus fetch failed: {e}");
                self.articles = None;
                self.filtered.clear();
            }
        }
        self.popup = None;
        self.refresh();
        true
    }

    /// Validates, fetches and applies synchronously.
    pub fn search(&mut self) -> Result<()> {
        let request = self.begin_search()?;
        let response = request.fetch();
        self.complete_search(request.ticket, response);
        Ok(())
    }

    /// Clears the drill stack, the form and the article set.
    pub fn reset(&mut self) {
        self.navigator.reset();
        self.params = SearchParams::default();
        self.loader.cancel_all();
        self.pending = None;
        self.loading = false;
        self.articles = None;
        self.filtered.clear();
        self.popup = None;
        self.refresh();
    }

    /// Goes up one level; no-op at province level.
    pub fn back(&mut self) -> bool {
        if !self.navigator.back() {
            return false;
        }
        self.popup = None;
        self.refresh();
        true
    }

    /// Drills into a region feature handed back by the renderer.
    pub fn select_region(&mut self, feature: &Feature) -> bool {
        if self.catalog.is_none() {
            return false;
        }
        if !self.navigator.select_region(feature, &self.config.property_keys) {
            return false;
        }
        self.popup = None;
        self.refresh();
        true
    }

    /// Drills into the visible region named `name` (normalized equality
    /// first, then symmetric containment).
    pub fn select_region_named(&mut self, name: &str) -> bool {
        let key = self.config.property_keys.name_key(self.level()).to_string();
        let feature = self.render_plan().and_then(|plan| {
            let candidates: Vec<(&str, &Feature)> = plan
                .features()
                .iter()
                .filter_map(|f| string_property(f, &key).map(|n| (n, f)))
                .collect();
            candidates
                .iter()
                .find(|(n, _)| names_equal(n, name))
                .or_else(|| candidates.iter().find(|(n, _)| names_overlap(n, name)))
                .map(|(_, f)| (*f).clone())
        });
        match feature {
            Some(f) => self.select_region(&f),
            None => false,
        }
    }

    fn refresh(&mut self) {
        self.view = self
            .catalog
            .as_ref()
            .map(|c| compute_view(c, self.navigator.frames(), &self.filtered));
        if let Some(v) = &self.view {
            debug!(
                "recomputed {} view: {} stats, {} features",
                v.level,
                v.stats.len(),
                v.plan.features().len()
            );
        }
    }

    // -----------------------------------------------------------------------
    // RENDERER EVENTS
    // -----------------------------------------------------------------------

    pub fn handle(&mut self, event: MapEvent) -> EventOutcome {
        if self.geography != GeographyStatus::Ready {
            return EventOutcome::Ignored;
        }
        match event {
            MapEvent::Hover(f) => EventOutcome::ShowTooltip(self.hover(&f)),
            MapEvent::Leave => EventOutcome::HideTooltip,
            MapEvent::Click(f) if self.level().is_choropleth() => {
                if self.select_region(&f) {
                    EventOutcome::Drilled { level: self.level() }
                } else {
                    EventOutcome::Ignored
                }
            }
            MapEvent::Click(f) => {
                let key = &self.config.property_keys.place;
                let place = string_property(&f, key).unwrap_or(UNKNOWN_REGION).to_string();
                EventOutcome::PopupOpened(self.open_popup(&place))
            }
        }
    }

    /// Tooltip for a hovered feature; zero counts when it has no statistics.
    pub fn hover(&self, feature: &Feature) -> Tooltip {
        let key = self.config.property_keys.name_key(self.level());
        let name = string_property(feature, key)
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(UNKNOWN_REGION);
        let stat = self.region_stats().iter().find(|s| s.is_named(name));
        let (count, percentage) = stat.map_or((0, 0.0), |s| (s.count, s.percentage));
        Tooltip {
            name: name.to_string(),
            count,
            percentage,
            text: format!("{count} articles ({percentage:.2}%)"),
        }
    }

    /// Opens (or re-opens) the popup of `place` at its first page.
    pub fn open_popup(&mut self, place: &str) -> PopupPage {
        let popup = PopupView::open(place, self.place_index());
        let page = popup.render();
        self.popup = Some(popup);
        page
    }

    pub fn popup(&self) -> Option<&PopupView> {
        self.popup.as_ref()
    }

    pub fn popup_next(&mut self) -> Option<PopupPage> {
        self.popup.as_mut().map(|p| {
            p.next();
            p.render()
        })
    }

    pub fn popup_prev(&mut self) -> Option<PopupPage> {
        self.popup.as_mut().map(|p| {
            p.prev();
            p.render()
        })
    }

    pub fn popup_go_to(&mut self, page: i64) -> Option<PopupPage> {
        self.popup.as_mut().map(|p| {
            p.go_to(page);
            p.render()
        })
    }

    pub fn close_popup(&mut self) {
        self.popup = None;
    }

    // -----------------------------------------------------------------------
    // OUTPUTS
    // -----------------------------------------------------------------------

    pub fn level(&self) -> Level {
        self.navigator.level()
    }

    pub fn frames(&self) -> &[FilterFrame] {
        self.navigator.frames()
    }

    pub fn breadcrumb(&self) -> String {
        self.navigator.breadcrumb()
    }

    pub fn region_stats(&self) -> &[RegionStat] {
        self.view.as_ref().map(|v| v.stats.as_slice()).unwrap_or(&[])
    }

    pub fn place_index(&self) -> &PlaceArticleIndex {
        static EMPTY: PlaceArticleIndex = PlaceArticleIndex::new();
        self.view.as_ref().map(|v| &v.place_index).unwrap_or(&EMPTY)
    }

    pub fn render_plan(&self) -> Option<&RenderPlan> {
        self.view.as_ref().map(|v| &v.plan)
    }

    pub fn view(&self) -> Option<&ViewState> {
        self.view.as_ref()
    }

    pub fn articles(&self) -> Option<&[ArticleRecord]> {
        self.articles.as_deref()
    }

    pub fn filtered_articles(&self) -> &[ArticleRecord] {
        &self.filtered
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// `true` whenever the filtered article set is empty.
    pub fn no_results(&self) -> bool {
        self.filtered.is_empty()
    }

    pub fn legend(&self) -> [LegendEntry; 5] {
        legend()
    }
}
