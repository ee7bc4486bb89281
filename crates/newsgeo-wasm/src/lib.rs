//! newsgeo-wasm: WebAssembly bindings for newsgeo-core
//!
//! Exposes a [`WasmSession`] class that owns a `MapSession` and a thin
//! adapter that drives a MapLibre `Map` from the session's render plans.
//! The browser does the network I/O: it fetches the three GeoJSON layers and
//! the yearly corpus and hands the text to the session.
//!
//! Quick start (browser)
//! ---------------------
//! ```javascript
//! import init, { WasmSession } from 'newsgeo-wasm';
//!
//! await init();
//! const session = new WasmSession();
//! const [sido, sigun, gaz] = await Promise.all([
//!   fetch('main_geo_data/dprk_si_do.geojson').then(r => r.text()),
//!   fetch('main_geo_data/dprk_si_gun.geojson').then(r => r.text()),
//!   fetch('main_geo_data/gazetter_with_si_gun.geojson').then(r => r.text()),
//! ]);
//! session.loadGeography(sido, sigun, gaz);
//!
//! session.setPeriod(2020, 1, undefined, undefined);
//! const req = session.beginSearch();
//! const text = await fetch(req.url).then(r => r.ok ? r.text() : null);
//! if (session.completeSearch(req.ticket, text)) session.render(map);
//!
//! map.on('click', 'fill-layer', e => {
//!   const outcome = session.click(e.features[0]);
//!   if (outcome.kind === 'drilled') session.render(map);
//! });
//! ```
//!
//! Notes
//! -----
//! - Structured results are returned as plain JSON-compatible objects.
//! - A response whose ticket is no longer current is ignored, so only the
//!   most recent search ever reaches the map.
use geojson::{Feature, FeatureCollection};
use newsgeo_core::loader::parse_corpus;
use newsgeo_core::prelude::*;
use newsgeo_core::render::{LayerSpec, ViewportFit};
use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use std::result::Result;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&"Initializing newsgeo WASM module...".into());
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    Ok(value.serialize(&Serializer::json_compatible())?)
}

fn parse_layer(text: &str, kind: &'static str) -> newsgeo_core::Result<FeatureCollection> {
    serde_json::from_str(text).map_err(|e| MapError::MalformedLayer {
        layer: kind,
        reason: e.to_string(),
    })
}

/// Rebuilds a plain GeoJSON feature from a renderer feature object.
///
/// MapLibre features expose `geometry` through a prototype getter and keep
/// tile buffers among their own fields, so only the GeoJSON members are read.
fn feature_from_js(value: &JsValue) -> Result<Feature, JsError> {
    let plain = js_sys::Object::new();
    for key in ["id", "properties", "geometry"] {
        let key = JsValue::from_str(key);
        let field = js_sys::Reflect::get(value, &key)
            .map_err(|_| JsError::new("cannot read map feature"))?;
        if !field.is_undefined() {
            js_sys::Reflect::set(&plain, &key, &field)
                .map_err(|_| JsError::new("cannot copy map feature"))?;
        }
    }
    js_sys::Reflect::set(&plain, &JsValue::from_str("type"), &JsValue::from_str("Feature"))
        .map_err(|_| JsError::new("cannot copy map feature"))?;
    Ok(serde_wasm_bindgen::from_value(plain.into())?)
}

/* --------------------------------------------------------------------------
   Corpus request handle
-------------------------------------------------------------------------- */

/// What JS should fetch for a search, and the ticket to hand back.
#[wasm_bindgen]
pub struct CorpusTicket {
    ticket: u64,
    year: i32,
    url: String,
}

#[wasm_bindgen]
impl CorpusTicket {
    #[wasm_bindgen(getter)]
    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    #[wasm_bindgen(getter)]
    pub fn year(&self) -> i32 {
        self.year
    }

    #[wasm_bindgen(getter)]
    pub fn url(&self) -> String {
        self.url.clone()
    }
}

/* --------------------------------------------------------------------------
   Session
-------------------------------------------------------------------------- */

#[wasm_bindgen]
pub struct WasmSession {
    inner: MapSession,
}

#[wasm_bindgen]
impl WasmSession {
    /// `config_json` is an optional serialized `SourceConfig`; paths default
    /// to the standard layout relative to the page.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<WasmSession, JsError> {
        let config = match config_json {
            Some(text) => serde_json::from_str(&text)?,
            None => SourceConfig::with_base_dir(""),
        };
        Ok(WasmSession {
            inner: MapSession::new(config),
        })
    }

    /// Builds the catalog from the three layer texts. Returns `false` (and
    /// leaves the map unavailable) if any of them is unusable.
    #[wasm_bindgen(js_name = loadGeography)]
    pub fn load_geography(&mut self, provinces: &str, counties: &str, gazetteer: &str) -> bool {
        let keys = self.inner.config().property_keys.clone();
        let catalog = parse_layer(provinces, "province").and_then(|p| {
            let c = parse_layer(counties, "county")?;
            let g = parse_layer(gazetteer, "gazetteer")?;
            GeographyCatalog::from_layers(p, c, g, &keys)
        });
        self.inner.load_geography(catalog)
    }

    /// Reason the geography is unavailable, if it is.
    #[wasm_bindgen(js_name = geographyError)]
    pub fn geography_error(&self) -> Option<String> {
        match self.inner.geography_status() {
            GeographyStatus::Unavailable(reason) => Some(reason.clone()),
            _ => None,
        }
    }

    /// Sets the form; dependent fields are cleared the way the controls do.
    #[wasm_bindgen(js_name = setPeriod)]
    pub fn set_period(
        &mut self,
        year: Option<i32>,
        quarter: Option<u32>,
        month: Option<u32>,
        week: Option<u32>,
    ) {
        let params = self.inner.params_mut();
        params.set_year(year);
        params.set_quarter(quarter);
        params.set_month(month);
        params.set_week(week);
    }

    #[wasm_bindgen(js_name = monthEnabled)]
    pub fn month_enabled(&self) -> bool {
        self.inner.params().month_enabled()
    }

    #[wasm_bindgen(js_name = weekEnabled)]
    pub fn week_enabled(&self) -> bool {
        self.inner.params().week_enabled()
    }

    /// Validates the form and issues a corpus request.
    #[wasm_bindgen(js_name = beginSearch)]
    pub fn begin_search(&mut self) -> Result<CorpusTicket, JsError> {
        let request = self.inner.begin_search()?;
        Ok(CorpusTicket {
            ticket: request.ticket,
            year: request.year,
            url: request.source.display(),
        })
    }

    /// Delivers the corpus text for `ticket`; `None` means the fetch failed.
    /// Returns `false` when the response was stale and ignored.
    #[wasm_bindgen(js_name = completeSearch)]
    pub fn complete_search(&mut self, ticket: u64, corpus: Option<String>) -> bool {
        let response = match corpus {
            Some(text) => parse_corpus(text.as_bytes()),
            None => Err(MapError::NotFound(format!("corpus for ticket {ticket}"))),
        };
        self.inner.complete_search(ticket, response)
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    pub fn back(&mut self) -> bool {
        self.inner.back()
    }

    #[wasm_bindgen(js_name = selectRegion)]
    pub fn select_region(&mut self, name: &str) -> bool {
        self.inner.select_region_named(name)
    }

    pub fn level(&self) -> String {
        self.inner.level().to_string()
    }

    pub fn breadcrumb(&self) -> String {
        self.inner.breadcrumb()
    }

    #[wasm_bindgen(js_name = isLoading)]
    pub fn is_loading(&self) -> bool {
        self.inner.is_loading()
    }

    #[wasm_bindgen(js_name = noResults)]
    pub fn no_results(&self) -> bool {
        self.inner.no_results()
    }

    #[wasm_bindgen(js_name = articleCount)]
    pub fn article_count(&self) -> usize {
        self.inner.filtered_articles().len()
    }

    /// Region statistics serialized as a JSON string.
    #[wasm_bindgen(js_name = statsJson)]
    pub fn stats_json(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(self.inner.region_stats())?)
    }

    #[wasm_bindgen(js_name = regionStats)]
    pub fn region_stats(&self) -> Result<JsValue, JsError> {
        to_js(self.inner.region_stats())
    }

    #[wasm_bindgen(js_name = renderPlan)]
    pub fn render_plan(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.render_plan())
    }

    pub fn legend(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.legend())
    }

    /// Applies the current plan to a MapLibre `Map`.
    pub fn render(&self, map: JsValue) -> bool {
        match self.inner.render_plan() {
            Some(plan) => {
                apply_plan(&mut MapLibreRenderer::new(map), plan);
                true
            }
            None => false,
        }
    }

    /* ----------------------------------------------------------------------
       Renderer events
    ---------------------------------------------------------------------- */

    /// `feature` may be a raw MapLibre feature from an event.
    pub fn hover(&mut self, feature: JsValue) -> Result<JsValue, JsError> {
        let feature = feature_from_js(&feature)?;
        to_js(&self.inner.handle(MapEvent::Hover(feature)))
    }

    pub fn leave(&mut self) -> Result<JsValue, JsError> {
        to_js(&self.inner.handle(MapEvent::Leave))
    }

    pub fn click(&mut self, feature: JsValue) -> Result<JsValue, JsError> {
        let feature = feature_from_js(&feature)?;
        to_js(&self.inner.handle(MapEvent::Click(feature)))
    }

    #[wasm_bindgen(js_name = openPopup)]
    pub fn open_popup(&mut self, place: &str) -> Result<JsValue, JsError> {
        to_js(&self.inner.open_popup(place))
    }

    #[wasm_bindgen(js_name = popupNext)]
    pub fn popup_next(&mut self) -> Result<JsValue, JsError> {
        to_js(&self.inner.popup_next())
    }

    #[wasm_bindgen(js_name = popupPrev)]
    pub fn popup_prev(&mut self) -> Result<JsValue, JsError> {
        to_js(&self.inner.popup_prev())
    }

    /// `page` is 0-based and clamped to the valid range.
    #[wasm_bindgen(js_name = popupGoTo)]
    pub fn popup_go_to(&mut self, page: i32) -> Result<JsValue, JsError> {
        to_js(&self.inner.popup_go_to(i64::from(page)))
    }

    #[wasm_bindgen(js_name = closePopup)]
    pub fn close_popup(&mut self) {
        self.inner.close_popup();
    }

    /// Current popup page number (1-based), if a popup is open.
    #[wasm_bindgen(js_name = popupPage)]
    pub fn popup_page(&self) -> Option<usize> {
        self.inner.popup().map(|p| p.page() + 1)
    }
}

/* --------------------------------------------------------------------------
   MapLibre adapter
-------------------------------------------------------------------------- */

/// Drives a MapLibre GL `Map` object through reflection.
pub struct MapLibreRenderer {
    map: JsValue,
}

impl MapLibreRenderer {
    pub fn new(map: JsValue) -> Self {
        MapLibreRenderer { map }
    }

    fn call(&self, method: &str, args: &[JsValue]) -> Result<JsValue, JsValue> {
        let func: js_sys::Function =
            js_sys::Reflect::get(&self.map, &JsValue::from_str(method))?.dyn_into()?;
        let argv = js_sys::Array::new();
        for arg in args {
            argv.push(arg);
        }
        func.apply(&self.map, &argv)
    }

    fn call_logged(&self, method: &str, args: &[JsValue]) -> Option<JsValue> {
        match self.call(method, args) {
            Ok(v) => Some(v),
            Err(e) => {
                web_sys::console::error_2(&format!("map.{method} failed").into(), &e);
                None
            }
        }
    }

    fn serialize_logged<T: Serialize + ?Sized>(&self, what: &str, value: &T) -> Option<JsValue> {
        match to_js(value) {
            Ok(v) => Some(v),
            Err(_) => {
                web_sys::console::error_1(&format!("cannot serialize {what}").into());
                None
            }
        }
    }

    fn exists(&self, getter: &str, id: &str) -> bool {
        self.call_logged(getter, &[JsValue::from_str(id)])
            .is_some_and(|v| !v.is_undefined() && !v.is_null())
    }
}

impl MapRenderer for MapLibreRenderer {
    fn has_source(&self, id: &str) -> bool {
        self.exists("getSource", id)
    }

    fn remove_layer(&mut self, id: &str) {
        if self.exists("getLayer", id) {
            self.call_logged("removeLayer", &[JsValue::from_str(id)]);
        }
    }

    fn remove_source(&mut self, id: &str) {
        self.call_logged("removeSource", &[JsValue::from_str(id)]);
    }

    fn add_source(&mut self, id: &str, data: &FeatureCollection) {
        let spec = serde_json::json!({ "type": "geojson", "data": data });
        if let Some(spec) = self.serialize_logged("source", &spec) {
            self.call_logged("addSource", &[JsValue::from_str(id), spec]);
        }
    }

    fn add_layer(&mut self, layer: &LayerSpec) {
        if let Some(style) = self.serialize_logged("layer", &layer.to_style()) {
            self.call_logged("addLayer", &[style]);
        }
    }

    fn fit_bounds(&mut self, fit: &ViewportFit) {
        let [min_x, min_y, max_x, max_y] = fit.bbox;
        let bounds = serde_json::json!([[min_x, min_y], [max_x, max_y]]);
        let options = serde_json::json!({ "padding": fit.padding, "duration": fit.duration_ms });
        if let (Some(b), Some(o)) = (
            self.serialize_logged("bounds", &bounds),
            self.serialize_logged("fit options", &options),
        ) {
            self.call_logged("fitBounds", &[b, o]);
        }
    }
}
