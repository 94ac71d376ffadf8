//! Debounced client for the search API.
//!
//! The filter store does no request queuing, cancellation, or
//! de-duplication; that is this layer's job. Refreshes are debounced, only
//! the newest scheduled one fires, and every completed fetch re-applies its
//! counts to the store.

use contracts::search::{build_search_request, FacetFilterStore, SearchRequest, SearchResponse};
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::shared::api_utils::search_url;

/// Debounce window between a toggle and the count fetch it triggers.
const REFRESH_DEBOUNCE_MS: u32 = 250;

/// POST one search request to a collection endpoint.
pub async fn run_search(
    collection: &str,
    request: &SearchRequest,
) -> Result<SearchResponse, String> {
    use web_sys::{Request, RequestInit, RequestMode, Response};

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);

    let body = serde_json::to_string(request).map_err(|e| format!("{e}"))?;
    opts.set_body(&wasm_bindgen::JsValue::from_str(&body));

    let url = search_url(collection);
    let request = Request::new_with_str_and_init(&url, &opts).map_err(|e| format!("{e:?}"))?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(|e| format!("{e:?}"))?;

    let window = web_sys::window().ok_or_else(|| "no window".to_string())?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| format!("{e:?}"))?;
    let resp: Response = resp_value.dyn_into().map_err(|e| format!("{e:?}"))?;
    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }
    let text = JsFuture::from(resp.text().map_err(|e| format!("{e:?}"))?)
        .await
        .map_err(|e| format!("{e:?}"))?;
    let text: String = text.as_string().ok_or_else(|| "bad text".to_string())?;
    SearchResponse::parse(&text).map_err(|e| format!("{e}"))
}

/// Apply one search response to the store.
///
/// The facet the user is currently editing (if any) is passed back into
/// `set_facets` so its in-progress selection survives the refresh.
pub fn apply_response(store: &mut FacetFilterStore, response: &SearchResponse) {
    let active = store.active_facet.clone();
    store.set_facets(&response.facets, active.as_deref());
    store.set_results(response.nb_hits);
    if let Some(stats) = response
        .facets_stats
        .as_ref()
        .and_then(|stats| stats.get("price"))
    {
        store.set_price_bounds((stats.min, stats.max));
    }
    store.set_facet_init(true);
}

/// Schedule a debounced count refresh for one collection.
///
/// `pending` holds the stamp of the newest scheduled refresh; older ones
/// notice a fresher stamp after the debounce window and drop out without
/// fetching.
pub fn schedule_refresh(
    collection: &'static str,
    facet_names: &'static [&'static str],
    store: RwSignal<FacetFilterStore>,
    hits: RwSignal<Vec<serde_json::Value>>,
    pending: RwSignal<f64>,
    error: RwSignal<Option<String>>,
) {
    let stamp = js_sys::Date::now();
    pending.set(stamp);
    spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(REFRESH_DEBOUNCE_MS).await;
        if pending.get_untracked() != stamp {
            // a newer refresh superseded this one
            return;
        }
        let request = store.with_untracked(|s| {
            build_search_request(
                "",
                &s.selected_filters,
                s.selected_price_range,
                facet_names,
                0,
            )
        });
        match run_search(collection, &request).await {
            Ok(response) => {
                store.update(|s| apply_response(s, &response));
                hits.set(response.hits);
                error.set(None);
            }
            Err(e) => {
                log::error!("search refresh for '{collection}' failed: {e}");
                error.set(Some(e));
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn response_application_preserves_the_edited_facet() {
        let mut store = FacetFilterStore::new();
        store.set_facets(&json!({"category": {"Sarees": 12, "Lehenga": 4}}), None);
        store.toggle_filter("category", "Sarees");
        let before = store.facet("category").unwrap().clone();

        let response = SearchResponse::parse(
            r#"{
                "nbHits": 12,
                "facets": {"category": {"Sarees": 12}, "city": {"Delhi": 7}},
                "facets_stats": {"price": {"min": 250.0, "max": 8999.0}}
            }"#,
        )
        .unwrap();
        apply_response(&mut store, &response);

        assert_eq!(store.facet("category").unwrap(), &before);
        assert_eq!(store.facet("city").unwrap().values.len(), 1);
        assert_eq!(store.results, 12);
        assert_eq!(store.price_bounds, (250.0, 8999.0));
        assert!(store.facet_init);
    }
}
