//! Round-trips filter state through the URL query string, so filtered views
//! are shareable and a deep link rehydrates the store on page entry.
//!
//! Shape: `?category=Sarees,Lehenga&price_min=500&price_max=2000`. The
//! reserved keys carry the price range; every other key is a facet name with
//! comma-separated selected value names.

use std::collections::{BTreeMap, HashMap};

use contracts::search::{FacetFilterStore, FilterInit};

const PRICE_MIN_KEY: &str = "price_min";
const PRICE_MAX_KEY: &str = "price_max";

/// Decode a query string (with or without the leading `?`) into a selection
/// snapshot. Unparseable values are dropped rather than failing the load.
pub fn parse_query(search: &str) -> FilterInit {
    let params: HashMap<String, String> =
        serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();

    let mut init = FilterInit::default();
    let mut price_min = None;
    let mut price_max = None;
    for (key, value) in params {
        match key.as_str() {
            PRICE_MIN_KEY => price_min = value.parse::<f64>().ok(),
            PRICE_MAX_KEY => price_max = value.parse::<f64>().ok(),
            _ => {
                let values: Vec<String> = value
                    .split(',')
                    .filter(|v| !v.is_empty())
                    .map(|v| v.to_string())
                    .collect();
                if !values.is_empty() {
                    init.selected_filters.insert(key, values);
                }
            }
        }
    }
    if let (Some(min), Some(max)) = (price_min, price_max) {
        init.price_range = Some((min, max));
    }
    init
}

/// Encode the store's current selection as a query string. Empty when nothing
/// is selected, so clean URLs stay clean. Keys are emitted in sorted order
/// for stable, comparable URLs.
pub fn to_query(store: &FacetFilterStore) -> String {
    let mut params: BTreeMap<String, String> = store
        .selected_filters
        .iter()
        .filter(|(_, values)| !values.is_empty())
        .map(|(facet, values)| (facet.clone(), values.join(",")))
        .collect();
    if let Some((min, max)) = store.selected_price_range {
        params.insert(PRICE_MIN_KEY.to_string(), min.to_string());
        params.insert(PRICE_MAX_KEY.to_string(), max.to_string());
    }
    // serde_qs percent-encodes the value separator; commas are valid in a
    // query component and keep the shareable URL readable.
    serde_qs::to_string(&params)
        .unwrap_or_default()
        .replace("%2C", ",")
}

/// The current location's query string, `?`-prefixed or empty.
pub fn current_query() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

/// Rewrite the URL query string to match the store, without adding a history
/// entry. No-op when the URL is already up to date.
pub fn sync_url(store: &FacetFilterStore) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let location = window.location();
    let path = location.pathname().unwrap_or_else(|_| "/".to_string());

    let query = to_query(store);
    let wanted = if query.is_empty() {
        String::new()
    } else {
        format!("?{query}")
    };
    let current = location.search().unwrap_or_default();
    if current == wanted {
        return;
    }

    if let Ok(history) = window.history() {
        let _ = history.replace_state_with_url(
            &wasm_bindgen::JsValue::NULL,
            "",
            Some(&format!("{path}{wanted}")),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_deep_link_with_facets_and_price() {
        let init = parse_query("?category=Sarees,Lehenga&city=Delhi&price_min=500&price_max=2000");
        assert_eq!(
            init.selected_filters.get("category"),
            Some(&vec!["Sarees".to_string(), "Lehenga".to_string()])
        );
        assert_eq!(
            init.selected_filters.get("city"),
            Some(&vec!["Delhi".to_string()])
        );
        assert_eq!(init.price_range, Some((500.0, 2000.0)));
    }

    #[test]
    fn half_open_price_range_is_dropped() {
        let init = parse_query("price_min=500");
        assert_eq!(init.price_range, None);
        assert!(init.selected_filters.is_empty());
    }

    #[test]
    fn empty_query_parses_to_empty_init() {
        assert_eq!(parse_query(""), FilterInit::default());
        assert_eq!(parse_query("?"), FilterInit::default());
    }

    #[test]
    fn store_selection_round_trips_through_the_query_string() {
        let mut store = FacetFilterStore::new();
        store.set_facets(
            &json!({"category": {"Sarees": 12, "Lehenga": 4}, "city": {"Delhi": 8}}),
            None,
        );
        store.toggle_filter("category", "Sarees");
        store.toggle_filter("city", "Delhi");
        store.set_price_range(Some((500.0, 2000.0)));

        let query = to_query(&store);
        let init = parse_query(&query);

        assert_eq!(
            init.selected_filters.get("category"),
            Some(&vec!["Sarees".to_string()])
        );
        assert_eq!(
            init.selected_filters.get("city"),
            Some(&vec!["Delhi".to_string()])
        );
        assert_eq!(init.price_range, Some((500.0, 2000.0)));
    }

    #[test]
    fn multi_value_facets_keep_readable_commas() {
        let mut store = FacetFilterStore::new();
        store.set_facets(&json!({"category": {"Sarees": 12, "Lehenga": 4}}), None);
        store.toggle_filter("category", "Sarees");
        store.toggle_filter("category", "Lehenga");

        assert_eq!(to_query(&store), "category=Sarees,Lehenga");
    }

    #[test]
    fn unselected_store_yields_an_empty_query() {
        let mut store = FacetFilterStore::new();
        store.set_facets(&json!({"city": {"Delhi": 8}}), None);
        assert_eq!(to_query(&store), "");
    }
}
