//! Faceted filter state for the discovery listing pages.
//!
//! `FacetFilterStore` reconciles user-toggled facet selections against the
//! facet-count object returned by the search API. Counts narrow as filters
//! apply, so a refresh can arrive after the user already changed the same
//! facet; the active-facet rule below keeps such a refresh from clobbering an
//! in-progress selection.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One enumerable option within a facet (e.g. color = "Red").
///
/// `count` is authoritative from the last server response, `selected` from
/// user interaction. `name` is unique within its facet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FacetValue {
    pub name: String,
    pub count: u64,
    pub selected: bool,
}

/// A named filter dimension with its value list, in payload order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Facet {
    pub name: String,
    pub values: Vec<FacetValue>,
}

/// Externally supplied selection state, e.g. parsed from a deep-link URL.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterInit {
    #[serde(default)]
    pub selected_filters: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub price_range: Option<(f64, f64)>,
}

/// Single source of truth for which facet values are selected and which
/// counts to display next to them.
///
/// The store is a synchronous single-writer reducer: every transition happens
/// on the UI event loop, either from a checkbox click (`toggle_filter`) or
/// from a resolved count fetch (`set_facets`). The hazard is the race between
/// the two; `active_facet` plus the skip rule in `set_facets` is the whole
/// defence. It is last-writer-wins scoped per facet, not a lock, and the
/// store does no request queuing or de-duplication — the fetching caller
/// re-applies `set_facets` after every completed fetch.
///
/// Each listing page family constructs its own instance; instances share
/// nothing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FacetFilterStore {
    /// Ordered facet list; order follows the payload that introduced each
    /// facet.
    pub facets: Vec<Facet>,
    /// Derived view: facet name -> selected value names. Recomputed from
    /// scratch on every mutation, never diffed incrementally.
    pub selected_filters: HashMap<String, Vec<String>>,
    /// User-chosen price sub-range; independent of the facet mapping.
    pub selected_price_range: Option<(f64, f64)>,
    /// Absolute slider bounds reported by the server. Sizes the slider, does
    /// not filter.
    pub price_bounds: (f64, f64),
    /// Facet most recently mutated by the user; shielded from count
    /// refreshes while it has at least one selection.
    pub active_facet: Option<String>,
    /// "N items found" display counter.
    pub results: usize,
    /// Distinguishes "facets not yet loaded" from "loaded but empty" for the
    /// loading skeleton.
    pub facet_init: bool,
}

impl FacetFilterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn facet(&self, name: &str) -> Option<&Facet> {
        self.facets.iter().find(|f| f.name == name)
    }

    pub fn has_selection(&self, name: &str) -> bool {
        self.facet(name)
            .is_some_and(|f| f.values.iter().any(|v| v.selected))
    }

    /// Number of active filters: selected values across all facets, plus one
    /// when a price range is set. Drives the panel badge.
    pub fn active_filter_count(&self) -> usize {
        let selected: usize = self.selected_filters.values().map(|v| v.len()).sum();
        selected + usize::from(self.selected_price_range.is_some())
    }

    /// Merge a raw facet-count payload (facet name -> value name -> count)
    /// without discarding user selections.
    ///
    /// The payload is computed for the current result set, which already
    /// reflects applied filters. Per facet in the payload:
    /// - if it matches `active_facet` (case-insensitively) and currently has
    ///   a selection, it is left completely untouched — counts for the
    ///   actively edited facet reflect a transitional query and would
    ///   flicker or desync with the in-progress selection;
    /// - otherwise its value list is rebuilt from the payload, carrying
    ///   `selected` over by value name. A facet not yet known carries over
    ///   from its pending `selected_filters` entry instead, so a deep-link
    ///   selection loaded before the first fetch survives it. A selected
    ///   value missing from the narrowed payload reverts to unselected, and
    ///   its `selected_filters` entry is recomputed so no trace of it
    ///   survives;
    /// - a non-object facet entry or a non-numeric count is skipped; one
    ///   broken facet must not take down the rest of the panel.
    ///
    /// Facets not mentioned in the payload are left as-is. A non-object
    /// payload is a no-op.
    pub fn set_facets(&mut self, api_facets: &Value, active_facet: Option<&str>) {
        let Some(payload) = api_facets.as_object() else {
            return;
        };
        for (facet_name, counts) in payload {
            let Some(counts) = counts.as_object() else {
                continue;
            };
            let shielded = active_facet.is_some_and(|a| a.eq_ignore_ascii_case(facet_name))
                && self.has_selection(facet_name);
            if shielded {
                continue;
            }
            let previously_selected: Vec<String> = match self.facet(facet_name) {
                Some(facet) => facet
                    .values
                    .iter()
                    .filter(|v| v.selected)
                    .map(|v| v.name.clone())
                    .collect(),
                // The facet has no value list yet, but `initialize_filters`
                // may already have recorded a selection for it.
                None => self
                    .selected_filters
                    .get(facet_name)
                    .cloned()
                    .unwrap_or_default(),
            };
            let values: Vec<FacetValue> = counts
                .iter()
                .filter_map(|(name, count)| {
                    count.as_u64().map(|count| FacetValue {
                        name: name.clone(),
                        count,
                        selected: previously_selected.iter().any(|s| s == name),
                    })
                })
                .collect();
            let selected_names: Vec<String> = values
                .iter()
                .filter(|v| v.selected)
                .map(|v| v.name.clone())
                .collect();
            self.selected_filters
                .insert(facet_name.clone(), selected_names);
            match self.facets.iter_mut().find(|f| &f.name == facet_name) {
                Some(facet) => facet.values = values,
                None => self.facets.push(Facet {
                    name: facet_name.clone(),
                    values,
                }),
            }
        }
    }

    /// Flip one value's `selected` flag and recompute that facet's
    /// `selected_filters` entry from scratch.
    ///
    /// An unknown facet or value name is deliberately a no-op on the facet
    /// data (permissive UI state), but the facet still becomes active. The
    /// no-op is logged at debug level so name mismatches between backend
    /// value names and rendered ones stay visible during development.
    pub fn toggle_filter(&mut self, facet_name: &str, value: &str) {
        match self.facets.iter_mut().find(|f| f.name == facet_name) {
            Some(facet) => {
                match facet.values.iter_mut().find(|v| v.name == value) {
                    Some(entry) => entry.selected = !entry.selected,
                    None => {
                        log::debug!("toggle_filter: no value '{value}' in facet '{facet_name}'")
                    }
                }
                let selected: Vec<String> = facet
                    .values
                    .iter()
                    .filter(|v| v.selected)
                    .map(|v| v.name.clone())
                    .collect();
                self.selected_filters
                    .insert(facet_name.to_string(), selected);
            }
            None => log::debug!("toggle_filter: unknown facet '{facet_name}'"),
        }
        self.active_facet = Some(facet_name.to_string());
    }

    /// Clear every selection, the price range, and the active facet. Counts
    /// stay as they are; a caller wanting counts for the unfiltered result
    /// set refreshes them separately.
    pub fn reset_filters(&mut self) {
        for facet in &mut self.facets {
            for value in &mut facet.values {
                value.selected = false;
            }
        }
        for selected in self.selected_filters.values_mut() {
            selected.clear();
        }
        self.selected_price_range = None;
        self.active_facet = None;
    }

    /// Bulk-load selection state that bypassed the toggle path, e.g. parsed
    /// from a URL query string on page entry.
    ///
    /// Replaces `selected_filters` wholesale (known facets missing from the
    /// input get an explicit empty entry) and recomputes every value's
    /// `selected` flag by membership, so both views stay mutually
    /// consistent. No facet is active afterwards: the next count refresh
    /// protects nothing and updates everything.
    pub fn initialize_filters(&mut self, init: FilterInit) {
        self.selected_filters = init.selected_filters;
        for facet in &mut self.facets {
            let selected = self
                .selected_filters
                .get(&facet.name)
                .cloned()
                .unwrap_or_default();
            for value in &mut facet.values {
                value.selected = selected.iter().any(|s| s == &value.name);
            }
        }
        for facet in &self.facets {
            self.selected_filters.entry(facet.name.clone()).or_default();
        }
        self.active_facet = None;
        self.selected_price_range = init.price_range;
    }

    pub fn set_price_range(&mut self, range: Option<(f64, f64)>) {
        self.selected_price_range = range;
    }

    pub fn set_price_bounds(&mut self, bounds: (f64, f64)) {
        self.price_bounds = bounds;
    }

    pub fn set_results(&mut self, results: usize) {
        self.results = results;
    }

    pub fn set_facet_init(&mut self, loaded: bool) {
        self.facet_init = loaded;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn selected_names(store: &FacetFilterStore, facet: &str) -> Vec<String> {
        store
            .facet(facet)
            .map(|f| {
                f.values
                    .iter()
                    .filter(|v| v.selected)
                    .map(|v| v.name.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// `selected_filters` must always equal the selected names derived
    /// directly from `facets`.
    fn assert_views_consistent(store: &FacetFilterStore) {
        for facet in &store.facets {
            assert_eq!(
                store.selected_filters.get(&facet.name).cloned().unwrap_or_default(),
                selected_names(store, &facet.name),
                "derived view drifted for facet '{}'",
                facet.name
            );
        }
    }

    #[test]
    fn cold_start_populates_and_toggles() {
        let mut store = FacetFilterStore::new();
        store.set_facets(&json!({"category": {"Sarees": 12, "Lehenga": 4}}), None);

        let category = store.facet("category").expect("facet built from payload");
        assert_eq!(category.values.len(), 2);
        assert!(category.values.iter().all(|v| !v.selected));
        assert_eq!(category.values[0].count, 12);
        assert_eq!(category.values[1].count, 4);

        store.toggle_filter("category", "Sarees");
        assert_eq!(
            store.selected_filters.get("category"),
            Some(&vec!["Sarees".to_string()])
        );
        assert_eq!(store.active_facet.as_deref(), Some("category"));
        assert_views_consistent(&store);
    }

    #[test]
    fn toggle_sequences_never_drift_from_facets() {
        let mut store = FacetFilterStore::new();
        store.set_facets(
            &json!({
                "color": {"Red": 3, "Blue": 7, "Green": 2},
                "size": {"S": 10, "M": 5}
            }),
            None,
        );

        store.toggle_filter("color", "Red");
        store.toggle_filter("color", "Blue");
        store.toggle_filter("size", "M");
        store.toggle_filter("color", "Red"); // off again
        store.toggle_filter("color", "Green");

        assert_views_consistent(&store);
        assert_eq!(
            store.selected_filters.get("color"),
            Some(&vec!["Blue".to_string(), "Green".to_string()])
        );
        assert_eq!(store.active_facet.as_deref(), Some("color"));
    }

    #[test]
    fn reset_is_idempotent() {
        let mut store = FacetFilterStore::new();
        store.set_facets(&json!({"city": {"Delhi": 8, "Mumbai": 3}}), None);
        store.toggle_filter("city", "Delhi");
        store.set_price_range(Some((500.0, 2000.0)));

        store.reset_filters();
        let after_first = store.clone();
        store.reset_filters();

        assert_eq!(store, after_first);
        assert!(store.facets.iter().flat_map(|f| &f.values).all(|v| !v.selected));
        assert!(store.selected_filters.values().all(|v| v.is_empty()));
        assert_eq!(store.selected_price_range, None);
        assert_eq!(store.active_facet, None);
        // Counts are untouched by reset.
        assert_eq!(store.facet("city").unwrap().values[0].count, 8);
    }

    #[test]
    fn active_facet_with_selection_is_left_untouched() {
        let mut store = FacetFilterStore::new();
        store.set_facets(
            &json!({
                "category": {"Sarees": 12, "Lehenga": 4},
                "city": {"Delhi": 8, "Mumbai": 3}
            }),
            None,
        );
        store.toggle_filter("category", "Sarees");
        let before = store.facet("category").unwrap().clone();

        // Narrowed counts arrive while "category" is still being edited: the
        // active facet keeps its old counts and flags, the other facet is
        // fully replaced.
        store.set_facets(
            &json!({
                "category": {"Sarees": 1},
                "city": {"Delhi": 5}
            }),
            Some("category"),
        );

        assert_eq!(store.facet("category").unwrap(), &before);
        let city = store.facet("city").unwrap();
        assert_eq!(city.values.len(), 1);
        assert_eq!(city.values[0].count, 5);
    }

    #[test]
    fn active_facet_match_is_case_insensitive() {
        let mut store = FacetFilterStore::new();
        store.set_facets(&json!({"category": {"Sarees": 12}}), None);
        store.toggle_filter("category", "Sarees");
        let before = store.facet("category").unwrap().clone();

        store.set_facets(&json!({"category": {"Sarees": 2}}), Some("Category"));

        assert_eq!(store.facet("category").unwrap(), &before);
    }

    #[test]
    fn active_facet_without_selection_is_refreshed() {
        let mut store = FacetFilterStore::new();
        store.set_facets(&json!({"category": {"Sarees": 12}}), None);

        // Active but nothing selected: there is nothing to protect.
        store.set_facets(&json!({"category": {"Sarees": 2, "Kurta": 6}}), Some("category"));

        let category = store.facet("category").unwrap();
        assert_eq!(category.values.len(), 2);
        assert_eq!(category.values[0].count, 2);
    }

    #[test]
    fn selection_survives_refresh_of_other_facet() {
        let mut store = FacetFilterStore::new();
        store.set_facets(
            &json!({"color": {"Red": 3, "Blue": 7}, "size": {"S": 10}}),
            None,
        );
        store.toggle_filter("color", "Red");

        store.set_facets(&json!({"size": {"S": 4, "M": 2}}), Some("size"));

        assert!(store.facet("color").unwrap().values[0].selected);
        assert_eq!(
            store.selected_filters.get("color"),
            Some(&vec!["Red".to_string()])
        );
        assert_views_consistent(&store);
    }

    #[test]
    fn disappearing_value_reverts_selection() {
        let mut store = FacetFilterStore::new();
        store.set_facets(&json!({"size": {"S": 10, "M": 5, "XL": 2}}), None);
        store.toggle_filter("size", "XL");

        // "XL" vanished from the narrowed result set and "size" is not the
        // active facet: it must not stay stuck selected.
        store.set_facets(&json!({"size": {"S": 10, "M": 5}}), None);

        assert!(store.facet("size").unwrap().values.iter().all(|v| v.name != "XL"));
        assert_eq!(store.selected_filters.get("size"), Some(&vec![]));
        assert_views_consistent(&store);
    }

    #[test]
    fn selection_carries_over_by_name_on_refresh() {
        let mut store = FacetFilterStore::new();
        store.set_facets(&json!({"city": {"Delhi": 8, "Mumbai": 3}}), None);
        store.toggle_filter("city", "Delhi");

        store.set_facets(&json!({"city": {"Delhi": 2, "Jaipur": 1}}), None);

        let city = store.facet("city").unwrap();
        assert_eq!(selected_names(&store, "city"), vec!["Delhi".to_string()]);
        assert_eq!(city.values[0].count, 2);
        assert!(!city.values.iter().find(|v| v.name == "Jaipur").unwrap().selected);
    }

    #[test]
    fn facets_missing_from_payload_are_kept() {
        let mut store = FacetFilterStore::new();
        store.set_facets(&json!({"color": {"Red": 3}, "size": {"S": 10}}), None);

        store.set_facets(&json!({"size": {"S": 4}}), None);

        assert!(store.facet("color").is_some());
        assert_eq!(store.facet("color").unwrap().values[0].count, 3);
    }

    #[test]
    fn initialize_filters_round_trip() {
        let mut store = FacetFilterStore::new();
        store.set_facets(&json!({"city": {"Delhi": 8, "Mumbai": 3}}), None);
        store.toggle_filter("city", "Mumbai");

        store.initialize_filters(FilterInit {
            selected_filters: HashMap::from([(
                "city".to_string(),
                vec!["Delhi".to_string()],
            )]),
            price_range: None,
        });

        let city = store.facet("city").unwrap();
        assert!(city.values.iter().find(|v| v.name == "Delhi").unwrap().selected);
        assert!(!city.values.iter().find(|v| v.name == "Mumbai").unwrap().selected);
        assert_eq!(
            store.selected_filters.get("city"),
            Some(&vec!["Delhi".to_string()])
        );
        assert_eq!(store.active_facet, None);
        assert_views_consistent(&store);
    }

    #[test]
    fn deep_link_selection_survives_first_count_fetch() {
        // Page entry via a deep link: the selection lands before any facet
        // counts exist, then the first response must not wipe it.
        let mut store = FacetFilterStore::new();
        store.initialize_filters(FilterInit {
            selected_filters: HashMap::from([(
                "city".to_string(),
                vec!["Delhi".to_string()],
            )]),
            price_range: None,
        });

        store.set_facets(&json!({"city": {"Delhi": 8, "Mumbai": 0}}), None);

        let city = store.facet("city").unwrap();
        assert!(city.values.iter().find(|v| v.name == "Delhi").unwrap().selected);
        assert!(!city.values.iter().find(|v| v.name == "Mumbai").unwrap().selected);
        assert_eq!(
            store.selected_filters.get("city"),
            Some(&vec!["Delhi".to_string()])
        );
        assert_views_consistent(&store);

        // A later refresh goes back to carrying flags from the value list:
        // once "Delhi" disappears from the counts it reverts as usual.
        store.set_facets(&json!({"city": {"Mumbai": 3}}), None);
        assert_eq!(store.selected_filters.get("city"), Some(&vec![]));
    }

    #[test]
    fn initialize_filters_defaults_missing_facets_to_empty() {
        let mut store = FacetFilterStore::new();
        store.set_facets(&json!({"city": {"Delhi": 8}, "category": {"Sarees": 12}}), None);
        store.toggle_filter("category", "Sarees");

        store.initialize_filters(FilterInit {
            selected_filters: HashMap::from([(
                "city".to_string(),
                vec!["Delhi".to_string()],
            )]),
            price_range: Some((500.0, 2000.0)),
        });

        assert_eq!(store.selected_filters.get("category"), Some(&vec![]));
        assert!(!store.has_selection("category"));
        assert_eq!(store.selected_price_range, Some((500.0, 2000.0)));
    }

    #[test]
    fn toggle_on_unknown_target_is_a_no_op_but_sets_active() {
        let mut store = FacetFilterStore::new();
        store.set_facets(&json!({"color": {"Red": 3}}), None);
        let before = store.facets.clone();

        store.toggle_filter("color", "Chartreuse");
        assert_eq!(store.facets, before);
        assert_eq!(store.active_facet.as_deref(), Some("color"));

        store.toggle_filter("material", "Silk");
        assert_eq!(store.facets, before);
        assert_eq!(store.active_facet.as_deref(), Some("material"));
    }

    #[test]
    fn malformed_payload_entries_are_skipped_per_facet() {
        let mut store = FacetFilterStore::new();
        store.set_facets(
            &json!({
                "color": {"Red": 3, "Blue": "seven"},
                "broken": 42,
                "size": {"S": 10}
            }),
            None,
        );

        // "broken" is not an object and is dropped; the string count is
        // dropped; everything else lands.
        assert!(store.facet("broken").is_none());
        assert_eq!(store.facet("color").unwrap().values.len(), 1);
        assert_eq!(store.facet("size").unwrap().values.len(), 1);

        // A non-object payload leaves the store untouched.
        let before = store.clone();
        store.set_facets(&json!([1, 2, 3]), None);
        assert_eq!(store, before);
    }

    #[test]
    fn active_filter_count_includes_price_range() {
        let mut store = FacetFilterStore::new();
        store.set_facets(&json!({"color": {"Red": 3, "Blue": 7}}), None);
        assert_eq!(store.active_filter_count(), 0);

        store.toggle_filter("color", "Red");
        store.toggle_filter("color", "Blue");
        assert_eq!(store.active_filter_count(), 2);

        store.set_price_range(Some((100.0, 900.0)));
        assert_eq!(store.active_filter_count(), 3);
    }

    #[test]
    fn plain_setters() {
        let mut store = FacetFilterStore::new();
        store.set_price_bounds((0.0, 10_000.0));
        store.set_results(42);
        store.set_facet_init(true);
        assert_eq!(store.price_bounds, (0.0, 10_000.0));
        assert_eq!(store.results, 42);
        assert!(store.facet_init);
    }
}
