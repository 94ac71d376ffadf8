use leptos::prelude::*;
use serde::Deserialize;

use super::state::{create_state, STORE_FACETS};
use crate::shared::components::facet_panel::{FacetGroup, FilterPanel};
use crate::shared::query_sync;
use crate::shared::search_client;
use crate::shared::state::provide_filter_store;

#[derive(Debug, Clone, Deserialize)]
struct StoreHit {
    name: String,
    #[serde(default)]
    city: String,
}

#[component]
pub fn StoreList() -> impl IntoView {
    let store = create_state();
    provide_filter_store(store);

    let is_expanded = RwSignal::new(true);
    let hits = RwSignal::new(Vec::<serde_json::Value>::new());
    let pending = RwSignal::new(0.0_f64);
    let error = RwSignal::new(None::<String>);

    // A deep link like ?city=Delhi rehydrates the selection before the first
    // fetch; with no facet active, that fetch refreshes every count.
    store.update(|s| s.initialize_filters(query_sync::parse_query(&query_sync::current_query())));
    search_client::schedule_refresh("stores", STORE_FACETS, store, hits, pending, error);

    let on_change = Callback::new(move |_| {
        store.with_untracked(|s| query_sync::sync_url(s));
        search_client::schedule_refresh("stores", STORE_FACETS, store, hits, pending, error);
    });

    let results = move || store.with(|s| s.results);
    let loaded = move || store.with(|s| s.facet_init);

    view! {
        <div class="listing-page">
            <h1>"Store directory"</h1>
            {move || error.get().map(|e| view! { <div class="error">{e}</div> })}
            <div class="listing-page__layout">
                <aside class="listing-page__filters">
                    <FilterPanel is_expanded=is_expanded on_change=on_change>
                        <FacetGroup facet="city" title="City" on_change=on_change />
                        <FacetGroup facet="market" title="Market" on_change=on_change />
                        <FacetGroup facet="category" title="Category" on_change=on_change />
                    </FilterPanel>
                </aside>
                <section class="listing-page__results">
                    <p class="listing-page__count">
                        {move || if loaded() {
                            format!("{} stores found", results())
                        } else {
                            "Loading...".to_string()
                        }}
                    </p>
                    {move || {
                        hits.get()
                            .into_iter()
                            .filter_map(|hit| serde_json::from_value::<StoreHit>(hit).ok())
                            .map(|hit| {
                                view! {
                                    <div class="result-card">
                                        <div class="result-card__name">{hit.name}</div>
                                        <div class="result-card__meta">{hit.city}</div>
                                    </div>
                                }
                            })
                            .collect_view()
                    }}
                </section>
            </div>
        </div>
    }
}
