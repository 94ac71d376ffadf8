use leptos::prelude::*;
use serde::Deserialize;

use super::state::{create_state, PRODUCT_FACETS};
use crate::shared::components::facet_panel::{FacetGroup, FilterPanel};
use crate::shared::components::price_slider::PriceSlider;
use crate::shared::query_sync;
use crate::shared::search_client;
use crate::shared::state::provide_filter_store;

#[derive(Debug, Clone, Deserialize)]
struct ProductHit {
    name: String,
    #[serde(default)]
    price: f64,
}

#[component]
pub fn ProductList() -> impl IntoView {
    let store = create_state();
    provide_filter_store(store);

    let is_expanded = RwSignal::new(true);
    let hits = RwSignal::new(Vec::<serde_json::Value>::new());
    let pending = RwSignal::new(0.0_f64);
    let error = RwSignal::new(None::<String>);

    // Rehydrate ?category=Sarees&price_min=...&price_max=... style deep
    // links, then fetch counts for the pre-filtered result set.
    store.update(|s| s.initialize_filters(query_sync::parse_query(&query_sync::current_query())));
    search_client::schedule_refresh("products", PRODUCT_FACETS, store, hits, pending, error);

    let on_change = Callback::new(move |_| {
        store.with_untracked(|s| query_sync::sync_url(s));
        search_client::schedule_refresh("products", PRODUCT_FACETS, store, hits, pending, error);
    });

    let results = move || store.with(|s| s.results);
    let loaded = move || store.with(|s| s.facet_init);

    view! {
        <div class="listing-page">
            <h1>"Product catalog"</h1>
            {move || error.get().map(|e| view! { <div class="error">{e}</div> })}
            <div class="listing-page__layout">
                <aside class="listing-page__filters">
                    <FilterPanel is_expanded=is_expanded on_change=on_change>
                        <FacetGroup facet="category" title="Category" on_change=on_change />
                        <FacetGroup facet="color" title="Color" on_change=on_change />
                        <FacetGroup facet="fabric" title="Fabric" on_change=on_change />
                        <PriceSlider on_change=on_change />
                    </FilterPanel>
                </aside>
                <section class="listing-page__results">
                    <p class="listing-page__count">
                        {move || if loaded() {
                            format!("{} products found", results())
                        } else {
                            "Loading...".to_string()
                        }}
                    </p>
                    {move || {
                        hits.get()
                            .into_iter()
                            .filter_map(|hit| serde_json::from_value::<ProductHit>(hit).ok())
                            .map(|hit| {
                                let price = format!("\u{20b9}{:.0}", hit.price);
                                view! {
                                    <div class="result-card">
                                        <div class="result-card__name">{hit.name}</div>
                                        <div class="result-card__meta">{price}</div>
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
