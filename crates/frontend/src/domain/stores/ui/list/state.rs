use contracts::search::FacetFilterStore;
use leptos::prelude::*;

/// Facets the store directory asks the search API to count.
pub const STORE_FACETS: &[&str] = &["city", "market", "category"];

pub fn create_state() -> RwSignal<FacetFilterStore> {
    RwSignal::new(FacetFilterStore::new())
}
