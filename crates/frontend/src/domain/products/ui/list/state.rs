use contracts::search::FacetFilterStore;
use leptos::prelude::*;

/// Facets the product catalog asks the search API to count. Price is not a
/// facet; it travels as a numeric filter.
pub const PRODUCT_FACETS: &[&str] = &["category", "color", "fabric"];

pub fn create_state() -> RwSignal<FacetFilterStore> {
    RwSignal::new(FacetFilterStore::new())
}
