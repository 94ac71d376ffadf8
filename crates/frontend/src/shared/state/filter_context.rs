use contracts::search::FacetFilterStore;
use leptos::prelude::*;

/// Handle to one listing page family's filter store.
///
/// Each page constructs its own store and provides this handle via context;
/// the store directory and the product directory never share state.
/// Components below the page (facet groups, price slider, filter chips)
/// reach the store through [`use_filter_store`] instead of a module-level
/// singleton, so rendering two listing widgets on one page cannot leak state
/// between them.
#[derive(Clone, Copy)]
pub struct FacetFilterContext(pub RwSignal<FacetFilterStore>);

pub fn provide_filter_store(store: RwSignal<FacetFilterStore>) {
    provide_context(FacetFilterContext(store));
}

pub fn use_filter_store() -> RwSignal<FacetFilterStore> {
    use_context::<FacetFilterContext>()
        .expect("FacetFilterContext not found")
        .0
}
