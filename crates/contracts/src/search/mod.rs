pub mod facet_filter;
pub mod query;

pub use facet_filter::{Facet, FacetFilterStore, FacetValue, FilterInit};
pub use query::{build_search_request, FacetStats, SearchRequest, SearchResponse};
