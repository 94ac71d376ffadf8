pub mod filter_context;

pub use filter_context::{provide_filter_store, use_filter_store, FacetFilterContext};
