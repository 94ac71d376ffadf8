pub mod api_utils;
pub mod components;
pub mod query_sync;
pub mod search_client;
pub mod state;
