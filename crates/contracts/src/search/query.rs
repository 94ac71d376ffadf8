//! Wire types for the search API.
//!
//! The request carries the user's selection serialized Algolia-style
//! (`facetFilters` / `numericFilters`); the response hands its facet-count
//! object straight to [`FacetFilterStore::set_facets`] without reshaping.
//!
//! [`FacetFilterStore::set_facets`]: super::facet_filter::FacetFilterStore::set_facets

use std::collections::HashMap;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Search request body.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
    /// One OR-group per facet: `[["category:Sarees", "category:Lehenga"], ["city:Delhi"]]`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub facet_filters: Vec<Vec<String>>,
    /// `price>=min` / `price<=max` clauses.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub numeric_filters: Vec<String>,
    /// Facets the caller wants counted in the response.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub facets: Vec<String>,
    #[serde(default)]
    pub page: usize,
}

/// Min/max of a numeric attribute over the current result set; sizes the
/// price slider.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FacetStats {
    pub min: f64,
    pub max: f64,
}

/// Search response, decoded as-is from the API.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default, rename = "nbHits")]
    pub nb_hits: usize,
    /// Raw facet-count object (facet name -> value name -> count). Kept as a
    /// `Value`: the filter store consumes the decoded object directly and
    /// skips malformed entries itself.
    #[serde(default)]
    pub facets: Value,
    #[serde(default)]
    pub facets_stats: Option<HashMap<String, FacetStats>>,
    #[serde(default)]
    pub hits: Vec<Value>,
}

impl SearchResponse {
    pub fn parse(body: &str) -> anyhow::Result<Self> {
        serde_json::from_str(body).context("malformed search response")
    }
}

/// Build a request from a selection snapshot.
///
/// Facets with an empty selection contribute no group. Groups are sorted so
/// the same selection always yields the same request body regardless of map
/// iteration order.
pub fn build_search_request(
    query: &str,
    selected_filters: &HashMap<String, Vec<String>>,
    price_range: Option<(f64, f64)>,
    facets: &[&str],
    page: usize,
) -> SearchRequest {
    let mut facet_filters: Vec<Vec<String>> = selected_filters
        .iter()
        .filter(|(_, values)| !values.is_empty())
        .map(|(facet, values)| {
            values
                .iter()
                .map(|value| format!("{facet}:{value}"))
                .collect()
        })
        .collect();
    facet_filters.sort();

    let mut numeric_filters = Vec::new();
    if let Some((min, max)) = price_range {
        numeric_filters.push(format!("price>={min}"));
        numeric_filters.push(format!("price<={max}"));
    }

    SearchRequest {
        query: query.to_string(),
        facet_filters,
        numeric_filters,
        facets: facets.iter().map(|f| f.to_string()).collect(),
        page,
    }
}
