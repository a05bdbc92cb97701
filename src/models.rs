use serde::{Deserialize, Serialize};

/// Search request posted to the journey-search endpoint. Field names follow
/// the upstream wire format (camelCase).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainSearchRequest {
    pub departure_location_id: i64,
    pub arrival_location_id: i64,
    pub departure_time: String,
    pub adults: u32,
    pub children: u32,
    pub criteria: SearchCriteria,
    pub advanced_search_request: AdvancedSearchOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    pub frecce_only: bool,
    pub regional_only: bool,
    pub intercity_only: bool,
    pub tourism_only: bool,
    pub no_changes: bool,
    pub order: String,
    pub offset: u32,
    pub limit: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedSearchOptions {
    pub best_fare: bool,
    pub bike_filter: bool,
}

/// Top-level search response. Auxiliary fields (search/cart identifiers,
/// highlighted messages, minimum prices) are decoded but never interpreted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainSearchResponse {
    #[serde(default)]
    pub search_id: Option<String>,
    #[serde(default)]
    pub cart_id: Option<String>,
    #[serde(default)]
    pub highlighted_messages: Vec<serde_json::Value>,
    #[serde(default)]
    pub solutions: Vec<TicketSolution>,
    #[serde(default)]
    pub minimum_prices: Vec<serde_json::Value>,
}

/// One candidate itinerary returned by the search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketSolution {
    pub solution: TrainJourney,
    #[serde(default)]
    pub grids: Vec<Grid>,
    #[serde(default)]
    pub messages: Vec<String>,
    #[serde(default)]
    pub co2_emission: Option<Co2Emission>,
    #[serde(default)]
    pub next_day_solution: bool,
}

impl TicketSolution {
    /// First segment of the journey. Its display name is the identity used
    /// when deciding whether a recipient has already been told about this
    /// journey.
    pub fn lead_train(&self) -> Option<&TrainSegment> {
        self.solution.trains.first()
    }

    pub fn lead_train_name(&self) -> Option<&str> {
        self.lead_train().map(|train| train.name.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainJourney {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub departure_time: String,
    #[serde(default)]
    pub arrival_time: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub trains: Vec<TrainSegment>,
    #[serde(default)]
    pub price: Option<Price>,
}

/// One train leg of a journey.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainSegment {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub train_category: String,
    #[serde(default)]
    pub acronym: String,
    #[serde(default)]
    pub denomination: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub logo_id: String,
    #[serde(default)]
    pub urban: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub original_amount: Option<f64>,
    #[serde(default)]
    pub indicative: Option<bool>,
}

/// Presentation grid attached to a solution. Display-only upstream data,
/// carried through untouched and never filtered on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grid {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub info_messages: Vec<String>,
    #[serde(default)]
    pub regional: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Co2Emission {
    #[serde(default)]
    pub summary_title: String,
    #[serde(default)]
    pub summary_description: String,
    #[serde(default)]
    pub vehicle_details: Vec<VehicleEmission>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleEmission {
    #[serde(rename = "type", default)]
    pub vehicle_type: String,
    #[serde(default)]
    pub kg_emissions: f64,
}
