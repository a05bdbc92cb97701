use crate::config::RouteConfig;
use crate::models::{AdvancedSearchOptions, SearchCriteria, TrainSearchRequest};

/// Builds the search request for one travel date. Pure: the same date and
/// route always produce the same request. Passenger counts and search
/// criteria are fixed; only the date and route vary.
pub fn build_search_request(date: &str, route: &RouteConfig) -> TrainSearchRequest {
    TrainSearchRequest {
        departure_location_id: route.departure_location_id,
        arrival_location_id: route.arrival_location_id,
        departure_time: date.to_string(),
        adults: 1,
        children: 0,
        criteria: SearchCriteria {
            frecce_only: false,
            regional_only: false,
            intercity_only: false,
            tourism_only: false,
            no_changes: true,
            order: "DEPARTURE_DATE".to_string(),
            offset: 0,
            limit: 100,
        },
        advanced_search_request: AdvancedSearchOptions {
            best_fare: false,
            bike_filter: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_date_and_route() {
        let route = RouteConfig {
            departure_location_id: 830000219,
            arrival_location_id: 830011145,
        };
        let request = build_search_request("2024-06-01", &route);

        assert_eq!(request.departure_time, "2024-06-01");
        assert_eq!(request.departure_location_id, 830000219);
        assert_eq!(request.arrival_location_id, 830011145);
        assert_eq!(request.adults, 1);
        assert_eq!(request.children, 0);
        assert!(request.criteria.no_changes);
        assert_eq!(request.criteria.order, "DEPARTURE_DATE");
        assert_eq!(request.criteria.limit, 100);
    }

    #[test]
    fn request_serializes_in_upstream_wire_format() {
        let request = build_search_request("2024-06-01", &RouteConfig::default());
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["departureLocationId"], 830000219);
        assert_eq!(value["departureTime"], "2024-06-01");
        assert_eq!(value["criteria"]["noChanges"], true);
        assert_eq!(value["advancedSearchRequest"]["bestFare"], false);
    }
}
