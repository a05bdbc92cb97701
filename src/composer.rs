use crate::models::{Co2Emission, Price, TicketSolution};

/// Shown wherever a price is missing from the upstream data.
pub const PRICE_NOT_AVAILABLE: &str = "N/A";

pub fn email_header() -> String {
    "<html><body><h2>New Train Availability</h2><p>Here are new trains found:</p>".to_string()
}

pub fn email_footer() -> String {
    "<p>End of list.</p></body></html>".to_string()
}

/// Renders the new journeys for one travel date as an HTML fragment. Pure
/// and infallible: missing optional fields degrade to sentinel text.
pub fn date_section(solutions: &[TicketSolution], date: &str) -> String {
    let mut section = format!("<h3>For Date: {date}</h3>");
    for ticket in solutions {
        section.push_str(&render_solution(ticket));
    }
    section
}

fn render_solution(ticket: &TicketSolution) -> String {
    let journey = &ticket.solution;
    let lead = ticket.lead_train();
    let name = lead.map_or("Unknown train", |t| t.name.as_str());
    let category = lead.map_or("", |t| t.train_category.as_str());
    let description = lead.map_or("", |t| t.description.as_str());

    let mut block = format!(
        "<p><b>{name}</b> [{category}] {description}<br>\
         From: {origin} To: {destination}<br>\
         Departure: {departure} Arrival: {arrival} (duration: {duration})<br>\
         Price: {price}</p>",
        origin = journey.origin,
        destination = journey.destination,
        departure = journey.departure_time,
        arrival = journey.arrival_time,
        duration = journey.duration,
        price = format_price(journey.price.as_ref()),
    );

    if let Some(co2) = ticket
        .co2_emission
        .as_ref()
        .filter(|co2| !co2.vehicle_details.is_empty())
    {
        block.push_str(&render_co2(co2));
    }

    block
}

pub fn format_price(price: Option<&Price>) -> String {
    match price.and_then(|p| p.amount) {
        Some(amount) => match price.and_then(|p| p.currency.as_deref()) {
            Some(currency) => format!("{amount:.2} {currency}"),
            None => format!("{amount:.2}"),
        },
        None => PRICE_NOT_AVAILABLE.to_string(),
    }
}

fn render_co2(co2: &Co2Emission) -> String {
    let title = if co2.summary_title.is_empty() {
        "CO2 emissions"
    } else {
        co2.summary_title.as_str()
    };
    let mut list = format!("<p>{title}:</p><ul>");
    for vehicle in &co2.vehicle_details {
        list.push_str(&format!(
            "<li>{}: {:.2} kg</li>",
            vehicle.vehicle_type, vehicle.kg_emissions
        ));
    }
    list.push_str("</ul>");
    list
}
