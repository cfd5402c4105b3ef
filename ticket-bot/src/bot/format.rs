//! User-facing texts.
//!
//! Everything here is Telegram legacy Markdown unless noted; the bot sends
//! static texts and offer listings with `ParseMode::Markdown`.

use chrono::NaiveDate;

use crate::domain::{Language, TrainOffer, format_request_date};
use crate::search::FailureKind;
use crate::stations::StationDirectory;

pub const WELCOME: &str = "🚂 *Welcome to ChiptaTop!*\n\n\
    I will help you find train tickets instantly. Use the menu buttons below:";

pub const HELP: &str = "🚂 *ChiptaTop Train Bot Help*\n\n\
    *How to Use:*\n\
    1. Tap 🔍 Search Trains to search today's trains\n\
    2. Tap 📅 Search by Date to pick a travel date first\n\
    3. Choose your departure and destination stations\n\
    4. Get the list of trains with seats and prices\n\n\
    *Available Options:*\n\
    🔍 Search Trains - find trains for today\n\
    📅 Search by Date - find trains on a specific date\n\
    🚉 View Stations - list the stations the bot knows\n\
    🌍 Change Language - choose the language of railway results\n\n\
    *Tips:*\n\
    • You can also type `Toshkent Samarqand` or `Toshkent Samarqand 2025-01-15`\n\
    • Commands: `/search` and `/search_date` work too\n\
    • Station names are case-insensitive; Latin and Russian spellings both work";

pub const UNRECOGNIZED: &str = "❓ I didn't understand that. Please use the menu buttons \
    or send a search request in the format:\n\n\
    `from_station to_station`\nor\n`from_station to_station YYYY-MM-DD`";

pub const UNKNOWN_COMMAND: &str = "Unknown command. Try /help to see available commands.";

pub const SEARCH_USAGE: &str = "❌ Please provide departure and arrival stations.\n\n\
    Example: `/search Toshkent Samarqand`";

pub const SEARCH_DATE_USAGE: &str = "❌ Please provide departure, arrival stations and date.\n\n\
    Example: `/search_date Toshkent Samarqand 2025-01-15`";

pub const INVALID_DATE: &str = "❌ Invalid date format. Please use YYYY-MM-DD format.\n\n\
    Example: `2025-01-15`";

pub const PROMPT_ORIGIN_TODAY: &str =
    "🔍 *Search Trains (Today)*\n\nPlease select your departure station:";

pub const PROMPT_ORIGIN: &str = "Please select your departure station:";

pub const SAME_STATION: &str = "❌ Departure and destination stations cannot be the same. \
    Please select a different destination station.";

pub const EMPTY_STATION: &str = "❌ Invalid station selection. Please try again.";

pub const DATE_IN_PAST: &str = "❌ Cannot select a date in the past. Please choose a future date.";

pub const CHANGE_LANGUAGE: &str =
    "🌍 *Change Language*\n\nChoose your preferred language for the bot interface:";

const OFFER_SEPARATOR_WIDTH: usize = 30;

/// Where a user should look for station names, per entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationHint {
    /// The reply keyboard's View Stations button
    MenuButton,
    /// The `/stations` command
    Command,
}

pub fn prompt_destination(origin: &str) -> String {
    format!("✅ Departure station: *{origin}*\n\nNow select your destination station:")
}

/// Plain text.
pub fn date_selected(date: NaiveDate) -> String {
    format!("✅ Selected date: {}", format_request_date(date))
}

pub fn search_confirmation(origin: &str, destination: &str, date: NaiveDate) -> String {
    format!(
        "✅ *Search Confirmation*\n\n🚉 From: *{origin}*\n🎯 To: *{destination}*\n📅 Date: *{}*\n\n\
         🔍 Searching for trains...",
        format_request_date(date)
    )
}

/// Plain text: station names are echoed as typed.
pub fn searching_notice(origin: &str, destination: &str, date: NaiveDate) -> String {
    format!(
        "🔍 Searching trains from {origin} to {destination} on {}...",
        format_request_date(date)
    )
}

pub fn no_trains(origin: &str, destination: &str, date: NaiveDate, hint: StationHint) -> String {
    let stations = match hint {
        StationHint::MenuButton => "Use the View Stations button to see available stations",
        StationHint::Command => "Use /stations to see available stations",
    };
    format!(
        "❌ No available trains found from *{origin}* to *{destination}* on *{}*.\n\n\
         Try:\n• Different dates\n• Alternative station names\n• {stations}",
        format_request_date(date)
    )
}

/// Plain text shown when a search fails, by failure category.
pub fn failure_message(kind: FailureKind) -> &'static str {
    match kind {
        FailureKind::Authentication => {
            "❌ Authentication Error\n\n\
             Unable to authenticate with railway service. Please try again later.\n\n\
             If this problem persists, the railway service may be temporarily unavailable."
        }
        FailureKind::Transient => {
            "❌ Search Failed\n\n\
             Could not connect to railway service after multiple attempts. This might be because:\n\
             • Network connection issues\n\
             • Railway service is temporarily unavailable\n\
             • High server load\n\n\
             Please try again in a few moments."
        }
        FailureKind::Unexpected => {
            "❌ Search Error\n\n\
             An unexpected error occurred while searching for trains. Please try again later."
        }
    }
}

pub fn language_changed(language: Language) -> &'static str {
    match language {
        Language::Uzbek => {
            "🇺🇿 *Til o'zgartirildi!*\n\n\
             O'zbek tiliga o'tkazildi. Endi barcha API so'rovlari o'zbek tilida bo'ladi."
        }
        Language::Russian => {
            "🇷🇺 *Язык изменен!*\n\n\
             Переключено на русский язык. Теперь все API запросы будут на русском языке."
        }
        Language::English => {
            "🇺🇸 *Language changed!*\n\n\
             Switched to English. Now all API requests will be in English."
        }
    }
}

pub fn station_listing(directory: &StationDirectory) -> String {
    let mut text = String::from("🚉 *Available Railway Stations:*\n\n");
    for station in directory.all() {
        text.push_str("• ");
        text.push_str(station.name);
        text.push('\n');
    }
    text.push_str("\n💡 Use these names in your search requests!");
    text
}

/// One offer: brand, stations, times, route and per-car seats.
///
/// Each car shows its cheapest bookable tariff, or its first tariff when
/// none has free seats.
pub fn format_offer(offer: &TrainOffer) -> String {
    let mut text = format!(
        "🚂 *{}* ({})\n📍 {} → {}\n🕐 {} - {} ({})\n📅 {}\n🚄 Route: {} → {}\n",
        offer.brand,
        offer.number,
        offer.origin_name,
        offer.destination_name,
        offer.departure_clock(),
        offer.arrival_clock(),
        offer.time_on_way,
        offer.travel_date(),
        offer.route_origin,
        offer.route_destination,
    );

    if let Some(comment) = offer.comment.as_deref().filter(|c| !c.trim().is_empty()) {
        text.push_str(&format!("ℹ️ {}\n", comment.trim()));
    }

    if offer.cars.is_empty() {
        return text;
    }

    text.push_str("\n💺 *Seat types and prices:*\n");
    for car in &offer.cars {
        let price = car
            .tariffs
            .iter()
            .filter(|t| t.is_available())
            .map(|t| t.price)
            .min()
            .or_else(|| car.tariffs.first().map(|t| t.price));
        if let Some(price) = price {
            text.push_str(&format!(
                "*{}* ({} total seats): {price} UZS\n",
                car.seat_class, car.free_seats
            ));
        }
    }
    text
}

/// Header plus every offer, separated by a rule.
pub fn format_results(offers: &[TrainOffer]) -> String {
    if offers.is_empty() {
        return "❌ No trains found for your search criteria.".to_string();
    }

    let separator = format!("\n{}\n\n", "─".repeat(OFFER_SEPARATOR_WIDTH));
    let body = offers
        .iter()
        .map(format_offer)
        .collect::<Vec<_>>()
        .join(&separator);
    format!("🚂 *Found {} train(s):*\n\n{body}", offers.len())
}
