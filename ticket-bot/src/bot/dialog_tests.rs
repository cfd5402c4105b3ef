//! Unit tests for the chat flow.

use super::*;
use crate::bot::telegram_len;
use crate::domain::{Language, SearchQuery};
use crate::railway::{SAMPLE_RESPONSE, TicketError, TrainSearchData, TrainSearchResponse};
use crate::search::{FailureKind, RetryConfig};
use crate::stations::StationDirectory;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

const CHAT: i64 = 42;
const CALENDAR_MESSAGE: i32 = 7;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 2).unwrap()
}

fn sample_data() -> TrainSearchData {
    let response: TrainSearchResponse = serde_json::from_str(SAMPLE_RESPONSE).unwrap();
    response.data.unwrap()
}

/// Sample data with the first train repeated `n` times.
fn many_trains(n: usize) -> TrainSearchData {
    let mut data = sample_data();
    let forward = data.directions.forward.as_mut().unwrap();
    let train = forward.trains[0].clone();
    forward.trains = vec![train; n];
    data
}

/// Provider replaying scripted responses and recording queries.
#[derive(Default)]
struct ScriptedProvider {
    responses: Mutex<VecDeque<Result<TrainSearchData, TicketError>>>,
    queries: Mutex<Vec<SearchQuery>>,
    language: Mutex<Option<Language>>,
}

impl ScriptedProvider {
    fn new(responses: Vec<Result<TrainSearchData, TicketError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            ..Self::default()
        }
    }
}

impl TrainProvider for Arc<ScriptedProvider> {
    async fn search_trains(&self, query: &SearchQuery) -> Result<TrainSearchData, TicketError> {
        self.queries.lock().unwrap().push(query.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(TicketError::Rejected {
                status: 503,
                body: "unavailable".to_string(),
            }))
    }

    async fn set_language(&self, language: Language) {
        *self.language.lock().unwrap() = Some(language);
    }
}

fn dialog_with(
    responses: Vec<Result<TrainSearchData, TicketError>>,
) -> (Dialog<Arc<ScriptedProvider>>, Arc<ScriptedProvider>, CancellationToken) {
    let provider = Arc::new(ScriptedProvider::new(responses));
    let search = SearchService::new(
        Arc::clone(&provider),
        Arc::new(StationDirectory::uzbekistan()),
        RetryConfig::new(1, 0, 30),
    );
    let shutdown = CancellationToken::new();
    let dialog = Dialog::new(search, ConversationStore::default(), shutdown.clone());
    (dialog, provider, shutdown)
}

async fn say(dialog: &Dialog<Arc<ScriptedProvider>>, text: &str) -> Vec<Reply> {
    let mut out = Vec::new();
    dialog.on_text(CHAT, text, today(), &mut out).await;
    out
}

async fn press(dialog: &Dialog<Arc<ScriptedProvider>>, data: &str) -> Vec<Reply> {
    let mut out = Vec::new();
    dialog
        .on_callback(CHAT, CALENDAR_MESSAGE, data, today(), &mut out)
        .await;
    out
}

async fn command(dialog: &Dialog<Arc<ScriptedProvider>>, command: Command) -> Vec<Reply> {
    let mut out = Vec::new();
    dialog.on_command(CHAT, command, today(), &mut out).await;
    out
}

fn text_of(reply: &Reply) -> &str {
    match reply {
        Reply::Send { text, .. } | Reply::Edit { text, .. } => text,
        Reply::Pause(_) => "",
    }
}

fn markup_of(reply: &Reply) -> Option<&Markup> {
    match reply {
        Reply::Send { markup, .. } | Reply::Edit { markup, .. } => Some(markup),
        Reply::Pause(_) => None,
    }
}

#[tokio::test]
async fn guided_search_for_today() {
    let (dialog, provider, _) = dialog_with(vec![Ok(sample_data())]);

    let replies = say(&dialog, "🔍 Search Trains").await;
    assert_eq!(text_of(&replies[0]), format::PROMPT_ORIGIN_TODAY);
    assert!(matches!(markup_of(&replies[0]), Some(Markup::Stations(names)) if names.contains(&"Toshkent")));

    let replies = say(&dialog, "Toshkent").await;
    assert_eq!(text_of(&replies[0]), format::prompt_destination("Toshkent"));

    let replies = say(&dialog, "Samarqand").await;
    assert_eq!(replies.len(), 3);
    assert!(text_of(&replies[0]).starts_with("✅ *Search Confirmation*"));
    assert_eq!(
        text_of(&replies[1]),
        "🔍 Searching trains from Toshkent to Samarqand on 2025-09-02..."
    );
    // Guided searches list sold-out trains too.
    assert!(text_of(&replies[2]).starts_with("🚂 *Found 2 train(s):*"));
    assert_eq!(markup_of(&replies[2]), Some(&Markup::MainMenu));

    let directory = StationDirectory::uzbekistan();
    let queries = provider.queries.lock().unwrap();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].origin(), directory.resolve("Toshkent"));
    assert_eq!(queries[0].destination(), directory.resolve("Samarqand"));
    assert_eq!(queries[0].date(), today());
}

#[tokio::test]
async fn same_station_keeps_waiting() {
    let (dialog, provider, _) = dialog_with(vec![Ok(sample_data())]);

    say(&dialog, "🔍 Search Trains").await;
    say(&dialog, "Toshkent").await;
    let replies = say(&dialog, "Toshkent").await;
    assert_eq!(text_of(&replies[0]), format::SAME_STATION);

    let replies = say(&dialog, "Buxoro").await;
    assert!(text_of(&replies[0]).contains("🎯 To: *Buxoro*"));
    assert_eq!(provider.queries.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn dated_search_through_calendar() {
    let (dialog, provider, _) = dialog_with(vec![Ok(sample_data())]);
    let september = CalendarMonth::new(2025, 9).unwrap();
    let october = CalendarMonth::new(2025, 10).unwrap();

    let replies = say(&dialog, "📅 Search by Date").await;
    assert_eq!(
        replies,
        vec![Reply::plain(calendar_text(september), Markup::Calendar(september))]
    );

    let replies = press(&dialog, "month_2025_10").await;
    assert_eq!(
        replies,
        vec![Reply::Edit {
            message_id: CALENDAR_MESSAGE,
            text: calendar_text(october),
            markup: Markup::Calendar(october),
        }]
    );

    let replies = press(&dialog, "date_2025_9_1").await;
    assert_eq!(text_of(&replies[0]), format::DATE_IN_PAST);

    let replies = press(&dialog, "date_2025_10_5").await;
    assert_eq!(
        replies[0],
        Reply::Edit {
            message_id: CALENDAR_MESSAGE,
            text: "✅ Selected date: 2025-10-05".to_string(),
            markup: Markup::None,
        }
    );
    assert_eq!(text_of(&replies[1]), format::PROMPT_ORIGIN);

    say(&dialog, "Toshkent").await;
    let replies = say(&dialog, "Xiva").await;
    assert!(text_of(&replies[0]).contains("📅 Date: *2025-10-05*"));

    let queries = provider.queries.lock().unwrap();
    assert_eq!(queries[0].date(), NaiveDate::from_ymd_opt(2025, 10, 5).unwrap());
}

#[tokio::test]
async fn text_while_picking_date_returns_to_menu() {
    let (dialog, _, _) = dialog_with(Vec::new());

    say(&dialog, "📅 Search by Date").await;
    let replies = say(&dialog, "Toshkent").await;
    assert_eq!(text_of(&replies[0]), format::WELCOME);
    assert_eq!(markup_of(&replies[0]), Some(&Markup::MainMenu));
}

#[tokio::test]
async fn calendar_filler_buttons_do_nothing() {
    let (dialog, _, _) = dialog_with(Vec::new());
    assert!(press(&dialog, "header").await.is_empty());
    assert!(press(&dialog, "empty").await.is_empty());
    assert!(press(&dialog, "something_else").await.is_empty());
}

#[tokio::test]
async fn inline_back_resets_flow() {
    let (dialog, _, _) = dialog_with(Vec::new());

    say(&dialog, "🔍 Search Trains").await;
    say(&dialog, "Toshkent").await;
    let replies = press(&dialog, "main_menu").await;
    assert_eq!(text_of(&replies[0]), format::WELCOME);

    // Idle again, so a single word is not a station.
    let replies = say(&dialog, "Samarqand").await;
    assert_eq!(text_of(&replies[0]), format::UNRECOGNIZED);
}

#[tokio::test]
async fn quick_search_with_date() {
    let (dialog, provider, _) = dialog_with(vec![Ok(sample_data())]);

    let replies = say(&dialog, "toshkent samarqand 2025-09-10").await;
    assert_eq!(
        text_of(&replies[0]),
        "🔍 Searching trains from toshkent to samarqand on 2025-09-10..."
    );
    assert!(text_of(&replies[1]).starts_with("🚂 *Found 2 train(s):*"));

    let queries = provider.queries.lock().unwrap();
    assert_eq!(queries[0].date(), NaiveDate::from_ymd_opt(2025, 9, 10).unwrap());
}

#[tokio::test]
async fn search_command_lists_available_only() {
    let (dialog, _, _) = dialog_with(vec![Ok(sample_data())]);

    let replies = command(&dialog, Command::Search("Toshkent Samarqand".to_string())).await;
    assert_eq!(replies.len(), 2);
    assert!(text_of(&replies[1]).starts_with("🚂 *Found 1 train(s):*"));
    assert_eq!(markup_of(&replies[1]), Some(&Markup::None));
}

#[tokio::test]
async fn command_usage_errors() {
    let (dialog, provider, _) = dialog_with(Vec::new());

    let replies = command(&dialog, Command::Search("Toshkent".to_string())).await;
    assert_eq!(text_of(&replies[0]), format::SEARCH_USAGE);

    let replies = command(&dialog, Command::SearchDate("Toshkent Xiva".to_string())).await;
    assert_eq!(text_of(&replies[0]), format::SEARCH_DATE_USAGE);

    let replies =
        command(&dialog, Command::SearchDate("Toshkent Xiva 15-01-2025".to_string())).await;
    assert_eq!(text_of(&replies[0]), format::INVALID_DATE);

    assert!(provider.queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn search_date_command_uses_date() {
    let (dialog, provider, _) = dialog_with(vec![Ok(TrainSearchData::default())]);

    let replies =
        command(&dialog, Command::SearchDate("Toshkent Xiva 2025-09-20".to_string())).await;
    assert_eq!(
        text_of(&replies[1]),
        format::no_trains("Toshkent", "Xiva", NaiveDate::from_ymd_opt(2025, 9, 20).unwrap(), StationHint::Command)
    );
    assert_eq!(
        provider.queries.lock().unwrap()[0].date(),
        NaiveDate::from_ymd_opt(2025, 9, 20).unwrap()
    );
}

#[tokio::test]
async fn failures_map_to_messages() {
    let (dialog, _, _) = dialog_with(vec![
        Err(TicketError::Rejected {
            status: 403,
            body: "Forbidden".to_string(),
        }),
        Err(TicketError::Rejected {
            status: 502,
            body: "Bad Gateway".to_string(),
        }),
        Err(TicketError::EmptyResponse),
    ]);

    let expected = [
        FailureKind::Authentication,
        FailureKind::Transient,
        FailureKind::Unexpected,
    ];
    for kind in expected {
        let replies = say(&dialog, "Toshkent Samarqand").await;
        assert_eq!(replies.len(), 2);
        assert_eq!(text_of(&replies[1]), format::failure_message(kind));
        assert_eq!(markup_of(&replies[1]), Some(&Markup::MainMenu));
    }
}

#[tokio::test]
async fn shutdown_cancels_search() {
    let (dialog, provider, shutdown) = dialog_with(vec![Ok(sample_data())]);
    shutdown.cancel();

    let replies = say(&dialog, "Toshkent Samarqand").await;
    assert_eq!(
        text_of(&replies[1]),
        format::failure_message(FailureKind::Unexpected)
    );
    assert!(provider.queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn long_results_are_split_with_pauses() {
    let (dialog, _, _) = dialog_with(vec![Ok(many_trains(60))]);

    let replies = say(&dialog, "Toshkent Samarqand").await;
    let parts: Vec<&Reply> = replies[1..]
        .iter()
        .filter(|r| !matches!(r, Reply::Pause(_)))
        .collect();
    let pauses = replies
        .iter()
        .filter(|r| **r == Reply::Pause(PART_PAUSE))
        .count();

    assert!(parts.len() > 1);
    assert_eq!(pauses, parts.len() - 1);
    assert!(parts
        .iter()
        .all(|p| telegram_len(text_of(p)) <= TELEGRAM_MESSAGE_LIMIT));
    // Only the last part carries the menu.
    assert_eq!(markup_of(parts[parts.len() - 1]), Some(&Markup::MainMenu));
    assert_eq!(markup_of(parts[0]), Some(&Markup::None));
}

#[tokio::test]
async fn language_button_switches_provider() {
    let (dialog, provider, _) = dialog_with(Vec::new());

    let replies = say(&dialog, "🌍 Change Language").await;
    assert_eq!(markup_of(&replies[0]), Some(&Markup::Languages));

    let replies = say(&dialog, "🇷🇺 Русский").await;
    assert_eq!(text_of(&replies[0]), format::language_changed(Language::Russian));
    assert_eq!(markup_of(&replies[0]), Some(&Markup::InlineBack));
    assert_eq!(*provider.language.lock().unwrap(), Some(Language::Russian));
}

#[tokio::test]
async fn static_commands() {
    let (dialog, _, _) = dialog_with(Vec::new());

    let replies = command(&dialog, Command::Start).await;
    assert_eq!(replies, vec![Reply::markdown(format::WELCOME, Markup::MainMenu)]);

    let replies = command(&dialog, Command::Help).await;
    assert_eq!(text_of(&replies[0]), format::HELP);

    let replies = command(&dialog, Command::Stations).await;
    assert!(text_of(&replies[0]).starts_with("🚉 *Available Railway Stations:*"));
    assert_eq!(markup_of(&replies[0]), Some(&Markup::BackToMenu));
}

#[tokio::test]
async fn chats_are_independent() {
    let (dialog, _, _) = dialog_with(Vec::new());

    say(&dialog, "🔍 Search Trains").await;
    let mut out = Vec::new();
    dialog.on_text(CHAT + 1, "Toshkent", today(), &mut out).await;
    assert_eq!(text_of(&out[0]), format::UNRECOGNIZED);

    let replies = say(&dialog, "Toshkent").await;
    assert_eq!(text_of(&replies[0]), format::prompt_destination("Toshkent"));
}
