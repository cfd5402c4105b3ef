//! Chat logic, independent of Telegram.
//!
//! `Dialog` turns user actions (commands, text, button presses) into
//! [`Reply`] values pushed through an [`Outbox`]. The teloxide layer owns
//! delivery; tests collect replies into a `Vec`.

use std::future::Future;
use std::time::Duration;

use chrono::NaiveDate;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use super::calendar::{CalendarMonth, CallbackAction, calendar_text};
use super::format::{self, StationHint};
use super::handlers::Command;
use super::keyboards::MenuButton;
use super::split::{TELEGRAM_MESSAGE_LIMIT, split_message};
use crate::conversation::{ConversationStore, Input, PendingSearch, Transition};
use crate::domain::parse_request_date;
use crate::search::{SearchService, TrainProvider};

/// Pause between the parts of a split reply.
pub const PART_PAUSE: Duration = Duration::from_millis(500);

/// How the text of a reply is parsed by Telegram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
    Plain,
    Markdown,
}

/// Keyboard attached to a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Markup {
    None,
    MainMenu,
    /// Station names, two per row.
    Stations(Vec<&'static str>),
    BackToMenu,
    Languages,
    /// Inline back-to-menu button.
    InlineBack,
    Calendar(CalendarMonth),
}

/// One outgoing action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Send {
        text: String,
        format: TextFormat,
        markup: Markup,
    },
    /// Replace the text (and inline keyboard) of a message the bot sent.
    Edit {
        message_id: i32,
        text: String,
        markup: Markup,
    },
    Pause(Duration),
}

impl Reply {
    pub fn markdown(text: impl Into<String>, markup: Markup) -> Self {
        Reply::Send {
            text: text.into(),
            format: TextFormat::Markdown,
            markup,
        }
    }

    pub fn plain(text: impl Into<String>, markup: Markup) -> Self {
        Reply::Send {
            text: text.into(),
            format: TextFormat::Plain,
            markup,
        }
    }
}

/// Destination for replies.
///
/// Delivery failures are the outbox's concern: a failed send is logged
/// there and never aborts the rest of the conversation turn.
pub trait Outbox: Send {
    fn deliver(&mut self, reply: Reply) -> impl Future<Output = ()> + Send;
}

impl Outbox for Vec<Reply> {
    async fn deliver(&mut self, reply: Reply) {
        self.push(reply);
    }
}

/// Which entry point started a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchMode {
    /// Menu flow or a typed `from to [date]` line: every train, menu kept.
    Guided,
    /// `/search` and `/search_date`: trains with free seats only.
    Command,
}

impl SearchMode {
    fn menu(self) -> Markup {
        match self {
            SearchMode::Guided => Markup::MainMenu,
            SearchMode::Command => Markup::None,
        }
    }

    fn hint(self) -> StationHint {
        match self {
            SearchMode::Guided => StationHint::MenuButton,
            SearchMode::Command => StationHint::Command,
        }
    }
}

/// Per-bot chat logic shared by every update handler.
pub struct Dialog<P> {
    search: SearchService<P>,
    conversations: ConversationStore,
    shutdown: CancellationToken,
    station_names: Vec<&'static str>,
}

impl<P: TrainProvider> Dialog<P> {
    /// Searches started by this dialog are cancelled with `shutdown`.
    pub fn new(
        search: SearchService<P>,
        conversations: ConversationStore,
        shutdown: CancellationToken,
    ) -> Self {
        let station_names = search.directory().all().iter().map(|s| s.name).collect();
        Self {
            search,
            conversations,
            shutdown,
            station_names,
        }
    }

    pub fn search(&self) -> &SearchService<P> {
        &self.search
    }

    pub fn conversations(&self) -> &ConversationStore {
        &self.conversations
    }

    pub async fn on_command(
        &self,
        chat_id: i64,
        command: Command,
        today: NaiveDate,
        out: &mut impl Outbox,
    ) {
        info!(chat_id, ?command, "command");
        match command {
            Command::Start => {
                self.conversations.reset(chat_id).await;
                out.deliver(Reply::markdown(format::WELCOME, Markup::MainMenu))
                    .await;
            }
            Command::Help => {
                out.deliver(Reply::markdown(format::HELP, Markup::BackToMenu))
                    .await;
            }
            Command::Stations => {
                let listing = format::station_listing(self.search.directory());
                out.deliver(Reply::markdown(listing, Markup::BackToMenu))
                    .await;
            }
            Command::Search(args) => {
                let parts: Vec<&str> = args.split_whitespace().collect();
                let [origin, destination, ..] = parts.as_slice() else {
                    out.deliver(Reply::markdown(format::SEARCH_USAGE, Markup::None))
                        .await;
                    return;
                };
                self.run_search(origin, destination, today, SearchMode::Command, out)
                    .await;
            }
            Command::SearchDate(args) => {
                let parts: Vec<&str> = args.split_whitespace().collect();
                let [origin, destination, date, ..] = parts.as_slice() else {
                    out.deliver(Reply::markdown(format::SEARCH_DATE_USAGE, Markup::None))
                        .await;
                    return;
                };
                let Some(date) = parse_request_date(date) else {
                    out.deliver(Reply::markdown(format::INVALID_DATE, Markup::None))
                        .await;
                    return;
                };
                self.run_search(origin, destination, date, SearchMode::Command, out)
                    .await;
            }
        }
    }

    /// Free text: a menu button label, a station name, or a quick search.
    pub async fn on_text(&self, chat_id: i64, text: &str, today: NaiveDate, out: &mut impl Outbox) {
        if let Some(button) = MenuButton::parse(text) {
            debug!(chat_id, ?button, "menu button");
            self.on_button(chat_id, button, today, out).await;
            return;
        }

        let transition = self
            .conversations
            .apply(chat_id, Input::Text(text), today)
            .await;
        self.render(transition, today, out).await;
    }

    /// Inline button press on message `message_id`.
    pub async fn on_callback(
        &self,
        chat_id: i64,
        message_id: i32,
        data: &str,
        today: NaiveDate,
        out: &mut impl Outbox,
    ) {
        let Some(action) = CallbackAction::parse(data) else {
            debug!(chat_id, data, "ignoring unknown callback");
            return;
        };

        match action {
            CallbackAction::Ignore => {}
            CallbackAction::Month(month) => {
                out.deliver(Reply::Edit {
                    message_id,
                    text: calendar_text(month),
                    markup: Markup::Calendar(month),
                })
                .await;
            }
            CallbackAction::Date(date) => {
                let transition = self
                    .conversations
                    .apply(chat_id, Input::PickDate(date), today)
                    .await;
                if let Transition::DateSelected { date } = transition {
                    out.deliver(Reply::Edit {
                        message_id,
                        text: format::date_selected(date),
                        markup: Markup::None,
                    })
                    .await;
                    out.deliver(Reply::plain(format::PROMPT_ORIGIN, self.stations()))
                        .await;
                } else {
                    self.render(transition, today, out).await;
                }
            }
            CallbackAction::MainMenu => {
                let transition = self
                    .conversations
                    .apply(chat_id, Input::MainMenu, today)
                    .await;
                self.render(transition, today, out).await;
            }
        }
    }

    async fn on_button(
        &self,
        chat_id: i64,
        button: MenuButton,
        today: NaiveDate,
        out: &mut impl Outbox,
    ) {
        let input = match button {
            MenuButton::SearchTrains => Input::StartSearch,
            MenuButton::SearchByDate => Input::StartDatedSearch,
            MenuButton::BackToMainMenu => Input::MainMenu,
            MenuButton::ViewStations => {
                let listing = format::station_listing(self.search.directory());
                out.deliver(Reply::markdown(listing, Markup::BackToMenu))
                    .await;
                return;
            }
            MenuButton::ChangeLanguage => {
                out.deliver(Reply::markdown(format::CHANGE_LANGUAGE, Markup::Languages))
                    .await;
                return;
            }
            MenuButton::Help => {
                out.deliver(Reply::markdown(format::HELP, Markup::BackToMenu))
                    .await;
                return;
            }
            MenuButton::Language(language) => {
                info!(chat_id, %language, "provider language changed");
                self.search.set_language(language).await;
                out.deliver(Reply::markdown(
                    format::language_changed(language),
                    Markup::InlineBack,
                ))
                .await;
                return;
            }
        };

        let transition = self.conversations.apply(chat_id, input, today).await;
        self.render(transition, today, out).await;
    }

    async fn render(&self, transition: Transition, today: NaiveDate, out: &mut impl Outbox) {
        let reply = match transition {
            Transition::PromptOrigin { .. } => {
                Reply::markdown(format::PROMPT_ORIGIN_TODAY, self.stations())
            }
            Transition::PromptDate => {
                let month = CalendarMonth::containing(today);
                Reply::plain(calendar_text(month), Markup::Calendar(month))
            }
            Transition::DateSelected { date } => Reply::plain(
                format!("{}\n\n{}", format::date_selected(date), format::PROMPT_ORIGIN),
                self.stations(),
            ),
            Transition::DateInPast => Reply::plain(format::DATE_IN_PAST, Markup::None),
            Transition::PromptDestination { origin } => {
                Reply::markdown(format::prompt_destination(&origin), self.stations())
            }
            Transition::EmptyStation => Reply::plain(format::EMPTY_STATION, Markup::None),
            Transition::SameStation => Reply::plain(format::SAME_STATION, Markup::None),
            Transition::MainMenu => Reply::markdown(format::WELCOME, Markup::MainMenu),
            Transition::Unrecognized => Reply::markdown(format::UNRECOGNIZED, Markup::MainMenu),
            Transition::Search(pending) => {
                out.deliver(Reply::markdown(
                    format::search_confirmation(&pending.origin, &pending.destination, pending.date),
                    Markup::None,
                ))
                .await;
                self.run_pending(pending, out).await;
                return;
            }
            Transition::QuickSearch(pending) => {
                self.run_pending(pending, out).await;
                return;
            }
        };
        out.deliver(reply).await;
    }

    async fn run_pending(&self, pending: PendingSearch, out: &mut impl Outbox) {
        self.run_search(
            &pending.origin,
            &pending.destination,
            pending.date,
            SearchMode::Guided,
            out,
        )
        .await;
    }

    async fn run_search(
        &self,
        origin: &str,
        destination: &str,
        date: NaiveDate,
        mode: SearchMode,
        out: &mut impl Outbox,
    ) {
        out.deliver(Reply::plain(
            format::searching_notice(origin, destination, date),
            Markup::None,
        ))
        .await;

        let query = self.search.query(origin, destination, date);
        let cancel = self.shutdown.child_token();
        let result = match mode {
            SearchMode::Guided => self.search.find_all(&query, &cancel).await,
            SearchMode::Command => self.search.find_available(&query, &cancel).await,
        };

        let offers = match result {
            Ok(offers) => offers,
            Err(err) => {
                let kind = err.kind();
                error!(
                    origin = query.origin(),
                    destination = query.destination(),
                    %date,
                    ?kind,
                    error = %err,
                    "train search failed"
                );
                out.deliver(Reply::plain(format::failure_message(kind), mode.menu()))
                    .await;
                return;
            }
        };

        if offers.is_empty() {
            out.deliver(Reply::markdown(
                format::no_trains(origin, destination, date, mode.hint()),
                mode.menu(),
            ))
            .await;
            return;
        }

        let parts = split_message(&format::format_results(&offers), TELEGRAM_MESSAGE_LIMIT);
        let last = parts.len() - 1;
        for (i, part) in parts.into_iter().enumerate() {
            if i > 0 {
                out.deliver(Reply::Pause(PART_PAUSE)).await;
            }
            let markup = if i == last { mode.menu() } else { Markup::None };
            out.deliver(Reply::markdown(part, markup)).await;
        }
    }

    fn stations(&self) -> Markup {
        Markup::Stations(self.station_names.clone())
    }
}

#[cfg(test)]
#[path = "dialog_tests.rs"]
mod tests;
