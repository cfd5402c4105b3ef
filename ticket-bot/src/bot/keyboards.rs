//! Reply and inline keyboards.

use teloxide::types::{
    InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup,
};

use super::calendar::{CalendarMonth, CallbackAction, WEEKDAY_LABELS};
use crate::domain::Language;

const STATIONS_PER_ROW: usize = 2;

/// Buttons of the persistent reply keyboards.
///
/// Telegram sends a reply-keyboard press as ordinary text, so these are
/// recognised by their exact label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuButton {
    SearchTrains,
    SearchByDate,
    ViewStations,
    ChangeLanguage,
    Help,
    BackToMainMenu,
    Language(Language),
}

impl MenuButton {
    const ALL: [MenuButton; 9] = [
        MenuButton::SearchTrains,
        MenuButton::SearchByDate,
        MenuButton::ViewStations,
        MenuButton::ChangeLanguage,
        MenuButton::Help,
        MenuButton::BackToMainMenu,
        MenuButton::Language(Language::Uzbek),
        MenuButton::Language(Language::Russian),
        MenuButton::Language(Language::English),
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuButton::SearchTrains => "🔍 Search Trains",
            MenuButton::SearchByDate => "📅 Search by Date",
            MenuButton::ViewStations => "🚉 View Stations",
            MenuButton::ChangeLanguage => "🌍 Change Language",
            MenuButton::Help => "❓ Help",
            MenuButton::BackToMainMenu => "🔙 Back to Main Menu",
            MenuButton::Language(Language::Uzbek) => "🇺🇿 O'zbekcha",
            MenuButton::Language(Language::Russian) => "🇷🇺 Русский",
            MenuButton::Language(Language::English) => "🇺🇸 English",
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        Self::ALL.into_iter().find(|b| b.label() == text)
    }

    fn button(self) -> KeyboardButton {
        KeyboardButton::new(self.label())
    }
}

pub fn main_menu() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        vec![MenuButton::SearchTrains.button(), MenuButton::SearchByDate.button()],
        vec![MenuButton::ViewStations.button(), MenuButton::ChangeLanguage.button()],
        vec![MenuButton::Help.button()],
    ])
    .resize_keyboard()
}

/// Station names two per row, then a back button.
pub fn station_keyboard(names: &[&str]) -> KeyboardMarkup {
    let mut rows: Vec<Vec<KeyboardButton>> = names
        .chunks(STATIONS_PER_ROW)
        .map(|row| row.iter().map(|name| KeyboardButton::new(*name)).collect())
        .collect();
    rows.push(vec![MenuButton::BackToMainMenu.button()]);
    KeyboardMarkup::new(rows).resize_keyboard()
}

pub fn back_to_menu() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![MenuButton::BackToMainMenu.button()]]).resize_keyboard()
}

pub fn language_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        vec![MenuButton::Language(Language::Uzbek).button()],
        vec![MenuButton::Language(Language::Russian).button()],
        vec![MenuButton::Language(Language::English).button()],
        vec![MenuButton::BackToMainMenu.button()],
    ])
    .resize_keyboard()
}

/// Single inline "back" button.
pub fn inline_back() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![back_button()]])
}

/// Month grid with weekday headers, navigation and a back button.
pub fn calendar_keyboard(month: CalendarMonth) -> InlineKeyboardMarkup {
    let mut rows = Vec::new();

    rows.push(
        WEEKDAY_LABELS
            .iter()
            .map(|label| InlineKeyboardButton::callback(*label, "header"))
            .collect::<Vec<_>>(),
    );

    for week in month.weeks() {
        rows.push(
            week.iter()
                .map(|cell| match cell.and_then(|day| Some((day, month.date(day)?))) {
                    Some((day, date)) => InlineKeyboardButton::callback(
                        day.to_string(),
                        CallbackAction::Date(date).encode(),
                    ),
                    None => InlineKeyboardButton::callback(" ", CallbackAction::Ignore.encode()),
                })
                .collect(),
        );
    }

    rows.push(vec![
        InlineKeyboardButton::callback("◀️", CallbackAction::Month(month.previous()).encode()),
        InlineKeyboardButton::callback("▶️", CallbackAction::Month(month.next()).encode()),
    ]);
    rows.push(vec![back_button()]);

    InlineKeyboardMarkup::new(rows)
}

fn back_button() -> InlineKeyboardButton {
    InlineKeyboardButton::callback(
        MenuButton::BackToMainMenu.label(),
        CallbackAction::MainMenu.encode(),
    )
}
