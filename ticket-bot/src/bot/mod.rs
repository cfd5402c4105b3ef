//! Telegram front-end.
//!
//! `dialog` holds the chat logic and emits transport-neutral replies;
//! `telegram` and `handlers` adapt it to teloxide. Texts, keyboards, the
//! date picker and message splitting are plain functions.

mod calendar;
mod dialog;
mod format;
mod handlers;
mod keyboards;
mod split;
mod telegram;

pub use calendar::{CalendarMonth, CallbackAction, calendar_text};
pub use dialog::{Dialog, Markup, Outbox, PART_PAUSE, Reply, TextFormat};
pub use format::{StationHint, failure_message, format_offer, format_results};
pub use handlers::Command;
pub use keyboards::MenuButton;
pub use split::{TELEGRAM_MESSAGE_LIMIT, split_message, telegram_len};
pub use telegram::{BotDialog, BotError, TelegramOutbox, TicketBot};
