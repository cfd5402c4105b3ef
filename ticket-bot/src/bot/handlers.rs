//! Telegram update handlers.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use teloxide::prelude::*;
use teloxide::types::CallbackQuery;
use teloxide::utils::command::BotCommands;
use tracing::{debug, warn};

use super::dialog::{Markup, Outbox, Reply};
use super::format;
use super::telegram::{BotDialog, TelegramOutbox};

/// Bot commands that can be invoked with /.
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "snake_case", description = "Available commands:")]
pub enum Command {
    #[command(description = "Show the main menu")]
    Start,

    #[command(description = "How to use the bot")]
    Help,

    #[command(description = "List known stations")]
    Stations,

    #[command(description = "Search today's trains: /search <from> <to>")]
    Search(String),

    #[command(description = "Search trains on a date: /search_date <from> <to> <YYYY-MM-DD>")]
    SearchDate(String),
}

/// Calendar date for the bot's time zone.
fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    dialog: Arc<BotDialog>,
) -> ResponseResult<()> {
    let mut out = TelegramOutbox::new(bot, msg.chat.id);
    dialog.on_command(msg.chat.id.0, cmd, today(), &mut out).await;
    Ok(())
}

pub async fn handle_unknown_command(bot: Bot, msg: Message) -> ResponseResult<()> {
    debug!(chat_id = %msg.chat.id, text = ?msg.text(), "unknown command");
    let mut out = TelegramOutbox::new(bot, msg.chat.id);
    out.deliver(Reply::plain(format::UNKNOWN_COMMAND, Markup::None))
        .await;
    Ok(())
}

pub async fn handle_text(bot: Bot, msg: Message, dialog: Arc<BotDialog>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        debug!(chat_id = %msg.chat.id, "ignoring non-text message");
        return Ok(());
    };
    let mut out = TelegramOutbox::new(bot, msg.chat.id);
    dialog.on_text(msg.chat.id.0, text, today(), &mut out).await;
    Ok(())
}

pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    dialog: Arc<BotDialog>,
) -> ResponseResult<()> {
    // Stop the button's loading spinner whatever happens next.
    if let Err(e) = bot.answer_callback_query(q.id.clone()).await {
        warn!(error = %e, "failed to answer callback query");
    }

    let (Some(data), Some(message)) = (q.data.as_deref(), q.message.as_ref()) else {
        debug!(query_id = %q.id, "callback without data or message");
        return Ok(());
    };

    let chat_id = message.chat().id;
    let mut out = TelegramOutbox::new(bot, chat_id);
    dialog
        .on_callback(chat_id.0, message.id().0, data, today(), &mut out)
        .await;
    Ok(())
}
