//! Telegram transport: dispatcher wiring and reply delivery.

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, ChatId, MessageId, ParseMode, ReplyMarkup};
use teloxide::utils::command::BotCommands;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::dialog::{Dialog, Markup, Outbox, Reply, TextFormat};
use super::handlers::{
    Command, handle_callback, handle_command, handle_text, handle_unknown_command,
};
use super::keyboards;
use crate::railway::TicketClient;

/// The dialog as wired to the real provider.
pub type BotDialog = Dialog<TicketClient>;

/// Errors that stop the bot from starting.
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("Telegram bot token is empty")]
    NoToken,
}

/// Long-polling Telegram bot.
pub struct TicketBot {
    bot: Bot,
    dialog: Arc<BotDialog>,
    shutdown: CancellationToken,
}

impl TicketBot {
    /// `shutdown` is cancelled when the bot stops, and stops it when
    /// cancelled from outside.
    pub fn new(
        token: &str,
        dialog: Arc<BotDialog>,
        shutdown: CancellationToken,
    ) -> Result<Self, BotError> {
        if token.trim().is_empty() {
            return Err(BotError::NoToken);
        }
        Ok(Self {
            bot: Bot::new(token),
            dialog,
            shutdown,
        })
    }

    /// Poll for updates until Ctrl-C, SIGTERM or `shutdown` is cancelled.
    pub async fn run(self) {
        if let Err(e) = self.bot.set_my_commands(Command::bot_commands()).await {
            warn!(error = %e, "failed to register bot commands");
        }

        let dialog_for_callbacks = Arc::clone(&self.dialog);
        let dialog_for_commands = Arc::clone(&self.dialog);
        let dialog_for_text = Arc::clone(&self.dialog);

        let handler = dptree::entry()
            .branch(Update::filter_callback_query().endpoint(
                move |bot: Bot, q: CallbackQuery| {
                    let dialog = Arc::clone(&dialog_for_callbacks);
                    async move { handle_callback(bot, q, dialog).await }
                },
            ))
            .branch(
                Update::filter_message()
                    .filter_command::<Command>()
                    .endpoint(move |bot: Bot, msg: Message, cmd: Command| {
                        let dialog = Arc::clone(&dialog_for_commands);
                        async move { handle_command(bot, msg, cmd, dialog).await }
                    }),
            )
            .branch(
                Update::filter_message()
                    .filter(|msg: Message| msg.text().is_some_and(|t| t.starts_with('/')))
                    .endpoint(handle_unknown_command),
            )
            .branch(Update::filter_message().endpoint(move |bot: Bot, msg: Message| {
                let dialog = Arc::clone(&dialog_for_text);
                async move { handle_text(bot, msg, dialog).await }
            }));

        let mut dispatcher = Dispatcher::builder(self.bot, handler)
            .default_handler(|upd| async move {
                debug!(update_id = ?upd.id, "unhandled update");
            })
            .build();

        let dispatcher_token = dispatcher.shutdown_token();
        let shutdown = self.shutdown.clone();
        tokio::spawn(async move {
            wait_for_stop(&shutdown).await;
            // Abort running searches first so their handlers can finish.
            shutdown.cancel();
            match dispatcher_token.shutdown() {
                Ok(drained) => drained.await,
                Err(e) => debug!(error = %e, "dispatcher was not running"),
            }
        });

        info!("bot is running");
        dispatcher.dispatch().await;
        self.shutdown.cancel();
        info!("bot stopped");
    }
}

async fn wait_for_stop(shutdown: &CancellationToken) {
    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl-C, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
        _ = shutdown.cancelled() => info!("shutdown requested"),
    }
}

/// Delivers replies to one chat.
///
/// A Markdown reply Telegram refuses to parse (user text with stray `*` or
/// `_`) is resent as plain text. Other failures are logged and dropped.
pub struct TelegramOutbox {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramOutbox {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id }
    }

    async fn send(&self, text: String, format: TextFormat, markup: Markup) {
        let markup = reply_markup(markup);

        if format == TextFormat::Markdown {
            let mut request = self
                .bot
                .send_message(self.chat_id, text.clone())
                .parse_mode(ParseMode::Markdown);
            if let Some(markup) = markup.clone() {
                request = request.reply_markup(markup);
            }
            match request.await {
                Ok(_) => return,
                Err(e) => {
                    warn!(chat_id = %self.chat_id, error = %e, "markdown send failed, retrying as plain text");
                }
            }
        }

        let mut request = self.bot.send_message(self.chat_id, text);
        if let Some(markup) = markup {
            request = request.reply_markup(markup);
        }
        if let Err(e) = request.await {
            warn!(chat_id = %self.chat_id, error = %e, "failed to send message");
        }
    }

    async fn edit(&self, message_id: i32, text: String, markup: Markup) {
        let mut request = self
            .bot
            .edit_message_text(self.chat_id, MessageId(message_id), text);
        // Edits can only carry inline keyboards.
        match markup {
            Markup::Calendar(month) => {
                request = request.reply_markup(keyboards::calendar_keyboard(month));
            }
            Markup::InlineBack => request = request.reply_markup(keyboards::inline_back()),
            _ => {}
        }
        if let Err(e) = request.await {
            warn!(chat_id = %self.chat_id, message_id, error = %e, "failed to edit message");
        }
    }
}

impl Outbox for TelegramOutbox {
    async fn deliver(&mut self, reply: Reply) {
        match reply {
            Reply::Send {
                text,
                format,
                markup,
            } => self.send(text, format, markup).await,
            Reply::Edit {
                message_id,
                text,
                markup,
            } => self.edit(message_id, text, markup).await,
            Reply::Pause(duration) => tokio::time::sleep(duration).await,
        }
    }
}

fn reply_markup(markup: Markup) -> Option<ReplyMarkup> {
    let markup = match markup {
        Markup::None => return None,
        Markup::MainMenu => keyboards::main_menu().into(),
        Markup::Stations(names) => keyboards::station_keyboard(&names).into(),
        Markup::BackToMenu => keyboards::back_to_menu().into(),
        Markup::Languages => keyboards::language_keyboard().into(),
        Markup::InlineBack => keyboards::inline_back().into(),
        Markup::Calendar(month) => keyboards::calendar_keyboard(month).into(),
    };
    Some(markup)
}
