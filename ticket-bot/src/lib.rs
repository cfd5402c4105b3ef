//! Telegram bot for finding train tickets on the Uzbek national railway.
//!
//! Users pick a route through menus, a date picker or one-line commands;
//! the bot searches the railway's e-ticket API and replies with trains,
//! seat classes and fares.

pub mod bot;
pub mod config;
pub mod conversation;
pub mod domain;
pub mod railway;
pub mod search;
pub mod stations;
