//! Per-chat conversation state.
//!
//! `machine` is the pure state machine for the guided search flow; `store`
//! keeps one state per chat in a bounded cache.

mod machine;
mod store;

pub use machine::{ConversationState, Input, PendingSearch, Step, Transition};
pub use store::{ConversationStore, ConversationStoreConfig};
