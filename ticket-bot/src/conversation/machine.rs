//! Guided search flow.
//!
//! The flow is: (optional date) → origin → destination → search. Each chat
//! has one `ConversationState`; inputs advance it and return a
//! `Transition` telling the chat layer what to say next. The machine never
//! does I/O.

use chrono::{Days, NaiveDate};

use crate::domain::parse_request_date;

/// Where a chat is in the guided flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    #[default]
    Idle,
    AwaitingDate,
    AwaitingOrigin,
    AwaitingDestination,
}

/// Per-chat progress through the guided flow.
///
/// No destination is kept: an accepted destination starts the search and
/// resets the state in the same step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationState {
    pub step: Step,
    pub origin: Option<String>,
    pub date: Option<NaiveDate>,
}

/// Something the user did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input<'a> {
    /// Guided search for today.
    StartSearch,
    /// Guided search starting with a date picker.
    StartDatedSearch,
    /// A day chosen on the date picker.
    PickDate(NaiveDate),
    /// Free text that is not a menu button.
    Text(&'a str),
    /// Back to the main menu.
    MainMenu,
}

/// A search the chat layer should run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSearch {
    /// Station tokens as the user typed them, not yet resolved.
    pub origin: String,
    pub destination: String,
    pub date: NaiveDate,
}

/// Outcome of applying an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Guided search started; ask for the origin.
    PromptOrigin { date: NaiveDate },
    /// Dated search started; show the date picker.
    PromptDate,
    /// A date was accepted; ask for the origin.
    DateSelected { date: NaiveDate },
    /// The picked date is before today; nothing changed.
    DateInPast,
    /// Origin stored; ask for the destination.
    PromptDestination { origin: String },
    /// Blank station input; nothing changed.
    EmptyStation,
    /// Destination equals origin; still waiting for a destination.
    SameStation,
    /// Guided flow finished; the state is back to idle.
    Search(PendingSearch),
    /// One-line `from to [date]` search typed while idle.
    QuickSearch(PendingSearch),
    /// State discarded; show the main menu.
    MainMenu,
    /// Text that means nothing in the current state.
    Unrecognized,
}

impl ConversationState {
    /// Advance the flow. `today` is the chat's current calendar date.
    pub fn apply(&mut self, input: Input<'_>, today: NaiveDate) -> Transition {
        match input {
            Input::StartSearch => {
                *self = Self {
                    step: Step::AwaitingOrigin,
                    date: Some(today),
                    ..Self::default()
                };
                Transition::PromptOrigin { date: today }
            }
            Input::StartDatedSearch => {
                *self = Self {
                    step: Step::AwaitingDate,
                    date: today.checked_add_days(Days::new(1)),
                    ..Self::default()
                };
                Transition::PromptDate
            }
            Input::PickDate(date) if date < today => Transition::DateInPast,
            Input::PickDate(date) => {
                self.date = Some(date);
                self.step = Step::AwaitingOrigin;
                Transition::DateSelected { date }
            }
            Input::MainMenu => {
                self.reset();
                Transition::MainMenu
            }
            Input::Text(text) => self.apply_text(text.trim(), today),
        }
    }

    /// Forget any in-progress selection.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn apply_text(&mut self, text: &str, today: NaiveDate) -> Transition {
        match self.step {
            Step::Idle => parse_quick_search(text, today)
                .map(Transition::QuickSearch)
                .unwrap_or(Transition::Unrecognized),
            Step::AwaitingDate => {
                self.reset();
                Transition::MainMenu
            }
            Step::AwaitingOrigin => {
                if text.is_empty() {
                    return Transition::EmptyStation;
                }
                self.origin = Some(text.to_string());
                self.step = Step::AwaitingDestination;
                Transition::PromptDestination {
                    origin: text.to_string(),
                }
            }
            Step::AwaitingDestination => {
                if text.is_empty() {
                    return Transition::EmptyStation;
                }
                if self.origin.as_deref() == Some(text) {
                    return Transition::SameStation;
                }

                let pending = PendingSearch {
                    origin: self.origin.take().unwrap_or_default(),
                    destination: text.to_string(),
                    date: self.date.unwrap_or(today),
                };
                self.reset();
                Transition::Search(pending)
            }
        }
    }
}

/// Parse `"<from> <to>"` or `"<from> <to> <YYYY-MM-DD>"`.
fn parse_quick_search(text: &str, today: NaiveDate) -> Option<PendingSearch> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    let (origin, destination, date) = match parts.as_slice() {
        [origin, destination] => (origin, destination, today),
        [origin, destination, date] => (origin, destination, parse_request_date(date)?),
        _ => return None,
    };
    Some(PendingSearch {
        origin: origin.to_string(),
        destination: destination.to_string(),
        date,
    })
}
