//! Provider response languages.

use std::fmt;
use std::str::FromStr;

/// Error returned when parsing an unsupported language code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language code: {0:?} (expected uz, ru or en)")]
pub struct UnknownLanguage(String);

/// Language sent to the provider in `Accept-Language`.
///
/// Station and brand names in search results come back in this language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    Uzbek,
    Russian,
    English,
}

impl Language {
    /// Two-letter code used on the wire.
    pub fn code(self) -> &'static str {
        match self {
            Language::Uzbek => "uz",
            Language::Russian => "ru",
            Language::English => "en",
        }
    }
}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uz" => Ok(Language::Uzbek),
            "ru" => Ok(Language::Russian),
            "en" => Ok(Language::English),
            _ => Err(UnknownLanguage(s.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
