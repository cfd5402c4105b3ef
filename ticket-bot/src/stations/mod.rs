//! Station directory.
//!
//! Maps station names and aliases to the provider's numeric station codes.
//! The table is compiled in; nothing here performs I/O.

mod data;
mod directory;

pub use directory::StationDirectory;

/// A station known to the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationRecord {
    /// Provider station code (e.g. "2900000").
    pub code: &'static str,
    /// Canonical (Uzbek) name, shown on keyboards and listings.
    pub name: &'static str,
    /// English name, also accepted as input.
    pub english_name: &'static str,
    /// Extra lowercase spellings accepted as input.
    pub aliases: &'static [&'static str],
    /// Region (viloyat) the station belongs to.
    pub region: &'static str,
    /// Whether the station is a major stop.
    pub is_major: bool,
}

impl StationRecord {
    /// All spellings this station answers to, not yet normalised.
    pub fn spellings(&self) -> impl Iterator<Item = &'static str> {
        [self.name, self.english_name]
            .into_iter()
            .chain(self.aliases.iter().copied())
    }
}
