//! Station name resolution.

use std::collections::HashMap;

use super::StationRecord;
use super::data::STATIONS;

/// Immutable lookup from station spellings to provider codes.
///
/// Built once at startup and shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct StationDirectory {
    records: &'static [StationRecord],
    by_spelling: HashMap<String, usize>,
}

impl StationDirectory {
    /// Directory of the Uzbek railway network.
    pub fn uzbekistan() -> Self {
        Self::from_records(STATIONS)
    }

    fn from_records(records: &'static [StationRecord]) -> Self {
        let mut by_spelling = HashMap::new();
        for (idx, record) in records.iter().enumerate() {
            for spelling in record.spellings() {
                // First record wins if two stations ever share a spelling.
                by_spelling.entry(normalise(spelling)).or_insert(idx);
            }
        }
        Self {
            records,
            by_spelling,
        }
    }

    /// Resolve user input to a provider station code.
    ///
    /// Empty input and input starting with a digit are assumed to already be
    /// codes and come back unchanged. Otherwise the trimmed, lowercased input
    /// is matched exactly against known spellings; unknown names also come
    /// back unchanged, leaving the provider to reject them.
    ///
    /// ```
    /// use ticket_bot::stations::StationDirectory;
    ///
    /// let stations = StationDirectory::uzbekistan();
    /// assert_eq!(stations.resolve("  TOSHKENT "), "2900000");
    /// assert_eq!(stations.resolve("9999999"), "9999999");
    /// assert_eq!(stations.resolve("Nowhereville"), "Nowhereville");
    /// ```
    pub fn resolve(&self, token: &str) -> String {
        if token.is_empty() || token.starts_with(|c: char| c.is_ascii_digit()) {
            return token.to_string();
        }
        match self.lookup(token) {
            Some(record) => record.code.to_string(),
            None => token.to_string(),
        }
    }

    /// All stations, in table order.
    pub fn all(&self) -> &[StationRecord] {
        self.records
    }

    /// Stations flagged as major stops.
    pub fn major(&self) -> impl Iterator<Item = &StationRecord> {
        self.records.iter().filter(|r| r.is_major)
    }

    /// Stations in a region, compared case-insensitively.
    pub fn by_region<'a>(&'a self, region: &str) -> impl Iterator<Item = &'a StationRecord> {
        let region = normalise(region);
        self.records
            .iter()
            .filter(move |r| r.region.to_lowercase() == region)
    }

    /// Look up a station by its provider code.
    pub fn by_code(&self, code: &str) -> Option<&StationRecord> {
        self.records.iter().find(|r| r.code == code)
    }

    /// Look up a station by any of its spellings, case-insensitively.
    pub fn by_name(&self, name: &str) -> Option<&StationRecord> {
        self.lookup(name)
    }

    /// Canonical names containing `query`, case-insensitively.
    ///
    /// An empty query suggests every station.
    pub fn suggestions(&self, query: &str) -> Vec<&'static str> {
        let query = normalise(query);
        self.records
            .iter()
            .map(|r| r.name)
            .filter(|name| name.to_lowercase().contains(&query))
            .collect()
    }

    fn lookup(&self, token: &str) -> Option<&StationRecord> {
        self.by_spelling
            .get(&normalise(token))
            .and_then(|&idx| self.records.get(idx))
    }
}

impl Default for StationDirectory {
    fn default() -> Self {
        Self::uzbekistan()
    }
}

fn normalise(s: &str) -> String {
    s.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_names_and_aliases() {
        let stations = StationDirectory::uzbekistan();

        assert_eq!(stations.resolve("Tashkent"), "2900000");
        assert_eq!(stations.resolve("toshkent"), "2900000");
        assert_eq!(stations.resolve("  TOSHKENT "), "2900000");
        assert_eq!(stations.resolve("Samarkand"), "2900700");
        assert_eq!(stations.resolve("Qo'qon"), "2900880");
        assert_eq!(stations.resolve("kokand"), "2900880");
        assert_eq!(stations.resolve("Urganch"), "2900790");
    }

    #[test]
    fn codes_and_unknowns_pass_through() {
        let stations = StationDirectory::uzbekistan();

        assert_eq!(stations.resolve(""), "");
        assert_eq!(stations.resolve("9999999"), "9999999");
        assert_eq!(stations.resolve("2900000"), "2900000");
        assert_eq!(stations.resolve("Nowhereville"), "Nowhereville");
        // No fuzzy matching.
        assert_eq!(stations.resolve("Toshken"), "Toshken");
    }

    #[test]
    fn every_code_has_one_record() {
        let stations = StationDirectory::uzbekistan();
        let mut codes: Vec<_> = stations.all().iter().map(|r| r.code).collect();
        let total = codes.len();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), total);
        assert_eq!(total, 16);
    }

    #[test]
    fn filters() {
        let stations = StationDirectory::uzbekistan();

        assert_eq!(stations.major().count(), 14);
        assert!(stations.major().all(|r| r.name != "Pop"));

        let xorazm: Vec<_> = stations.by_region("XORAZM").map(|r| r.name).collect();
        assert_eq!(xorazm, vec!["Urgench", "Xiva"]);

        assert_eq!(stations.by_code("2900172").map(|r| r.name), Some("Xiva"));
        assert_eq!(stations.by_code("0"), None);
        assert_eq!(stations.by_name("Bukhara").map(|r| r.code), Some("2900800"));
    }

    #[test]
    fn suggestions_match_substrings() {
        let stations = StationDirectory::uzbekistan();

        assert_eq!(stations.suggestions("").len(), 16);
        assert_eq!(stations.suggestions("SAM"), vec!["Samarqand"]);
        assert_eq!(stations.suggestions("an"), vec!["Andijon", "Namangan", "Samarqand"]);
        assert!(stations.suggestions("zzz").is_empty());
    }
}
