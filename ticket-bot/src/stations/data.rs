//! Station table for the Uzbek railway network.

use super::StationRecord;

/// Every station the directory knows about, in alphabetical order.
pub(super) const STATIONS: &[StationRecord] = &[
    StationRecord {
        code: "2900680",
        name: "Andijon",
        english_name: "Andijan",
        aliases: &["andijan", "andizhan"],
        region: "Andijon",
        is_major: true,
    },
    StationRecord {
        code: "2900800",
        name: "Buxoro",
        english_name: "Bukhara",
        aliases: &["bukhara", "bokhara"],
        region: "Buxoro",
        is_major: true,
    },
    StationRecord {
        code: "2900850",
        name: "Guliston",
        english_name: "Gulistan",
        aliases: &["gulistan"],
        region: "Sirdaryo",
        is_major: false,
    },
    StationRecord {
        code: "2900720",
        name: "Jizzax",
        english_name: "Jizzakh",
        aliases: &["jizzakh", "djizak"],
        region: "Jizzax",
        is_major: true,
    },
    StationRecord {
        code: "2900920",
        name: "Margilon",
        english_name: "Margilan",
        aliases: &["margilan", "marghilan"],
        region: "Farg'ona",
        is_major: true,
    },
    StationRecord {
        code: "2900940",
        name: "Namangan",
        english_name: "Namangan",
        aliases: &[],
        region: "Namangan",
        is_major: true,
    },
    StationRecord {
        code: "2900930",
        name: "Navoiy",
        english_name: "Navoi",
        aliases: &["navoi"],
        region: "Navoiy",
        is_major: true,
    },
    StationRecord {
        code: "2900970",
        name: "Nukus",
        english_name: "Nukus",
        aliases: &[],
        region: "Qoraqalpog'iston",
        is_major: true,
    },
    StationRecord {
        code: "2900693",
        name: "Pop",
        english_name: "Pop",
        aliases: &[],
        region: "Namangan",
        is_major: false,
    },
    StationRecord {
        code: "2900750",
        name: "Qarshi",
        english_name: "Karshi",
        aliases: &["karshi"],
        region: "Qashqadaryo",
        is_major: true,
    },
    StationRecord {
        code: "2900880",
        name: "Qo'qon",
        english_name: "Kokand",
        aliases: &["kokand", "qoqon", "kokhand"],
        region: "Farg'ona",
        is_major: true,
    },
    StationRecord {
        code: "2900700",
        name: "Samarqand",
        english_name: "Samarkand",
        aliases: &["samarkand"],
        region: "Samarqand",
        is_major: true,
    },
    StationRecord {
        code: "2900255",
        name: "Termiz",
        english_name: "Termez",
        aliases: &["termez"],
        region: "Surxondaryo",
        is_major: true,
    },
    StationRecord {
        code: "2900000",
        name: "Toshkent",
        english_name: "Tashkent",
        aliases: &["tashkent"],
        region: "Toshkent",
        is_major: true,
    },
    StationRecord {
        code: "2900790",
        name: "Urgench",
        english_name: "Urgench",
        aliases: &["urganch"],
        region: "Xorazm",
        is_major: true,
    },
    StationRecord {
        code: "2900172",
        name: "Xiva",
        english_name: "Khiva",
        aliases: &["khiva"],
        region: "Xorazm",
        is_major: true,
    },
];
