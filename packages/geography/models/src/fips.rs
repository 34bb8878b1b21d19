//! US state FIPS code utilities.
//!
//! One record table maps between two-digit FIPS codes, two-letter
//! abbreviations, and full state names for the 50 US states + DC. The
//! name lookup is what resolves spoken locations ("california",
//! "new york") in highlight commands.

/// One state's identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateRecord {
    /// Two-digit FIPS code.
    pub fips: &'static str,
    /// Two-letter postal abbreviation.
    pub abbr: &'static str,
    /// Full state name.
    pub name: &'static str,
}

/// The 50 US states + DC, in FIPS order.
pub const STATES: &[StateRecord] = &[
    StateRecord { fips: "01", abbr: "AL", name: "Alabama" },
    StateRecord { fips: "02", abbr: "AK", name: "Alaska" },
    StateRecord { fips: "04", abbr: "AZ", name: "Arizona" },
    StateRecord { fips: "05", abbr: "AR", name: "Arkansas" },
    StateRecord { fips: "06", abbr: "CA", name: "California" },
    StateRecord { fips: "08", abbr: "CO", name: "Colorado" },
    StateRecord { fips: "09", abbr: "CT", name: "Connecticut" },
    StateRecord { fips: "10", abbr: "DE", name: "Delaware" },
    StateRecord { fips: "11", abbr: "DC", name: "District of Columbia" },
    StateRecord { fips: "12", abbr: "FL", name: "Florida" },
    StateRecord { fips: "13", abbr: "GA", name: "Georgia" },
    StateRecord { fips: "15", abbr: "HI", name: "Hawaii" },
    StateRecord { fips: "16", abbr: "ID", name: "Idaho" },
    StateRecord { fips: "17", abbr: "IL", name: "Illinois" },
    StateRecord { fips: "18", abbr: "IN", name: "Indiana" },
    StateRecord { fips: "19", abbr: "IA", name: "Iowa" },
    StateRecord { fips: "20", abbr: "KS", name: "Kansas" },
    StateRecord { fips: "21", abbr: "KY", name: "Kentucky" },
    StateRecord { fips: "22", abbr: "LA", name: "Louisiana" },
    StateRecord { fips: "23", abbr: "ME", name: "Maine" },
    StateRecord { fips: "24", abbr: "MD", name: "Maryland" },
    StateRecord { fips: "25", abbr: "MA", name: "Massachusetts" },
    StateRecord { fips: "26", abbr: "MI", name: "Michigan" },
    StateRecord { fips: "27", abbr: "MN", name: "Minnesota" },
    StateRecord { fips: "28", abbr: "MS", name: "Mississippi" },
    StateRecord { fips: "29", abbr: "MO", name: "Missouri" },
    StateRecord { fips: "30", abbr: "MT", name: "Montana" },
    StateRecord { fips: "31", abbr: "NE", name: "Nebraska" },
    StateRecord { fips: "32", abbr: "NV", name: "Nevada" },
    StateRecord { fips: "33", abbr: "NH", name: "New Hampshire" },
    StateRecord { fips: "34", abbr: "NJ", name: "New Jersey" },
    StateRecord { fips: "35", abbr: "NM", name: "New Mexico" },
    StateRecord { fips: "36", abbr: "NY", name: "New York" },
    StateRecord { fips: "37", abbr: "NC", name: "North Carolina" },
    StateRecord { fips: "38", abbr: "ND", name: "North Dakota" },
    StateRecord { fips: "39", abbr: "OH", name: "Ohio" },
    StateRecord { fips: "40", abbr: "OK", name: "Oklahoma" },
    StateRecord { fips: "41", abbr: "OR", name: "Oregon" },
    StateRecord { fips: "42", abbr: "PA", name: "Pennsylvania" },
    StateRecord { fips: "44", abbr: "RI", name: "Rhode Island" },
    StateRecord { fips: "45", abbr: "SC", name: "South Carolina" },
    StateRecord { fips: "46", abbr: "SD", name: "South Dakota" },
    StateRecord { fips: "47", abbr: "TN", name: "Tennessee" },
    StateRecord { fips: "48", abbr: "TX", name: "Texas" },
    StateRecord { fips: "49", abbr: "UT", name: "Utah" },
    StateRecord { fips: "50", abbr: "VT", name: "Vermont" },
    StateRecord { fips: "51", abbr: "VA", name: "Virginia" },
    StateRecord { fips: "53", abbr: "WA", name: "Washington" },
    StateRecord { fips: "54", abbr: "WV", name: "West Virginia" },
    StateRecord { fips: "55", abbr: "WI", name: "Wisconsin" },
    StateRecord { fips: "56", abbr: "WY", name: "Wyoming" },
];

/// Maps a two-digit FIPS code to the two-letter abbreviation.
///
/// Returns `"??"` for unrecognized codes.
#[must_use]
pub fn state_abbr(fips: &str) -> &'static str {
    STATES
        .iter()
        .find(|record| record.fips == fips)
        .map_or("??", |record| record.abbr)
}

/// Maps a two-digit FIPS code to the full state name.
///
/// Returns `"Unknown"` for unrecognized codes.
#[must_use]
pub fn state_name(fips: &str) -> &'static str {
    STATES
        .iter()
        .find(|record| record.fips == fips)
        .map_or("Unknown", |record| record.name)
}

/// Maps a two-letter abbreviation to the FIPS code.
#[must_use]
pub fn abbr_to_fips(abbr: &str) -> Option<&'static str> {
    let upper = abbr.to_uppercase();
    STATES
        .iter()
        .find(|record| record.abbr == upper)
        .map(|record| record.fips)
}

/// Resolves a spoken state name (or abbreviation) to its FIPS code.
///
/// Matching is case-insensitive on the full name; two-letter inputs are
/// also tried as abbreviations. Returns `None` for anything else.
#[must_use]
pub fn name_to_fips(name: &str) -> Option<&'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return None;
    }

    let lower = trimmed.to_lowercase();
    if let Some(record) = STATES
        .iter()
        .find(|record| record.name.to_lowercase() == lower)
    {
        return Some(record.fips);
    }

    if trimmed.len() == 2 {
        return abbr_to_fips(trimmed);
    }

    None
}
