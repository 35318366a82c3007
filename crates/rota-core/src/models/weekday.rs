//! Canonical weekday-set type used by weekly recurrence rules.
//!
//! Weekday selections arrive in several shapes at the edges (CLI day lists,
//! database text columns, JSON arrays). All of them convert into this one
//! bitmask type at the model boundary so the engine only ever sees a
//! [`WeekdaySet`].

use std::fmt;
use std::str::FromStr;

use jiff::civil::Weekday;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Monday-first ordering used for iteration and display.
const ALL_DAYS: [Weekday; 7] = [
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
    Weekday::Sunday,
];

/// A set of weekdays stored as a bitmask (bit 0 is Monday, bit 6 is Sunday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    /// The empty set.
    pub const EMPTY: WeekdaySet = WeekdaySet(0);

    /// Saturday and Sunday.
    pub const WEEKEND: WeekdaySet = WeekdaySet(0b0110_0000);

    /// Build a set from any iterator of weekdays.
    pub fn from_days<I>(days: I) -> Self
    where
        I: IntoIterator<Item = Weekday>,
    {
        let mut set = Self::EMPTY;
        for day in days {
            set.insert(day);
        }
        set
    }

    /// Add a weekday to the set.
    pub fn insert(&mut self, day: Weekday) {
        self.0 |= Self::bit(day);
    }

    /// Whether the set contains the given weekday.
    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & Self::bit(day) != 0
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Number of weekdays in the set.
    pub fn len(&self) -> u32 {
        self.0.count_ones()
    }

    /// Iterate the contained weekdays in Monday-first order.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        ALL_DAYS.into_iter().filter(|day| self.contains(*day))
    }

    fn bit(day: Weekday) -> u8 {
        1 << (day.to_monday_zero_offset() as u32)
    }
}

fn day_code(day: Weekday) -> &'static str {
    match day {
        Weekday::Monday => "mon",
        Weekday::Tuesday => "tue",
        Weekday::Wednesday => "wed",
        Weekday::Thursday => "thu",
        Weekday::Friday => "fri",
        Weekday::Saturday => "sat",
        Weekday::Sunday => "sun",
    }
}

impl fmt::Display for WeekdaySet {
    /// Formats as a comma-separated list of three-letter day codes, e.g.
    /// `mon,wed,fri`. The empty set formats as an empty string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for day in self.iter() {
            if !first {
                write!(f, ",")?;
            }
            write!(f, "{}", day_code(day))?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for WeekdaySet {
    type Err = String;

    /// Parses a comma-separated day list. Both three-letter codes and full
    /// names are accepted, case-insensitively: `mon,wed` or
    /// `Monday,Wednesday`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut set = Self::EMPTY;
        for part in s.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let day = match part.to_lowercase().as_str() {
                "mon" | "monday" => Weekday::Monday,
                "tue" | "tuesday" => Weekday::Tuesday,
                "wed" | "wednesday" => Weekday::Wednesday,
                "thu" | "thursday" => Weekday::Thursday,
                "fri" | "friday" => Weekday::Friday,
                "sat" | "saturday" => Weekday::Saturday,
                "sun" | "sunday" => Weekday::Sunday,
                _ => return Err(format!("Invalid weekday: {part}")),
            };
            set.insert(day);
        }
        Ok(set)
    }
}

impl Serialize for WeekdaySet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WeekdaySet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
