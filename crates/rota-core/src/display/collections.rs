//! Collection wrapper types for displaying groups of domain objects.
//!
//! This module provides wrapper types that format collections of domain objects
//! with consistent structure and empty collection handling.

use std::{fmt, ops::Index};

use crate::models::{Occurrence, PatternSummary, Trip};

/// Newtype wrapper for displaying collections of pattern summaries.
///
/// This provides clean Display formatting for pattern collections without
/// title handling, allowing consumers to handle titles separately. Handles
/// empty collections gracefully.
///
/// # Examples
///
/// ```rust
/// use jiff::civil::{date, time};
/// use jiff::Timestamp;
/// use rota_core::{
///     display::PatternSummaries,
///     models::{Frequency, PatternStatus, PatternSummary, TripCounts},
/// };
///
/// let summary = PatternSummary {
///     id: 1,
///     rider: "Alice".to_string(),
///     pickup: "Home".to_string(),
///     dropoff: "Clinic".to_string(),
///     frequency: Frequency::Daily,
///     start_date: date(2026, 3, 2),
///     end_date: None,
///     start_time: time(8, 30, 0, 0),
///     status: PatternStatus::Active,
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
///     trips: TripCounts::default(),
/// };
///
/// let summaries = PatternSummaries(vec![summary]);
/// let output = format!("{}", summaries);
/// assert!(output.contains("Alice"));
/// ```
pub struct PatternSummaries(pub Vec<PatternSummary>);

impl PatternSummaries {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of pattern summaries in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get a reference to the pattern summary at the given index.
    pub fn get(&self, index: usize) -> Option<&PatternSummary> {
        self.0.get(index)
    }

    /// Get an iterator over the pattern summaries.
    pub fn iter(&self) -> std::slice::Iter<'_, PatternSummary> {
        self.0.iter()
    }
}

impl Index<usize> for PatternSummaries {
    type Output = PatternSummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for PatternSummaries {
    type Item = PatternSummary;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PatternSummaries {
    type Item = &'a PatternSummary;
    type IntoIter = std::slice::Iter<'a, PatternSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for PatternSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No patterns found.")
        } else {
            for pattern in &self.0 {
                write!(f, "{}", pattern)?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying collections of trips.
///
/// This wrapper provides Display implementation for collections of trips
/// without requiring title formatting logic. It handles empty collections
/// gracefully and formats each trip using the existing Trip Display trait.
pub struct Trips(pub Vec<Trip>);

impl Trips {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of trips in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get a reference to the trip at the given index.
    pub fn get(&self, index: usize) -> Option<&Trip> {
        self.0.get(index)
    }

    /// Get an iterator over the trips.
    pub fn iter(&self) -> std::slice::Iter<'_, Trip> {
        self.0.iter()
    }
}

impl Index<usize> for Trips {
    type Output = Trip;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for Trips {
    type Item = Trip;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Trips {
    type Item = &'a Trip;
    type IntoIter = std::slice::Iter<'a, Trip>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Trips {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No trips found.")
        } else {
            for trip in &self.0 {
                write!(f, "{}", trip)?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying preview occurrences.
///
/// Previews are read-only: each line shows a pickup the pattern would
/// produce, without any trip having been created for it.
pub struct Occurrences(pub Vec<Occurrence>);

impl Occurrences {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of occurrences in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get a reference to the occurrence at the given index.
    pub fn get(&self, index: usize) -> Option<&Occurrence> {
        self.0.get(index)
    }

    /// Get an iterator over the occurrences.
    pub fn iter(&self) -> std::slice::Iter<'_, Occurrence> {
        self.0.iter()
    }
}

impl Index<usize> for Occurrences {
    type Output = Occurrence;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for Occurrences {
    type Item = Occurrence;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Occurrences {
    type Item = &'a Occurrence;
    type IntoIter = std::slice::Iter<'a, Occurrence>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Occurrences {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No upcoming occurrences.")
        } else {
            for occurrence in &self.0 {
                write!(f, "{}", occurrence)?;
            }
            Ok(())
        }
    }
}
