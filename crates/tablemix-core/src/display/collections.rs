//! Collection wrapper types for displaying groups of domain objects.
//!
//! Each wrapper formats its items one after another and prints a single
//! "No ... found." line for an empty collection.

use std::{fmt, ops::Index};

use super::datetime::LocalDate;
use crate::models::{Event, Gender, Participant, RoundRecord};

macro_rules! collection_wrapper {
    ($wrapper:ident, $item:ty) => {
        impl $wrapper {
            /// Check if the collection is empty.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Get the number of items in the collection.
            pub fn len(&self) -> usize {
                self.0.len()
            }

            /// Get an iterator over the items.
            pub fn iter(&self) -> std::slice::Iter<'_, $item> {
                self.0.iter()
            }
        }

        impl Index<usize> for $wrapper {
            type Output = $item;

            fn index(&self, index: usize) -> &Self::Output {
                &self.0[index]
            }
        }

        impl IntoIterator for $wrapper {
            type Item = $item;
            type IntoIter = std::vec::IntoIter<Self::Item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.into_iter()
            }
        }

        impl<'a> IntoIterator for &'a $wrapper {
            type Item = &'a $item;
            type IntoIter = std::slice::Iter<'a, $item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.iter()
            }
        }
    };
}

/// Newtype wrapper for displaying an event roster.
///
/// # Examples
///
/// ```rust
/// use tablemix_core::{
///     display::ParticipantList,
///     models::{Gender, Participant, Personality},
/// };
///
/// let roster = ParticipantList(vec![
///     Participant::new("ana", Gender::Female, Personality::Introvert),
///     Participant::new("ben", Gender::Male, Personality::Extrovert),
/// ]);
/// let output = roster.to_string();
/// assert!(output.contains("**ana**"));
/// assert!(output.contains("1 male, 1 female"));
/// ```
pub struct ParticipantList(pub Vec<Participant>);

collection_wrapper!(ParticipantList, Participant);

impl fmt::Display for ParticipantList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No participants found.");
        }

        let males = self
            .0
            .iter()
            .filter(|p| p.gender == Gender::Male)
            .count();
        writeln!(
            f,
            "{} participants ({} male, {} female)",
            self.0.len(),
            males,
            self.0.len() - males
        )?;
        writeln!(f)?;
        for participant in &self.0 {
            write!(f, "{participant}")?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying a list of events.
pub struct EventList(pub Vec<Event>);

collection_wrapper!(EventList, Event);

impl fmt::Display for EventList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No events found.");
        }
        for event in &self.0 {
            writeln!(f, "## {} (ID: {})", event.name, event.id)?;
            writeln!(f)?;
            writeln!(f, "- **Sizing**: {}", event.group_sizing)?;
            if let Some(constraints) = &event.gender_constraints {
                writeln!(
                    f,
                    "- **Constraints**: {}",
                    super::models::constraint_list(constraints)
                )?;
            }
            writeln!(f, "- **Created**: {}", LocalDate(&event.created_at))?;
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying the stored rounds of an event.
pub struct RoundList(pub Vec<RoundRecord>);

collection_wrapper!(RoundList, RoundRecord);

impl fmt::Display for RoundList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No rounds found.");
        }
        for record in &self.0 {
            let state = if record.committed { "committed" } else { "draft" };
            let summary = &record.result.summary;
            writeln!(
                f,
                "- **Round {}** ({state}): {} tables, {} new meetings, created {}",
                record.round,
                summary.total_groups,
                summary.new_meetings_count,
                LocalDate(&record.created_at)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::models::{GroupSizing, GroupingResult, GroupingSummary, Personality};

    fn ts() -> Timestamp {
        Timestamp::from_second(1641038400).unwrap()
    }

    fn record(round: u32, committed: bool) -> RoundRecord {
        RoundRecord {
            event_id: 1,
            round,
            result: GroupingResult {
                round,
                groups: vec![],
                summary: GroupingSummary {
                    total_groups: 3,
                    avg_group_size: 4.0,
                    gender_balance_score: 100,
                    mbti_balance_score: 100,
                    new_meetings_count: 18,
                },
                seed: 1,
                constraints_applied: false,
            },
            committed,
            created_at: ts(),
            committed_at: None,
        }
    }

    #[test]
    fn test_empty_collections() {
        assert_eq!(ParticipantList(vec![]).to_string(), "No participants found.\n");
        assert_eq!(EventList(vec![]).to_string(), "No events found.\n");
        assert_eq!(RoundList(vec![]).to_string(), "No rounds found.\n");
    }

    #[test]
    fn test_participant_list_counts() {
        let list = ParticipantList(vec![
            Participant::new("a", Gender::Male, Personality::Extrovert),
            Participant::new("b", Gender::Male, Personality::Extrovert),
            Participant::new("c", Gender::Female, Personality::Introvert),
        ]);
        assert_eq!(list.len(), 3);
        assert_eq!(list[2].id, "c");
        let output = list.to_string();
        assert!(output.starts_with("3 participants (2 male, 1 female)"));
        assert_eq!(output.matches("- **").count(), 3);
    }

    #[test]
    fn test_event_list() {
        let list = EventList(vec![Event {
            id: 4,
            name: "Book club".to_string(),
            group_sizing: GroupSizing::Manual(vec![3, 3]),
            gender_constraints: None,
            created_at: ts(),
            updated_at: ts(),
        }]);
        let output = list.to_string();
        assert!(output.contains("## Book club (ID: 4)"));
        assert!(output.contains("manual [3, 3]"));
        assert!(!output.contains("Constraints"));
    }

    #[test]
    fn test_round_list_states() {
        let output = RoundList(vec![record(1, true), record(2, false)]).to_string();
        assert!(output.contains("**Round 1** (committed): 3 tables, 18 new meetings"));
        assert!(output.contains("**Round 2** (draft)"));
    }
}
