//! Display implementations for domain models.
//!
//! All output is markdown so the CLI renderer can style it; plain-text
//! consumers get readable text as well.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::{
    analysis::FeasibilityRating,
    models::{
        Event, Gender, GenderConstraint, GroupAssignment, GroupSizing, GroupingResult,
        Participant, Personality,
    },
};

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Personality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for GroupSizing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupSizing::Uniform(size) => write!(f, "groups of {size}"),
            GroupSizing::Manual(sizes) => {
                let sizes: Vec<String> = sizes.iter().map(u32::to_string).collect();
                write!(f, "manual [{}]", sizes.join(", "))
            }
        }
    }
}

impl fmt::Display for GenderConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}M/{}F", self.male_count, self.female_count)
    }
}

impl fmt::Display for FeasibilityRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            FeasibilityRating::Ample => "ample (3+ rounds)",
            FeasibilityRating::Limited => "limited (1-2 rounds)",
            FeasibilityRating::Infeasible => "infeasible (less than 1 round)",
        };
        write!(f, "{text}")
    }
}

/// Joins constraints as `2M/2F, 3M/1F`.
pub(crate) fn constraint_list(constraints: &[GenderConstraint]) -> String {
    constraints
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.name)?;
        writeln!(f)?;
        writeln!(f, "- Group sizing: {}", self.group_sizing)?;
        match &self.gender_constraints {
            Some(constraints) => {
                writeln!(f, "- Gender constraints: {}", constraint_list(constraints))?
            }
            None => writeln!(f, "- Gender constraints: none")?,
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "- **{}** ({}, {}): met {}",
            self.id,
            self.gender,
            self.personality,
            self.all_met_people.len()
        )?;
        if !self.group_history.is_empty() {
            let tables: Vec<String> = self.group_history.iter().map(u32::to_string).collect();
            write!(f, ", tables {}", tables.join(" → "))?;
        }
        writeln!(f)
    }
}

impl fmt::Display for GroupAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### Table {} ({} people)", self.id, self.size())?;
        writeln!(f)?;
        writeln!(f, "- Members: {}", self.members.join(", "))?;
        writeln!(
            f,
            "- Gender: {} male, {} female",
            self.male_count, self.female_count
        )?;
        writeln!(
            f,
            "- Personality: {} extrovert, {} introvert",
            self.extrovert_count, self.introvert_count
        )?;
        writeln!(f, "- New meetings: {}", self.new_meetings_count)?;
        writeln!(f)
    }
}

impl fmt::Display for GroupingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = &self.summary;
        writeln!(f, "# Round {}", self.round)?;
        writeln!(f)?;
        writeln!(f, "- Tables: {}", summary.total_groups)?;
        writeln!(f, "- Average size: {:.2}", summary.avg_group_size)?;
        writeln!(f, "- New meetings: {}", summary.new_meetings_count)?;
        writeln!(f, "- Gender balance: {}/100", summary.gender_balance_score)?;
        writeln!(f, "- Personality balance: {}/100", summary.mbti_balance_score)?;
        writeln!(
            f,
            "- Gender constraints: {}",
            if self.constraints_applied {
                "applied"
            } else {
                "not applied"
            }
        )?;
        writeln!(f, "- Seed: {}", self.seed)?;
        writeln!(f)?;

        for group in &self.groups {
            write!(f, "{group}")?;
        }
        Ok(())
    }
}
