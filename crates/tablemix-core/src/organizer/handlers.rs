//! Organizer operations that return display wrapper types.

use super::Organizer;
use crate::{
    display::{CoverageReport, EventList, GroupingReport, ParticipantList, RoundList},
    error::Result,
    params::{ComputeRound, EventRound, Id},
};

impl Organizer {
    /// Lists all events for display.
    pub async fn list_events_display(&self) -> Result<EventList> {
        Ok(EventList(self.list_events().await?))
    }

    /// Loads an event roster for display.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use tablemix_core::{params::Id, OrganizerBuilder};
    /// # async {
    /// let organizer = OrganizerBuilder::new().build().await?;
    /// let roster = organizer.list_participants_display(&Id { id: 1 }).await?;
    /// println!("{roster}");
    /// # Result::<(), tablemix_core::GroupingError>::Ok(())
    /// # };
    /// ```
    pub async fn list_participants_display(&self, params: &Id) -> Result<ParticipantList> {
        Ok(ParticipantList(self.list_participants(params).await?))
    }

    /// Lists an event's stored rounds for display.
    pub async fn list_rounds_display(&self, params: &Id) -> Result<RoundList> {
        Ok(RoundList(self.list_rounds(params).await?))
    }

    /// Computes a draft round and wraps it with its storage state.
    pub async fn compute_round_report(&self, params: &ComputeRound) -> Result<GroupingReport> {
        Ok(GroupingReport::from(self.compute_round(params).await?))
    }

    /// Retrieves a stored round as a report, if it exists.
    pub async fn round_report(&self, params: &EventRound) -> Result<Option<GroupingReport>> {
        Ok(self.get_round(params).await?.map(GroupingReport::from))
    }

    /// Pair coverage of an event for display.
    pub async fn coverage_report(&self, params: &Id) -> Result<CoverageReport> {
        Ok(CoverageReport(self.coverage(params).await?))
    }
}
