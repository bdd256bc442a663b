//! Event operations for the Organizer.

use log::info;

use super::{require_event, Organizer};
use crate::{
    error::{GroupingError, Result},
    models::{Event, GroupSizing},
    params::{ConfigureEvent, CreateEvent, DeleteEvent, Id},
};

fn check_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(GroupingError::invalid_input("name").with_reason("event name cannot be empty"));
    }
    Ok(())
}

fn check_sizing(sizing: &GroupSizing) -> Result<()> {
    let valid = match sizing {
        GroupSizing::Uniform(size) => *size > 0,
        GroupSizing::Manual(sizes) => !sizes.is_empty() && !sizes.contains(&0),
    };
    if !valid {
        return Err(GroupingError::invalid_input("group_sizing")
            .with_reason("group sizes must be positive and at least one group is required"));
    }
    Ok(())
}

impl Organizer {
    /// Creates a new event with default round settings.
    pub async fn create_event(&self, params: &CreateEvent) -> Result<Event> {
        check_name(&params.name)?;
        check_sizing(&params.group_sizing)?;

        let name = params.name.trim().to_string();
        let sizing = params.group_sizing.clone();
        let constraints = params.gender_constraints.clone();

        let event = self
            .with_db(move |db| db.create_event(&name, &sizing, constraints.as_deref()))
            .await?;
        info!("Created event {} '{}'", event.id, event.name);
        Ok(event)
    }

    /// Lists all events, oldest first.
    pub async fn list_events(&self) -> Result<Vec<Event>> {
        self.with_db(|db| db.list_events()).await
    }

    /// Retrieves an event by its ID.
    pub async fn get_event(&self, params: &Id) -> Result<Option<Event>> {
        let id = params.id;
        self.with_db(move |db| db.get_event(id)).await
    }

    /// Changes an event's name and default round settings.
    ///
    /// Fields left as `None` keep their stored value.
    pub async fn configure_event(&self, params: &ConfigureEvent) -> Result<Event> {
        if let Some(name) = &params.name {
            check_name(name)?;
        }
        if let Some(sizing) = &params.group_sizing {
            check_sizing(sizing)?;
        }

        let params = params.clone();
        self.with_db(move |db| {
            let current = require_event(db, params.id)?;

            let name = params
                .name
                .as_deref()
                .map(str::trim)
                .unwrap_or(&current.name)
                .to_string();
            let sizing = params.group_sizing.unwrap_or(current.group_sizing);
            let constraints = if params.clear_constraints {
                None
            } else {
                params.gender_constraints.or(current.gender_constraints)
            };

            db.update_event(params.id, &name, &sizing, constraints.as_deref())?
                .ok_or(GroupingError::EventNotFound { id: params.id })
        })
        .await
    }

    /// Deletes an event with its roster and rounds. Returns false if it did
    /// not exist.
    ///
    /// # Errors
    ///
    /// Returns `GroupingError::InvalidInput` unless `confirmed` is set.
    pub async fn delete_event(&self, params: &DeleteEvent) -> Result<bool> {
        if !params.confirmed {
            return Err(GroupingError::invalid_input("confirmed").with_reason(
                "event deletion requires explicit confirmation and removes the roster and all rounds",
            ));
        }
        let id = params.id;
        let deleted = self.with_db(move |db| db.delete_event(id)).await?;
        if deleted {
            info!("Deleted event {id}");
        }
        Ok(deleted)
    }
}
