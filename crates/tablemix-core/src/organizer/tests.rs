//! Tests for the organizer module.

use tempfile::TempDir;

use super::*;
use crate::{
    models::{Gender, GenderConstraint, GroupSizing, Participant, Personality},
    params::{
        AddParticipant, ComputeRound, ConfigureEvent, CreateEvent, DeleteEvent, EventRound, Id,
        ImportParticipants, RemoveParticipant,
    },
};

/// Helper function to create a test organizer
async fn create_test_organizer() -> (TempDir, Organizer) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let organizer = OrganizerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create organizer");
    (temp_dir, organizer)
}

fn roster(males: usize, females: usize) -> Vec<Participant> {
    let males = (0..males)
        .map(|i| Participant::new(format!("m{i}"), Gender::Male, Personality::Extrovert));
    let females = (0..females)
        .map(|i| Participant::new(format!("f{i}"), Gender::Female, Personality::Introvert));
    males.chain(females).collect()
}

async fn event_with_roster(organizer: &Organizer, size: u32, people: Vec<Participant>) -> u64 {
    let event = organizer
        .create_event(&CreateEvent {
            name: "Mixer".to_string(),
            group_sizing: GroupSizing::Uniform(size),
            gender_constraints: None,
        })
        .await
        .expect("Failed to create event");
    organizer
        .import_participants(&ImportParticipants {
            event_id: event.id,
            participants: people,
        })
        .await
        .expect("Failed to import participants");
    event.id
}

#[tokio::test]
async fn test_create_event_rejects_blank_name() {
    let (_temp_dir, organizer) = create_test_organizer().await;
    let err = organizer
        .create_event(&CreateEvent {
            name: "  ".to_string(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, GroupingError::InvalidInput { .. }));
}

#[tokio::test]
async fn test_configure_event_partial_update() {
    let (_temp_dir, organizer) = create_test_organizer().await;
    let event = organizer
        .create_event(&CreateEvent {
            name: "Mixer".to_string(),
            group_sizing: GroupSizing::Uniform(4),
            gender_constraints: Some(vec![GenderConstraint {
                male_count: 2,
                female_count: 2,
            }]),
        })
        .await
        .unwrap();

    let updated = organizer
        .configure_event(&ConfigureEvent {
            id: event.id,
            group_sizing: Some(GroupSizing::Manual(vec![3, 3])),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(updated.name, "Mixer");
    assert_eq!(updated.group_sizing, GroupSizing::Manual(vec![3, 3]));
    assert!(updated.gender_constraints.is_some());

    let cleared = organizer
        .configure_event(&ConfigureEvent {
            id: event.id,
            clear_constraints: true,
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(cleared.gender_constraints.is_none());

    let missing = organizer
        .configure_event(&ConfigureEvent {
            id: 999,
            ..Default::default()
        })
        .await;
    assert!(matches!(missing, Err(GroupingError::EventNotFound { id: 999 })));
}

#[tokio::test]
async fn test_roster_management() {
    let (_temp_dir, organizer) = create_test_organizer().await;
    let event_id = event_with_roster(&organizer, 2, roster(1, 1)).await;

    organizer
        .add_participant(&AddParticipant {
            event_id,
            participant: Participant::new("late", Gender::Female, Personality::Extrovert),
        })
        .await
        .unwrap();
    let ids: Vec<String> = organizer
        .list_participants(&Id { id: event_id })
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec!["m0", "f0", "late"]);

    organizer
        .remove_participant(&RemoveParticipant {
            event_id,
            participant_id: "m0".to_string(),
        })
        .await
        .unwrap();
    let err = organizer
        .remove_participant(&RemoveParticipant {
            event_id,
            participant_id: "m0".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, GroupingError::ParticipantNotFound { .. }));
}

#[tokio::test]
async fn test_import_rejects_repeated_ids() {
    let (_temp_dir, organizer) = create_test_organizer().await;
    let event_id = event_with_roster(&organizer, 2, vec![]).await;

    let mut people = roster(2, 0);
    people[1].id = "m0".to_string();
    let err = organizer
        .import_participants(&ImportParticipants {
            event_id,
            participants: people,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, GroupingError::InvalidInput { .. }));
}

#[tokio::test]
async fn test_compute_defaults_to_next_round() {
    let (_temp_dir, organizer) = create_test_organizer().await;
    let event_id = event_with_roster(&organizer, 4, roster(4, 4)).await;

    let first = organizer
        .compute_round(&ComputeRound {
            event_id,
            seed: Some(1),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(first.round, 1);
    assert!(!first.committed);
    assert_eq!(first.result.participant_count(), 8);

    // recomputing an uncommitted round replaces the draft
    let again = organizer
        .compute_round(&ComputeRound {
            event_id,
            seed: Some(2),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(again.round, 1);

    organizer
        .commit_round(&EventRound { event_id, round: 1 })
        .await
        .unwrap();

    let second = organizer
        .compute_round(&ComputeRound {
            event_id,
            seed: Some(1),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(second.round, 2);
    assert_eq!(
        organizer.list_rounds(&Id { id: event_id }).await.unwrap().len(),
        2
    );
}

#[tokio::test]
async fn test_commit_persists_history_once() {
    let (_temp_dir, organizer) = create_test_organizer().await;
    let event_id = event_with_roster(&organizer, 3, roster(3, 3)).await;

    let draft = organizer
        .compute_round(&ComputeRound {
            event_id,
            seed: Some(9),
            ..Default::default()
        })
        .await
        .unwrap();
    let updated = organizer
        .commit_round(&EventRound { event_id, round: 1 })
        .await
        .unwrap();
    assert!(updated.iter().all(|p| p.group_history.len() == 1));

    let stored = organizer
        .list_participants(&Id { id: event_id })
        .await
        .unwrap();
    assert_eq!(stored, updated);
    for participant in &stored {
        let table = draft.result.group_of(&participant.id).unwrap();
        assert_eq!(participant.group_history, vec![table.id]);
        assert_eq!(participant.all_met_people.len(), table.size() - 1);
    }

    let err = organizer
        .commit_round(&EventRound { event_id, round: 1 })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        GroupingError::RoundAlreadyCommitted { round: 1, .. }
    ));

    let recompute = organizer
        .compute_round(&ComputeRound {
            event_id,
            round: Some(1),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(
        recompute,
        GroupingError::RoundAlreadyCommitted { .. }
    ));
}

#[tokio::test]
async fn test_request_overrides_event_settings() {
    let (_temp_dir, organizer) = create_test_organizer().await;
    let event_id = event_with_roster(&organizer, 4, roster(3, 3)).await;

    let record = organizer
        .compute_round(&ComputeRound {
            event_id,
            group_sizing: Some(GroupSizing::Uniform(2)),
            seed: Some(5),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(record.result.groups.len(), 3);
}

#[tokio::test]
async fn test_stored_constraints_are_applied() {
    let (_temp_dir, organizer) = create_test_organizer().await;
    let event_id = event_with_roster(&organizer, 4, roster(4, 4)).await;
    organizer
        .configure_event(&ConfigureEvent {
            id: event_id,
            gender_constraints: Some(vec![
                GenderConstraint {
                    male_count: 3,
                    female_count: 1,
                },
                GenderConstraint {
                    male_count: 1,
                    female_count: 3,
                },
            ]),
            ..Default::default()
        })
        .await
        .unwrap();

    let record = organizer
        .compute_round(&ComputeRound {
            event_id,
            seed: Some(11),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(record.result.constraints_applied);
    assert_eq!(record.result.groups[0].male_count, 3);
    assert_eq!(record.result.groups[1].female_count, 3);
}

#[tokio::test]
async fn test_commit_unknown_round() {
    let (_temp_dir, organizer) = create_test_organizer().await;
    let event_id = event_with_roster(&organizer, 2, roster(1, 1)).await;
    let err = organizer
        .commit_round(&EventRound { event_id, round: 3 })
        .await
        .unwrap_err();
    assert!(matches!(err, GroupingError::RoundNotFound { round: 3, .. }));
}

#[tokio::test]
async fn test_export_and_coverage() {
    let (_temp_dir, organizer) = create_test_organizer().await;
    let event_id = event_with_roster(&organizer, 2, roster(2, 2)).await;

    organizer
        .compute_round(&ComputeRound {
            event_id,
            seed: Some(4),
            ..Default::default()
        })
        .await
        .unwrap();
    organizer
        .commit_round(&EventRound { event_id, round: 1 })
        .await
        .unwrap();
    // an uncommitted draft stays out of the export
    organizer
        .compute_round(&ComputeRound {
            event_id,
            seed: Some(4),
            ..Default::default()
        })
        .await
        .unwrap();

    let export = organizer.export_history(&Id { id: event_id }).await.unwrap();
    assert_eq!(export.event, "Mixer");
    assert_eq!(export.total_people, 4);
    assert_eq!(export.rounds.len(), 1);
    assert_eq!(export.rounds[0].groups.len(), 2);

    let coverage = organizer.coverage(&Id { id: event_id }).await.unwrap();
    assert_eq!(coverage.committed_rounds, 1);
    assert_eq!(coverage.possible_pairs, 6);
    assert_eq!(coverage.met_pairs, 2);
    assert_eq!(coverage.theoretical_max_rounds, Some(3));
    assert_eq!(coverage.remaining_rounds, Some(2));
}

#[tokio::test]
async fn test_delete_event() {
    let (_temp_dir, organizer) = create_test_organizer().await;
    let event_id = event_with_roster(&organizer, 2, roster(1, 1)).await;

    let refused = organizer
        .delete_event(&DeleteEvent {
            id: event_id,
            confirmed: false,
        })
        .await;
    assert!(matches!(refused, Err(GroupingError::InvalidInput { .. })));

    assert!(organizer
        .delete_event(&DeleteEvent {
            id: event_id,
            confirmed: true,
        })
        .await
        .unwrap());
    assert!(organizer
        .get_event(&Id { id: event_id })
        .await
        .unwrap()
        .is_none());
    assert!(matches!(
        organizer.list_participants(&Id { id: event_id }).await,
        Err(GroupingError::EventNotFound { .. })
    ));
}
