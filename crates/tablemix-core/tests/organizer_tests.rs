mod common;

use common::{create_test_organizer, roster};
use tablemix_core::{
    params::{ComputeRound, CreateEvent, EventRound, Id, ImportParticipants},
    GroupSizing, GroupingError, Organizer, OrganizerBuilder,
};

async fn seeded_event(organizer: &Organizer, males: usize, females: usize, size: u32) -> u64 {
    let event = organizer
        .create_event(&CreateEvent {
            name: "Monthly mixer".to_string(),
            group_sizing: GroupSizing::Uniform(size),
            gender_constraints: None,
        })
        .await
        .expect("Failed to create event");
    let imported = organizer
        .import_participants(&ImportParticipants {
            event_id: event.id,
            participants: roster(males, females),
        })
        .await
        .expect("Failed to import roster");
    assert_eq!(imported, males + females);
    event.id
}

#[tokio::test]
async fn test_multi_round_workflow() {
    let (_temp_dir, organizer) = create_test_organizer().await;
    let event_id = seeded_event(&organizer, 6, 6, 4).await;

    for expected_round in 1..=3u32 {
        let draft = organizer
            .compute_round(&ComputeRound {
                event_id,
                seed: Some(u64::from(expected_round)),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(draft.round, expected_round);
        assert_eq!(draft.result.participant_count(), 12);

        let updated = organizer
            .commit_round(&EventRound {
                event_id,
                round: expected_round,
            })
            .await
            .unwrap();
        assert!(updated
            .iter()
            .all(|p| p.group_history.len() == expected_round as usize));
    }

    let rounds = organizer.list_rounds(&Id { id: event_id }).await.unwrap();
    assert_eq!(rounds.len(), 3);
    assert!(rounds.iter().all(|r| r.committed));

    let coverage = organizer.coverage(&Id { id: event_id }).await.unwrap();
    assert_eq!(coverage.committed_rounds, 3);
    assert_eq!(coverage.possible_pairs, 66);
    assert!(coverage.met_pairs >= 18);
    assert!(coverage.met_pairs <= 54);
    assert_eq!(coverage.theoretical_max_rounds, Some(3));
    assert_eq!(coverage.remaining_rounds, Some(0));

    let export = organizer.export_history(&Id { id: event_id }).await.unwrap();
    assert_eq!(export.rounds.len(), 3);
    assert_eq!(
        export.rounds.iter().map(|r| r.round).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
}

#[tokio::test]
async fn test_state_survives_new_organizer() {
    let (temp_dir, organizer) = create_test_organizer().await;
    let event_id = seeded_event(&organizer, 2, 2, 2).await;

    organizer
        .compute_round(&ComputeRound {
            event_id,
            seed: Some(10),
            ..Default::default()
        })
        .await
        .unwrap();
    organizer
        .commit_round(&EventRound { event_id, round: 1 })
        .await
        .unwrap();

    let reopened = OrganizerBuilder::new()
        .with_database_path(Some(temp_dir.path().join("test.db")))
        .build()
        .await
        .unwrap();
    let people = reopened
        .list_participants(&Id { id: event_id })
        .await
        .unwrap();
    assert_eq!(people.len(), 4);
    assert!(people.iter().all(|p| p.all_met_people.len() == 1));

    let next = reopened
        .compute_round(&ComputeRound {
            event_id,
            seed: Some(10),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(next.round, 2);
}

#[tokio::test]
async fn test_compute_rejects_round_zero() {
    let (_temp_dir, organizer) = create_test_organizer().await;
    let event_id = seeded_event(&organizer, 1, 1, 2).await;

    let err = organizer
        .compute_round(&ComputeRound {
            event_id,
            round: Some(0),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, GroupingError::InvalidInput { .. }));
}

#[tokio::test]
async fn test_compute_on_empty_roster() {
    let (_temp_dir, organizer) = create_test_organizer().await;
    let event_id = seeded_event(&organizer, 0, 0, 2).await;

    let err = organizer
        .compute_round(&ComputeRound {
            event_id,
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        GroupingError::InsufficientParticipants { count: 0 }
    ));
}

#[tokio::test]
async fn test_operations_on_missing_event() {
    let (_temp_dir, organizer) = create_test_organizer().await;

    let err = organizer
        .compute_round(&ComputeRound {
            event_id: 7,
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, GroupingError::EventNotFound { id: 7 }));

    let err = organizer.coverage(&Id { id: 7 }).await.unwrap_err();
    assert!(matches!(err, GroupingError::EventNotFound { id: 7 }));
}
