#![allow(dead_code)]

use tablemix_core::{
    models::{Gender, Participant, Personality},
    Organizer, OrganizerBuilder,
};
use tempfile::TempDir;

/// Helper function to create a test organizer
pub async fn create_test_organizer() -> (TempDir, Organizer) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let organizer = OrganizerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create organizer");
    (temp_dir, organizer)
}

/// `males` men followed by `females` women, ids `m0..` and `f0..`
pub fn roster(males: usize, females: usize) -> Vec<Participant> {
    let males = (0..males)
        .map(|i| Participant::new(format!("m{i}"), Gender::Male, Personality::Extrovert));
    let females = (0..females)
        .map(|i| Participant::new(format!("f{i}"), Gender::Female, Personality::Extrovert));
    males.chain(females).collect()
}

/// Every seated id, sorted.
pub fn seated_ids(result: &tablemix_core::GroupingResult) -> Vec<String> {
    let mut ids: Vec<String> = result
        .groups
        .iter()
        .flat_map(|g| g.members.iter().cloned())
        .collect();
    ids.sort();
    ids
}
