//! Integration tests for a file-backed agenda store.
//!
//! Covers persistence across store instances, backup files and the
//! image-to-record flow.

use agenda_core::config::{AgendaConfig, Variant};
use agenda_core::date_range::DateRange;
use agenda_core::image::{ImageData, load_image};
use agenda_core::slot::{FileSlots, SlotStorage};
use agenda_core::transfer::{export_file_name, read_import, write_export};
use agenda_core::{AgendaDraft, AgendaError, AgendaPatch, AgendaStore};
use chrono::{Duration, Local, NaiveDate};
use tempfile::TempDir;

fn draft(title: &str, date: &str) -> AgendaDraft {
    AgendaDraft {
        title: title.to_string(),
        category: "Pendidikan".to_string(),
        date: date.to_string(),
        description: "Kegiatan sekolah".to_string(),
        image: Some(ImageData::from_bytes(b"img", "image/jpeg", Some("foto.jpg"))),
    }
}

fn config_in(dir: &TempDir, variant: Variant) -> AgendaConfig {
    AgendaConfig {
        data_dir: dir.path().join("data"),
        variant,
        ..AgendaConfig::default()
    }
}

#[test]
fn test_records_survive_reopening() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = config_in(&dir, Variant::Enhanced);

    let created = {
        let store = config.open_store();
        store.create(draft("Seminar", "2025-01-10")).unwrap()
    };

    let store = config.open_store();
    let records = store.list_all().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0], created);
    assert!(dir.path().join("data/enhanced_agenda_data.json").exists());
}

#[test]
fn test_seminar_scenario() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = config_in(&dir, Variant::Enhanced).open_store();

    let a = store.create(draft("Seminar", "2025-01-10")).unwrap();
    assert_eq!(store.list_all().unwrap().len(), 1);

    let today = Local::now().date_naive();
    let event_day = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
    let upcoming = store.upcoming(5).unwrap();
    assert_eq!(upcoming.iter().any(|r| r.id == a.id), event_day >= today);
}

#[test]
fn test_upcoming_relative_to_today() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = config_in(&dir, Variant::Enhanced).open_store();

    let today = Local::now().date_naive();
    let fmt = |d: NaiveDate| d.format("%Y-%m-%d").to_string();

    store.create(draft("Yesterday", &fmt(today - Duration::days(1)))).unwrap();
    store.create(draft("Today", &fmt(today))).unwrap();
    store.create(draft("Next week", &fmt(today + Duration::days(7)))).unwrap();

    let titles: Vec<_> = store
        .upcoming(5)
        .unwrap()
        .into_iter()
        .map(|r| r.title)
        .collect();
    assert_eq!(titles, vec!["Today", "Next week"]);

    let stats = store.stats().unwrap();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.upcoming, 2);
}

#[test]
fn test_legacy_and_enhanced_use_separate_slots() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let enhanced = config_in(&dir, Variant::Enhanced).open_store();
    let legacy = config_in(&dir, Variant::Legacy).open_store();

    enhanced.create(draft("Enhanced", "2025-01-10")).unwrap();
    legacy.create(draft("Legacy", "2025-01-10")).unwrap();

    assert_eq!(enhanced.list_all().unwrap().len(), 1);
    assert_eq!(legacy.list_all().unwrap()[0].title, "Legacy");

    let raw = FileSlots::new(dir.path().join("data"))
        .read("agendaData")
        .unwrap()
        .unwrap();
    assert!(!raw.contains("updatedAt"));
}

#[test]
fn test_failed_update_leaves_slot_unchanged() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = config_in(&dir, Variant::Enhanced).open_store();
    let created = store.create(draft("Seminar", "2025-01-10")).unwrap();

    let slots = FileSlots::new(dir.path().join("data"));
    let before = slots.read(store.key()).unwrap();

    let result = store.update(
        &created.id,
        AgendaPatch {
            date: Some("tomorrow".to_string()),
            ..Default::default()
        },
    );
    assert!(matches!(result, Err(AgendaError::InvalidDate(_))));
    assert_eq!(slots.read(store.key()).unwrap(), before);
}

#[test]
fn test_range_filter_on_file_store() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = config_in(&dir, Variant::Enhanced).open_store();
    store.create(draft("Jan", "2025-01-05")).unwrap();
    store.create(draft("Feb", "2025-02-05")).unwrap();

    let range = DateRange::from_args(Some("start"), Some("2025-01-31")).unwrap();
    let records = store.filter_by_date_range(&range).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "Jan");
}

#[tokio::test]
async fn test_backup_roundtrip_between_stores() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let source = AgendaStore::enhanced(FileSlots::new(dir.path().join("a")));
    source.create(draft("A", "2025-01-10")).unwrap();
    source.create(draft("B", "2025-01-11")).unwrap();

    let date = NaiveDate::from_ymd_opt(2025, 1, 9).unwrap();
    let path = write_export(&source, &dir.path().join("backups"), date)
        .await
        .unwrap();
    assert_eq!(path.file_name().unwrap().to_str().unwrap(), export_file_name(date));

    let target = AgendaStore::enhanced(FileSlots::new(dir.path().join("b")));
    assert_eq!(read_import(&target, &path).await.unwrap(), 2);
    assert_eq!(target.list_all().unwrap(), source.list_all().unwrap());

    // Re-importing into the source duplicates every record
    assert_eq!(read_import(&source, &path).await.unwrap(), 2);
    assert_eq!(source.list_all().unwrap().len(), 4);
}

#[tokio::test]
async fn test_import_missing_file_is_io_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = AgendaStore::enhanced(FileSlots::new(dir.path()));
    let result = read_import(&store, &dir.path().join("missing.json")).await;
    assert!(matches!(result, Err(AgendaError::Io(_))));
}

#[tokio::test]
async fn test_create_with_loaded_image() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let image_path = dir.path().join("poster.webp");
    std::fs::write(&image_path, b"RIFF0000WEBP").unwrap();

    let store = AgendaStore::enhanced(FileSlots::new(dir.path().join("data")));
    let image = load_image(&image_path).await.unwrap();
    let record = store
        .create(AgendaDraft {
            image: Some(image),
            ..draft("Pameran", "2025-05-01")
        })
        .unwrap();

    assert!(record.image.unwrap().starts_with("data:image/webp;base64,"));
    assert_eq!(record.image_file_name.as_deref(), Some("poster.webp"));
}
