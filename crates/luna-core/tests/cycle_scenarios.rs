//! End-to-end scenarios for the tracker: records, phases and persistence.
//!
//! These go through the public API only, the same way the CLI does.

use chrono::NaiveDate;
use luna_core::date::parse_date;
use luna_core::{
    AwaitingReason, CycleRecord, CyclePhase, CycleRules, CycleStore, EndOutcome, EndStamp, Flow,
    JsonFileStore, MemoryStore, MonthCursor, PhaseEngine, PhaseState, ReferenceTime, Snapshot,
    SnapshotStore, Tracker,
};

fn d(s: &str) -> NaiveDate {
    parse_date(s).unwrap()
}

fn tracker_at<S: SnapshotStore>(store: S, date: &str) -> Tracker<S> {
    Tracker::open(store, CycleRules::default(), ReferenceTime::new(d(date)))
}

fn phase_on(store: &CycleStore, date: &str) -> Option<CyclePhase> {
    PhaseEngine::default().status(store, d(date)).current_phase()
}

#[test]
fn test_closed_record_twenty_days_later_is_luteal() {
    let store = CycleStore::from(Snapshot {
        cycles: vec![CycleRecord::closed(d("2024-01-01"), d("2024-01-05"))],
        ..Snapshot::default()
    });

    let status = PhaseEngine::default().status(&store, d("2024-01-20"));
    assert_eq!(status.active_cycle, Some(CycleRecord::closed(d("2024-01-01"), d("2024-01-05"))));
    assert_eq!(status.cycle_day, Some(20));
    assert!(!status.period_ongoing);
    assert_eq!(status.current_phase(), Some(CyclePhase::Luteal));
}

#[test]
fn test_first_start_makes_day_one() {
    let mem = MemoryStore::new();
    let mut tracker = tracker_at(&mem, "2024-04-10");
    tracker.start_period().unwrap();

    for (offset, expected_day) in [(0, 1), (1, 2), (30, 31)] {
        tracker.set_reference(d("2024-04-10"));
        tracker.shift_reference(offset);
        let status = tracker.status();
        assert_eq!(status.active_cycle.unwrap().start_date, d("2024-04-10"));
        assert_eq!(status.cycle_day, Some(expected_day));
    }
}

#[test]
fn test_close_starts_merge_to_earliest() {
    let mem = MemoryStore::new();
    let mut tracker = tracker_at(&mem, "2024-04-10");
    tracker.start_period().unwrap();
    tracker.set_reference(d("2024-04-02"));
    tracker.start_period().unwrap();

    assert_eq!(tracker.store().cycles(), &[CycleRecord::open(d("2024-04-02"))]);
    assert_eq!(mem.saved().cycles.len(), 1);
}

#[test]
fn test_end_on_start_day_removes_record() {
    let mem = MemoryStore::new();
    let mut tracker = tracker_at(&mem, "2024-04-10");
    tracker.start_period().unwrap();
    let outcome = tracker.end_period(EndStamp::Today).unwrap();
    assert_eq!(outcome, EndOutcome::Removed { start_date: d("2024-04-10") });
    assert!(mem.saved().cycles.is_empty());
    assert_eq!(
        tracker.status().phase,
        PhaseState::Awaiting { reason: AwaitingReason::NoRecords }
    );
}

#[test]
fn test_end_date_is_exclusive() {
    let store = CycleStore::from(Snapshot {
        cycles: vec![CycleRecord::closed(d("2024-01-01"), d("2024-01-06"))],
        ..Snapshot::default()
    });
    for day in 1..=5 {
        let date = format!("2024-01-0{day}");
        assert_eq!(phase_on(&store, &date), Some(CyclePhase::Menstrual), "{date}");
    }
    assert_ne!(phase_on(&store, "2024-01-06"), Some(CyclePhase::Menstrual));
}

#[test]
fn test_open_record_safety_window() {
    let store = CycleStore::from(Snapshot {
        cycles: vec![CycleRecord::open(d("2024-01-01"))],
        ..Snapshot::default()
    });
    for day in 1..=9 {
        let date = format!("2024-01-0{day}");
        assert_eq!(phase_on(&store, &date), Some(CyclePhase::Menstrual), "{date}");
    }
    for date in ["2024-01-11", "2024-01-20", "2024-03-01"] {
        assert_ne!(phase_on(&store, date), Some(CyclePhase::Menstrual), "{date}");
    }
}

#[test]
fn test_ovulation_window() {
    let store = CycleStore::from(Snapshot {
        cycles: vec![CycleRecord::closed(d("2024-01-01"), d("2024-01-06"))],
        ..Snapshot::default()
    });
    assert_eq!(phase_on(&store, "2024-01-13"), Some(CyclePhase::Follicular));
    assert_eq!(phase_on(&store, "2024-01-14"), Some(CyclePhase::Ovulation));
    assert_eq!(phase_on(&store, "2024-01-15"), Some(CyclePhase::Ovulation));
    assert_eq!(phase_on(&store, "2024-01-16"), Some(CyclePhase::Luteal));
}

#[test]
fn test_love_taps_accumulate_without_intimacy() {
    let mem = MemoryStore::new();
    let mut tracker = tracker_at(&mem, "2024-05-05");
    assert_eq!(tracker.status().love_count, 0);
    for _ in 0..3 {
        tracker.add_love().unwrap();
    }
    let status = tracker.status();
    assert_eq!(status.love_count, 3);
    assert!(!status.intimacy);
}

#[test]
fn test_json_file_store_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("luna.json");

    {
        let mut tracker = tracker_at(JsonFileStore::new_with_path(path.clone()), "2024-06-01");
        tracker.start_period().unwrap();
        tracker.add_love().unwrap();
        tracker.set_reference(d("2024-06-06"));
        tracker.end_period(EndStamp::Yesterday).unwrap();
    }

    let tracker = tracker_at(JsonFileStore::new_with_path(path), "2024-06-03");
    assert_eq!(
        tracker.store().cycles(),
        &[CycleRecord::closed(d("2024-06-01"), d("2024-06-05"))]
    );
    let log = tracker.log(d("2024-06-01")).unwrap();
    assert_eq!(log.flow, Some(Flow::Medium));
    assert_eq!(log.love_count, 1);
    assert!(tracker.status().period_ongoing);
}

#[test]
fn test_loads_camel_case_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("luna.json");
    std::fs::write(
        &path,
        r#"{
            "cycles": [{ "startDate": "2024-02-01", "endDate": "2024-02-05" }],
            "logs": {
                "2024-02-02": {
                    "date": "2024-02-02",
                    "flow": "Heavy",
                    "mood": ["tired"],
                    "symptoms": ["cramps"],
                    "loveCount": 2,
                    "intimacy": true
                }
            }
        }"#,
    )
    .unwrap();

    let tracker = tracker_at(JsonFileStore::new_with_path(path), "2024-02-02");
    let status = tracker.status();
    assert_eq!(status.cycle_day, Some(2));
    assert_eq!(status.love_count, 2);
    assert!(status.intimacy);

    let month = tracker.calendar(MonthCursor::new(2024, 2).unwrap());
    let heavy = month.cells.iter().flatten().find(|c| c.date == d("2024-02-02")).unwrap();
    assert_eq!(heavy.flow, Some(Flow::Heavy));
}

#[test]
fn test_corrupt_snapshot_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("luna.json");
    std::fs::write(&path, "{ not json").unwrap();

    let tracker = tracker_at(JsonFileStore::new_with_path(path), "2024-02-02");
    assert!(tracker.store().is_empty());
    assert!(tracker.store().logs().is_empty());
}
