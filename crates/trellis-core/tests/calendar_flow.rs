use chrono::{NaiveDate, TimeZone, Utc};
use chrono_tz::Asia::Jakarta;
use trellis_core::bucket::bucket_for_day;
use trellis_core::filter::ViewFilter;
use trellis_core::snapshot::parse_tasks;
use trellis_core::task::Priority;
use trellis_core::view::{CalendarViewState, ViewMode};
use trellis_core::views::{day_agenda, month_view};

const SNAPSHOT: &str = r#"[
    {
        "uuid": "0d4aa2b2-5a86-4072-a379-6b0dbd0a2e52",
        "id": 1,
        "title": "Prepare demo",
        "status": "pending",
        "priority": "high",
        "startDate": "2024-06-10",
        "time": "10:00"
    },
    {
        "uuid": "3f2f2af5-02c5-44e1-9e5f-3a9ab2a0e6a1",
        "id": 2,
        "title": "Water plants",
        "status": "completed",
        "priority": "low",
        "startDate": "2024-06-10"
    },
    {
        "uuid": "9be0c3a7-90cf-4e6a-8a26-57fbba79b8e9",
        "id": 3,
        "title": "Someday maybe",
        "status": "pending",
        "priority": "medium"
    }
]"#;

#[test]
fn snapshot_to_filtered_day_bucket() {
    let tasks = parse_tasks(SNAPSHOT).expect("decode snapshot");
    let now = Utc
        .with_ymd_and_hms(2024, 6, 12, 5, 0, 0)
        .single()
        .expect("valid now");

    let mut filter = ViewFilter::default();
    filter.toggle_priority(Priority::Low);

    // Bucket June 10, then filter: only the high-priority task survives.
    let bucketed = bucket_for_day(&tasks, Jakarta, 2024, 5, 10);
    assert_eq!(bucketed.len(), 2);
    let kept = filter.apply(&bucketed);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].id, Some(1));

    // The task without an anchor is in the flat snapshot but never in a
    // date bucket.
    assert_eq!(tasks.len(), 3);
    let state = CalendarViewState {
        mode: ViewMode::Month,
        cursor: NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date"),
        selected: None,
    };
    let model = month_view(&state, &tasks, &ViewFilter::default(), Jakarta, now);
    let bucketed_total: usize = model.cells.iter().map(|cell| cell.tasks.len()).sum();
    assert_eq!(bucketed_total, 2);
}

#[test]
fn navigate_to_the_day_and_read_the_agenda() {
    let tasks = parse_tasks(SNAPSHOT).expect("decode snapshot");
    let now = Utc
        .with_ymd_and_hms(2024, 6, 12, 5, 0, 0)
        .single()
        .expect("valid now");

    // Land on June 2024, step around, come back, then open June 10.
    let state = CalendarViewState::at_today(now, Jakarta)
        .next_month()
        .prev_month()
        .select_day(10);
    assert_eq!(state.mode, ViewMode::Day);

    let agenda = day_agenda(&state, &tasks, &ViewFilter::default(), Jakarta, now);
    assert_eq!(agenda.total, 2);
    assert_eq!(agenda.slots.len(), 1);
    assert_eq!(agenda.slots[0].time, "10:00");
    assert_eq!(agenda.unscheduled.len(), 1);
    assert_eq!(agenda.title, "Monday, June 10, 2024");

    // The week around the selection runs Sunday June 9 through Saturday
    // June 15.
    let week = state.week_days();
    assert_eq!(
        week[0],
        NaiveDate::from_ymd_opt(2024, 6, 9).expect("valid date")
    );
    assert_eq!(
        week[6],
        NaiveDate::from_ymd_opt(2024, 6, 15).expect("valid date")
    );
}
