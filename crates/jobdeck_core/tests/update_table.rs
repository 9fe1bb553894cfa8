use std::sync::Once;

use chrono::{TimeZone, Utc};
use jobdeck_core::{update, Effect, Job, JobStatus, JobTable, Msg, TaskId, DETAIL_BATCH};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(deck_logging::initialize_for_tests);
}

fn task_ids(n: usize) -> Vec<TaskId> {
    (0..n).map(|i| format!("T{i:03}")).collect()
}

fn detail(taskid: &str, status: &str) -> Job {
    Job {
        taskid: taskid.to_string(),
        ownerid: "alice".to_string(),
        desc: format!("job {taskid}"),
        status: JobStatus::parse(status),
        age_ms: 1_000,
        ..Job::default()
    }
}

#[test]
fn load_replaces_table_with_bare_rows_and_requests_first_batch() {
    init_logging();
    let ids = task_ids(45);
    let (mut table, effects) = update(JobTable::new(), Msg::JobIdsLoaded { task_ids: ids.clone() });

    assert_eq!(table.job_count(), 45);
    assert!(table
        .rows()
        .iter()
        .all(|row| row.job.status == JobStatus::Unknown && row.flags.visible()));
    assert_eq!(
        effects,
        vec![Effect::FetchDetails {
            generation: 1,
            offset: 0,
            task_ids: ids[..DETAIL_BATCH].to_vec(),
        }]
    );
    assert!(table.consume_dirty());
}

#[test]
fn detail_batches_apply_sequentially_over_a_45_row_table() {
    init_logging();
    let ids = task_ids(45);
    let (table, _) = update(JobTable::new(), Msg::JobIdsLoaded { task_ids: ids.clone() });

    let first: Vec<Job> = ids[..30].iter().map(|id| detail(id, "running")).collect();
    let (table, effects) = update(
        table,
        Msg::DetailsFetched {
            generation: 1,
            offset: 0,
            details: first,
        },
    );

    // Rows 0-29 updated, 30-44 still bare; exactly one follow-up batch.
    assert!(table.rows()[..30]
        .iter()
        .all(|row| row.job.status == JobStatus::Running));
    assert!(table.rows()[30..]
        .iter()
        .all(|row| row.job.status == JobStatus::Unknown));
    assert_eq!(
        effects,
        vec![Effect::FetchDetails {
            generation: 1,
            offset: 30,
            task_ids: ids[30..].to_vec(),
        }]
    );

    let second: Vec<Job> = ids[30..].iter().map(|id| detail(id, "succeeded")).collect();
    let (table, effects) = update(
        table,
        Msg::DetailsFetched {
            generation: 1,
            offset: 30,
            details: second,
        },
    );

    assert!(table.rows()[30..]
        .iter()
        .all(|row| row.job.status == JobStatus::Succeeded));
    assert!(effects.is_empty());
}

#[test]
fn mismatched_taskid_at_offset_is_skipped_silently() {
    init_logging();
    let ids = task_ids(3);
    let (table, _) = update(JobTable::new(), Msg::JobIdsLoaded { task_ids: ids });

    let details = vec![
        detail("T000", "running"),
        detail("SOMEONE-ELSE", "running"),
        detail("T002", "running"),
    ];
    let (table, _) = update(
        table,
        Msg::DetailsFetched {
            generation: 1,
            offset: 0,
            details,
        },
    );

    assert_eq!(table.rows()[0].job.status, JobStatus::Running);
    // The mismatched entry updates zero rows and leaves defaults in place.
    assert_eq!(table.rows()[1].job.status, JobStatus::Unknown);
    assert_eq!(table.rows()[1].job.taskid, "T001");
    assert_eq!(table.rows()[2].job.status, JobStatus::Running);
}

#[test]
fn stale_generation_response_is_dropped() {
    init_logging();
    let (table, _) = update(JobTable::new(), Msg::JobIdsLoaded { task_ids: task_ids(2) });
    // A superseding load bumps the generation.
    let (table, _) = update(
        table,
        Msg::JobIdsLoaded {
            task_ids: vec!["X0".to_string(), "X1".to_string()],
        },
    );
    assert_eq!(table.generation(), 2);

    let (table, effects) = update(
        table,
        Msg::DetailsFetched {
            generation: 1,
            offset: 0,
            details: vec![detail("T000", "running")],
        },
    );

    assert!(effects.is_empty());
    assert!(table
        .rows()
        .iter()
        .all(|row| row.job.status == JobStatus::Unknown));
}

#[test]
fn submit_appends_optimistic_row_and_starts_the_job() {
    init_logging();
    let (table, _) = update(JobTable::new(), Msg::JobIdsLoaded { task_ids: task_ids(2) });
    let now = Utc.with_ymd_and_hms(2017, 11, 15, 12, 0, 0).unwrap();

    let (table, effects) = update(
        table,
        Msg::JobSubmitted {
            task_id: "NEW".to_string(),
            name: "milk.mps".to_string(),
            ownerid: "alice".to_string(),
            now,
        },
    );

    assert_eq!(table.job_count(), 3);
    let row = &table.rows()[2];
    assert_eq!(row.job.taskid, "NEW");
    assert_eq!(row.job.status, JobStatus::Submitted);
    assert_eq!(row.job.age_ms, 0);
    assert_eq!(row.job.starttime_ms, now.timestamp_millis());
    assert!(row.flags.visible());
    assert!(!row.flags.selected);
    assert_eq!(
        effects,
        vec![Effect::StartJob {
            task_id: "NEW".to_string()
        }]
    );
}

#[test]
fn reload_request_emits_list_effect_and_clears_last_error() {
    init_logging();
    let (table, _) = update(
        JobTable::new(),
        Msg::RequestFailed {
            op: "delete-jobs".to_string(),
            message: "http status 502".to_string(),
        },
    );
    assert!(table.view().last_error.is_some());

    let (table, effects) = update(
        table,
        Msg::ReloadRequested {
            scope: jobdeck_core::JobScope::All,
        },
    );
    assert!(table.view().last_error.is_none());
    assert_eq!(
        effects,
        vec![Effect::ListJobs {
            scope: jobdeck_core::JobScope::All
        }]
    );
}
