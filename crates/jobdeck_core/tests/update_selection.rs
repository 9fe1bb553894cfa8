use std::sync::Once;

use jobdeck_core::{update, Effect, Job, JobStatus, JobTable, Msg};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(deck_logging::initialize_for_tests);
}

/// A table of four fully-detailed jobs: A, B, C, D.
fn loaded_table() -> JobTable {
    let ids: Vec<String> = ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect();
    let (table, _) = update(JobTable::new(), Msg::JobIdsLoaded { task_ids: ids.clone() });
    let details: Vec<Job> = ids
        .into_iter()
        .map(|taskid| Job {
            desc: format!("job {taskid}"),
            taskid,
            ownerid: "alice".to_string(),
            status: JobStatus::Running,
            age_ms: 5_000,
            ..Job::default()
        })
        .collect();
    let generation = table.generation();
    let (table, _) = update(
        table,
        Msg::DetailsFetched {
            generation,
            offset: 0,
            details,
        },
    );
    table
}

fn select(table: JobTable, index: usize) -> JobTable {
    let (table, _) = update(
        table,
        Msg::ToggleSelect {
            index,
            value: Some(true),
        },
    );
    table
}

#[test]
fn toggle_select_flips_and_sets() {
    init_logging();
    let table = loaded_table();

    let (table, _) = update(table, Msg::ToggleSelect { index: 1, value: None });
    assert!(table.rows()[1].flags.selected);

    let (table, _) = update(table, Msg::ToggleSelect { index: 1, value: None });
    assert!(!table.rows()[1].flags.selected);

    // Out-of-range index is ignored.
    let (table, effects) = update(
        table,
        Msg::ToggleSelect {
            index: 99,
            value: Some(true),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(table.selected_task_ids(), Vec::<String>::new());
}

#[test]
fn select_all_only_touches_rows_passing_both_filters() {
    init_logging();
    let table = loaded_table();
    // Hide everything except "job B".
    let (table, _) = update(table, Msg::TextFilterChanged("B".to_string()));

    let (table, _) = update(table, Msg::SelectAll);
    assert_eq!(table.selected_task_ids(), vec!["B".to_string()]);

    // Clearing the filter reveals the others, still unselected.
    let (table, _) = update(table, Msg::TextFilterChanged(String::new()));
    assert_eq!(table.selected_task_ids(), vec!["B".to_string()]);

    // SelectNone is also restricted to visible rows: hide B again and
    // deselect; B stays selected because it is filtered out now.
    let (table, _) = update(table, Msg::TextFilterChanged("A".to_string()));
    let (table, _) = update(table, Msg::SelectNone);
    assert_eq!(table.selected_task_ids(), vec!["B".to_string()]);
}

#[test]
fn delete_selected_requests_exactly_the_selected_taskids() {
    init_logging();
    let table = loaded_table();
    let table = select(table, 0);
    let table = select(table, 2);

    let (_, effects) = update(table, Msg::DeleteSelectedRequested);
    assert_eq!(
        effects,
        vec![Effect::DeleteJobs {
            task_ids: vec!["A".to_string(), "C".to_string()],
        }]
    );
}

#[test]
fn delete_with_nothing_selected_is_a_noop() {
    init_logging();
    let (_, effects) = update(loaded_table(), Msg::DeleteSelectedRequested);
    assert!(effects.is_empty());
}

#[test]
fn deletion_compacts_in_place_preserving_order() {
    init_logging();
    let table = loaded_table();

    let (table, _) = update(
        table,
        Msg::JobsDeleted {
            task_ids: vec!["B".to_string(), "D".to_string()],
        },
    );

    let remaining: Vec<&str> = table.rows().iter().map(|r| r.job.taskid.as_str()).collect();
    assert_eq!(remaining, vec!["A", "C"]);
    // Flags travel with their rows; the view agrees on the count.
    assert_eq!(table.view().job_count, 2);
}

#[test]
fn stop_marks_rows_stopped_without_removing_them() {
    init_logging();
    let table = loaded_table();
    let table = select(table, 1);
    let table = select(table, 3);

    let (table, effects) = update(table, Msg::StopSelectedRequested);
    assert_eq!(
        effects,
        vec![Effect::StopJobs {
            task_ids: vec!["B".to_string(), "D".to_string()],
        }]
    );

    let (table, _) = update(
        table,
        Msg::JobsStopped {
            task_ids: vec!["B".to_string(), "D".to_string()],
        },
    );

    assert_eq!(table.job_count(), 4);
    assert_eq!(table.rows()[1].job.status, JobStatus::Stopped);
    assert_eq!(table.rows()[3].job.status, JobStatus::Stopped);
    assert_eq!(table.rows()[0].job.status, JobStatus::Running);
    // Stopped rows lose their selection.
    assert_eq!(table.selected_task_ids(), Vec::<String>::new());
}
