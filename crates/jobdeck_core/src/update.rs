use crate::state::DETAIL_BATCH;
use crate::{daterange, Effect, Job, JobStatus, JobTable, Msg};

/// Pure update function: applies a message to the table and returns any
/// effects the driver must run. All remote I/O happens outside; responses
/// re-enter as later messages.
pub fn update(mut table: JobTable, msg: Msg) -> (JobTable, Vec<Effect>) {
    let effects = match msg {
        Msg::ReloadRequested { scope } => {
            table.clear_error();
            vec![Effect::ListJobs { scope }]
        }
        Msg::JobIdsLoaded { task_ids } => {
            table.load_all(task_ids);
            next_detail_batch(&table, 0).into_iter().collect()
        }
        Msg::DetailsFetched {
            generation,
            offset,
            details,
        } => {
            if generation != table.generation() {
                // Response from a superseded load; the rows it was meant
                // for no longer exist.
                Vec::new()
            } else {
                table.apply_details(offset, details);
                next_detail_batch(&table, offset + DETAIL_BATCH)
                    .into_iter()
                    .collect()
            }
        }
        Msg::TextFilterChanged(input) => {
            table.apply_text_filter(&input);
            Vec::new()
        }
        Msg::DateFilterChanged { input, now } => {
            let trimmed = input.trim();
            if trimmed.is_empty() {
                table.clear_date_filter();
            } else if let Some((start_ms, end_ms)) = daterange::parse_range_expr(trimmed, now) {
                table.apply_date_filter(start_ms, end_ms, now.timestamp_millis());
            }
            // Unparseable input keeps the previous date bits so a typo
            // never degrades to "show everything".
            Vec::new()
        }
        Msg::ToggleSelect { index, value } => {
            table.toggle_select(index, value);
            Vec::new()
        }
        Msg::SelectAll => {
            table.select_visible(true);
            Vec::new()
        }
        Msg::SelectNone => {
            table.select_visible(false);
            Vec::new()
        }
        Msg::DeleteSelectedRequested => {
            let task_ids = table.selected_task_ids();
            if task_ids.is_empty() {
                Vec::new()
            } else {
                vec![Effect::DeleteJobs { task_ids }]
            }
        }
        Msg::JobsDeleted { task_ids } => {
            table.remove_by_taskid(&task_ids);
            Vec::new()
        }
        Msg::StopSelectedRequested => {
            let task_ids = table.selected_task_ids();
            if task_ids.is_empty() {
                Vec::new()
            } else {
                vec![Effect::StopJobs { task_ids }]
            }
        }
        Msg::JobsStopped { task_ids } => {
            table.mark_stopped(&task_ids);
            Vec::new()
        }
        Msg::SubmitRequested { name, bytes } => {
            vec![Effect::SubmitJob { name, bytes }]
        }
        Msg::JobSubmitted {
            task_id,
            name,
            ownerid,
            now,
        } => {
            table.append(Job {
                taskid: task_id.clone(),
                ownerid,
                desc: name,
                submit_addr: "-".to_string(),
                status: JobStatus::Submitted,
                age_ms: 0,
                starttime_ms: now.timestamp_millis(),
                endtime_ms: 0,
                res_code: String::new(),
                trm_code: String::new(),
            });
            vec![Effect::StartJob { task_id }]
        }
        Msg::RequestFailed { op, message } => {
            table.set_error(&op, &message);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (table, effects)
}

/// The detail-fetch effect for the batch starting at `offset`, or `None`
/// once the whole table is covered.
fn next_detail_batch(table: &JobTable, offset: usize) -> Option<Effect> {
    if offset >= table.job_count() {
        return None;
    }
    let end = (offset + DETAIL_BATCH).min(table.job_count());
    let task_ids = table.rows()[offset..end]
        .iter()
        .map(|row| row.job.taskid.clone())
        .collect();
    Some(Effect::FetchDetails {
        generation: table.generation(),
        offset,
        task_ids,
    })
}
