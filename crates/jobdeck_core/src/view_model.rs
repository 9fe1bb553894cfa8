use crate::{JobRow, TaskId};

/// Snapshot handed to the renderer after every mutating operation. The
/// engine knows nothing about presentation; this is the whole contract.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableViewModel {
    pub generation: u64,
    /// Total rows in the table, visible or not.
    pub job_count: usize,
    /// Rows passing both filter bits, in table order.
    pub visible: Vec<JobRowView>,
    pub selected_count: usize,
    pub last_error: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRowView {
    /// Index into the full table, stable until the next structural change.
    pub index: usize,
    pub task_id: TaskId,
    pub desc: String,
    pub owner: String,
    /// Status plus the result code when the server reported one.
    pub status_line: String,
    pub selected: bool,
    pub age_ms: u64,
    /// End minus start time, when the job has finished.
    pub runtime_ms: Option<i64>,
}

impl JobRowView {
    pub fn from_row(index: usize, row: &JobRow) -> Self {
        let job = &row.job;
        let desc = if job.desc.is_empty() {
            "-".to_string()
        } else {
            job.desc.clone()
        };
        let owner = if job.ownerid.is_empty() {
            "anonymous".to_string()
        } else {
            job.ownerid.clone()
        };
        let status_line = if job.res_code.is_empty() {
            job.status.to_string()
        } else {
            format!("{} / {}", job.status, job.res_code)
        };
        let runtime_ms = (job.endtime_ms >= job.starttime_ms && job.endtime_ms > 0)
            .then(|| job.endtime_ms - job.starttime_ms);
        Self {
            index,
            task_id: job.taskid.clone(),
            desc,
            owner,
            status_line,
            selected: row.flags.selected,
            age_ms: job.age_ms,
            runtime_ms,
        }
    }
}
