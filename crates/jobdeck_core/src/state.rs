use std::fmt;

use crate::filter;
use crate::view_model::{JobRowView, TableViewModel};

/// Server-assigned job identity token.
pub type TaskId = String;

/// Number of task ids requested per detail-fetch batch.
pub const DETAIL_BATCH: usize = 30;

/// Which slice of the remote queue a reload targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobScope {
    /// Jobs owned by one user.
    Mine { userid: String },
    /// Every job known to the server.
    All,
}

/// Job lifecycle status as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum JobStatus {
    Submitted,
    Running,
    Succeeded,
    Failed,
    Stopped,
    Finished,
    /// Detail fields not yet fetched for this row.
    #[default]
    Unknown,
    /// Status string the client does not recognize; kept verbatim.
    Other(String),
}

impl JobStatus {
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "submitted" => JobStatus::Submitted,
            "running" => JobStatus::Running,
            "succeeded" => JobStatus::Succeeded,
            "failed" => JobStatus::Failed,
            "stopped" => JobStatus::Stopped,
            "finished" => JobStatus::Finished,
            "" => JobStatus::Unknown,
            _ => JobStatus::Other(s.to_string()),
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Submitted => write!(f, "submitted"),
            JobStatus::Running => write!(f, "running"),
            JobStatus::Succeeded => write!(f, "succeeded"),
            JobStatus::Failed => write!(f, "failed"),
            JobStatus::Stopped => write!(f, "stopped"),
            JobStatus::Finished => write!(f, "finished"),
            JobStatus::Unknown => write!(f, "-"),
            JobStatus::Other(s) => write!(f, "{s}"),
        }
    }
}

/// One remote job as mirrored locally. Identity is `taskid`; every other
/// field is overwritten whenever fresh details arrive.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Job {
    pub taskid: TaskId,
    pub ownerid: String,
    pub desc: String,
    pub submit_addr: String,
    pub status: JobStatus,
    /// Elapsed milliseconds since the job was created, as of the last reload.
    pub age_ms: u64,
    pub starttime_ms: i64,
    pub endtime_ms: i64,
    pub res_code: String,
    pub trm_code: String,
}

impl Job {
    /// A placeholder record known only by its taskid, awaiting details.
    pub fn bare(taskid: TaskId) -> Self {
        Self {
            taskid,
            ..Self::default()
        }
    }
}

/// Per-row booleans. A row is visible iff both filter bits are set;
/// the text and date predicates are tracked independently so editing
/// one search box never re-evaluates the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowFlags {
    pub selected: bool,
    pub text_match: bool,
    pub date_match: bool,
}

impl Default for RowFlags {
    fn default() -> Self {
        Self {
            selected: false,
            text_match: true,
            date_match: true,
        }
    }
}

impl RowFlags {
    pub fn visible(&self) -> bool {
        self.text_match && self.date_match
    }
}

/// A job together with its flags. Keeping flags inline (rather than in a
/// parallel array) makes the row/flag length invariant structural.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRow {
    pub job: Job,
    pub flags: RowFlags,
}

impl JobRow {
    pub fn new(job: Job) -> Self {
        Self {
            job,
            flags: RowFlags::default(),
        }
    }

    pub fn bare(taskid: TaskId) -> Self {
        Self::new(Job::bare(taskid))
    }
}

/// The client-side mirror of the remote job list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobTable {
    rows: Vec<JobRow>,
    /// Bumped on every wholesale load; responses carrying an older value
    /// are dropped by the update function.
    generation: u64,
    last_error: Option<String>,
    dirty: bool,
}

impl JobTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn job_count(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[JobRow] {
        &self.rows
    }

    /// Rows currently passing both filters, with their table indices.
    /// Recomputed fresh from the flags on every call.
    pub fn visible_rows(&self) -> impl Iterator<Item = (usize, &JobRow)> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.flags.visible())
    }

    pub fn selected_task_ids(&self) -> Vec<TaskId> {
        self.rows
            .iter()
            .filter(|row| row.flags.selected)
            .map(|row| row.job.taskid.clone())
            .collect()
    }

    pub fn view(&self) -> TableViewModel {
        let visible: Vec<JobRowView> = self
            .visible_rows()
            .map(|(index, row)| JobRowView::from_row(index, row))
            .collect();
        TableViewModel {
            generation: self.generation,
            job_count: self.rows.len(),
            selected_count: self.rows.iter().filter(|r| r.flags.selected).count(),
            visible,
            last_error: self.last_error.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns and clears the dirty bit. The driver renders only when
    /// this reports true, coalescing renders between events.
    pub fn consume_dirty(&mut self) -> bool {
        let was = self.dirty;
        self.dirty = false;
        was
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Replace the table with bare rows for `task_ids`, resetting every
    /// flag to default and invalidating in-flight detail responses.
    pub(crate) fn load_all(&mut self, task_ids: Vec<TaskId>) {
        self.rows = task_ids.into_iter().map(JobRow::bare).collect();
        self.generation += 1;
        self.last_error = None;
        self.mark_dirty();
    }

    /// Append one optimistic local row (used right after a submit, before
    /// the next reload confirms it).
    pub(crate) fn append(&mut self, job: Job) {
        self.rows.push(JobRow::new(job));
        self.mark_dirty();
    }

    /// Overwrite mutable fields for a fetched batch starting at `offset`.
    /// Each detail entry is matched against the taskid at its expected
    /// offset; a mismatch (list mutated since the request went out) skips
    /// that entry. Returns how many rows were updated.
    pub(crate) fn apply_details(&mut self, offset: usize, details: Vec<Job>) -> usize {
        let mut applied = 0;
        for (k, detail) in details.into_iter().enumerate() {
            let Some(row) = self.rows.get_mut(offset + k) else {
                break;
            };
            if row.job.taskid != detail.taskid {
                continue;
            }
            row.job = detail;
            applied += 1;
        }
        if applied > 0 {
            self.mark_dirty();
        }
        applied
    }

    /// Re-evaluate the text predicate for every row. Empty input marks
    /// all rows matching. Date bits are not touched.
    pub(crate) fn apply_text_filter(&mut self, input: &str) {
        let substrs: Vec<&str> = input.split_whitespace().collect();
        for row in &mut self.rows {
            row.flags.text_match = substrs.is_empty() || filter::row_matches_text(&substrs, &row.job);
        }
        self.mark_dirty();
    }

    /// Mark rows whose wall-clock creation time, computed as `now - age`
    /// at evaluation time, falls within `[start_ms, end_ms]` inclusive.
    /// Text bits are not touched.
    pub(crate) fn apply_date_filter(&mut self, start_ms: i64, end_ms: i64, now_ms: i64) {
        for row in &mut self.rows {
            let jobtime = now_ms - row.job.age_ms as i64;
            row.flags.date_match = jobtime >= start_ms && jobtime <= end_ms;
        }
        self.mark_dirty();
    }

    pub(crate) fn clear_date_filter(&mut self) {
        for row in &mut self.rows {
            row.flags.date_match = true;
        }
        self.mark_dirty();
    }

    /// Set or flip one row's selected bit. Out-of-range indices are ignored.
    pub(crate) fn toggle_select(&mut self, index: usize, value: Option<bool>) {
        if let Some(row) = self.rows.get_mut(index) {
            row.flags.selected = value.unwrap_or(!row.flags.selected);
            self.mark_dirty();
        }
    }

    /// Set the selected bit uniformly, but only on rows currently passing
    /// both filters. Hidden rows keep their selection state.
    pub(crate) fn select_visible(&mut self, selected: bool) {
        for row in &mut self.rows {
            if row.flags.visible() {
                row.flags.selected = selected;
            }
        }
        self.mark_dirty();
    }

    /// Stable in-place compaction: remove exactly the rows whose taskid is
    /// in `task_ids`, preserving the relative order of survivors.
    pub(crate) fn remove_by_taskid(&mut self, task_ids: &[TaskId]) {
        self.rows
            .retain(|row| !task_ids.contains(&row.job.taskid));
        self.mark_dirty();
    }

    /// Mark the named rows stopped and drop their selection. Rows are
    /// matched by taskid, not index, and are not removed.
    pub(crate) fn mark_stopped(&mut self, task_ids: &[TaskId]) {
        for row in &mut self.rows {
            if task_ids.contains(&row.job.taskid) {
                row.job.status = JobStatus::Stopped;
                row.flags.selected = false;
            }
        }
        self.mark_dirty();
    }

    pub(crate) fn set_error(&mut self, op: &str, message: &str) {
        self.last_error = Some(format!("{op}: {message}"));
        self.mark_dirty();
    }

    pub(crate) fn clear_error(&mut self) {
        if self.last_error.take().is_some() {
            self.mark_dirty();
        }
    }
}
