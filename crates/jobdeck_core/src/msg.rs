use chrono::{DateTime, Utc};

use crate::{Job, JobScope, TaskId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User asked for a (re)load of the job list for a scope.
    ReloadRequested { scope: JobScope },
    /// The server answered a list request with bare task ids.
    JobIdsLoaded { task_ids: Vec<TaskId> },
    /// One detail batch arrived. `generation` is echoed from the effect
    /// that requested it so stale responses can be dropped.
    DetailsFetched {
        generation: u64,
        offset: usize,
        details: Vec<Job>,
    },
    /// User edited the free-text search box.
    TextFilterChanged(String),
    /// User edited the date search box. `now` is captured by the caller
    /// so the update function stays clock-free.
    DateFilterChanged { input: String, now: DateTime<Utc> },
    /// User ticked or unticked one row; `None` flips the current state.
    ToggleSelect { index: usize, value: Option<bool> },
    /// Select every row passing both filters.
    SelectAll,
    /// Deselect every row passing both filters.
    SelectNone,
    /// User clicked delete-selected.
    DeleteSelectedRequested,
    /// The server confirmed which jobs were deleted.
    JobsDeleted { task_ids: Vec<TaskId> },
    /// User clicked stop-selected.
    StopSelectedRequested,
    /// The server confirmed which jobs were stopped.
    JobsStopped { task_ids: Vec<TaskId> },
    /// User submitted a problem file for a new job.
    SubmitRequested { name: String, bytes: Vec<u8> },
    /// The server accepted a submission; append an optimistic row.
    JobSubmitted {
        task_id: TaskId,
        name: String,
        ownerid: String,
        now: DateTime<Utc>,
    },
    /// A remote request failed; shown to the user, state otherwise kept.
    RequestFailed { op: String, message: String },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
