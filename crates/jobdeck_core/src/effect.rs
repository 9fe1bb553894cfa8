use crate::{JobScope, TaskId};

/// Remote work the driver must perform on the engine's behalf. Effects are
/// executed asynchronously; their outcomes come back as later messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ListJobs {
        scope: JobScope,
    },
    /// Fetch details for one batch of task ids. Emitted one batch at a
    /// time: the next batch is only requested from the handler of this
    /// one's response, bounding outstanding requests to one.
    FetchDetails {
        generation: u64,
        offset: usize,
        task_ids: Vec<TaskId>,
    },
    DeleteJobs {
        task_ids: Vec<TaskId>,
    },
    StopJobs {
        task_ids: Vec<TaskId>,
    },
    SubmitJob {
        name: String,
        bytes: Vec<u8>,
    },
    StartJob {
        task_id: TaskId,
    },
}
