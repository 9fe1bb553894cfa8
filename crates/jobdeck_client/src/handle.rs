use std::sync::{mpsc, Arc};
use std::thread;

use deck_logging::{deck_debug, deck_warn};

use crate::api::{ClientSettings, JobApi, ReqwestJobApi};
use crate::types::{ApiError, JobDetail};

/// One remote request, as queued by the driver.
#[derive(Debug, Clone)]
pub enum ClientCommand {
    ListJobs {
        owner: Option<String>,
    },
    FetchDetails {
        generation: u64,
        offset: usize,
        task_ids: Vec<String>,
    },
    DeleteJobs {
        task_ids: Vec<String>,
    },
    StopJobs {
        task_ids: Vec<String>,
    },
    SubmitJob {
        name: String,
        bytes: Vec<u8>,
    },
    StartJob {
        task_id: String,
    },
}

/// Completion of a remote request, delivered as a later event.
#[derive(Debug)]
pub enum ClientEvent {
    JobIdsListed {
        task_ids: Vec<String>,
    },
    DetailsFetched {
        generation: u64,
        offset: usize,
        details: Vec<JobDetail>,
    },
    JobsDeleted {
        task_ids: Vec<String>,
    },
    JobsStopped {
        task_ids: Vec<String>,
    },
    JobSubmitted {
        name: String,
        task_id: String,
    },
    JobStarted {
        task_id: String,
    },
    RequestFailed {
        op: &'static str,
        error: ApiError,
    },
}

/// Owns a background thread with a tokio runtime. Commands go in over a
/// channel, completions come back as [`ClientEvent`]s. Requests are not
/// cancelable; a stale completion is dropped by the engine instead.
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
    event_rx: mpsc::Receiver<ClientEvent>,
}

impl ClientHandle {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let api = Arc::new(ReqwestJobApi::new(settings)?);
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel::<ClientEvent>();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(api.as_ref(), command, event_tx).await;
                });
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn send(&self, command: ClientCommand) {
        let _ = self.cmd_tx.send(command);
    }

    /// A clonable sender for queueing commands from another thread while
    /// this handle (and its event receiver) lives on the pump thread.
    pub fn command_sender(&self) -> mpsc::Sender<ClientCommand> {
        self.cmd_tx.clone()
    }

    pub fn try_recv(&self) -> Option<ClientEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn handle_command(
    api: &dyn JobApi,
    command: ClientCommand,
    event_tx: mpsc::Sender<ClientEvent>,
) {
    let event = match command {
        ClientCommand::ListJobs { owner } => {
            deck_debug!("list-jobs owner={:?}", owner);
            match api.list_job_ids(owner.as_deref()).await {
                Ok(task_ids) => ClientEvent::JobIdsListed { task_ids },
                Err(error) => failed("list-jobs", error),
            }
        }
        ClientCommand::FetchDetails {
            generation,
            offset,
            task_ids,
        } => {
            deck_debug!(
                "fetch-details generation={} offset={} count={}",
                generation,
                offset,
                task_ids.len()
            );
            match api.fetch_job_details(&task_ids).await {
                Ok(details) => ClientEvent::DetailsFetched {
                    generation,
                    offset,
                    details,
                },
                Err(error) => failed("job-info", error),
            }
        }
        ClientCommand::DeleteJobs { task_ids } => match api.delete_jobs(&task_ids).await {
            Ok(task_ids) => ClientEvent::JobsDeleted { task_ids },
            Err(error) => failed("delete-jobs", error),
        },
        ClientCommand::StopJobs { task_ids } => match api.stop_jobs(&task_ids).await {
            Ok(task_ids) => ClientEvent::JobsStopped { task_ids },
            Err(error) => failed("stop-jobs", error),
        },
        ClientCommand::SubmitJob { name, bytes } => match api.submit_job(&name, bytes).await {
            Ok(task_id) => ClientEvent::JobSubmitted { name, task_id },
            Err(error) => failed("submit", error),
        },
        ClientCommand::StartJob { task_id } => match api.start_job(&task_id).await {
            Ok(()) => ClientEvent::JobStarted { task_id },
            Err(error) => failed("solve-background", error),
        },
    };
    let _ = event_tx.send(event);
}

fn failed(op: &'static str, error: ApiError) -> ClientEvent {
    deck_warn!("request {} failed: {}", op, error);
    ClientEvent::RequestFailed { op, error }
}
