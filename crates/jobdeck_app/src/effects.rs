use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use chrono::Utc;
use deck_logging::deck_info;
use jobdeck_client::{ClientCommand, ClientEvent, ClientHandle, JobDetail};
use jobdeck_core::{Effect, Job, JobScope, JobStatus, Msg};

use crate::app::AppEvent;

/// Executes engine effects against the remote client and pumps request
/// completions back into the update loop as messages.
pub struct EffectRunner {
    cmd_tx: mpsc::Sender<ClientCommand>,
}

impl EffectRunner {
    pub fn new(
        client: ClientHandle,
        userid: Option<String>,
        event_tx: mpsc::Sender<AppEvent>,
    ) -> Self {
        let cmd_tx = client.command_sender();
        spawn_event_pump(client, userid, event_tx);
        Self { cmd_tx }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            let command = match effect {
                Effect::ListJobs { scope } => {
                    let owner = match scope {
                        JobScope::Mine { userid } => Some(userid),
                        JobScope::All => None,
                    };
                    ClientCommand::ListJobs { owner }
                }
                Effect::FetchDetails {
                    generation,
                    offset,
                    task_ids,
                } => ClientCommand::FetchDetails {
                    generation,
                    offset,
                    task_ids,
                },
                Effect::DeleteJobs { task_ids } => ClientCommand::DeleteJobs { task_ids },
                Effect::StopJobs { task_ids } => ClientCommand::StopJobs { task_ids },
                Effect::SubmitJob { name, bytes } => {
                    deck_info!("submitting {} ({} bytes)", name, bytes.len());
                    ClientCommand::SubmitJob { name, bytes }
                }
                Effect::StartJob { task_id } => ClientCommand::StartJob { task_id },
            };
            let _ = self.cmd_tx.send(command);
        }
    }
}

fn spawn_event_pump(
    client: ClientHandle,
    userid: Option<String>,
    event_tx: mpsc::Sender<AppEvent>,
) {
    thread::spawn(move || loop {
        let Some(event) = client.try_recv() else {
            thread::sleep(Duration::from_millis(25));
            continue;
        };
        if let Some(msg) = msg_for_event(event, userid.as_deref()) {
            if event_tx.send(AppEvent::Msg(msg)).is_err() {
                break;
            }
        }
    });
}

fn msg_for_event(event: ClientEvent, userid: Option<&str>) -> Option<Msg> {
    match event {
        ClientEvent::JobIdsListed { task_ids } => Some(Msg::JobIdsLoaded { task_ids }),
        ClientEvent::DetailsFetched {
            generation,
            offset,
            details,
        } => Some(Msg::DetailsFetched {
            generation,
            offset,
            details: details.into_iter().map(job_from_detail).collect(),
        }),
        ClientEvent::JobsDeleted { task_ids } => Some(Msg::JobsDeleted { task_ids }),
        ClientEvent::JobsStopped { task_ids } => Some(Msg::JobsStopped { task_ids }),
        ClientEvent::JobSubmitted { name, task_id } => Some(Msg::JobSubmitted {
            task_id,
            name,
            ownerid: userid.unwrap_or_default().to_string(),
            now: Utc::now(),
        }),
        ClientEvent::JobStarted { task_id } => {
            deck_info!("job {} started", task_id);
            None
        }
        ClientEvent::RequestFailed { op, error } => Some(Msg::RequestFailed {
            op: op.to_string(),
            message: error.to_string(),
        }),
    }
}

fn job_from_detail(detail: JobDetail) -> Job {
    Job {
        taskid: detail.taskid,
        ownerid: detail.ownerid,
        desc: detail.desc,
        submit_addr: detail.submit_addr,
        status: JobStatus::parse(&detail.status),
        age_ms: detail.age_ms,
        starttime_ms: detail.starttime_ms,
        endtime_ms: detail.endtime_ms,
        res_code: detail.res_code,
        trm_code: detail.trm_code,
    }
}
