use std::io::BufRead;
use std::sync::mpsc;
use std::thread;

use anyhow::{bail, Result};
use jobdeck_client::{ClientHandle, ClientSettings};
use jobdeck_core::{update, JobScope, JobTable, Msg};

use crate::effects::EffectRunner;
use crate::input;
use crate::render;

/// Events merged into the single update loop: parsed terminal commands
/// and remote-request completions both arrive here.
pub enum AppEvent {
    Msg(Msg),
    Quit,
}

pub struct Options {
    pub server: String,
    pub userid: Option<String>,
    pub log_level: log::LevelFilter,
}

impl Options {
    pub fn from_args(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut server = None;
        let mut userid = None;
        let mut log_level = log::LevelFilter::Warn;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--server" | "-s" => server = args.next(),
                "--user" | "-u" => userid = args.next(),
                "--verbose" | "-v" => log_level = log::LevelFilter::Debug,
                "--help" | "-h" => {
                    println!("{}", USAGE);
                    std::process::exit(0);
                }
                other => bail!("unknown argument: {other}\n{USAGE}"),
            }
        }
        let Some(server) = server else {
            bail!("--server is required\n{USAGE}");
        };
        Ok(Self {
            server,
            userid,
            log_level,
        })
    }
}

const USAGE: &str = "\
Usage: jobdeck --server <url> [--user <userid>] [--verbose]

Mirrors the server's job table in the terminal. Type `help` at the
prompt for the interactive commands.";

pub fn run(options: Options) -> Result<()> {
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();

    let client = ClientHandle::new(ClientSettings {
        base_url: options.server.clone(),
        ..ClientSettings::default()
    })?;
    let runner = EffectRunner::new(client, options.userid.clone(), event_tx.clone());

    spawn_stdin_reader(event_tx.clone(), options.userid.clone());

    // Initial load for the configured scope.
    let scope = match &options.userid {
        Some(userid) => JobScope::Mine {
            userid: userid.clone(),
        },
        None => JobScope::All,
    };
    let _ = event_tx.send(AppEvent::Msg(Msg::ReloadRequested { scope }));

    let mut table = JobTable::new();
    while let Ok(event) = event_rx.recv() {
        match event {
            AppEvent::Msg(msg) => table = dispatch(table, msg, &runner),
            AppEvent::Quit => break,
        }
    }
    Ok(())
}

fn dispatch(table: JobTable, msg: Msg, runner: &EffectRunner) -> JobTable {
    let (mut table, effects) = update(table, msg);
    runner.run(effects);
    if table.consume_dirty() {
        deck_logging::set_table_generation(table.generation());
        render::render(&table.view());
    }
    table
}

fn spawn_stdin_reader(event_tx: mpsc::Sender<AppEvent>, userid: Option<String>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match input::parse_command(&line, userid.as_deref()) {
                Ok(Some(event)) => {
                    let quit = matches!(event, AppEvent::Quit);
                    if event_tx.send(event).is_err() || quit {
                        break;
                    }
                }
                Ok(None) => {}
                Err(message) => eprintln!("{message}"),
            }
        }
        // Stdin closed: shut the loop down.
        let _ = event_tx.send(AppEvent::Quit);
    });
}
