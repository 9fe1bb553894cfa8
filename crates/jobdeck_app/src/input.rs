use std::path::Path;

use chrono::Utc;
use jobdeck_core::{JobScope, Msg};

use crate::app::AppEvent;

const HELP: &str = "\
Commands:
  reload            reload the job table (your jobs, or all without --user)
  reload all        reload every job on the server
  filter [text]     free-text filter; no argument clears it
  date [expr]       date filter, e.g. 2017-06-04, jun 4, 3 days ago, a..b
  select <n>        select row n (as numbered in the table)
  unselect <n>      deselect row n
  toggle <n>        flip row n's selection
  all / none        select or deselect every visible row
  delete            delete the selected jobs on the server
  stop              stop the selected jobs on the server
  submit <path>     upload a problem file as a new job
  help              show this text
  quit              exit";

/// Turn one terminal line into an event. `Ok(None)` means the line was
/// handled locally (help, blank input); `Err` carries a message for the
/// user.
pub fn parse_command(line: &str, userid: Option<&str>) -> Result<Option<AppEvent>, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let msg = match word {
        "" => return Ok(None),
        "help" => {
            println!("{HELP}");
            return Ok(None);
        }
        "quit" | "exit" => return Ok(Some(AppEvent::Quit)),
        "reload" => {
            let scope = match (rest, userid) {
                ("all", _) | (_, None) => JobScope::All,
                (_, Some(userid)) => JobScope::Mine {
                    userid: userid.to_string(),
                },
            };
            Msg::ReloadRequested { scope }
        }
        "filter" => Msg::TextFilterChanged(rest.to_string()),
        "date" => Msg::DateFilterChanged {
            input: rest.to_string(),
            now: Utc::now(),
        },
        "select" => Msg::ToggleSelect {
            index: parse_index(rest)?,
            value: Some(true),
        },
        "unselect" => Msg::ToggleSelect {
            index: parse_index(rest)?,
            value: Some(false),
        },
        "toggle" => Msg::ToggleSelect {
            index: parse_index(rest)?,
            value: None,
        },
        "all" => Msg::SelectAll,
        "none" => Msg::SelectNone,
        "delete" => Msg::DeleteSelectedRequested,
        "stop" => Msg::StopSelectedRequested,
        "submit" => {
            if rest.is_empty() {
                return Err("usage: submit <path>".to_string());
            }
            let name = Path::new(rest)
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or(rest)
                .to_string();
            let bytes =
                std::fs::read(rest).map_err(|err| format!("cannot read {rest}: {err}"))?;
            Msg::SubmitRequested { name, bytes }
        }
        other => return Err(format!("unknown command: {other} (try `help`)")),
    };
    Ok(Some(AppEvent::Msg(msg)))
}

fn parse_index(rest: &str) -> Result<usize, String> {
    rest.parse()
        .map_err(|_| format!("expected a row number, got `{rest}`"))
}
