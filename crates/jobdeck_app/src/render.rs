use chrono::{TimeDelta, Utc};
use jobdeck_core::TableViewModel;

/// Print the visible slice of the job table. Presentation only; every
/// decision about which rows appear was made by the engine.
pub fn render(view: &TableViewModel) {
    println!();
    if view.visible.is_empty() {
        println!("  (no entries)");
    } else {
        println!(
            "  {:>4}  {:1}  {:<24} {:<12} {:<20} {:<17} {:>9}",
            "row", "", "taskid", "owner", "status", "submitted", "runtime"
        );
        let now = Utc::now();
        for row in &view.visible {
            let submitted = now - TimeDelta::milliseconds(row.age_ms as i64);
            println!(
                "  {:>4}  {:1}  {:<24} {:<12} {:<20} {:<17} {:>9}  {}",
                row.index,
                if row.selected { "*" } else { "" },
                row.task_id,
                row.owner,
                row.status_line,
                submitted.format("%Y-%m-%d %H:%M"),
                row.runtime_ms.map_or("-".to_string(), fmt_runtime),
                row.desc,
            );
        }
    }
    println!(
        "  {} of {} jobs shown, {} selected",
        view.visible.len(),
        view.job_count,
        view.selected_count
    );
    if let Some(error) = &view.last_error {
        println!("  last request failed: {error}");
    }
}

fn fmt_runtime(ms: i64) -> String {
    let secs = ms / 1000;
    if secs >= 3600 {
        format!("{}h{:02}m{:02}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    } else if secs >= 60 {
        format!("{}m{:02}s", secs / 60, secs % 60)
    } else {
        format!("{secs}s")
    }
}
