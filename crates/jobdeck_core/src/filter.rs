use crate::Job;

/// A row matches when every search substring occurs in at least one of
/// the searchable fields.
pub(crate) fn row_matches_text(substrs: &[&str], job: &Job) -> bool {
    let status = job.status.to_string();
    let fields = [
        job.desc.as_str(),
        job.ownerid.as_str(),
        job.taskid.as_str(),
        status.as_str(),
        job.res_code.as_str(),
        job.trm_code.as_str(),
    ];
    substrs.iter().all(|s| match_any(s, &fields))
}

fn match_any(needle: &str, fields: &[&str]) -> bool {
    fields.iter().any(|field| field.contains(needle))
}
