//! Jobdeck core: pure job-table state engine and view-model helpers.
mod daterange;
mod effect;
mod filter;
mod msg;
mod state;
mod update;
mod view_model;

pub use daterange::parse_range_expr;
pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    Job, JobRow, JobScope, JobStatus, JobTable, RowFlags, TaskId, DETAIL_BATCH,
};
pub use update::update;
pub use view_model::{JobRowView, TableViewModel};
