//! Jobdeck client: async wire protocol to the remote job server.
mod api;
mod handle;
mod types;

pub use api::{ClientSettings, JobApi, ReqwestJobApi};
pub use handle::{ClientCommand, ClientEvent, ClientHandle};
pub use types::{ApiError, JobDetail};
