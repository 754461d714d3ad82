//! Connectivity commands: status, retry, publish.

mod publish;
mod retry;
mod status;

pub use publish::handle_publish;
pub use retry::handle_retry;
pub use status::handle_status;
