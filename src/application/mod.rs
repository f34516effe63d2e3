pub mod dashboard;
pub mod debounce;
pub mod error;
pub mod filters;
pub mod mutations;
pub mod notify;
pub mod pagination;
pub mod query;
pub mod session;
pub mod state;

pub use session::AdminClient;
