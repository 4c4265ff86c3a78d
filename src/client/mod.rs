//! Client side of the directory: fetching one library and presenting it.

pub mod api;
pub mod detail;

pub use api::{ClientError, ClientResult, LibrariesClient};
pub use detail::{DetailView, FetchTicket, LoadState};
