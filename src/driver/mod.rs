//! Update drivers: the only writers of the [`StateStore`](crate::state::StateStore).
//!
//! - [`server`]: HTTP endpoint the game client pushes snapshots to
//! - [`poller`]: reference-counted timer that pulls snapshots instead

pub mod poller;
pub mod server;

pub use poller::{poll_once, PollDriver, PollLease};
pub use server::{router, start_push_server};
