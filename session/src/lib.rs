//! Persistence and play sessions for two-stars boards.
//!
//! [`Storage`] is the key-value capability everything is written through;
//! [`GameStateStore`] keeps per-board records and a status index in it, and
//! [`Session`] drives one [`twostars_core::Game`] with debounced saving.

pub use backend::*;
pub use controller::*;
pub use debounce::*;
pub use record::*;
pub use storage::*;
pub use store::*;

mod backend;
mod controller;
mod debounce;
mod record;
mod storage;
mod store;
