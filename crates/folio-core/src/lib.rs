//! Folio core library — domain logic for the portfolio backend.
//!
//! `folio-core` holds everything that does not depend on HTTP: the login
//! attempt throttle, the guestbook and user records, and the storage
//! abstraction they are kept behind. The `folio-web` crate wires these
//! into an axum server.
//!
//! # Modules
//!
//! - [`throttle`] — [`LoginThrottle`]: per-client failed-login counting and temporary blocking.
//! - [`model`] — [`User`], [`Comment`] and their creation inputs.
//! - [`storage`] — the [`Storage`] trait and the in-memory [`MemStorage`].
//! - [`error`] — Unified error type ([`CoreError`]) and result alias ([`CoreResult`]).

pub mod error;
pub mod model;
pub mod storage;
pub mod throttle;

pub use error::{CoreError, CoreResult};
pub use model::{Comment, NewComment, NewUser, User};
pub use storage::{MemStorage, Storage};
pub use throttle::{
    AttemptRecord, Clock, FailureOutcome, LoginThrottle, SystemClock, ThrottlePolicy,
};
