//! `kerala-session`
//!
//! **Responsibility:** persisted seller session and the gate that decides
//! auth stack vs. main stack.
//!
//! This crate provides:
//! - The `Session` DTO and the canonical storage key set
//! - A `SessionStore` key-value trait with in-memory and SQLite backends
//! - The `SessionGate`: cold-start resolution, synchronous login flip,
//!   logout purge, and the global 401 teardown entry point
//!
//! Tokens are opaque here. The client never validates signature or expiry
//! locally; invalidity is discovered reactively when a request returns 401.

pub mod gate;
pub mod session;
pub mod store;

pub use gate::{GateState, SessionGate};
pub use session::{SellerProfile, Session, UserType, keys};
pub use store::{MemoryStore, SessionStore, SqliteStore, StoreError};
