//! # colleague-match
//!
//! A drag-and-drop matching game: photos of colleagues are matched against
//! short text descriptions within a time limit, backed by a CRUD editor and
//! a REST service for the colleague records.
//!
//! ## Architecture
//!
//! - **Store -> Game**: the session initializes from the fetched roster.
//! - **Editor -> Store -> re-fetch**: saves round-trip through the store
//!   and re-initialize the session; nothing is mutated optimistically.
//! - **Pure game core**: the session is a state machine with no I/O; the
//!   countdown is an explicitly cancellable task owned by the composition
//!   layer, and a session epoch keeps stale ticks inert.
//!
//! ## Modules
//!
//! - `core`: colleague records, description cards, shuffle RNG
//! - `game`: the session state machine and countdown timer
//! - `editor`: form-driven create/edit of colleague records
//! - `store`: SQLite persistence for the colleague table
//! - `server`: REST surface over the store
//! - `app`: composition layer wiring store, session, and editor
//! - `config`: environment-driven configuration

pub mod app;
pub mod config;
pub mod core;
pub mod editor;
pub mod game;
pub mod server;
pub mod store;

// Re-export commonly used types
pub use crate::app::{App, View};
pub use crate::config::Config;
pub use crate::core::{Colleague, ColleagueDraft, ColleagueId, DescriptionCard, GameRng};
pub use crate::editor::{ColleagueEditor, ColleagueSave};
pub use crate::game::{lock_session, Countdown, GameSession, Phase, SessionConfig, SharedSession};
pub use crate::store::ColleagueStore;
