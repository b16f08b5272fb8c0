//! # Core Application Logic
//!
//! Nur's reading and study logic. Nothing here knows about terminals.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │                         │
//!                    │  • State (view data)    │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │    api     │      │ inference  │
//!     │ (ratatui)  │      │ quran/hadith│     │ gemini/    │
//!     │            │      │            │      │ ollama     │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all view state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`model`]: Chapters, verses, narrations, collections
//! - [`catalog`]: The fixed collection and resource lists
//! - [`segment`]: Sentence splitting for fragment insights
//! - [`config`]: Config file and environment resolution

pub mod action;
pub mod catalog;
pub mod config;
pub mod model;
pub mod segment;
pub mod state;

pub use action::{Action, Effect, update};
pub use state::App;
