//! Parley is a terminal chat shell for a local agent backend.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns session state: the observable theme store, input history,
//!   streaming and connectivity state, and the backend round trip.
//! - [`ui`] renders the terminal interface and runs the interactive event loop.
//! - [`commands`] implements slash-command parsing and dispatch.
//! - [`api`] defines the backend request and reply payloads.
//!
//! The binary (`src/main.rs`) routes through [`crate::cli::main`], which
//! resolves settings and dispatches into [`ui::chat_loop`] for interactive
//! sessions.

pub mod api;
pub mod cli;
pub mod commands;
pub mod core;
pub mod ui;
pub mod utils;
