//! Terminal UI layer for the chat shell.
//!
//! - [`chat_loop`]: the event loop that feeds keys to [`crate::core::app::App`]
//!   and hands prompts to the backend.
//! - [`renderer`]: one frame of banner, transcript, status line, and input.
//! - [`theme`] and [`builtin_themes`]: style data; [`banner`]: banner palettes.
//!
//! Ownership boundary: this layer presents and captures interaction state, while
//! [`crate::core`] owns session state and backend coordination.

pub mod banner;
pub mod builtin_themes;
pub mod chat_loop;
pub mod renderer;
pub mod theme;
