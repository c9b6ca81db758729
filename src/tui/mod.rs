//! Terminal user interface for the bookshelf.
//!
//! An interactive TUI built with ratatui. It talks to a running server
//! through the GraphQL client, so several terminals (or a browser) can share
//! one shelf.
//!
//! ## Usage
//!
//! ```bash
//! shelf tui            # poll every 5 seconds
//! shelf tui --manual   # refresh only with `r`
//! ```
//!
//! ## Keybindings
//!
//! - `↑/↓`, `j/k`: Navigate up/down
//! - `Tab`: Switch between Books/Schema views
//! - `r`: Refetch
//! - `c`: Create new book
//! - `?`: Help
//! - `q`: Quit
//!
//! In the create modal: `Tab/Shift-Tab` move between fields, `Enter`
//! submits, `Esc` closes.

pub mod app;
mod handlers;
pub mod theme;
mod ui;
mod ui_modals;
mod ui_utils;

pub use app::run_tui;
