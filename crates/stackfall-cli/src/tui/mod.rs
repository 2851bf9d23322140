//! Minimal terminal runtime: a tick source the app can start and stop, and
//! redraws whenever something changed.

mod app;
mod event;
mod event_loop;
mod runner;

pub use self::{app::App, runner::Tui};
