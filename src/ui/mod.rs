//! Terminal browser for the openings computed in one run.

pub mod app;
pub mod dashboard;

pub use app::App;
