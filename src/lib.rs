//! Interactive dashboard over a static table of rocket launch records.
//!
//! The dataset is loaded once at startup and held immutable for the process
//! lifetime. Two charts derive from it reactively: a success-proportion pie
//! chart keyed on the selected launch site, and a payload/outcome scatter
//! chart keyed on the site plus a payload-mass range. The chart handlers are
//! pure functions returning renderer-independent specs, consumed either by
//! the native egui frontend (`launchboard` binary) or serialized as JSON by
//! the HTTP endpoint (`serve` binary).

pub mod app;
pub mod charts;
pub mod color;
pub mod data;
pub mod server;
pub mod state;
pub mod ui;
