/// UI layer: egui widgets rendering the cached chart specs and feeding
/// selection changes back into [`AppState`](crate::state::AppState).
pub mod panels;
pub mod pie;
pub mod plot;
