// Application progress core: essay classification, per-university aggregation,
// dashboard roll-up and the access gate. Everything except handlers.rs is pure.

pub mod access;
pub mod aggregator;
pub mod dashboard;
pub mod essay_status;
pub mod handlers;
pub mod models;
