//! Derivation core for a student cognitive-performance dashboard: one-shot
//! record loading, population statistics, chart projections, and the
//! sortable/filterable table view the presentation layer renders.

pub mod models;
pub mod project;
pub mod seed;
pub mod session;
pub mod source;
pub mod stats;
pub mod store;
pub mod table;
