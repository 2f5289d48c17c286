//! Flutter-facing bridge over `notelog_core`.

pub mod api;
