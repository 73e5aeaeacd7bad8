//! Flutter-facing bindings for FancyNotes core.

pub mod api;
