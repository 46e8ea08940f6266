//! Flutter-facing bindings for NudgeList core.

pub mod api;
