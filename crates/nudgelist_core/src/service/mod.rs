//! Use-case layer composing the store, the scheduler and the popup.
//!
//! Keeps FFI/CLI callers away from storage and timer details.

pub mod session;
