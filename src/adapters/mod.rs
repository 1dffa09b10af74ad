//! Adapter implementations for port traits.
//!
//! - `live/` — Real API implementations

pub mod live;
