//! Live adapters that call real API endpoints.

pub mod gemini;
