//! Text layout and typed-input diffing for the `typo` typing trainer.
//!
//! `text` wraps guide text and classifies typed input against it,
//! `session` drives a run through the sections of a session file, and
//! `config` holds user settings. The terminal front end lives in the binary.

pub mod config;
pub mod session;
pub mod text;
