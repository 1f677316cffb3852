//! Backend worker: executes HTTP commands off the UI thread.

pub mod commands;
pub mod runtime;
