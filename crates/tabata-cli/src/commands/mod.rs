pub mod config;
pub mod plan;
pub mod run;
mod session_args;
