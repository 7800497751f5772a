pub mod action;
pub mod codec;
pub mod config;
pub mod error;
pub mod io;
pub mod project;
pub mod types;

pub use action::{Action, Record};
pub use error::{ActionError, Result};
pub use types::TimerMode;
