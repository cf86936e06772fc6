pub mod backend;
pub mod cli_args;
pub mod controller;
pub mod error;
pub mod model;
pub mod output;
pub mod render;
pub mod terminal;

pub use crate::error::ClientError;

pub type Result<T> = std::result::Result<T, ClientError>;
