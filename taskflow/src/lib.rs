pub mod ai;
pub mod api;
mod domain;
mod error;
pub mod store;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use store::{LoadingState, TaskStore};
