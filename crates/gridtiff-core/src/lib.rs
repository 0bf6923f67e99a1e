pub mod config;
pub mod logging;

pub mod compose;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod layout;
pub mod naming;
pub mod persist;
pub mod pipeline;
pub mod scan;
pub mod source;

pub use compose::compose;
pub use error::ComposeError;
pub use layout::{GridLayout, LayoutParams};
