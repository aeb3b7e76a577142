pub mod branch;
pub mod client;
pub mod config;
pub mod error;
pub mod intent;
pub mod matcher;
pub mod resolver;
pub mod response;
pub mod select;

pub use error::{QuerierError, Result};
pub use resolver::{LookupKind, Resolution, Resolver};
