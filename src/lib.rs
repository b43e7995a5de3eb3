#![doc = include_str!("../README.md")]

/// Article entity, create-request shape and id generation
pub mod article;
mod config;
mod error;
/// Whole-word article search
pub mod search;
/// HTTP routing, listener setup and serving
pub mod server;
mod store;

pub use article::{Article, IdGenerator, NewArticle};
pub use config::{DEFAULT_PORT, ServerConfig};
pub use error::{ArticleError, Result};
pub use server::{bind, router, run, serve};
pub use store::ArticleStore;
