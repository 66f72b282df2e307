pub mod client;
pub mod endpoint;
pub mod error;
pub mod response;
pub mod session;

pub use client::{Client, Config};
pub use error::Error;
pub use session::Session;
