pub mod coordinator;
pub mod debounce;
pub mod error;
pub mod form;
pub mod list;
pub mod pager;
pub mod preferences;
pub mod query;
pub mod sort;
pub mod source;
pub mod store;

#[cfg(test)]
mod testing;

pub use coordinator::{BoardConfig, Coordinator};
pub use error::Error;
pub use source::PostsApi;
