pub mod builtin;
pub mod email_store;
pub mod file;
pub mod repo;

pub use email_store::EmailStore;
