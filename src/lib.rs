pub mod config;
pub mod domain;
pub mod nav;
pub mod store;
pub mod terminal;
