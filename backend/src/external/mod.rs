//! External storage integrations

pub mod history_store;

pub use history_store::JsonFileStore;
