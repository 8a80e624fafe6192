pub mod error;
pub mod events;
pub mod form;
pub mod frames;
pub mod labels;
pub mod selection;
pub mod services;
pub mod settings;
pub mod store;
pub mod types;
