pub mod capability;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod notify;
pub mod routes;
pub mod rpc;
pub mod session;
pub mod transform;
pub mod view;

pub use engine::core::app_setup::create_app;
