pub mod client;
pub mod deployment;
pub mod endpoint;
pub mod image;
pub mod invoke_api;
pub mod model;
