pub mod env;
pub mod fs;
pub mod http_client;
pub mod json;
pub mod yaml;
