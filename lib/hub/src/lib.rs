pub mod allow_list;
pub mod hub_api;
pub mod snapshot;
