pub mod help;
pub mod map;
pub mod store_details;
pub mod stores;
