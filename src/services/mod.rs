pub mod data_stores;
pub mod member_service;
pub mod schema;
