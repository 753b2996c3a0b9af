mod data_stores;
mod error;
mod member;
mod member_id;
mod schema_mode;

pub use data_stores::*;
pub use error::*;
pub use member::*;
pub use member_id::*;
pub use schema_mode::*;
