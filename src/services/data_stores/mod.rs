mod hashmap_member_store;
mod mysql_member_store;

pub use hashmap_member_store::*;
pub use mysql_member_store::*;
