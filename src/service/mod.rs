pub mod password;
pub mod sanitize;
pub mod users;

pub use users::{Credentials, UserDirectory};
