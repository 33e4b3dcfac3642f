pub mod entities;
pub mod password;
