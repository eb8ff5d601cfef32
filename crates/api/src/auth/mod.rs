//! Authentication building blocks: password hashing and JWT issuance.

pub mod jwt;
pub mod password;
