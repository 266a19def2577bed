pub mod context;
pub mod init;
pub mod questions;
pub mod score;
pub mod take;
pub mod validate;
