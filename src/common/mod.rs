pub mod addr;
pub mod error;
