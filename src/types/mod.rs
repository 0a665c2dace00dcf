pub mod response;

pub use response::{ApiResponse, created, success};
