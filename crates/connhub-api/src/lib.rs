pub mod error;
pub mod handlers;
pub mod response;
pub mod server;

pub use error::ApiError;
pub use response::ApiResponse;
pub use server::{build_router, ApiServer};
