//! Middleware components for request processing.

mod error_handler;
mod logging;
pub(crate) mod request_id;

pub use error_handler::{error_to_code, error_to_status_code, global_error_handler};
pub use logging::logging_middleware;
pub use request_id::{REQUEST_ID_HEADER, RequestId, current_request_id, request_id_middleware};
