//! HTTP protocol layer module
//!
//! Response construction, decoupled from redirect resolution.

pub mod response;

// Re-export commonly used types
pub use response::{
    build_404_response, build_405_response, build_html_response, build_json_error_response,
    build_options_response, build_redirect_response,
};
