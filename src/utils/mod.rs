pub mod class_code;
pub mod file_magic;
pub mod parameter_error_handler;
pub mod validate;

pub use class_code::generate_class_code;
pub use file_magic::detect_image_mime;
pub use parameter_error_handler::{json_error_handler, query_error_handler};
pub use validate::{require_non_blank, validate_email};
