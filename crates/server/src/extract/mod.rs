mod id_path;
pub use id_path::*;

mod json_payload;
pub use json_payload::*;
