pub mod codec;
pub mod error;
pub mod file_header;

pub use codec::{decode_model, encode_model, load_model, write_model, MODEL_PATH};
pub use error::ArtifactError;
