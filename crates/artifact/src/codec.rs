// ---------------------------------------------------------------------------
// Codec: model <-> artifact bytes, plus the fixed-path loader
// ---------------------------------------------------------------------------

use std::path::Path;

use estimator::model::PopulationModel;

use crate::error::ArtifactError;
use crate::file_header::{unwrap_header, wrap_with_header, FLAG_COMPRESSED};

/// Fixed relative path the application loads the trained model from. The
/// artifact is produced and versioned by the offline export pipeline; this
/// system only reads it.
pub const MODEL_PATH: &str = "assets/disaster_resource_model.bin";

/// Encode a model into artifact bytes: bitcode payload, lz4-compressed,
/// wrapped with the file header. Shared by the offline exporter and the
/// format tests; the application itself never writes artifacts.
pub fn encode_model(model: &PopulationModel) -> Vec<u8> {
    let raw = bitcode::encode(model);
    let compressed = lz4_flex::compress_prepend_size(&raw);
    wrap_with_header(&compressed, FLAG_COMPRESSED, raw.len() as u32)
}

/// Decode artifact bytes into a validated model.
///
/// Stages: header check -> decompress -> size check -> bitcode decode ->
/// structural validation. Any failure means the artifact must not serve.
pub fn decode_model(bytes: &[u8]) -> Result<PopulationModel, ArtifactError> {
    let (header, payload) = unwrap_header(bytes)?;

    let raw = if header.flags & FLAG_COMPRESSED != 0 {
        lz4_flex::decompress_size_prepended(payload)
            .map_err(|e| ArtifactError::Decompress(e.to_string()))?
    } else {
        payload.to_vec()
    };

    if raw.len() != header.uncompressed_size as usize {
        return Err(ArtifactError::Invalid(format!(
            "payload is {} bytes after decompression, header says {}",
            raw.len(),
            header.uncompressed_size
        )));
    }

    let model: PopulationModel = bitcode::decode(&raw)?;
    model.validate().map_err(ArtifactError::Invalid)?;
    Ok(model)
}

/// Load and validate the model artifact at `path`. Called exactly once at
/// process start; every error is a startup failure, never retried.
pub fn load_model(path: impl AsRef<Path>) -> Result<PopulationModel, ArtifactError> {
    let bytes = std::fs::read(path)?;
    decode_model(&bytes)
}

/// Write a model artifact to `path`. Exporter/test half of the format.
pub fn write_model(path: impl AsRef<Path>, model: &PopulationModel) -> Result<(), ArtifactError> {
    std::fs::write(path, encode_model(model))?;
    Ok(())
}
