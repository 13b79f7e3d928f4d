// ---------------------------------------------------------------------------
// ArtifactError: typed errors for model artifact loading
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors raised while reading the model artifact. Every variant is fatal at
/// startup: the process must not serve predictions without a valid model.
#[derive(Debug)]
pub enum ArtifactError {
    /// I/O error (file missing, permission denied, ...).
    Io(std::io::Error),
    /// The file does not start with the artifact magic bytes.
    NotAnArtifact,
    /// Magic bytes present but the file ends before the header does.
    TruncatedHeader { len: usize },
    /// Artifact written by a newer exporter than this build supports.
    VersionMismatch { supported: u32, found: u32 },
    /// Payload checksum mismatch (data corruption).
    Corrupted { expected: u32, found: u32 },
    /// lz4 decompression failed.
    Decompress(String),
    /// Bitcode decoding failed (payload does not describe a model).
    Decode(String),
    /// Decoded, but structurally unusable (bad schema, malformed trees, ...).
    Invalid(String),
}

impl fmt::Display for ArtifactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactError::Io(e) => write!(f, "I/O error: {e}"),
            ArtifactError::NotAnArtifact => {
                write!(f, "not a model artifact (bad magic bytes)")
            }
            ArtifactError::TruncatedHeader { len } => write!(
                f,
                "artifact truncated: {len} bytes is too short to hold the header"
            ),
            ArtifactError::VersionMismatch { supported, found } => write!(
                f,
                "artifact format v{found} is newer than the supported v{supported}; \
                 update this build to load it"
            ),
            ArtifactError::Corrupted { expected, found } => write!(
                f,
                "artifact corrupted: checksum mismatch (expected {expected:#010X}, got {found:#010X})"
            ),
            ArtifactError::Decompress(msg) => write!(f, "decompression error: {msg}"),
            ArtifactError::Decode(msg) => write!(f, "decoding error: {msg}"),
            ArtifactError::Invalid(msg) => write!(f, "invalid model: {msg}"),
        }
    }
}

impl std::error::Error for ArtifactError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ArtifactError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ArtifactError {
    fn from(e: std::io::Error) -> Self {
        ArtifactError::Io(e)
    }
}

impl From<bitcode::Error> for ArtifactError {
    fn from(e: bitcode::Error) -> Self {
        ArtifactError::Decode(e.to_string())
    }
}
