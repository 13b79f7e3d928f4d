// ---------------------------------------------------------------------------
// file_header – Model artifact header with magic bytes, version, and checksum
// ---------------------------------------------------------------------------
//
// Header format (28 bytes, fixed-size, little-endian):
//   [0..4]   Magic bytes: "RCMA" (0x52434D41)
//   [4..8]   Format version (u32)
//   [8..12]  Flags (u32: bit 0 = lz4-compressed payload)
//   [12..20] Export timestamp (Unix epoch, u64)
//   [20..24] Uncompressed payload size (u32)
//   [24..28] xxHash32 checksum of the stored payload (everything after the header)
//
// On export: encode model -> compress -> prepend header (checksum of stored bytes)
// On load: check magic -> validate version and checksum -> strip header -> decode
// There is no headerless legacy format; anything without the magic is rejected.

use xxhash_rust::xxh32::xxh32;

use crate::error::ArtifactError;

/// Magic bytes identifying a model artifact.
pub const MAGIC: [u8; 4] = [0x52, 0x43, 0x4D, 0x41]; // "RCMA"

/// Size of the file header in bytes.
pub const HEADER_SIZE: usize = 28;

/// Current header format version. Tracks changes to the header layout
/// itself, not to the model payload schema.
pub const HEADER_FORMAT_VERSION: u32 = 1;

/// Flags bit 0: payload is lz4-compressed with a prepended size.
pub const FLAG_COMPRESSED: u32 = 1;

/// Seed for xxHash32 checksum.
const XXHASH_SEED: u32 = 0;

/// Parsed file header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    pub format_version: u32,
    pub flags: u32,
    pub timestamp: u64,
    pub uncompressed_size: u32,
    pub checksum: u32,
}

impl FileHeader {
    /// Create a header for a stored payload. `uncompressed_size` is the
    /// payload size before compression; the checksum covers the stored
    /// (possibly compressed) bytes.
    pub fn new(payload: &[u8], flags: u32, uncompressed_size: u32) -> Self {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        Self {
            format_version: HEADER_FORMAT_VERSION,
            flags,
            timestamp,
            uncompressed_size,
            checksum: xxh32(payload, XXHASH_SEED),
        }
    }
}

/// Wrap a stored payload with a file header.
///
/// Returns bytes: [header (28 bytes)] ++ [payload].
pub fn wrap_with_header(payload: &[u8], flags: u32, uncompressed_size: u32) -> Vec<u8> {
    let header = FileHeader::new(payload, flags, uncompressed_size);
    let mut out = Vec::with_capacity(HEADER_SIZE + payload.len());

    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&header.format_version.to_le_bytes());
    out.extend_from_slice(&header.flags.to_le_bytes());
    out.extend_from_slice(&header.timestamp.to_le_bytes());
    out.extend_from_slice(&header.uncompressed_size.to_le_bytes());
    out.extend_from_slice(&header.checksum.to_le_bytes());

    out.extend_from_slice(payload);
    out
}

/// Parse and validate the file header, returning it with the payload bytes.
///
/// # Errors
///
/// - [`ArtifactError::NotAnArtifact`] if the magic bytes are absent
/// - [`ArtifactError::TruncatedHeader`] if the file ends inside the header
/// - [`ArtifactError::VersionMismatch`] if written by a newer exporter
/// - [`ArtifactError::Corrupted`] if the payload checksum does not match
pub fn unwrap_header(bytes: &[u8]) -> Result<(FileHeader, &[u8]), ArtifactError> {
    if bytes.len() < 4 || bytes[..4] != MAGIC {
        return Err(ArtifactError::NotAnArtifact);
    }
    if bytes.len() < HEADER_SIZE {
        return Err(ArtifactError::TruncatedHeader { len: bytes.len() });
    }

    // Header fields are all little-endian.
    let format_version = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    let flags = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);
    let timestamp = u64::from_le_bytes([
        bytes[12], bytes[13], bytes[14], bytes[15], bytes[16], bytes[17], bytes[18], bytes[19],
    ]);
    let uncompressed_size = u32::from_le_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
    let checksum = u32::from_le_bytes([bytes[24], bytes[25], bytes[26], bytes[27]]);

    if format_version > HEADER_FORMAT_VERSION {
        return Err(ArtifactError::VersionMismatch {
            supported: HEADER_FORMAT_VERSION,
            found: format_version,
        });
    }

    let payload = &bytes[HEADER_SIZE..];

    let computed = xxh32(payload, XXHASH_SEED);
    if computed != checksum {
        return Err(ArtifactError::Corrupted {
            expected: checksum,
            found: computed,
        });
    }

    Ok((
        FileHeader {
            format_version,
            flags,
            timestamp,
            uncompressed_size,
            checksum,
        },
        payload,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_and_unwrap_roundtrip() {
        let payload = b"model payload bytes";
        let wrapped = wrap_with_header(payload, FLAG_COMPRESSED, 64);

        assert_eq!(&wrapped[..4], &MAGIC);
        assert_eq!(wrapped.len(), HEADER_SIZE + payload.len());

        let (header, out) = unwrap_header(&wrapped).expect("unwrap should succeed");
        assert_eq!(header.format_version, HEADER_FORMAT_VERSION);
        assert_eq!(header.flags, FLAG_COMPRESSED);
        assert_eq!(header.uncompressed_size, 64);
        assert_eq!(out, payload);
    }

    #[test]
    fn test_wrong_magic_rejected() {
        let bytes = b"PKL\x00definitely not a model artifact";
        let err = unwrap_header(bytes).unwrap_err();
        assert!(matches!(err, ArtifactError::NotAnArtifact));
    }

    #[test]
    fn test_empty_file_rejected() {
        let err = unwrap_header(b"").unwrap_err();
        assert!(matches!(err, ArtifactError::NotAnArtifact));
    }

    #[test]
    fn test_truncated_header_detected() {
        let bytes = b"RCMA\x01\x00";
        let err = unwrap_header(bytes).unwrap_err();
        assert!(matches!(err, ArtifactError::TruncatedHeader { len: 6 }));
    }

    #[test]
    fn test_future_version_rejected() {
        let mut wrapped = wrap_with_header(b"payload", 0, 7);
        wrapped[4..8].copy_from_slice(&999u32.to_le_bytes());

        let err = unwrap_header(&wrapped).unwrap_err();
        match err {
            ArtifactError::VersionMismatch { supported, found } => {
                assert_eq!(supported, HEADER_FORMAT_VERSION);
                assert_eq!(found, 999);
            }
            other => panic!("expected VersionMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_corrupted_payload_detected() {
        let mut wrapped = wrap_with_header(b"payload under checksum", 0, 22);
        let last = wrapped.len() - 1;
        wrapped[last] ^= 0xFF;

        let err = unwrap_header(&wrapped).unwrap_err();
        assert!(matches!(err, ArtifactError::Corrupted { .. }), "got: {err:?}");
    }

    #[test]
    fn test_checksum_deterministic() {
        let payload = b"deterministic";
        assert_eq!(xxh32(payload, XXHASH_SEED), xxh32(payload, XXHASH_SEED));
    }

    #[test]
    fn test_empty_payload_roundtrip() {
        let wrapped = wrap_with_header(b"", 0, 0);
        assert_eq!(wrapped.len(), HEADER_SIZE);

        let (header, payload) = unwrap_header(&wrapped).expect("unwrap should succeed");
        assert_eq!(header.uncompressed_size, 0);
        assert!(payload.is_empty());
    }
}
