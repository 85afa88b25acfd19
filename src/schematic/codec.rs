//! Codec seam between the build pipeline and a schematic file format

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use thiserror::Error;

use super::{Link, Schematic};

/// Errors raised while encoding
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("I/O error while encoding: {0}")]
    Io(#[from] std::io::Error),

    #[error("{what} is out of range for the encoding: {value}")]
    OutOfRange { what: &'static str, value: i64 },

    #[error("failed to serialize schematic: {0}")]
    Json(#[from] serde_json::Error),
}

/// A schematic output format.
///
/// The build pipeline only needs [`compress_logic`](Self::compress_logic) to
/// package processor programs; [`encode`](Self::encode) is used by callers
/// that write the result somewhere.
pub trait SchematicCodec: Send + Sync {
    /// File extension for encoded output, without the leading dot
    fn extension(&self) -> &str;

    /// Pack a processor's links and code into its config bytes
    fn compress_logic(&self, links: &[Link], code: &[String]) -> Result<Vec<u8>, CodecError> {
        compress_logic_config(links, code)
    }

    /// Encode a whole schematic
    fn encode(&self, schematic: &Schematic) -> Result<Vec<u8>, CodecError>;
}

/// Writes the schematic model as JSON, byte configs in base64
#[derive(Debug, Clone)]
pub struct JsonCodec {
    pub pretty: bool,
}

impl Default for JsonCodec {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl SchematicCodec for JsonCodec {
    fn extension(&self) -> &str {
        "msch.json"
    }

    fn encode(&self, schematic: &Schematic) -> Result<Vec<u8>, CodecError> {
        let mut bytes = if self.pretty {
            serde_json::to_vec_pretty(schematic)?
        } else {
            serde_json::to_vec(schematic)?
        };
        bytes.push(b'\n');
        Ok(bytes)
    }
}

/// The standard processor config layout, zlib-compressed.
///
/// Big-endian: version byte `1`, code length (`i32`), code bytes joined by
/// `\n`, link count (`i32`), then per link a `u16`-prefixed name and `i16` x
/// and y offsets.
pub fn compress_logic_config(links: &[Link], code: &[String]) -> Result<Vec<u8>, CodecError> {
    let code = code.join("\n");
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());

    encoder.write_all(&[1])?;
    encoder.write_all(&checked_i32("code length", code.len())?.to_be_bytes())?;
    encoder.write_all(code.as_bytes())?;
    encoder.write_all(&checked_i32("link count", links.len())?.to_be_bytes())?;
    for link in links {
        let name = link.name.as_bytes();
        let name_len = u16::try_from(name.len()).map_err(|_| CodecError::OutOfRange {
            what: "link name length",
            value: name.len() as i64,
        })?;
        encoder.write_all(&name_len.to_be_bytes())?;
        encoder.write_all(name)?;
        encoder.write_all(&checked_i16("link x offset", link.x)?.to_be_bytes())?;
        encoder.write_all(&checked_i16("link y offset", link.y)?.to_be_bytes())?;
    }

    Ok(encoder.finish()?)
}

fn checked_i32(what: &'static str, value: usize) -> Result<i32, CodecError> {
    i32::try_from(value).map_err(|_| CodecError::OutOfRange {
        what,
        value: value as i64,
    })
}

fn checked_i16(what: &'static str, value: i32) -> Result<i16, CodecError> {
    i16::try_from(value).map_err(|_| CodecError::OutOfRange {
        what,
        value: value.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::StringMap;
    use flate2::read::ZlibDecoder;
    use std::io::Read;

    fn inflate(bytes: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        ZlibDecoder::new(bytes)
            .read_to_end(&mut out)
            .expect("Should inflate");
        out
    }

    #[test]
    fn test_logic_layout() {
        let links = vec![Link {
            x: -1,
            y: 2,
            name: "!!".to_string(),
        }];
        let code = vec!["set a 1".to_string(), "end".to_string()];
        let raw = inflate(&compress_logic_config(&links, &code).unwrap());

        let mut expected = vec![1u8];
        expected.extend_from_slice(&11i32.to_be_bytes());
        expected.extend_from_slice(b"set a 1\nend");
        expected.extend_from_slice(&1i32.to_be_bytes());
        expected.extend_from_slice(&2u16.to_be_bytes());
        expected.extend_from_slice(b"!!");
        expected.extend_from_slice(&(-1i16).to_be_bytes());
        expected.extend_from_slice(&2i16.to_be_bytes());
        assert_eq!(raw, expected);
    }

    #[test]
    fn test_logic_without_links() {
        let raw = inflate(&compress_logic_config(&[], &[]).unwrap());
        assert_eq!(raw, vec![1, 0, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_link_offset_out_of_range() {
        let links = vec![Link {
            x: 40_000,
            y: 0,
            name: "!!".to_string(),
        }];
        let err = compress_logic_config(&links, &[]).unwrap_err();
        assert!(matches!(err, CodecError::OutOfRange { what: "link x offset", .. }));
    }

    #[test]
    fn test_json_codec_encodes_model() {
        let schem = Schematic::from_grid(0, 0, StringMap::new(), vec![]);
        let codec = JsonCodec { pretty: false };
        let text = String::from_utf8(codec.encode(&schem).unwrap()).unwrap();
        assert_eq!(
            text,
            "{\"height\":0,\"width\":0,\"version\":1,\"tags\":{},\"labels\":[],\"tiles\":[]}\n"
        );
        assert_eq!(codec.extension(), "msch.json");
    }
}
