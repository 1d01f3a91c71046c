//!
//! Decompress flash block payloads.
//!

use std::io::Read;

use crate::errors::StreamError;

/// Internal buffer size handed to the brotli reader.
const BUFFER_SIZE: usize = 4096;

///
/// Decompress a brotli payload into UTF-8 text.
///
/// The whole stream is read before returning; a truncated or corrupt stream is an error
/// and no partial text is ever returned.
///
pub fn decode(raw: &[u8]) -> Result<String, StreamError> {
    let mut reader = brotli::Decompressor::new(raw, BUFFER_SIZE);
    let mut buf = Vec::with_capacity(raw.len() * 4);
    reader
        .read_to_end(&mut buf)
        .map_err(|err| StreamError::Decode(err.to_string()))?;

    String::from_utf8(buf).map_err(|err| StreamError::Decode(err.to_string()))
}

/// Compress `data` the way the service does, for feeding decoders in tests.
#[cfg(test)]
pub(crate) fn compress(data: &[u8]) -> Vec<u8> {
    use std::io::Write;

    let mut writer = brotli::CompressorWriter::new(Vec::new(), BUFFER_SIZE, 5, 22);
    writer.write_all(data).unwrap();
    writer.into_inner()
}
