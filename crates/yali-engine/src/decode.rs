//! Gzip decoding of model sources

use flate2::read::GzDecoder;
use std::io::Read;
use yali_core::{Error, Result};

/// Inflate a gzip-compressed model source.
pub fn gunzip(raw: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(raw);
    let mut out = Vec::with_capacity(raw.len() * 4);
    decoder
        .read_to_end(&mut out)
        .map_err(|e| Error::decode(format!("gzip: {}", e)))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    #[test]
    fn test_gunzip() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"3\n2\nabc\t1\n").unwrap();
        let raw = encoder.finish().unwrap();

        assert_eq!(gunzip(&raw).unwrap(), b"3\n2\nabc\t1\n");
    }

    #[test]
    fn test_gunzip_rejects_plain_text() {
        let err = gunzip(b"3\n2\nabc\t1\n").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }
}
