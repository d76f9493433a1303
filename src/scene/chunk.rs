//! Chunked binary blobs
//!
//! Each chunk is a 4-byte ASCII magic, a little-endian u32 payload length in
//! bytes, then the payload as packed fixed-size records.

use std::io::{Read, Write};

use anyhow::{Context, bail};
use bytemuck::Pod;

/// Printable form of a chunk magic for error messages
fn magic_str(magic: &[u8; 4]) -> String {
    String::from_utf8_lossy(magic).into_owned()
}

/// Read the next chunk, which must carry `magic`, as records of `T`
pub fn read_chunk<T: Pod, R: Read>(reader: &mut R, magic: &[u8; 4]) -> anyhow::Result<Vec<T>> {
    let name = magic_str(magic);

    let mut header = [0u8; 8];
    reader
        .read_exact(&mut header)
        .with_context(|| format!("failed to read '{}' chunk header", name))?;

    let found = [header[0], header[1], header[2], header[3]];
    if &found != magic {
        bail!("expected '{}' chunk, found '{}'", name, magic_str(&found));
    }

    let size = u32::from_le_bytes([header[4], header[5], header[6], header[7]]) as usize;
    let record = std::mem::size_of::<T>();
    if size % record != 0 {
        bail!(
            "'{}' chunk length {} is not a multiple of the {}-byte record",
            name,
            size,
            record
        );
    }

    let mut bytes = vec![0u8; size];
    reader
        .read_exact(&mut bytes)
        .with_context(|| format!("'{}' chunk truncated (expected {} bytes)", name, size))?;

    Ok(bytemuck::pod_collect_to_vec(&bytes[..]))
}

/// Write `records` as a chunk tagged `magic`
pub fn write_chunk<T: Pod, W: Write>(writer: &mut W, magic: &[u8; 4], records: &[T]) -> anyhow::Result<()> {
    let bytes: &[u8] = bytemuck::cast_slice(records);
    let size = u32::try_from(bytes.len())
        .with_context(|| format!("'{}' chunk too large ({} bytes)", magic_str(magic), bytes.len()))?;
    writer.write_all(magic)?;
    writer.write_all(&size.to_le_bytes())?;
    writer.write_all(bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_written_chunk() {
        let mut buf = Vec::new();
        write_chunk(&mut buf, b"tst0", &[1u32, 2, 3]).unwrap();
        assert_eq!(buf.len(), 8 + 12);

        let values: Vec<u32> = read_chunk(&mut Cursor::new(buf), b"tst0").unwrap();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn test_wrong_magic() {
        let mut buf = Vec::new();
        write_chunk(&mut buf, b"abcd", &[0u8; 4]).unwrap();
        let err = read_chunk::<u8, _>(&mut Cursor::new(buf), b"str0").unwrap_err();
        assert!(err.to_string().contains("expected 'str0'"));
    }

    #[test]
    fn test_misaligned_length() {
        let mut buf = Vec::new();
        write_chunk(&mut buf, b"idx0", &[0u8; 6]).unwrap();
        let err = read_chunk::<u32, _>(&mut Cursor::new(buf), b"idx0").unwrap_err();
        assert!(err.to_string().contains("not a multiple"));
    }

    #[test]
    fn test_truncated_payload() {
        let mut buf = Vec::new();
        write_chunk(&mut buf, b"str0", b"hello").unwrap();
        buf.truncate(buf.len() - 2);
        assert!(read_chunk::<u8, _>(&mut Cursor::new(buf), b"str0").is_err());
    }

    #[test]
    fn test_empty_input() {
        assert!(read_chunk::<u8, _>(&mut Cursor::new(Vec::new()), b"str0").is_err());
    }
}
