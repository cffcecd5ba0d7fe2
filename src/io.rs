//! Positioned file reads.
//!
//! Every per-request read goes through [`read_exact_at`], which never
//! touches the file's shared cursor: concurrent `metadata`/`slice` calls
//! against one open volume must not interfere with each other, so
//! position-based seek+read is off limits outside the open-time scan.

use std::fs::File;
use std::io;

/// Read exactly `buf.len()` bytes at `offset` without moving the file cursor.
#[cfg(unix)]
pub fn read_exact_at(file: &File, buf: &mut [u8], offset: u64) -> io::Result<()> {
    use std::os::unix::fs::FileExt;
    file.read_exact_at(buf, offset)
}

/// Read exactly `buf.len()` bytes at `offset` without relying on the shared cursor.
#[cfg(windows)]
pub fn read_exact_at(file: &File, buf: &mut [u8], offset: u64) -> io::Result<()> {
    use std::os::windows::fs::FileExt;

    let mut read = 0usize;
    while read < buf.len() {
        let n = file.seek_read(&mut buf[read..], offset + read as u64)?;
        if n == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "failed to fill whole buffer",
            ));
        }
        read += n;
    }
    Ok(())
}

/// Like [`read_exact_at`], but reports how many bytes were available when the
/// file ends short of the request instead of failing outright.
pub fn read_up_to_at(file: &File, buf: &mut [u8], offset: u64) -> io::Result<usize> {
    let len = file.metadata()?.len();
    let available = len.saturating_sub(offset).min(buf.len() as u64) as usize;
    if available > 0 {
        read_exact_at(file, &mut buf[..available], offset)?;
    }
    Ok(available)
}
