//! Byte-for-byte file comparison.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

const CHUNK_SIZE: usize = 8 * 1024;

/// Return `true` iff both files have identical contents.
///
/// Sizes are compared first; contents are read in chunks and the comparison
/// stops at the first differing chunk.
pub fn files_identical(left: &Path, right: &Path) -> io::Result<bool> {
  let mut left_file = File::open(left)?;
  let mut right_file = File::open(right)?;

  if left_file.metadata()?.len() != right_file.metadata()?.len() {
    return Ok(false);
  }

  let mut left_buf = [0u8; CHUNK_SIZE];
  let mut right_buf = [0u8; CHUNK_SIZE];
  loop {
    let read = read_full(&mut left_file, &mut left_buf)?;
    if read_full(&mut right_file, &mut right_buf[..read])? != read {
      return Ok(false);
    }
    if left_buf[..read] != right_buf[..read] {
      return Ok(false);
    }
    if read < CHUNK_SIZE {
      // Left is exhausted; right must be too.
      let mut probe = [0u8; 1];
      return Ok(right_file.read(&mut probe)? == 0);
    }
  }
}

/// Fill `buf` as far as the reader allows, returning the byte count.
fn read_full(reader: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
  let mut filled = 0;
  while filled < buf.len() {
    match reader.read(&mut buf[filled..]) {
      Ok(0) => break,
      Ok(n) => filled += n,
      Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
      Err(e) => return Err(e),
    }
  }
  Ok(filled)
}
