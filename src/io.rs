//! Line sources for host files.
//!
//! Small files go through a `BufReader`; files at or above a size threshold
//! are memory-mapped and split on `\n`. Both paths strip a trailing `\r` and
//! decode invalid UTF-8 lossily, so a host file written on Windows or with a
//! stray Latin-1 byte still yields one string per line.
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use memmap2::Mmap;

/// Host files at or above this size are memory-mapped.
pub const DEFAULT_MMAP_THRESHOLD_BYTES: u64 = 16 * 1024 * 1024;

pub type Lines = Box<dyn Iterator<Item = io::Result<String>> + Send + 'static>;

/// Open `path` and return its lines, picking the reader by file size.
pub fn iter_lines_auto<P: AsRef<Path>>(path: P, threshold_bytes: u64) -> Result<Lines> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let meta = file
        .metadata()
        .with_context(|| format!("stat {}", path.display()))?;
    if meta.is_file() && meta.len() > 0 && meta.len() >= threshold_bytes {
        let mmap = unsafe { Mmap::map(&file) }
            .with_context(|| format!("mmap {}", path.display()))?;
        Ok(Box::new(MappedLines { mmap, pos: 0 }))
    } else {
        Ok(Box::new(BufferedLines {
            reader: BufReader::new(file),
            buf: Vec::new(),
        }))
    }
}

struct BufferedLines {
    reader: BufReader<File>,
    buf: Vec<u8>,
}

impl Iterator for BufferedLines {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                let line = self.buf.strip_suffix(b"\n").unwrap_or(&self.buf);
                Some(Ok(decode_line(line)))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

struct MappedLines {
    mmap: Mmap,
    pos: usize,
}

impl Iterator for MappedLines {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let data: &[u8] = &self.mmap;
        if self.pos >= data.len() {
            return None;
        }
        let rest = &data[self.pos..];
        let (line, advance) = match memchr::memchr(b'\n', rest) {
            Some(off) => (&rest[..off], off + 1),
            None => (rest, rest.len()),
        };
        self.pos += advance;
        Some(Ok(decode_line(line)))
    }
}

fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn collect(path: &Path, threshold: u64) -> Vec<String> {
        iter_lines_auto(path, threshold)
            .unwrap()
            .collect::<io::Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn buffered_and_mapped_agree() {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(b"web1\r\n\n# c\nalice@web2:22\nlast").unwrap();
        f.flush().unwrap();
        let buffered = collect(f.path(), u64::MAX);
        let mapped = collect(f.path(), 1);
        assert_eq!(buffered, vec!["web1", "", "# c", "alice@web2:22", "last"]);
        assert_eq!(buffered, mapped);
    }

    #[test]
    fn invalid_utf8_is_decoded_lossily() {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(b"h\xffost\n").unwrap();
        f.flush().unwrap();
        assert_eq!(collect(f.path(), u64::MAX), vec!["h\u{fffd}ost"]);
    }

    #[test]
    fn empty_file_has_no_lines() {
        let f = NamedTempFile::new().unwrap();
        assert!(collect(f.path(), 0).is_empty());
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.txt");
        let err = iter_lines_auto(&missing, u64::MAX).err().unwrap();
        assert!(err.to_string().contains("nope.txt"));
    }
}
