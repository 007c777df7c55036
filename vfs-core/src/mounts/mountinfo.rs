//! Reader for the Linux `/proc/<pid>/mountinfo` table.
//!
//! Line format (see proc(5)):
//!
//! ```text
//! 36 35 98:0 /mnt1 /mnt2 rw,noatime master:1 - ext3 /dev/root rw,errors=continue
//! (1)(2)(3)   (4)   (5)      (6)      (7)   (8) (9)   (10)         (11)
//! ```

use super::MountTable;
use crate::types::MountEntry;
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;

const DEFAULT_MOUNTINFO: &str = "/proc/self/mountinfo";

/// Mount table backed by a mountinfo file.
#[derive(Debug, Clone)]
pub struct ProcMountInfo {
    path: PathBuf,
}

impl Default for ProcMountInfo {
    fn default() -> Self {
        Self { path: PathBuf::from(DEFAULT_MOUNTINFO) }
    }
}

impl ProcMountInfo {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MountTable for ProcMountInfo {
    type Error = io::Error;

    fn entries(&self) -> io::Result<Vec<MountEntry>> {
        let content = std::fs::read(&self.path)?;
        parse(&content)
    }
}

/// Parse a whole mountinfo table. Blank lines are ignored.
///
/// The table is taken as raw bytes: the kernel only escapes whitespace and
/// backslashes, so paths may carry arbitrary non-UTF-8 bytes.
pub fn parse(content: &[u8]) -> io::Result<Vec<MountEntry>> {
    content
        .split(|b| *b == b'\n')
        .enumerate()
        .filter(|(_, line)| !line.iter().all(u8::is_ascii_whitespace))
        .map(|(i, line)| {
            parse_line(line).ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!(
                        "malformed mountinfo line {}: {:?}",
                        i + 1,
                        String::from_utf8_lossy(line)
                    ),
                )
            })
        })
        .collect()
}

fn parse_line(line: &[u8]) -> Option<MountEntry> {
    let fields: Vec<&[u8]> =
        line.split(u8::is_ascii_whitespace).filter(|f| !f.is_empty()).collect();
    if fields.len() < 10 {
        return None;
    }

    // Optional fields run from index 6 up to the "-" separator.
    let sep = fields.iter().skip(6).position(|f| *f == b"-")? + 6;
    let fs_type = fields.get(sep + 1)?;
    let mount_source = fields.get(sep + 2)?;

    Some(MountEntry {
        root: PathBuf::from(os_string(unescape(fields[3]))),
        mount_point: PathBuf::from(os_string(unescape(fields[4]))),
        mount_opts: String::from_utf8_lossy(fields[5]).split(',').map(str::to_string).collect(),
        fs_type: String::from_utf8_lossy(&unescape(fs_type)).into_owned(),
        mount_source: os_string(unescape(mount_source)),
    })
}

#[cfg(unix)]
fn os_string(bytes: Vec<u8>) -> OsString {
    use std::os::unix::ffi::OsStringExt;
    OsString::from_vec(bytes)
}

#[cfg(not(unix))]
fn os_string(bytes: Vec<u8>) -> OsString {
    String::from_utf8_lossy(&bytes).into_owned().into()
}

/// Decode the kernel's three-digit octal escapes (`\040` for space etc.).
fn unescape(field: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(field.len());
    let mut i = 0;
    while i < field.len() {
        if field[i] == b'\\' && i + 3 < field.len() && is_octal(&field[i + 1..i + 4]) {
            let value = field[i + 1..i + 4]
                .iter()
                .fold(0u32, |acc, b| acc * 8 + u32::from(b - b'0'));
            if let Ok(byte) = u8::try_from(value) {
                out.push(byte);
                i += 4;
                continue;
            }
        }
        out.push(field[i]);
        i += 1;
    }
    out
}

fn is_octal(digits: &[u8]) -> bool {
    digits.len() == 3 && digits.iter().all(|b| (b'0'..=b'7').contains(b))
}
