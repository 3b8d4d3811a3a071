use std::ffi::{OsStr, OsString};

use bstr::{BStr, ByteSlice};

/// A simple extension trait that adds some methods to OS strings.
pub trait OsStrExt {
    // Named verbosely to avoid conflicting with `OsStr::as_os_str`.
    fn as_os_str_slice(&self) -> &OsStr;

    /// Converts this OS string to a byte slice.
    ///
    /// On Unix, this is a no-op and can never fail. Otherwise, this requires
    /// that the OS string be valid UTF-8.
    fn to_bytes(&self) -> anyhow::Result<&[u8]> {
        let osstr = self.as_os_str_slice();
        <[u8]>::from_os_str(osstr).ok_or_else(|| {
            anyhow::anyhow!(
                "{osstr:?} is not valid UTF-8 but must be \
                 in non-Unix environments",
            )
        })
    }

    /// Converts this OS string to a string slice.
    fn to_str(&self) -> anyhow::Result<&str> {
        Ok(self.to_bytes()?.to_str()?)
    }
}

impl OsStrExt for OsStr {
    fn as_os_str_slice(&self) -> &OsStr {
        self
    }
}

impl OsStrExt for OsString {
    fn as_os_str_slice(&self) -> &OsStr {
        self.as_os_str()
    }
}

/// A borrowed line parsed from a stream.
///
/// This absolves callers of needing to futz with line terminators or line
/// numbers.
#[derive(Clone, Copy, Debug)]
pub struct Line<'a> {
    /// The line number, 1-indexed.
    number: usize,
    /// The full line including its line terminator if present.
    full: &'a BStr,
}

impl<'a> Line<'a> {
    pub fn new(number: usize, full: &'a [u8]) -> Line<'a> {
        Line { number, full: full.as_bstr() }
    }

    /// Return the one-indexed line number of this line.
    pub fn number(&self) -> usize {
        self.number
    }

    /// Return only the content of the line, i.e., the line without its
    /// terminator (if present).
    pub fn content(&self) -> &'a BStr {
        let (content, _) = split_line_terminator(self.full);
        content.as_bstr()
    }
}

/// An extension trait for `std::io::BufRead` which provides convenience APIs
/// for dealing with byte strings.
///
/// This is a stripped down version of what's in `bstr::io`, with errors
/// reported through `anyhow` so that callers can attach context to them.
pub trait BufReadExt: std::io::BufRead {
    /// Executes the given closure on each (`\n`|`\r\n`)-terminated line in the
    /// underlying reader.
    ///
    /// Iteration stops early when the closure returns `false` or an error.
    fn for_byte_line<F>(&mut self, mut for_each_line: F) -> anyhow::Result<()>
    where
        Self: Sized,
        F: FnMut(Line<'_>) -> anyhow::Result<bool>,
    {
        let mut number = 0;
        let mut bytes = vec![];
        loop {
            bytes.clear();
            self.read_until(b'\n', &mut bytes)?;
            if bytes.is_empty() {
                break;
            }
            number += 1;
            if !for_each_line(Line::new(number, &bytes))? {
                break;
            }
        }
        Ok(())
    }
}

impl<B: std::io::BufRead> BufReadExt for B {}

fn split_line_terminator(line: &[u8]) -> (&[u8], &[u8]) {
    let mut terminator_at = line.len();
    if line.last_byte() == Some(b'\n') {
        terminator_at -= 1;
        if terminator_at > 0 && line[terminator_at - 1] == b'\r' {
            terminator_at -= 1;
        }
    }
    (&line[..terminator_at], &line[terminator_at..])
}
