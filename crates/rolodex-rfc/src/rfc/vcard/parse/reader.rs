//! Row reader: turns physical lines into unfolded logical lines.
//!
//! vCard uses the same folding rules as iCalendar (RFC 5545 §3.1): a line
//! starting with a space or horizontal tab continues the previous line.
//! vCard 2.1 additionally continues quoted-printable values with soft line
//! breaks (`=` at the end of a line).

use std::io::{self, BufRead, Split};

/// Lazy iterator over the logical lines of a VCF stream.
///
/// Single pass; I/O errors are yielded as `Err`. A physical line that is not
/// valid UTF-8 is consumed and yielded as an [`io::ErrorKind::InvalidData`]
/// error, and the iterator may be resumed afterwards.
#[derive(Debug)]
pub struct RowReader<R> {
    lines: Split<R>,
    buffer: Option<String>,
    soft_break: bool,
}

impl<R: BufRead> RowReader<R> {
    /// Wraps a buffered reader.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.split(b'\n'),
            buffer: None,
            soft_break: false,
        }
    }

    fn append(&mut self, text: &str) {
        let buffer = self.buffer.get_or_insert_with(String::new);
        buffer.push_str(text);
        self.soft_break = take_soft_break(buffer);
    }
}

impl<R: BufRead> Iterator for RowReader<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut line = match self.lines.next() {
                None => return self.buffer.take().map(Ok),
                Some(Err(err)) => return Some(Err(err)),
                Some(Ok(bytes)) => match String::from_utf8(bytes) {
                    Ok(line) => line,
                    Err(err) => return Some(Err(io::Error::new(io::ErrorKind::InvalidData, err))),
                },
            };
            if line.ends_with('\r') {
                line.pop();
            }

            if self.soft_break {
                self.append(&line);
                continue;
            }

            if line.is_empty() {
                continue;
            }

            if let Some(rest) = line.strip_prefix([' ', '\t']) {
                self.append(rest);
                continue;
            }

            let previous = self.buffer.replace(String::new());
            self.append(&line);
            if let Some(previous) = previous {
                return Some(Ok(previous));
            }
        }
    }
}

/// Removes a trailing soft line break from a quoted-printable line.
///
/// Returns whether one was removed, i.e. whether the next physical line
/// continues this one verbatim.
fn take_soft_break(line: &mut String) -> bool {
    if !line.ends_with('=') {
        return false;
    }
    let Some(colon) = line.find(':') else {
        return false;
    };
    if !line[..colon]
        .to_ascii_uppercase()
        .contains("QUOTED-PRINTABLE")
    {
        return false;
    }
    line.pop();
    true
}

/// Splits a whole document into logical lines.
#[must_use]
pub fn split_lines(input: &str) -> Vec<String> {
    // reading from a &str cannot fail
    RowReader::new(input.as_bytes())
        .filter_map(Result::ok)
        .collect()
}
