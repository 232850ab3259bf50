// SPDX-FileCopyrightText: 2026 The Calyx Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Streaming reconstruction of logical lines from folded physical lines.

use std::io::BufRead;

use crate::lexer::LexError;

/// One unfolded content line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LogicalLine {
    /// Line content without terminator or fold sequences.
    pub text: String,
    /// Byte offset of the line in the raw input.
    pub start: usize,
    /// `(index in text, raw bytes removed so far)` for each fold.
    folds: Vec<(usize, usize)>,
}

impl LogicalLine {
    /// Map a byte index in [`text`](Self::text) back to the raw input.
    pub fn raw_offset(&self, index: usize) -> usize {
        let removed = self
            .folds
            .iter()
            .rev()
            .find(|(at, _)| *at <= index)
            .map_or(0, |(_, removed)| *removed);
        self.start + index + removed
    }
}

/// Reads logical lines, deleting every line break that is immediately
/// followed by a space or tab together with that whitespace character.
///
/// Only one physical line is buffered at a time, and bytes are decoded as
/// UTF-8 only once a logical line is complete, so multi-byte sequences
/// split across reads or folds survive intact.
#[derive(Debug)]
pub(crate) struct LineReader<R> {
    reader: R,
    strict_line_breaks: bool,
    position: usize,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R, strict_line_breaks: bool) -> Self {
        Self {
            reader,
            strict_line_breaks,
            position: 0,
        }
    }

    /// Bytes consumed from the raw input so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Read the next logical line, `None` at end of input.
    pub fn next_line(&mut self) -> Option<Result<LogicalLine, LexError>> {
        self.read_line().transpose()
    }

    fn read_line(&mut self) -> Result<Option<LogicalLine>, LexError> {
        let start = self.position;
        let mut content = Vec::new();
        let mut folds = Vec::new();
        let mut removed = 0;
        let mut physical = Vec::new();

        loop {
            physical.clear();
            let n = self.reader.read_until(b'\n', &mut physical)?;
            if n == 0 {
                if folds.is_empty() {
                    return Ok(None);
                }
                break;
            }
            self.position += n;

            let terminator = if physical.ends_with(b"\r\n") {
                2
            } else if physical.ends_with(b"\n") {
                if self.strict_line_breaks {
                    return Err(LexError::MissingCarriageReturn {
                        offset: self.position - 1,
                    });
                }
                1
            } else {
                0 // end of input without a line break
            };
            content.extend_from_slice(physical.get(..n - terminator).unwrap_or_default());
            if terminator == 0 {
                break;
            }

            let folded = matches!(self.reader.fill_buf()?.first(), Some(b' ' | b'\t'));
            if !folded {
                break;
            }
            self.reader.consume(1);
            self.position += 1;
            removed += terminator + 1;
            folds.push((content.len(), removed));
        }

        let text = match String::from_utf8(content) {
            Ok(text) => text,
            Err(e) => {
                let line = LogicalLine {
                    text: String::new(),
                    start,
                    folds,
                };
                let offset = line.raw_offset(e.utf8_error().valid_up_to());
                return Err(LexError::InvalidUtf8 { offset });
            }
        };

        Ok(Some(LogicalLine { text, start, folds }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(src: &str, strict: bool) -> Vec<Result<LogicalLine, LexError>> {
        let mut reader = LineReader::new(src.as_bytes(), strict);
        std::iter::from_fn(|| reader.next_line()).collect()
    }

    fn texts(src: &str) -> Vec<String> {
        lines(src, false)
            .into_iter()
            .map(|line| line.unwrap().text)
            .collect()
    }

    #[test]
    fn unfolds_crlf_and_lf() {
        assert_eq!(
            texts("SUMMARY:Hel\r\n lo\r\nUID:1\r\n"),
            ["SUMMARY:Hello", "UID:1"]
        );
        assert_eq!(texts("SUMMARY:Hel\n lo\nUID:1\n"), ["SUMMARY:Hello", "UID:1"]);
        assert_eq!(texts("SUMMARY:a\r\n\tb\r\n c"), ["SUMMARY:abc"]);
    }

    #[test]
    fn keeps_multibyte_characters_split_by_folds() {
        // U+00E9 is C3 A9, folded between its two bytes
        let src = b"SUMMARY:caf\xC3\r\n \xA9\r\n";
        let mut reader = LineReader::new(&src[..], false);
        let line = reader.next_line().unwrap().unwrap();
        assert_eq!(line.text, "SUMMARY:café");
    }

    #[test]
    fn maps_offsets_through_folds() {
        let mut reader = LineReader::new("UID:1\r\nSUMMARY:ab\r\n cd\r\n ef\r\n".as_bytes(), false);
        let first = reader.next_line().unwrap().unwrap();
        assert_eq!(first.start, 0);

        let line = reader.next_line().unwrap().unwrap();
        assert_eq!(line.text, "SUMMARY:abcdef");
        assert_eq!(line.start, 7);
        assert_eq!(line.raw_offset(8), 15); // 'a'
        assert_eq!(line.raw_offset(10), 20); // 'c', after "\r\n "
        assert_eq!(line.raw_offset(12), 25); // 'e'
        assert_eq!(reader.position(), 29);
    }

    #[test]
    fn strict_mode_rejects_bare_lf() {
        let result = lines("UID:1\r\nSUMMARY:x\nEND", true);
        assert!(matches!(result.first(), Some(Ok(_))));
        assert!(matches!(
            result.get(1),
            Some(Err(LexError::MissingCarriageReturn { offset: 16 }))
        ));
    }

    #[test]
    fn reports_invalid_utf8_offset() {
        let src = b"UID:1\r\nSUMMARY:\xFF\r\n";
        let mut reader = LineReader::new(&src[..], false);
        assert!(reader.next_line().unwrap().is_ok());
        assert!(matches!(
            reader.next_line(),
            Some(Err(LexError::InvalidUtf8 { offset: 15 }))
        ));
    }
}
