//! Output sinks.
//!
//! A [`Sink`] is an append-only destination that can tell whether it already
//! ends in a blank line, which is all newline suppression needs. Sinks that
//! can also replay and truncate their content opt into [`Markable`]; the
//! renderer re-flows paragraphs only on those and passes text through
//! unchanged everywhere else.

use std::io::{self, Write};

/// Append-only destination for rendered text.
pub trait Sink {
    /// Append text.
    fn write_str(&mut self, s: &str) -> io::Result<()>;

    /// Whether the last two characters written are both newlines.
    fn at_blank_line(&self) -> bool;

    /// Request a line break.
    ///
    /// Does nothing when the sink already ends in a blank line, so any number
    /// of independent requests never produce more than one blank line.
    fn emit_newline(&mut self) -> io::Result<()> {
        if self.at_blank_line() {
            return Ok(());
        }
        self.write_str("\n")
    }

    /// Mark/replay capability, if this sink supports it.
    fn as_markable(&mut self) -> Option<&mut dyn Markable> {
        None
    }

    /// Flush buffered output to the underlying destination.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Saved position in a [`Markable`] sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Mark(usize);

impl Mark {
    /// Byte offset of the mark.
    #[must_use]
    pub fn position(self) -> usize {
        self.0
    }
}

/// Random-access capability for sinks kept in memory.
///
/// Content before a mark is never touched; content after it can be read
/// back and removed.
pub trait Markable {
    /// Current end of the content.
    fn mark(&self) -> Mark;

    /// Everything written since `mark`.
    fn since(&self, mark: Mark) -> &str;

    /// Drop everything written since `mark`.
    fn truncate_to(&mut self, mark: Mark);

    /// Read and drop everything written since `mark`.
    fn take_since(&mut self, mark: Mark) -> String {
        let taken = self.since(mark).to_owned();
        self.truncate_to(mark);
        taken
    }
}

impl Sink for String {
    fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.push_str(s);
        Ok(())
    }

    fn at_blank_line(&self) -> bool {
        self.ends_with("\n\n")
    }

    fn as_markable(&mut self) -> Option<&mut dyn Markable> {
        Some(self)
    }
}

impl Markable for String {
    fn mark(&self) -> Mark {
        Mark(self.len())
    }

    fn since(&self, mark: Mark) -> &str {
        self.get(mark.0..).unwrap_or_default()
    }

    fn truncate_to(&mut self, mark: Mark) {
        if self.is_char_boundary(mark.0) {
            self.truncate(mark.0);
        }
    }
}

/// Streaming sink over any [`Write`] destination.
///
/// Remembers only the last two bytes written, enough for newline
/// suppression. It is not [`Markable`], so paragraphs written through it
/// are not re-flowed.
#[derive(Debug)]
pub struct StreamSink<W: Write> {
    inner: W,
    tail: [Option<u8>; 2],
}

impl<W: Write> StreamSink<W> {
    /// Wrap a writer.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            tail: [None, None],
        }
    }

    /// Unwrap the writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Sink for StreamSink<W> {
    fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.inner.write_all(s.as_bytes())?;
        match *s.as_bytes() {
            [] => {}
            [last] => self.tail = [self.tail[1], Some(last)],
            [.., before, last] => self.tail = [Some(before), Some(last)],
        }
        Ok(())
    }

    fn at_blank_line(&self) -> bool {
        self.tail == [Some(b'\n'), Some(b'\n')]
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_emit_newline_collapses_runs() {
        let mut out = String::new();
        out.write_str("a").unwrap();
        for _ in 0..5 {
            out.emit_newline().unwrap();
        }
        out.write_str("b").unwrap();
        assert_eq!(out, "a\n\nb");
    }

    #[test]
    fn test_emit_newline_on_empty_sink() {
        let mut out = String::new();
        out.emit_newline().unwrap();
        out.emit_newline().unwrap();
        out.emit_newline().unwrap();
        assert_eq!(out, "\n\n");
    }

    #[test]
    fn test_take_since_truncates() {
        let mut out = String::from("keep ");
        let mark = out.mark();
        out.write_str("replace me").unwrap();
        assert_eq!(out.since(mark), "replace me");
        assert_eq!(out.take_since(mark), "replace me");
        assert_eq!(out, "keep ");
        assert_eq!(mark.position(), 5);
    }

    #[test]
    fn test_mark_past_end_reads_nothing() {
        let mut out = String::from("abc");
        let mark = out.mark();
        out.truncate(1);
        assert_eq!(out.take_since(mark), "");
        assert_eq!(out, "a");
    }

    #[test]
    fn test_string_is_markable() {
        let mut out = String::new();
        assert!(out.as_markable().is_some());
    }

    #[test]
    fn test_stream_sink_tracks_tail() {
        let mut sink = StreamSink::new(Vec::new());
        sink.write_str("x").unwrap();
        sink.emit_newline().unwrap();
        assert!(!sink.at_blank_line());
        sink.emit_newline().unwrap();
        assert!(sink.at_blank_line());
        sink.emit_newline().unwrap();
        assert!(sink.as_markable().is_none());
        assert_eq!(sink.into_inner(), b"x\n\n");
    }

    #[test]
    fn test_stream_sink_single_byte_writes() {
        let mut sink = StreamSink::new(Vec::new());
        sink.write_str("ab\n").unwrap();
        sink.write_str("\n").unwrap();
        assert!(sink.at_blank_line());
        sink.write_str("").unwrap();
        assert!(sink.at_blank_line());
    }
}
