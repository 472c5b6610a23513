use std::io::{self, Read, Seek, SeekFrom, Write};

use crate::error::TeeError;
use crate::source::ReadAt;

/// Reader over a section `[off, off + n)` of an underlying [`ReadAt`] source
/// that forwards every byte it reads sequentially to a sink, at most once.
///
/// The forwarding is driven by a ratchet: a high-water mark of how far into
/// the section bytes have already been handed to the sink. A sequential read
/// forwards only the part of its fetch that lies above the mark, so seeking
/// back and reading the same range again fetches the bytes again but sends
/// nothing new to the sink. This exists for transports that read a payload
/// twice (once to checksum it, once to transfer it): wire the checksummer in
/// as the sink and the double read no longer double-counts.
///
/// Seeking never moves the ratchet, and indexed reads through the reader's
/// own [`ReadAt`] impl bypass it entirely.
pub struct TeeSectionReader<R, W> {
    source: R,
    sink: W,
    base: u64,
    off: u64,
    limit: u64,
    written: u64,
}

impl<R: ReadAt, W: Write> TeeSectionReader<R, W> {
    /// Creates a reader over the `n` bytes of `source` starting at absolute
    /// offset `off`, teeing to `sink`. Neither collaborator is closed or
    /// otherwise managed; pass `&source` / `&mut sink` to keep ownership.
    pub fn new(source: R, sink: W, off: u64, n: u64) -> TeeSectionReader<R, W> {
        TeeSectionReader {
            source,
            sink,
            base: off,
            off,
            limit: off.saturating_add(n),
            written: off,
        }
    }

    /// Length of the section in bytes.
    pub fn size(&self) -> u64 {
        self.limit - self.base
    }

    /// Current cursor, relative to the start of the section. May point past
    /// the end after a seek; sequential reads from there return no data.
    pub fn position(&self) -> u64 {
        self.off - self.base
    }
}

impl<R: ReadAt, W: Write> Read for TeeSectionReader<R, W> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.off >= self.limit {
            return Ok(0);
        }
        let max = (self.limit - self.off) as usize;
        let want = buf.len().min(max);
        let start = self.off;
        let n = self.source.read_at(&mut buf[..want], start)?;
        self.off += n as u64;

        if n > 0 && self.off > self.written {
            // Only the part of the fetch above the ratchet is new territory.
            // After a backward seek that can be a suffix of the fetch, or
            // nothing at all.
            let skip = self.written.saturating_sub(start) as usize;
            let fresh = &buf[skip..n];
            let accepted = self.sink.write(fresh)?;
            self.written = self.written.max(start) + accepted as u64;
            if accepted < fresh.len() {
                return Err(TeeError::SinkLagging {
                    forwarded: fresh.len(),
                    accepted,
                }
                .into());
            }
        }

        Ok(n)
    }
}

impl<R: ReadAt, W: Write> Seek for TeeSectionReader<R, W> {
    /// Moves the cursor without touching the ratchet or the sink. The target
    /// may lie past the end of the section; it may not precede its start.
    /// Returns the new cursor relative to the start of the section.
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(delta) => self.base as i128 + delta as i128,
            SeekFrom::Current(delta) => self.off as i128 + delta as i128,
            SeekFrom::End(delta) => self.limit as i128 + delta as i128,
        };
        if target < self.base as i128 {
            return Err(TeeError::SeekBeforeStart.into());
        }
        self.off = u64::try_from(target).unwrap_or(u64::MAX);
        Ok(self.off - self.base)
    }
}

impl<R: ReadAt, W> ReadAt for TeeSectionReader<R, W> {
    /// Reads at a section-relative offset straight from the source. Does not
    /// move the cursor, does not advance the ratchet, never contacts the
    /// sink: a peek with no side effects on the tee.
    fn read_at(&self, buf: &mut [u8], off: u64) -> io::Result<usize> {
        if off >= self.limit - self.base {
            return Ok(0);
        }
        let abs = self.base + off;
        let max = (self.limit - abs) as usize;
        if buf.len() > max {
            self.source.read_at(&mut buf[..max], abs)
        } else {
            self.source.read_at(buf, abs)
        }
    }
}
