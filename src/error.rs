use std::io;

use thiserror::Error;

/// Failures specific to the section reader itself. Anything the underlying
/// source or sink reports is passed through as its own `io::Error` instead.
#[derive(Debug, Error)]
pub enum TeeError {
    /// The sink accepted fewer bytes than were forwarded to it during a
    /// sequential read. The ratchet has advanced only past the accepted
    /// bytes, so it still agrees with what the sink actually holds.
    #[error("sink accepted {accepted} of {forwarded} forwarded bytes")]
    SinkLagging { forwarded: usize, accepted: usize },

    /// A seek would have placed the cursor before the start of the section.
    #[error("seek to a position before the start of the section")]
    SeekBeforeStart,
}

impl From<TeeError> for io::Error {
    fn from(err: TeeError) -> io::Error {
        let kind = match err {
            TeeError::SinkLagging { .. } => io::ErrorKind::WriteZero,
            TeeError::SeekBeforeStart => io::ErrorKind::InvalidInput,
        };
        io::Error::new(kind, err)
    }
}
