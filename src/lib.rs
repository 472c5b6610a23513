pub mod error;
pub mod section;
pub mod source;

pub use error::TeeError;
pub use section::TeeSectionReader;
pub use source::ReadAt;
