pub mod chapter;
pub mod file;
pub mod text;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub use chapter::{Session, SessionSummary};
pub use file::{SessionFile, SessionOptions, SessionSource};
pub use text::{SessionText, TypoError};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session has no sections")]
    EmptySession,
    #[error("failed to read session file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse session file")]
    Parse(#[from] serde_yaml::Error),
    #[error("no bundled session named {0:?}")]
    UnknownBundled(String),
}
