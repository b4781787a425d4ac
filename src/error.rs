use thiserror;

use crate::engine::grid::Idx;

/// The Result type for tui15.
pub(crate) type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub(crate) enum Error {
    #[error("invalid board size {0}, a board needs at least 2 rows and 2 columns")]
    InvalidSize(usize),

    #[error("position {idx} is outside of a {size}x{size} board")]
    OutOfBounds { idx: Idx, size: usize },

    #[error("recorded position {0} is not in line with the blank")]
    BrokenHistory(Idx),

    #[error("io error")]
    StdIOError(#[from] std::io::Error),

    #[error("log error")]
    LogError(#[from] log::SetLoggerError),

    #[error("{source:?}")]
    TuiError {
        #[from]
        source: crate::tui::error::TuiError,
    },

    #[error("terminal too small, required minimum size {0} x {1}")]
    TerminalTooSmall(usize, usize),
}
