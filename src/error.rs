//! Error types for the textarea core.

use std::fmt;

/// Result type alias for textarea operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Why an edit was refused.
///
/// A rejected edit leaves the buffer rune-for-rune identical to its
/// pre-call state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// The insertion would push the total rune count past the limit.
    CharLimitExceeded { limit: usize, attempted: usize },
    /// The edit would create more logical lines than allowed.
    LineLimitExceeded { limit: usize, attempted: usize },
    /// After re-wrapping, the cursor line would need more rows than the budget.
    OverflowGuard { rows: usize, budget: usize },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CharLimitExceeded { limit, attempted } => {
                write!(f, "char limit exceeded: {attempted} > {limit}")
            }
            Self::LineLimitExceeded { limit, attempted } => {
                write!(f, "line limit exceeded: {attempted} > {limit}")
            }
            Self::OverflowGuard { rows, budget } => {
                write!(f, "wrapped line needs {rows} rows, budget is {budget}")
            }
        }
    }
}

/// Error type for textarea operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Rune offset outside `[0, len]` of a line.
    OutOfRange { line: usize, offset: usize, len: usize },
    /// Line index outside the buffer.
    LineOutOfRange { line: usize, lines: usize },
    /// The edit policy refused the mutation.
    Rejected(Rejection),
}

impl Error {
    /// The rejection reason, if this is a policy rejection.
    #[must_use]
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Self::Rejected(r) => Some(*r),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { line, offset, len } => {
                write!(f, "offset {offset} out of range for line {line} of length {len}")
            }
            Self::LineOutOfRange { line, lines } => {
                write!(f, "line {line} out of range for buffer with {lines} lines")
            }
            Self::Rejected(reason) => write!(f, "edit rejected: {reason}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<Rejection> for Error {
    fn from(r: Rejection) -> Self {
        Self::Rejected(r)
    }
}
