// Errors here cross two very different boundaries. Text from the outside
// world (truth-table hex, CLI sizes) can be malformed, and callers want to
// reject it cheaply; a failed internal consistency check (a walk that does
// not return its table to the original variable order) is a bug in the
// caller or in the search itself. Both kinds carry a backtrace and are
// emitted into the tracing/logging system the moment they are created, so
// one breakpoint in Error::new traps every error in the system.

use std::borrow::Cow;
use backtrace_error::DynBacktraceError;
use tracing::error;

#[cfg(test)]
use test_log::test;

/// What went wrong, at the granularity callers act on: reject the input,
/// or report the bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadInput,
    Invariant,
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    #[allow(dead_code)]
    inner: DynBacktraceError,
}
pub type Result<T> = std::result::Result<T, Error>;

struct Msg(Cow<'static, str>);
impl std::fmt::Debug for Msg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for Msg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::error::Error for Msg {}

impl Error {
    fn new(kind: ErrorKind, msg: Cow<'static, str>) -> Error {
        error!(target: "railcut", "{:?}: {}", kind, msg);
        let inner = DynBacktraceError::from(Msg(msg));
        Error { kind, inner }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// Malformed outside input: hex text of the wrong length, characters that
/// are not hex digits, sizes out of range.
pub fn bad_input(msg: impl Into<Cow<'static, str>>) -> Error {
    Error::new(ErrorKind::BadInput, msg.into())
}

/// A broken internal invariant, reported by the consistency checks the
/// searches run after restoring their truth table.
pub fn invariant(msg: impl Into<Cow<'static, str>>) -> Error {
    Error::new(ErrorKind::Invariant, msg.into())
}

#[test]
fn test_error_kinds() {
    let parse = bad_input("truth table text too short");
    assert_eq!(parse.kind(), ErrorKind::BadInput);
    let check = invariant("permutation failed to restore");
    assert_eq!(check.kind(), ErrorKind::Invariant);
}
