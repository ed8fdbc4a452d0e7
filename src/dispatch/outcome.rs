//! Dispatch outcomes and console reporting.

use std::io::{self, Write};

use crate::ao::{DispatchError, MessageId};

/// Terminal result of a dispatch.
#[derive(Debug)]
pub enum DispatchOutcome {
    Delivered(MessageId),
    Failed(DispatchError),
}

impl DispatchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DispatchOutcome::Delivered(_))
    }

    /// Process exit status for this outcome.
    pub fn exit_code(&self) -> u8 {
        match self {
            DispatchOutcome::Delivered(_) => 0,
            DispatchOutcome::Failed(_) => 1,
        }
    }
}

/// Print the outcome: the message id to `out`, or the error to `err`.
///
/// Exactly one line is written, to exactly one of the two streams.
pub fn report<O: Write, E: Write>(
    outcome: &DispatchOutcome,
    out: &mut O,
    err: &mut E,
) -> io::Result<u8> {
    match outcome {
        DispatchOutcome::Delivered(id) => {
            writeln!(out, "{}", id)?;
            out.flush()?;
        }
        DispatchOutcome::Failed(e) => {
            writeln!(err, "{}", e)?;
            err.flush()?;
        }
    }
    Ok(outcome.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_success() {
        let outcome = DispatchOutcome::Delivered(MessageId("V".to_string()));
        let (mut out, mut err) = (Vec::new(), Vec::new());

        let code = report(&outcome, &mut out, &mut err).unwrap();
        assert_eq!(code, 0);
        assert_eq!(String::from_utf8(out).unwrap(), "V\n");
        assert!(err.is_empty());
    }

    #[test]
    fn test_report_failure() {
        let outcome = DispatchOutcome::Failed(DispatchError::Transport("connection refused".into()));
        let (mut out, mut err) = (Vec::new(), Vec::new());

        let code = report(&outcome, &mut out, &mut err).unwrap();
        assert_eq!(code, 1);
        assert!(out.is_empty());
        assert_eq!(
            String::from_utf8(err).unwrap(),
            "Transport error: connection refused\n"
        );
    }

    #[test]
    fn test_exit_codes() {
        assert!(DispatchOutcome::Delivered(MessageId("x".into())).is_success());
        assert_eq!(DispatchOutcome::Failed(DispatchError::Timeout(1)).exit_code(), 1);
    }
}
