//! Reader for the text trace format.
//!
//! ```text
//! n
//! method x y      (n times; 1 = insert, 2 = remove)
//! n
//! ...
//! ```
//!
//! Tokens are whitespace separated, so line layout is free. The stream
//! ends cleanly at EOF between traces; EOF inside a trace is an error.

use std::collections::VecDeque;
use std::io::BufRead;

use gds_core::{OpKind, Operation, Point, Trace, COORDINATE_MAX, COORDINATE_MIN};

use crate::error::DriverError;

/// Upper bound on pre-allocation, whatever count a trace announces.
const PREALLOCATE_OPERATIONS_MAX: usize = 4096;

/// A whitespace-delimited token and the line it came from.
#[derive(Debug)]
struct Token {
    text: String,
    line: usize,
}

/// Streams traces out of a reader.
///
/// Iterating yields one `Result` per trace and stops after the first error.
pub struct TraceReader<R> {
    reader: R,
    pending: VecDeque<Token>,
    line: usize,
    traces_read: usize,
    enforce_bounds: bool,
    failed: bool,
}

impl<R: BufRead> TraceReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
            line: 0,
            traces_read: 0,
            enforce_bounds: false,
            failed: false,
        }
    }

    /// Reject points outside `[COORDINATE_MIN, COORDINATE_MAX]`.
    #[must_use]
    pub fn with_bounds(mut self, enforce: bool) -> Self {
        self.enforce_bounds = enforce;
        self
    }

    /// Traces successfully read so far.
    #[must_use]
    pub fn traces_read(&self) -> usize {
        self.traces_read
    }

    /// Read the next trace, or `None` at a clean end of input.
    pub fn read_trace(&mut self) -> Result<Option<Trace>, DriverError> {
        let Some(count_token) = self.next_token()? else {
            return Ok(None);
        };
        let count: usize = parse_token(&count_token, "an operation count")?;
        let trace_number = self.traces_read + 1;

        let mut trace = Trace::with_capacity(count.min(PREALLOCATE_OPERATIONS_MAX));
        for read in 0..count {
            let eof = || DriverError::UnexpectedEof {
                trace: trace_number,
                read,
                expected: count,
            };

            let method = self.next_token()?.ok_or_else(eof)?;
            let code: i64 = parse_token(&method, "a method code")?;
            let kind = OpKind::from_method_code(code).ok_or(DriverError::UnknownMethod {
                line: method.line,
                code,
            })?;

            let x_token = self.next_token()?.ok_or_else(eof)?;
            let x: i32 = parse_token(&x_token, "an x coordinate")?;
            let y_token = self.next_token()?.ok_or_else(eof)?;
            let y: i32 = parse_token(&y_token, "a y coordinate")?;

            let point = Point::new(x, y);
            if self.enforce_bounds && !point.within_bounds() {
                return Err(DriverError::OutOfBounds {
                    line: y_token.line,
                    point,
                    min: COORDINATE_MIN,
                    max: COORDINATE_MAX,
                });
            }

            trace.operations.push(Operation::new(kind, point));
        }

        self.traces_read = trace_number;
        Ok(Some(trace))
    }

    fn next_token(&mut self) -> Result<Option<Token>, DriverError> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }

            let mut buf = String::new();
            if self.reader.read_line(&mut buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;

            let line = self.line;
            self.pending.extend(buf.split_whitespace().map(|text| Token {
                text: text.to_string(),
                line,
            }));
        }
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<Trace, DriverError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.read_trace() {
            Ok(trace) => trace.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

fn parse_token<T: std::str::FromStr>(
    token: &Token,
    expected: &'static str,
) -> Result<T, DriverError> {
    token.text.parse().map_err(|_| DriverError::InvalidToken {
        line: token.line,
        token: token.text.clone(),
        expected,
    })
}

/// Read every trace from `input`.
pub fn parse_traces(input: &str) -> Result<Vec<Trace>, DriverError> {
    TraceReader::new(input.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_multiple_traces() {
        let input = "4\n1 1 1\n1 2 2\n2 1 1\n2 2 2\n2\n1 3 3\n2 3 3\n";
        let traces = parse_traces(input).unwrap();
        assert_eq!(traces.len(), 2);
        assert_eq!(
            traces[0],
            Trace::new().insert(1, 1).insert(2, 2).remove(1, 1).remove(2, 2)
        );
        assert_eq!(traces[1], Trace::new().insert(3, 3).remove(3, 3));
    }

    #[test]
    fn test_layout_is_free() {
        let traces = parse_traces("  2 1 5\n 5 2\n5 5   ").unwrap();
        assert_eq!(traces, vec![Trace::new().insert(5, 5).remove(5, 5)]);
    }

    #[test]
    fn test_empty_input_has_no_traces() {
        assert!(parse_traces("").unwrap().is_empty());
        assert!(parse_traces("\n   \n").unwrap().is_empty());
    }

    #[test]
    fn test_zero_count_is_empty_trace() {
        let traces = parse_traces("0\n0\n").unwrap();
        assert_eq!(traces, vec![Trace::new(), Trace::new()]);
    }

    #[test]
    fn test_unknown_method_reports_line() {
        let err = parse_traces("2\n1 1 1\n3 1 1\n").unwrap_err();
        match err {
            DriverError::UnknownMethod { line, code } => {
                assert_eq!(line, 3);
                assert_eq!(code, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_tokens() {
        let err = parse_traces("x\n").unwrap_err();
        assert!(matches!(err, DriverError::InvalidToken { line: 1, .. }));

        let err = parse_traces("-1\n").unwrap_err();
        assert!(matches!(err, DriverError::InvalidToken { .. }));

        let err = parse_traces("1\n1 a 2\n").unwrap_err();
        assert!(err.to_string().contains("x coordinate"));
        assert!(err.to_string().contains("`a`"));
    }

    #[test]
    fn test_eof_inside_trace() {
        let err = parse_traces("1\n1 1 1\n3\n1 1 1\n2 1").unwrap_err();
        match err {
            DriverError::UnexpectedEof {
                trace,
                read,
                expected,
            } => {
                assert_eq!(trace, 2);
                assert_eq!(read, 1);
                assert_eq!(expected, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bounds_only_when_enforced() {
        let input = "1\n1 0 101\n";
        assert!(parse_traces(input).is_ok());

        let mut reader = TraceReader::new(input.as_bytes()).with_bounds(true);
        let err = reader.read_trace().unwrap_err();
        assert!(matches!(err, DriverError::OutOfBounds { line: 2, .. }));
    }

    #[test]
    fn test_iteration_stops_after_error() {
        let mut reader = TraceReader::new("1\n9 1 1\n1\n1 1 1\n".as_bytes());
        assert!(matches!(reader.next(), Some(Err(_))));
        assert!(reader.next().is_none());
        assert_eq!(reader.traces_read(), 0);
    }

    #[test]
    fn test_huge_count_does_not_preallocate() {
        let err = parse_traces("18446744073709551615\n1 1 1\n").unwrap_err();
        assert!(matches!(err, DriverError::UnexpectedEof { read: 1, .. }));
    }
}
