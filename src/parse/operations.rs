//! Reader for the line-oriented `vertex : token` operation spec.

use super::error::OperationSpecError;
use crate::compute::{Operation, OperationMap};
use regex::Regex;
use std::sync::OnceLock;

fn entry_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\w+)\s*:\s*(\S+)$").expect("BUG: operation entry pattern must compile")
    })
}

/// Reads the operation map. With `framed`, the first and last lines are a
/// header and footer and are skipped. Blank lines are ignored.
///
/// A later entry for the same vertex replaces an earlier one.
pub fn read_operations(text: &str, framed: bool) -> Result<OperationMap, OperationSpecError> {
    let lines: Vec<&str> = text.lines().collect();
    let body = match (framed, lines.len()) {
        (false, _) => 0..lines.len(),
        (true, n) if n < 2 => 0..0,
        (true, n) => 1..n - 1,
    };

    let mut operations = OperationMap::new();
    for idx in body {
        let line = lines[idx].trim();
        if line.is_empty() {
            continue;
        }
        let caps = entry_pattern()
            .captures(line)
            .ok_or_else(|| OperationSpecError { line: idx + 1, text: line.to_string() })?;
        operations.insert(caps[1].into(), Operation::parse(&caps[2]));
    }

    tracing::debug!(entries = operations.len(), "operation spec read");
    Ok(operations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Vertex;

    fn op<'a>(map: &'a OperationMap, name: &str) -> &'a Operation {
        &map[&Vertex::from(name)]
    }

    #[test]
    fn test_framed_spec_skips_header_and_footer() {
        let text = "{\nb : +\na: 2\n  c :3  \n}";
        let ops = read_operations(text, true).unwrap();

        assert_eq!(ops.len(), 3);
        assert_eq!(op(&ops, "b"), &Operation::Add);
        assert_eq!(op(&ops, "a"), &Operation::Constant(2.0));
        assert_eq!(op(&ops, "c"), &Operation::Constant(3.0));
    }

    #[test]
    fn test_unframed_spec_reads_every_line() {
        let ops = read_operations("x : exp\n\ny : *", false).unwrap();
        assert_eq!(op(&ops, "x"), &Operation::Exp);
        assert_eq!(op(&ops, "y"), &Operation::Multiply);
    }

    #[test]
    fn test_unknown_token_is_kept_for_the_evaluator() {
        let ops = read_operations("z : sin", false).unwrap();
        assert_eq!(op(&ops, "z"), &Operation::Unknown("sin".into()));
    }

    #[test]
    fn test_bad_entry_reports_its_line() {
        let err = read_operations("begin\na : 1\nb = 2\nend", true).unwrap_err();
        assert_eq!(err, OperationSpecError { line: 3, text: "b = 2".into() });
    }

    #[test]
    fn test_frame_only_spec_is_empty() {
        assert!(read_operations("begin\nend", true).unwrap().is_empty());
        assert!(read_operations("only", true).unwrap().is_empty());
    }
}
