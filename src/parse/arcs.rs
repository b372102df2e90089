//! arcs.rs
//! Reads `(source, target, ordinal)` triples from raw text and checks the
//! ordinal invariants incrementally.

use super::error::StructuralError;
use crate::store::{Arc, Ordinal, Vertex};
use regex::Regex;
use std::collections::{BTreeSet, HashMap};
use std::io::BufRead;
use std::sync::OnceLock;

fn triple_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\((\w+),(\w+),([0-9]+)\)$").expect("BUG: arc triple pattern must compile")
    })
}

/// Everything the parser saw: the vertex set, every well-formed arc (including
/// conflicting ones) and the structural errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedGraph {
    pub vertices: BTreeSet<Vertex>,
    pub arcs: Vec<Arc>,
    pub errors: Vec<StructuralError>,
}

impl ParsedGraph {
    pub fn is_valid(&self) -> bool { self.errors.is_empty() }
}

/// Incremental parser. Lines may be fed one at a time by a reader.
#[derive(Debug, Default)]
pub struct ArcParser {
    graph: ParsedGraph,
    // target -> ordinal -> first source claiming it
    slots: HashMap<Vertex, HashMap<Ordinal, Vertex>>,
    // (source, target) -> distinct ordinals in first-seen order
    pair_ordinals: HashMap<(Vertex, Vertex), Vec<Ordinal>>,
}

impl ArcParser {
    pub fn new() -> Self { Self::default() }

    /// Parses one line. `line_no` is 1-based and only used in diagnostics.
    pub fn feed_line(&mut self, line_no: usize, line: &str) {
        let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
        let inner = compact
            .trim_end_matches(',')
            .trim_start_matches('(')
            .trim_end_matches(')');

        for piece in inner.split("),(").filter(|p| !p.is_empty()) {
            let candidate = format!("({})", piece);
            match Self::match_triple(&candidate) {
                Some(arc) => self.record(line_no, arc),
                None => {
                    tracing::warn!(line = line_no, text = %candidate, "malformed arc");
                    self.graph.errors.push(StructuralError::Malformed { line: line_no, text: candidate });
                }
            }
        }
    }

    pub fn finish(self) -> ParsedGraph {
        tracing::debug!(
            vertices = self.graph.vertices.len(),
            arcs = self.graph.arcs.len(),
            errors = self.graph.errors.len(),
            "arc list parsed"
        );
        self.graph
    }

    fn match_triple(candidate: &str) -> Option<Arc> {
        let caps = triple_pattern().captures(candidate)?;
        // Digits beyond the ordinal range are reported as malformed.
        let ordinal = caps[3].parse::<Ordinal>().ok()?;
        Some(Arc::new(&caps[1], &caps[2], ordinal))
    }

    fn record(&mut self, line: usize, arc: Arc) {
        let Arc { source, target, ordinal } = &arc;

        // Invariant: one source per ordinal of a target.
        let slots = self.slots.entry(target.clone()).or_default();
        match slots.get(ordinal) {
            Some(existing) if existing != source => {
                tracing::warn!(line, %source, %target, ordinal, %existing, "ordinal already taken");
                self.graph.errors.push(StructuralError::OrdinalTaken {
                    line,
                    from: source.clone(),
                    to: target.clone(),
                    ordinal: *ordinal,
                    existing: existing.clone(),
                });
            }
            Some(_) => {}
            None => {
                slots.insert(*ordinal, source.clone());
            }
        }

        // Invariant: one ordinal per (source, target) pair.
        let seen = self.pair_ordinals.entry((source.clone(), target.clone())).or_default();
        for &previous in seen.iter().filter(|&&o| o != *ordinal) {
            tracing::warn!(line, %source, %target, previous, current = ordinal, "conflicting pair ordinals");
            self.graph.errors.push(StructuralError::OrdinalConflict {
                line,
                from: source.clone(),
                to: target.clone(),
                previous,
                current: *ordinal,
            });
        }
        if !seen.contains(ordinal) {
            seen.push(*ordinal);
        }

        self.graph.vertices.insert(source.clone());
        self.graph.vertices.insert(target.clone());
        self.graph.arcs.push(arc);
    }
}

/// Parses a whole text, one logical record per line.
pub fn parse(text: &str) -> ParsedGraph {
    let mut parser = ArcParser::new();
    for (idx, line) in text.lines().enumerate() {
        parser.feed_line(idx + 1, line);
    }
    parser.finish()
}

/// Parses line by line from a reader.
pub fn parse_reader<R: BufRead>(reader: R) -> std::io::Result<ParsedGraph> {
    let mut parser = ArcParser::new();
    for (idx, line) in reader.lines().enumerate() {
        parser.feed_line(idx + 1, &line?);
    }
    Ok(parser.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("(a,b,0)", 1)]
    #[case("(a, b, 0), (c, b, 1)", 2)]
    #[case("  ( a ,\tb , 0 ) ,", 1)]
    #[case("(a,b,0),(c,b,1),(d,b,2),,", 3)]
    #[case("(node_1,Sum2,10)", 1)]
    #[case("", 0)]
    #[case("   ", 0)]
    fn test_well_formed_lines(#[case] line: &str, #[case] expected_arcs: usize) {
        let parsed = parse(line);
        assert!(parsed.is_valid(), "unexpected errors: {:?}", parsed.errors);
        assert_eq!(parsed.arcs.len(), expected_arcs);
    }

    #[rstest]
    #[case("(a,b)", "(a,b)")]
    #[case("(a,b,-1)", "(a,b,-1)")]
    #[case("(a,b,x)", "(a,b,x)")]
    #[case("(a-b,c,0)", "(a-b,c,0)")]
    #[case("(a,b,0,1)", "(a,b,0,1)")]
    #[case("(a,b,99999999999)", "(a,b,99999999999)")]
    fn test_malformed_triples(#[case] line: &str, #[case] reported: &str) {
        let parsed = parse(line);
        assert_eq!(
            parsed.errors,
            vec![StructuralError::Malformed { line: 1, text: reported.to_string() }]
        );
        assert!(parsed.arcs.is_empty());
    }

    #[test]
    fn test_bad_triple_does_not_stop_the_line() {
        let parsed = parse("(a,b,0),(oops),(c,b,1)");
        assert_eq!(parsed.arcs.len(), 2);
        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(parsed.errors[0].line(), 1);
    }

    #[test]
    fn test_errors_carry_line_numbers() {
        let parsed = parse("(a,b,0)\n\n(c,d)\n(e,f,1)");
        assert_eq!(parsed.errors, vec![StructuralError::Malformed { line: 3, text: "(c,d)".into() }]);
        assert_eq!(parsed.arcs.len(), 2);
    }

    #[test]
    fn test_shared_ordinal_reports_once_and_keeps_both_arcs() {
        let parsed = parse("(a,b,0),(c,b,0)");
        assert_eq!(parsed.arcs.len(), 2);
        assert_eq!(
            parsed.errors,
            vec![StructuralError::OrdinalTaken {
                line: 1,
                from: "c".into(),
                to: "b".into(),
                ordinal: 0,
                existing: "a".into(),
            }]
        );
    }

    #[test]
    fn test_pair_with_two_ordinals_is_a_conflict() {
        let parsed = parse("(a,b,0)\n(a,b,1)");
        assert_eq!(parsed.arcs.len(), 2);
        assert_eq!(
            parsed.errors,
            vec![StructuralError::OrdinalConflict {
                line: 2,
                from: "a".into(),
                to: "b".into(),
                previous: 0,
                current: 1,
            }]
        );
        assert!(parsed.errors[0].to_string().contains("found 0 and 1"));
    }

    #[test]
    fn test_pair_conflict_survives_shared_slot() {
        // c loses slot 0 to a, but its own ordinal 0 still conflicts with 1.
        let parsed = parse("(a,b,0),(c,b,0),(c,b,1)");
        assert_eq!(parsed.errors.len(), 2);
        assert!(matches!(parsed.errors[0], StructuralError::OrdinalTaken { .. }));
        assert!(matches!(
            parsed.errors[1],
            StructuralError::OrdinalConflict { previous: 0, current: 1, .. }
        ));
    }

    #[test]
    fn test_repeated_identical_arc_is_accepted() {
        let parsed = parse("(a,b,0),(a,b,0)");
        assert!(parsed.is_valid());
        assert_eq!(parsed.arcs.len(), 2);
    }

    #[test]
    fn test_same_ordinal_on_different_targets_is_fine() {
        let parsed = parse("(a,b,0),(c,d,0),(a,d,1)");
        assert!(parsed.is_valid());
        let names: Vec<&str> = parsed.vertices.iter().map(Vertex::as_str).collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_reader_matches_text_parse() {
        let text = "(a,b,0)\n(c,b,1),\n(x,y)";
        let from_reader = parse_reader(std::io::Cursor::new(text)).unwrap();
        assert_eq!(from_reader, parse(text));
    }
}
