//! Unit tests for the extraction state machine and line driver.

use tbgrep::{tracebacks_from_lines, ExtractorOptions, TracebackExtractor};

use super::helpers::{sample_block, sample_lines, VARIATIONS};

#[test]
fn extracts_every_variation() {
    let mut extractor = TracebackExtractor::new(ExtractorOptions::default());
    for variation in VARIATIONS {
        let mut found = None;
        for line in variation.split('\n') {
            if let Some(block) = extractor.process(&format!("{line}\n")) {
                found = Some(block);
            }
        }
        let block = found.unwrap_or_else(|| {
            panic!("couldn't extract traceback from: {variation:?}");
        });
        let mut lines = block.lines();
        assert_eq!(lines.next(), Some("Traceback (most recent call last):"));
        let frame = lines.next().unwrap();
        assert!(
            frame.starts_with("  File \"<stdin>\", line ") && frame.ends_with(", in <module>"),
            "unexpected frame line: {frame:?}"
        );
        assert!(lines.next().unwrap().starts_with("Exception"));
        assert_eq!(lines.next(), None);
    }
}

#[test]
fn one_extractor_survives_across_inputs() {
    // A single instance scans stream after stream, like the CLI over
    // multiple files.
    let mut extractor = TracebackExtractor::new(ExtractorOptions::default());
    let mut total = 0;
    for variation in VARIATIONS {
        for line in variation.split_inclusive('\n') {
            if extractor.process(line).is_some() {
                total += 1;
            }
        }
    }
    assert_eq!(total, 3);
}

#[test]
fn from_lines_yields_blocks_in_order() {
    let mut tracebacks = tracebacks_from_lines(sample_lines());
    assert_eq!(tracebacks.next().unwrap(), sample_block(3, 6));
    assert_eq!(tracebacks.next().unwrap(), sample_block(9, 12));
    assert_eq!(tracebacks.next().unwrap(), sample_block(15, 18));
    assert_eq!(tracebacks.next(), None);
}

#[test]
fn from_lines_accepts_str_slices() {
    let lines = [
        "Traceback (most recent call last):\n",
        "  File \"a.py\", line 3, in run\n",
        "ZeroDivisionError: division by zero\n",
    ];
    let blocks: Vec<String> = tracebacks_from_lines(lines).collect();
    assert_eq!(blocks, [lines.concat()]);
}

#[test]
fn from_lines_is_lazy() {
    // Only consume one block; the iterator must not have required the
    // second traceback to be well formed.
    let lines = [
        "Traceback (most recent call last):\n".to_string(),
        "  File \"a.py\", line 1, in f\n".to_string(),
        "KeyError: 'x'\n".to_string(),
        "Traceback (most recent call last):\n".to_string(),
    ];
    let mut tracebacks = tracebacks_from_lines(lines);
    assert!(tracebacks.next().unwrap().contains("KeyError"));
    assert_eq!(tracebacks.next(), None);
}

#[test]
fn header_mid_line_strips_preceding_columns() {
    let mut extractor = TracebackExtractor::new(ExtractorOptions::default());
    assert_eq!(
        extractor.process("2024-01-01 ERROR Traceback (most recent call last):\n"),
        None
    );
    assert_eq!(
        extractor.process("2024-01-01 ERROR   File \"x.py\", line 9, in g\n"),
        None
    );
    let block = extractor
        .process("2024-01-01 ERROR TypeError: unsupported operand\n")
        .unwrap();
    assert_eq!(
        block,
        "Traceback (most recent call last):\n  File \"x.py\", line 9, in g\nTypeError: unsupported operand\n"
    );
}
