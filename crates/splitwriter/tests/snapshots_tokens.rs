#![expect(missing_docs)]

use std::io::{self, Write};

use insta::assert_snapshot;
use splitwriter::{ScanBytes, ScanLines, ScanRunes, ScanWords, SplitWriter, produce_chunks};

mod common;

#[test]
fn snapshot_lines() {
    assert_snapshot!(common::render(ScanLines, &common::STREAM), @r#"
    "Compiling splitwriter v0.1.0"
    "  Finished `dev` profile in 0.42s"
    ""
    "Running tests ✓"
    "error: oops"
    "done"
    "#);
}

#[test]
fn snapshot_words() {
    assert_snapshot!(common::render(ScanWords, &common::STREAM), @r#"
    "Compiling"
    "splitwriter"
    "v0.1.0"
    "Finished"
    "`dev`"
    "profile"
    "in"
    "0.42s"
    "Running"
    "tests"
    "✓"
    "error:"
    "oops"
    "done"
    "#);
}

#[test]
fn snapshot_runes_across_chunks() {
    let chunks: &[&[u8]] = &[b"\xE2", b"\x9C\x93", b"\xC3", b"\xA5\xFF!"];
    assert_snapshot!(common::render(ScanRunes, chunks), @r#"
    "✓"
    "å"
    "�"
    "!"
    "#);
}

#[test]
fn example_io_copy() {
    let mut result = Vec::new();
    let mut writer = SplitWriter::new(|token: &[u8]| {
        result.push(String::from_utf8_lossy(token).into_owned());
        Ok::<(), io::Error>(())
    });
    writer.set_split(ScanLines).unwrap();
    let copied = io::copy(&mut &b"one\ntwo\nthree\n"[..], &mut writer).unwrap();
    writer.flush().unwrap();
    drop(writer);
    assert_eq!(copied, 14);
    assert_eq!(result, ["one", "two", "three"]);
}

#[test]
fn every_chunking_yields_the_same_lines() {
    let payload = common::STREAM.concat();
    let whole = common::render(ScanLines, &[payload.as_slice()]);
    for parts in 1..=payload.len() {
        let chunks = produce_chunks(&payload, parts);
        assert_eq!(common::render(ScanLines, &chunks), whole, "parts = {parts}");
    }
    assert_eq!(common::render(ScanBytes, &[payload.as_slice()]).lines().count(), payload.len());
}
