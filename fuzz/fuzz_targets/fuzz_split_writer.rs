#![no_main]
use std::convert::Infallible;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use splitwriter::{ScanBytes, ScanLines, ScanRunes, ScanWords, Split, SplitWriter};

#[derive(Debug, Clone, Copy, Arbitrary)]
enum Strategy {
    Bytes,
    Runes,
    Lines,
    Words,
}

#[derive(Debug, Arbitrary)]
struct Input {
    strategy: Strategy,
    split_seed: u64,
    payload: Vec<u8>,
}

/// Tokens delivered, bytes left pending, and the sum of all reported counts.
type Outcome = (Vec<Vec<u8>>, Vec<u8>, usize);

fn run<S>(split: S, chunks: &[&[u8]]) -> Outcome
where
    S: Split + Send + Sync + 'static,
{
    let mut tokens = Vec::new();
    let mut accepted = 0;
    let pending = {
        let mut writer = SplitWriter::new(|token: &[u8]| {
            tokens.push(token.to_vec());
            Ok::<(), Infallible>(())
        });
        writer.set_split(split).unwrap();
        for chunk in chunks {
            accepted += writer.accept(chunk).unwrap();
        }
        writer.pending().to_vec()
    };
    (tokens, pending, accepted)
}

fn run_strategy(strategy: Strategy, chunks: &[&[u8]]) -> Outcome {
    match strategy {
        Strategy::Bytes => run(ScanBytes, chunks),
        Strategy::Runes => run(ScanRunes, chunks),
        Strategy::Lines => run(ScanLines, chunks),
        Strategy::Words => run(ScanWords, chunks),
    }
}

/// Split `payload` into chunks at random positions drawn from `seed`.
fn split_at_random(payload: &[u8], seed: u64) -> Vec<&[u8]> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut chunks = Vec::new();
    let mut rest = payload;
    while !rest.is_empty() {
        let (chunk, tail) = rest.split_at(rng.random_range(0..=rest.len()));
        chunks.push(chunk);
        rest = tail;
    }
    chunks
}

fn split_writer(input: Input) {
    let chunks = split_at_random(&input.payload, input.split_seed);
    let chunked = run_strategy(input.strategy, &chunks);
    let whole = run_strategy(input.strategy, &[input.payload.as_slice()]);

    assert_eq!(chunked.2, input.payload.len());
    assert_eq!(chunked, whole);
}

fuzz_target!(|input: Input| split_writer(input));
