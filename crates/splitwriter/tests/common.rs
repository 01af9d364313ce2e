#![allow(missing_docs, dead_code)]

use core::convert::Infallible;

use splitwriter::{Split, SplitWriter};

/// Process output as it typically arrives: chunk boundaries fall inside
/// lines, inside CRLF pairs and inside multi-byte characters.
pub const STREAM: [&[u8]; 9] = [
    b"Compiling split",
    b"writer v0.1.0\r",
    b"\n  Finished `dev` pro",
    b"file in 0.42s\n\n",
    b"Running tests \xE2\x9C",
    b"\x93\nerror: ",
    b"oops\r\n",
    b"done",
    b"\n",
];

/// Feed `chunks` through a writer using `split` and render each delivered
/// token on its own line.
pub fn render<S>(split: S, chunks: &[&[u8]]) -> String
where
    S: Split + Send + Sync + 'static,
{
    let mut tokens = Vec::new();
    {
        let mut writer = SplitWriter::new(|token: &[u8]| {
            tokens.push(String::from_utf8_lossy(token).into_owned());
            Ok::<(), Infallible>(())
        });
        writer.set_split(split).unwrap();
        for chunk in chunks {
            assert_eq!(writer.accept(chunk).unwrap(), chunk.len());
        }
    }
    tokens
        .iter()
        .map(|t| format!("{t:?}"))
        .collect::<Vec<_>>()
        .join("\n")
}
