use alloc::{string::String, vec::Vec};

use bstr::ByteSlice;
use thiserror::Error;

use crate::{Callback, Handler, SplitWriter};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("handle err")]
pub struct HandleErr;

/// A handler that records tokens and rejects scripted ones.
///
/// Tokens listed in `fail_once` are rejected the first time they are seen;
/// tokens in `fail_always` are rejected every time. Rejected tokens are not
/// recorded.
#[derive(Debug, Default)]
pub struct Recorder {
    pub tokens: Vec<Vec<u8>>,
    pub calls: usize,
    pub fail_once: Vec<Vec<u8>>,
    pub fail_always: Vec<Vec<u8>>,
}

impl Recorder {
    pub fn failing_once(token: &[u8]) -> Self {
        Self {
            fail_once: alloc::vec![token.to_vec()],
            ..Default::default()
        }
    }

    pub fn failing_always(token: &[u8]) -> Self {
        Self {
            fail_always: alloc::vec![token.to_vec()],
            ..Default::default()
        }
    }

    pub fn strings(&self) -> Vec<String> {
        self.tokens
            .iter()
            .map(|t| t.to_str_lossy().into_owned())
            .collect()
    }
}

impl Handler for Recorder {
    type Error = HandleErr;

    fn handle(&mut self, token: &[u8]) -> Result<(), HandleErr> {
        self.calls += 1;
        if let Some(i) = self.fail_once.iter().position(|t| t == token) {
            self.fail_once.remove(i);
            return Err(HandleErr);
        }
        if self.fail_always.iter().any(|t| t == token) {
            return Err(HandleErr);
        }
        self.tokens.push(token.to_vec());
        Ok(())
    }
}

pub fn recorder_writer(recorder: Recorder) -> SplitWriter<Callback<Recorder>> {
    SplitWriter::new(recorder)
}

/// Feed every chunk and return the delivered tokens, panicking on failure.
pub fn collect_tokens<S>(split: S, chunks: &[&[u8]]) -> Vec<String>
where
    S: crate::Split + Send + Sync + 'static,
{
    let mut writer = recorder_writer(Recorder::default());
    writer.set_split(split).unwrap();
    for chunk in chunks {
        assert_eq!(writer.accept(chunk).unwrap(), chunk.len());
    }
    writer.sink().get_ref().strings()
}
