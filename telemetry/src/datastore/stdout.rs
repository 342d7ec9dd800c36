//! Standard output store
//!
//! Pretty-prints each document with tab indentation. Only whitespace is
//! touched: key order, number spelling and string escapes are printed as
//! received.

use std::io::Write;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::value::RawValue;

use super::{DataStore, DataStoreError};

/// Prints documents to stdout (or any injected writer)
pub struct StdoutStore {
    out: Mutex<Box<dyn Write + Send>>,
}

impl StdoutStore {
    /// Store printing to the process's standard output
    pub fn new() -> Self {
        Self::with_writer(std::io::stdout())
    }

    /// Store printing to `writer`
    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            out: Mutex::new(Box::new(writer)),
        }
    }
}

impl Default for StdoutStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Re-indent a JSON document with tabs
///
/// The document is validated first, then its tokens are copied through with
/// new whitespace. Empty objects and arrays stay on one line.
pub fn indent_json(data: &[u8]) -> Result<Vec<u8>, serde_json::Error> {
    let raw: &RawValue = serde_json::from_slice(data)?;
    let src = raw.get().as_bytes();

    let mut buf = Vec::with_capacity(src.len() * 2);
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut open = false;

    for &b in src {
        if in_string {
            buf.push(b);
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        if matches!(b, b' ' | b'\t' | b'\n' | b'\r') {
            continue;
        }
        if open && b != b'}' && b != b']' {
            open = false;
            newline(&mut buf, depth);
        }
        match b {
            b'"' => {
                in_string = true;
                buf.push(b);
            }
            b'{' | b'[' => {
                buf.push(b);
                depth += 1;
                open = true;
            }
            b'}' | b']' => {
                depth = depth.saturating_sub(1);
                if open {
                    open = false;
                } else {
                    newline(&mut buf, depth);
                }
                buf.push(b);
            }
            b',' => {
                buf.push(b);
                newline(&mut buf, depth);
            }
            b':' => buf.extend_from_slice(b": "),
            _ => buf.push(b),
        }
    }
    Ok(buf)
}

fn newline(buf: &mut Vec<u8>, depth: usize) {
    buf.push(b'\n');
    buf.extend(std::iter::repeat(b'\t').take(depth));
}

#[async_trait]
impl DataStore for StdoutStore {
    async fn store(&self, data: &[u8]) -> Result<(), DataStoreError> {
        let mut pretty = indent_json(data)?;
        pretty.push(b'\n');

        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        out.write_all(&pretty).map_err(DataStoreError::Output)?;
        out.flush().map_err(DataStoreError::Output)
    }
}
