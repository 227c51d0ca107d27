pub mod almanac;
mod solutions;

use std::path::PathBuf;

use anyhow::{Context, Result};

pub use solutions::*;

/// Environment variable overriding the directory puzzle inputs are read from.
pub const INPUTS_ENV: &str = "AOC_INPUTS";

/// Returns `None` for empty input or anything that isn't a plain run of ASCII digits fitting into
/// a `u64`.
pub fn parse_u64_from_bytes(bytes: &[u8]) -> Option<u64> {
    if bytes.is_empty() {
        return None;
    }
    let mut ret: u64 = 0;
    for &b in bytes {
        if !b.is_ascii_digit() {
            return None;
        }
        ret = ret.checked_mul(10)?.checked_add(u64::from(b - b'0'))?;
    }
    Some(ret)
}

fn inputs_dir() -> PathBuf {
    std::env::var_os(INPUTS_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("inputs"))
}

pub fn load_input(name: &str) -> Result<String> {
    let path = inputs_dir().join(name);
    std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))
}

pub fn default_input(n: usize) -> Result<String> {
    load_input(&format!("{}.txt", n))
}
