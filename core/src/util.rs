//! URL and entry helpers shared by every client operation.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::types::HandleEntry;

/// Characters escaped inside one path segment. `%` is included, so pids are
/// taken as raw text and never as already-encoded input.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Join `base_url` and `pid` with exactly one `/` between them.
///
/// Each `/`-separated segment of `pid` is percent-encoded, so `?` or `#`
/// in a suffix stays part of the path instead of starting a query or
/// fragment.
pub fn assemble_pid_url(base_url: &str, pid: &str) -> String {
    let path = pid
        .trim_start_matches('/')
        .split('/')
        .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/");
    format!("{}/{path}", base_url.trim_end_matches('/'))
}

/// Build a single handle entry.
pub fn create_entry(index: u32, entry_type: impl Into<String>, data: impl Into<String>) -> HandleEntry {
    HandleEntry {
        index,
        entry_type: entry_type.into(),
        data: data.into(),
    }
}
