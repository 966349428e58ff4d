//! Key inference for fields declared without an explicit name.
//!
//! Identifiers that are not mixed-case (`port`, `ping_average`, `URL`) are
//! simply uppercased. Mixed-case identifiers (`UserID`, `HTTPServer`,
//! `maxRetries`) are split into words on case changes and joined with `_`:
//!
//! | Identifier | Key |
//! |------------|-----|
//! | `UserID` | `USER_ID` |
//! | `HTTPServer` | `HTTP_SERVER` |
//! | `maxRetries` | `MAX_RETRIES` |
//! | `MTime` | `MTIME` |
//! | `b2B` | `B2_B` |
//!
//! Two uppercase letters in front of a word stay attached to it (`MTime`);
//! three or more are treated as an acronym whose last letter starts the next
//! word (`VIPath` → `VI_PATH`). Digits end a word, they never start one.

/// Derive an external key from a field identifier.
pub fn derive_key(ident: &str) -> String {
    if !is_mixed_case(ident) {
        return ident.to_uppercase();
    }

    let mut words: Vec<&str> = Vec::new();
    let mut rest = ident;

    while let Some(cut) = acronym_boundary(rest.as_bytes()) {
        words.push(&rest[..cut]);
        rest = &rest[cut..];
    }

    while let Some(cut) = camel_boundary(rest.as_bytes()) {
        words.push(&rest[..cut]);
        rest = &rest[cut..];
    }

    if !rest.is_empty() {
        words.push(rest);
    }

    words.join("_").to_uppercase()
}

fn is_mixed_case(s: &str) -> bool {
    let b = s.as_bytes();
    camel_boundary(b).is_some() || has_long_acronym(b)
}

fn is_sep(c: u8) -> bool {
    c.is_ascii_digit() || c == b'_'
}

/// Leftmost `[a-z][0-9_]*[A-Z]`: returns the index of the uppercase letter.
fn camel_boundary(b: &[u8]) -> Option<usize> {
    for (i, c) in b.iter().enumerate() {
        if !c.is_ascii_lowercase() {
            continue;
        }
        let mut j = i + 1;
        while j < b.len() && is_sep(b[j]) {
            j += 1;
        }
        if j < b.len() && b[j].is_ascii_uppercase() {
            return Some(j);
        }
    }
    None
}

/// Leftmost `[A-Z]{2,}[0-9]*[a-z]`: returns the index of the run's last
/// uppercase letter, which belongs to the following word.
fn acronym_boundary(b: &[u8]) -> Option<usize> {
    uppercase_runs(b)
        .filter(|&(start, end)| end - start >= 2)
        .find(|&(_, end)| {
            let mut j = end;
            while j < b.len() && b[j].is_ascii_digit() {
                j += 1;
            }
            j < b.len() && b[j].is_ascii_lowercase()
        })
        .map(|(_, end)| end - 1)
}

/// Any `[A-Z]{3,}[0-9_]*[a-z]`.
fn has_long_acronym(b: &[u8]) -> bool {
    uppercase_runs(b)
        .filter(|&(start, end)| end - start >= 3)
        .any(|(_, end)| {
            let mut j = end;
            while j < b.len() && is_sep(b[j]) {
                j += 1;
            }
            j < b.len() && b[j].is_ascii_lowercase()
        })
}

/// Maximal runs of ASCII uppercase letters as `(start, end)` byte ranges.
fn uppercase_runs(b: &[u8]) -> impl Iterator<Item = (usize, usize)> + '_ {
    let mut i = 0;
    std::iter::from_fn(move || {
        while i < b.len() && !b[i].is_ascii_uppercase() {
            i += 1;
        }
        if i >= b.len() {
            return None;
        }
        let start = i;
        while i < b.len() && b[i].is_ascii_uppercase() {
            i += 1;
        }
        Some((start, i))
    })
}
