/// Camel-case pattern match over a simple type name.
///
/// Every uppercase letter (or digit) in `pattern` starts a new hump; the
/// lowercase letters that follow it must be a prefix of the corresponding hump
/// in `name`. Humps in `name` may be skipped only at the end, so `HM` matches
/// `HashMap` and `HashMapEntry`, but not `MapHash`.
///
/// A pattern without any uppercase letter never camel-case matches; callers
/// fall back to prefix/fuzzy matching for those.
pub fn camel_case_match(pattern: &str, name: &str) -> bool {
    let pattern = pattern.as_bytes();
    if pattern.is_empty() || !pattern[0].is_ascii_uppercase() {
        return false;
    }
    let humps = humps(name.as_bytes());

    let mut hump_idx = 0usize;
    let mut i = 0usize;
    while i < pattern.len() {
        // Collect one pattern hump: an uppercase char followed by lowercase chars.
        let start = i;
        i += 1;
        while i < pattern.len() && !starts_hump(pattern, i) {
            i += 1;
        }
        let part = &pattern[start..i];

        let Some(hump) = humps.get(hump_idx) else {
            return false;
        };
        if !hump_starts_with(hump, part) {
            return false;
        }
        hump_idx += 1;
    }
    true
}

fn starts_hump(bytes: &[u8], i: usize) -> bool {
    let b = bytes[i];
    if b.is_ascii_uppercase() {
        return true;
    }
    // A run of digits forms a single hump.
    b.is_ascii_digit() && (i == 0 || !bytes[i - 1].is_ascii_digit())
}

fn humps(name: &[u8]) -> Vec<&[u8]> {
    let mut out = Vec::new();
    let mut start = None;
    for (i, &b) in name.iter().enumerate() {
        if b == b'_' || b == b'$' {
            if let Some(s) = start.take() {
                out.push(&name[s..i]);
            }
            continue;
        }
        match start {
            None => start = Some(i),
            Some(s) if i > s && starts_hump(name, i) => {
                out.push(&name[s..i]);
                start = Some(i);
            }
            Some(_) => {}
        }
    }
    if let Some(s) = start {
        out.push(&name[s..]);
    }
    out
}

fn hump_starts_with(hump: &[u8], part: &[u8]) -> bool {
    if part.len() > hump.len() {
        return false;
    }
    // First character is compared exactly (it carries the hump boundary), the
    // rest case-insensitively.
    hump[0] == part[0]
        && hump[1..part.len()]
            .iter()
            .zip(&part[1..])
            .all(|(h, p)| h.eq_ignore_ascii_case(p))
}
