//! Filename hygiene: sanitization and collision-free naming.

use jiff::Timestamp;

/// Characters that are illegal in file names on the backing stores.
const ILLEGAL: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Counter attempts before the resolver abandons `name (n)` numbering
/// and falls back to a timestamp-based name.
const MAX_COUNTER_ATTEMPTS: u32 = 100;

/// Replace every illegal filename character with `_`.
///
/// Pure and idempotent; never fails.
pub fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if ILLEGAL.contains(&c) { '_' } else { c })
        .collect()
}

/// Resolve `desired` to a name that does not yet exist in the target
/// collection, as reported by the `exists` check.
///
/// Collisions get a ` (n)` counter inserted before the extension, with an
/// already-present counter suffix replaced rather than stacked
/// (`"a (1).pdf"` colliding resolves to `"a (2).pdf"`, never
/// `"a (1) (1).pdf"`). An empty `desired` becomes a timestamped default
/// ending in `.pdf`.
///
/// This never fails: if the existence check itself errors, or the counter
/// scheme is exhausted after [`MAX_COUNTER_ATTEMPTS`] tries, the resolver
/// returns a sanitized timestamp-based name instead. The check-then-create
/// window is inherently racy against concurrent callers; the backing
/// stores offer no atomic reservation, so neither does this.
pub fn resolve_unique_name<F, E>(desired: &str, mut exists: F) -> String
where
    F: FnMut(&str) -> Result<bool, E>,
    E: std::fmt::Display,
{
    let desired = desired.trim();
    // the default is a fresh candidate, not a final answer: it still
    // runs through the collision loop below
    let mut candidate = if desired.is_empty() {
        format!("document_{}.pdf", Timestamp::now().as_millisecond())
    } else {
        desired.to_string()
    };
    let mut attempt = 0u32;
    loop {
        match exists(&candidate) {
            Ok(false) => return candidate,
            Ok(true) => {}
            Err(e) => {
                tracing::warn!("existence check failed for '{candidate}': {e}");
                return timestamp_fallback(&candidate);
            }
        }

        attempt += 1;
        if attempt > MAX_COUNTER_ATTEMPTS {
            tracing::warn!("no free counter suffix for '{desired}' after {MAX_COUNTER_ATTEMPTS} attempts");
            return timestamp_fallback(&candidate);
        }

        let (base, extension) = split_extension(&candidate);
        candidate = format!("{} ({attempt}){extension}", strip_counter_suffix(base));
    }
}

fn timestamp_fallback(candidate: &str) -> String {
    let (base, extension) = split_extension(candidate);
    let base = strip_counter_suffix(base);
    sanitize(&format!(
        "{base}_{}{extension}",
        Timestamp::now().as_millisecond()
    ))
}

/// Split at the last `.`, provided the dot is neither the first nor the
/// final character. The extension keeps its leading dot.
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(i) if i > 0 && i < name.len() - 1 => (&name[..i], &name[i..]),
        _ => (name, ""),
    }
}

/// Strip a trailing ` (<digits>)` counter suffix, if present.
fn strip_counter_suffix(base: &str) -> &str {
    let Some(rest) = base.strip_suffix(')') else {
        return base;
    };
    let Some(open) = rest.rfind(" (") else {
        return base;
    };
    let digits = &rest[open + 2..];
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        &base[..open]
    } else {
        base
    }
}
