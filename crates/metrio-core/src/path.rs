//! Heuristic path-shape compressor.
//!
//! Raw request paths carry unbounded label cardinality (numeric IDs, UUIDs),
//! which degrades registry memory and scrape cost. `normalize_path` rewrites
//! dynamic-looking segments to a fixed placeholder before the path is used
//! as a label value. It is a shape heuristic, not a router: it never
//! consults route tables, so a literal segment that happens to be numeric is
//! also rewritten.

/// Placeholder substituted for dynamic path segments.
pub const PATH_PLACEHOLDER: &str = ":id";

/// Rewrite all-numeric and UUID segments of `raw` to [`PATH_PLACEHOLDER`].
///
/// Splitting and rejoining on `/` preserves the leading/trailing slash
/// structure of the input. Pure and idempotent: the placeholder itself is
/// neither numeric nor a UUID, so normalizing twice is a no-op.
pub fn normalize_path(raw: &str) -> String {
    raw.split('/')
        .map(|seg| {
            if is_dynamic_segment(seg) {
                PATH_PLACEHOLDER
            } else {
                seg
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn is_dynamic_segment(seg: &str) -> bool {
    !seg.is_empty() && (seg.bytes().all(|b| b.is_ascii_digit()) || is_uuid(seg))
}

/// Exact 8-4-4-4-12 hex shape, case-insensitive.
fn is_uuid(seg: &str) -> bool {
    if seg.len() != 36 {
        return false;
    }
    seg.bytes().enumerate().all(|(i, b)| match i {
        8 | 13 | 18 | 23 => b == b'-',
        _ => b.is_ascii_hexdigit(),
    })
}
