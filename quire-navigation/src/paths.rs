//! Path helpers shared by the resolver, the registry and the URL builders.

/// Strips one leading and one trailing slash: `/a/b/` becomes `a/b`.
pub fn normalize(path: &str) -> &str {
    let path = path.strip_prefix('/').unwrap_or(path);
    path.strip_suffix('/').unwrap_or(path)
}

/// Segments of the normalized path. The empty path has none.
pub fn split_segments(path: &str) -> Vec<&str> {
    let path = normalize(path);
    if path.is_empty() {
        Vec::new()
    } else {
        path.split('/').collect()
    }
}

/// Prefix lengths that may address a collection, longest first.
///
/// An even count ends in a dangling entity id, which is dropped before
/// stepping down two segments at a time.
pub(crate) fn combination_lengths(count: usize) -> impl Iterator<Item = usize> {
    let len = if count > 0 && count % 2 == 0 { count - 1 } else { count };
    (1..=len).rev().step_by(2)
}

/// Candidate collection paths for `segments`, longest first:
/// `["sites", "es", "locales"]` gives `["sites/es/locales", "sites"]`.
///
/// Every combination has an odd number of segments.
pub fn path_combinations<S: AsRef<str>>(segments: &[S]) -> Vec<String> {
    combination_lengths(segments.len())
        .map(|len| join_segments(&segments[..len]))
        .collect()
}

pub(crate) fn join_segments<S: AsRef<str>>(segments: &[S]) -> String {
    segments.iter().map(AsRef::as_ref).collect::<Vec<_>>().join("/")
}

/// Joins `segment` onto `prefix`, omitting the slash when `prefix` is empty.
pub(crate) fn join_path(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}/{segment}")
    }
}
