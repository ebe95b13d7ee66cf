//! Sequential file naming for equipment photos.
//!
//! Files are named `<equipment>(<n>).jpg`. The next `n` is derived from the
//! names already on disk, never from an in-memory counter, so numbering stays
//! correct across restarts and external deletions.

use tracing::debug;

/// Extension every capture is stored with. Matching is case-sensitive.
pub const CAPTURE_EXTENSION: &str = ".jpg";

/// Build the file name for the `index`-th capture of `equipment`.
pub fn file_name_for(equipment: &str, index: u64) -> String {
    format!("{equipment}({index}){CAPTURE_EXTENSION}")
}

/// Extract `n` from a name of the exact form `<equipment>(<n>).jpg`.
///
/// The label is compared literally, so characters such as `(`, `.` or `*`
/// in an equipment name only ever match themselves. `n` must be one or more
/// ASCII digits that fit in a `u64`.
pub fn index_of(name: &str, equipment: &str) -> Option<u64> {
    let digits = name
        .strip_prefix(equipment)?
        .strip_prefix('(')?
        .strip_suffix(CAPTURE_EXTENSION)?
        .strip_suffix(')')?;

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    match digits.parse::<u64>() {
        Ok(index) => Some(index),
        Err(e) => {
            debug!(name, error = %e, "Ignoring out-of-range capture index");
            None
        }
    }
}

/// Compute the next unused file name for `equipment` given the names
/// currently present in the target directory.
///
/// Returns `<equipment>(<max + 1>).jpg` where `max` is the greatest index
/// among matching names, or 0 when none match. The result does not depend
/// on the iteration order of `existing`.
pub fn next_file_name<I, S>(existing: I, equipment: &str) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let max_index = existing
        .into_iter()
        .filter_map(|name| index_of(name.as_ref(), equipment))
        .max()
        .unwrap_or(0);

    file_name_for(equipment, max_index.saturating_add(1))
}
