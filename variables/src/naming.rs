//! Collision-free names for new and pasted variables.

#[cfg(test)]
#[path = "naming_test.rs"]
mod naming_test;

/// Prefix applied to the name of a pasted or duplicated variable.
pub const COPY_PREFIX: &str = "CopyOf";

/// Pick a name that `exists` rejects as taken.
///
/// `base` is used as-is when free. Otherwise `prefix + base` is tried, then
/// `prefix + base + 2`, `prefix + base + 3`, and so on.
pub fn new_name_generator(base: &str, exists: impl Fn(&str) -> bool, prefix: Option<&str>) -> String {
    if !exists(base) {
        return base.to_owned();
    }
    let stem = format!("{}{base}", prefix.unwrap_or_default());
    if !stem.is_empty() && !exists(&stem) {
        return stem;
    }
    let mut suffix = 2_u64;
    loop {
        let candidate = format!("{stem}{suffix}");
        if !exists(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}
