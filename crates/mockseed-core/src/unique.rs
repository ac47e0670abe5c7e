use std::collections::HashSet;

/// Default number of fresh candidates drawn before falling back to suffixes.
pub const DEFAULT_MAX_ATTEMPTS: usize = 1000;

/// Values already handed out for one field category during a run.
///
/// The set only grows. Each category (names, emails, phones, ...) keeps its
/// own instance.
#[derive(Debug, Default, Clone)]
pub struct IssuedSet {
    values: HashSet<String>,
    fallbacks: u64,
}

impl IssuedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.contains(value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of values that needed a numeric suffix to become unique.
    pub fn fallbacks(&self) -> u64 {
        self.fallbacks
    }

    /// Issue `value` directly. Returns `false` when it was already issued.
    pub fn insert(&mut self, value: impl Into<String>) -> bool {
        self.values.insert(value.into())
    }
}

/// Draw a value from `produce` that is not yet in `issued`, then record it.
///
/// Up to `max_attempts` candidates are tried. If none is fresh, one more base
/// candidate is taken and `1`, `2`, ... are appended until the result is
/// unused, so the call always terminates.
pub fn ensure_unique<F>(mut produce: F, issued: &mut IssuedSet, max_attempts: usize) -> String
where
    F: FnMut() -> String,
{
    ensure_unique_with(|_| produce(), issued, max_attempts)
}

/// Like [`ensure_unique`], but the producer can inspect the issued values.
pub fn ensure_unique_with<F>(mut produce: F, issued: &mut IssuedSet, max_attempts: usize) -> String
where
    F: FnMut(&IssuedSet) -> String,
{
    for _ in 0..max_attempts {
        let candidate = produce(issued);
        if !issued.contains(&candidate) {
            issued.insert(candidate.clone());
            return candidate;
        }
    }

    let base = produce(issued);
    let mut candidate = base.clone();
    let mut suffix: u64 = 1;
    while issued.contains(&candidate) {
        candidate = format!("{base}{suffix}");
        suffix += 1;
    }
    if suffix > 1 {
        issued.fallbacks += 1;
    }
    issued.insert(candidate.clone());
    candidate
}
