use super::*;

/// A lookup armed by the debounce timer but not yet sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PendingLookup {
  pub(crate) due: Instant,
  pub(crate) generation: u64,
  pub(crate) query: String,
}

impl PendingLookup {
  pub(crate) fn is_due(&self, now: Instant) -> bool {
    now >= self.due
  }
}

/// A lookup that has left the debounce stage and must be sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Lookup {
  pub(crate) generation: u64,
  pub(crate) limit: usize,
  pub(crate) query: String,
}
