use super::*;

pub(crate) struct PendingSave {
  pub(crate) purpose: SavePurpose,
  pub(crate) request_id: u64,
}
