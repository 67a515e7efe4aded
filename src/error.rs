use super::*;

#[derive(Debug, Error)]
pub(crate) enum ApiError {
  #[error("Invalid response format from server")]
  Malformed(#[from] serde_json::Error),
  #[error(transparent)]
  Request(#[from] reqwest::Error),
  #[error("{message}")]
  Status { message: String, status: u16 },
  #[error("{message}")]
  Unauthorized { message: String },
}

impl ApiError {
  pub(crate) fn is_unauthorized(&self) -> bool {
    matches!(self, Self::Unauthorized { .. })
  }
}
