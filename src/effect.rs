use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SavePurpose {
  ClearAll,
  Save,
}

impl SavePurpose {
  pub(crate) fn error_prefix(self) -> &'static str {
    match self {
      Self::ClearAll => "Error clearing courses",
      Self::Save => "Error saving semester plan",
    }
  }

  pub(crate) fn fallback_message(self) -> &'static str {
    match self {
      Self::ClearAll => "Failed to clear courses",
      Self::Save => "Failed to save semester plan",
    }
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Effect {
  GenerateRecommendations {
    request: GenerateRequest,
    request_id: u64,
    token: String,
  },
  LoadPlan {
    semester: &'static str,
    token: String,
  },
  SavePlan {
    purpose: SavePurpose,
    request: SavePlanRequest,
    request_id: u64,
    token: String,
  },
  SearchCourses {
    lookup: Lookup,
    token: Option<String>,
  },
}
