use super::*;

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
  #[serde(default)]
  pub(crate) error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct GenerateRequest {
  pub(crate) career_path: String,
  pub(crate) semester: String,
  pub(crate) side_interests: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecommendationsResponse {
  pub(crate) courses: Vec<Recommendation>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct SavePlanRequest {
  pub(crate) courses: Vec<String>,
  pub(crate) semester: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
  pub(crate) courses: Vec<Course>,
}

/// Saved plans keyed by semester name. Values for other keys are ignored,
/// as are non-string entries inside a semester's array.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub(crate) struct SavedPlans(pub(crate) HashMap<String, Value>);

impl SavedPlans {
  pub(crate) fn courses_for(&self, semester: &str) -> Vec<String> {
    self
      .0
      .get(semester)
      .and_then(Value::as_array)
      .map(|courses| {
        courses
          .iter()
          .filter_map(Value::as_str)
          .map(str::to_string)
          .collect()
      })
      .unwrap_or_default()
  }
}
