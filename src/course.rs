use super::*;

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub(crate) struct Course {
  #[serde(rename = "course_code")]
  pub(crate) code: String,
  #[serde(deserialize_with = "deserialize_credits")]
  pub(crate) credits: f64,
  pub(crate) title: String,
}

impl Course {
  /// Text written back into the search field once a course is committed.
  pub(crate) fn display_name(&self) -> String {
    format!("{} - {}", self.code, self.title)
  }

  /// Label stored in the semester plan.
  pub(crate) fn plan_label(&self) -> String {
    format!("{} {} ({} credits)", self.code, self.title, self.credits)
  }

  pub(crate) fn suggestion_label(&self) -> String {
    format!("{} ({} credits)", self.display_name(), self.credits)
  }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub(crate) struct Recommendation {
  #[serde(flatten)]
  pub(crate) course: Course,
  #[serde(default)]
  pub(crate) reasoning: Option<String>,
}
