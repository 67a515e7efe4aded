use super::*;

pub(crate) const NO_MATCHES_LABEL: &str = "No courses found";

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum SuggestionRow {
  Course(Course),
  NoMatches,
}

impl SuggestionRow {
  pub(crate) fn is_clickable(&self) -> bool {
    matches!(self, Self::Course(_))
  }

  pub(crate) fn label(&self) -> String {
    match self {
      Self::Course(course) => course.suggestion_label(),
      Self::NoMatches => NO_MATCHES_LABEL.into(),
    }
  }
}
