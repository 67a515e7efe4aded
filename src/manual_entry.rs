use super::*;

/// The three manual-entry fields. Filled by committing a suggestion and read
/// back when the course is added to the plan.
#[derive(Debug, Default)]
pub(crate) struct ManualEntry {
  pub(crate) code: InputField,
  pub(crate) credits: InputField,
  pub(crate) title: InputField,
}

impl ManualEntry {
  pub(crate) fn clear(&mut self) {
    self.code.clear();
    self.credits.clear();
    self.title.clear();
  }

  pub(crate) fn fill(&mut self, course: &Course) {
    self.code.set(course.code.clone());
    self.credits.set(course.credits.to_string());
    self.title.set(course.title.clone());
  }

  #[cfg(test)]
  pub(crate) fn is_empty(&self) -> bool {
    self.code.text().is_empty()
      && self.credits.text().is_empty()
      && self.title.text().is_empty()
  }

  /// Plan label for the entered course, or `None` while any field is blank.
  pub(crate) fn plan_label(&self) -> Option<String> {
    if self.code.is_blank() || self.title.is_blank() || self.credits.is_blank()
    {
      return None;
    }

    Some(format!(
      "{} {} ({} credits)",
      self.code.trimmed(),
      self.title.trimmed(),
      self.credits.trimmed()
    ))
  }
}
