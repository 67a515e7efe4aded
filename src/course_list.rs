use super::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct CourseEntry {
  pub(crate) detail: Option<String>,
  pub(crate) included: bool,
  pub(crate) label: String,
}

impl CourseEntry {
  pub(crate) fn new(label: impl Into<String>) -> Self {
    Self {
      detail: None,
      included: true,
      label: label.into(),
    }
  }
}

impl From<Recommendation> for CourseEntry {
  fn from(recommendation: Recommendation) -> Self {
    Self {
      detail: recommendation.reasoning.filter(|text| !text.trim().is_empty()),
      included: true,
      label: recommendation.course.plan_label(),
    }
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Notice {
  Error(String),
  Info(&'static str),
}

/// The semester's working set. A notice replaces the rows on screen while
/// recommendations load or after they fail.
#[derive(Debug, Default)]
pub(crate) struct CourseList {
  notice: Option<Notice>,
  view: ListView<CourseEntry>,
}

impl CourseList {
  pub(crate) fn append(&mut self, entry: CourseEntry) {
    self.notice = None;
    self.view.push(entry);
  }

  pub(crate) fn clear(&mut self) {
    self.notice = None;
    self.view.clear();
  }

  pub(crate) fn entries(&self) -> &[CourseEntry] {
    self.view.items()
  }

  pub(crate) fn included_labels(&self) -> Vec<String> {
    self
      .view
      .items()
      .iter()
      .filter(|entry| entry.included)
      .map(|entry| entry.label.clone())
      .collect()
  }

  pub(crate) fn is_empty(&self) -> bool {
    self.view.is_empty()
  }

  pub(crate) fn len(&self) -> usize {
    self.view.len()
  }

  pub(crate) fn notice(&self) -> Option<&Notice> {
    self.notice.as_ref()
  }

  pub(crate) fn offset(&self) -> usize {
    self.view.offset()
  }

  pub(crate) fn replace(&mut self, entries: Vec<CourseEntry>) {
    self.notice = None;
    self.view = ListView::new(entries);
  }

  pub(crate) fn select_next(&mut self) {
    self.view.select_next();
  }

  pub(crate) fn select_previous(&mut self) {
    self.view.select_previous();
  }

  pub(crate) fn selected_index(&self) -> Option<usize> {
    self.view.selected_index()
  }

  pub(crate) fn set_offset(&mut self, offset: usize) {
    self.view.set_offset(offset);
  }

  #[cfg(test)]
  pub(crate) fn set_selected(&mut self, index: usize) {
    self.view.set_selected(index);
  }

  /// Shows `notice` in place of the rows, dropping them.
  pub(crate) fn show_notice(&mut self, notice: Notice) {
    self.view.clear();
    self.notice = Some(notice);
  }

  pub(crate) fn toggle_selected(&mut self) -> Option<&CourseEntry> {
    let entry = self.view.selected_item_mut()?;
    entry.included = !entry.included;
    Some(entry)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn list(labels: &[&str]) -> CourseList {
    let mut list = CourseList::default();

    for label in labels {
      list.append(CourseEntry::new(*label));
    }

    list
  }

  #[test]
  fn appended_entries_start_included() {
    let list =
      list(&["CS101 Intro to CS (3 credits)", "MATH121 Calc (4 credits)"]);

    assert_eq!(list.len(), 2);
    assert_eq!(
      list.included_labels(),
      vec![
        "CS101 Intro to CS (3 credits)".to_string(),
        "MATH121 Calc (4 credits)".to_string()
      ]
    );
  }

  #[test]
  fn toggled_entries_are_left_out_of_saved_labels() {
    let mut list = list(&["A", "B", "C"]);

    list.set_selected(1);
    let toggled = list.toggle_selected().cloned().unwrap();
    assert!(!toggled.included);

    assert_eq!(list.included_labels(), vec!["A".to_string(), "C".to_string()]);

    list.toggle_selected();
    assert_eq!(list.included_labels().len(), 3);
  }

  #[test]
  fn notice_replaces_rows_until_next_append() {
    let mut list = list(&["A"]);

    list.show_notice(Notice::Info("Loading recommendations..."));
    assert!(list.is_empty());
    assert_eq!(
      list.notice(),
      Some(&Notice::Info("Loading recommendations..."))
    );

    list.append(CourseEntry::new("B"));
    assert_eq!(list.notice(), None);
    assert_eq!(list.entries()[0].label, "B");
  }

  #[test]
  fn recommendation_becomes_included_entry_with_reasoning() {
    let entry = CourseEntry::from(Recommendation {
      course: Course {
        code: "CS101".into(),
        credits: 4.0,
        title: "Intro to CS".into(),
      },
      reasoning: Some("Core requirement".into()),
    });

    assert_eq!(entry.label, "CS101 Intro to CS (4 credits)");
    assert_eq!(entry.detail.as_deref(), Some("Core requirement"));
    assert!(entry.included);
  }
}
