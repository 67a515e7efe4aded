use super::*;

/// Screen areas from the last frame, used to route mouse clicks.
#[derive(Clone, Debug, Default)]
pub(crate) struct ScreenLayout {
  pub(crate) fields: Vec<(Focus, Rect)>,
  pub(crate) suggestions: Option<Rect>,
}

impl ScreenLayout {
  pub(crate) fn focus_at(&self, column: u16, row: u16) -> Option<Focus> {
    self
      .fields
      .iter()
      .find(|(_, area)| contains(*area, column, row))
      .map(|(focus, _)| *focus)
  }

  /// Index of the suggestion row under the pointer. The popup has a border,
  /// so its first row sits one line below the popup's top edge.
  pub(crate) fn suggestion_at(&self, column: u16, row: u16) -> Option<usize> {
    let area = self.suggestions?;

    let inner = Rect::new(
      area.x.saturating_add(1),
      area.y.saturating_add(1),
      area.width.saturating_sub(2),
      area.height.saturating_sub(2),
    );

    contains(inner, column, row).then(|| usize::from(row - inner.y))
  }

  pub(crate) fn touches_suggestions(&self, column: u16, row: u16) -> bool {
    self
      .suggestions
      .is_some_and(|area| contains(area, column, row))
  }
}
