#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Command {
  AddCourse,
  Backspace,
  CancelConfirm,
  ClearAll,
  Click { column: u16, row: u16 },
  CommitSuggestion,
  ConfirmClear,
  Dismiss,
  FocusNext,
  FocusPrevious,
  Generate,
  HideHelp,
  Input(char),
  MoveDown,
  MoveUp,
  None,
  Quit,
  Save,
  ShowHelp,
  ToggleIncluded,
}
