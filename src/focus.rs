use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Focus {
  CareerPath,
  CourseList,
  ManualCode,
  ManualCredits,
  ManualTitle,
  Search,
  SideInterestOne,
  SideInterestTwo,
}

impl Focus {
  /// Tab order, top to bottom and left to right on screen.
  const ORDER: [Focus; 8] = [
    Focus::CareerPath,
    Focus::SideInterestOne,
    Focus::SideInterestTwo,
    Focus::Search,
    Focus::ManualCode,
    Focus::ManualTitle,
    Focus::ManualCredits,
    Focus::CourseList,
  ];

  /// Maps keys that only mean something inside the focused widget.
  pub(crate) fn handle_key(self, key: KeyEvent) -> Command {
    if self == Focus::CourseList {
      return match key.code {
        KeyCode::Char('q' | 'Q') => Command::Quit,
        KeyCode::Char('?') => Command::ShowHelp,
        KeyCode::Down | KeyCode::Char('j') => Command::MoveDown,
        KeyCode::Up | KeyCode::Char('k') => Command::MoveUp,
        KeyCode::Char(' ') | KeyCode::Enter => Command::ToggleIncluded,
        _ => Command::None,
      };
    }

    match key.code {
      KeyCode::Backspace => Command::Backspace,
      KeyCode::Down => Command::MoveDown,
      KeyCode::Up => Command::MoveUp,
      KeyCode::Enter => match self {
        Focus::Search => Command::CommitSuggestion,
        Focus::ManualCode | Focus::ManualCredits | Focus::ManualTitle => {
          Command::AddCourse
        }
        _ => Command::Generate,
      },
      KeyCode::Char(ch)
        if !key.modifiers.intersects(
          KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER,
        ) =>
      {
        Command::Input(ch)
      }
      _ => Command::None,
    }
  }

  pub(crate) fn is_text(self) -> bool {
    self != Focus::CourseList
  }

  pub(crate) fn label(self) -> &'static str {
    match self {
      Focus::CareerPath => "Career path",
      Focus::CourseList => "Courses",
      Focus::ManualCode => "Code",
      Focus::ManualCredits => "Credits",
      Focus::ManualTitle => "Title",
      Focus::Search => "Search courses",
      Focus::SideInterestOne => "Side interest",
      Focus::SideInterestTwo => "Second side interest",
    }
  }

  pub(crate) fn next(self) -> Self {
    let index = Self::position(self);
    Self::ORDER[(index + 1) % Self::ORDER.len()]
  }

  fn position(focus: Self) -> usize {
    Self::ORDER
      .iter()
      .position(|candidate| *candidate == focus)
      .unwrap_or(0)
  }

  pub(crate) fn previous(self) -> Self {
    let index = Self::position(self);
    Self::ORDER[(index + Self::ORDER.len() - 1) % Self::ORDER.len()]
  }
}
