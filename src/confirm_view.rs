use super::*;

/// Yes/no popup guarding clear-all.
#[derive(Debug, Default)]
pub(crate) struct ConfirmView {
  visible: bool,
}

impl ConfirmView {
  pub(crate) fn draw(&self, frame: &mut Frame) {
    if !self.visible {
      return;
    }

    let lines = wrap_text(CLEAR_ALL_PROMPT, 44);

    let area = centered_rect(frame.area(), 48, lines.len().saturating_add(4));

    frame.render_widget(Clear, area);

    let mut text: Vec<Line> = lines.into_iter().map(Line::from).collect();

    text.push(Line::from(""));
    text.push(Line::from(vec![
      Span::styled("y", Style::default().fg(Color::Cyan)),
      Span::raw(" confirm • "),
      Span::styled("n", Style::default().fg(Color::Cyan)),
      Span::raw(" cancel"),
    ]));

    let popup = Paragraph::new(text).block(
      Block::default()
        .title(CONFIRM_TITLE)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red)),
    );

    frame.render_widget(popup, area);
  }

  pub(crate) fn handle_key(key: KeyEvent) -> Command {
    match key.code {
      KeyCode::Char('y' | 'Y') | KeyCode::Enter => Command::ConfirmClear,
      KeyCode::Char('n' | 'N') | KeyCode::Esc => Command::CancelConfirm,
      KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
        Command::Quit
      }
      _ => Command::None,
    }
  }

  pub(crate) fn hide(&mut self) {
    self.visible = false;
  }

  pub(crate) fn is_visible(&self) -> bool {
    self.visible
  }

  pub(crate) fn show(&mut self) {
    self.visible = true;
  }
}
