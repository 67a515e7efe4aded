use super::*;

pub(crate) struct App {
  client: Client,
  event_rx: UnboundedReceiver<Event>,
  event_tx: UnboundedSender<Event>,
  handle: Handle,
  state: State,
}

impl App {
  fn course_list_items(state: &State, width: u16) -> Vec<ListItem<'static>> {
    let course_list = state.course_list();

    if let Some(notice) = course_list.notice() {
      let (text, color) = match notice {
        Notice::Error(message) => (message.clone(), Color::Red),
        Notice::Info(message) => ((*message).to_string(), Color::DarkGray),
      };

      return vec![ListItem::new(Line::from(vec![
        Span::raw(BASE_INDENT),
        Span::styled(text, Style::default().fg(color)),
      ]))];
    }

    if course_list.is_empty() {
      return vec![ListItem::new(Line::from(vec![
        Span::raw(BASE_INDENT),
        Span::styled(EMPTY_PLAN, Style::default().fg(Color::DarkGray)),
      ]))];
    }

    let wrap_width = usize::from(width).saturating_sub(8).max(1);

    course_list
      .entries()
      .iter()
      .map(|entry| {
        let marker = if entry.included { "[x] " } else { "[ ] " };

        let label_style = if entry.included {
          Style::default().fg(Color::White)
        } else {
          Style::default().fg(Color::DarkGray)
        };

        let mut lines = vec![Line::from(vec![
          Span::raw(BASE_INDENT),
          Span::raw(marker),
          Span::styled(entry.label.clone(), label_style),
        ])];

        if let Some(detail) = &entry.detail {
          for line in wrap_text(detail, wrap_width) {
            lines.push(Line::from(vec![
              Span::raw(BASE_INDENT),
              Span::raw("    "),
              Span::styled(line, Style::default().fg(Color::DarkGray)),
            ]));
          }
        }

        ListItem::new(lines)
      })
      .collect()
  }

  pub(crate) fn draw(state: &mut State, frame: &mut Frame) {
    let rows = Layout::default()
      .direction(Direction::Vertical)
      .margin(1)
      .constraints([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(1),
      ])
      .split(frame.area());

    let interests = Layout::default()
      .direction(Direction::Horizontal)
      .constraints([
        Constraint::Percentage(50),
        Constraint::Percentage(25),
        Constraint::Percentage(25),
      ])
      .split(rows[1]);

    let manual = Layout::default()
      .direction(Direction::Horizontal)
      .constraints([
        Constraint::Length(14),
        Constraint::Min(10),
        Constraint::Length(12),
      ])
      .split(rows[3]);

    let fields = vec![
      (Focus::CareerPath, interests[0]),
      (Focus::SideInterestOne, interests[1]),
      (Focus::SideInterestTwo, interests[2]),
      (Focus::Search, rows[2]),
      (Focus::ManualCode, manual[0]),
      (Focus::ManualTitle, manual[1]),
      (Focus::ManualCredits, manual[2]),
      (Focus::CourseList, rows[4]),
    ];

    let semester = state.semester();

    let title = Line::from(vec![
      Span::styled(
        "Semester planner",
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD),
      ),
      Span::raw(" • "),
      Span::raw(format!(
        "{} ({}/{})",
        semester.name,
        semester.index + 1,
        Semester::COUNT
      )),
    ]);

    frame.render_widget(Paragraph::new(title), rows[0]);

    let focus = state.focus();

    for &(field, area) in fields.iter().filter(|(field, _)| field.is_text()) {
      let title = if field == Focus::Search {
        match state.autocomplete().phase() {
          Phase::Searching => format!("{} (searching...)", field.label()),
          Phase::Committed => format!("{} (selected)", field.label()),
          Phase::Idle | Phase::ShowingResults => field.label().to_string(),
        }
      } else {
        field.label().to_string()
      };

      let focused = if field == Focus::Search {
        state.autocomplete().is_focused()
      } else {
        field == focus
      };

      let paragraph = Paragraph::new(state.field_text(field).to_string())
        .block(Self::field_block(title, focused));

      frame.render_widget(paragraph, area);
    }

    let course_title = if state.is_generating() {
      format!("{} (generating...)", Focus::CourseList.label())
    } else {
      format!("{} ({})", Focus::CourseList.label(), state.course_list().len())
    };

    let course_focused = focus == Focus::CourseList;

    let mut list_state = ListState::default()
      .with_selected(state.course_list().selected_index())
      .with_offset(state.course_list().offset());

    let highlight = if course_focused {
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
    } else {
      Style::default()
    };

    let list = List::new(Self::course_list_items(state, rows[4].width))
      .block(Self::field_block(course_title, course_focused))
      .highlight_style(highlight)
      .highlight_symbol("");

    frame.render_stateful_widget(list, rows[4], &mut list_state);

    state.course_list_mut().set_offset(list_state.offset());

    let status = Paragraph::new(state.message().to_string())
      .style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, rows[5]);

    let suggestions = Self::draw_suggestions(state, frame, rows[2]);

    let overlay =
      state.help().is_visible() || state.confirm_view().is_visible();

    if let Some(&(_, area)) = fields
      .iter()
      .find(|(field, _)| *field == focus && field.is_text() && !overlay)
    {
      let typed = u16::try_from(state.field_text(focus).chars().count())
        .unwrap_or(u16::MAX);

      frame.set_cursor_position((
        area.x + 1 + typed.min(area.width.saturating_sub(3)),
        area.y + 1,
      ));
    }

    state.help().draw(frame);
    state.confirm_view().draw(frame);

    state.set_layout(ScreenLayout {
      fields,
      suggestions,
    });
  }

  /// Renders the suggestion popup under the search box and returns where it
  /// landed.
  fn draw_suggestions(
    state: &State,
    frame: &mut Frame,
    search: Rect,
  ) -> Option<Rect> {
    let rows = state.autocomplete().rows();

    if rows.is_empty() {
      return None;
    }

    let top = search.y.saturating_add(search.height);
    let available = frame.area().bottom().saturating_sub(top);

    let wanted = u16::try_from(rows.len())
      .unwrap_or(u16::MAX)
      .saturating_add(2);

    let area = Rect::new(search.x, top, search.width, wanted.min(available));

    if area.height < 3 {
      return None;
    }

    let items: Vec<ListItem> = rows
      .iter()
      .map(|row| {
        let style = if row.is_clickable() {
          Style::default().fg(Color::White)
        } else {
          Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC)
        };

        ListItem::new(Line::from(Span::styled(row.label(), style)))
      })
      .collect();

    let mut list_state = ListState::default()
      .with_selected(state.autocomplete().highlighted_index());

    let list = List::new(items)
      .block(
        Block::default()
          .borders(Borders::ALL)
          .border_style(Style::default().fg(Color::Cyan)),
      )
      .highlight_style(
        Style::default()
          .fg(Color::Black)
          .bg(Color::Cyan),
      );

    frame.render_widget(Clear, area);
    frame.render_stateful_widget(list, area, &mut list_state);

    Some(area)
  }

  fn execute_effect(&self, effect: Effect) {
    let (client, sender) = (self.client.clone(), self.event_tx.clone());

    match effect {
      Effect::GenerateRecommendations {
        request,
        request_id,
        token,
      } => {
        debug!(
          request_id,
          career_path = %request.career_path,
          "generating recommendations"
        );

        self.handle.spawn(async move {
          let _ = sender.send(Event::Recommendations {
            request_id,
            result: client.generate_recommendations(&token, &request).await,
          });
        });
      }
      Effect::LoadPlan { semester, token } => {
        debug!(semester, "loading saved plan");

        self.handle.spawn(async move {
          let _ = sender.send(Event::PlanLoaded {
            result: client.load_plan(&token, semester).await,
          });
        });
      }
      Effect::SavePlan {
        purpose,
        request,
        request_id,
        token,
      } => {
        debug!(request_id, ?purpose, "saving semester plan");

        self.handle.spawn(async move {
          let result = client
            .save_plan(&token, &request, purpose.fallback_message())
            .await;

          let _ = sender.send(Event::PlanSaved {
            count: request.courses.len(),
            purpose,
            request_id,
            result,
          });
        });
      }
      Effect::SearchCourses { lookup, token } => {
        self.handle.spawn(async move {
          let _ = sender.send(Event::SearchResults {
            generation: lookup.generation,
            result: client.search_courses(&lookup, token.as_deref()).await,
          });
        });
      }
    }
  }

  fn field_block(title: String, focused: bool) -> Block<'static> {
    let border = if focused {
      Style::default().fg(Color::Cyan)
    } else {
      Style::default().fg(Color::DarkGray)
    };

    Block::default()
      .title(title)
      .borders(Borders::ALL)
      .border_style(border)
  }

  pub(crate) fn new(client: Client, state: State) -> Self {
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    Self {
      client,
      event_rx,
      event_tx,
      handle: Handle::current(),
      state,
    }
  }

  fn process_pending_events(&mut self) {
    let now = Instant::now();

    for effect in self.state.poll(now) {
      self.execute_effect(effect);
    }

    while let Ok(event) = self.event_rx.try_recv() {
      self.state.handle_event(event, now);
    }
  }

  pub(crate) fn run(
    &mut self,
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
  ) -> Result {
    loop {
      self.process_pending_events();

      terminal.draw(|frame| Self::draw(&mut self.state, frame))?;

      if !crossterm_event::poll(self.state.poll_timeout(Instant::now()))? {
        continue;
      }

      let command = match crossterm_event::read()? {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
          self.state.command_for_key(key)
        }
        CrosstermEvent::Mouse(MouseEvent {
          column,
          kind: MouseEventKind::Down(MouseButton::Left),
          row,
          ..
        }) => Command::Click { column, row },
        _ => continue,
      };

      let dispatch = self.state.dispatch_command(command, Instant::now());

      for effect in dispatch.effects {
        self.execute_effect(effect);
      }

      if dispatch.should_exit {
        info!("quitting");
        break;
      }
    }

    Ok(())
  }
}
