use super::*;

pub(crate) struct State {
  autocomplete: Autocomplete,
  career_path: InputField,
  confirm: ConfirmView,
  course_list: CourseList,
  focus: Focus,
  generating: Option<u64>,
  help: HelpView,
  layout: ScreenLayout,
  manual: ManualEntry,
  message: String,
  next_request_id: u64,
  pending_effects: Vec<Effect>,
  pending_save: Option<PendingSave>,
  search_authenticated: bool,
  semester: Semester,
  session: Session,
  side_interests: [InputField; 2],
  transient_message: Option<TransientMessage>,
}

impl State {
  fn add_course(&mut self, now: Instant) {
    let Some(label) = self.manual.plan_label() else {
      self.set_transient_message(SELECT_COURSE_FIRST.into(), now);
      self.set_focus(Focus::Search, now);
      return;
    };

    info!(%label, "adding course to plan");

    self.course_list.append(CourseEntry::new(label.clone()));
    self.autocomplete.reset(&mut self.manual);

    self.set_transient_message(format!("Added {}", truncate(&label, 60)), now);
  }

  fn allocate_request_id(&mut self) -> u64 {
    let request_id = self.next_request_id;
    self.next_request_id = self.next_request_id.wrapping_add(1);
    request_id
  }

  pub(crate) fn autocomplete(&self) -> &Autocomplete {
    &self.autocomplete
  }

  fn backspace(&mut self, now: Instant) {
    if self.focus == Focus::Search {
      let mut text = self.autocomplete.query().to_string();

      if text.pop().is_some() {
        self.autocomplete.query_changed(text, &mut self.manual, now);
      }
    } else if let Some(field) = self.field_mut(self.focus) {
      field.pop();
    }
  }

  fn clear_all(&mut self) {
    if !self.course_list.is_empty() {
      self.confirm.show();
    }
  }

  fn click(&mut self, column: u16, row: u16, now: Instant) {
    if self.confirm.is_visible() || self.help.is_visible() {
      return;
    }

    if let Some(index) = self.layout.suggestion_at(column, row) {
      if self.autocomplete.commit(index, &mut self.manual).is_some() {
        self.set_focus(Focus::Search, now);
      }
      return;
    }

    let target = self.layout.focus_at(column, row);

    if target != Some(Focus::Search)
      && !self.layout.touches_suggestions(column, row)
    {
      self.autocomplete.dismiss();
    }

    if let Some(target) = target {
      self.set_focus(target, now);
    }
  }

  pub(crate) fn command_for_key(&self, key: KeyEvent) -> Command {
    if self.confirm.is_visible() {
      return ConfirmView::handle_key(key);
    }

    if self.help.is_visible() {
      return HelpView::handle_key(key);
    }

    let control = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
      KeyCode::Char('c') if control => Command::Quit,
      KeyCode::Char('g') if control => Command::Generate,
      KeyCode::Char('a') if control => Command::AddCourse,
      KeyCode::Char('s') if control => Command::Save,
      KeyCode::Char('x') if control => Command::ClearAll,
      KeyCode::F(1) => Command::ShowHelp,
      KeyCode::Tab => Command::FocusNext,
      KeyCode::BackTab => Command::FocusPrevious,
      KeyCode::Esc => Command::Dismiss,
      _ => self.focus.handle_key(key),
    }
  }

  fn confirm_clear(&mut self, now: Instant) {
    self.confirm.hide();
    self.start_save(SavePurpose::ClearAll, Vec::new(), now);
  }

  pub(crate) fn confirm_view(&self) -> &ConfirmView {
    &self.confirm
  }

  pub(crate) fn course_list(&self) -> &CourseList {
    &self.course_list
  }

  pub(crate) fn course_list_mut(&mut self) -> &mut CourseList {
    &mut self.course_list
  }

  pub(crate) fn dispatch_command(
    &mut self,
    command: Command,
    now: Instant,
  ) -> CommandDispatch {
    debug_assert!(
      self.pending_effects.is_empty(),
      "command dispatch should start without pending effects"
    );

    let mut should_exit = false;

    match command {
      Command::Quit => {
        should_exit = true;
      }
      Command::AddCourse => self.add_course(now),
      Command::Backspace => self.backspace(now),
      Command::CancelConfirm => self.confirm.hide(),
      Command::ClearAll => self.clear_all(),
      Command::Click { column, row } => self.click(column, row, now),
      Command::CommitSuggestion => {
        self.autocomplete.commit_highlighted(&mut self.manual);
      }
      Command::ConfirmClear => self.confirm_clear(now),
      Command::Dismiss => self.autocomplete.dismiss(),
      Command::FocusNext => self.set_focus(self.focus.next(), now),
      Command::FocusPrevious => self.set_focus(self.focus.previous(), now),
      Command::Generate => self.generate(now),
      Command::HideHelp => self.help.hide(&mut self.message),
      Command::Input(ch) => self.input(ch, now),
      Command::MoveDown => self.move_down(),
      Command::MoveUp => self.move_up(),
      Command::Save => {
        let courses = self.course_list.included_labels();
        self.start_save(SavePurpose::Save, courses, now);
      }
      Command::ShowHelp => self.help.show(&mut self.message),
      Command::ToggleIncluded => {
        self.course_list.toggle_selected();
      }
      Command::None => {}
    }

    CommandDispatch {
      effects: std::mem::take(&mut self.pending_effects),
      should_exit,
    }
  }

  fn field_mut(&mut self, focus: Focus) -> Option<&mut InputField> {
    match focus {
      Focus::CareerPath => Some(&mut self.career_path),
      Focus::ManualCode => Some(&mut self.manual.code),
      Focus::ManualCredits => Some(&mut self.manual.credits),
      Focus::ManualTitle => Some(&mut self.manual.title),
      Focus::SideInterestOne => Some(&mut self.side_interests[0]),
      Focus::SideInterestTwo => Some(&mut self.side_interests[1]),
      Focus::CourseList | Focus::Search => None,
    }
  }

  pub(crate) fn field_text(&self, focus: Focus) -> &str {
    match focus {
      Focus::CareerPath => self.career_path.text(),
      Focus::CourseList => "",
      Focus::ManualCode => self.manual.code.text(),
      Focus::ManualCredits => self.manual.credits.text(),
      Focus::ManualTitle => self.manual.title.text(),
      Focus::Search => self.autocomplete.query(),
      Focus::SideInterestOne => self.side_interests[0].text(),
      Focus::SideInterestTwo => self.side_interests[1].text(),
    }
  }

  pub(crate) fn focus(&self) -> Focus {
    self.focus
  }

  fn generate(&mut self, now: Instant) {
    if self.generating.is_some() {
      return;
    }

    let Some(token) = self.session.token().map(str::to_string) else {
      self.set_transient_message(LOGIN_FIRST.into(), now);
      return;
    };

    if self.career_path.is_blank() {
      self.set_transient_message(CAREER_PATH_REQUIRED.into(), now);
      self.set_focus(Focus::CareerPath, now);
      return;
    }

    let request = GenerateRequest {
      career_path: self.career_path.trimmed().to_string(),
      semester: self.semester.name.to_string(),
      side_interests: self
        .side_interests
        .iter()
        .filter(|field| !field.is_blank())
        .map(|field| field.trimmed().to_string())
        .collect(),
    };

    let request_id = self.allocate_request_id();

    self.generating = Some(request_id);

    self
      .course_list
      .show_notice(Notice::Info(LOADING_RECOMMENDATIONS));

    self.pending_effects.push(Effect::GenerateRecommendations {
      request,
      request_id,
      token,
    });
  }

  pub(crate) fn handle_event(&mut self, event: Event, now: Instant) {
    match event {
      Event::SearchResults { generation, result } => {
        self.autocomplete.apply_results(generation, result);
      }
      Event::Recommendations { request_id, result } => {
        if self.generating != Some(request_id) {
          return;
        }

        self.generating = None;

        match result {
          Ok(recommendations) if recommendations.is_empty() => {
            self
              .course_list
              .show_notice(Notice::Info(NO_RECOMMENDATIONS));
          }
          Ok(recommendations) => {
            info!(count = recommendations.len(), "received recommendations");

            self.course_list.replace(
              recommendations.into_iter().map(CourseEntry::from).collect(),
            );
          }
          Err(error) if error.is_unauthorized() => {
            self.course_list.clear();
            self.session_expired(now);
          }
          Err(error) => {
            warn!(%error, "could not generate recommendations");

            self
              .course_list
              .show_notice(Notice::Error(format!("Error: {error}")));

            self.set_transient_message(
              format!("Error generating courses: {error}"),
              now,
            );
          }
        }
      }
      Event::PlanLoaded { result } => match result {
        Ok(courses) if courses.is_empty() => {
          debug!(semester = self.semester.name, "no saved courses");
        }
        Ok(courses) => {
          info!(
            semester = self.semester.name,
            count = courses.len(),
            "loaded saved courses"
          );

          self
            .course_list
            .replace(courses.into_iter().map(CourseEntry::new).collect());
        }
        Err(error) => {
          warn!(%error, "could not load saved courses");
        }
      },
      Event::PlanSaved {
        count,
        purpose,
        request_id,
        result,
      } => {
        if self
          .pending_save
          .as_ref()
          .is_none_or(|pending| pending.request_id != request_id)
        {
          return;
        }

        self.pending_save = None;
        self.set_status(STATUS.into());

        match result {
          Ok(()) => {
            info!(?purpose, count, "semester plan saved");

            let message = match purpose {
              SavePurpose::ClearAll => {
                self.course_list.clear();
                CLEARED_MESSAGE.to_string()
              }
              SavePurpose::Save => format!(
                "Semester plan saved successfully! {count} course(s) saved."
              ),
            };

            self.set_transient_message(message, now);
          }
          Err(error) if error.is_unauthorized() => self.session_expired(now),
          Err(error) => {
            warn!(?purpose, %error, "could not save semester plan");

            self.set_transient_message(
              format!("{}: {error}", purpose.error_prefix()),
              now,
            );
          }
        }
      }
    }
  }

  pub(crate) fn help(&self) -> &HelpView {
    &self.help
  }

  fn input(&mut self, ch: char, now: Instant) {
    if self.focus == Focus::Search {
      let mut text = self.autocomplete.query().to_string();
      text.push(ch);
      self.autocomplete.query_changed(text, &mut self.manual, now);
    } else if let Some(field) = self.field_mut(self.focus) {
      field.push(ch);
    }
  }

  pub(crate) fn is_generating(&self) -> bool {
    self.generating.is_some()
  }

  #[cfg(test)]
  pub(crate) fn manual(&self) -> &ManualEntry {
    &self.manual
  }

  pub(crate) fn message(&self) -> &str {
    &self.message
  }

  fn move_down(&mut self) {
    match self.focus {
      Focus::Search => self.autocomplete.highlight_next(),
      Focus::CourseList => self.course_list.select_next(),
      _ => {}
    }
  }

  fn move_up(&mut self) {
    match self.focus {
      Focus::Search => self.autocomplete.highlight_previous(),
      Focus::CourseList => self.course_list.select_previous(),
      _ => {}
    }
  }

  pub(crate) fn new(
    config: &Config,
    semester: Semester,
    session: Session,
  ) -> Self {
    let mut state = Self {
      autocomplete: Autocomplete::new(&config.search),
      career_path: InputField::default(),
      confirm: ConfirmView::default(),
      course_list: CourseList::default(),
      focus: Focus::CareerPath,
      generating: None,
      help: HelpView::new(),
      layout: ScreenLayout::default(),
      manual: ManualEntry::default(),
      message: STATUS.into(),
      next_request_id: 0,
      pending_effects: Vec::new(),
      pending_save: None,
      search_authenticated: config.search.authenticate,
      semester,
      session,
      side_interests: [InputField::default(), InputField::default()],
      transient_message: None,
    };

    if let Some(token) = state.session.token() {
      state.pending_effects.push(Effect::LoadPlan {
        semester: semester.name,
        token: token.to_string(),
      });
    }

    state
  }

  /// Advances timers and collects effects that became due without user
  /// input, such as a debounced course lookup.
  pub(crate) fn poll(&mut self, now: Instant) -> Vec<Effect> {
    self.update_transient_message(now);

    if let Some(lookup) = self.autocomplete.poll(now) {
      let token = if self.search_authenticated {
        self.session.token().map(str::to_string)
      } else {
        None
      };

      self
        .pending_effects
        .push(Effect::SearchCourses { lookup, token });
    }

    std::mem::take(&mut self.pending_effects)
  }

  /// How long the event loop may block waiting for input.
  pub(crate) fn poll_timeout(&self, now: Instant) -> Duration {
    self.autocomplete.next_deadline().map_or(MAX_POLL_INTERVAL, |deadline| {
      deadline.saturating_duration_since(now).min(MAX_POLL_INTERVAL)
    })
  }

  pub(crate) fn semester(&self) -> Semester {
    self.semester
  }

  fn session_expired(&mut self, now: Instant) {
    if let Err(error) = self.session.clear() {
      warn!(%error, "could not clear expired session");
    }

    self.set_transient_message(SESSION_EXPIRED.into(), now);
  }

  fn set_focus(&mut self, target: Focus, now: Instant) {
    if target == self.focus {
      return;
    }

    if self.focus == Focus::Search {
      self.autocomplete.focus_lost(now);
    }

    self.focus = target;

    if target == Focus::Search {
      self.autocomplete.focus_gained(now);
    }
  }

  pub(crate) fn set_layout(&mut self, layout: ScreenLayout) {
    self.layout = layout;
  }

  /// Writes the status line, or the status help will restore when it is
  /// open.
  fn set_status(&mut self, message: String) {
    if self.help.is_visible() {
      self.help.replace_backup(message);
    } else {
      self.message = message;
    }
  }

  pub(crate) fn set_transient_message(
    &mut self,
    message: String,
    now: Instant,
  ) {
    let original = self.transient_message.as_ref().map_or_else(
      || self.status().to_string(),
      |transient| transient.original().to_string(),
    );

    self.transient_message =
      Some(TransientMessage::new(message.clone(), original, now));

    self.set_status(message);
  }

  fn start_save(
    &mut self,
    purpose: SavePurpose,
    courses: Vec<String>,
    now: Instant,
  ) {
    if self.pending_save.is_some() {
      return;
    }

    let Some(token) = self.session.token().map(str::to_string) else {
      self.set_transient_message(LOGIN_FIRST.into(), now);
      return;
    };

    let request_id = self.allocate_request_id();

    self.pending_save = Some(PendingSave {
      purpose,
      request_id,
    });

    self.transient_message = None;

    self.set_status(match purpose {
      SavePurpose::ClearAll => CLEARING_STATUS.into(),
      SavePurpose::Save => SAVING_STATUS.into(),
    });

    self.pending_effects.push(Effect::SavePlan {
      purpose,
      request: SavePlanRequest {
        courses,
        semester: self.semester.name.to_string(),
      },
      request_id,
      token,
    });
  }

  /// The status line as it reads with help closed.
  fn status(&self) -> &str {
    self.help.backup().unwrap_or(&self.message)
  }

  fn update_transient_message(&mut self, now: Instant) {
    if self.help.is_visible() {
      return;
    }

    if let Some(transient) = self.transient_message.clone() {
      if self.message != transient.current() {
        self.transient_message = None;
      } else if transient.is_expired(now) {
        self.message = transient.original().to_string();
        self.transient_message = None;
      }
    }
  }
}
