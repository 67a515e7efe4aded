use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Phase {
  Committed,
  Idle,
  Searching,
  ShowingResults,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LookupOutcome {
  Failed,
  Shown,
  Stale,
}

/// Course-search autocomplete.
///
/// Every edit of the query bumps `generation`. A lookup carries the
/// generation it was issued for, and its response is applied only if that
/// generation is still current, so at most one result set is ever visible
/// and it always belongs to the latest query.
#[derive(Debug)]
pub(crate) struct Autocomplete {
  awaiting: Option<u64>,
  blur_deadline: Option<Instant>,
  blur_grace: Duration,
  debounce: Duration,
  focused: bool,
  generation: u64,
  limit: usize,
  min_query_len: usize,
  pending: Option<PendingLookup>,
  query: InputField,
  results: ListView<Course>,
  selected: Option<Course>,
  visible: bool,
}

impl Autocomplete {
  pub(crate) fn apply_results(
    &mut self,
    generation: u64,
    result: Result<Vec<Course>, ApiError>,
  ) -> LookupOutcome {
    if generation != self.generation {
      debug!(
        generation,
        current = self.generation,
        "discarding superseded course lookup"
      );
      return LookupOutcome::Stale;
    }

    self.awaiting = None;

    match result {
      Ok(courses) => {
        debug!(generation, count = courses.len(), "showing course suggestions");
        self.results = ListView::new(courses);
        self.visible = true;
        LookupOutcome::Shown
      }
      Err(error) => {
        warn!(generation, %error, "course lookup failed");
        self.hide();
        LookupOutcome::Failed
      }
    }
  }

  pub(crate) fn clear_selection(&mut self, manual: &mut ManualEntry) {
    self.selected = None;
    manual.clear();
  }

  /// Commits the course row at `index`. Only rows currently on screen can
  /// be committed; the "no matches" placeholder never commits.
  pub(crate) fn commit(
    &mut self,
    index: usize,
    manual: &mut ManualEntry,
  ) -> Option<Course> {
    if !self.visible {
      return None;
    }

    let course = self.results.get(index)?.clone();

    manual.fill(&course);

    self.query.set(course.display_name());
    self.selected = Some(course.clone());
    self.invalidate();
    self.hide();

    Some(course)
  }

  pub(crate) fn commit_highlighted(
    &mut self,
    manual: &mut ManualEntry,
  ) -> Option<Course> {
    let index = self.results.selected_index()?;
    self.commit(index, manual)
  }

  pub(crate) fn dismiss(&mut self) {
    self.visible = false;
    self.blur_deadline = None;
  }

  pub(crate) fn focus_gained(&mut self, now: Instant) {
    self.focused = true;
    self.blur_deadline = None;

    if self.visible || self.selected.is_some() {
      return;
    }

    if let Some(query) = self.searchable_query() {
      self.invalidate();
      self.hide();
      self.schedule(query, now);
    }
  }

  pub(crate) fn focus_lost(&mut self, now: Instant) {
    self.focused = false;

    if self.visible {
      self.blur_deadline = Some(now + self.blur_grace);
    }
  }

  #[cfg(test)]
  pub(crate) fn generation(&self) -> u64 {
    self.generation
  }

  fn hide(&mut self) {
    self.visible = false;
    self.blur_deadline = None;
    self.results.clear();
  }

  pub(crate) fn highlight_next(&mut self) {
    if self.visible {
      self.results.select_next();
    }
  }

  pub(crate) fn highlight_previous(&mut self) {
    if self.visible {
      self.results.select_previous();
    }
  }

  pub(crate) fn highlighted_index(&self) -> Option<usize> {
    if self.visible {
      self.results.selected_index()
    } else {
      None
    }
  }

  fn invalidate(&mut self) {
    self.generation = self.generation.wrapping_add(1);
    self.pending = None;
    self.awaiting = None;
  }

  pub(crate) fn is_focused(&self) -> bool {
    self.focused
  }

  pub(crate) fn is_visible(&self) -> bool {
    self.visible
  }

  pub(crate) fn new(config: &SearchConfig) -> Self {
    Self {
      awaiting: None,
      blur_deadline: None,
      blur_grace: Duration::from_millis(config.blur_grace_ms),
      debounce: Duration::from_millis(config.debounce_ms),
      focused: false,
      generation: 0,
      limit: config.limit,
      min_query_len: config.min_query_len,
      pending: None,
      query: InputField::default(),
      results: ListView::default(),
      selected: None,
      visible: false,
    }
  }

  /// Earliest instant at which `poll` has work to do.
  pub(crate) fn next_deadline(&self) -> Option<Instant> {
    let pending = self.pending.as_ref().map(|pending| pending.due);

    match (pending, self.blur_deadline) {
      (Some(a), Some(b)) => Some(a.min(b)),
      (a, b) => a.or(b),
    }
  }

  pub(crate) fn phase(&self) -> Phase {
    if self.selected.is_some() {
      Phase::Committed
    } else if self.visible {
      Phase::ShowingResults
    } else if self.pending.is_some() || self.awaiting == Some(self.generation)
    {
      Phase::Searching
    } else {
      Phase::Idle
    }
  }

  /// Fires expired deadlines. Returns the lookup to send once the debounce
  /// period has elapsed.
  pub(crate) fn poll(&mut self, now: Instant) -> Option<Lookup> {
    if self.blur_deadline.is_some_and(|deadline| now >= deadline) {
      self.dismiss();
    }

    if !self.pending.as_ref().is_some_and(|pending| pending.is_due(now)) {
      return None;
    }

    let pending = self.pending.take()?;

    self.awaiting = Some(pending.generation);

    debug!(
      generation = pending.generation,
      query = %pending.query,
      "issuing course lookup"
    );

    Some(Lookup {
      generation: pending.generation,
      limit: self.limit,
      query: pending.query,
    })
  }

  pub(crate) fn query(&self) -> &str {
    self.query.text()
  }

  pub(crate) fn query_changed(
    &mut self,
    text: impl Into<String>,
    manual: &mut ManualEntry,
    now: Instant,
  ) {
    self.query.set(text);
    self.invalidate();
    self.clear_selection(manual);
    self.hide();

    if let Some(query) = self.searchable_query() {
      self.schedule(query, now);
    }
  }

  pub(crate) fn reset(&mut self, manual: &mut ManualEntry) {
    self.query.clear();
    self.invalidate();
    self.clear_selection(manual);
    self.hide();
  }

  pub(crate) fn rows(&self) -> Vec<SuggestionRow> {
    if !self.visible {
      return Vec::new();
    }

    if self.results.is_empty() {
      return vec![SuggestionRow::NoMatches];
    }

    self
      .results
      .items()
      .iter()
      .cloned()
      .map(SuggestionRow::Course)
      .collect()
  }

  fn schedule(&mut self, query: String, now: Instant) {
    self.pending = Some(PendingLookup {
      due: now + self.debounce,
      generation: self.generation,
      query,
    });
  }

  fn searchable_query(&self) -> Option<String> {
    let trimmed = self.query.trimmed();

    (trimmed.chars().count() >= self.min_query_len).then(|| trimmed.to_string())
  }

  #[cfg(test)]
  pub(crate) fn selected(&self) -> Option<&Course> {
    self.selected.as_ref()
  }
}

#[cfg(test)]
mod tests {
  use {super::*, proptest::prelude::*};

  const DEBOUNCE: Duration = Duration::from_millis(300);
  const GRACE: Duration = Duration::from_millis(200);

  fn course(code: &str, title: &str, credits: f64) -> Course {
    Course {
      code: code.into(),
      credits,
      title: title.into(),
    }
  }

  fn controller() -> Autocomplete {
    Autocomplete::new(&SearchConfig::default())
  }

  fn type_and_fire(
    autocomplete: &mut Autocomplete,
    manual: &mut ManualEntry,
    text: &str,
    now: Instant,
  ) -> Lookup {
    autocomplete.query_changed(text, manual, now);
    autocomplete
      .poll(now + DEBOUNCE)
      .expect("lookup after debounce")
  }

  #[test]
  fn short_queries_never_issue_a_lookup() {
    let (mut autocomplete, mut manual) = (controller(), ManualEntry::default());
    let start = Instant::now();

    for text in ["", "a", " a ", "   "] {
      autocomplete.query_changed(text, &mut manual, start);

      assert_eq!(autocomplete.next_deadline(), None);
      assert_eq!(autocomplete.poll(start + DEBOUNCE * 10), None);
      assert!(!autocomplete.is_visible());
      assert_eq!(autocomplete.phase(), Phase::Idle);
    }
  }

  #[test]
  fn lookup_waits_for_quiet_period() {
    let (mut autocomplete, mut manual) = (controller(), ManualEntry::default());
    let start = Instant::now();

    autocomplete.query_changed("CS", &mut manual, start);

    assert_eq!(autocomplete.phase(), Phase::Searching);
    assert_eq!(autocomplete.next_deadline(), Some(start + DEBOUNCE));
    assert_eq!(autocomplete.poll(start + DEBOUNCE / 2), None);

    let lookup = autocomplete.poll(start + DEBOUNCE).expect("lookup");

    assert_eq!(lookup.query, "CS");
    assert_eq!(lookup.limit, 10);
    assert_eq!(lookup.generation, autocomplete.generation());
    assert_eq!(autocomplete.poll(start + DEBOUNCE * 2), None);
    assert_eq!(autocomplete.phase(), Phase::Searching);
  }

  #[test]
  fn burst_of_edits_issues_one_lookup_for_final_text() {
    let (mut autocomplete, mut manual) = (controller(), ManualEntry::default());
    let start = Instant::now();

    let mut text = String::new();

    for (i, ch) in "calculus".chars().enumerate() {
      text.push(ch);
      let at = start + Duration::from_millis(50) * u32::try_from(i).unwrap();
      autocomplete.query_changed(text.clone(), &mut manual, at);
      assert_eq!(autocomplete.poll(at), None);
    }

    let last = start + Duration::from_millis(350);

    assert_eq!(autocomplete.poll(last + DEBOUNCE / 2), None);

    let lookup = autocomplete.poll(last + DEBOUNCE).expect("lookup");
    assert_eq!(lookup.query, "calculus");
    assert_eq!(autocomplete.poll(last + DEBOUNCE * 5), None);
  }

  #[test]
  fn lookup_uses_trimmed_query() {
    let (mut autocomplete, mut manual) = (controller(), ManualEntry::default());

    let lookup =
      type_and_fire(&mut autocomplete, &mut manual, "  cs 1 ", Instant::now());

    assert_eq!(lookup.query, "cs 1");
    assert_eq!(autocomplete.query(), "  cs 1 ");
  }

  #[test]
  fn select_scenario_fills_manual_fields() {
    let (mut autocomplete, mut manual) = (controller(), ManualEntry::default());

    let lookup =
      type_and_fire(&mut autocomplete, &mut manual, "CS", Instant::now());

    let outcome = autocomplete.apply_results(
      lookup.generation,
      Ok(vec![course("CS101", "Intro to CS", 3.0)]),
    );

    assert_eq!(outcome, LookupOutcome::Shown);
    assert_eq!(autocomplete.phase(), Phase::ShowingResults);

    let rows = autocomplete.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].label(), "CS101 - Intro to CS (3 credits)");

    let committed = autocomplete.commit(0, &mut manual).expect("commit");

    assert_eq!(committed.code, "CS101");
    assert_eq!(manual.code.text(), "CS101");
    assert_eq!(manual.title.text(), "Intro to CS");
    assert_eq!(manual.credits.text(), "3");
    assert_eq!(autocomplete.query(), "CS101 - Intro to CS");
    assert!(!autocomplete.is_visible());
    assert!(autocomplete.rows().is_empty());
    assert_eq!(autocomplete.selected(), Some(&committed));
    assert_eq!(autocomplete.phase(), Phase::Committed);
  }

  #[test]
  fn empty_results_render_single_placeholder() {
    let (mut autocomplete, mut manual) = (controller(), ManualEntry::default());

    let lookup =
      type_and_fire(&mut autocomplete, &mut manual, "zz", Instant::now());

    autocomplete.apply_results(lookup.generation, Ok(Vec::new()));

    assert!(autocomplete.is_visible());
    assert_eq!(autocomplete.rows(), vec![SuggestionRow::NoMatches]);
    assert_eq!(autocomplete.rows()[0].label(), "No courses found");
    assert!(!autocomplete.rows()[0].is_clickable());
    assert_eq!(autocomplete.commit(0, &mut manual), None);
    assert_eq!(autocomplete.commit_highlighted(&mut manual), None);
  }

  #[test]
  fn failure_hides_surface_without_selection() {
    let (mut autocomplete, mut manual) = (controller(), ManualEntry::default());

    let lookup =
      type_and_fire(&mut autocomplete, &mut manual, "CS", Instant::now());

    let outcome = autocomplete.apply_results(
      lookup.generation,
      Err(ApiError::Status {
        message: "Failed to search courses".into(),
        status: 500,
      }),
    );

    assert_eq!(outcome, LookupOutcome::Failed);
    assert!(!autocomplete.is_visible());
    assert!(autocomplete.rows().is_empty());
    assert_eq!(autocomplete.phase(), Phase::Idle);
  }

  #[test]
  fn late_response_for_older_query_is_discarded() {
    let (mut autocomplete, mut manual) = (controller(), ManualEntry::default());
    let start = Instant::now();

    let first = type_and_fire(&mut autocomplete, &mut manual, "CS", start);
    let second = type_and_fire(
      &mut autocomplete,
      &mut manual,
      "CS1",
      start + Duration::from_secs(1),
    );

    assert!(first.generation < second.generation);

    let fresh = vec![course("CS101", "Intro to CS", 3.0)];

    assert_eq!(
      autocomplete.apply_results(second.generation, Ok(fresh.clone())),
      LookupOutcome::Shown
    );

    assert_eq!(
      autocomplete.apply_results(
        first.generation,
        Ok(vec![course("CS999", "Old", 1.0)])
      ),
      LookupOutcome::Stale
    );

    assert_eq!(
      autocomplete.rows(),
      fresh.into_iter().map(SuggestionRow::Course).collect::<Vec<_>>()
    );

    assert_eq!(
      autocomplete.apply_results(
        first.generation,
        Err(ApiError::Status {
          message: "boom".into(),
          status: 502
        })
      ),
      LookupOutcome::Stale
    );
    assert!(autocomplete.is_visible());
  }

  #[test]
  fn response_after_commit_cannot_reopen_surface() {
    let (mut autocomplete, mut manual) = (controller(), ManualEntry::default());

    let lookup =
      type_and_fire(&mut autocomplete, &mut manual, "CS", Instant::now());

    autocomplete.apply_results(
      lookup.generation,
      Ok(vec![course("CS101", "Intro to CS", 3.0)]),
    );

    autocomplete.commit(0, &mut manual);

    assert_eq!(
      autocomplete.apply_results(lookup.generation, Ok(Vec::new())),
      LookupOutcome::Stale
    );
    assert!(!autocomplete.is_visible());
  }

  #[test]
  fn editing_after_commit_clears_selection_and_fields() {
    let (mut autocomplete, mut manual) = (controller(), ManualEntry::default());
    let start = Instant::now();

    let lookup = type_and_fire(&mut autocomplete, &mut manual, "CS", start);

    autocomplete.apply_results(
      lookup.generation,
      Ok(vec![course("CS101", "Intro to CS", 3.0)]),
    );
    autocomplete.commit(0, &mut manual);

    autocomplete.query_changed(
      "CS101 - Intro to C",
      &mut manual,
      start + Duration::from_secs(1),
    );

    assert_eq!(autocomplete.selected(), None);
    assert!(manual.is_empty());
    assert_eq!(manual.plan_label(), None);
    assert_eq!(autocomplete.phase(), Phase::Searching);

    autocomplete.query_changed(
      "C",
      &mut manual,
      start + Duration::from_secs(2),
    );
    assert_eq!(autocomplete.phase(), Phase::Idle);
  }

  #[test]
  fn commit_within_blur_grace_wins() {
    let (mut autocomplete, mut manual) = (controller(), ManualEntry::default());
    let start = Instant::now();

    let lookup = type_and_fire(&mut autocomplete, &mut manual, "CS", start);
    autocomplete.apply_results(
      lookup.generation,
      Ok(vec![course("CS101", "Intro to CS", 3.0)]),
    );

    let blurred = start + Duration::from_secs(1);
    autocomplete.focus_lost(blurred);

    assert!(!autocomplete.is_focused());
    assert_eq!(autocomplete.next_deadline(), Some(blurred + GRACE));

    autocomplete.poll(blurred + GRACE / 2);
    assert!(autocomplete.is_visible());

    assert!(autocomplete.commit(0, &mut manual).is_some());
    assert_eq!(autocomplete.next_deadline(), None);
  }

  #[test]
  fn blur_hides_after_grace() {
    let (mut autocomplete, mut manual) = (controller(), ManualEntry::default());
    let start = Instant::now();

    let lookup = type_and_fire(&mut autocomplete, &mut manual, "CS", start);
    autocomplete.apply_results(
      lookup.generation,
      Ok(vec![course("CS101", "Intro to CS", 3.0)]),
    );

    autocomplete.focus_lost(start);
    autocomplete.poll(start + GRACE);

    assert!(!autocomplete.is_visible());
    assert_eq!(autocomplete.commit(0, &mut manual), None);
    assert!(manual.is_empty());
  }

  #[test]
  fn regaining_focus_within_grace_keeps_suggestions() {
    let (mut autocomplete, mut manual) = (controller(), ManualEntry::default());
    let start = Instant::now();

    let lookup = type_and_fire(&mut autocomplete, &mut manual, "CS", start);
    autocomplete.apply_results(lookup.generation, Ok(Vec::new()));

    autocomplete.focus_lost(start);
    autocomplete.focus_gained(start + GRACE / 2);

    assert!(autocomplete.is_focused());
    assert_eq!(autocomplete.next_deadline(), None);

    autocomplete.poll(start + GRACE * 5);
    assert!(autocomplete.is_visible());
  }

  #[test]
  fn regaining_focus_after_hide_searches_again() {
    let (mut autocomplete, mut manual) = (controller(), ManualEntry::default());
    let start = Instant::now();

    let lookup = type_and_fire(&mut autocomplete, &mut manual, "CS", start);
    autocomplete.apply_results(lookup.generation, Ok(Vec::new()));

    autocomplete.focus_lost(start);
    autocomplete.poll(start + GRACE);
    assert!(!autocomplete.is_visible());

    let back = start + GRACE * 2;
    autocomplete.focus_gained(back);

    let again = autocomplete.poll(back + DEBOUNCE).expect("lookup");

    assert_eq!(again.query, "CS");
    assert!(again.generation > lookup.generation);
    assert_eq!(
      autocomplete.apply_results(lookup.generation, Ok(Vec::new())),
      LookupOutcome::Stale
    );
  }

  #[test]
  fn regaining_focus_keeps_committed_course() {
    let (mut autocomplete, mut manual) = (controller(), ManualEntry::default());
    let start = Instant::now();

    let lookup = type_and_fire(&mut autocomplete, &mut manual, "CS", start);
    autocomplete.apply_results(
      lookup.generation,
      Ok(vec![course("CS101", "Intro to CS", 3.0)]),
    );
    autocomplete.commit(0, &mut manual);

    autocomplete.focus_lost(start);
    autocomplete.focus_gained(start);

    assert_eq!(autocomplete.next_deadline(), None);
    assert_eq!(autocomplete.phase(), Phase::Committed);
    assert_eq!(manual.code.text(), "CS101");
  }

  #[test]
  fn dismiss_hides_immediately() {
    let (mut autocomplete, mut manual) = (controller(), ManualEntry::default());

    let lookup =
      type_and_fire(&mut autocomplete, &mut manual, "CS", Instant::now());
    autocomplete.apply_results(lookup.generation, Ok(Vec::new()));

    autocomplete.dismiss();

    assert!(!autocomplete.is_visible());
    assert!(autocomplete.rows().is_empty());
  }

  #[test]
  fn highlight_moves_through_rows_and_commits() {
    let (mut autocomplete, mut manual) = (controller(), ManualEntry::default());

    let lookup =
      type_and_fire(&mut autocomplete, &mut manual, "CS", Instant::now());
    autocomplete.apply_results(
      lookup.generation,
      Ok(vec![
        course("CS101", "Intro to CS", 3.0),
        course("CS102", "Data Structures", 4.0),
      ]),
    );

    assert_eq!(autocomplete.highlighted_index(), Some(0));

    autocomplete.highlight_next();
    assert_eq!(autocomplete.highlighted_index(), Some(1));

    autocomplete.highlight_next();
    autocomplete.highlight_previous();
    autocomplete.highlight_previous();
    assert_eq!(autocomplete.highlighted_index(), Some(0));

    autocomplete.highlight_previous();

    let committed =
      autocomplete.commit_highlighted(&mut manual).expect("commit");

    assert_eq!(committed.code, "CS102");
    assert_eq!(manual.credits.text(), "4");
  }

  #[test]
  fn reset_clears_everything() {
    let (mut autocomplete, mut manual) = (controller(), ManualEntry::default());
    let start = Instant::now();

    let lookup = type_and_fire(&mut autocomplete, &mut manual, "CS", start);
    autocomplete.apply_results(
      lookup.generation,
      Ok(vec![course("CS101", "Intro to CS", 3.0)]),
    );
    autocomplete.commit(0, &mut manual);

    autocomplete.reset(&mut manual);

    assert_eq!(autocomplete.query(), "");
    assert_eq!(autocomplete.selected(), None);
    assert!(manual.is_empty());
    assert_eq!(autocomplete.phase(), Phase::Idle);
  }

  proptest! {
    #[test]
    fn only_latest_generation_is_ever_rendered(
      queries in prop::collection::vec("[a-z]{2,6}", 2..8),
      rotation in 0usize..16,
    ) {
      let (mut autocomplete, mut manual) =
        (controller(), ManualEntry::default());
      let start = Instant::now();

      let mut lookups = Vec::new();

      for (i, query) in queries.iter().enumerate() {
        let at = start + Duration::from_secs(u64::try_from(i).unwrap());
        lookups.push(type_and_fire(&mut autocomplete, &mut manual, query, at));
      }

      let latest = lookups.last().cloned().unwrap();

      let mut delivery = lookups.clone();
      let len = delivery.len();
      delivery.rotate_left(rotation % len);

      for lookup in delivery {
        let courses = vec![course(&lookup.query, "Result", 3.0)];
        let outcome =
          autocomplete.apply_results(lookup.generation, Ok(courses));

        prop_assert_eq!(outcome == LookupOutcome::Shown, lookup == latest);
      }

      let rows = autocomplete.rows();
      prop_assert_eq!(rows.len(), 1);
      prop_assert_eq!(
        &rows[0],
        &SuggestionRow::Course(course(&latest.query, "Result", 3.0))
      );
    }

    #[test]
    fn bursts_within_debounce_issue_at_most_one_lookup(
      texts in prop::collection::vec("[a-z ]{0,6}", 1..12),
      gaps in prop::collection::vec(0u64..300, 12),
    ) {
      let (mut autocomplete, mut manual) =
        (controller(), ManualEntry::default());
      let mut now = Instant::now();
      let mut issued = Vec::new();

      for (text, gap) in texts.iter().zip(gaps) {
        now += Duration::from_millis(gap);
        issued.extend(autocomplete.poll(now));
        autocomplete.query_changed(text.as_str(), &mut manual, now);
      }

      issued.extend(autocomplete.poll(now + DEBOUNCE));
      issued.extend(autocomplete.poll(now + DEBOUNCE * 10));

      prop_assert!(issued.len() <= 1);

      let last = texts.last().unwrap().trim();

      if last.chars().count() >= 2 {
        prop_assert_eq!(issued.len(), 1);
        prop_assert_eq!(issued[0].query.as_str(), last);
      } else {
        prop_assert!(issued.is_empty());
      }
    }
  }
}
