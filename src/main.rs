use {
  anyhow::{Context, anyhow},
  api::{
    ErrorBody, GenerateRequest, RecommendationsResponse, SavePlanRequest,
    SavedPlans, SearchResponse,
  },
  app::App,
  arguments::Arguments,
  autocomplete::{Autocomplete, Phase},
  clap::Parser,
  client::Client,
  command::Command,
  command_dispatch::CommandDispatch,
  config::{Config, LoggingConfig, SearchConfig},
  confirm_view::ConfirmView,
  course::{Course, Recommendation},
  course_list::{CourseEntry, CourseList, Notice},
  crossterm::{
    event as crossterm_event,
    event::{
      DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent,
      KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
      MouseEventKind,
    },
    execute,
    style::Stylize,
    terminal::{
      EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
      enable_raw_mode,
    },
  },
  effect::{Effect, SavePurpose},
  error::ApiError,
  event::Event,
  focus::Focus,
  help_view::HelpView,
  input_field::InputField,
  list_view::ListView,
  manual_entry::ManualEntry,
  pending_lookup::{Lookup, PendingLookup},
  pending_save::PendingSave,
  ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
      Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap,
    },
  },
  reqwest::{RequestBuilder, StatusCode},
  screen_layout::ScreenLayout,
  semester::Semester,
  serde::{
    Deserialize, Deserializer, Serialize,
    de::{self, DeserializeOwned, Unexpected},
  },
  serde_json::Value,
  session::Session,
  state::State,
  std::{
    backtrace::BacktraceStatus,
    collections::HashMap,
    env, fs,
    io::{self, IsTerminal, Stdout},
    path::{Path, PathBuf},
    process,
    sync::Mutex,
    time::{Duration, Instant},
  },
  suggestion_row::SuggestionRow,
  thiserror::Error,
  tokio::{
    runtime::Handle,
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
  },
  tracing::{debug, info, warn},
  tracing_subscriber::EnvFilter,
  transient_message::TransientMessage,
  utils::{centered_rect, contains, deserialize_credits, truncate, wrap_text},
};

#[cfg(test)]
use suggestion_row::NO_MATCHES_LABEL;

mod api;
mod app;
mod arguments;
mod autocomplete;
mod client;
mod command;
mod command_dispatch;
mod config;
mod confirm_view;
mod course;
mod course_list;
mod effect;
mod error;
mod event;
mod focus;
mod help_view;
mod input_field;
mod list_view;
mod logging;
mod manual_entry;
mod pending_lookup;
mod pending_save;
mod screen_layout;
mod semester;
mod session;
mod state;
mod suggestion_row;
mod transient_message;
mod utils;

const STATUS: &str = "tab next field • enter select/add • ctrl+g generate • ctrl+s save • ctrl+x clear • f1 help • ctrl+c quit";

const HELP_TITLE: &str = "Help";
const HELP_STATUS: &str = "Press ? or esc to close help";

const CONFIRM_TITLE: &str = "Clear all courses";
const CLEAR_ALL_PROMPT: &str = "Are you sure you want to delete all courses from this semester? This action cannot be undone.";

const CAREER_PATH_REQUIRED: &str = "Please enter your intended career path";
const CLEARED_MESSAGE: &str =
  "All courses cleared from this semester successfully!";
const CLEARING_STATUS: &str = "Clearing...";
const EMPTY_PLAN: &str =
  "No courses yet. Generate recommendations or add one manually.";
const LOADING_RECOMMENDATIONS: &str = "Loading recommendations...";
const LOGIN_FIRST: &str = "Please login first";
const NO_RECOMMENDATIONS: &str = "No courses available for this semester.";
const SAVING_STATUS: &str = "Saving...";
const SELECT_COURSE_FIRST: &str = "Please search and select a course first.";
const SESSION_EXPIRED: &str = "Session expired. Please login again.";

const BASE_INDENT: &str = " ";

const MAX_POLL_INTERVAL: Duration = Duration::from_millis(200);

const HELP_TEXT: &str = "\
Fields:
  tab / shift+tab  move between fields
  enter            in search: add the highlighted course to the fields
                   in code, title or credits: add the course to the plan
                   in career path or interests: generate recommendations
  esc              hide course suggestions
  click            focus a field or pick a suggestion

Search:
  type 2+ letters  look up courses by code or title
  ↑ / ↓            move through suggestions

Courses:
  ↑/k ↓/j          move selection
  space / enter    include or leave out of the saved plan
  q                quit

Actions:
  ctrl+g           generate recommendations
  ctrl+a           add the selected course
  ctrl+s           save the included courses
  ctrl+x           clear every course from this semester
  f1               toggle this help (also ? in the course list)
  ctrl+c           quit
";

type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;

fn initialize_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
  enable_raw_mode()?;

  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

  Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(
  terminal: &mut Terminal<CrosstermBackend<Stdout>>,
) -> Result {
  disable_raw_mode()?;

  execute!(
    terminal.backend_mut(),
    DisableMouseCapture,
    LeaveAlternateScreen
  )?;

  terminal.show_cursor()?;

  Ok(())
}

async fn run() -> Result {
  let arguments = Arguments::parse();

  let config = arguments.config()?;

  let log_path = logging::init(&config.logging)?;

  let semester = Semester::from_index(arguments.semester);

  info!(
    log = %log_path.display(),
    server = %config.server_url,
    semester = semester.name,
    "starting"
  );

  let session = Session::load().context("could not load session token")?;

  if session.token().is_none() {
    warn!("no session token, authenticated actions are unavailable");
  }

  let client = Client::new(&config.server_url);

  let state = State::new(&config, semester, session);

  let mut terminal = initialize_terminal()?;

  let mut app = App::new(client, state);

  let result = app.run(&mut terminal);

  restore_terminal(&mut terminal)?;

  result
}

#[tokio::main]
async fn main() {
  if let Err(error) = run().await {
    let use_color = io::stderr().is_terminal();

    if use_color {
      eprintln!("{} {error}", "error:".bold().red());
    } else {
      eprintln!("error: {error}");
    }

    for (i, error) in error.chain().skip(1).enumerate() {
      if i == 0 {
        eprintln!();

        if use_color {
          eprintln!("{}", "because:".bold().red());
        } else {
          eprintln!("because:");
        }
      }

      if use_color {
        eprintln!("{} {error}", "-".bold().red());
      } else {
        eprintln!("- {error}");
      }
    }

    let backtrace = error.backtrace();

    if backtrace.status() == BacktraceStatus::Captured {
      if use_color {
        eprintln!("{}", "backtrace:".bold().red());
      } else {
        eprintln!("backtrace:");
      }

      eprintln!("{backtrace}");
    }

    process::exit(1);
  }
}
