use super::*;

pub(crate) fn default_log_path() -> PathBuf {
  dirs::cache_dir()
    .unwrap_or_else(env::temp_dir)
    .join("semplan")
    .join("semplan.log")
}

/// Routes `tracing` output to the log file. The terminal belongs to the UI,
/// so nothing is written to stdout or stderr. `RUST_LOG` takes precedence
/// over `logging.level`.
pub(crate) fn init(config: &LoggingConfig) -> Result<PathBuf> {
  let path = config.file.clone().unwrap_or_else(default_log_path);

  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).with_context(|| {
      format!("could not create log directory {}", parent.display())
    })?;
  }

  let file = fs::OpenOptions::new()
    .create(true)
    .append(true)
    .open(&path)
    .with_context(|| format!("could not open log file {}", path.display()))?;

  let filter = if env::var("RUST_LOG").is_ok() {
    EnvFilter::from_default_env()
  } else {
    EnvFilter::try_new(&config.level).with_context(|| {
      format!("invalid log level `{}`", config.level)
    })?
  };

  tracing_subscriber::fmt()
    .with_ansi(false)
    .with_env_filter(filter)
    .with_target(true)
    .with_writer(Mutex::new(file))
    .try_init()
    .map_err(|error| anyhow!("could not initialize logging: {error}"))?;

  Ok(path)
}
