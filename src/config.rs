use super::*;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub(crate) struct LoggingConfig {
  pub(crate) file: Option<PathBuf>,
  pub(crate) level: String,
}

impl Default for LoggingConfig {
  fn default() -> Self {
    Self {
      file: None,
      level: "warn".into(),
    }
  }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub(crate) struct SearchConfig {
  /// Send the bearer token with course lookups. The catalog endpoint is
  /// public on the reference server, so this is off unless configured.
  pub(crate) authenticate: bool,
  pub(crate) blur_grace_ms: u64,
  pub(crate) debounce_ms: u64,
  pub(crate) limit: usize,
  pub(crate) min_query_len: usize,
}

impl Default for SearchConfig {
  fn default() -> Self {
    Self {
      authenticate: false,
      blur_grace_ms: 200,
      debounce_ms: 300,
      limit: 10,
      min_query_len: 2,
    }
  }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub(crate) struct Config {
  pub(crate) logging: LoggingConfig,
  pub(crate) search: SearchConfig,
  pub(crate) server_url: String,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      logging: LoggingConfig::default(),
      search: SearchConfig::default(),
      server_url: "http://localhost:5000".into(),
    }
  }
}

impl Config {
  pub(crate) fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("semplan").join("config.toml"))
  }

  /// Loads `path` when given, otherwise the default location. A missing
  /// default file yields the defaults; a missing explicit file is an error.
  pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
    let (path, explicit) = match path {
      Some(path) => (path.to_path_buf(), true),
      None => match Self::default_path() {
        Some(path) => (path, false),
        None => return Ok(Self::default()),
      },
    };

    if !explicit && !path.exists() {
      return Ok(Self::default());
    }

    let contents = fs::read_to_string(&path).with_context(|| {
      format!("could not read config file {}", path.display())
    })?;

    Self::parse(&contents).with_context(|| {
      format!("invalid config file {}", path.display())
    })
  }

  pub(crate) fn parse(contents: &str) -> Result<Self> {
    Ok(toml::from_str(contents)?)
  }
}

#[cfg(test)]
mod tests {
  use {super::*, std::io::Write};

  #[test]
  fn empty_file_yields_defaults() {
    let config = Config::parse("").unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.search.debounce_ms, 300);
    assert_eq!(config.search.blur_grace_ms, 200);
    assert_eq!(config.search.limit, 10);
    assert_eq!(config.search.min_query_len, 2);
    assert!(!config.search.authenticate);
  }

  #[test]
  fn partial_sections_keep_remaining_defaults() {
    let config = Config::parse(
      r#"
server_url = "https://planner.example.edu"

[search]
authenticate = true
debounce_ms = 150

[logging]
level = "debug"
"#,
    )
    .unwrap();

    assert_eq!(config.server_url, "https://planner.example.edu");
    assert!(config.search.authenticate);
    assert_eq!(config.search.debounce_ms, 150);
    assert_eq!(config.search.limit, 10);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.file, None);
  }

  #[test]
  fn invalid_values_are_rejected() {
    assert!(Config::parse("[search]\ndebounce_ms = \"soon\"").is_err());
  }

  #[test]
  fn load_reads_explicit_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[search]\nlimit = 5").unwrap();

    let config = Config::load(Some(file.path())).unwrap();

    assert_eq!(config.search.limit, 5);
  }

  #[test]
  fn load_fails_for_missing_explicit_file() {
    let dir = tempfile::tempdir().unwrap();

    let error =
      Config::load(Some(&dir.path().join("absent.toml"))).unwrap_err();

    assert!(error.to_string().contains("could not read config file"));
  }
}
