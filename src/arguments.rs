use super::*;

#[derive(Debug, Parser)]
#[command(version, about = "Plan one semester of courses from the terminal")]
pub(crate) struct Arguments {
  /// Config file to use instead of the default location
  #[arg(long, env = "SEMPLAN_CONFIG", value_name = "PATH")]
  pub(crate) config: Option<PathBuf>,
  /// Semester to plan, from 0 (Freshman Fall) to 7 (Senior Spring)
  #[arg(long, short, value_name = "INDEX")]
  pub(crate) semester: Option<usize>,
  /// Planner server base URL, overriding `server_url` from the config
  #[arg(long, env = "SEMPLAN_SERVER", value_name = "URL")]
  pub(crate) server: Option<String>,
}

impl Arguments {
  pub(crate) fn config(&self) -> Result<Config> {
    let mut config = Config::load(self.config.as_deref())?;

    if let Some(server) = &self.server {
      config.server_url.clone_from(server);
    }

    Ok(config)
  }
}
