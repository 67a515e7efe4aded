use super::*;

/// Bearer token used by the authenticated endpoints.
///
/// `SEMPLAN_TOKEN` wins over the token file. Clearing the session deletes
/// the file so an expired token is not reused on the next run.
#[derive(Debug)]
pub(crate) struct Session {
  path: Option<PathBuf>,
  token: Option<String>,
}

impl Session {
  pub(crate) fn clear(&mut self) -> Result {
    self.token = None;

    let Some(path) = &self.path else {
      return Ok(());
    };

    match fs::remove_file(path) {
      Ok(()) => Ok(()),
      Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
      Err(error) => Err(error).with_context(|| {
        format!("could not remove token file {}", path.display())
      }),
    }
  }

  pub(crate) fn from_path(path: PathBuf) -> Result<Self> {
    let token = match fs::read_to_string(&path) {
      Ok(contents) => Some(contents.trim().to_string()),
      Err(error) if error.kind() == io::ErrorKind::NotFound => None,
      Err(error) => {
        return Err(error).with_context(|| {
          format!("could not read token file {}", path.display())
        });
      }
    };

    Ok(Self {
      path: Some(path),
      token: token.filter(|token| !token.is_empty()),
    })
  }

  pub(crate) fn load() -> Result<Self> {
    let path = Self::token_path();

    if let Ok(token) = env::var("SEMPLAN_TOKEN") {
      let token = token.trim().to_string();

      if !token.is_empty() {
        return Ok(Self {
          path,
          token: Some(token),
        });
      }
    }

    match path {
      Some(path) => Self::from_path(path),
      None => Ok(Self {
        path: None,
        token: None,
      }),
    }
  }

  pub(crate) fn token(&self) -> Option<&str> {
    self.token.as_deref()
  }

  fn token_path() -> Option<PathBuf> {
    if let Ok(path) = env::var("SEMPLAN_TOKEN_FILE") {
      return Some(PathBuf::from(path));
    }

    dirs::config_dir().map(|dir| dir.join("semplan").join("token"))
  }

  #[cfg(test)]
  pub(crate) fn with_token(token: Option<&str>) -> Self {
    Self {
      path: None,
      token: token.map(str::to_string),
    }
  }
}
