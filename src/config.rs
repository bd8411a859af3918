use super::*;

#[derive(Debug, PartialEq)]
pub(crate) struct Config {
  pub(crate) log_file: PathBuf,
  pub(crate) log_filter: String,
  pub(crate) server_url: String,
  pub(crate) timeout: Duration,
  pub(crate) view: ViewMode,
}

impl Config {
  const DEFAULT_LOG_FILTER: &str = "threadview=info";
  const DEFAULT_SERVER_URL: &str = "http://localhost:5000";
  const DEFAULT_TIMEOUT_SECS: u64 = 10;

  fn default_log_file() -> PathBuf {
    dirs::cache_dir()
      .unwrap_or_else(env::temp_dir)
      .join("threadview")
      .join("threadview.log")
  }

  /// Builds the configuration from `lookup`, which maps a variable name to
  /// its value. Blank values count as unset.
  pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let var = |name: &str| {
      lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
    };

    let view = match var("THREADVIEW_VIEW") {
      Some(view) => view.parse().context("invalid THREADVIEW_VIEW")?,
      None => ViewMode::default(),
    };

    let timeout = match var("THREADVIEW_TIMEOUT_SECS") {
      Some(seconds) => seconds.parse::<u64>().with_context(|| {
        format!("invalid THREADVIEW_TIMEOUT_SECS `{seconds}`")
      })?,
      None => Self::DEFAULT_TIMEOUT_SECS,
    };

    if timeout == 0 {
      bail!("THREADVIEW_TIMEOUT_SECS must be at least 1");
    }

    Ok(Self {
      log_file: var("THREADVIEW_LOG_FILE")
        .map_or_else(Self::default_log_file, PathBuf::from),
      log_filter: var("THREADVIEW_LOG")
        .unwrap_or_else(|| Self::DEFAULT_LOG_FILTER.to_string()),
      server_url: var("THREADVIEW_SERVER_URL")
        .unwrap_or_else(|| Self::DEFAULT_SERVER_URL.to_string()),
      timeout: Duration::from_secs(timeout),
      view,
    })
  }

  /// Reads `.env` when present, then the process environment.
  pub(crate) fn load() -> Result<Self> {
    dotenvy::dotenv().ok();

    Self::from_lookup(|name| env::var(name).ok())
  }

  pub(crate) fn with_arguments(mut self, arguments: &Arguments) -> Self {
    if let Some(server) = &arguments.server {
      self.server_url.clone_from(server);
    }

    if let Invocation::Html(Some(view)) = arguments.invocation {
      self.view = view;
    }

    self
  }
}
