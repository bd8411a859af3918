use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Invocation {
  Browse,
  Help,
  /// Print the HTML fragment for one fetch, optionally overriding the view.
  Html(Option<ViewMode>),
  Version,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Arguments {
  pub(crate) invocation: Invocation,
  pub(crate) server: Option<String>,
}

impl Arguments {
  pub(crate) fn parse<I>(arguments: I) -> Result<Self>
  where
    I: IntoIterator<Item = String>,
  {
    let mut arguments = arguments.into_iter().peekable();

    let mut parsed = Self {
      invocation: Invocation::Browse,
      server: None,
    };

    while let Some(argument) = arguments.next() {
      match argument.as_str() {
        "-h" | "--help" => parsed.invocation = Invocation::Help,
        "-V" | "--version" => parsed.invocation = Invocation::Version,
        "--html" => {
          let view = match arguments.next_if(|next| !next.starts_with('-')) {
            Some(view) => Some(view.parse::<ViewMode>()?),
            None => None,
          };

          parsed.invocation = Invocation::Html(view);
        }
        "--server" => {
          let Some(server) = arguments.next() else {
            bail!("`--server` requires a URL\n\n{USAGE}");
          };

          parsed.server = Some(server);
        }
        other => match other.strip_prefix("--server=") {
          Some(server) => parsed.server = Some(server.to_string()),
          None => bail!("unexpected argument `{other}`\n\n{USAGE}"),
        },
      }

      if matches!(parsed.invocation, Invocation::Help | Invocation::Version) {
        break;
      }
    }

    Ok(parsed)
  }
}
