use {
  action::Action,
  alert::Alert,
  anyhow::{Context, anyhow, bail},
  api_error::ApiError,
  app::App,
  arguments::{Arguments, Invocation},
  chrono::{DateTime, Local, NaiveDateTime, TimeZone},
  client::Client,
  comment::Comment,
  comment_block::{CommentBlock, Replies},
  comment_view::CommentView,
  comments_response::CommentsResponse,
  compose_form::{ComposeForm, ReplyTarget},
  config::Config,
  crossterm::{
    event as crossterm_event,
    event::{
      Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    },
    execute,
    style::Stylize,
    terminal::{
      EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
      enable_raw_mode,
    },
  },
  dispatch::Dispatch,
  effect::Effect,
  event::Event,
  help_view::HelpView,
  list_view::ListView,
  new_comment::NewComment,
  ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
      Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap,
    },
  },
  row::Row,
  serde::{
    Deserialize, Deserializer, Serialize,
    de::{self, Unexpected},
  },
  serde_json::Value,
  state::State,
  status_line::StatusLine,
  std::{
    backtrace::BacktraceStatus,
    borrow::Cow,
    collections::HashSet,
    env,
    fmt::{self, Display, Formatter},
    fs,
    io::{self, IsTerminal, Stdout},
    mem,
    path::PathBuf,
    process,
    str::FromStr,
    sync::Mutex,
    time::{Duration, Instant},
  },
  tokio::{
    runtime::Handle,
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
  },
  tracing::{debug, info, warn},
  tracing_subscriber::EnvFilter,
  tree_renderer::{DEFAULT_COLLAPSE_THRESHOLD, TreeRenderer},
  utils::{
    centered_rect, deserialize_id, deserialize_null_default,
    deserialize_optional_id, format_replies, format_timestamp, format_votes,
    text_popup_area, truncate, wrap_text,
  },
  view_mode::ViewMode,
  vote::Vote,
};

#[cfg(test)]
use stub_backend::StubBackend;

mod action;
mod alert;
mod api_error;
mod app;
mod arguments;
mod client;
mod comment;
mod comment_block;
mod comment_view;
mod comments_response;
mod compose_form;
mod config;
mod dispatch;
mod effect;
mod event;
mod help_view;
mod html;
mod list_view;
mod logging;
mod new_comment;
mod row;
mod state;
mod status_line;
#[cfg(test)]
mod stub_backend;
mod tree_renderer;
mod utils;
mod view_mode;
mod vote;

const BASE_INDENT: &str = " ";

const BROWSE_STATUS: &str = "↑/k up • ↓/j down • enter expand • c comment • r reply • +/- vote • t/f view • ? help";

const COMPOSE_STATUS: &str = "enter submit • tab switch field • esc cancel";

const HELP_TITLE: &str = "Help";
const HELP_STATUS: &str = "Press ? or esc to close help";

const LOADING_COMMENTS_STATUS: &str = "Loading comments...";

const HELP_TEXT: &str = "\
Views:
  t / ← / h   tree view (threads nest and large ones collapse)
  f / → / l   flat view (every comment in posting order)

Navigation:
  ↑ / k       move selection up
  ↓ / j       move selection down
  pg↓         page down
  pg↑         page up
  ctrl+d      page down
  ctrl+u      page up
  home        jump to first comment
  end         jump to last comment

Actions:
  enter       expand the selected collapsed thread
  space       expand the selected collapsed thread
  c           write a new top-level comment
  r           reply to the selected comment
  + / =       upvote the selected comment
  -           downvote the selected comment
  R / f5      reload comments
  q / esc     quit
  ?           toggle this help

Compose:
  tab         switch between name and content
  enter       submit
  esc         cancel
";

const USAGE: &str = "\
Usage: threadview [OPTIONS]

Options:
  --server <URL>        comment server base URL (default: $THREADVIEW_SERVER_URL
                        or http://localhost:5000)
  --html [tree|flat]    print the comments as an HTML fragment and exit
  -h, --help            print this help
  -V, --version         print the version
";

type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;

fn initialize_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
  enable_raw_mode()?;

  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen)?;

  Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(
  terminal: &mut Terminal<CrosstermBackend<Stdout>>,
) -> Result {
  disable_raw_mode()?;

  execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

  terminal.show_cursor()?;

  Ok(())
}

async fn run() -> Result {
  let arguments = Arguments::parse(env::args().skip(1))?;

  match arguments.invocation {
    Invocation::Help => {
      print!("{USAGE}");
      return Ok(());
    }
    Invocation::Version => {
      println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
      return Ok(());
    }
    Invocation::Browse | Invocation::Html(_) => {}
  }

  let config = Config::load()?.with_arguments(&arguments);

  logging::init(&config)?;

  info!(server = %config.server_url, view = %config.view, "starting");

  let client = Client::new(&config.server_url, config.timeout)?;

  if let Invocation::Html(_) = arguments.invocation {
    let response = client
      .fetch_comments(config.view)
      .await
      .with_context(|| {
        format!("could not load comments from {}", config.server_url)
      })?;

    println!("{}", html::render(&response.render(config.view)));

    return Ok(());
  }

  let mut terminal = initialize_terminal()?;

  let mut app = App::new(client, config.view);

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
