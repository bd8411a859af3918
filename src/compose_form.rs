use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ComposeField {
  Content,
  User,
}

/// The comment being answered by a reply form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ReplyTarget {
  pub(crate) id: String,
  pub(crate) user: String,
}

#[derive(Debug)]
pub(crate) struct ComposeForm {
  content: String,
  focus: ComposeField,
  parent: Option<ReplyTarget>,
  submitting: bool,
  user: String,
}

impl ComposeForm {
  const DEFAULT_USER: &str = "You";
  const EMPTY_COMMENT_NOTICE: &str = "Type a comment";
  const EMPTY_REPLY_NOTICE: &str = "Type a reply";
  const HEIGHT: u16 = 12;
  const USER_PLACEHOLDER: &str = "Your name (optional)";
  const WIDTH: u16 = 72;

  pub(crate) fn draw(&self, frame: &mut Frame) {
    let area = centered_rect(frame.area(), Self::WIDTH, Self::HEIGHT);

    frame.render_widget(Clear, area);

    let label_style = Style::default().fg(Color::DarkGray);

    let focused_style = Style::default()
      .fg(Color::Cyan)
      .add_modifier(Modifier::BOLD);

    let field_label = |field: ComposeField, label: &'static str| {
      Span::styled(
        label,
        if self.focus == field {
          focused_style
        } else {
          label_style
        },
      )
    };

    let cursor = |field: ComposeField| {
      if self.focus == field && !self.submitting {
        "▌"
      } else {
        ""
      }
    };

    let user = if self.user.is_empty() && self.focus != ComposeField::User {
      Span::styled(Self::USER_PLACEHOLDER, label_style)
    } else {
      Span::raw(format!("{}{}", self.user, cursor(ComposeField::User)))
    };

    let mut lines = vec![
      Line::from(vec![field_label(ComposeField::User, "Name     "), user]),
      Line::from(""),
      Line::from(field_label(ComposeField::Content, "Content")),
    ];

    let content = format!("{}{}", self.content, cursor(ComposeField::Content));

    for line in content.split('\n') {
      lines.push(Line::from(line.to_string()));
    }

    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
      if self.submitting {
        "Posting..."
      } else {
        COMPOSE_STATUS
      },
      label_style,
    )));

    let form = Paragraph::new(lines)
      .block(Block::default().title(self.title()).borders(Borders::ALL))
      .wrap(Wrap { trim: false });

    frame.render_widget(form, area);
  }

  fn field_mut(&mut self) -> &mut String {
    match self.focus {
      ComposeField::Content => &mut self.content,
      ComposeField::User => &mut self.user,
    }
  }

  pub(crate) fn handle_key(&mut self, key: KeyEvent) -> Action {
    if self.submitting {
      return match key.code {
        KeyCode::Esc => Action::CancelCompose,
        _ => Action::None,
      };
    }

    match key.code {
      KeyCode::Esc => Action::CancelCompose,
      KeyCode::Enter => Action::SubmitCompose,
      KeyCode::Tab | KeyCode::BackTab => {
        self.focus = match self.focus {
          ComposeField::Content => ComposeField::User,
          ComposeField::User => ComposeField::Content,
        };

        Action::None
      }
      KeyCode::Backspace => {
        self.field_mut().pop();
        Action::None
      }
      KeyCode::Char(ch) => {
        let modifiers = key.modifiers;

        if modifiers.contains(KeyModifiers::CONTROL)
          || modifiers.contains(KeyModifiers::ALT)
          || modifiers.contains(KeyModifiers::SUPER)
        {
          return Action::None;
        }

        self.field_mut().push(ch);

        Action::None
      }
      _ => Action::None,
    }
  }

  pub(crate) fn is_submitting(&self) -> bool {
    self.submitting
  }

  pub(crate) fn new_comment() -> Self {
    Self {
      content: String::new(),
      focus: ComposeField::Content,
      parent: None,
      submitting: false,
      user: String::new(),
    }
  }

  pub(crate) fn reply(target: ReplyTarget) -> Self {
    Self {
      parent: Some(target),
      ..Self::new_comment()
    }
  }

  pub(crate) fn set_submitting(&mut self, submitting: bool) {
    self.submitting = submitting;
  }

  /// Validates the form. Empty content yields the notice to show instead of
  /// sending a request.
  pub(crate) fn submission(&self) -> Result<NewComment, &'static str> {
    let content = self.content.trim();

    if content.is_empty() {
      return Err(match self.parent {
        Some(_) => Self::EMPTY_REPLY_NOTICE,
        None => Self::EMPTY_COMMENT_NOTICE,
      });
    }

    let user = match self.user.trim() {
      "" => Self::DEFAULT_USER,
      user => user,
    };

    Ok(NewComment {
      content: content.to_string(),
      parent_comment_id: self.parent.as_ref().map(|parent| parent.id.clone()),
      user: user.to_string(),
    })
  }

  fn title(&self) -> String {
    match &self.parent {
      Some(parent) if parent.user.is_empty() => "Reply".to_string(),
      Some(parent) => format!("Reply to {}", truncate(&parent.user, 40)),
      None => "New comment".to_string(),
    }
  }
}
