use super::*;

/// A blocking notice. While one is showing, every key other than the
/// dismiss keys is ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Alert {
  message: String,
}

impl Alert {
  const FOOTER: &str = "press enter to dismiss";
  const TITLE: &str = "Notice";

  pub(crate) fn draw(&self, frame: &mut Frame) {
    let text = format!("{}\n\n{}", self.message, Self::FOOTER);

    let area = text_popup_area(frame.area(), &text);

    frame.render_widget(Clear, area);

    let alert = Paragraph::new(text)
      .style(Style::default().fg(Color::White))
      .block(
        Block::default()
          .title(Self::TITLE)
          .borders(Borders::ALL)
          .border_style(Style::default().fg(Color::Red)),
      )
      .wrap(Wrap { trim: true });

    frame.render_widget(alert, area);
  }

  pub(crate) fn handle_key(key: KeyEvent) -> Action {
    match key.code {
      KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => {
        Action::DismissAlert
      }
      _ => Action::None,
    }
  }

  #[cfg(test)]
  pub(crate) fn message(&self) -> &str {
    &self.message
  }

  pub(crate) fn new(message: impl Into<String>) -> Self {
    Self {
      message: message.into(),
    }
  }
}
