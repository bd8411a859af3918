use super::*;

pub(crate) struct App {
  client: Client,
  event_rx: UnboundedReceiver<Event>,
  event_tx: UnboundedSender<Event>,
  handle: Handle,
  state: State,
}

impl App {
  /// Applies `action`, starting whatever requests it asks for. Returns
  /// whether the app should exit.
  fn apply(&mut self, action: Action) -> bool {
    let dispatch = self.state.dispatch(action);

    for effect in dispatch.effects {
      self.execute_effect(effect);
    }

    dispatch.should_exit
  }

  fn comment_list_item(
    row: &Row,
    view_mode: ViewMode,
    available_width: u16,
    expanding: bool,
  ) -> ListItem<'static> {
    let depth_indent = "  ".repeat(row.depth());
    let indent = format!("{BASE_INDENT}{depth_indent}");

    let muted = Style::default().fg(Color::DarkGray);

    match row {
      Row::Collapsed { hidden, .. } => {
        let text = if expanding {
          "Expanding thread...".to_string()
        } else {
          format!(
            "Thread collapsed ({}). enter to expand",
            format_replies(*hidden)
          )
        };

        ListItem::new(vec![
          Line::from(vec![
            Span::raw(indent.clone()),
            Span::styled(text, Style::default().fg(Color::Yellow)),
          ]),
          Line::from(Span::raw(indent)),
        ])
      }
      Row::Comment {
        body,
        collapsed,
        is_reply,
        timestamp,
        user,
        votes,
        ..
      } => {
        let mut header = vec![Span::raw(indent.clone())];

        if *collapsed {
          header.push(Span::raw("[+] "));
        }

        if *is_reply && view_mode == ViewMode::Flat {
          header.push(Span::styled("↳ ", muted));
        }

        header.push(Span::styled(
          user.clone(),
          Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
        ));

        header.push(Span::styled(
          format!(" {timestamp} • {}", format_votes(*votes)),
          muted,
        ));

        let mut lines = vec![Line::from(header)];

        let prefix_width = indent.chars().count();

        let wrap_width =
          usize::from(available_width).saturating_sub(prefix_width).max(1);

        for line in wrap_text(body, wrap_width) {
          lines.push(Line::from(vec![
            Span::raw(indent.clone()),
            Span::styled(line, Style::default().fg(Color::Gray)),
          ]));
        }

        lines.push(Line::from(Span::raw(indent)));

        ListItem::new(lines)
      }
    }
  }

  fn draw(&mut self, frame: &mut Frame) {
    let layout = Layout::default()
      .direction(Direction::Vertical)
      .margin(1)
      .constraints([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(1),
      ])
      .split(frame.area());

    self.state.set_list_height(usize::from(layout[1].height));

    let view_mode = self.state.view_mode();

    let tab_titles: Vec<Line> = ViewMode::ALL
      .iter()
      .map(|mode| Line::from(mode.label().to_uppercase()))
      .collect();

    let tabs = Tabs::new(tab_titles)
      .select(view_mode.index())
      .style(Style::default().fg(Color::DarkGray))
      .highlight_style(
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD),
      )
      .divider(Span::raw(" "));

    frame.render_widget(tabs, layout[0]);

    let view = self.state.view();

    let list_items: Vec<ListItem> = if view.is_empty() {
      let text = if self.state.is_loading() {
        "Loading..."
      } else {
        "No comments yet."
      };

      vec![ListItem::new(Line::from(vec![
        Span::raw(BASE_INDENT),
        Span::raw(text),
      ]))]
    } else {
      view
        .rows()
        .iter()
        .map(|row| {
          let expanding = row
            .expand_target()
            .is_some_and(|id| self.state.is_expanding(id));

          Self::comment_list_item(row, view_mode, layout[1].width, expanding)
        })
        .collect()
    };

    let mut list_state = ListState::default()
      .with_selected(view.selected_index())
      .with_offset(view.offset());

    let list = List::new(list_items)
      .highlight_style(
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol("");

    frame.render_stateful_widget(list, layout[1], &mut list_state);

    self.state.view_mut().set_offset(list_state.offset());

    let status = Paragraph::new(self.state.status_text().to_string())
      .style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, layout[2]);

    self.state.help().draw(frame);

    if let Some(form) = self.state.compose() {
      form.draw(frame);
    }

    if let Some(alert) = self.state.alert() {
      alert.draw(frame);
    }
  }

  fn execute_effect(&self, effect: Effect) {
    debug!(?effect, "starting request");

    let client = self.client.clone();

    match effect {
      Effect::CastVote { vote } => self.spawn(async move {
        let result = client.cast_vote(&vote).await;
        Event::Voted { result, vote }
      }),
      Effect::FetchComments { request_id, view } => self.spawn(async move {
        Event::Comments {
          request_id,
          result: client.fetch_comments(view).await,
          view,
        }
      }),
      Effect::FetchExpansion { comment_id } => self.spawn(async move {
        Event::Expansion {
          result: client.fetch_comments(ViewMode::Tree).await,
          comment_id,
        }
      }),
      Effect::PostComment { comment } => self.spawn(async move {
        Event::Posted {
          result: client.post_comment(&comment).await,
        }
      }),
    }
  }

  pub(crate) fn new(client: Client, view_mode: ViewMode) -> Self {
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    Self {
      client,
      event_rx,
      event_tx,
      handle: Handle::current(),
      state: State::new(view_mode),
    }
  }

  fn process_pending_events(&mut self) {
    self.state.tick();

    while let Ok(event) = self.event_rx.try_recv() {
      for effect in self.state.handle_event(event) {
        self.execute_effect(effect);
      }
    }
  }

  pub(crate) fn run(
    &mut self,
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
  ) -> Result {
    self.apply(Action::Refresh);

    loop {
      self.process_pending_events();

      terminal.draw(|frame| self.draw(frame))?;

      if !crossterm_event::poll(Duration::from_millis(200))? {
        continue;
      }

      let CrosstermEvent::Key(key) = crossterm_event::read()? else {
        continue;
      };

      if key.kind != KeyEventKind::Press {
        continue;
      }

      let action = if self.state.alert().is_some() {
        Alert::handle_key(key)
      } else if self.state.help().is_visible() {
        HelpView::handle_key(key)
      } else if let Some(form) = self.state.compose_mut() {
        form.handle_key(key)
      } else {
        let page = self.state.list_height().max(1);
        self.state.view_mut().handle_key(key, page)
      };

      if self.apply(action) {
        break;
      }
    }

    Ok(())
  }

  /// Runs `request` on the runtime and feeds its event back to the UI loop.
  fn spawn<F>(&self, request: F)
  where
    F: Future<Output = Event> + Send + 'static,
  {
    let sender = self.event_tx.clone();

    self.handle.spawn(async move {
      let _ = sender.send(request.await);
    });
  }
}
