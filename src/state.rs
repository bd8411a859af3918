use super::*;

pub(crate) struct State {
  alert: Option<Alert>,
  compose: Option<ComposeForm>,
  expanding: HashSet<String>,
  help: HelpView,
  list_height: usize,
  next_request_id: u64,
  pending_effects: Vec<Effect>,
  pending_refresh: Option<u64>,
  status: StatusLine,
  view: CommentView,
  view_mode: ViewMode,
}

impl State {
  pub(crate) fn alert(&self) -> Option<&Alert> {
    self.alert.as_ref()
  }

  fn cast_vote(&mut self, vote: fn(String) -> Vote) {
    let Some(comment_id) = self.view.selected_comment_id() else {
      return;
    };

    let vote = vote(comment_id.to_string());

    debug!(comment_id = %vote.comment_id, delta = vote.delta, "casting vote");

    self.pending_effects.push(Effect::CastVote { vote });
  }

  pub(crate) fn compose(&self) -> Option<&ComposeForm> {
    self.compose.as_ref()
  }

  pub(crate) fn compose_mut(&mut self) -> Option<&mut ComposeForm> {
    self.compose.as_mut()
  }

  pub(crate) fn dispatch(&mut self, action: Action) -> Dispatch {
    debug_assert!(
      self.pending_effects.is_empty(),
      "action dispatch should start without pending effects"
    );

    let mut should_exit = false;

    match action {
      Action::CancelCompose => self.compose = None,
      Action::DismissAlert => self.alert = None,
      Action::Downvote => self.cast_vote(Vote::down),
      Action::Expand => self.expand_selected(),
      Action::HideHelp => self.help.hide(),
      Action::None => {}
      Action::Quit => should_exit = true,
      Action::Refresh => self.refresh(),
      Action::ShowFlat => self.show(ViewMode::Flat),
      Action::ShowHelp => self.help.show(),
      Action::ShowTree => self.show(ViewMode::Tree),
      Action::StartComment => {
        self.compose = Some(ComposeForm::new_comment());
      }
      Action::StartReply => {
        if let Some(target) =
          self.view.selected_row().and_then(Row::reply_target)
        {
          self.compose = Some(ComposeForm::reply(target));
        }
      }
      Action::SubmitCompose => self.submit_compose(),
      Action::Upvote => self.cast_vote(Vote::up),
    }

    self.settle_status();

    Dispatch {
      effects: mem::take(&mut self.pending_effects),
      should_exit,
    }
  }

  fn expand_selected(&mut self) {
    if self.view_mode != ViewMode::Tree {
      return;
    }

    let Some(comment_id) = self.view.expand_target().map(str::to_string)
    else {
      return;
    };

    if !self.expanding.insert(comment_id.clone()) {
      return;
    }

    debug!(%comment_id, "expanding collapsed thread");

    self
      .pending_effects
      .push(Effect::FetchExpansion { comment_id });
  }

  /// Applies a finished request. Returns any follow-up requests it triggers.
  pub(crate) fn handle_event(&mut self, event: Event) -> Vec<Effect> {
    match event {
      Event::Comments {
        request_id,
        result,
        view,
      } => {
        if self.pending_refresh != Some(request_id) {
          debug!(request_id, "dropping stale comments response");
          return Vec::new();
        }

        self.pending_refresh = None;

        match result {
          Ok(response) => {
            let previous = self.view.selected_row().cloned();
            let offset = self.view.offset();

            self.view = CommentView::new(view, &response);

            info!(
              comments = response.comments.len(),
              threshold = self.view.threshold(),
              %view,
              "loaded comments"
            );

            if let Some(previous) = previous {
              self.view.restore_selection(&previous);
            }

            self.view.set_offset(offset);

            self.expanding.clear();
          }
          Err(error) => {
            warn!(%error, %view, "could not load comments");

            self
              .status
              .flash(format!("Could not load comments: {error}"));
          }
        }
      }
      Event::Expansion { comment_id, result } => {
        self.expanding.remove(&comment_id);

        match result {
          Ok(response) => {
            if !self.view.expand(&comment_id, &response.comments) {
              debug!(%comment_id, "collapsed thread no longer present");
            }
          }
          Err(error) => {
            warn!(%comment_id, %error, "could not expand thread");

            self
              .status
              .flash(format!("Could not expand thread: {error}"));
          }
        }
      }
      Event::Posted { result } => match result {
        Ok(()) => {
          info!("comment posted");

          self.compose = None;
          self.status.flash("Comment posted");
          self.refresh();
        }
        Err(error) => {
          warn!(%error, "could not post comment");

          if let Some(form) = self.compose.as_mut() {
            form.set_submitting(false);
          }

          self.alert = Some(Alert::new(error.to_string()));
        }
      },
      Event::Voted { result, vote } => match result {
        Ok(()) => self.refresh(),
        Err(error) if error.is_backend() => {
          warn!(comment_id = %vote.comment_id, %error, "vote rejected");

          self.alert = Some(Alert::new(error.to_string()));
          self.refresh();
        }
        Err(error) => {
          warn!(comment_id = %vote.comment_id, %error, "could not send vote");

          self.status.flash(format!("Could not record vote: {error}"));
        }
      },
    }

    self.settle_status();

    mem::take(&mut self.pending_effects)
  }

  pub(crate) fn help(&self) -> &HelpView {
    &self.help
  }

  pub(crate) fn is_expanding(&self, comment_id: &str) -> bool {
    self.expanding.contains(comment_id)
  }

  pub(crate) fn is_loading(&self) -> bool {
    self.pending_refresh.is_some()
  }

  pub(crate) fn list_height(&self) -> usize {
    self.list_height
  }

  pub(crate) fn new(view_mode: ViewMode) -> Self {
    Self {
      alert: None,
      compose: None,
      expanding: HashSet::new(),
      help: HelpView::new(),
      list_height: 0,
      next_request_id: 0,
      pending_effects: Vec::new(),
      pending_refresh: None,
      status: StatusLine::new(BROWSE_STATUS),
      view: CommentView::default(),
      view_mode,
    }
  }

  /// Re-fetches the current view. Only the most recently issued request is
  /// applied when responses arrive out of order.
  fn refresh(&mut self) {
    let request_id = self.next_request_id;

    self.next_request_id = self.next_request_id.wrapping_add(1);

    self.pending_refresh = Some(request_id);

    self.pending_effects.push(Effect::FetchComments {
      request_id,
      view: self.view_mode,
    });
  }

  pub(crate) fn set_list_height(&mut self, height: usize) {
    self.list_height = height;
  }

  fn settle_status(&mut self) {
    let base = if self.help.is_visible() {
      HELP_STATUS
    } else if self.compose.is_some() {
      COMPOSE_STATUS
    } else if self.is_loading() {
      LOADING_COMMENTS_STATUS
    } else {
      BROWSE_STATUS
    };

    self.status.set(base);
  }

  fn show(&mut self, view_mode: ViewMode) {
    self.view_mode = view_mode;
    self.refresh();
  }

  pub(crate) fn status_text(&self) -> &str {
    self.status.text()
  }

  fn submit_compose(&mut self) {
    let Some(form) = self.compose.as_mut() else {
      return;
    };

    if form.is_submitting() {
      return;
    }

    match form.submission() {
      Ok(comment) => {
        form.set_submitting(true);

        debug!(
          parent = comment.parent_comment_id.as_deref().unwrap_or("-"),
          "posting comment"
        );

        self.pending_effects.push(Effect::PostComment { comment });
      }
      Err(notice) => self.alert = Some(Alert::new(notice)),
    }
  }

  pub(crate) fn tick(&mut self) {
    self.status.tick();
  }

  pub(crate) fn view(&self) -> &CommentView {
    &self.view
  }

  pub(crate) fn view_mode(&self) -> ViewMode {
    self.view_mode
  }

  pub(crate) fn view_mut(&mut self) -> &mut CommentView {
    &mut self.view
  }
}
