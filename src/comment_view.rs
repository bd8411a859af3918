use super::*;

pub(crate) struct CommentView {
  blocks: Vec<CommentBlock>,
  mode: ViewMode,
  renderer: TreeRenderer,
  rows: ListView<Row>,
}

impl Default for CommentView {
  fn default() -> Self {
    Self {
      blocks: Vec::new(),
      mode: ViewMode::Tree,
      renderer: TreeRenderer::new(DEFAULT_COLLAPSE_THRESHOLD),
      rows: ListView::default(),
    }
  }
}

impl CommentView {
  #[cfg(test)]
  pub(crate) fn blocks(&self) -> &[CommentBlock] {
    &self.blocks
  }

  /// Expands the collapsed comment `id` from a freshly fetched tree. Only a
  /// tree render has collapsed containers; anything else is a no-op.
  pub(crate) fn expand(&mut self, id: &str, fresh: &[Comment]) -> bool {
    if self.mode != ViewMode::Tree {
      return false;
    }

    let Some(block) = CommentBlock::find_mut(&mut self.blocks, id) else {
      return false;
    };

    if !self.renderer.expand(block, fresh) {
      return false;
    }

    self.rebind();

    true
  }

  pub(crate) fn expand_target(&self) -> Option<&str> {
    self.rows.selected_item().and_then(Row::expand_target)
  }

  pub(crate) fn handle_key(&mut self, key: KeyEvent, page: usize) -> Action {
    let modifiers = key.modifiers;

    match key.code {
      KeyCode::Char('q' | 'Q') | KeyCode::Esc => Action::Quit,
      KeyCode::Char('?') => Action::ShowHelp,
      KeyCode::Char('t') | KeyCode::Left | KeyCode::Char('h') => {
        Action::ShowTree
      }
      KeyCode::Char('f') | KeyCode::Right | KeyCode::Char('l') => {
        Action::ShowFlat
      }
      KeyCode::Char('R') | KeyCode::F(5) => Action::Refresh,
      KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
        Action::Quit
      }
      KeyCode::Char('c') => Action::StartComment,
      KeyCode::Char('r') => Action::StartReply,
      KeyCode::Char('+' | '=') => Action::Upvote,
      KeyCode::Char('-') => Action::Downvote,
      KeyCode::Enter | KeyCode::Char(' ') => Action::Expand,
      KeyCode::Down | KeyCode::Char('j') => {
        self.rows.move_by(1);
        Action::None
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.rows.move_by(-1);
        Action::None
      }
      KeyCode::PageDown => {
        self.rows.page_down(page);
        Action::None
      }
      KeyCode::PageUp => {
        self.rows.page_up(page);
        Action::None
      }
      KeyCode::Char('d') if modifiers.contains(KeyModifiers::CONTROL) => {
        self.rows.page_down(page);
        Action::None
      }
      KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => {
        self.rows.page_up(page);
        Action::None
      }
      KeyCode::Home => {
        self.rows.set_selected(0);
        Action::None
      }
      KeyCode::End => {
        self.rows.select_last();
        Action::None
      }
      _ => Action::None,
    }
  }

  pub(crate) fn is_empty(&self) -> bool {
    self.rows.is_empty()
  }

  pub(crate) fn mode(&self) -> ViewMode {
    self.mode
  }

  pub(crate) fn new(mode: ViewMode, response: &CommentsResponse) -> Self {
    let blocks = response.render(mode);

    Self {
      rows: ListView::new(Row::bind(&blocks)),
      blocks,
      mode,
      renderer: TreeRenderer::new(response.threshold()),
    }
  }

  pub(crate) fn offset(&self) -> usize {
    self.rows.offset()
  }

  fn rebind(&mut self) {
    let previous = self.rows.selected_item().cloned();

    self.rows.replace(Row::bind(&self.blocks));

    if let Some(previous) = previous {
      self.restore_selection(&previous);
    }
  }

  /// Moves the selection back onto `previous` after a rebuild. A summary row
  /// that no longer exists hands the selection to the first reply it
  /// revealed.
  pub(crate) fn restore_selection(&mut self, previous: &Row) {
    if let Some(index) = self.rows.position(|row| row.same_target(previous)) {
      self.rows.set_selected(index);
      return;
    }

    if let Row::Collapsed { parent_id, .. } = previous
      && let Some(index) = self
        .rows
        .position(|row| row.comment_id() == Some(parent_id.as_str()))
    {
      self.rows.set_selected(index + 1);
    }
  }

  pub(crate) fn rows(&self) -> &[Row] {
    self.rows.items()
  }

  pub(crate) fn selected_comment_id(&self) -> Option<&str> {
    self.rows.selected_item().and_then(Row::comment_id)
  }

  pub(crate) fn selected_index(&self) -> Option<usize> {
    self.rows.selected_index()
  }

  pub(crate) fn selected_row(&self) -> Option<&Row> {
    self.rows.selected_item()
  }

  pub(crate) fn set_offset(&mut self, offset: usize) {
    self.rows.set_offset(offset);
  }

  pub(crate) fn threshold(&self) -> usize {
    self.renderer.threshold()
  }
}
