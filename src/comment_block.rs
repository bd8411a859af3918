use super::*;

/// A node of the rendered UI-tree.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct CommentBlock {
  pub(crate) content: String,
  pub(crate) depth: usize,
  pub(crate) id: String,
  pub(crate) is_reply: bool,
  pub(crate) replies: Replies,
  pub(crate) timestamp: String,
  pub(crate) user: String,
  pub(crate) votes: i64,
}

/// The reply container of a block.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Replies {
  /// Replies hidden behind a summary, waiting to be expanded.
  Collapsed { hidden: usize },
  Expanded(Vec<CommentBlock>),
}

impl CommentBlock {
  pub(crate) fn find_mut<'a>(
    blocks: &'a mut [CommentBlock],
    id: &str,
  ) -> Option<&'a mut CommentBlock> {
    for block in blocks {
      if block.id == id {
        return Some(block);
      }

      if let Replies::Expanded(children) = &mut block.replies
        && let Some(found) = Self::find_mut(children, id)
      {
        return Some(found);
      }
    }

    None
  }

  pub(crate) fn is_collapsed(&self) -> bool {
    matches!(self.replies, Replies::Collapsed { .. })
  }

  pub(crate) fn new(comment: &Comment, depth: usize, replies: Replies) -> Self {
    Self {
      content: comment.content.clone(),
      depth,
      id: comment.id.clone(),
      is_reply: comment.parent_comment_id.is_some(),
      replies,
      timestamp: format_timestamp(&comment.timestamp),
      user: comment.user.clone(),
      votes: comment.votes,
    }
  }

  #[cfg(test)]
  pub(crate) fn reply_blocks(&self) -> &[CommentBlock] {
    match &self.replies {
      Replies::Collapsed { .. } => &[],
      Replies::Expanded(children) => children,
    }
  }
}
