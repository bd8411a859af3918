use super::*;

/// A selectable line group of the comment list, bound to a comment id.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Row {
  Collapsed {
    depth: usize,
    hidden: usize,
    parent_id: String,
  },
  Comment {
    body: String,
    collapsed: bool,
    depth: usize,
    id: String,
    is_reply: bool,
    timestamp: String,
    user: String,
    votes: i64,
  },
}

impl Row {
  /// Flattens the UI-tree in display order. A collapsed container becomes a
  /// summary row one level deeper than its comment.
  pub(crate) fn bind(blocks: &[CommentBlock]) -> Vec<Row> {
    let mut rows = Vec::new();

    for block in blocks {
      Self::bind_block(block, &mut rows);
    }

    rows
  }

  fn bind_block(block: &CommentBlock, rows: &mut Vec<Row>) {
    rows.push(Row::Comment {
      body: block.content.clone(),
      collapsed: block.is_collapsed(),
      depth: block.depth,
      id: block.id.clone(),
      is_reply: block.is_reply,
      timestamp: block.timestamp.clone(),
      user: block.user.clone(),
      votes: block.votes,
    });

    match &block.replies {
      Replies::Collapsed { hidden } => rows.push(Row::Collapsed {
        depth: block.depth + 1,
        hidden: *hidden,
        parent_id: block.id.clone(),
      }),
      Replies::Expanded(children) => {
        for child in children {
          Self::bind_block(child, rows);
        }
      }
    }
  }

  pub(crate) fn comment_id(&self) -> Option<&str> {
    match self {
      Row::Collapsed { .. } => None,
      Row::Comment { id, .. } => Some(id.as_str()),
    }
  }

  pub(crate) fn depth(&self) -> usize {
    match self {
      Row::Collapsed { depth, .. } | Row::Comment { depth, .. } => *depth,
    }
  }

  /// The comment whose collapsed replies this row can expand.
  pub(crate) fn expand_target(&self) -> Option<&str> {
    match self {
      Row::Collapsed { parent_id, .. } => Some(parent_id.as_str()),
      Row::Comment {
        collapsed: true,
        id,
        ..
      } => Some(id.as_str()),
      Row::Comment { .. } => None,
    }
  }

  pub(crate) fn reply_target(&self) -> Option<ReplyTarget> {
    match self {
      Row::Collapsed { .. } => None,
      Row::Comment { id, user, .. } => Some(ReplyTarget {
        id: id.clone(),
        user: user.clone(),
      }),
    }
  }

  pub(crate) fn same_target(&self, other: &Row) -> bool {
    match (self, other) {
      (
        Row::Collapsed { parent_id: a, .. },
        Row::Collapsed { parent_id: b, .. },
      )
      | (Row::Comment { id: a, .. }, Row::Comment { id: b, .. }) => a == b,
      _ => false,
    }
  }
}
