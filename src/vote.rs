use super::*;

/// Body of `POST /api/vote`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct Vote {
  pub(crate) comment_id: String,
  pub(crate) delta: i32,
}

impl Vote {
  pub(crate) fn down(comment_id: String) -> Self {
    Self {
      comment_id,
      delta: -1,
    }
  }

  pub(crate) fn up(comment_id: String) -> Self {
    Self {
      comment_id,
      delta: 1,
    }
  }
}
