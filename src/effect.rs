use super::*;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Effect {
  CastVote {
    vote: Vote,
  },
  FetchComments {
    request_id: u64,
    view: ViewMode,
  },
  /// Re-fetches the whole tree to fill in one collapsed thread.
  FetchExpansion {
    comment_id: String,
  },
  PostComment {
    comment: NewComment,
  },
}
