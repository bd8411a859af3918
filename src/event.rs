use super::*;

pub(crate) enum Event {
  Comments {
    request_id: u64,
    result: Result<CommentsResponse, ApiError>,
    view: ViewMode,
  },
  Expansion {
    comment_id: String,
    result: Result<CommentsResponse, ApiError>,
  },
  Posted {
    result: Result<(), ApiError>,
  },
  Voted {
    result: Result<(), ApiError>,
    vote: Vote,
  },
}
