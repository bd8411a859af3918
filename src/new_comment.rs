use super::*;

/// Body of `POST /api/comments`. Without a parent the comment is a root.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct NewComment {
  pub(crate) content: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub(crate) parent_comment_id: Option<String>,
  pub(crate) user: String,
}
