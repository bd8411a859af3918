#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Action {
  CancelCompose,
  DismissAlert,
  Downvote,
  Expand,
  HideHelp,
  None,
  Quit,
  Refresh,
  ShowFlat,
  ShowHelp,
  ShowTree,
  StartComment,
  StartReply,
  SubmitCompose,
  Upvote,
}
