use super::*;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CommentsResponse {
  #[serde(default)]
  pub(crate) auto_collapse_threshold: Option<usize>,
  #[serde(default, deserialize_with = "deserialize_null_default")]
  pub(crate) comments: Vec<Comment>,
}

impl CommentsResponse {
  /// Decodes a response body of any nesting depth. The recursion limit is
  /// lifted and the stack grows on demand while nested replies are read.
  pub(crate) fn decode(body: &[u8]) -> Result<Self, serde_json::Error> {
    let mut deserializer = serde_json::Deserializer::from_slice(body);

    deserializer.disable_recursion_limit();

    let response =
      Self::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;

    deserializer.end()?;

    Ok(response)
  }

  pub(crate) fn render(&self, view: ViewMode) -> Vec<CommentBlock> {
    match view {
      ViewMode::Flat => TreeRenderer::render_flat(&self.comments),
      ViewMode::Tree => {
        TreeRenderer::new(self.threshold()).render_tree(&self.comments)
      }
    }
  }

  pub(crate) fn threshold(&self) -> usize {
    self
      .auto_collapse_threshold
      .unwrap_or(DEFAULT_COLLAPSE_THRESHOLD)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn nested_payload(depth: usize) -> String {
    let mut node = r#"{"id": "leaf"}"#.to_string();

    for level in (0..depth).rev() {
      node = format!(r#"{{"id": "{level}", "replies": [{node}]}}"#);
    }

    format!(r#"{{"comments": [{node}], "auto_collapse_threshold": 10}}"#)
  }

  #[test]
  fn deeply_nested_tree_decodes() {
    let response = CommentsResponse::decode(nested_payload(500).as_bytes())
      .expect("deep tree decodes");

    let mut node = &response.comments[0];
    let mut depth = 0;

    while let Some(reply) = node.replies.first() {
      node = reply;
      depth += 1;
    }

    assert_eq!(response.comments[0].id, "0");
    assert_eq!(depth, 500);
    assert_eq!(node.id, "leaf");
  }

  #[test]
  fn decode_rejects_trailing_data() {
    assert!(CommentsResponse::decode(br#"{"comments": []} []"#).is_err());
  }

  #[test]
  fn decode_drops_flat_reply_ids() {
    let response = CommentsResponse::decode(
      br#"{"comments": [{"id": "1", "replies": ["2"]}, {"id": "2"}]}"#,
    )
    .expect("flat payload decodes");

    assert_eq!(response.comments.len(), 2);
    assert!(response.comments[0].replies.is_empty());
  }

  #[test]
  fn threshold_defaults_to_ten_when_absent() {
    let response =
      serde_json::from_str::<CommentsResponse>(r#"{"comments": []}"#).unwrap();

    assert_eq!(response.threshold(), 10);
  }

  #[test]
  fn threshold_uses_backend_value_including_zero() {
    let response = serde_json::from_str::<CommentsResponse>(
      r#"{"comments": [], "auto_collapse_threshold": 0}"#,
    )
    .unwrap();

    assert_eq!(response.threshold(), 0);
  }

  #[test]
  fn missing_comments_are_treated_as_empty() {
    let response = serde_json::from_str::<CommentsResponse>("{}").unwrap();
    assert!(response.comments.is_empty());
    assert!(response.render(ViewMode::Tree).is_empty());
  }

  #[test]
  fn flat_render_ignores_nesting() {
    let response = CommentsResponse {
      auto_collapse_threshold: Some(0),
      comments: vec![
        Comment::with_stubs("1", 3),
        Comment::sample("2", Vec::new()),
      ],
    };

    let blocks = response.render(ViewMode::Flat);

    assert_eq!(blocks.len(), 2);
    assert!(blocks.iter().all(|block| !block.is_collapsed()));
    assert!(blocks.iter().all(|block| block.depth == 0));
  }
}
