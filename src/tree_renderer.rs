//! Turns backend comment trees into the UI-tree.
//!
//! A reply container collapses when its node has more immediate replies than
//! the threshold; only the immediate count matters, so every descendant of an
//! expanded node makes its own decision. Collapsed containers can later be
//! filled in from a freshly fetched tree with [`TreeRenderer::expand`].

use super::*;

pub(crate) const DEFAULT_COLLAPSE_THRESHOLD: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct TreeRenderer {
  threshold: usize,
}

impl TreeRenderer {
  /// Fills the collapsed container of `block` with the replies its node has
  /// in `fresh`, rendered one level deeper under the same policy.
  ///
  /// Returns `false` and leaves `block` untouched when it is not collapsed or
  /// when `fresh` no longer contains its node.
  pub(crate) fn expand(
    self,
    block: &mut CommentBlock,
    fresh: &[Comment],
  ) -> bool {
    if !block.is_collapsed() {
      return false;
    }

    let Some(node) = find_node_by_id(fresh, &block.id) else {
      return false;
    };

    block.replies =
      Replies::Expanded(self.render_level(&node.replies, block.depth + 1));

    true
  }

  pub(crate) fn new(threshold: usize) -> Self {
    Self { threshold }
  }

  /// One block per comment at depth zero. Nesting is ignored and nothing
  /// collapses.
  pub(crate) fn render_flat(comments: &[Comment]) -> Vec<CommentBlock> {
    comments
      .iter()
      .map(|comment| {
        CommentBlock::new(comment, 0, Replies::Expanded(Vec::new()))
      })
      .collect()
  }

  fn render_level(
    self,
    comments: &[Comment],
    depth: usize,
  ) -> Vec<CommentBlock> {
    comments
      .iter()
      .map(|comment| self.render_node(comment, depth))
      .collect()
  }

  fn render_node(self, comment: &Comment, depth: usize) -> CommentBlock {
    let replies = if comment.replies.len() > self.threshold {
      Replies::Collapsed {
        hidden: comment.replies.len(),
      }
    } else {
      Replies::Expanded(self.render_level(&comment.replies, depth + 1))
    };

    CommentBlock::new(comment, depth, replies)
  }

  /// Renders `roots` in order, each at depth zero.
  pub(crate) fn render_tree(self, roots: &[Comment]) -> Vec<CommentBlock> {
    self.render_level(roots, 0)
  }

  pub(crate) fn threshold(self) -> usize {
    self.threshold
  }
}

/// Depth-first search over `comments`, checking each node before its
/// replies.
pub(crate) fn find_node_by_id<'a>(
  comments: &'a [Comment],
  id: &str,
) -> Option<&'a Comment> {
  for comment in comments {
    if comment.id == id {
      return Some(comment);
    }

    if let Some(found) = find_node_by_id(&comment.replies, id) {
      return Some(found);
    }
  }

  None
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn renders_one_top_level_block_per_root_in_order() {
    for count in [0, 1, 5, 30] {
      let roots = (0..count)
        .map(|n| Comment::sample(&n.to_string(), Vec::new()))
        .collect::<Vec<_>>();

      let blocks = TreeRenderer::new(10).render_tree(&roots);

      assert_eq!(blocks.len(), count);

      assert!(
        blocks
          .iter()
          .zip(&roots)
          .all(|(block, root)| block.id == root.id && block.depth == 0)
      );
    }
  }

  #[test]
  fn reply_count_equal_to_threshold_stays_expanded() {
    let blocks =
      TreeRenderer::new(10).render_tree(&[Comment::with_stubs("1", 10)]);

    assert!(!blocks[0].is_collapsed());
    assert_eq!(blocks[0].reply_blocks().len(), 10);
  }

  #[test]
  fn reply_count_above_threshold_collapses() {
    let blocks =
      TreeRenderer::new(10).render_tree(&[Comment::with_stubs("1", 11)]);

    assert_eq!(blocks[0].replies, Replies::Collapsed { hidden: 11 });
    assert!(blocks[0].reply_blocks().is_empty());
  }

  #[test]
  fn zero_threshold_collapses_any_reply() {
    let renderer = TreeRenderer::new(0);

    let blocks = renderer.render_tree(&[
      Comment::with_stubs("1", 1),
      Comment::sample("2", Vec::new()),
    ]);

    assert_eq!(blocks[0].replies, Replies::Collapsed { hidden: 1 });
    assert!(!blocks[1].is_collapsed());
  }

  #[test]
  fn descendants_collapse_independently() {
    let roots = vec![Comment::sample(
      "1",
      vec![Comment::with_stubs("2", 3), Comment::with_stubs("3", 1)],
    )];

    let blocks = TreeRenderer::new(2).render_tree(&roots);

    let children = blocks[0].reply_blocks();

    assert_eq!(children.len(), 2);
    assert_eq!(children[0].depth, 1);
    assert_eq!(children[0].replies, Replies::Collapsed { hidden: 3 });
    assert_eq!(children[1].reply_blocks().len(), 1);
    assert_eq!(children[1].reply_blocks()[0].depth, 2);
  }

  #[test]
  fn depth_grows_without_a_cap() {
    let mut node = Comment::sample("leaf", Vec::new());

    for level in 0..50 {
      node = Comment::sample(&format!("n{level}"), vec![node]);
    }

    let blocks = TreeRenderer::new(10).render_tree(&[node]);

    let mut current = &blocks[0];
    let mut depth = 0;

    while let Some(child) = current.reply_blocks().first() {
      depth += 1;
      assert_eq!(child.depth, depth);
      current = child;
    }

    assert_eq!(depth, 50);
    assert_eq!(current.id, "leaf");
  }

  #[test]
  fn find_node_by_id_searches_depth_first() {
    let tree = vec![
      Comment::sample(
        "1",
        vec![Comment::sample(
          "1a",
          vec![Comment::sample("x", Vec::new())],
        )],
      ),
      Comment::sample("2", Vec::new()),
    ];

    assert_eq!(find_node_by_id(&tree, "x").map(|c| c.id.as_str()), Some("x"));
    assert_eq!(find_node_by_id(&tree, "2").map(|c| c.id.as_str()), Some("2"));
    assert!(find_node_by_id(&tree, "3").is_none());
    assert!(find_node_by_id(&[], "1").is_none());
  }

  #[test]
  fn expand_renders_fresh_replies_one_level_deeper() {
    let renderer = TreeRenderer::new(10);

    let mut blocks = renderer.render_tree(&[Comment::sample(
      "root",
      vec![Comment::with_stubs("1", 11)],
    )]);

    let collapsed = CommentBlock::find_mut(&mut blocks, "1").unwrap();
    assert!(collapsed.is_collapsed());

    let mut fresh_node = Comment::with_stubs("1", 12);
    fresh_node.replies[0] = Comment::with_stubs("1.0", 11);

    let fresh = vec![Comment::sample("root", vec![fresh_node])];

    assert!(renderer.expand(collapsed, &fresh));

    let children = collapsed.reply_blocks();

    assert_eq!(children.len(), 12);
    assert!(children.iter().all(|child| child.depth == 2));
    assert_eq!(children[0].replies, Replies::Collapsed { hidden: 11 });
  }

  #[test]
  fn expand_without_matching_node_changes_nothing() {
    let renderer = TreeRenderer::new(10);

    let mut blocks = renderer.render_tree(&[Comment::with_stubs("1", 11)]);
    let before = blocks.clone();

    let fresh = [Comment::sample("2", Vec::new())];

    assert!(!renderer.expand(&mut blocks[0], &fresh));
    assert_eq!(blocks, before);
  }

  #[test]
  fn expand_ignores_blocks_that_are_not_collapsed() {
    let renderer = TreeRenderer::new(10);

    let mut blocks = renderer.render_tree(&[Comment::with_stubs("1", 2)]);
    let before = blocks.clone();

    assert!(!renderer.expand(&mut blocks[0], &[Comment::with_stubs("1", 5)]));
    assert_eq!(blocks, before);
  }

  #[test]
  fn render_is_repeatable() {
    let roots = vec![Comment::with_stubs("1", 11), Comment::with_stubs("2", 3)];
    let renderer = TreeRenderer::new(10);

    assert_eq!(renderer.render_tree(&roots), renderer.render_tree(&roots));
    assert_eq!(renderer.threshold(), 10);
  }
}
