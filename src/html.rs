//! HTML rendering of the UI-tree, as served to a browser page.
//!
//! Every backend-supplied string goes through `html_escape`, so comment text
//! can never introduce markup.

use super::*;

const EMPTY: &str = "<p>No comments yet.</p>";

const INDENT_PX: usize = 12;

fn attribute(value: &str) -> Cow<'_, str> {
  html_escape::encode_double_quoted_attribute(value)
}

pub(crate) fn render(blocks: &[CommentBlock]) -> String {
  if blocks.is_empty() {
    return EMPTY.to_string();
  }

  let mut html = String::new();

  for block in blocks {
    render_block(&mut html, block);
  }

  html
}

fn render_block(html: &mut String, block: &CommentBlock) {
  let id = attribute(&block.id);

  html.push_str(&format!(
    "<div class=\"comment\" style=\"margin-left: {}px\" data-id=\"{id}\">",
    block.depth.saturating_mul(INDENT_PX)
  ));

  html.push_str(&format!(
    "<div class=\"header\"><strong>{}</strong> <span class=\"meta\">{}</span> \
     <span class=\"vote-badge\" id=\"vote-{id}\">{}</span></div>",
    text(&block.user),
    text(&block.timestamp),
    block.votes
  ));

  html.push_str(&format!(
    "<div class=\"content\">{}</div>",
    text(&block.content)
  ));

  html.push_str(&format!("<div class=\"replies\" id=\"replies-{id}\">"));

  match &block.replies {
    Replies::Collapsed { hidden } => html.push_str(&format!(
      "<small class=\"collapsed\">Thread collapsed ({}). \
       <a href=\"#\" data-expand=\"{id}\">Expand</a></small>",
      format_replies(*hidden)
    )),
    Replies::Expanded(children) => {
      for child in children {
        render_block(html, child);
      }
    }
  }

  html.push_str("</div></div>");
}

fn text(value: &str) -> Cow<'_, str> {
  html_escape::encode_safe(value)
}
