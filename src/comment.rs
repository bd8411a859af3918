use super::*;

/// One comment as the backend serves it. In tree view `replies` holds the
/// nested children in backend order. The flat view lists child ids there
/// instead, which are dropped.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub(crate) struct Comment {
  #[serde(default, deserialize_with = "deserialize_null_default")]
  pub(crate) content: String,
  #[serde(deserialize_with = "deserialize_id")]
  pub(crate) id: String,
  #[serde(default, deserialize_with = "deserialize_optional_id")]
  pub(crate) parent_comment_id: Option<String>,
  #[serde(default, deserialize_with = "deserialize_replies")]
  pub(crate) replies: Vec<Comment>,
  #[serde(default, deserialize_with = "deserialize_null_default")]
  pub(crate) timestamp: String,
  #[serde(default, deserialize_with = "deserialize_null_default")]
  pub(crate) user: String,
  #[serde(default)]
  pub(crate) votes: i64,
}

#[cfg(test)]
impl Comment {
  pub(crate) fn sample(id: &str, replies: Vec<Comment>) -> Self {
    Self {
      content: format!("comment {id}"),
      id: id.to_string(),
      parent_comment_id: None,
      replies,
      timestamp: "2024-01-01T12:00:00Z".to_string(),
      user: format!("user{id}"),
      votes: 0,
    }
  }

  pub(crate) fn with_stubs(id: &str, count: usize) -> Self {
    let replies = (0..count)
      .map(|n| Comment::sample(&format!("{id}.{n}"), Vec::new()))
      .collect();

    Self::sample(id, replies)
  }
}

/// One `replies` entry. Tree view nests a full comment here while flat view
/// sends a bare id, which carries nothing to render.
struct Reply(Option<Comment>);

impl<'de> Deserialize<'de> for Reply {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    deserializer.deserialize_any(ReplyVisitor)
  }
}

struct ReplyVisitor;

impl<'de> de::Visitor<'de> for ReplyVisitor {
  type Value = Reply;

  fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
    formatter.write_str("a comment or a comment id")
  }

  fn visit_i64<E>(self, _: i64) -> Result<Reply, E>
  where
    E: de::Error,
  {
    Ok(Reply(None))
  }

  fn visit_map<A>(self, map: A) -> Result<Reply, A::Error>
  where
    A: de::MapAccess<'de>,
  {
    Comment::deserialize(de::value::MapAccessDeserializer::new(map))
      .map(|comment| Reply(Some(comment)))
  }

  fn visit_str<E>(self, _: &str) -> Result<Reply, E>
  where
    E: de::Error,
  {
    Ok(Reply(None))
  }

  fn visit_u64<E>(self, _: u64) -> Result<Reply, E>
  where
    E: de::Error,
  {
    Ok(Reply(None))
  }

  fn visit_unit<E>(self) -> Result<Reply, E>
  where
    E: de::Error,
  {
    Ok(Reply(None))
  }
}

fn deserialize_replies<'de, D>(
  deserializer: D,
) -> Result<Vec<Comment>, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(
    Option::<Vec<Reply>>::deserialize(deserializer)?
      .unwrap_or_default()
      .into_iter()
      .filter_map(|reply| reply.0)
      .collect(),
  )
}
