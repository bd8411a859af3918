use super::*;

pub(crate) fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
  let available_width = area.width.saturating_sub(2).max(1);
  let available_height = area.height.saturating_sub(2).max(1);

  let width = available_width.clamp(1, width.max(1)).min(area.width);
  let height = available_height.clamp(1, height.max(1)).min(area.height);

  let x = area.x + (area.width.saturating_sub(width)) / 2;
  let y = area.y + (area.height.saturating_sub(height)) / 2;

  Rect::new(x, y, width, height)
}

pub(crate) fn deserialize_id<'de, D>(
  deserializer: D,
) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  deserialize_optional_id(deserializer)?.ok_or_else(|| {
    de::Error::invalid_type(Unexpected::Unit, &"string or number")
  })
}

pub(crate) fn deserialize_null_default<'de, D, T>(
  deserializer: D,
) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts an identifier serialized either as a string or as a number.
pub(crate) fn deserialize_optional_id<'de, D>(
  deserializer: D,
) -> Result<Option<String>, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Option::<Value>::deserialize(deserializer)?;

  match value {
    None | Some(Value::Null) => Ok(None),
    Some(Value::String(s)) => Ok(Some(s)),
    Some(Value::Number(n)) => Ok(Some(n.to_string())),
    Some(Value::Bool(b)) => Err(de::Error::invalid_type(
      Unexpected::Bool(b),
      &"string or number",
    )),
    Some(Value::Array(_)) => Err(de::Error::invalid_type(
      Unexpected::Seq,
      &"string or number",
    )),
    Some(Value::Object(_)) => Err(de::Error::invalid_type(
      Unexpected::Map,
      &"string or number",
    )),
  }
}

pub(crate) fn format_replies(count: usize) -> String {
  match count {
    1 => "1 reply".to_string(),
    _ => format!("{count} replies"),
  }
}

pub(crate) fn format_timestamp(raw: &str) -> String {
  format_timestamp_in(raw, &Local)
}

/// Renders `raw` in `zone`, or returns it untouched when it is not a
/// recognizable timestamp. Stamps without an offset are read as UTC.
pub(crate) fn format_timestamp_in<Tz>(raw: &str, zone: &Tz) -> String
where
  Tz: TimeZone,
  Tz::Offset: Display,
{
  const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

  let trimmed = raw.trim();

  if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
    return parsed.with_timezone(zone).format(FORMAT).to_string();
  }

  match NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
    Ok(naive) => naive.and_utc().with_timezone(zone).format(FORMAT).to_string(),
    Err(_) => raw.to_string(),
  }
}

pub(crate) fn format_votes(votes: i64) -> String {
  match votes {
    1 | -1 => format!("{votes} vote"),
    _ => format!("{votes} votes"),
  }
}

pub(crate) fn text_popup_area(area: Rect, text: &str) -> Rect {
  fn saturating_usize_to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
  }

  let (line_count, max_line_width) =
    text
      .lines()
      .fold((0usize, 0usize), |(count, width), line| {
        let updated_count = count.saturating_add(1);
        let line_width = line.chars().count();

        (updated_count, width.max(line_width))
      });

  centered_rect(
    area,
    saturating_usize_to_u16(max_line_width.saturating_add(2)),
    saturating_usize_to_u16(line_count.saturating_add(2)),
  )
}

pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
  if text.chars().count() <= max_chars {
    return text.to_string();
  }

  let mut result = String::new();

  for (idx, ch) in text.chars().enumerate() {
    if idx >= max_chars {
      result.push_str("...");
      break;
    }

    result.push(ch);
  }

  result.trim_end().to_string()
}

pub(crate) fn wrap_text(text: &str, width: usize) -> Vec<String> {
  if text.is_empty() {
    return Vec::new();
  }

  let mut lines = Vec::new();

  for paragraph in text.lines() {
    let mut current = String::new();
    let mut current_width = 0;

    for word in paragraph.split_whitespace() {
      let word_width = word.chars().count();

      if current.is_empty() {
        current.push_str(word);
        current_width = word_width;
      } else if current_width + 1 + word_width <= width {
        current.push(' ');
        current.push_str(word);
        current_width += 1 + word_width;
      } else {
        lines.push(current);
        current = word.to_string();
        current_width = word_width;
      }
    }

    lines.push(current);
  }

  while lines.last().is_some_and(String::is_empty) {
    lines.pop();
  }

  if lines.is_empty() {
    vec![text.to_string()]
  } else {
    lines
  }
}
