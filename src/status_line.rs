use super::*;

/// The bottom status line: a base message, temporarily replaced by a
/// flashed notice.
pub(crate) struct StatusLine {
  base: String,
  flash: Option<(String, Instant)>,
}

impl StatusLine {
  const FLASH_DURATION: Duration = Duration::from_secs(3);

  pub(crate) fn flash(&mut self, message: impl Into<String>) {
    self.flash = Some((message.into(), Instant::now() + Self::FLASH_DURATION));
  }

  pub(crate) fn new(base: impl Into<String>) -> Self {
    Self {
      base: base.into(),
      flash: None,
    }
  }

  pub(crate) fn set(&mut self, base: impl Into<String>) {
    self.base = base.into();
  }

  pub(crate) fn text(&self) -> &str {
    self
      .flash
      .as_ref()
      .map_or(self.base.as_str(), |(message, _)| message.as_str())
  }

  pub(crate) fn tick(&mut self) {
    self.tick_at(Instant::now());
  }

  fn tick_at(&mut self, now: Instant) {
    if self
      .flash
      .as_ref()
      .is_some_and(|(_, expires_at)| now >= *expires_at)
    {
      self.flash = None;
    }
  }
}
