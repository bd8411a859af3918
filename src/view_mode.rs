use super::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum ViewMode {
  Flat,
  #[default]
  Tree,
}

impl ViewMode {
  pub(crate) const ALL: [ViewMode; 2] = [ViewMode::Tree, ViewMode::Flat];

  pub(crate) fn index(self) -> usize {
    Self::ALL
      .iter()
      .position(|mode| *mode == self)
      .unwrap_or_default()
  }

  pub(crate) fn label(self) -> &'static str {
    match self {
      ViewMode::Flat => "flat",
      ViewMode::Tree => "tree",
    }
  }
}

impl Display for ViewMode {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    f.write_str(self.label())
  }
}

impl FromStr for ViewMode {
  type Err = anyhow::Error;

  fn from_str(s: &str) -> Result<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "flat" => Ok(ViewMode::Flat),
      "tree" => Ok(ViewMode::Tree),
      other => bail!("unknown view `{other}`, expected `tree` or `flat`"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_labels_case_insensitively() {
    assert_eq!("tree".parse::<ViewMode>().unwrap(), ViewMode::Tree);
    assert_eq!(" FLAT ".parse::<ViewMode>().unwrap(), ViewMode::Flat);
    assert!("nested".parse::<ViewMode>().is_err());
  }

  #[test]
  fn index_follows_tab_order() {
    assert_eq!(ViewMode::Tree.index(), 0);
    assert_eq!(ViewMode::Flat.index(), 1);
    assert_eq!(ViewMode::Flat.to_string(), "flat");
  }
}
