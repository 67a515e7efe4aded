#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct InputField {
  buffer: String,
}

impl InputField {
  pub(crate) fn clear(&mut self) {
    self.buffer.clear();
  }

  pub(crate) fn is_blank(&self) -> bool {
    self.trimmed().is_empty()
  }

  pub(crate) fn pop(&mut self) -> bool {
    self.buffer.pop().is_some()
  }

  pub(crate) fn push(&mut self, ch: char) {
    self.buffer.push(ch);
  }

  pub(crate) fn set(&mut self, text: impl Into<String>) {
    self.buffer = text.into();
  }

  pub(crate) fn text(&self) -> &str {
    &self.buffer
  }

  pub(crate) fn trimmed(&self) -> &str {
    self.buffer.trim()
  }
}
