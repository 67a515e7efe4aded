#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Semester {
  pub(crate) index: usize,
  pub(crate) name: &'static str,
}

impl Semester {
  pub(crate) const COUNT: usize = Self::NAMES.len();

  const NAMES: [&str; 8] = [
    "Freshman Fall",
    "Freshman Spring",
    "Sophomore Fall",
    "Sophomore Spring",
    "Junior Fall",
    "Junior Spring",
    "Senior Fall",
    "Senior Spring",
  ];

  /// Resolves a semester index, falling back to the first semester when the
  /// index is missing or out of range.
  pub(crate) fn from_index(index: Option<usize>) -> Self {
    let index = index.filter(|&index| index < Self::NAMES.len()).unwrap_or(0);

    Self {
      index,
      name: Self::NAMES[index],
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn valid_index_selects_semester() {
    let semester = Semester::from_index(Some(3));

    assert_eq!(semester.index, 3);
    assert_eq!(semester.name, "Sophomore Spring");
    assert_eq!(Semester::from_index(Some(7)).name, "Senior Spring");
  }

  #[test]
  fn missing_or_out_of_range_index_falls_back_to_first() {
    assert_eq!(Semester::from_index(None).name, "Freshman Fall");
    assert_eq!(Semester::from_index(Some(8)).name, "Freshman Fall");
    assert_eq!(Semester::from_index(Some(usize::MAX)).index, 0);
  }
}
