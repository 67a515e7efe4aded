use super::*;

pub(crate) fn centered_rect(area: Rect, width: usize, height: usize) -> Rect {
  fn saturating_usize_to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
  }

  let desired_width = saturating_usize_to_u16(width).max(1);
  let desired_height = saturating_usize_to_u16(height).max(1);

  let available_width = area.width.saturating_sub(2).max(1);
  let available_height = area.height.saturating_sub(2).max(1);

  let width = available_width.clamp(1, desired_width).min(area.width);
  let height = available_height.clamp(1, desired_height).min(area.height);

  let x = area.x + (area.width.saturating_sub(width)) / 2;
  let y = area.y + (area.height.saturating_sub(height)) / 2;

  Rect::new(x, y, width, height)
}

pub(crate) fn contains(area: Rect, column: u16, row: u16) -> bool {
  column >= area.x
    && column < area.x.saturating_add(area.width)
    && row >= area.y
    && row < area.y.saturating_add(area.height)
}

/// Credits arrive as numbers from the catalog and occasionally as strings
/// from generated recommendations. Anything that is not a positive finite
/// number is rejected.
pub(crate) fn deserialize_credits<'de, D>(
  deserializer: D,
) -> Result<f64, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Value::deserialize(deserializer)?;

  let credits = match &value {
    Value::Number(n) => n.as_f64().ok_or_else(|| {
      de::Error::invalid_value(Unexpected::Other("number"), &"finite credits")
    })?,
    Value::String(s) => s.trim().parse::<f64>().map_err(|_| {
      de::Error::invalid_value(Unexpected::Str(s), &"numeric credits")
    })?,
    Value::Null => {
      return Err(de::Error::invalid_type(Unexpected::Unit, &"credits"));
    }
    Value::Bool(b) => {
      return Err(de::Error::invalid_type(Unexpected::Bool(*b), &"credits"));
    }
    Value::Array(_) => {
      return Err(de::Error::invalid_type(Unexpected::Seq, &"credits"));
    }
    Value::Object(_) => {
      return Err(de::Error::invalid_type(Unexpected::Map, &"credits"));
    }
  };

  if credits.is_finite() && credits > 0.0 {
    Ok(credits)
  } else {
    Err(de::Error::invalid_value(
      Unexpected::Float(credits),
      &"positive credits",
    ))
  }
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
  let mut current = String::new();
  let mut current_width = 0;

  for word in text.split_whitespace() {
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

  if !current.is_empty() {
    lines.push(current);
  }

  if lines.is_empty() {
    vec![text.to_string()]
  } else {
    lines
  }
}
