/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max_len: usize) -> String {
  if s.chars().count() <= max_len {
    s.to_string()
  } else {
    let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", kept)
  }
}

/// Reduce rendered WordPress HTML to plain text.
///
/// Block-level closing tags and `<br>` become line breaks, every other tag is
/// dropped, and HTML entities are decoded.
pub fn plain_text(html: &str) -> String {
  let mut text = String::with_capacity(html.len());
  let mut rest = html;

  while let Some(start) = rest.find('<') {
    text.push_str(&rest[..start]);
    match rest[start..].find('>') {
      Some(end) => {
        let tag = rest[start + 1..start + end].trim().to_ascii_lowercase();
        if is_line_break(&tag) {
          text.push('\n');
        }
        rest = &rest[start + end + 1..];
      }
      None => {
        rest = "";
      }
    }
  }
  text.push_str(rest);

  let decoded = html_escape::decode_html_entities(&text);
  collapse_blank_lines(&decoded)
}

fn is_line_break(tag: &str) -> bool {
  let name = tag
    .trim_end_matches('/')
    .split_whitespace()
    .next()
    .unwrap_or("");
  matches!(
    name,
    "br" | "/p" | "/div" | "/li" | "/h1" | "/h2" | "/h3" | "/h4" | "/h5" | "/h6" | "/blockquote"
  )
}

fn collapse_blank_lines(text: &str) -> String {
  let mut lines: Vec<&str> = Vec::new();
  for line in text.lines().map(str::trim) {
    if line.is_empty() && lines.last().map_or(true, |l| l.is_empty()) {
      continue;
    }
    lines.push(line);
  }
  while lines.last().is_some_and(|l| l.is_empty()) {
    lines.pop();
  }
  lines.join("\n")
}
