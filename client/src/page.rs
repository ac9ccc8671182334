// kastelen_client/src/page.rs

/// The castle a booking form belongs to, read off the page that hosts it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
  pub castle_name: String,
  pub castle_slug: String,
}

impl PageContext {
  /// `heading` is the text of the page's detail title or first `h1`, if any.
  /// Without one the name falls back to the document title up to its first `|`.
  /// The slug is the last segment of `path` without its `.html` suffix.
  pub fn from_page(heading: Option<&str>, document_title: &str, path: &str) -> Self {
    let castle_name = match heading {
      Some(text) => text.trim().to_string(),
      None => document_title.split('|').next().unwrap_or_default().trim().to_string(),
    };
    let file_name = path.rsplit('/').next().unwrap_or_default();
    Self {
      castle_name,
      castle_slug: file_name.replacen(".html", "", 1),
    }
  }
}
