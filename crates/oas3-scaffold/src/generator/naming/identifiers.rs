use std::{collections::HashSet, sync::LazyLock};

use any_ascii::any_ascii;
use regex::Regex;

pub(crate) static FORBIDDEN_IDENTIFIERS: LazyLock<HashSet<&str>> = LazyLock::new(|| {
  [
    "as", "break", "const", "continue", "crate", "else", "enum", "extern", "false", "fn", "for", "if", "impl", "in",
    "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while", "async", "await", "dyn", "try", "abstract", "become", "box", "do",
    "final", "macro", "override", "priv", "typeof", "unsized", "virtual", "yield", "gen", "self", "Self",
  ]
  .into_iter()
  .collect()
});

static INVALID_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").unwrap());
static MULTI_UNDERSCORE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_+").unwrap());

/// Transliterates to ASCII, replaces invalid characters with underscores, collapses
/// consecutive underscores and trims leading or trailing ones.
pub(crate) fn sanitize(input: &str) -> String {
  if input.is_empty() {
    return String::new();
  }

  let ascii = any_ascii(input);
  let replaced = INVALID_CHARS_RE.replace_all(&ascii, "_");
  let collapsed = MULTI_UNDERSCORE_RE.replace_all(&replaced, "_");

  collapsed.trim_matches('_').to_string()
}

/// Splits an identifier into words at separators and case boundaries.
///
/// Runs of capitals stay together as one word (`"XMLHttpRequest"` -> `["XML", "Http", "Request"]`)
/// and digits stick to the word before them. An input without lowercase letters is lowercased
/// first so that `"ITEM_LIST"` yields `["item", "list"]`.
pub(crate) fn split_words(name: &str) -> Vec<String> {
  let sanitized = sanitize(name);
  let normalized = if sanitized.chars().any(|c| c.is_ascii_lowercase()) {
    sanitized
  } else {
    sanitized.to_ascii_lowercase()
  };

  normalized
    .split('_')
    .filter(|segment| !segment.is_empty())
    .flat_map(split_case_boundaries)
    .collect()
}

fn split_case_boundaries(segment: &str) -> Vec<String> {
  let chars: Vec<char> = segment.chars().collect();
  let mut words = vec![];
  let mut current = String::new();

  for (i, &ch) in chars.iter().enumerate() {
    if ch.is_ascii_uppercase() && !current.is_empty() {
      let prev = chars[i - 1];
      let next_is_lower = chars.get(i + 1).is_some_and(char::is_ascii_lowercase);
      if prev.is_ascii_lowercase() || prev.is_ascii_digit() || (prev.is_ascii_uppercase() && next_is_lower) {
        words.push(std::mem::take(&mut current));
      }
    }
    current.push(ch);
  }

  if !current.is_empty() {
    words.push(current);
  }
  words
}

fn capitalize(word: &str) -> String {
  let mut chars = word.chars();
  match chars.next() {
    None => String::new(),
    Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
  }
}

/// `PascalCase`: every word capitalized, the rest of each word kept as written.
pub fn to_pascal(name: &str) -> String {
  split_words(name).iter().map(|word| capitalize(word)).collect()
}

/// `camelCase`: the first word lowercased, the following words capitalized.
pub fn to_camel(name: &str) -> String {
  let words = split_words(name);
  let Some((first, rest)) = words.split_first() else {
    return String::new();
  };
  let mut ident = first.to_ascii_lowercase();
  ident.extend(rest.iter().map(|word| capitalize(word)));
  ident
}

/// `snake_case`: every word lowercased and joined with underscores.
pub fn to_snake(name: &str) -> String {
  split_words(name)
    .iter()
    .map(|word| word.to_ascii_lowercase())
    .collect::<Vec<_>>()
    .join("_")
}

/// Converts a wire name into a valid Rust field or module name.
///
/// A leading `-` becomes a `negative_` prefix. Keywords that cannot be raw identifiers (`self`, `super`,
/// `crate`) get a `_` suffix and other keywords a raw identifier prefix. A leading digit gets `_`, and an
/// empty result becomes `_`.
pub(crate) fn to_field_name(name: &str) -> String {
  let (has_leading_minus, name) = match name.strip_prefix('-') {
    Some(stripped) => (true, stripped),
    None => (false, name),
  };

  let mut ident = to_snake(name);
  if ident.is_empty() {
    return "_".to_string();
  }

  if has_leading_minus {
    ident = format!("negative_{ident}");
  }

  if matches!(ident.as_str(), "self" | "super" | "crate") {
    return format!("{ident}_");
  }

  if FORBIDDEN_IDENTIFIERS.contains(ident.as_str()) {
    return format!("r#{ident}");
  }

  if ident.starts_with(|c: char| c.is_ascii_digit()) {
    ident.insert(0, '_');
  }

  ident
}

/// Converts a schema, operation or tag name into a valid Rust type name.
pub(crate) fn to_type_name(name: &str) -> String {
  let mut ident = to_pascal(name);
  if ident.is_empty() {
    return "Unnamed".to_string();
  }
  if ident.starts_with(|c: char| c.is_ascii_digit()) {
    ident.insert(0, 'T');
  }
  ident
}

/// `base`, with trailing underscores appended until `taken` no longer claims it.
pub(crate) fn unique_field_name(base: &str, taken: impl Fn(&str) -> bool) -> String {
  let mut name = base.to_string();
  while taken(&name) {
    name.push('_');
  }
  name
}

/// Module and file name for a namespace segment or artifact name, without raw prefixes.
pub(crate) fn to_module_name(name: &str) -> String {
  let ident = to_field_name(name);
  match ident.strip_prefix("r#") {
    Some(keyword) => format!("{keyword}_"),
    None => ident,
  }
}
