//! `:` commands and their autocomplete.

use crate::routes::Route;

#[derive(Debug, Clone)]
pub struct Command {
  pub name: &'static str,
  pub aliases: &'static [&'static str],
  pub description: &'static str,
}

pub const COMMANDS: &[Command] = &[
  Command {
    name: "home",
    aliases: &["h", "index"],
    description: "Front page",
  },
  Command {
    name: "portfolio",
    aliases: &["p", "work"],
    description: "Portfolio listing",
  },
  Command {
    name: "about",
    aliases: &["a"],
    description: "About page",
  },
  Command {
    name: "quit",
    aliases: &["q", "exit"],
    description: "Exit wpfolio",
  },
];

/// What a submitted command line asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandTarget {
  Navigate(Route),
  Quit,
  Unknown(String),
}

/// Rank of `cmd` against lowercase `input`; lower is better, `None` is no match
fn rank(cmd: &Command, input: &str) -> Option<u8> {
  if cmd.name == input {
    Some(0)
  } else if cmd.aliases.contains(&input) {
    Some(1)
  } else if cmd.name.starts_with(input) {
    Some(2)
  } else if cmd.aliases.iter().any(|a| a.starts_with(input)) {
    Some(3)
  } else if cmd.name.contains(input) {
    Some(4)
  } else if cmd.aliases.iter().any(|a| a.contains(input)) {
    Some(5)
  } else {
    None
  }
}

/// Autocomplete suggestions for `input`, best match first.
///
/// Paths (input starting with `/`) never produce suggestions.
pub fn get_suggestions(input: &str) -> Vec<&'static Command> {
  let input = input.trim().to_lowercase();
  if input.starts_with('/') {
    return Vec::new();
  }
  if input.is_empty() {
    return COMMANDS.iter().collect();
  }

  let mut matches: Vec<(&'static Command, u8)> = COMMANDS
    .iter()
    .filter_map(|cmd| rank(cmd, &input).map(|r| (cmd, r)))
    .collect();
  matches.sort_by_key(|(_, r)| *r);
  matches.into_iter().map(|(cmd, _)| cmd).collect()
}

/// Resolve a submitted command line.
///
/// `selected` is the highlighted suggestion; a path navigates directly.
pub fn resolve(input: &str, selected: usize) -> CommandTarget {
  let trimmed = input.trim();
  if trimmed.starts_with('/') {
    return CommandTarget::Navigate(Route::parse(trimmed));
  }

  let suggestions = get_suggestions(trimmed);
  match suggestions.get(selected) {
    Some(cmd) => match cmd.name {
      "quit" => CommandTarget::Quit,
      name => CommandTarget::Navigate(Route::parse(name_to_path(name))),
    },
    None => CommandTarget::Unknown(trimmed.to_string()),
  }
}

fn name_to_path(name: &str) -> &str {
  match name {
    "home" => "/",
    "portfolio" => "/portfolio",
    "about" => "/about",
    other => other,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_empty_input_returns_all() {
    assert_eq!(get_suggestions("").len(), COMMANDS.len());
  }

  #[test]
  fn test_alias_beats_prefix() {
    let suggestions = get_suggestions("a");
    assert_eq!(suggestions[0].name, "about");
  }

  #[test]
  fn test_prefix_and_fuzzy() {
    assert_eq!(get_suggestions("port")[0].name, "portfolio");
    assert_eq!(get_suggestions("olio")[0].name, "portfolio");
    assert!(get_suggestions("zzz").is_empty());
  }

  #[test]
  fn test_resolve_commands() {
    assert_eq!(resolve("p", 0), CommandTarget::Navigate(Route::Portfolio));
    assert_eq!(resolve("home", 0), CommandTarget::Navigate(Route::Home));
    assert_eq!(resolve("exit", 0), CommandTarget::Quit);
    assert_eq!(
      resolve("zzz", 0),
      CommandTarget::Unknown("zzz".to_string())
    );
  }

  #[test]
  fn test_resolve_path() {
    assert_eq!(
      resolve("/portfolio/harbor", 0),
      CommandTarget::Navigate(Route::PortfolioSingle("harbor".to_string()))
    );
    assert!(get_suggestions("/about").is_empty());
  }
}
