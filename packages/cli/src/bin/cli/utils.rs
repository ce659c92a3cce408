// ABOUTME: Shared helpers for the terminal pages
// ABOUTME: Table formatting, enum pickers, the tag prompt and error reporting

use colored::*;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use inquire::{MultiSelect, Select, Text};
use std::fmt;
use std::path::Path;

use persona_client::{ClientError, PersonaClient};
use persona_core::{TagInput, TagKey, TagList};
use serde::de::DeserializeOwned;

pub fn client() -> anyhow::Result<PersonaClient> {
    Ok(PersonaClient::from_env()?)
}

pub fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

/// Backend timestamps are RFC 3339 or naive ISO 8601
pub fn format_date(date: Option<&str>) -> String {
    let Some(date) = date else {
        return "—".to_string();
    };

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(date) {
        return dt.format("%-m/%-d/%Y").to_string();
    }

    match chrono::NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(dt) => dt.format("%-m/%-d/%Y").to_string(),
        Err(_) => date.to_string(),
    }
}

pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

pub fn optional(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Optional tag fields are absent rather than empty
pub fn non_empty(tags: TagList) -> Option<TagList> {
    if tags.is_empty() {
        None
    } else {
        Some(tags)
    }
}

pub fn join_or_dash<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = items
        .into_iter()
        .map(|item| item.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() {
        "—".to_string()
    } else {
        joined
    }
}

pub fn print_field(label: &str, value: impl fmt::Display) {
    println!("{:<22} {}", format!("{}:", label).cyan(), value);
}

/// Load a draft saved as JSON, for non-interactive creation
pub fn read_draft<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
    let draft = serde_json::from_str(&text)
        .map_err(|e| anyhow::anyhow!("Invalid draft in {}: {}", path.display(), e))?;
    Ok(draft)
}

/// Show field violations inline, or the request failure, and hand back an error
pub fn report_create_error(singular: &str, err: ClientError) -> anyhow::Error {
    match err.violations() {
        Some(violations) => {
            eprintln!("{}", "Please fix the following fields:".red().bold());
            for violation in violations.violations() {
                eprintln!("  {} {}", format!("{}:", violation.field).yellow(), violation.message);
            }
            anyhow::anyhow!("{} was not created", capitalize(singular))
        }
        None => {
            eprintln!("{}", format!("❌ Failed to create {}: {}", singular, err).red());
            err.into()
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Enum option shown by its label
struct Choice<T> {
    value: T,
    label: &'static str,
}

impl<T> fmt::Display for Choice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label)
    }
}

pub fn select_one<T: Copy + PartialEq>(
    message: &str,
    options: &[T],
    label: fn(&T) -> &'static str,
    default: Option<T>,
) -> anyhow::Result<T> {
    let choices: Vec<Choice<T>> = options
        .iter()
        .map(|value| Choice {
            value: *value,
            label: label(value),
        })
        .collect();
    let cursor = default
        .and_then(|d| options.iter().position(|option| *option == d))
        .unwrap_or(0);

    let choice = Select::new(message, choices)
        .with_starting_cursor(cursor)
        .prompt()?;
    Ok(choice.value)
}

pub fn select_many<T: Copy>(
    message: &str,
    options: &[T],
    label: fn(&T) -> &'static str,
) -> anyhow::Result<Vec<T>> {
    let choices: Vec<Choice<T>> = options
        .iter()
        .map(|value| Choice {
            value: *value,
            label: label(value),
        })
        .collect();

    let picked = MultiSelect::new(message, choices).prompt()?;
    Ok(picked.into_iter().map(|choice| choice.value).collect())
}

/// Collect tags one line at a time. A blank line finishes the list.
pub fn prompt_tags(label: &str, placeholder: &str) -> anyhow::Result<TagList> {
    let mut input = TagInput::new();

    loop {
        let current = join_or_dash(input.tags().iter());
        let text = Text::new(&format!("{}:", label))
            .with_placeholder(placeholder)
            .with_help_message(&format!("Added: {} (blank line to finish)", current))
            .prompt()?;

        if text.trim().is_empty() {
            break;
        }

        input.set_input(text);
        if !input.handle_key(TagKey::Enter) {
            println!(
                "{}",
                format!("'{}' is already in the list", input.input().trim()).yellow()
            );
            input.set_input("");
        }
    }

    Ok(input.into_tags())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("2024-05-05T09:30:00Z"), "5/5/2024")]
    #[case(Some("2024-05-05T09:30:00"), "5/5/2024")]
    #[case(Some("2024-05-05T09:30:00.123456"), "5/5/2024")]
    #[case(Some("yesterday"), "yesterday")]
    #[case(None, "—")]
    fn test_format_date(#[case] input: Option<&str>, #[case] expected: &str) {
        assert_eq!(format_date(input), expected);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a much longer agent name", 10), "a much ...");
        assert_eq!(truncate("ñandú ñandú ñandú", 8), "ñandú...");
    }

    #[test]
    fn test_optional_and_join() {
        assert_eq!(optional("  ".to_string()), None);
        assert_eq!(optional("Nurse".to_string()), Some("Nurse".to_string()));
        assert_eq!(join_or_dash(Vec::<String>::new()), "—");
        assert_eq!(join_or_dash(["a", "b"]), "a, b");
    }

    #[test]
    fn test_empty_platform_list_is_absent() {
        assert_eq!(non_empty(TagList::new()), None);

        let platforms = TagList::from_iter(["instagram", "tiktok"]);
        assert_eq!(non_empty(platforms.clone()), Some(platforms));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("agent"), "Agent");
        assert_eq!(capitalize("ML engine"), "ML engine");
    }
}
