use super::{Command, UsageTopic};
use crate::tag::TagName;

const TAG_ALL: &str = "tagall!";
const CUSTOM_TAG_PREFIX: &str = "tag";
const CUSTOM_TAG_SUFFIX: char = '!';

/// Classifies one inbound chat line into a [`Command`]
///
/// Grammar (keywords are case-insensitive, first match wins):
/// - `tagall!`
/// - `!PUSH @<number>[@<number>...] #<tag>`
/// - `!POP @<number>[@<number>...] #<tag>`
/// - `!RENAME #<old> #<new>`
/// - `tag<name>!`
///
/// Anything else is not a command and yields `None`.
#[derive(Debug, Default, Clone, Copy)]
pub struct CommandParser;

impl CommandParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, text: &str) -> Option<Command> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        if text.eq_ignore_ascii_case(TAG_ALL) {
            return Some(Command::TagAll);
        }

        let (keyword, rest) = split_keyword(text);
        match keyword.to_ascii_uppercase().as_str() {
            "!PUSH" => {
                return Some(match parse_member_args(rest) {
                    Some((numbers, tag)) => Command::Push { numbers, tag },
                    None => Command::Malformed(UsageTopic::Push),
                });
            }
            "!POP" => {
                return Some(match parse_member_args(rest) {
                    Some((numbers, tag)) => Command::Pop { numbers, tag },
                    None => Command::Malformed(UsageTopic::Pop),
                });
            }
            "!RENAME" => {
                return Some(match parse_rename_args(rest) {
                    Some((old, new)) => Command::Rename { old, new },
                    None => Command::Malformed(UsageTopic::Rename),
                });
            }
            _ => {}
        }

        parse_custom_tag(text)
    }
}

/// Split off the first whitespace-delimited token
fn split_keyword(text: &str) -> (&str, &str) {
    match text.find(char::is_whitespace) {
        Some(index) => (&text[..index], &text[index..]),
        None => (text, ""),
    }
}

/// Split `body` at the first `#` that follows whitespace and has something before it.
/// Returns the text before (whitespace trimmed) and after the marker.
fn split_at_tag_marker(body: &str) -> Option<(&str, &str)> {
    body.char_indices()
        .filter(|&(index, c)| c == '#' && body[..index].ends_with(char::is_whitespace))
        .map(|(index, _)| (body[..index].trim_end(), &body[index + 1..]))
        .find(|(head, _)| !head.is_empty())
}

/// `@<n>[@<n>...] #<tag>`
fn parse_member_args(rest: &str) -> Option<(Vec<String>, TagName)> {
    let body = rest.trim_start().strip_prefix('@')?;
    let (numbers, tag) = split_at_tag_marker(body)?;

    let numbers: Vec<String> = numbers
        .split('@')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect();
    if numbers.is_empty() {
        return None;
    }

    let tag = TagName::new(tag).ok()?;
    Some((numbers, tag))
}

/// `#<old> #<new>`
fn parse_rename_args(rest: &str) -> Option<(TagName, TagName)> {
    let body = rest.trim_start().strip_prefix('#')?;
    let (old, new) = split_at_tag_marker(body)?;
    Some((TagName::new(old).ok()?, TagName::new(new).ok()?))
}

/// `tag<name>!`
fn parse_custom_tag(text: &str) -> Option<Command> {
    let lowered = text.to_lowercase();
    let inner = lowered
        .strip_prefix(CUSTOM_TAG_PREFIX)?
        .strip_suffix(CUSTOM_TAG_SUFFIX)?;
    if inner.is_empty() {
        return None;
    }

    Some(match TagName::new(inner) {
        Ok(tag) => Command::CustomTag { tag },
        Err(_) => Command::Malformed(UsageTopic::CustomTag),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Option<Command> {
        CommandParser::new().parse(text)
    }

    fn tag(name: &str) -> TagName {
        TagName::new(name).unwrap()
    }

    #[test]
    fn test_tagall() {
        assert_eq!(parse("tagall!"), Some(Command::TagAll));
        assert_eq!(parse("  TagAll!  "), Some(Command::TagAll));
    }

    #[test]
    fn test_push_multiple_numbers() {
        assert_eq!(
            parse("!PUSH @111111111@222222222 #exam"),
            Some(Command::Push {
                numbers: vec!["111111111".to_string(), "222222222".to_string()],
                tag: tag("exam"),
            })
        );
    }

    #[test]
    fn test_push_keyword_is_case_insensitive_and_tag_keeps_spaces() {
        assert_eq!(
            parse("!push @919876543210 #2nd Years"),
            Some(Command::Push {
                numbers: vec!["919876543210".to_string()],
                tag: tag("2nd years"),
            })
        );
    }

    #[test]
    fn test_push_drops_empty_segments() {
        assert_eq!(
            parse("!PUSH @111@@222@ #t"),
            Some(Command::Push {
                numbers: vec!["111".to_string(), "222".to_string()],
                tag: tag("t"),
            })
        );
    }

    #[test]
    fn test_pop() {
        assert_eq!(
            parse("!POP @111111111 #exam"),
            Some(Command::Pop {
                numbers: vec!["111111111".to_string()],
                tag: tag("exam"),
            })
        );
    }

    #[test]
    fn test_rename() {
        assert_eq!(
            parse("!RENAME #exam #finals"),
            Some(Command::Rename {
                old: tag("exam"),
                new: tag("finals"),
            })
        );
    }

    #[test]
    fn test_rename_with_spaces_in_names() {
        assert_eq!(
            parse("!rename #2nd years #Second Years"),
            Some(Command::Rename {
                old: tag("2nd years"),
                new: tag("second years"),
            })
        );
    }

    #[test]
    fn test_custom_tag() {
        assert_eq!(parse("tagexam!"), Some(Command::CustomTag { tag: tag("exam") }));
        assert_eq!(parse("TAG 2Year !"), Some(Command::CustomTag { tag: tag("2year") }));
    }

    #[test]
    fn test_not_a_command() {
        assert_eq!(parse("hello everyone"), None);
        assert_eq!(parse(""), None);
        assert_eq!(parse("tag!"), None);
        assert_eq!(parse("tagging"), None);
        assert_eq!(parse("!PUSH@111 #x"), None);
    }

    #[test]
    fn test_malformed_push() {
        assert_eq!(parse("!PUSH"), Some(Command::Malformed(UsageTopic::Push)));
        assert_eq!(parse("!PUSH 919876543210 #x"), Some(Command::Malformed(UsageTopic::Push)));
        assert_eq!(parse("!PUSH @919876543210"), Some(Command::Malformed(UsageTopic::Push)));
        assert_eq!(parse("!PUSH @919876543210#x"), Some(Command::Malformed(UsageTopic::Push)));
        assert_eq!(parse("!PUSH @@ #x"), Some(Command::Malformed(UsageTopic::Push)));
        assert_eq!(parse("!PUSH @919876543210 #   "), Some(Command::Malformed(UsageTopic::Push)));
    }

    #[test]
    fn test_malformed_pop_and_rename() {
        assert_eq!(parse("!pop #exam"), Some(Command::Malformed(UsageTopic::Pop)));
        assert_eq!(parse("!RENAME #exam"), Some(Command::Malformed(UsageTopic::Rename)));
        assert_eq!(parse("!RENAME exam finals"), Some(Command::Malformed(UsageTopic::Rename)));
    }

    #[test]
    fn test_blank_custom_tag_is_malformed() {
        assert_eq!(parse("tag   !"), Some(Command::Malformed(UsageTopic::CustomTag)));
    }
}
