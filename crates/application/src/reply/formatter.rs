use domain::command::{CommandKind, UsageTopic};
use domain::roster::{Participant, mention_handle, normalize_member_id};
use domain::tag::{AdditionReport, PhoneNumber, RemovalReport, RenameReport, TagName};
use domain::{DomainError, Reply};

/// Reply templates, one per command outcome
///
/// Every function is pure: the same outcome, tag, members and sender always
/// render the same text and mention list.
pub struct ReplyFormatter;

impl ReplyFormatter {
    pub fn denied(kind: CommandKind) -> Reply {
        let label = match kind {
            CommandKind::TagAll => "tagall command",
            CommandKind::Push => "PUSH command",
            CommandKind::Pop => "POP command",
            CommandKind::Rename => "RENAME command",
            CommandKind::CustomTag => "tag commands",
        };
        Reply::text(format!("❌ Only group admins can use the {}!", label))
    }

    pub fn usage(topic: UsageTopic) -> Reply {
        let text = match topic {
            UsageTopic::Push | UsageTopic::Pop => {
                let keyword = if topic == UsageTopic::Push { "PUSH" } else { "POP" };
                format!(
                    "❌ Invalid {k} format!\n\n✅ Correct formats:\n\
                     • Single: `!{k} @919876543210 #tagname`\n\
                     • Multiple: `!{k} @919876543210@919876543211@919876543212 #tagname`\n\n\
                     Example: `!{k} @919876543210@919876543211 #2nd years`",
                    k = keyword
                )
            }
            UsageTopic::Rename => "❌ Invalid RENAME format!\n\n\
                 ✅ Correct format: `!RENAME #oldtagname #newtagname`\n\n\
                 Example: `!RENAME #2nd years #second years`"
                .to_string(),
            UsageTopic::CustomTag => "❌ Invalid tag command!\n\n\
                 ✅ Correct format: `tag<tagname>!`\n\n\
                 Example: `tag2ndyears!`"
                .to_string(),
        };
        Reply::text(text)
    }

    pub fn tag_all(participants: &[Participant], sender_id: &str) -> Reply {
        // Roster ids may carry a device suffix; one mention per user
        let mut members: Vec<String> = Vec::with_capacity(participants.len());
        for member_id in participants.iter().map(|p| normalize_member_id(&p.member_id)) {
            if !members.contains(&member_id) {
                members.push(member_id);
            }
        }

        let mention_text = members
            .iter()
            .map(|m| format!("@{}", mention_handle(m)))
            .collect::<Vec<_>>()
            .join(" ");
        let text = format!(
            "🔔 *TAG ALL MEMBERS* 🔔\n\n{}\n\n_Tagged by admin: @{}_",
            mention_text,
            mention_handle(sender_id)
        );

        Reply::with_mentions(text, with_sender(members, sender_id))
    }

    pub fn tag_all_failed() -> Reply {
        Reply::text(
            "❌ An error occurred while trying to tag all members. Please try again later.",
        )
    }

    pub fn custom_tag(tag: &TagName, members: &[PhoneNumber], sender_id: &str) -> Reply {
        let text = format!(
            "🔔 *TAG: {}* 🔔\n\n{}\n\n_Tagged by admin: @{}_\n_Total numbers: {}_",
            tag.as_str().to_uppercase(),
            mention_text(members),
            mention_handle(sender_id),
            members.len()
        );
        Reply::with_mentions(text, with_sender(member_ids(members), sender_id))
    }

    pub fn custom_tag_empty(tag: &TagName) -> Reply {
        Reply::text(format!(
            "❌ No phone numbers found for tag \"{}\". Use PUSH command to add numbers first.",
            tag
        ))
    }

    pub fn pushed(tag: &TagName, report: &AdditionReport) -> Reply {
        if report.added.is_empty() && report.duplicates.is_empty() {
            let mut text = "❌ No valid phone numbers found! Please use valid phone numbers \
                            with country code (10-15 digits)."
                .to_string();
            if !report.invalid.is_empty() {
                text.push_str("\n\n");
                text.push_str(&invalid_line(&report.invalid));
            }
            return Reply::text(text);
        }

        let mut sections = Vec::new();
        if !report.added.is_empty() {
            sections.push(format!(
                "✅ {} phone number(s) added to tag \"{}\":\n{}",
                report.added.len(),
                tag,
                mention_text(&report.added)
            ));
        }

        let mut notes = Vec::new();
        if !report.duplicates.is_empty() {
            notes.push(format!(
                "⚠️ {} number(s) already existed: {}",
                report.duplicates.len(),
                join_numbers(&report.duplicates)
            ));
        }
        if !report.invalid.is_empty() {
            notes.push(invalid_line(&report.invalid));
        }
        if !notes.is_empty() {
            sections.push(notes.join("\n"));
        }

        sections.push(format!("📊 Total numbers in \"{}\": {}", tag, report.total));
        if !report.added.is_empty() {
            sections.push(format!(
                "💡 Use \"{}\" to tag all saved numbers",
                tag.invocation()
            ));
        }

        Reply::with_mentions(sections.join("\n\n"), member_ids(&report.added))
    }

    pub fn popped(tag: &TagName, report: &RemovalReport) -> Reply {
        let mut sections = Vec::new();
        if !report.removed.is_empty() {
            sections.push(format!(
                "✅ {} phone number(s) removed from tag \"{}\":\n{}",
                report.removed.len(),
                tag,
                mention_text(&report.removed)
            ));
        }
        if !report.not_found.is_empty() {
            sections.push(format!(
                "⚠️ {} number(s) not found in tag \"{}\": {}",
                report.not_found.len(),
                tag,
                report.not_found.join(", ")
            ));
        }
        sections.push(format!(
            "📊 Remaining numbers in \"{}\": {}",
            tag, report.remaining
        ));

        Reply::with_mentions(sections.join("\n\n"), member_ids(&report.removed))
    }

    pub fn pop_missing_tag(tag: &TagName) -> Reply {
        Reply::text(format!("❌ Tag \"{}\" doesn't exist or is empty!", tag))
    }

    pub fn renamed(report: &RenameReport) -> Reply {
        Reply::text(format!(
            "✅ Tag renamed successfully!\n\n🏷️ Old name: \"{}\"\n🏷️ New name: \"{}\"\n\n\
             📊 Numbers in renamed tag: {}\n\n\
             💡 Use \"{}\" to tag all numbers in this category",
            report.old,
            report.new,
            report.count,
            report.new.invocation()
        ))
    }

    pub fn rename_failed(error: &DomainError) -> Reply {
        let text = match error {
            DomainError::TagNotFound(old) => format!("❌ Tag \"{}\" doesn't exist!", old),
            DomainError::TagAlreadyExists(new) => format!(
                "❌ Tag \"{}\" already exists! Please choose a different name.",
                new
            ),
            DomainError::SameTagName(_) => {
                "❌ Old and new tag names are the same! Please choose a different name."
                    .to_string()
            }
            _ => "❌ An error occurred while renaming the tag. Please try again later."
                .to_string(),
        };
        Reply::text(text)
    }
}

fn mention_text(members: &[PhoneNumber]) -> String {
    members
        .iter()
        .map(|m| format!("@{}", m))
        .collect::<Vec<_>>()
        .join(" ")
}

fn member_ids(members: &[PhoneNumber]) -> Vec<String> {
    members.iter().map(PhoneNumber::member_id).collect()
}

fn join_numbers(members: &[PhoneNumber]) -> String {
    members
        .iter()
        .map(PhoneNumber::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn invalid_line(invalid: &[String]) -> String {
    format!(
        "❌ {} invalid number(s) skipped: {}",
        invalid.len(),
        invalid.join(", ")
    )
}

fn with_sender(mut mentions: Vec<String>, sender_id: &str) -> Vec<String> {
    if !mentions.iter().any(|m| m == sender_id) {
        mentions.push(sender_id.to_string());
    }
    mentions
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::ParticipantRole;

    const SENDER: &str = "919000000000@s.whatsapp.net";

    fn tag(name: &str) -> TagName {
        TagName::new(name).unwrap()
    }

    fn numbers(raw: &[&str]) -> Vec<PhoneNumber> {
        raw.iter().map(|n| PhoneNumber::parse(n).unwrap()).collect()
    }

    #[test]
    fn test_denied_names_command() {
        assert_eq!(
            ReplyFormatter::denied(CommandKind::Push).text,
            "❌ Only group admins can use the PUSH command!"
        );
        assert_eq!(
            ReplyFormatter::denied(CommandKind::CustomTag).text,
            "❌ Only group admins can use the tag commands!"
        );
        assert!(ReplyFormatter::denied(CommandKind::TagAll).mentions.is_empty());
    }

    #[test]
    fn test_tag_all_mentions_roster_and_sender() {
        let participants = vec![
            Participant::new("911111111111@s.whatsapp.net", ParticipantRole::Member),
            Participant::new("912222222222@s.whatsapp.net", ParticipantRole::Admin),
        ];
        let reply = ReplyFormatter::tag_all(&participants, SENDER);

        assert_eq!(
            reply.text,
            "🔔 *TAG ALL MEMBERS* 🔔\n\n@911111111111 @912222222222\n\n_Tagged by admin: @919000000000_"
        );
        assert_eq!(
            reply.mentions,
            vec![
                "911111111111@s.whatsapp.net".to_string(),
                "912222222222@s.whatsapp.net".to_string(),
                SENDER.to_string(),
            ]
        );
    }

    #[test]
    fn test_sender_mentioned_once() {
        let participants = vec![Participant::new(SENDER, ParticipantRole::Admin)];
        let reply = ReplyFormatter::tag_all(&participants, SENDER);
        assert_eq!(reply.mentions, vec![SENDER.to_string()]);
    }

    #[test]
    fn test_tag_all_strips_device_suffix() {
        let participants = vec![
            Participant::new("919000000000:4@s.whatsapp.net", ParticipantRole::Admin),
            Participant::new("911111111111:2@s.whatsapp.net", ParticipantRole::Member),
            Participant::new("911111111111@s.whatsapp.net", ParticipantRole::Member),
        ];
        let reply = ReplyFormatter::tag_all(&participants, SENDER);

        assert_eq!(
            reply.text,
            "🔔 *TAG ALL MEMBERS* 🔔\n\n@919000000000 @911111111111\n\n_Tagged by admin: @919000000000_"
        );
        assert_eq!(
            reply.mentions,
            vec![SENDER.to_string(), "911111111111@s.whatsapp.net".to_string()]
        );
    }

    #[test]
    fn test_custom_tag() {
        let members = numbers(&["919111111111"]);
        let reply = ReplyFormatter::custom_tag(&tag("2nd"), &members, SENDER);

        assert_eq!(
            reply.text,
            "🔔 *TAG: 2ND* 🔔\n\n@919111111111\n\n_Tagged by admin: @919000000000_\n_Total numbers: 1_"
        );
        assert_eq!(
            reply.mentions,
            vec!["919111111111@s.whatsapp.net".to_string(), SENDER.to_string()]
        );
    }

    #[test]
    fn test_pushed_summary() {
        let report = AdditionReport {
            added: numbers(&["919111111111"]),
            duplicates: numbers(&["919222222222"]),
            invalid: vec!["abc".to_string()],
            total: 2,
        };
        let reply = ReplyFormatter::pushed(&tag("2nd years"), &report);

        assert_eq!(
            reply.text,
            "✅ 1 phone number(s) added to tag \"2nd years\":\n@919111111111\n\n\
             ⚠️ 1 number(s) already existed: 919222222222\n\
             ❌ 1 invalid number(s) skipped: abc\n\n\
             📊 Total numbers in \"2nd years\": 2\n\n\
             💡 Use \"tag2ndyears!\" to tag all saved numbers"
        );
        assert_eq!(reply.mentions, vec!["919111111111@s.whatsapp.net".to_string()]);
    }

    #[test]
    fn test_pushed_only_duplicates() {
        let report = AdditionReport {
            duplicates: numbers(&["919222222222"]),
            total: 1,
            ..Default::default()
        };
        let reply = ReplyFormatter::pushed(&tag("exam"), &report);

        assert_eq!(
            reply.text,
            "⚠️ 1 number(s) already existed: 919222222222\n\n📊 Total numbers in \"exam\": 1"
        );
        assert!(reply.mentions.is_empty());
    }

    #[test]
    fn test_pushed_nothing_valid() {
        let report = AdditionReport {
            invalid: vec!["123".to_string(), "abc".to_string()],
            ..Default::default()
        };
        let reply = ReplyFormatter::pushed(&tag("exam"), &report);
        assert!(reply.text.starts_with("❌ No valid phone numbers found!"));
        assert!(reply.text.ends_with("❌ 2 invalid number(s) skipped: 123, abc"));
    }

    #[test]
    fn test_popped() {
        let report = RemovalReport {
            removed: numbers(&["919111111111"]),
            not_found: vec!["919333333333".to_string()],
            remaining: 0,
        };
        let reply = ReplyFormatter::popped(&tag("exam"), &report);

        assert_eq!(
            reply.text,
            "✅ 1 phone number(s) removed from tag \"exam\":\n@919111111111\n\n\
             ⚠️ 1 number(s) not found in tag \"exam\": 919333333333\n\n\
             📊 Remaining numbers in \"exam\": 0"
        );
        assert_eq!(reply.mentions, vec!["919111111111@s.whatsapp.net".to_string()]);
    }

    #[test]
    fn test_rename_outcomes() {
        let report = RenameReport {
            old: tag("exam"),
            new: tag("final exam"),
            count: 3,
        };
        let reply = ReplyFormatter::renamed(&report);
        assert!(reply.text.contains("🏷️ Old name: \"exam\""));
        assert!(reply.text.contains("🏷️ New name: \"final exam\""));
        assert!(reply.text.contains("📊 Numbers in renamed tag: 3"));
        assert!(reply.text.contains("tagfinalexam!"));

        assert_eq!(
            ReplyFormatter::rename_failed(&DomainError::TagNotFound("exam".into())).text,
            "❌ Tag \"exam\" doesn't exist!"
        );
        assert_eq!(
            ReplyFormatter::rename_failed(&DomainError::TagAlreadyExists("b".into())).text,
            "❌ Tag \"b\" already exists! Please choose a different name."
        );
        assert_eq!(
            ReplyFormatter::rename_failed(&DomainError::SameTagName("a".into())).text,
            "❌ Old and new tag names are the same! Please choose a different name."
        );
    }

    #[test]
    fn test_usage_mentions_keyword() {
        assert!(ReplyFormatter::usage(UsageTopic::Push).text.contains("`!PUSH @919876543210 #tagname`"));
        assert!(ReplyFormatter::usage(UsageTopic::Pop).text.starts_with("❌ Invalid POP format!"));
        assert!(ReplyFormatter::usage(UsageTopic::Rename).text.contains("!RENAME #oldtagname #newtagname"));
        assert!(ReplyFormatter::usage(UsageTopic::CustomTag).text.contains("`tag<tagname>!`"));
    }
}
