use crate::tag::TagName;

/// Which command an inbound line was addressed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    TagAll,
    Push,
    Pop,
    Rename,
    CustomTag,
}

impl CommandKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TagAll => "tagall",
            Self::Push => "push",
            Self::Pop => "pop",
            Self::Rename => "rename",
            Self::CustomTag => "custom_tag",
        }
    }
}

impl std::fmt::Display for CommandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Commands with an argument grammar, the only ones that can be malformed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UsageTopic {
    Push,
    Pop,
    Rename,
    CustomTag,
}

impl UsageTopic {
    pub fn kind(self) -> CommandKind {
        match self {
            Self::Push => CommandKind::Push,
            Self::Pop => CommandKind::Pop,
            Self::Rename => CommandKind::Rename,
            Self::CustomTag => CommandKind::CustomTag,
        }
    }
}

/// A parsed chat command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Mention every participant of the group
    TagAll,
    /// Save raw numbers under a tag
    Push { numbers: Vec<String>, tag: TagName },
    /// Remove raw numbers from a tag
    Pop { numbers: Vec<String>, tag: TagName },
    Rename { old: TagName, new: TagName },
    /// Mention every number saved under a tag
    CustomTag { tag: TagName },
    /// Leading keyword recognized but the arguments did not match its grammar
    Malformed(UsageTopic),
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::TagAll => CommandKind::TagAll,
            Self::Push { .. } => CommandKind::Push,
            Self::Pop { .. } => CommandKind::Pop,
            Self::Rename { .. } => CommandKind::Rename,
            Self::CustomTag { .. } => CommandKind::CustomTag,
            Self::Malformed(topic) => topic.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_as_str() {
        assert_eq!(CommandKind::TagAll.as_str(), "tagall");
        assert_eq!(CommandKind::Push.as_str(), "push");
        assert_eq!(CommandKind::Pop.as_str(), "pop");
        assert_eq!(CommandKind::Rename.as_str(), "rename");
        assert_eq!(CommandKind::CustomTag.as_str(), "custom_tag");
    }

    #[test]
    fn test_malformed_keeps_kind() {
        assert_eq!(Command::Malformed(UsageTopic::Pop).kind(), CommandKind::Pop);
        assert_eq!(
            Command::Malformed(UsageTopic::CustomTag).kind(),
            CommandKind::CustomTag
        );
    }
}
