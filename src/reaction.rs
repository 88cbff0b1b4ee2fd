use std::fmt;
use std::str::FromStr;

/// Reaction kinds accepted by GitHub's reactions API.
///
/// See <https://docs.github.com/en/rest/reactions#reaction-types>.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reaction {
    ThumbsUp,
    ThumbsDown,
    Laugh,
    Confused,
    Heart,
    Hooray,
    Rocket,
    Eyes,
}

impl Reaction {
    pub const ALL: [Reaction; 8] = [
        Reaction::ThumbsUp,
        Reaction::ThumbsDown,
        Reaction::Laugh,
        Reaction::Confused,
        Reaction::Heart,
        Reaction::Hooray,
        Reaction::Rocket,
        Reaction::Eyes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Reaction::ThumbsUp => "+1",
            Reaction::ThumbsDown => "-1",
            Reaction::Laugh => "laugh",
            Reaction::Confused => "confused",
            Reaction::Heart => "heart",
            Reaction::Hooray => "hooray",
            Reaction::Rocket => "rocket",
            Reaction::Eyes => "eyes",
        }
    }
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("Unknown reaction '{0}'")]
pub struct UnknownReaction(pub String);

impl FromStr for Reaction {
    type Err = UnknownReaction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Reaction::ALL
            .into_iter()
            .find(|reaction| reaction.as_str() == s)
            .ok_or_else(|| UnknownReaction(s.to_string()))
    }
}

/// Parse a comma separated reaction list. Whitespace anywhere is ignored and
/// unrecognized tokens are dropped.
pub fn parse_reactions(input: &str) -> Vec<Reaction> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();

    compact
        .split(',')
        .filter_map(|token| match token.parse::<Reaction>() {
            Ok(reaction) => Some(reaction),
            Err(e) => {
                if !token.is_empty() {
                    log::debug!("{e}. Skipping");
                }
                None
            }
        })
        .collect()
}
