use serde::{Deserialize, Serialize};

/// Five-point mood scale, from very sad (1) to very happy (5).
///
/// Stored as an INTEGER column and serialized as a bare number, so an
/// out-of-range value fails at the boundary instead of reaching a `Mood`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[serde(try_from = "i32", into = "i32")]
#[repr(i32)]
pub enum MoodLevel {
    VerySad = 1,
    Sad = 2,
    Neutral = 3,
    Happy = 4,
    VeryHappy = 5,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Invalid mood level {0}: must be between 1 and 5")]
pub struct InvalidMoodLevel(pub i32);

impl MoodLevel {
    pub const ALL: [MoodLevel; 5] = [
        MoodLevel::VerySad,
        MoodLevel::Sad,
        MoodLevel::Neutral,
        MoodLevel::Happy,
        MoodLevel::VeryHappy,
    ];

    pub fn value(self) -> i32 {
        self as i32
    }

    pub fn emoji(self) -> &'static str {
        match self {
            MoodLevel::VerySad => "😢",
            MoodLevel::Sad => "😔",
            MoodLevel::Neutral => "😐",
            MoodLevel::Happy => "🙂",
            MoodLevel::VeryHappy => "😄",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            MoodLevel::VerySad => "Very Sad",
            MoodLevel::Sad => "Sad",
            MoodLevel::Neutral => "Neutral",
            MoodLevel::Happy => "Happy",
            MoodLevel::VeryHappy => "Very Happy",
        }
    }

    /// Reverse lookup from the numeric value. Returns `None` outside 1..=5.
    pub fn from_value(value: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.value() == value)
    }
}

impl TryFrom<i32> for MoodLevel {
    type Error = InvalidMoodLevel;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::from_value(value).ok_or(InvalidMoodLevel(value))
    }
}

impl From<MoodLevel> for i32 {
    fn from(level: MoodLevel) -> Self {
        level.value()
    }
}

impl std::fmt::Display for MoodLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.emoji(), self.description())
    }
}
