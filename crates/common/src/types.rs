use serde::{Deserialize, Serialize};

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

id_type! {
    /// Identity of a forum participant.
    ///
    /// Assigned by the chat transport, not by the store; wrapping it
    /// prevents mixing it up with store-assigned row identifiers.
    ParticipantId
}

id_type! {
    /// Store-assigned identifier of a question.
    QuestionId
}

id_type! {
    /// Store-assigned identifier of an answer.
    AnswerId
}

id_type! {
    /// Store-assigned identifier of a tag.
    TagId
}

/// Status tier of a participant, surfaced when listing answers.
///
/// Stored as a SMALLINT; unknown stored values decode to `Newcomer`
/// rather than failing the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    Newcomer,
    Member,
    Expert,
    Moderator,
}

impl Tier {
    pub fn from_i16(value: i16) -> Self {
        match value {
            2 => Tier::Member,
            3 => Tier::Expert,
            4 => Tier::Moderator,
            _ => Tier::Newcomer,
        }
    }

    pub fn as_i16(&self) -> i16 {
        match self {
            Tier::Newcomer => 1,
            Tier::Member => 2,
            Tier::Expert => 3,
            Tier::Moderator => 4,
        }
    }

    /// Human-readable name used in answer listings.
    pub fn name(&self) -> &'static str {
        match self {
            Tier::Newcomer => "Newcomer",
            Tier::Member => "Member",
            Tier::Expert => "Expert",
            Tier::Moderator => "Moderator",
        }
    }
}

impl Default for Tier {
    fn default() -> Self {
        Tier::Newcomer
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn participant_id_display_matches_inner() {
        let id = ParticipantId::new(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(id.as_i64(), 42);
    }

    #[test]
    fn question_id_serialization_roundtrip() {
        let id = QuestionId::new(7);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "7");
        let back: QuestionId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn tier_roundtrip_through_i16() {
        for tier in [Tier::Newcomer, Tier::Member, Tier::Expert, Tier::Moderator] {
            assert_eq!(Tier::from_i16(tier.as_i16()), tier);
        }
    }

    #[test]
    fn tier_unknown_value_decodes_as_newcomer() {
        assert_eq!(Tier::from_i16(0), Tier::Newcomer);
        assert_eq!(Tier::from_i16(99), Tier::Newcomer);
    }

    #[test]
    fn tier_display_name() {
        assert_eq!(Tier::Expert.to_string(), "Expert");
    }
}
