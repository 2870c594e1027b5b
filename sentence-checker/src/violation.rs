//! What the checker reports back: where the sentence went wrong, why, and
//! which lexicon forms would fix it.

use polish_morphology::{Case, Gender, Number, PartOfSpeech, Person, Reading};
use std::fmt;

/// The nominal phase a reason talks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum PhraseRole {
    Subject,
    Object,
}

impl fmt::Display for PhraseRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhraseRole::Subject => write!(f, "Subject"),
            PhraseRole::Object => write!(f, "Object"),
        }
    }
}

/// Why a token was rejected. Serialized as its display string, which is what
/// the editing layer shows the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reason {
    UnrecognizedWord,
    PhraseStartsWithVerb(PhraseRole),
    WrongCase {
        role: PhraseRole,
        required: Case,
        actual: Case,
    },
    AfterPronoun {
        actual: PartOfSpeech,
    },
    AfterAdjective {
        actual: PartOfSpeech,
    },
    PhraseGenderMismatch {
        pos: PartOfSpeech,
        expected: Vec<Gender>,
        actual: Gender,
    },
    PhraseNumberMismatch {
        pos: PartOfSpeech,
        expected: Vec<Number>,
        actual: Number,
    },
    ExpectedVerb {
        actual: PartOfSpeech,
    },
    NotConjugated,
    VerbNumberMismatch {
        expected: Vec<Number>,
        actual: Number,
    },
    VerbGenderMismatch {
        expected: Vec<Gender>,
        actual: Gender,
    },
    NotThirdPerson {
        actual: Person,
    },
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::UnrecognizedWord => write!(f, "Unrecognized word"),
            Reason::PhraseStartsWithVerb(role) => write!(
                f,
                "{role} should start with a noun, an adjective or a pronoun, not a verb."
            ),
            Reason::WrongCase {
                role,
                required,
                actual,
            } => write!(f, "{role} should be in {required} form. But is in {actual}."),
            Reason::AfterPronoun { actual } => write!(
                f,
                "A pronoun should be followed by a noun or an adjective, not {}.",
                with_article(*actual)
            ),
            Reason::AfterAdjective { actual } => write!(
                f,
                "An adjective should be followed by a noun, not {}.",
                with_article(*actual)
            ),
            Reason::PhraseGenderMismatch {
                pos,
                expected,
                actual,
            } => write!(
                f,
                "The {pos} gender should match the phrase gender: {}. But is {actual}.",
                join_or(expected)
            ),
            Reason::PhraseNumberMismatch {
                pos,
                expected,
                actual,
            } => write!(
                f,
                "The {pos} number should match the phrase number: {}. But is {actual}.",
                join_or(expected)
            ),
            Reason::ExpectedVerb { actual } => write!(
                f,
                "A verb should follow the subject. But got {}.",
                with_article(*actual)
            ),
            Reason::NotConjugated => write!(f, "Verb is not conjugated."),
            Reason::VerbNumberMismatch { expected, actual } => write!(
                f,
                "Verb should match the noun number: {}. But is {actual}.",
                join_or(expected)
            ),
            Reason::VerbGenderMismatch { expected, actual } => write!(
                f,
                "Verb gender should match the noun gender: {}. But is {actual}.",
                join_or(expected)
            ),
            Reason::NotThirdPerson { actual } => {
                write!(f, "Verb should be in third person. But is in {actual} person.")
            }
        }
    }
}

impl serde::Serialize for Reason {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn with_article(pos: PartOfSpeech) -> String {
    match pos {
        PartOfSpeech::Adjective => format!("an {pos}"),
        PartOfSpeech::Noun | PartOfSpeech::Verb | PartOfSpeech::Pronoun => format!("a {pos}"),
    }
}

fn join_or<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" or ")
}

/// A violation found in one line: the offending token's character position
/// and length, the forms that would fix it, and the reason.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Violation {
    pub position: usize,
    pub length: usize,
    pub expected: Vec<Reading>,
    pub reason: Reason,
}

impl Violation {
    /// The suggested surface strings, in suggestion order, without
    /// duplicates (distinct cells can share a spelling).
    pub fn expected_forms(&self) -> Vec<&str> {
        let mut forms: Vec<&str> = Vec::with_capacity(self.expected.len());
        for reading in &self.expected {
            if !forms.contains(&reading.surface.as_str()) {
                forms.push(&reading.surface);
            }
        }
        forms
    }
}

/// A violation found in a block of text, tagged with its zero-based row.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct BlockViolation {
    pub row: usize,
    pub violation: Violation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_display() {
        let reason = Reason::WrongCase {
            role: PhraseRole::Subject,
            required: Case::Nominative,
            actual: Case::Genitive,
        };
        assert_eq!(
            reason.to_string(),
            "Subject should be in nominative form. But is in genitive."
        );

        let reason = Reason::VerbNumberMismatch {
            expected: vec![Number::Singular],
            actual: Number::Plural,
        };
        assert_eq!(
            reason.to_string(),
            "Verb should match the noun number: singular. But is plural."
        );

        let reason = Reason::AfterAdjective {
            actual: PartOfSpeech::Adjective,
        };
        assert_eq!(
            reason.to_string(),
            "An adjective should be followed by a noun, not an adjective."
        );
    }

    #[test]
    fn test_expected_forms_deduplicates_in_order() {
        let reading = |surface: &str, case| Reading {
            surface: surface.to_string(),
            lemma: "kość".to_string(),
            pos: PartOfSpeech::Noun,
            number: Some(Number::Singular),
            case: Some(case),
            gender: Some(Gender::Feminine),
            person: None,
            tense: None,
            mood: None,
        };
        let violation = Violation {
            position: 0,
            length: 4,
            expected: vec![
                reading("kość", Case::Nominative),
                reading("kości", Case::Genitive),
                reading("kość", Case::Accusative),
            ],
            reason: Reason::UnrecognizedWord,
        };
        assert_eq!(violation.expected_forms(), vec!["kość", "kości"]);
    }

    #[test]
    fn test_reason_serializes_as_display_string() {
        let json = serde_json::to_string(&Reason::NotConjugated).unwrap();
        assert_eq!(json, "\"Verb is not conjugated.\"");
    }
}
