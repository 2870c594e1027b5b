//! Morphological vocabulary for the Polish sentence checker.
//!
//! This crate defines the closed set of morphological axes the inflection
//! tables are keyed by, the [`Reading`] record tying a surface form to one
//! cell of those tables, and the [`Lexicon`](lexicon::Lexicon) that loads and
//! queries the tables.

pub mod column;
pub mod lexicon;

pub use column::{CellKey, ColumnError};
pub use lexicon::{FormFilter, Lexicon, LexiconError};

/// Grammatical number.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    parse_display::Display,
)]
pub enum Number {
    #[display("singular")]
    Singular,
    #[display("plural")]
    Plural,
}

/// Grammatical case. Declared in the Polish textbook order, which is also the
/// order suggestion queries enumerate when a filter leaves the axis open.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    parse_display::Display,
)]
pub enum Case {
    #[display("nominative")]
    Nominative,
    #[display("genitive")]
    Genitive,
    #[display("dative")]
    Dative,
    #[display("accusative")]
    Accusative,
    #[display("instrumental")]
    Instrumental,
    #[display("locative")]
    Locative,
    #[display("vocative")]
    Vocative,
}

/// Grammatical gender.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    parse_display::Display,
)]
pub enum Gender {
    #[display("male")]
    Masculine,
    #[display("female")]
    Feminine,
    #[display("neutral")]
    Neuter,
}

/// Grammatical person, for verbs.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    parse_display::Display,
)]
pub enum Person {
    #[display("first")]
    First,
    #[display("second")]
    Second,
    #[display("third")]
    Third,
}

/// Verb tense.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    parse_display::Display,
)]
pub enum Tense {
    #[display("present")]
    Present,
    #[display("past")]
    Past,
}

/// Verb mood.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    parse_display::Display,
)]
pub enum Mood {
    #[display("indicative")]
    Indicative,
    #[display("conditional")]
    Conditional,
}

/// The four word categories the checker knows about. Deliberately closed:
/// every match over this enum is exhaustive, there is no "unknown category"
/// escape hatch.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Pronoun,
}

impl std::fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let word = match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adjective => "adjective",
            PartOfSpeech::Pronoun => "pronoun",
        };
        write!(f, "{word}")
    }
}

/// One way a surface form can be read: the inflected string itself, the lemma
/// it belongs to, and the values of every morphological axis its table cell
/// fixes.
///
/// A single surface form can have several readings (one spelling serving two
/// genders, say). The only reading with an unset `number` and `case` is the
/// verb base form; fully inflected nominal cells always carry number, case
/// and gender, finite verb cells always carry number, case, person and mood.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Reading {
    pub surface: String,
    pub lemma: String,
    pub pos: PartOfSpeech,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case: Option<Case>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person: Option<Person>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tense: Option<Tense>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
}

impl Reading {
    /// Build a reading from one table cell.
    pub fn from_cell(lemma: &str, surface: &str, pos: PartOfSpeech, key: CellKey) -> Self {
        let mut reading = Reading {
            surface: surface.to_string(),
            lemma: lemma.to_string(),
            pos,
            number: None,
            case: None,
            gender: None,
            person: None,
            tense: None,
            mood: None,
        };
        match key {
            CellKey::Nominal {
                number,
                case,
                gender,
            } => {
                reading.number = Some(number);
                reading.case = Some(case);
                reading.gender = Some(gender);
            }
            CellKey::Finite {
                number,
                case,
                gender,
                person,
                tense,
                mood,
            } => {
                reading.number = Some(number);
                reading.case = Some(case);
                reading.gender = gender;
                reading.person = Some(person);
                reading.tense = tense;
                reading.mood = Some(mood);
            }
            CellKey::Infinitive => {}
        }
        reading
    }

    /// The (number, case, gender) triple of a fully inflected nominal form,
    /// or `None` for anything else.
    pub fn nominal_axes(&self) -> Option<(Number, Case, Gender)> {
        if self.pos == PartOfSpeech::Verb {
            return None;
        }
        Some((self.number?, self.case?, self.gender?))
    }

    /// Whether this is a conjugated verb form rather than the bare base form.
    pub fn is_conjugated(&self) -> bool {
        self.pos == PartOfSpeech::Verb && self.number.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_display_values() {
        // Reason text interpolates these, so they must stay the long
        // human-readable words.
        assert_eq!(Number::Singular.to_string(), "singular");
        assert_eq!(Case::Nominative.to_string(), "nominative");
        assert_eq!(Case::Instrumental.to_string(), "instrumental");
        assert_eq!(Gender::Neuter.to_string(), "neutral");
        assert_eq!(Person::Third.to_string(), "third");
        assert_eq!(Mood::Conditional.to_string(), "conditional");
        assert_eq!(PartOfSpeech::Adjective.to_string(), "adjective");
    }

    #[test]
    fn test_reading_from_nominal_cell() {
        let key = CellKey::Nominal {
            number: Number::Singular,
            case: Case::Nominative,
            gender: Gender::Masculine,
        };
        let reading = Reading::from_cell("pies", "pies", PartOfSpeech::Noun, key);
        assert_eq!(
            reading.nominal_axes(),
            Some((Number::Singular, Case::Nominative, Gender::Masculine))
        );
        assert_eq!(reading.person, None);
        assert!(!reading.is_conjugated());
    }

    #[test]
    fn test_reading_from_finite_cell() {
        let key = CellKey::Finite {
            number: Number::Singular,
            case: Case::Accusative,
            gender: None,
            person: Person::Third,
            tense: Some(Tense::Present),
            mood: Mood::Indicative,
        };
        let reading = Reading::from_cell("szczekać", "szczeka", PartOfSpeech::Verb, key);
        assert!(reading.is_conjugated());
        // Verb cells never count as nominal, even though they carry a case.
        assert_eq!(reading.nominal_axes(), None);
    }

    #[test]
    fn test_infinitive_reading_has_no_axes() {
        let reading =
            Reading::from_cell("szczekać", "szczekać", PartOfSpeech::Verb, CellKey::Infinitive);
        assert!(!reading.is_conjugated());
        assert_eq!(reading.number, None);
        assert_eq!(reading.case, None);
    }
}
