//! Column identifiers of the inflection tables.
//!
//! The lexicon data format names each table column after the cell it holds:
//! `SG_NOM_M` for nominal tables, `SG_ACC_-_3_PRES_IND` for verb tables
//! (gender and tense may be `-` when the form does not mark them). Verb
//! tables additionally have an implicit leading base-form column.

use crate::{Case, Gender, Mood, Number, PartOfSpeech, Person, Tense};

/// Typed identifier of one inflection-table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKey {
    /// A noun/adjective/pronoun cell.
    Nominal {
        number: Number,
        case: Case,
        gender: Gender,
    },
    /// A conjugated verb cell. The `case` is the case this form governs in
    /// its object.
    Finite {
        number: Number,
        case: Case,
        gender: Option<Gender>,
        person: Person,
        tense: Option<Tense>,
        mood: Mood,
    },
    /// The base-form column of a verb table.
    Infinitive,
}

/// A column name that does not follow the encoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColumnError {
    #[error("column `{column}` has {got} `_`-separated segments, expected {expected}")]
    SegmentCount {
        column: String,
        expected: usize,
        got: usize,
    },
    #[error("column `{column}` has an unrecognized {axis} tag `{tag}`")]
    UnknownTag {
        column: String,
        axis: &'static str,
        tag: String,
    },
}

impl CellKey {
    /// Parse a column name for the given table.
    pub fn parse(pos: PartOfSpeech, column: &str) -> Result<Self, ColumnError> {
        match pos {
            PartOfSpeech::Verb => Self::parse_finite(column),
            PartOfSpeech::Noun | PartOfSpeech::Adjective | PartOfSpeech::Pronoun => {
                Self::parse_nominal(column)
            }
        }
    }

    fn parse_nominal(column: &str) -> Result<Self, ColumnError> {
        let segments: Vec<&str> = column.split('_').collect();
        let &[number, case, gender] = segments.as_slice() else {
            return Err(ColumnError::SegmentCount {
                column: column.to_string(),
                expected: 3,
                got: segments.len(),
            });
        };
        Ok(CellKey::Nominal {
            number: number_tag(column, number)?,
            case: case_tag(column, case)?,
            gender: gender_tag(column, gender)?,
        })
    }

    fn parse_finite(column: &str) -> Result<Self, ColumnError> {
        let segments: Vec<&str> = column.split('_').collect();
        let &[number, case, gender, person, tense, mood] = segments.as_slice() else {
            return Err(ColumnError::SegmentCount {
                column: column.to_string(),
                expected: 6,
                got: segments.len(),
            });
        };
        Ok(CellKey::Finite {
            number: number_tag(column, number)?,
            case: case_tag(column, case)?,
            gender: placeholder(gender)
                .map(|tag| gender_tag(column, tag))
                .transpose()?,
            person: person_tag(column, person)?,
            tense: placeholder(tense)
                .map(|tag| tense_tag(column, tag))
                .transpose()?,
            mood: mood_tag(column, mood)?,
        })
    }
}

impl std::fmt::Display for CellKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellKey::Nominal {
                number,
                case,
                gender,
            } => write!(
                f,
                "{}_{}_{}",
                number_name(*number),
                case_name(*case),
                gender_name(*gender)
            ),
            CellKey::Finite {
                number,
                case,
                gender,
                person,
                tense,
                mood,
            } => write!(
                f,
                "{}_{}_{}_{}_{}_{}",
                number_name(*number),
                case_name(*case),
                gender.map_or("-", gender_name),
                person_name(*person),
                tense.map_or("-", tense_name),
                mood_name(*mood)
            ),
            CellKey::Infinitive => write!(f, "INF"),
        }
    }
}

/// `-` marks an axis the form does not inflect for.
fn placeholder(tag: &str) -> Option<&str> {
    (tag != "-").then_some(tag)
}

fn number_tag(column: &str, tag: &str) -> Result<Number, ColumnError> {
    match tag {
        "SG" => Ok(Number::Singular),
        "PL" => Ok(Number::Plural),
        _ => Err(unknown(column, "number", tag)),
    }
}

fn case_tag(column: &str, tag: &str) -> Result<Case, ColumnError> {
    match tag {
        "NOM" => Ok(Case::Nominative),
        "GEN" => Ok(Case::Genitive),
        "DAT" => Ok(Case::Dative),
        "ACC" => Ok(Case::Accusative),
        "INS" => Ok(Case::Instrumental),
        "LOC" => Ok(Case::Locative),
        "VOC" => Ok(Case::Vocative),
        _ => Err(unknown(column, "case", tag)),
    }
}

fn gender_tag(column: &str, tag: &str) -> Result<Gender, ColumnError> {
    match tag {
        "M" => Ok(Gender::Masculine),
        "F" => Ok(Gender::Feminine),
        "N" => Ok(Gender::Neuter),
        _ => Err(unknown(column, "gender", tag)),
    }
}

fn person_tag(column: &str, tag: &str) -> Result<Person, ColumnError> {
    match tag {
        "1" => Ok(Person::First),
        "2" => Ok(Person::Second),
        "3" => Ok(Person::Third),
        _ => Err(unknown(column, "person", tag)),
    }
}

fn tense_tag(column: &str, tag: &str) -> Result<Tense, ColumnError> {
    match tag {
        "PRES" => Ok(Tense::Present),
        "PAST" => Ok(Tense::Past),
        _ => Err(unknown(column, "tense", tag)),
    }
}

fn mood_tag(column: &str, tag: &str) -> Result<Mood, ColumnError> {
    match tag {
        "IND" => Ok(Mood::Indicative),
        "PRE" => Ok(Mood::Conditional),
        _ => Err(unknown(column, "mood", tag)),
    }
}

fn number_name(number: Number) -> &'static str {
    match number {
        Number::Singular => "SG",
        Number::Plural => "PL",
    }
}

fn case_name(case: Case) -> &'static str {
    match case {
        Case::Nominative => "NOM",
        Case::Genitive => "GEN",
        Case::Dative => "DAT",
        Case::Accusative => "ACC",
        Case::Instrumental => "INS",
        Case::Locative => "LOC",
        Case::Vocative => "VOC",
    }
}

fn gender_name(gender: Gender) -> &'static str {
    match gender {
        Gender::Masculine => "M",
        Gender::Feminine => "F",
        Gender::Neuter => "N",
    }
}

fn person_name(person: Person) -> &'static str {
    match person {
        Person::First => "1",
        Person::Second => "2",
        Person::Third => "3",
    }
}

fn tense_name(tense: Tense) -> &'static str {
    match tense {
        Tense::Present => "PRES",
        Tense::Past => "PAST",
    }
}

fn mood_name(mood: Mood) -> &'static str {
    match mood {
        Mood::Indicative => "IND",
        Mood::Conditional => "PRE",
    }
}

fn unknown(column: &str, axis: &'static str, tag: &str) -> ColumnError {
    ColumnError::UnknownTag {
        column: column.to_string(),
        axis,
        tag: tag.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nominal_column() {
        let key = CellKey::parse(PartOfSpeech::Noun, "SG_NOM_M").unwrap();
        assert_eq!(
            key,
            CellKey::Nominal {
                number: Number::Singular,
                case: Case::Nominative,
                gender: Gender::Masculine,
            }
        );
        assert_eq!(key.to_string(), "SG_NOM_M");
    }

    #[test]
    fn test_parse_finite_column_with_placeholders() {
        let key = CellKey::parse(PartOfSpeech::Verb, "SG_ACC_-_3_PRES_IND").unwrap();
        assert_eq!(
            key,
            CellKey::Finite {
                number: Number::Singular,
                case: Case::Accusative,
                gender: None,
                person: Person::Third,
                tense: Some(Tense::Present),
                mood: Mood::Indicative,
            }
        );
        assert_eq!(key.to_string(), "SG_ACC_-_3_PRES_IND");
    }

    #[test]
    fn test_parse_finite_column_with_gender() {
        let key = CellKey::parse(PartOfSpeech::Verb, "PL_GEN_F_3_PAST_PRE").unwrap();
        assert_eq!(
            key,
            CellKey::Finite {
                number: Number::Plural,
                case: Case::Genitive,
                gender: Some(Gender::Feminine),
                person: Person::Third,
                tense: Some(Tense::Past),
                mood: Mood::Conditional,
            }
        );
    }

    #[test]
    fn test_segment_count_mismatch() {
        // A verb column name in a noun table and vice versa are both errors.
        assert!(matches!(
            CellKey::parse(PartOfSpeech::Noun, "SG_NOM_M_3_PRES_IND"),
            Err(ColumnError::SegmentCount {
                expected: 3,
                got: 6,
                ..
            })
        ));
        assert!(matches!(
            CellKey::parse(PartOfSpeech::Verb, "SG_NOM_M"),
            Err(ColumnError::SegmentCount {
                expected: 6,
                got: 3,
                ..
            })
        ));
    }

    #[test]
    fn test_unknown_tag() {
        let err = CellKey::parse(PartOfSpeech::Pronoun, "SG_NOM_X").unwrap_err();
        assert_eq!(
            err,
            ColumnError::UnknownTag {
                column: "SG_NOM_X".to_string(),
                axis: "gender",
                tag: "X".to_string(),
            }
        );
    }
}
