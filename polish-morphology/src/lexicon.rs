//! The inflection lexicon: one table per part of speech, loaded once from a
//! tabular JSON source and immutable afterwards.
//!
//! Every query walks the cells in a fixed scan order: column-major over the
//! columns in the order the data file first declares them, rows in file
//! order. "First matching cell" therefore means the same thing on every call,
//! and suggestion lists come out in a stable, file-defined ranking.

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use crate::{Case, CellKey, ColumnError, Gender, Number, PartOfSpeech, Person, Reading, Tense};

/// A lexicon data file that could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    #[error("failed to read lexicon data")]
    Io(#[from] std::io::Error),
    #[error("malformed lexicon JSON")]
    Json(#[from] serde_json::Error),
    #[error("bad column in the {table} table, lemma `{lemma}`")]
    Column {
        table: PartOfSpeech,
        lemma: String,
        #[source]
        source: ColumnError,
    },
}

/// An axis filter for [`Lexicon::forms`]. A `None` axis means "any value of
/// this axis is acceptable", never "the axis must be absent". Verb cells
/// that do not mark gender or tense satisfy any gender/tense filter.
#[derive(Debug, Clone, Default)]
pub struct FormFilter {
    pub numbers: Option<Vec<Number>>,
    pub cases: Option<Vec<Case>>,
    pub genders: Option<Vec<Gender>>,
    pub persons: Option<Vec<Person>>,
    pub tenses: Option<Vec<Tense>>,
    /// Restrict to the lemma rows that contain this surface form in some
    /// cell. Used when suggesting a correction of the same word rather than
    /// an alternative word.
    pub same_word_as: Option<String>,
}

impl FormFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn case(mut self, case: Case) -> Self {
        self.cases = Some(vec![case]);
        self
    }

    pub fn numbers(mut self, numbers: impl IntoIterator<Item = Number>) -> Self {
        self.numbers = Some(numbers.into_iter().collect());
        self
    }

    pub fn genders(mut self, genders: impl IntoIterator<Item = Gender>) -> Self {
        self.genders = Some(genders.into_iter().collect());
        self
    }

    pub fn person(mut self, person: Person) -> Self {
        self.persons = Some(vec![person]);
        self
    }

    pub fn same_word_as(mut self, surface: &str) -> Self {
        self.same_word_as = Some(surface.to_string());
        self
    }

    /// Whether a cell satisfies every axis constraint. The base-form column
    /// never does: filters describe inflected cells only.
    fn matches(&self, key: &CellKey) -> bool {
        fn allowed<T: PartialEq>(allowed: &Option<Vec<T>>, value: T) -> bool {
            allowed.as_ref().is_none_or(|values| values.contains(&value))
        }
        fn allowed_opt<T: PartialEq>(values: &Option<Vec<T>>, value: Option<T>) -> bool {
            match value {
                Some(value) => allowed(values, value),
                None => true,
            }
        }
        match *key {
            CellKey::Nominal {
                number,
                case,
                gender,
            } => {
                allowed(&self.numbers, number)
                    && allowed(&self.cases, case)
                    && allowed(&self.genders, gender)
            }
            CellKey::Finite {
                number,
                case,
                gender,
                person,
                tense,
                mood: _,
            } => {
                allowed(&self.numbers, number)
                    && allowed(&self.cases, case)
                    && allowed_opt(&self.genders, gender)
                    && allowed(&self.persons, person)
                    && allowed_opt(&self.tenses, tense)
            }
            CellKey::Infinitive => false,
        }
    }
}

/// One cell of a table: a surface form at a (lemma row, column) position.
#[derive(Debug, Clone)]
struct Cell {
    row: usize,
    key: CellKey,
    surface: String,
}

/// The inflection table of one part of speech.
#[derive(Debug)]
struct Table {
    pos: PartOfSpeech,
    lemmas: Vec<String>,
    /// All cells in scan order: column-major, columns in first-seen file
    /// order (the base-form column first for verbs), rows in file order.
    cells: Vec<Cell>,
    /// Surface form -> indices into `cells`, each list in scan order.
    by_surface: FxHashMap<String, Vec<usize>>,
}

impl Table {
    fn build(
        pos: PartOfSpeech,
        raw: IndexMap<String, IndexMap<String, String>>,
    ) -> Result<Table, LexiconError> {
        let mut columns: IndexSet<CellKey> = IndexSet::new();
        if pos == PartOfSpeech::Verb {
            columns.insert(CellKey::Infinitive);
        }

        let mut lemmas = Vec::with_capacity(raw.len());
        let mut rows: Vec<FxHashMap<CellKey, String>> = Vec::with_capacity(raw.len());
        for (lemma, row) in raw {
            let mut cells = FxHashMap::default();
            if pos == PartOfSpeech::Verb {
                cells.insert(CellKey::Infinitive, lemma.clone());
            }
            for (column, surface) in row {
                if surface.trim().is_empty() {
                    continue;
                }
                let key = CellKey::parse(pos, &column).map_err(|source| LexiconError::Column {
                    table: pos,
                    lemma: lemma.clone(),
                    source,
                })?;
                columns.insert(key);
                cells.insert(key, surface);
            }
            lemmas.push(lemma);
            rows.push(cells);
        }

        let mut cells = Vec::new();
        for key in &columns {
            for (row, row_cells) in rows.iter().enumerate() {
                if let Some(surface) = row_cells.get(key) {
                    cells.push(Cell {
                        row,
                        key: *key,
                        surface: surface.clone(),
                    });
                }
            }
        }

        let mut by_surface: FxHashMap<String, Vec<usize>> = FxHashMap::default();
        for (index, cell) in cells.iter().enumerate() {
            by_surface.entry(cell.surface.clone()).or_default().push(index);
        }

        log::debug!("loaded {} table: {} lemmas, {} cells", pos, lemmas.len(), cells.len());
        Ok(Table {
            pos,
            lemmas,
            cells,
            by_surface,
        })
    }

    fn reading(&self, cell: &Cell) -> Reading {
        Reading::from_cell(&self.lemmas[cell.row], &cell.surface, self.pos, cell.key)
    }

    fn lookup(&self, surface: &str) -> Option<Reading> {
        let indices = self.by_surface.get(surface)?;
        indices.first().map(|&index| self.reading(&self.cells[index]))
    }

    fn readings(&self, surface: &str) -> Vec<Reading> {
        self.by_surface
            .get(surface)
            .into_iter()
            .flatten()
            .map(|&index| self.reading(&self.cells[index]))
            .collect()
    }

    /// The lemma rows that contain `surface` in some cell.
    fn rows_containing(&self, surface: &str) -> BTreeSet<usize> {
        self.by_surface
            .get(surface)
            .into_iter()
            .flatten()
            .map(|&index| self.cells[index].row)
            .collect()
    }

    fn forms(&self, filter: &FormFilter) -> Vec<Reading> {
        let rows = filter
            .same_word_as
            .as_deref()
            .map(|surface| self.rows_containing(surface));
        self.cells
            .iter()
            .filter(|cell| match &rows {
                Some(rows) => rows.contains(&cell.row),
                None => true,
            })
            .filter(|cell| filter.matches(&cell.key))
            .map(|cell| self.reading(cell))
            .collect()
    }
}

/// Raw shape of the lexicon data file. `IndexMap` keeps the declaration
/// order, which defines the fixed scan order of every query.
#[derive(serde::Deserialize)]
struct RawLexicon {
    #[serde(default)]
    nouns: IndexMap<String, IndexMap<String, String>>,
    #[serde(default)]
    verbs: IndexMap<String, IndexMap<String, String>>,
    #[serde(default)]
    adjectives: IndexMap<String, IndexMap<String, String>>,
    #[serde(default)]
    pronouns: IndexMap<String, IndexMap<String, String>>,
}

/// The full inflection lexicon. Built once, never mutated; share it by
/// reference from as many threads as you like.
#[derive(Debug)]
pub struct Lexicon {
    nouns: Table,
    verbs: Table,
    adjectives: Table,
    pronouns: Table,
}

impl Lexicon {
    pub fn from_json_str(json: &str) -> Result<Lexicon, LexiconError> {
        let raw: RawLexicon = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    pub fn from_reader(reader: impl Read) -> Result<Lexicon, LexiconError> {
        let raw: RawLexicon = serde_json::from_reader(reader)?;
        Self::from_raw(raw)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Lexicon, LexiconError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    fn from_raw(raw: RawLexicon) -> Result<Lexicon, LexiconError> {
        Ok(Lexicon {
            nouns: Table::build(PartOfSpeech::Noun, raw.nouns)?,
            verbs: Table::build(PartOfSpeech::Verb, raw.verbs)?,
            adjectives: Table::build(PartOfSpeech::Adjective, raw.adjectives)?,
            pronouns: Table::build(PartOfSpeech::Pronoun, raw.pronouns)?,
        })
    }

    fn table(&self, pos: PartOfSpeech) -> &Table {
        match pos {
            PartOfSpeech::Noun => &self.nouns,
            PartOfSpeech::Verb => &self.verbs,
            PartOfSpeech::Adjective => &self.adjectives,
            PartOfSpeech::Pronoun => &self.pronouns,
        }
    }

    /// The first cell in scan order whose surface form is `surface`.
    ///
    /// A genuinely ambiguous surface form has other readings this call will
    /// never show; use [`Lexicon::readings`] when they matter.
    pub fn lookup(&self, pos: PartOfSpeech, surface: &str) -> Option<Reading> {
        self.table(pos).lookup(surface)
    }

    /// Every cell whose surface form is `surface`, in scan order.
    pub fn readings(&self, pos: PartOfSpeech, surface: &str) -> Vec<Reading> {
        self.table(pos).readings(surface)
    }

    /// Every inflected cell satisfying the filter, in scan order. An
    /// unsatisfiable filter yields an empty list, not an error.
    pub fn forms(&self, pos: PartOfSpeech, filter: &FormFilter) -> Vec<Reading> {
        self.table(pos).forms(filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Lexicon {
        Lexicon::from_json_str(
            r#"{
                "nouns": {
                    "pies": {
                        "SG_NOM_M": "pies",
                        "SG_GEN_M": "psa",
                        "SG_ACC_M": "psa",
                        "PL_NOM_M": "psy"
                    },
                    "kość": {
                        "SG_NOM_F": "kość",
                        "SG_GEN_F": "kości",
                        "SG_ACC_F": "kość",
                        "PL_NOM_F": "kości"
                    }
                },
                "verbs": {
                    "szczekać": {
                        "SG_ACC_-_3_PRES_IND": "szczeka",
                        "PL_ACC_-_3_PRES_IND": "szczekają",
                        "SG_ACC_M_3_PAST_IND": "szczekał",
                        "SG_ACC_F_3_PAST_IND": "szczekała"
                    }
                },
                "adjectives": {
                    "czarny": {
                        "SG_NOM_M": "czarny",
                        "SG_NOM_F": "czarna",
                        "SG_NOM_N": "czarne",
                        "PL_NOM_M": "czarne",
                        "PL_NOM_F": "czarne"
                    }
                },
                "pronouns": {}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_lookup_returns_first_cell_in_scan_order() {
        let lexicon = sample();
        // "psa" fills both the genitive and accusative cells; the genitive
        // column is declared first, so that is the one reading surfaced.
        let reading = lexicon.lookup(PartOfSpeech::Noun, "psa").unwrap();
        assert_eq!(reading.case, Some(Case::Genitive));
        assert_eq!(reading.lemma, "pies");
    }

    #[test]
    fn test_readings_returns_every_cell() {
        let lexicon = sample();
        let readings = lexicon.readings(PartOfSpeech::Noun, "kość");
        let cases: Vec<Option<Case>> = readings.iter().map(|r| r.case).collect();
        assert_eq!(cases, vec![Some(Case::Nominative), Some(Case::Accusative)]);

        // One adjective spelling serving three cells across two numbers.
        let readings = lexicon.readings(PartOfSpeech::Adjective, "czarne");
        assert_eq!(readings.len(), 3);
    }

    #[test]
    fn test_lookup_missing_surface() {
        let lexicon = sample();
        assert_eq!(lexicon.lookup(PartOfSpeech::Noun, "xyzzy"), None);
        assert!(lexicon.readings(PartOfSpeech::Noun, "xyzzy").is_empty());
    }

    #[test]
    fn test_forms_wildcard_axis_means_any() {
        let lexicon = sample();
        let nominative = lexicon.forms(
            PartOfSpeech::Noun,
            &FormFilter::new().case(Case::Nominative),
        );
        let surfaces: Vec<&str> = nominative.iter().map(|r| r.surface.as_str()).collect();
        // Scan order: column by column in first-seen order, rows in file
        // order. The masculine columns all come from the first row, so they
        // precede the feminine ones.
        assert_eq!(surfaces, vec!["pies", "psy", "kość", "kości"]);
    }

    #[test]
    fn test_forms_same_word_restricts_to_lemma_rows() {
        let lexicon = sample();
        let fixes = lexicon.forms(
            PartOfSpeech::Noun,
            &FormFilter::new().case(Case::Nominative).same_word_as("psa"),
        );
        let surfaces: Vec<&str> = fixes.iter().map(|r| r.surface.as_str()).collect();
        assert_eq!(surfaces, vec!["pies", "psy"]);
    }

    #[test]
    fn test_forms_genderless_verb_cell_matches_any_gender_filter() {
        let lexicon = sample();
        let forms = lexicon.forms(
            PartOfSpeech::Verb,
            &FormFilter::new()
                .genders([Gender::Masculine])
                .person(Person::Third)
                .numbers([Number::Singular]),
        );
        let surfaces: Vec<&str> = forms.iter().map(|r| r.surface.as_str()).collect();
        // "szczeka" marks no gender and passes; "szczekała" is feminine and
        // does not.
        assert_eq!(surfaces, vec!["szczeka", "szczekał"]);
    }

    #[test]
    fn test_forms_never_return_the_base_form() {
        let lexicon = sample();
        let forms = lexicon.forms(PartOfSpeech::Verb, &FormFilter::new());
        assert!(forms.iter().all(|r| r.surface != "szczekać"));
    }

    #[test]
    fn test_base_form_is_still_retrievable_by_lookup() {
        let lexicon = sample();
        let reading = lexicon.lookup(PartOfSpeech::Verb, "szczekać").unwrap();
        assert!(!reading.is_conjugated());
        assert_eq!(reading.lemma, "szczekać");
        assert_eq!(reading.mood, None);
    }

    #[test]
    fn test_empty_cells_are_skipped() {
        let lexicon = Lexicon::from_json_str(
            r#"{"nouns": {"pies": {"SG_NOM_M": "pies", "SG_VOC_M": ""}}}"#,
        )
        .unwrap();
        assert_eq!(
            lexicon.forms(PartOfSpeech::Noun, &FormFilter::new()).len(),
            1
        );
    }

    #[test]
    fn test_bad_column_is_a_load_error() {
        let err = Lexicon::from_json_str(r#"{"nouns": {"pies": {"SG_NOM": "pies"}}}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            LexiconError::Column {
                table: PartOfSpeech::Noun,
                ..
            }
        ));
    }
}
