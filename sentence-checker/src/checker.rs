//! The three-phase agreement state machine.
//!
//! A line is consumed as subject phrase, verb, object phrase, in that order.
//! Within a nominal phrase the admissible (gender, number, case) values
//! narrow with every token; the verb must agree with whatever the subject
//! phrase left admissible, and the object phrase must stand in the case the
//! verb governs. The machine stops at the first token it cannot accept and
//! reports it; running out of tokens mid-sentence is not an error, because
//! the line may simply still be being typed.

use polish_morphology::{
    Case, FormFilter, Gender, Lexicon, Number, PartOfSpeech, Person, Reading,
};
use std::borrow::Cow;
use std::collections::BTreeSet;

use crate::tokenize::{Token, classify, tokenize};
use crate::violation::{BlockViolation, PhraseRole, Reason, Violation};

/// The agreement checker. Borrows an immutable lexicon; a single lexicon can
/// back any number of checkers on any number of threads.
pub struct Checker<'a> {
    lexicon: &'a Lexicon,
}

/// The admissible agreement values accumulated across the tokens of one
/// nominal phrase so far. Seeded by the phrase's first token, narrowed by
/// every following one, and started fresh for the object phrase.
#[derive(Debug)]
struct CandidateSets {
    genders: BTreeSet<Gender>,
    numbers: BTreeSet<Number>,
    cases: BTreeSet<Case>,
}

impl CandidateSets {
    fn seed(required: Case, axes: &[(Number, Gender)]) -> Self {
        CandidateSets {
            genders: axes.iter().map(|&(_, gender)| gender).collect(),
            numbers: axes.iter().map(|&(number, _)| number).collect(),
            cases: BTreeSet::from([required]),
        }
    }

    /// Replace the sets with the values of the readings that survived the
    /// latest token. The survivors were drawn from the current sets, so this
    /// is an intersection.
    fn narrow(&mut self, axes: &[(Number, Gender)]) {
        self.genders = axes.iter().map(|&(_, gender)| gender).collect();
        self.numbers = axes.iter().map(|&(number, _)| number).collect();
    }

    fn gender_list(&self) -> Vec<Gender> {
        self.genders.iter().copied().collect()
    }

    fn number_list(&self) -> Vec<Number> {
        self.numbers.iter().copied().collect()
    }
}

/// Cursor over the tokens of one line.
struct TokenStream<'t, 'a> {
    tokens: &'t [Token<'a>],
    index: usize,
}

impl<'t, 'a> TokenStream<'t, 'a> {
    fn new(tokens: &'t [Token<'a>]) -> Self {
        TokenStream { tokens, index: 0 }
    }

    fn next(&mut self) -> Option<&'t Token<'a>> {
        let token = self.tokens.get(self.index)?;
        self.index += 1;
        Some(token)
    }
}

fn violation(token: &Token<'_>, reason: Reason, expected: Vec<Reading>) -> Violation {
    Violation {
        position: token.position,
        length: token.length,
        expected,
        reason,
    }
}

impl<'a> Checker<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Checker { lexicon }
    }

    /// Check a single line. `None` means no violation was found in the
    /// consumed prefix: either the sentence is complete and valid, or it is
    /// valid so far and the user is still typing.
    pub fn check_line(&self, line: &str) -> Option<Violation> {
        let tokens = tokenize(line);
        let mut stream = TokenStream::new(&tokens);
        self.run(&mut stream).err()
    }

    /// Check a block of text line by line and report the first row with a
    /// violation. `None` only if every row is clean.
    pub fn check_block(&self, text: &str) -> Option<BlockViolation> {
        let lines: Vec<&str> = text.split('\n').collect();
        let last = lines.len() - 1;
        for (row, &line) in lines.iter().enumerate() {
            // Every split line but the last had a terminator; restore it so
            // its final token is not treated as still in progress.
            let line: Cow<'_, str> = if row == last {
                Cow::Borrowed(line)
            } else {
                Cow::Owned(format!("{line}\n"))
            };
            if let Some(violation) = self.check_line(&line) {
                return Some(BlockViolation { row, violation });
            }
        }
        None
    }

    fn run(&self, stream: &mut TokenStream<'_, '_>) -> Result<(), Violation> {
        let Some(subject) = self.nominal_phase(stream, PhraseRole::Subject, Case::Nominative)?
        else {
            return Ok(());
        };
        let Some(governed) = self.verb_phase(stream, &subject)? else {
            return Ok(());
        };
        self.nominal_phase(stream, PhraseRole::Object, governed)?;
        Ok(())
    }

    /// Consume one nominal phrase (1–3 tokens). `Ok(None)` means the token
    /// stream ran out cleanly mid-phrase; `Ok(Some)` carries the agreement
    /// values the phrase settled on.
    fn nominal_phase(
        &self,
        stream: &mut TokenStream<'_, '_>,
        role: PhraseRole,
        required: Case,
    ) -> Result<Option<CandidateSets>, Violation> {
        let Some(token) = stream.next() else {
            return Ok(None);
        };
        let Some(first) = classify(self.lexicon, token) else {
            return Err(self.unknown_phrase_start(token, required));
        };
        if first.pos == PartOfSpeech::Verb {
            return Err(violation(token, Reason::PhraseStartsWithVerb(role), Vec::new()));
        }
        let axes = self.case_matched_axes(first.pos, token.text, required);
        if axes.is_empty() {
            let actual = first.case.unwrap_or(required);
            return Err(violation(
                token,
                Reason::WrongCase {
                    role,
                    required,
                    actual,
                },
                self.same_word_fixes(first.pos, token.text, required),
            ));
        }
        let mut state = CandidateSets::seed(required, &axes);
        log::debug!(
            "{role} head `{}`: genders {:?}, numbers {:?}",
            token.text,
            state.genders,
            state.numbers
        );
        if first.pos == PartOfSpeech::Noun {
            // A bare noun is a complete phrase.
            return Ok(Some(state));
        }

        // Modifier slots: a pronoun may be followed by a noun or one
        // adjective-then-noun; an adjective only by a noun.
        let mut after = first.pos;
        loop {
            let Some(token) = stream.next() else {
                return Ok(None);
            };
            let Some(next) = classify(self.lexicon, token) else {
                return Err(self.unknown_phrase_continuation(token, after, required, &state));
            };
            match (after, next.pos) {
                (PartOfSpeech::Pronoun, PartOfSpeech::Noun | PartOfSpeech::Adjective)
                | (PartOfSpeech::Adjective, PartOfSpeech::Noun) => {
                    self.agree(token, &next, role, required, &mut state)?;
                    if next.pos == PartOfSpeech::Noun {
                        return Ok(Some(state));
                    }
                    after = PartOfSpeech::Adjective;
                }
                (PartOfSpeech::Pronoun, actual) => {
                    return Err(violation(token, Reason::AfterPronoun { actual }, Vec::new()));
                }
                (_, actual) => {
                    return Err(violation(token, Reason::AfterAdjective { actual }, Vec::new()));
                }
            }
        }
    }

    /// Check a follow-up phrase token against the running candidate sets and
    /// narrow them.
    fn agree(
        &self,
        token: &Token<'_>,
        reading: &Reading,
        role: PhraseRole,
        required: Case,
        state: &mut CandidateSets,
    ) -> Result<(), Violation> {
        let cased = self.case_matched_axes(reading.pos, token.text, required);
        if cased.is_empty() {
            let actual = reading.case.unwrap_or(required);
            return Err(violation(
                token,
                Reason::WrongCase {
                    role,
                    required,
                    actual,
                },
                self.same_word_fixes(reading.pos, token.text, required),
            ));
        }
        // A reading survives only if it satisfies case, gender and number at
        // once; testing the axes one at a time would admit a token with no
        // single consistent reading.
        let surviving: Vec<(Number, Gender)> = cased
            .iter()
            .copied()
            .filter(|(number, gender)| {
                state.numbers.contains(number) && state.genders.contains(gender)
            })
            .collect();
        if surviving.is_empty() {
            let fixes = self.phrase_fixes(reading.pos, token.text, required, state);
            // Report the axis the first reading actually conflicts on.
            let (number, gender) = cased[0];
            if !state.genders.contains(&gender) {
                return Err(violation(
                    token,
                    Reason::PhraseGenderMismatch {
                        pos: reading.pos,
                        expected: state.gender_list(),
                        actual: gender,
                    },
                    fixes,
                ));
            }
            return Err(violation(
                token,
                Reason::PhraseNumberMismatch {
                    pos: reading.pos,
                    expected: state.number_list(),
                    actual: number,
                },
                fixes,
            ));
        }
        state.narrow(&surviving);
        Ok(())
    }

    /// Consume the verb slot. `Ok(Some)` carries the case the verb governs,
    /// which the object phrase must stand in.
    fn verb_phase(
        &self,
        stream: &mut TokenStream<'_, '_>,
        subject: &CandidateSets,
    ) -> Result<Option<Case>, Violation> {
        let Some(token) = stream.next() else {
            return Ok(None);
        };
        let Some(reading) = classify(self.lexicon, token) else {
            return Err(violation(
                token,
                Reason::UnrecognizedWord,
                self.verb_suggestions(subject, None, Some(token.text)),
            ));
        };
        if reading.pos != PartOfSpeech::Verb {
            return Err(violation(
                token,
                Reason::ExpectedVerb {
                    actual: reading.pos,
                },
                Vec::new(),
            ));
        }
        let fixes = self.verb_suggestions(subject, Some(token.text), None);
        let (Some(number), Some(person), Some(governed)) =
            (reading.number, reading.person, reading.case)
        else {
            // Only the bare base form lacks these axes.
            return Err(violation(token, Reason::NotConjugated, fixes));
        };
        if !subject.numbers.contains(&number) {
            return Err(violation(
                token,
                Reason::VerbNumberMismatch {
                    expected: subject.number_list(),
                    actual: number,
                },
                fixes,
            ));
        }
        if let Some(gender) = reading.gender {
            // Many verb forms do not mark gender; those agree with anything.
            if !subject.genders.contains(&gender) {
                return Err(violation(
                    token,
                    Reason::VerbGenderMismatch {
                        expected: subject.gender_list(),
                        actual: gender,
                    },
                    fixes,
                ));
            }
        }
        if person != Person::Third {
            return Err(violation(
                token,
                Reason::NotThirdPerson { actual: person },
                fixes,
            ));
        }
        log::debug!("verb `{}` governs the {governed} case", token.text);
        Ok(Some(governed))
    }

    /// The (number, gender) pairs of the token's readings that stand in the
    /// required case.
    fn case_matched_axes(
        &self,
        pos: PartOfSpeech,
        surface: &str,
        required: Case,
    ) -> Vec<(Number, Gender)> {
        self.lexicon
            .readings(pos, surface)
            .iter()
            .filter_map(|reading| reading.nominal_axes())
            .filter(|&(_, case, _)| case == required)
            .map(|(number, _, gender)| (number, gender))
            .collect()
    }

    fn unknown_phrase_start(&self, token: &Token<'_>, required: Case) -> Violation {
        let fixes = self.prefix_forms(
            &[
                PartOfSpeech::Noun,
                PartOfSpeech::Adjective,
                PartOfSpeech::Pronoun,
            ],
            token.text,
            FormFilter::new().case(required),
        );
        violation(token, Reason::UnrecognizedWord, fixes)
    }

    fn unknown_phrase_continuation(
        &self,
        token: &Token<'_>,
        after: PartOfSpeech,
        required: Case,
        state: &CandidateSets,
    ) -> Violation {
        let allowed: &[PartOfSpeech] = match after {
            PartOfSpeech::Pronoun => &[PartOfSpeech::Noun, PartOfSpeech::Adjective],
            _ => &[PartOfSpeech::Noun],
        };
        let filter = FormFilter::new()
            .case(required)
            .genders(state.genders.iter().copied())
            .numbers(state.numbers.iter().copied());
        violation(
            token,
            Reason::UnrecognizedWord,
            self.prefix_forms(allowed, token.text, filter),
        )
    }

    /// Forms of the same word in the required case, keeping to the genders
    /// and numbers the word is attested in.
    fn same_word_fixes(&self, pos: PartOfSpeech, surface: &str, required: Case) -> Vec<Reading> {
        let readings = self.lexicon.readings(pos, surface);
        let genders: BTreeSet<Gender> = readings.iter().filter_map(|r| r.gender).collect();
        let numbers: BTreeSet<Number> = readings.iter().filter_map(|r| r.number).collect();
        self.lexicon.forms(
            pos,
            &FormFilter::new()
                .case(required)
                .same_word_as(surface)
                .genders(genders)
                .numbers(numbers),
        )
    }

    /// Forms of the same word that would fit the phrase as narrowed so far.
    fn phrase_fixes(
        &self,
        pos: PartOfSpeech,
        surface: &str,
        required: Case,
        state: &CandidateSets,
    ) -> Vec<Reading> {
        self.lexicon.forms(
            pos,
            &FormFilter::new()
                .case(required)
                .same_word_as(surface)
                .genders(state.genders.iter().copied())
                .numbers(state.numbers.iter().copied()),
        )
    }

    /// Third-person verb forms agreeing with the subject; optionally only
    /// forms of one word, optionally only completions of a prefix.
    fn verb_suggestions(
        &self,
        subject: &CandidateSets,
        same_word: Option<&str>,
        prefix: Option<&str>,
    ) -> Vec<Reading> {
        let mut filter = FormFilter::new()
            .person(Person::Third)
            .genders(subject.genders.iter().copied())
            .numbers(subject.numbers.iter().copied());
        if let Some(word) = same_word {
            filter = filter.same_word_as(word);
        }
        let forms = self.lexicon.forms(PartOfSpeech::Verb, &filter);
        match prefix {
            Some(prefix) => forms
                .into_iter()
                .filter(|r| r.surface.starts_with(prefix))
                .collect(),
            None => forms,
        }
    }

    fn prefix_forms(
        &self,
        set: &[PartOfSpeech],
        prefix: &str,
        filter: FormFilter,
    ) -> Vec<Reading> {
        set.iter()
            .flat_map(|&pos| self.lexicon.forms(pos, &filter))
            .filter(|r| r.surface.starts_with(prefix))
            .collect()
    }
}
