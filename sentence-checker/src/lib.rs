//! Agreement checking for a Polish subject–verb–object sentence fragment.
//!
//! Feed [`Checker::check_line`] the line being typed: it classifies each word
//! against the inflection lexicon, walks the subject, verb and object slots,
//! and stops at the first word that cannot agree with what came before it,
//! reporting where, why, and which lexicon forms would fit there instead.
//! Because an unfinished final word draws the same suggestions, the checker
//! doubles as an autocomplete source.

pub mod checker;
pub mod tokenize;
pub mod violation;

pub use checker::Checker;
pub use violation::{BlockViolation, PhraseRole, Reason, Violation};
