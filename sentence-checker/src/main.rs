use anyhow::Context as _;
use std::io::Read as _;

use polish_morphology::Lexicon;
use sentence_checker::Checker;

/// Check a block of text against a lexicon and print the first violation.
///
/// Usage: `sentence-checker <lexicon.json> [text-file]`. With no text file,
/// reads the text from stdin.
fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let lexicon_path = args
        .next()
        .unwrap_or_else(|| "sentence-checker/data/lexicon.json".to_string());
    let lexicon = Lexicon::from_path(&lexicon_path)
        .with_context(|| format!("loading lexicon from {lexicon_path}"))?;

    let text = match args.next() {
        Some(path) => {
            std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?
        }
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            text
        }
    };

    let checker = Checker::new(&lexicon);
    match checker.check_block(&text) {
        None => println!("ok"),
        Some(found) => {
            let v = &found.violation;
            println!("row {}, position {}, length {}", found.row, v.position, v.length);
            println!("{}", v.reason);
            let forms = v.expected_forms();
            if !forms.is_empty() {
                log::info!("{} candidate forms", forms.len());
                println!("expected: {}", forms.join(", "));
            }
        }
    }
    Ok(())
}
