use std::io::{self, BufRead, Write};

use crate::application::WriteConfirmation;
use crate::domain::assets::ImageAsset;

/// Only an explicit "yes" (any case, surrounding whitespace ignored) counts
pub fn is_yes(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("yes")
}

/// Print `question` and read one line from `input`; EOF or a read error is a "no"
pub fn ask_yes<R: BufRead>(question: &str, input: &mut R) -> bool {
    println!("{}", question);
    println!("Type 'yes' to proceed, anything else to cancel:");
    let _ = io::stdout().flush();

    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) | Err(_) => false,
        Ok(_) => is_yes(&line),
    }
}

/// Blocking per-file overwrite prompt on standard input
pub struct StdinConfirmation;

impl WriteConfirmation for StdinConfirmation {
    fn confirm_overwrite(&self, asset: &ImageAsset, optimized_size: u64) -> bool {
        let question = format!(
            "Overwrite {} ({:.1} KB) with the optimized version ({:.1} KB)?",
            asset.file_name(),
            asset.size_kb(),
            optimized_size as f64 / 1024.0
        );
        ask_yes(&question, &mut io::stdin().lock())
    }
}
