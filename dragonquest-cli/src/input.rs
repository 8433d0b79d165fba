//! Input boundary: reads lines, validates numbers, re-prompts on bad input.
use std::io::{self, BufRead, Write};

use colored::Colorize;
use dragonquest_game::Pick;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChoiceError {
    #[error("Please enter a number!")]
    Empty,
    #[error("That's not a number! Please enter a number.")]
    NotANumber,
    #[error("Please enter a number between 1 and {max}.")]
    OutOfRange { max: usize },
}

/// Validate a menu choice against `[1, max]`.
///
/// # Errors
///
/// Returns the reason the input was rejected.
pub fn parse_choice(input: &str, max: usize) -> Result<usize, ChoiceError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ChoiceError::Empty);
    }
    let number: i64 = trimmed.parse().map_err(|_| ChoiceError::NotANumber)?;
    usize::try_from(number)
        .ok()
        .filter(|number| (1..=max).contains(number))
        .ok_or(ChoiceError::OutOfRange { max })
}

/// Parse an inventory pick: a positive number or `cancel`.
#[must_use]
pub fn parse_pick(input: &str) -> Option<Pick> {
    let trimmed = input.trim();
    if trimmed.eq_ignore_ascii_case("cancel") {
        return Some(Pick::Cancel);
    }
    match trimmed.parse::<usize>() {
        Ok(0) | Err(_) => None,
        Ok(number) => Some(Pick::from_number(number)),
    }
}

/// Line-oriented prompter over any reader/writer pair.
///
/// Every read returns `None` once input is exhausted.
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub const fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub const fn output(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_output(self) -> W {
        self.writer
    }

    /// Print `prompt` and read one line without its line ending.
    ///
    /// # Errors
    ///
    /// Returns an error if writing the prompt or reading fails.
    pub fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.writer, "{prompt}")?;
        self.writer.flush()?;
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            writeln!(self.writer)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn complain(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", format!("Error: {message}").red())
    }

    /// Ask for a menu choice until one in `[1, max]` arrives.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failure.
    pub fn choice(&mut self, max: usize) -> io::Result<Option<usize>> {
        loop {
            let Some(line) = self.ask("\nEnter choice (number): ")? else {
                return Ok(None);
            };
            match parse_choice(&line, max) {
                Ok(choice) => return Ok(Some(choice)),
                Err(err) => {
                    log::debug!("rejected choice {line:?}: {err:?}");
                    self.complain(&err.to_string())?;
                }
            }
        }
    }

    /// Ask which inventory item to use.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failure.
    pub fn item_pick(&mut self) -> io::Result<Option<Pick>> {
        loop {
            let Some(line) = self.ask("Use which item? (number or 'cancel'): ")? else {
                return Ok(None);
            };
            if let Some(pick) = parse_pick(&line) {
                return Ok(Some(pick));
            }
            self.complain("Please enter an item number or 'cancel'.")?;
        }
    }

    /// Ask which of `stocked` items to buy; `stocked + 1` walks away.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failure.
    pub fn shop_pick(&mut self, stocked: usize) -> io::Result<Option<Pick>> {
        let leave = stocked + 1;
        loop {
            let Some(line) = self.ask("\nWhat would you like to buy, brave adventurer? ")? else {
                return Ok(None);
            };
            match parse_choice(&line, leave) {
                Ok(number) if number == leave => return Ok(Some(Pick::Cancel)),
                Ok(number) => return Ok(Some(Pick::from_number(number))),
                Err(ChoiceError::OutOfRange { .. }) => {
                    self.complain("Please enter a valid number.")?;
                }
                Err(err) => self.complain(&err.to_string())?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn scripted(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(prompter: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(prompter.into_output()).unwrap()
    }

    #[test]
    fn parse_choice_reports_each_failure() {
        assert_eq!(parse_choice("3", 7), Ok(3));
        assert_eq!(parse_choice("  7 ", 7), Ok(7));
        assert_eq!(parse_choice("   ", 7), Err(ChoiceError::Empty));
        assert_eq!(parse_choice("abc", 7), Err(ChoiceError::NotANumber));
        let out_of_range = Err(ChoiceError::OutOfRange { max: 7 });
        assert_eq!(parse_choice("0", 7), out_of_range);
        assert_eq!(parse_choice("-2", 7), out_of_range);
        assert_eq!(parse_choice("8", 7), out_of_range);
        assert_eq!(
            ChoiceError::OutOfRange { max: 6 }.to_string(),
            "Please enter a number between 1 and 6."
        );
    }

    #[test]
    fn parse_pick_accepts_numbers_and_cancel() {
        assert_eq!(parse_pick("cancel"), Some(Pick::Cancel));
        assert_eq!(parse_pick("CANCEL\n"), Some(Pick::Cancel));
        assert_eq!(parse_pick("2"), Some(Pick::from_number(2)));
        assert_eq!(parse_pick("0"), None);
        assert_eq!(parse_pick("potion"), None);
    }

    #[test]
    fn choice_reprompts_until_valid() {
        let mut prompter = scripted("\nnope\n9\n4\n");
        assert_eq!(prompter.choice(6).unwrap(), Some(4));
        let text = output(prompter);
        assert!(text.contains("Please enter a number!"));
        assert!(text.contains("That's not a number! Please enter a number."));
        assert!(text.contains("Please enter a number between 1 and 6."));
        assert_eq!(text.matches("Enter choice (number): ").count(), 4);
    }

    #[test]
    fn end_of_input_yields_none() {
        let mut prompter = scripted("x\n");
        assert_eq!(prompter.choice(3).unwrap(), None);
        assert_eq!(prompter.item_pick().unwrap(), None);
    }

    #[test]
    fn shop_pick_maps_the_trailing_option_to_cancel() {
        let mut prompter = scripted("9\n5\n");
        assert_eq!(prompter.shop_pick(4).unwrap(), Some(Pick::Cancel));
        assert!(output(prompter).contains("Please enter a valid number."));

        let mut prompter = scripted("2\n");
        assert_eq!(prompter.shop_pick(4).unwrap(), Some(Pick::from_number(2)));
    }

    #[test]
    fn item_pick_reprompts_on_garbage() {
        let mut prompter = scripted("zero\ncancel\n");
        assert_eq!(prompter.item_pick().unwrap(), Some(Pick::Cancel));
        assert!(output(prompter).contains("Please enter an item number or 'cancel'."));
    }
}
