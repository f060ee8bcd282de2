//! Line-based prompts over any reader and writer.

use std::io::{self, BufRead, Write};

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    /// Prints `message` and reads one trimmed line. `None` at end of input.
    pub fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{} ", message)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Numbered menu with a trailing "Cancel". Returns the chosen index, or `None` when
    /// cancelled or input ran out.
    pub fn select<S: AsRef<str>>(&mut self, title: &str, options: &[S]) -> io::Result<Option<usize>> {
        self.say(&format!("== {} ==", title))?;
        for (i, option) in options.iter().enumerate() {
            self.say(&format!("  {}) {}", i + 1, option.as_ref()))?;
        }
        self.say(&format!("  {}) Cancel", options.len() + 1))?;

        loop {
            let Some(answer) = self.prompt(">")? else {
                return Ok(None);
            };
            match answer.parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => return Ok(Some(n - 1)),
                Ok(n) if n == options.len() + 1 => return Ok(None),
                _ => {
                    if answer.eq_ignore_ascii_case("c") || answer.eq_ignore_ascii_case("cancel") {
                        return Ok(None);
                    }
                    self.say("Please pick a number from the list.")?;
                }
            }
        }
    }
}
