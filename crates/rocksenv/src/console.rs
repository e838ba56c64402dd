use std::fmt::Display;
use std::io::{self, BufRead, StdinLock, Stdout, Write};

/// Line-oriented terminal interaction: status lines out, answers in.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<StdinLock<'static>, Stdout> {
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    #[must_use]
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, line: impl Display) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.output)
    }

    /// Print `prompt` without a newline and read one line.
    ///
    /// Returns `None` once input is exhausted.
    pub fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(answer.trim().to_string()))
    }

    /// Only an explicit `y` counts as consent.
    pub fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        Ok(self
            .ask(prompt)?
            .is_some_and(|answer| answer.eq_ignore_ascii_case("y")))
    }

    #[must_use]
    pub fn into_output(self) -> W {
        self.output
    }
}
