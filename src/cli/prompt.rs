use std::io::{self, BufRead, ErrorKind, Write};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[1;1H";

/// Line-oriented conversation with the user.
pub trait Prompt {
  fn say(&mut self, message: &str) -> io::Result<()>;
  /// Shows `message` and returns the next line without its line ending.
  fn prompt_line(&mut self, message: &str) -> io::Result<String>;
  /// Asks until the answer is one of the (lowercase) `options`.
  fn prompt_choice(&mut self, message: &str, options: &[char]) -> io::Result<char>;
  fn clear_display(&mut self) -> io::Result<()>;
}

#[derive(Debug)]
pub struct Terminal<R: BufRead, W: Write> {
  input: R,
  output: W,
  clear: bool,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
  #[must_use]
  pub const fn new(input: R, output: W, clear: bool) -> Self {
    Self {
      input,
      output,
      clear,
    }
  }

  #[must_use]
  pub fn into_output(self) -> W {
    self.output
  }
}

impl<R: BufRead, W: Write> Prompt for Terminal<R, W> {
  fn say(&mut self, message: &str) -> io::Result<()> {
    writeln!(self.output, "{message}")
  }

  fn prompt_line(&mut self, message: &str) -> io::Result<String> {
    write!(self.output, "{message}")?;
    self.output.flush()?;
    let mut line = String::new();
    if self.input.read_line(&mut line)? == 0 {
      return Err(io::Error::new(ErrorKind::UnexpectedEof, "no more input"));
    }
    let len = line.trim_end_matches(&['\n', '\r'][..]).len();
    line.truncate(len);
    Ok(line)
  }

  fn prompt_choice(&mut self, message: &str, options: &[char]) -> io::Result<char> {
    loop {
      let answer = self.prompt_line(message)?;
      let mut chars = answer.trim().chars();
      if let (Some(choice), None) = (chars.next(), chars.next()) {
        let choice = choice.to_ascii_lowercase();
        if options.contains(&choice) {
          return Ok(choice);
        }
      }
      self.say("Not a valid choice. Please try again.")?;
    }
  }

  fn clear_display(&mut self) -> io::Result<()> {
    if self.clear {
      write!(self.output, "{CLEAR_SCREEN}")?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod test {
  use super::{Prompt, Terminal};
  use std::io::ErrorKind;

  #[test]
  fn reads_lines_without_line_endings() {
    let mut terminal = Terminal::new(&b"first\r\n  second  \n"[..], Vec::new(), false);
    assert_eq!(terminal.prompt_line("> ").unwrap(), "first");
    assert_eq!(terminal.prompt_line("> ").unwrap(), "  second  ");
    assert_eq!(
      terminal.prompt_line("> ").unwrap_err().kind(),
      ErrorKind::UnexpectedEof
    );
    assert_eq!(terminal.into_output(), b"> > > ");
  }

  #[test]
  fn reprompts_until_valid_choice() {
    let mut terminal = Terminal::new(&b"x\nab\n\nB\n"[..], Vec::new(), false);
    assert_eq!(terminal.prompt_choice("? ", &['a', 'b']).unwrap(), 'b');
    let output = String::from_utf8(terminal.into_output()).unwrap();
    assert_eq!(output.matches("Not a valid choice").count(), 3);
  }

  #[test]
  fn clears_only_when_enabled() {
    let mut terminal = Terminal::new(&b""[..], Vec::new(), false);
    terminal.clear_display().unwrap();
    assert!(terminal.into_output().is_empty());

    let mut terminal = Terminal::new(&b""[..], Vec::new(), true);
    terminal.clear_display().unwrap();
    assert_eq!(terminal.into_output(), b"\x1b[2J\x1b[1;1H");
  }
}
