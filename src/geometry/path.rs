//! Typed SVG path data
//!
//! The path mini-language is tokenized into a sequence of [`PathCommand`]s.
//! Each command keeps its letter family, whether it is relative, and the flat
//! list of operands for all of its repetitions (`M0 0 10 10` stays a single
//! move command with four operands).

use std::fmt;
use std::str::FromStr;

use crate::core::errors::{Error, Result};
use crate::geometry::number::{format_number, parse_finite};

/// Coordinate axis an operand belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Path command families, independent of absolute/relative case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    MoveTo,
    LineTo,
    HorizontalTo,
    VerticalTo,
    CubicTo,
    SmoothCubicTo,
    QuadTo,
    SmoothQuadTo,
    Close,
}

impl CommandKind {
    /// Look up a command letter; the case decides absolute vs. relative
    ///
    /// The arc command is recognized and rejected.
    pub fn from_letter(letter: char) -> Result<(Self, bool)> {
        let kind = match letter.to_ascii_uppercase() {
            'M' => CommandKind::MoveTo,
            'L' => CommandKind::LineTo,
            'H' => CommandKind::HorizontalTo,
            'V' => CommandKind::VerticalTo,
            'C' => CommandKind::CubicTo,
            'S' => CommandKind::SmoothCubicTo,
            'Q' => CommandKind::QuadTo,
            'T' => CommandKind::SmoothQuadTo,
            'Z' => CommandKind::Close,
            'A' => return Err(Error::UnsupportedCommand(letter)),
            _ => {
                return Err(Error::MalformedInput(format!(
                    "unknown path command \"{letter}\""
                )))
            }
        };
        Ok((kind, letter.is_ascii_lowercase()))
    }

    /// The uppercase (absolute) letter of this family
    pub fn letter(self) -> char {
        match self {
            CommandKind::MoveTo => 'M',
            CommandKind::LineTo => 'L',
            CommandKind::HorizontalTo => 'H',
            CommandKind::VerticalTo => 'V',
            CommandKind::CubicTo => 'C',
            CommandKind::SmoothCubicTo => 'S',
            CommandKind::QuadTo => 'Q',
            CommandKind::SmoothQuadTo => 'T',
            CommandKind::Close => 'Z',
        }
    }

    /// Number of operands of one repetition
    pub fn arity(self) -> usize {
        match self {
            CommandKind::Close => 0,
            CommandKind::HorizontalTo | CommandKind::VerticalTo => 1,
            CommandKind::MoveTo | CommandKind::LineTo | CommandKind::SmoothQuadTo => 2,
            CommandKind::SmoothCubicTo | CommandKind::QuadTo => 4,
            CommandKind::CubicTo => 6,
        }
    }

    /// Axis role of the operand at `index`
    pub fn axis(self, index: usize) -> Option<Axis> {
        match self {
            CommandKind::Close => None,
            CommandKind::HorizontalTo => Some(Axis::X),
            CommandKind::VerticalTo => Some(Axis::Y),
            _ if index % 2 == 0 => Some(Axis::X),
            _ => Some(Axis::Y),
        }
    }
}

/// One command with the operands of all its repetitions
#[derive(Debug, Clone, PartialEq)]
pub struct PathCommand {
    pub kind: CommandKind,
    pub relative: bool,
    pub operands: Vec<f64>,
}

impl PathCommand {
    pub fn new(kind: CommandKind, relative: bool, operands: Vec<f64>) -> Self {
        Self {
            kind,
            relative,
            operands,
        }
    }

    /// The letter as written, lowercase for relative commands
    pub fn letter(&self) -> char {
        let letter = self.kind.letter();
        if self.relative {
            letter.to_ascii_lowercase()
        } else {
            letter
        }
    }

    fn validate(&self) -> Result<()> {
        let arity = self.kind.arity();
        let count = self.operands.len();
        let valid = if arity == 0 {
            count == 0
        } else {
            count > 0 && count % arity == 0
        };
        if valid {
            Ok(())
        } else {
            Err(Error::MalformedInput(format!(
                "path command \"{}\" expects a multiple of {} operands, got {}",
                self.letter(),
                arity,
                count
            )))
        }
    }
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())?;
        for (index, operand) in self.operands.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            f.write_str(&format_number(*operand))?;
        }
        Ok(())
    }
}

/// An ordered sequence of path commands
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData {
    pub commands: Vec<PathCommand>,
}

impl PathData {
    pub fn new(commands: Vec<PathCommand>) -> Self {
        Self { commands }
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Tokenize SVG path data into typed commands
    pub fn parse(data: &str) -> Result<Self> {
        let mut tokenizer = Tokenizer::new(data);
        let mut commands: Vec<PathCommand> = Vec::new();
        let mut current: Option<PathCommand> = None;

        while let Some(token) = tokenizer.next_token()? {
            match token {
                Token::Command(letter) => {
                    let (kind, relative) = CommandKind::from_letter(letter)?;
                    if let Some(finished) = current.take() {
                        finished.validate()?;
                        commands.push(finished);
                    }
                    current = Some(PathCommand::new(kind, relative, Vec::new()));
                }
                Token::Number(value) => match current.as_mut() {
                    Some(command) => command.operands.push(value),
                    None => {
                        return Err(Error::MalformedInput(
                            "path data must start with a command".to_string(),
                        ))
                    }
                },
            }
        }
        if let Some(finished) = current {
            finished.validate()?;
            commands.push(finished);
        }

        Ok(Self { commands })
    }
}

impl FromStr for PathData {
    type Err = Error;

    fn from_str(data: &str) -> Result<Self> {
        Self::parse(data)
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for command in &self.commands {
            write!(f, "{command}")?;
        }
        Ok(())
    }
}

enum Token {
    Command(char),
    Number(f64),
}

struct Tokenizer<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    fn skip_separators(&mut self) {
        while let Some(byte) = self.peek() {
            if byte.is_ascii_whitespace() || byte == b',' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn skip_digits(&mut self) -> usize {
        let start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        self.pos - start
    }

    fn next_token(&mut self) -> Result<Option<Token>> {
        self.skip_separators();
        let Some(byte) = self.peek() else {
            return Ok(None);
        };

        if byte.is_ascii_alphabetic() {
            self.pos += 1;
            return Ok(Some(Token::Command(byte as char)));
        }
        if byte.is_ascii_digit() || matches!(byte, b'.' | b'-' | b'+') {
            return self.number().map(|value| Some(Token::Number(value)));
        }

        let unexpected = self.text[self.pos..].chars().next().unwrap_or('?');
        Err(Error::MalformedInput(format!(
            "unexpected character \"{unexpected}\" in path data"
        )))
    }

    fn number(&mut self) -> Result<f64> {
        let start = self.pos;
        if matches!(self.peek(), Some(b'-') | Some(b'+')) {
            self.pos += 1;
        }
        let mut digits = self.skip_digits();
        if self.peek() == Some(b'.') {
            self.pos += 1;
            digits += self.skip_digits();
        }
        if digits == 0 {
            return Err(Error::MalformedInput(format!(
                "invalid number \"{}\" in path data",
                &self.text[start..self.pos]
            )));
        }

        // Only treat `e` as an exponent when digits follow it
        if matches!(self.peek(), Some(b'e') | Some(b'E')) {
            let mark = self.pos;
            self.pos += 1;
            if matches!(self.peek(), Some(b'-') | Some(b'+')) {
                self.pos += 1;
            }
            if self.skip_digits() == 0 {
                self.pos = mark;
            }
        }

        let literal = &self.text[start..self.pos];
        parse_finite(literal).ok_or_else(|| {
            Error::MalformedInput(format!("invalid number \"{literal}\" in path data"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_compact_path() {
        let path = PathData::parse("M0 0L10 0L10 10L0 10Z").unwrap();
        assert_eq!(path.commands.len(), 5);
        assert_eq!(path.commands[0].kind, CommandKind::MoveTo);
        assert_eq!(path.commands[4].kind, CommandKind::Close);
        assert_eq!(path.to_string(), "M0 0L10 0L10 10L0 10Z");
    }

    #[test]
    fn implicit_separators() {
        let path = PathData::parse("m.5.5-1-1e2").unwrap();
        assert!(path.commands[0].relative);
        assert_eq!(path.commands[0].operands, vec![0.5, 0.5, -1.0, -100.0]);
    }

    #[test]
    fn repeated_operands_stay_in_one_command() {
        let path = PathData::parse("M0,0 10,10 20,0").unwrap();
        assert_eq!(path.commands.len(), 1);
        assert_eq!(path.to_string(), "M0 0 10 10 20 0");
    }

    #[test]
    fn arc_is_rejected() {
        let err = PathData::parse("M0 0a5 5 0 0 1 10 0").unwrap_err();
        assert!(matches!(err, Error::UnsupportedCommand('a')));
    }

    #[test]
    fn operand_count_must_match_arity() {
        assert!(matches!(
            PathData::parse("M0 0C1 2 3 4 5"),
            Err(Error::MalformedInput(_))
        ));
        assert!(matches!(PathData::parse("M0 0Z1"), Err(Error::MalformedInput(_))));
        assert!(matches!(PathData::parse("10 10"), Err(Error::MalformedInput(_))));
    }

    #[test]
    fn overflowing_numbers_are_malformed() {
        assert!(matches!(
            PathData::parse("M0 0L1e400 0Z"),
            Err(Error::MalformedInput(_))
        ));
    }

    #[test]
    fn axis_roles() {
        assert_eq!(CommandKind::HorizontalTo.axis(0), Some(Axis::X));
        assert_eq!(CommandKind::VerticalTo.axis(3), Some(Axis::Y));
        assert_eq!(CommandKind::CubicTo.axis(4), Some(Axis::X));
        assert_eq!(CommandKind::CubicTo.axis(5), Some(Axis::Y));
        assert_eq!(CommandKind::Close.axis(0), None);
    }
}
