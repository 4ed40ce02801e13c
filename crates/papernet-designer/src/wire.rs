//! Wire format
//!
//! Output is canonical: upper-case absolute commands, every operand separated
//! by a single space, `-0` printed as `0`. Input is lenient in the usual SVG
//! ways: commas, packed signs (`10-5`), packed decimals (`.5.5`), packed arc
//! flags (`0110`), implicit repeats, relative commands and `H`/`V` shorthands.
//! Everything is normalised to absolute [`PathCommand`]s while parsing.

use papernet_core::{PathError, Point};

use crate::command::{BezierFamily, PathCommand};
use crate::path::PathData;

/// Longest input excerpt quoted in a syntax error
const FRAGMENT_LEN: usize = 16;

fn format_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{value}")
    }
}

fn push_point(out: &mut Vec<String>, p: Point) {
    out.push(format_number(p.x()));
    out.push(format_number(p.y()));
}

pub(crate) fn format_commands(commands: &[PathCommand]) -> String {
    let mut out = Vec::with_capacity(commands.len() * 3);
    for command in commands {
        out.push(command.letter().to_string());
        if let PathCommand::EllipticalArc {
            rx,
            ry,
            x_axis_rotation,
            large_arc,
            sweep,
            to,
        } = *command
        {
            out.push(format_number(rx));
            out.push(format_number(ry));
            out.push(format_number(x_axis_rotation));
            out.push(if large_arc { "1" } else { "0" }.to_string());
            out.push(if sweep { "1" } else { "0" }.to_string());
            push_point(&mut out, to);
        } else {
            for p in command.points() {
                push_point(&mut out, p);
            }
        }
    }
    out.join(" ")
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Command(char),
    Number(String),
}

#[derive(Debug, Clone)]
struct Lexeme {
    token: Token,
    /// Byte offset into the source text
    offset: usize,
}

fn is_command_letter(ch: char) -> bool {
    matches!(
        ch.to_ascii_uppercase(),
        'M' | 'L' | 'H' | 'V' | 'C' | 'S' | 'Q' | 'T' | 'A' | 'Z'
    )
}

fn excerpt(text: &str, offset: usize) -> String {
    text.get(offset..)
        .unwrap_or_default()
        .chars()
        .take(FRAGMENT_LEN)
        .collect()
}

/// Split path data into command letters and numeric strings.
///
/// A sign starts a new number unless it follows an exponent marker, and a
/// second decimal point starts a new number too.
fn tokenize(text: &str) -> Result<Vec<Lexeme>, PathError> {
    let mut lexemes = Vec::new();
    let mut current = String::new();
    let mut start = 0;

    fn flush(lexemes: &mut Vec<Lexeme>, current: &mut String, start: usize) {
        if !current.is_empty() {
            lexemes.push(Lexeme {
                token: Token::Number(std::mem::take(current)),
                offset: start,
            });
        }
    }

    for (offset, ch) in text.char_indices() {
        match ch {
            c if is_command_letter(c) => {
                flush(&mut lexemes, &mut current, start);
                lexemes.push(Lexeme {
                    token: Token::Command(c),
                    offset,
                });
            }
            ' ' | ',' | '\n' | '\r' | '\t' => flush(&mut lexemes, &mut current, start),
            '-' | '+' => {
                if !current.is_empty() && !current.ends_with(['e', 'E']) {
                    flush(&mut lexemes, &mut current, start);
                }
                if current.is_empty() {
                    start = offset;
                }
                current.push(ch);
            }
            '.' => {
                if current.contains(['.', 'e', 'E']) {
                    flush(&mut lexemes, &mut current, start);
                }
                if current.is_empty() {
                    start = offset;
                }
                current.push(ch);
            }
            '0'..='9' | 'e' | 'E' => {
                if current.is_empty() {
                    start = offset;
                }
                current.push(ch);
            }
            _ => {
                return Err(PathError::syntax(
                    excerpt(text, offset),
                    format!("unexpected character '{ch}'"),
                ))
            }
        }
    }
    flush(&mut lexemes, &mut current, start);

    Ok(lexemes)
}

struct Parser<'a> {
    text: &'a str,
    lexemes: Vec<Lexeme>,
    index: usize,
    path: PathData,
    current: Point,
    subpath_start: Point,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Result<Self, PathError> {
        Ok(Self {
            text,
            lexemes: tokenize(text)?,
            index: 0,
            path: PathData::new(),
            current: Point::ORIGIN,
            subpath_start: Point::ORIGIN,
        })
    }

    fn error_here(&self, reason: impl Into<String>) -> PathError {
        let fragment = self
            .lexemes
            .get(self.index)
            .map(|lexeme| excerpt(self.text, lexeme.offset))
            .unwrap_or_default();
        PathError::syntax(fragment, reason)
    }

    fn at_number(&self) -> bool {
        matches!(
            self.lexemes.get(self.index),
            Some(Lexeme {
                token: Token::Number(_),
                ..
            })
        )
    }

    fn number(&mut self, letter: char) -> Result<f64, PathError> {
        let text = match self.lexemes.get(self.index) {
            Some(Lexeme {
                token: Token::Number(text),
                ..
            }) => text,
            _ => return Err(self.error_here(format!("missing operand for '{letter}'"))),
        };
        match text.parse::<f64>() {
            Ok(value) if value.is_finite() => {
                self.index += 1;
                Ok(value)
            }
            _ => Err(self.error_here(format!("invalid number '{text}'"))),
        }
    }

    /// Arc flags may be packed against each other and the next operand.
    fn flag(&mut self, letter: char) -> Result<bool, PathError> {
        let (flag, rest) = match self.lexemes.get(self.index) {
            Some(Lexeme {
                token: Token::Number(text),
                ..
            }) => match text.as_bytes().first() {
                Some(b'0') => (false, text[1..].to_string()),
                Some(b'1') => (true, text[1..].to_string()),
                _ => return Err(self.error_here(format!("invalid arc flag for '{letter}'"))),
            },
            _ => return Err(self.error_here(format!("missing arc flag for '{letter}'"))),
        };

        if rest.is_empty() {
            self.index += 1;
        } else if let Some(lexeme) = self.lexemes.get_mut(self.index) {
            lexeme.token = Token::Number(rest);
            lexeme.offset += 1;
        }
        Ok(flag)
    }

    fn coordinate_pair(&mut self, letter: char, relative: bool) -> Result<Point, PathError> {
        let x = self.number(letter)?;
        let y = self.number(letter)?;
        let (x, y) = if relative {
            (x + self.current.x(), y + self.current.y())
        } else {
            (x, y)
        };
        Point::new(x, y).map_err(|err| self.error_here(err.to_string()))
    }

    fn coordinate(&mut self, letter: char, relative: bool, base: f64) -> Result<f64, PathError> {
        let value = self.number(letter)?;
        Ok(if relative { value + base } else { value })
    }

    fn last_family(&self) -> Option<BezierFamily> {
        self.path.commands().last().and_then(PathCommand::family)
    }

    fn is_closed(&self) -> bool {
        matches!(self.path.commands().last(), Some(PathCommand::Close))
    }

    /// Read one segment's operands for a drawing command.
    fn segment(&mut self, letter: char) -> Result<PathCommand, PathError> {
        let relative = letter.is_ascii_lowercase();
        let command = match letter.to_ascii_uppercase() {
            'L' => PathCommand::Line {
                to: self.coordinate_pair(letter, relative)?,
            },
            'H' => {
                let x = self.coordinate(letter, relative, self.current.x())?;
                PathCommand::Line {
                    to: Point::new(x, self.current.y())
                        .map_err(|err| self.error_here(err.to_string()))?,
                }
            }
            'V' => {
                let y = self.coordinate(letter, relative, self.current.y())?;
                PathCommand::Line {
                    to: Point::new(self.current.x(), y)
                        .map_err(|err| self.error_here(err.to_string()))?,
                }
            }
            'C' => PathCommand::CubicBezier {
                ctrl1: self.coordinate_pair(letter, relative)?,
                ctrl2: self.coordinate_pair(letter, relative)?,
                to: self.coordinate_pair(letter, relative)?,
            },
            'S' => {
                let ctrl2 = self.coordinate_pair(letter, relative)?;
                let to = self.coordinate_pair(letter, relative)?;
                if self.last_family() == Some(BezierFamily::Cubic) {
                    PathCommand::SmoothCubicBezier { ctrl2, to }
                } else {
                    PathCommand::CubicBezier {
                        ctrl1: self.current,
                        ctrl2,
                        to,
                    }
                }
            }
            'Q' => PathCommand::QuadraticBezier {
                ctrl1: self.coordinate_pair(letter, relative)?,
                to: self.coordinate_pair(letter, relative)?,
            },
            'T' => {
                let to = self.coordinate_pair(letter, relative)?;
                if self.last_family() == Some(BezierFamily::Quadratic) {
                    PathCommand::SmoothQuadraticBezier { to }
                } else {
                    PathCommand::QuadraticBezier {
                        ctrl1: self.current,
                        to,
                    }
                }
            }
            'A' => PathCommand::EllipticalArc {
                rx: self.number(letter)?,
                ry: self.number(letter)?,
                x_axis_rotation: self.number(letter)?,
                large_arc: self.flag(letter)?,
                sweep: self.flag(letter)?,
                to: self.coordinate_pair(letter, relative)?,
            },
            _ => return Err(self.error_here(format!("unsupported command '{letter}'"))),
        };
        Ok(command)
    }

    fn command(&mut self, letter: char) -> Result<(), PathError> {
        match letter.to_ascii_uppercase() {
            'M' => {
                let relative = letter.is_ascii_lowercase();
                let to = self.coordinate_pair(letter, relative)?;
                self.path.move_to(to);
                self.current = to;
                self.subpath_start = to;
                // Further pairs are implicit line-tos
                let line = if relative { 'l' } else { 'L' };
                while self.at_number() {
                    let command = self.segment(line)?;
                    self.draw(command)?;
                }
            }
            'Z' => {
                if !self.is_closed() {
                    self.path.close()?;
                }
                self.current = self.subpath_start;
                if self.at_number() {
                    return Err(self.error_here("close takes no operands"));
                }
            }
            _ => loop {
                if self.is_closed() {
                    // Drawing resumes from the start of the closed subpath
                    self.path.move_to(self.subpath_start);
                }
                let command = self.segment(letter)?;
                self.draw(command)?;
                if !self.at_number() {
                    break;
                }
            },
        }
        Ok(())
    }

    fn draw(&mut self, command: PathCommand) -> Result<(), PathError> {
        self.path.push(command)?;
        if let Some(to) = command.to() {
            self.current = to;
        }
        Ok(())
    }

    fn parse(mut self) -> Result<PathData, PathError> {
        while let Some(lexeme) = self.lexemes.get(self.index) {
            let letter = match lexeme.token {
                Token::Command(letter) => letter,
                Token::Number(_) => return Err(self.error_here("expected a command letter")),
            };
            if self.path.is_empty() && letter.to_ascii_uppercase() != 'M' {
                return Err(self.error_here("path data must begin with a move"));
            }
            self.index += 1;
            self.command(letter)?;
        }
        Ok(self.path)
    }
}

/// Parse path data into absolute commands.
pub(crate) fn parse(text: &str) -> Result<PathData, PathError> {
    let path = Parser::new(text)?.parse()?;
    tracing::trace!(commands = path.len(), "parsed path data");
    Ok(path)
}
