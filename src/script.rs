//! Stroke scripts: a line-oriented list of pointer and tool commands.
//!
//! ```text
//! // red filled rectangle, then save it
//! tool rectangle
//! color red
//! fill on
//! down 10 10
//! move 60 40
//! up
//! export
//! save
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use crate::draw::Color;
use crate::input::tool::{Tool, ToolError};
use crate::util::Point;

/// One script command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Tool(Tool),
    Thickness(f64),
    Color(Color),
    Fill(bool),
    Down(Point),
    Move(Point),
    Up,
    Clear,
    Export,
    Save,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Tool(tool) => write!(f, "tool {tool}"),
            Command::Thickness(width) => write!(f, "thickness {width}"),
            Command::Color(color) => write!(f, "color {color}"),
            Command::Fill(on) => write!(f, "fill {}", if *on { "on" } else { "off" }),
            Command::Down(p) => write!(f, "down {} {}", p.x, p.y),
            Command::Move(p) => write!(f, "move {} {}", p.x, p.y),
            Command::Up => f.write_str("up"),
            Command::Clear => f.write_str("clear"),
            Command::Export => f.write_str("export"),
            Command::Save => f.write_str("save"),
        }
    }
}

/// A command together with the 1-based line it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub line: usize,
    pub command: Command,
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Failed to read script {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A parsed stroke script.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Script {
    steps: Vec<Step>,
}

impl Script {
    /// Parses script text. Blank lines and `//` comments are skipped.
    pub fn parse(source: &str) -> Result<Self, ScriptError> {
        let mut steps = Vec::new();
        for (index, raw) in source.lines().enumerate() {
            let line = index + 1;
            let text = match raw.find("//") {
                Some(pos) => &raw[..pos],
                None => raw,
            }
            .trim();
            if text.is_empty() {
                continue;
            }
            let command =
                parse_command(text).map_err(|message| ScriptError::Parse { line, message })?;
            steps.push(Step { line, command });
        }
        log::debug!("Parsed script with {} commands", steps.len());
        Ok(Self { steps })
    }

    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let source = fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&source)
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl FromStr for Script {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_command(text: &str) -> Result<Command, String> {
    let mut words = text.split_whitespace();
    let keyword = words.next().unwrap_or_default().to_lowercase();
    let args: Vec<&str> = words.collect();

    let command = match keyword.as_str() {
        "tool" => {
            let name = single_arg(&keyword, &args)?;
            Command::Tool(name.parse().map_err(|e: ToolError| e.to_string())?)
        }
        "thickness" => {
            let value = parse_number(single_arg(&keyword, &args)?)?;
            if value <= 0.0 {
                return Err(ToolError::InvalidThickness(value).to_string());
            }
            Command::Thickness(value)
        }
        "color" => {
            let value = single_arg(&keyword, &args)?;
            Command::Color(value.parse::<Color>().map_err(|e| e.to_string())?)
        }
        "fill" => match single_arg(&keyword, &args)?.to_lowercase().as_str() {
            "on" | "true" | "yes" => Command::Fill(true),
            "off" | "false" | "no" => Command::Fill(false),
            other => return Err(format!("fill expects on or off, got '{other}'")),
        },
        "down" => Command::Down(parse_point(&keyword, &args)?),
        "move" => Command::Move(parse_point(&keyword, &args)?),
        "up" => no_args(&keyword, &args, Command::Up)?,
        "clear" => no_args(&keyword, &args, Command::Clear)?,
        "export" => no_args(&keyword, &args, Command::Export)?,
        "save" => no_args(&keyword, &args, Command::Save)?,
        other => return Err(format!("unknown command '{other}'")),
    };
    Ok(command)
}

fn single_arg<'a>(keyword: &str, args: &[&'a str]) -> Result<&'a str, String> {
    match args {
        [value] => Ok(value),
        _ => Err(format!("{keyword} expects 1 argument, got {}", args.len())),
    }
}

fn no_args(keyword: &str, args: &[&str], command: Command) -> Result<Command, String> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(format!("{keyword} takes no arguments"))
    }
}

fn parse_point(keyword: &str, args: &[&str]) -> Result<Point, String> {
    match args {
        [x, y] => Ok(Point::new(parse_number(x)?, parse_number(y)?)),
        _ => Err(format!("{keyword} expects x and y, got {} values", args.len())),
    }
}

fn parse_number(raw: &str) -> Result<f64, String> {
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| format!("'{raw}' is not a number"))
}
