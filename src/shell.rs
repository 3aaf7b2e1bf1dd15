//! Line-oriented command dispatcher over any `FsBackend`.
//!
//! Each input line is split on whitespace into a command name and its arguments:
//!
//! | Command | Args          | Effect                                  |
//! |---------|---------------|-----------------------------------------|
//! | `touch` | `<name>`      | creates an empty file                   |
//! | `mkdir` | `<name>`      | creates an empty directory              |
//! | `ls`    | `[-r]`        | prints a `TYPE SIZE NAME` table         |
//! | `pwd`   |               | prints the working directory path       |
//! | `cd`    | `<path>`      | changes the working directory           |
//! | `quit`  |               | stops the loop (`exit` works too)       |
//!
//! A failing command prints a single error line; the loop keeps going.

use std::io::{BufRead, Write};

use anyhow::anyhow;
use tracing::{debug, info};

use crate::core::{FsBackend, Result};
use crate::vfs::render_table;

pub const DEFAULT_PROMPT: &str = "> ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Touch(String),
    Mkdir(String),
    Ls { recursive: bool },
    Pwd,
    Cd(String),
    Quit,
}

impl Command {
    /// Parses one input line.
    /// Returns `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match name {
            "touch" => Command::Touch(Self::operand(name, &args)?),
            "mkdir" => Command::Mkdir(Self::operand(name, &args)?),
            "ls" => Command::Ls {
                recursive: args.contains(&"-r"),
            },
            "pwd" => Command::Pwd,
            "cd" => Command::Cd(Self::operand(name, &args)?),
            "quit" | "exit" => Command::Quit,
            _ => return Err(anyhow!("unknown command: {}", name)),
        };
        Ok(Some(command))
    }

    fn operand(name: &str, args: &[&str]) -> Result<String> {
        args.first()
            .map(|arg| arg.to_string())
            .ok_or_else(|| anyhow!("{}: missing operand", name))
    }
}

/// What the loop does after a command.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Interactive shell owning the filesystem it drives.
pub struct Shell<B: FsBackend> {
    fs: B,
    prompt: String,
}

impl<B: FsBackend> Shell<B> {
    pub fn new(fs: B) -> Self {
        Self {
            fs,
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }

    /// Replaces the prompt printed before each line. An empty prompt prints nothing.
    pub fn with_prompt<S: Into<String>>(mut self, prompt: S) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn fs(&self) -> &B {
        &self.fs
    }

    /// Runs `command`, writing its output (if any) to `out`.
    pub fn execute<W: Write>(&self, command: &Command, out: &mut W) -> Result<Flow> {
        debug!(?command, "executing");
        match command {
            Command::Touch(name) => self.fs.mkfile(name, &[])?,
            Command::Mkdir(name) => self.fs.mkdir(name)?,
            Command::Ls { recursive } => {
                let rows = self.fs.ls(*recursive)?;
                out.write_all(render_table(&rows).as_bytes())?;
            }
            Command::Pwd => writeln!(out, "{}", self.fs.cwd()?)?,
            Command::Cd(path) => self.fs.cd(path)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Parses and runs one line.
    pub fn execute_line<W: Write>(&self, line: &str, out: &mut W) -> Result<Flow> {
        match Command::parse(line)? {
            Some(command) => self.execute(&command, out),
            None => Ok(Flow::Continue),
        }
    }

    /// Reads commands from `input` until `quit` or end of input.
    ///
    /// Command errors are printed to `output` and do not stop the loop; only I/O failures
    /// on `input` or `output` are returned. Bytes that are not valid UTF-8 are replaced
    /// with `U+FFFD`.
    pub fn run<R: BufRead, W: Write>(&self, mut input: R, mut output: W) -> Result<()> {
        let mut buf = Vec::new();
        loop {
            if !self.prompt.is_empty() {
                output.write_all(self.prompt.as_bytes())?;
                output.flush()?;
            }

            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                info!("end of input");
                break;
            }

            let line = String::from_utf8_lossy(&buf);
            match self.execute_line(&line, &mut output) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(e) => {
                    debug!(error = %e, "command failed");
                    writeln!(output, "{}", e)?;
                }
            }
        }
        output.flush()?;
        Ok(())
    }
}
