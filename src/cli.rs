use clap::Parser;

use crate::shell::DEFAULT_PROMPT;

/// In-memory filesystem shell
#[derive(Parser, Debug)]
#[command(
    name = "vfs-tree",
    version,
    about = "In-memory filesystem shell",
    long_about = "Reads commands from stdin and applies them to a filesystem that lives only \
                  in memory.\n\n\
                  Commands:\n  \
                  touch <name>   create an empty file\n  \
                  mkdir <name>   create a directory\n  \
                  ls [-r]        list the working directory\n  \
                  pwd            print the working directory\n  \
                  cd <path>      change the working directory\n  \
                  quit           exit"
)]
pub struct CliArgs {
    #[arg(
        long,
        value_name = "PROMPT",
        default_value = DEFAULT_PROMPT,
        help = "Prompt printed before each command"
    )]
    pub prompt: String,

    #[arg(long, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'q', long, help = "Do not print the prompt")]
    pub quiet: bool,
}

impl CliArgs {
    /// The prompt to print, empty in quiet mode.
    pub fn effective_prompt(&self) -> &str {
        if self.quiet { "" } else { &self.prompt }
    }
}
