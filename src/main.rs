use std::io;

use clap::Parser;
use tracing::debug;

use vfs_tree::cli::CliArgs;
use vfs_tree::logging::{LoggingConfig, init_logging};
use vfs_tree::{Result, Shell, TreeFS};

fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(&LoggingConfig::resolve(args.log_level.as_deref())?);
    debug!("arguments: {:?}", args);

    let shell = Shell::new(TreeFS::new()).with_prompt(args.effective_prompt());
    shell.run(io::stdin().lock(), io::stdout().lock())
}
