use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "faqbot",
    version,
    about = "Answer FAQ questions from a fixed catalog"
)]
pub struct Cli {
    /// Config file (defaults to <config dir>/faqbot/config.toml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// TOML catalog to use instead of the configured or built-in one.
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Skip keywords whose target is missing instead of failing.
    #[arg(long, global = true)]
    pub lenient: bool,

    #[arg(long, global = true, default_value = "text")]
    pub output: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the answer for one question.
    Ask {
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
    /// Interactive conversation on stdin.
    Chat {
        /// Override the configured reply delay, e.g. `0ms` or `1.2s`.
        #[arg(long)]
        delay: Option<humantime::Duration>,
    },
    /// Lint the catalog: self-matches, shadowed and dangling keywords.
    Check,
    /// Run labelled cases against the catalog.
    Eval {
        #[arg(long)]
        cases: PathBuf,
        #[arg(long, default_value_t = crate::eval::DEFAULT_REQUIRED_PASS_RATE)]
        min_pass_rate: f32,
    },
    /// List the suggested questions and the fallback message.
    Topics,
}

impl Cli {
    pub fn validate(&self) -> Result<(), String> {
        if let Commands::Eval { min_pass_rate, .. } = &self.command
            && !(0.0..=1.0).contains(min_pass_rate)
        {
            return Err("min-pass-rate must be between 0 and 1".to_string());
        }
        Ok(())
    }
}
