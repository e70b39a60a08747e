use std::io;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use faqbot::cli::{Cli, Commands};
use faqbot::output::{self, Format};
use faqbot::{
    ChatSession, Config, FaqError, QuestionMatcher, check_catalog, evaluate_cases, load_cases,
};

fn main() {
    init_tracing();
    if let Err(err) = real_main() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

// Logs go to stderr so stdout stays machine-readable.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

fn real_main() -> Result<(), FaqError> {
    let cli = Cli::parse();
    cli.validate().map_err(FaqError::InvalidArg)?;
    let format = Format::parse(&cli.output)?;

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(catalog) = &cli.catalog {
        config.catalog = Some(catalog.clone());
    }
    if cli.lenient {
        config.strict = false;
    }

    let matcher = QuestionMatcher::new(Arc::new(config.load_catalog()?));
    let mut out = output::stdout();

    match &cli.command {
        Commands::Ask { question } => {
            let question = question.join(" ");
            let found = matcher.explain(&question);
            let fallback = matcher.catalog().fallback_message();
            output::write_answer(&mut out, format, &question, found, &fallback)?;
        }
        Commands::Chat { delay } => {
            let mut options = config.session_options();
            if let Some(delay) = delay {
                options.reply_delay = *delay.as_ref();
            }
            let mut session = ChatSession::new(matcher, options)?;
            faqbot::runner::run_chat(&mut session, io::stdin().lock(), &mut out)?;
        }
        Commands::Check => {
            let report = check_catalog(&matcher);
            output::write_check(&mut out, format, &report)?;
            if !report.passed() {
                return Err(FaqError::InvalidCatalog("catalog check failed".to_string()));
            }
        }
        Commands::Eval {
            cases,
            min_pass_rate,
        } => {
            let cases = load_cases(cases)?;
            let summary = evaluate_cases(&matcher, &cases);
            output::write_eval(&mut out, format, &summary, *min_pass_rate)?;
            summary.ensure(*min_pass_rate)?;
        }
        Commands::Topics => output::write_topics(&mut out, format, matcher.catalog())?,
    }

    Ok(())
}
