use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod output;

fn main() {
    if let Err(error) = run() {
        eprintln!("whp error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let flags = cli.global_flags();
    init_tracing(&flags)?;

    let config = bootstrap::load_config(&flags)?;
    let payloads = bootstrap::load_payloads(&config)?;

    commands::dispatch::dispatch(&cli.command, &payloads, &flags)
}

const fn default_log_level(flags: &cli::GlobalFlags) -> &'static str {
    if flags.quiet {
        "error"
    } else if flags.verbose {
        "debug"
    } else {
        "warn"
    }
}

fn init_tracing(flags: &cli::GlobalFlags) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_env("WHP_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_log_level(flags)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn level_for(args: &[&str]) -> &'static str {
        let cli = cli::Cli::try_parse_from(args).expect("cli should parse");
        default_log_level(&cli.global_flags())
    }

    #[test]
    fn log_level_follows_global_flags() {
        assert_eq!(level_for(&["whp", "events"]), "warn");
        assert_eq!(level_for(&["whp", "events", "--verbose"]), "debug");
        assert_eq!(level_for(&["whp", "--quiet", "events"]), "error");
        assert_eq!(level_for(&["whp", "--quiet", "--verbose", "events"]), "error");
    }
}
