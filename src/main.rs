use anyhow::Result;
use shouldmap::cli::{self, Cli, Commands};
use shouldmap::commands::{self, AnalyzeConfig};

fn main() -> Result<()> {
    let cli: Cli = cli::parse_args();

    match cli.command {
        Commands::Analyze {
            path,
            framework,
            format,
            output,
            fix,
            fail_on_missing,
            verbosity,
            jobs,
        } => {
            cli::init_logging(verbosity);
            cli::configure_thread_pool(jobs);
            log::debug!("Using {} worker threads", cli::get_worker_count(jobs));

            let remaining = commands::handle_analyze(AnalyzeConfig {
                path,
                framework,
                format,
                output,
                fix,
            })?;

            if remaining && fail_on_missing {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Init { force } => {
            cli::init_logging(0);
            commands::init_config(force)
        }
        Commands::Frameworks => commands::list_frameworks(&mut std::io::stdout()),
    }
}
