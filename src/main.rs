mod cli;
mod commands;
mod formatting;

use std::process::ExitCode;

use cli::Commands;
use commands::{run_analyze, run_apply};

#[tokio::main]
async fn main() -> ExitCode {
    run().await
}

async fn run() -> ExitCode {
    let args = cli::parse();

    match args.command {
        Commands::Analyze {
            html,
            css,
            js,
            format,
            output,
        } => run_analyze(args.config, args.verbose, html, css, js, format, output).await,
        Commands::Apply {
            html,
            css,
            js,
            suggestion,
            out_dir,
            format,
            output,
        } => {
            run_apply(
                args.config,
                args.verbose,
                html,
                css,
                js,
                suggestion,
                out_dir,
                format,
                output,
            )
            .await
        }
    }
}
