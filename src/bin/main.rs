use std::{env, process::ExitCode};

use csvgen::{GeneratorError, run, usage};
use tracing::error;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // The main function is only responsible for I/O and orchestration.
    let args: Vec<String> = env::args().skip(1).collect();

    let out_dir = match env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Cannot resolve working directory: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(&args, &out_dir) {
        Ok(path) => {
            println!("Wrote {}", path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            report(&err);
            print!("{}", usage());
            ExitCode::FAILURE
        }
    }
}

fn report(err: &GeneratorError) {
    match err {
        GeneratorError::MissingArguments { flags } => {
            for flag in flags {
                println!("Missing : {flag} is required");
            }
        }
        _ if err.is_usage_error() => println!("{err}"),
        _ => {
            error!(error = %err, "generation failed");
            println!("{err}");
        }
    }
}
