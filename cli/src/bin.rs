use std::{
    error::Error,
    io::{self, Write},
};

use tracing_subscriber::EnvFilter;

mod app;
pub(crate) use app::App;

mod cmds;

#[cfg(test)]
mod temp_cwd;

pub(crate) type Result<T> = std::result::Result<T, Box<dyn Error>>;

#[allow(unused_must_use)]
#[cfg(not(tarpaulin_include))]
fn main() {
    // Keep this function as small as possible; everything else is reachable
    // from tests through `App`.

    let arg_matches = app::clap_app().get_matches();
    init_logging(arg_matches.occurrences_of("verbose"));

    let stdin = io::stdin();
    let mut stdin = stdin.lock();

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    let mut app = App {
        arg_matches,
        stdin: &mut stdin,
        stdout: &mut stdout,
    };

    let r = app.run();

    app.flush();
    // Intentionally ignoring the result of this flush.

    std::process::exit(match r {
        Ok(()) => 0,
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            eprintln!("ERROR: {}", err);
            1
        }
    });
}

/// Install a log subscriber that writes to stderr, so that stdout carries
/// only command output. `RUST_LOG` wins over `-v` when it is set.
#[cfg(not(tarpaulin_include))]
fn init_logging(verbosity: u64) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
