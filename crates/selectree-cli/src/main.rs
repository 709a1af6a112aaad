mod cli;
mod commands;

use clap::ArgMatches;
use tracing_subscriber::EnvFilter;

use cli::{CheckParams, LangsParams, SelectParams, TreeParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();
    let Some((name, m)) = matches.subcommand() else {
        unreachable!("clap should have caught this");
    };
    init_logging(m);

    match name {
        "select" => {
            let params = SelectParams::from_matches(m);
            commands::select::run(params.into());
        }
        "check" => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        "tree" => {
            let params = TreeParams::from_matches(m);
            commands::tree::run(params.into());
        }
        "langs" => {
            let _params = LangsParams::from_matches(m);
            commands::langs::run();
        }
        _ => unreachable!("clap should have caught this"),
    }
}

/// Logs go to stderr; stdout carries command output only.
///
/// `-v` flags win over `RUST_LOG`; without either only warnings are shown.
fn init_logging(m: &ArgMatches) {
    let verbosity = m.get_count("verbose");
    let filter = match verbosity {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
}
