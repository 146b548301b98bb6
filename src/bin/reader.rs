//! Print every row of an Astro Pi sensor log.

use clap::Parser;
use spacecraft::AstroPiDataReader;
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "reader")]
#[command(about = "Astro Pi data reader")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// The input filename
    filename: PathBuf,

    /// Output verbosity
    #[arg(short, long)]
    verbose: bool,
}

/// `RUST_LOG` when set, otherwise DEBUG with `-v` and WARN without.
fn log_filter(verbose: bool) -> EnvFilter {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(log_filter(cli.verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut reader = AstroPiDataReader::open(&cli.filename)?;
    debug!("{} rows in {}", reader.row_count(), reader.path().display());

    if reader.row_count() > 0 {
        loop {
            if let Some(reading) = reader.current() {
                println!("{}", reading.to_line());
            }
            if !reader.next_row() {
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_required() {
        assert!(Cli::try_parse_from(["reader"]).is_err());
    }

    #[test]
    fn test_verbose_flag() {
        let cli = Cli::try_parse_from(["reader", "astropi.csv", "-v"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.filename, PathBuf::from("astropi.csv"));
    }
}
