//! CLI argument parsing with clap.

use clap::Parser;

/// Mock image annotation service - placeholder image synthesis and
/// bounding-box validation over HTTP.
#[derive(Parser, Debug)]
#[command(name = "mockimg", version, about)]
pub struct Cli {
    /// Address to bind (overrides the config file).
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind (overrides the config file).
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let cli = Cli::parse_from(["mockimg"]);
        assert!(cli.host.is_none());
        assert!(cli.port.is_none());
        assert!(cli.config.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn all_options() {
        let cli =
            Cli::parse_from(["mockimg", "--host", "0.0.0.0", "-p", "9000", "--config", "c.toml", "-v"]);
        assert_eq!(cli.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(cli.port, Some(9000));
        assert_eq!(cli.config.as_deref(), Some("c.toml"));
        assert!(cli.verbose);
    }

    #[test]
    fn rejects_non_numeric_port() {
        assert!(Cli::try_parse_from(["mockimg", "--port", "nope"]).is_err());
    }
}
