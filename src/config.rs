use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

/// Resolved command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database: PathBuf,
    pub history_file: Option<PathBuf>,
    pub timing: bool,
    pub log_level: String,
}

pub fn command() -> Command {
    Command::new("sqlite-cli-rust")
        .version("0.1.0")
        .about("An interactive SQLite shell with tab completion")
        .arg(
            Arg::new("database")
                .value_name("DATABASE")
                .help("SQLite database file to open")
                .env("SQLITE_CLI_DATABASE")
                .value_parser(value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new("history-file")
                .long("history-file")
                .value_name("PATH")
                .help("Load and save line history in this file")
                .env("SQLITE_CLI_HISTORY")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("timing")
                .long("timing")
                .help("Start with statement timing enabled")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Log filter used when RUST_LOG is not set")
                .default_value("warn"),
        )
}

impl Config {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            database: matches
                .get_one::<PathBuf>("database")
                .cloned()
                .unwrap_or_default(),
            history_file: matches.get_one::<PathBuf>("history-file").cloned(),
            timing: matches.get_flag("timing"),
            log_level: matches
                .get_one::<String>("log-level")
                .cloned()
                .unwrap_or_else(|| "warn".to_string()),
        }
    }

    pub fn try_parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = command().try_get_matches_from(args)?;
        Ok(Self::from_matches(&matches))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positional_database() {
        let config = Config::try_parse_from(["sqlite-cli-rust", "shop.db"]).unwrap();
        assert_eq!(config.database, PathBuf::from("shop.db"));
        assert!(!config.timing);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn parses_options() {
        let config = Config::try_parse_from([
            "sqlite-cli-rust",
            "--timing",
            "--history-file",
            "/tmp/history",
            "--log-level",
            "debug",
            "shop.db",
        ])
        .unwrap();
        assert!(config.timing);
        assert_eq!(config.history_file, Some(PathBuf::from("/tmp/history")));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn rejects_extra_positionals() {
        assert!(Config::try_parse_from(["sqlite-cli-rust", "a.db", "b.db"]).is_err());
    }

    #[test]
    fn command_definition_is_valid() {
        command().debug_assert();
    }
}
