use clap::{CommandFactory, Parser};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "store_prices_tui", version, about = "Store price comparison TUI")]
pub struct CliArgs {
    /// Print a dataset summary and exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless output as JSON
    #[arg(long)]
    pub json: bool,

    /// Include the price details of this store in headless output
    #[arg(long, value_name = "NAME", requires = "headless")]
    pub store: Option<String>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override dataset path
    #[arg(long, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Override the item search debounce delay
    #[arg(long = "debounce-ms", value_name = "MS")]
    pub debounce_ms: Option<u64>,

    /// Write logs to this file
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(data) = &self.data {
            std::env::set_var("DATA_PATH", data);
        }
        if let Some(ms) = self.debounce_ms {
            std::env::set_var("SEARCH_DEBOUNCE_MS", ms.to_string());
        }
        if let Some(path) = &self.log_file {
            std::env::set_var("LOG_FILE", path);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_overrides() {
        let args = CliArgs::parse_from([
            "store_prices_tui",
            "--headless",
            "--json",
            "--store",
            "BIG STORE WA",
            "--debounce-ms",
            "150",
        ]);
        assert!(args.headless);
        assert!(args.json);
        assert_eq!(args.store.as_deref(), Some("BIG STORE WA"));
        assert_eq!(args.debounce_ms, Some(150));
    }

    #[test]
    fn store_requires_headless() {
        assert!(CliArgs::try_parse_from(["store_prices_tui", "--store", "X"]).is_err());
    }

    #[test]
    fn help_mentions_data_flag() {
        assert!(CliArgs::help_text().contains("--data"));
    }
}
