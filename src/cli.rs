//! CLI argument parsing using clap

use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;

/// Run notebooks with filesystem output caching
#[derive(Parser, Debug)]
#[command(name = "nbcache")]
#[command(version)]
#[command(
    about = "Execute notebook cells and cache their outputs on the filesystem",
    long_about = None
)]
pub struct Cli {
    /// Notebook files to process; each result is written to stdout
    #[arg(value_name = "NOTEBOOKS", required = true)]
    pub notebooks: Vec<PathBuf>,

    /// Cache directory (default: nb_output_cache under the temp dir)
    #[arg(long = "cache-dir", value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Number of leading code cells treated as setup
    #[arg(long = "setup-cells", value_name = "N", default_value = "1")]
    pub setup_cells: usize,
}

impl Cli {
    /// Parse command line arguments into a Config
    pub fn into_config(self) -> (Config, Vec<PathBuf>) {
        let defaults = Config::default();
        let config = Config {
            cache_dir: self.cache_dir.unwrap_or(defaults.cache_dir),
            setup_cells: self.setup_cells,
        };
        (config, self.notebooks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["nbcache", "nb.ipynb"]);
        let (config, notebooks) = cli.into_config();

        assert_eq!(config.setup_cells, 1);
        assert!(config.cache_dir.ends_with("nb_output_cache"));
        assert_eq!(notebooks, vec![PathBuf::from("nb.ipynb")]);
    }

    #[test]
    fn test_cli_cache_dir_override() {
        let cli = Cli::parse_from(["nbcache", "--cache-dir", "/var/cache/nb", "nb.ipynb"]);
        let (config, _) = cli.into_config();

        assert_eq!(config.cache_dir, PathBuf::from("/var/cache/nb"));
    }

    #[test]
    fn test_cli_setup_cells_override() {
        let cli = Cli::parse_from(["nbcache", "--setup-cells", "3", "nb.ipynb"]);
        let (config, _) = cli.into_config();

        assert_eq!(config.setup_cells, 3);
    }

    #[test]
    fn test_cli_multiple_notebooks() {
        let cli = Cli::parse_from(["nbcache", "a.ipynb", "b.ipynb"]);
        let (_, notebooks) = cli.into_config();

        assert_eq!(
            notebooks,
            vec![PathBuf::from("a.ipynb"), PathBuf::from("b.ipynb")]
        );
    }

    #[test]
    fn test_cli_requires_notebook_argument() {
        let result = Cli::try_parse_from(["nbcache"]);
        assert!(result.is_err());
    }
}
