use std::path::PathBuf;

use clap::Parser;

/// File the dashboard opens when no path is given, if it exists.
pub const DEFAULT_DATA_FILE: &str = "amazon_scored_powerbi.csv";

/// Compare actual and model-predicted product prices.
#[derive(Debug, Parser)]
#[command(name = "price-dashboard", version, about)]
pub struct Args {
    /// Scored dataset to open (.csv, .json or .parquet).
    pub data: Option<PathBuf>,

    /// Rows in the worst-predictions table.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub top_n: u64,

    /// Symbol printed in front of prices.
    #[arg(long, default_value = "₹")]
    pub currency: String,
}

/// Settings the dashboard runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub data_path: Option<PathBuf>,
    pub top_n: usize,
    pub currency: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            top_n: 10,
            currency: "₹".to_string(),
        }
    }
}

impl Args {
    /// Fall back to [`DEFAULT_DATA_FILE`] in the working directory when it exists.
    pub fn into_config(self) -> DashboardConfig {
        let data_path = self.data.or_else(|| {
            let default = PathBuf::from(DEFAULT_DATA_FILE);
            default.is_file().then_some(default)
        });
        DashboardConfig {
            data_path,
            top_n: usize::try_from(self.top_n).unwrap_or(usize::MAX),
            currency: self.currency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_dashboard() {
        let args = Args::try_parse_from(["price-dashboard"]).unwrap();
        assert_eq!(args.top_n, 10);
        assert_eq!(args.currency, "₹");
        assert!(args.data.is_none());
    }

    #[test]
    fn explicit_path_and_options() {
        let args = Args::try_parse_from([
            "price-dashboard",
            "scores.parquet",
            "--top-n",
            "25",
            "--currency",
            "$",
        ])
        .unwrap();
        let config = args.into_config();
        assert_eq!(config.data_path, Some(PathBuf::from("scores.parquet")));
        assert_eq!(config.top_n, 25);
        assert_eq!(config.currency, "$");
    }

    #[test]
    fn top_n_must_be_positive() {
        assert!(Args::try_parse_from(["price-dashboard", "--top-n", "0"]).is_err());
    }
}
