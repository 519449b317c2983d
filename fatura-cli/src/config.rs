use anyhow::{Context, Result};
use fatura_scrape::ScrapeOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub clock: ClockSection,
    pub scrape: ScrapeOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockSection {
    /// IANA zone used for the DTSERVER stamp
    pub timezone: String,
}

impl Default for ClockSection {
    fn default() -> Self {
        Self {
            timezone: "America/Sao_Paulo".to_string(),
        }
    }
}

/// `$HOME/.fatura/config.toml`
pub fn default_config_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".fatura").join("config.toml"))
}

/// Load `path`, or the default location; missing default file means defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let p = default_config_path()?;
            if !p.exists() {
                return Ok(Config::default());
            }
            p
        }
    };
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn parse_config(s: &str) -> Result<Config> {
    Ok(toml::from_str(s)?)
}

pub fn render_config(cfg: &Config) -> Result<String> {
    toml::to_string_pretty(cfg).context("serialize config")
}

pub fn init_config(path: Option<&Path>) -> Result<()> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    if let Some(dir) = p.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let s = render_config(&Config::default())?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fatura_scrape::{ContainerKind, RowPolicy};

    #[test]
    fn test_defaults_round_trip_through_toml() {
        let rendered = render_config(&Config::default()).unwrap();
        let parsed = parse_config(&rendered).unwrap();
        assert_eq!(parsed.clock.timezone, "America/Sao_Paulo");
        assert_eq!(parsed.scrape, ScrapeOptions::default());
    }

    #[test]
    fn test_partial_file() {
        let cfg = parse_config(
            r#"
[scrape]
container = "table-body"
row_policy = "skip"

[scrape.markers]
due_date = ".vencimento strong"
"#,
        )
        .unwrap();
        assert_eq!(cfg.clock.timezone, "America/Sao_Paulo");
        assert_eq!(cfg.scrape.container, Some(ContainerKind::TableBody));
        assert_eq!(cfg.scrape.row_policy, RowPolicy::Skip);
        assert_eq!(cfg.scrape.markers.due_date, ".vencimento strong");
        assert_eq!(cfg.scrape.markers.amount_cell, ".amount");
    }

    #[test]
    fn test_init_writes_defaults_once() {
        let dir = std::env::temp_dir().join(format!("fatura-config-{}", std::process::id()));
        let path = dir.join("nested").join("config.toml");
        let _ = fs::remove_dir_all(&dir);

        init_config(Some(&path)).unwrap();
        fs::write(&path, "[clock]\ntimezone = \"UTC\"\n").unwrap();
        init_config(Some(&path)).unwrap();

        let cfg = load_config(Some(&path)).unwrap();
        assert_eq!(cfg.clock.timezone, "UTC");
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_unknown_layout_is_rejected() {
        assert!(parse_config("[scrape]\ncontainer = \"div\"\n").is_err());
    }
}
