use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use spendlens_analysis::{AnalysisConfig, FixedMerchantRegistry};
use spendlens_core::DateOrder;
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::ensure_spendlens_home;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub analysis: AnalysisSection,
    pub report: ReportSection,
    pub llm: LlmSection,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisSection {
    /// Distinct months of debits before a merchant counts as recurring
    pub min_months: usize,
    /// Monthly savings goal
    pub target_savings: f64,
    /// Merchant labels treated as fixed obligations (exact description match)
    pub fixed_merchants: Vec<String>,
    /// How all-numeric statement dates are read: "mdy" or "dmy"
    pub date_order: DateOrder,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportSection {
    pub currency_symbol: String,
    pub top_merchants: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LlmSection {
    /// "openai" or "anthropic"
    pub provider: String,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for AnalysisSection {
    fn default() -> Self {
        let defaults = AnalysisConfig::default();
        Self {
            min_months: defaults.min_months,
            target_savings: 20000.0,
            fixed_merchants: defaults
                .fixed_merchants
                .labels()
                .map(str::to_string)
                .collect(),
            date_order: DateOrder::default(),
        }
    }
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
            top_merchants: AnalysisConfig::default().top_merchants,
        }
    }
}

impl Default for LlmSection {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com".to_string(),
            temperature: 0.4,
            max_tokens: 450,
        }
    }
}

impl Config {
    /// Analysis settings from the file, before CLI overrides
    pub fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig {
            min_months: self.analysis.min_months,
            fixed_merchants: FixedMerchantRegistry::from_labels(
                self.analysis.fixed_merchants.iter().cloned(),
            ),
            target_savings: self.analysis.target_savings,
            monthly_income: None,
            top_merchants: self.report.top_merchants,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_spendlens_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

/// Missing file means defaults
pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config_to(cfg: &Config, p: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}
