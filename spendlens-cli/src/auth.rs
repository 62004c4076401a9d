use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};

use crate::llm::Provider;
use crate::state::ensure_spendlens_home;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthState {
    pub anthropic_api_key: Option<String>,
    pub openai_api_key: Option<String>,
}

impl AuthState {
    /// Environment variable first, then the stored key
    pub fn api_key(&self, provider: Provider) -> Option<String> {
        let (env, stored) = match provider {
            Provider::OpenAI => ("OPENAI_API_KEY", &self.openai_api_key),
            Provider::Anthropic => ("ANTHROPIC_API_KEY", &self.anthropic_api_key),
        };
        std::env::var(env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| stored.clone())
    }
}

fn auth_path() -> Result<std::path::PathBuf> {
    Ok(ensure_spendlens_home()?.join("auth.json"))
}

pub fn load_auth() -> Result<AuthState> {
    let p = auth_path()?;
    if !p.exists() {
        return Ok(AuthState::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    serde_json::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

fn save_auth(auth: &AuthState) -> Result<()> {
    let p = auth_path()?;
    let s = serde_json::to_string_pretty(auth)?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

fn prompt_secret(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush().ok();
    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    Ok(s.trim().to_string())
}

pub fn paste_api_key(provider: Provider) -> Result<()> {
    let mut auth = load_auth()?;
    let (label, prefix) = match provider {
        Provider::OpenAI => ("Paste OpenAI API key (starts with sk-)", "sk-"),
        Provider::Anthropic => ("Paste Anthropic API key (starts with sk-ant-)", "sk-ant-"),
    };
    let key = prompt_secret(label)?;
    if !key.starts_with(prefix) {
        bail!("key didn't look like a {provider} key (expected prefix {prefix})");
    }
    match provider {
        Provider::OpenAI => auth.openai_api_key = Some(key),
        Provider::Anthropic => auth.anthropic_api_key = Some(key),
    }
    save_auth(&auth)?;
    println!("Saved {provider} key to {}", auth_path()?.display());
    Ok(())
}
