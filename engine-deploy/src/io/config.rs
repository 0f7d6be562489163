//! Deploy configuration stored in `deploy.toml` at the working root.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// File name of the optional configuration, relative to the working root.
pub const CONFIG_FILE_NAME: &str = "deploy.toml";

/// Deploy configuration (TOML).
///
/// Every field is optional in the file; missing fields keep the defaults,
/// which describe the standard engine checkout layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DeployConfig {
    /// Recipe files processed in order, relative to the working root.
    pub recipes: Vec<String>,

    /// Directory (relative to the working root) holding one deploy root per engine hash.
    pub deploy_dir: String,

    /// Engine checkout subtree: where the hash is read and the configuration tool runs.
    pub engine_subtree: String,

    pub toolchain: ToolchainConfig,
    pub gn: GnConfig,
    pub ninja: NinjaConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ToolchainConfig {
    /// Prebuilt toolchain `bin` directory prepended to `PATH`.
    pub bin: String,
    /// Variable set to `True` for every command of the run.
    pub prebuilt_flag: String,
    /// Variable set to the parent of the working root.
    pub checkout_var: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GnConfig {
    /// Configuration tool, relative to the working root.
    pub tool: String,
    /// Flags placed before each build step's own arguments.
    pub flags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NinjaConfig {
    pub program: String,
    /// Build output directory; each build config lives at `<out_dir>/<config>`.
    pub out_dir: String,
}

const DEFAULT_RECIPES: [&str; 6] = ["host", "mac", "android_debug", "android_aot", "ios", "web"];

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            recipes: DEFAULT_RECIPES
                .iter()
                .map(|name| format!("flutter/ci/builders/clay_builders/{name}.json"))
                .collect(),
            deploy_dir: "deploy".to_string(),
            engine_subtree: "flutter".to_string(),
            toolchain: ToolchainConfig::default(),
            gn: GnConfig::default(),
            ninja: NinjaConfig::default(),
        }
    }
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            bin: "flutter/third_party/dart/tools/sdks/dart-sdk/bin".to_string(),
            prebuilt_flag: "FLUTTER_PREBUILT_DART_SDK".to_string(),
            checkout_var: "ENGINE_CHECKOUT_PATH".to_string(),
        }
    }
}

impl Default for GnConfig {
    fn default() -> Self {
        Self {
            tool: "flutter/tools/gn".to_string(),
            flags: vec!["--no-goma".to_string()],
        }
    }
}

impl Default for NinjaConfig {
    fn default() -> Self {
        Self {
            program: "ninja".to_string(),
            out_dir: "out".to_string(),
        }
    }
}

impl DeployConfig {
    pub fn validate(&self) -> Result<()> {
        if self.recipes.is_empty() {
            return Err(anyhow!("recipes must be a non-empty array"));
        }
        if let Some(blank) = self.recipes.iter().position(|r| r.trim().is_empty()) {
            return Err(anyhow!("recipes[{blank}] must not be empty"));
        }
        if self.deploy_dir.trim().is_empty() {
            return Err(anyhow!("deploy_dir must not be empty"));
        }
        if self.gn.tool.trim().is_empty() {
            return Err(anyhow!("gn.tool must not be empty"));
        }
        if self.ninja.program.trim().is_empty() {
            return Err(anyhow!("ninja.program must not be empty"));
        }
        if self.toolchain.prebuilt_flag.trim().is_empty()
            || self.toolchain.checkout_var.trim().is_empty()
        {
            return Err(anyhow!(
                "toolchain.prebuilt_flag and toolchain.checkout_var must not be empty"
            ));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `DeployConfig::default()`.
pub fn load_config(path: &Path) -> Result<DeployConfig> {
    if !path.exists() {
        let cfg = DeployConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: DeployConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}
