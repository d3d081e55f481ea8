// ABOUTME: Configuration types and parsing for nephos.yml.
// ABOUTME: Handles YAML parsing, discovery, defaults, and starter file generation.

mod credentials;
mod poll;

pub use credentials::{
    CLIENT_ID_VAR, CLIENT_SECRET_VAR, Credentials, SUBSCRIPTION_ID_VAR, TENANT_ID_VAR,
};
pub use poll::PollConfig;

use crate::error::{Error, Result};
use crate::provision::DeployMode;
use crate::types::Region;
use serde::Deserialize;
use std::path::Path;

pub const CONFIG_FILENAME: &str = "nephos.yml";
pub const CONFIG_FILENAME_ALT: &str = "nephos.yaml";

pub const DEFAULT_TEMPLATE_URI: &str = "https://raw.githubusercontent.com/Azure/azure-quickstart-templates/master/quickstarts/microsoft.web/app-service-docs-linux/azuredeploy.json";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Remote URI of the template to deploy. Content is opaque.
    pub template: String,

    #[serde(default, deserialize_with = "deserialize_region")]
    pub region: Region,

    #[serde(default, deserialize_with = "deserialize_mode")]
    pub mode: DeployMode,

    #[serde(default)]
    pub prefix: PrefixConfig,

    #[serde(default)]
    pub poll: PollConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrefixConfig {
    #[serde(default = "default_container_prefix")]
    pub container: String,

    #[serde(default = "default_deployment_prefix")]
    pub deployment: String,
}

fn default_container_prefix() -> String {
    "nephosrg".to_string()
}

fn default_deployment_prefix() -> String {
    "nephosdeploy".to_string()
}

impl Default for PrefixConfig {
    fn default() -> Self {
        Self {
            container: default_container_prefix(),
            deployment: default_deployment_prefix(),
        }
    }
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [dir.join(CONFIG_FILENAME), dir.join(CONFIG_FILENAME_ALT)];

        for path in &candidates {
            if path.exists() {
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    pub fn template_config() -> Self {
        Config {
            template: DEFAULT_TEMPLATE_URI.to_string(),
            region: Region::default(),
            mode: DeployMode::default(),
            prefix: PrefixConfig::default(),
            poll: PollConfig::default(),
        }
    }
}

pub fn init_config(
    dir: &Path,
    template_uri: Option<&str>,
    region: Option<&str>,
    force: bool,
) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let mut config = Config::template_config();

    if let Some(uri) = template_uri {
        config.template = uri.to_string();
    }

    if let Some(r) = region {
        config.region = Region::new(r).map_err(|e| Error::InvalidConfig(e.to_string()))?;
    }

    let yaml = generate_template_yaml(&config);
    std::fs::write(&config_path, yaml)?;

    Ok(())
}

fn generate_template_yaml(config: &Config) -> String {
    format!(
        r#"template: {}
region: {}
mode: incremental

poll:
  interval: 10s
  timeout: 30m
"#,
        config.template, config.region
    )
}

// Custom deserializers

fn deserialize_region<'de, D>(deserializer: D) -> std::result::Result<Region, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Region::new(&s).map_err(serde::de::Error::custom)
}

fn deserialize_mode<'de, D>(deserializer: D) -> std::result::Result<DeployMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    match s.as_str() {
        "incremental" => Ok(DeployMode::Incremental),
        "complete" => Ok(DeployMode::Complete),
        other => Err(serde::de::Error::custom(format!(
            "unknown deployment mode: {other} (expected incremental or complete)"
        ))),
    }
}
