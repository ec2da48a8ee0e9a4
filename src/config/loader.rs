//! Config file loading and saving

use crate::domain::Config;
use crate::error::{IngestError, Result};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            "toml" => Ok(ConfigFormat::Toml),
            _ => Err(IngestError::UnsupportedConfigFormat(path.to_path_buf())),
        }
    }
}

pub fn load_config(config_file: &Path) -> Result<Config> {
    if !config_file.exists() {
        return Err(IngestError::ConfigNotFound(config_file.to_path_buf()));
    }

    let format = ConfigFormat::from_path(config_file)?;
    let content = fs::read_to_string(config_file)?;

    let parsed: std::result::Result<Config, String> = match format {
        ConfigFormat::Yaml => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
        ConfigFormat::Toml => toml::from_str(&content).map_err(|e| e.to_string()),
    };

    parsed.map_err(|message| IngestError::ConfigParse { path: config_file.to_path_buf(), message })
}

/// Serialize the whole document back to `config_file`, replacing its contents.
pub fn save_config(config_file: &Path, config: &Config) -> Result<()> {
    let format = ConfigFormat::from_path(config_file)?;
    let parse_err =
        |message: String| IngestError::ConfigParse { path: config_file.to_path_buf(), message };

    let rendered = match format {
        ConfigFormat::Yaml => serde_yaml::to_string(config).map_err(|e| parse_err(e.to_string()))?,
        ConfigFormat::Toml => toml::to_string_pretty(config).map_err(|e| parse_err(e.to_string()))?,
    };

    tracing::debug!("Writing configuration to {}", config_file.display());
    fs::write(config_file, rendered)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::IngestMetadata;
    use chrono::{Local, SubsecRound};
    use std::fs;
    use tempfile::TempDir;

    const SAMPLE_YAML: &str = r#"
settings:
  output_dir: /data/ingested
  token_counter: $HOME/bin/tc
  default_max_size: 1048576
repositories:
  repo1:
    source: /src/repo1
    description: First repository
    exclusions:
      - "*.lock"
      - "docs/"
profiles:
  standard:
    description: Everyday profile
    additional_exclusions:
      - "tests/"
"#;

    fn sample_metadata() -> IngestMetadata {
        IngestMetadata {
            last_updated: Local::now().trunc_subsecs(0),
            token_count: 482_113,
            character_count: 1_928_452,
            file_count: 87,
            last_file: "repo1_latest_482k.md".to_string(),
            profile: "standard".to_string(),
            hash: "0badc0de".to_string(),
        }
    }

    #[test]
    fn missing_file_is_config_not_found() {
        let tmp = TempDir::new().expect("tmp");
        let err = load_config(&tmp.path().join("gitingest.yaml")).expect_err("missing");
        assert!(matches!(err, IngestError::ConfigNotFound(_)));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("gitingest.ini");
        fs::write(&path, "[settings]\n").expect("write");
        let err = load_config(&path).expect_err("ini");
        assert!(matches!(err, IngestError::UnsupportedConfigFormat(_)));
    }

    #[test]
    fn loads_yaml_document() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("gitingest.yaml");
        fs::write(&path, SAMPLE_YAML).expect("write");

        let cfg = load_config(&path).expect("config");
        assert_eq!(cfg.settings.default_max_size, Some(1_048_576));
        let repo = &cfg.repositories["repo1"];
        assert_eq!(repo.exclusions, vec!["*.lock", "docs/"]);
        assert!(repo.metadata.is_none());
        assert_eq!(cfg.profiles["standard"].additional_exclusions, vec!["tests/"]);
    }

    #[test]
    fn malformed_yaml_reports_parse_error() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("gitingest.yaml");
        fs::write(&path, "settings: [unclosed\n").expect("write");
        let err = load_config(&path).expect_err("bad yaml");
        assert!(matches!(err, IngestError::ConfigParse { .. }));
    }

    #[test]
    fn yaml_metadata_round_trips() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("gitingest.yaml");
        fs::write(&path, SAMPLE_YAML).expect("write");

        let mut cfg = load_config(&path).expect("config");
        let metadata = sample_metadata();
        cfg.repositories.get_mut("repo1").expect("repo1").metadata = Some(metadata.clone());
        save_config(&path, &cfg).expect("save");

        let reloaded = load_config(&path).expect("reload");
        similar_asserts::assert_eq!(reloaded.repositories["repo1"].metadata, Some(metadata));
        similar_asserts::assert_eq!(reloaded, cfg);
    }

    #[test]
    fn toml_metadata_round_trips() {
        let tmp = TempDir::new().expect("tmp");
        let yaml_path = tmp.path().join("gitingest.yaml");
        fs::write(&yaml_path, SAMPLE_YAML).expect("write");
        let mut cfg = load_config(&yaml_path).expect("config");
        cfg.repositories.get_mut("repo1").expect("repo1").metadata = Some(sample_metadata());

        let toml_path = tmp.path().join("gitingest.toml");
        save_config(&toml_path, &cfg).expect("save toml");
        let reloaded = load_config(&toml_path).expect("reload toml");
        similar_asserts::assert_eq!(reloaded, cfg);
    }

    #[test]
    fn compact_legacy_timestamp_is_accepted() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("gitingest.yml");
        let legacy = r#"
settings:
  output_dir: out
  token_counter: tc
repositories:
  repo1:
    source: /src/repo1
    metadata:
      last_updated: "20250131_142501"
      token_count: 1000
      character_count: 4000
      file_count: 3
      last_file: repo1_latest_1k.md
      profile: standard
      hash: abcdef12
"#;
        fs::write(&path, legacy).expect("write");
        let cfg = load_config(&path).expect("config");
        let metadata = cfg.repositories["repo1"].metadata.as_ref().expect("metadata");
        assert_eq!(metadata.token_count, 1000);
        assert_eq!(metadata.last_file, "repo1_latest_1k.md");
    }
}
