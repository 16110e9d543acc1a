use crate::core::RosterProvider;
use crate::domain::model::{Participant, PriorAssignment};
use crate::report::{ReportFormat, DEFAULT_TIMESTAMP_FORMAT};
use crate::utils::error::{GroupSplitError, Result};
use crate::utils::validation::{validate_path, validate_roster, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 內建的示範名單，找不到設定檔時使用
const BUILTIN_ROSTER: &str = include_str!("../../group-split.toml");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub roster: RosterConfig,
    #[serde(default)]
    pub priors: PriorAssignment,
    #[serde(default)]
    pub split: SplitConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    pub name: Option<String>,
    pub participants: Vec<Participant>,
    pub groups: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SplitConfig {
    pub seed: Option<u64>,
    pub validate: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    pub formats: Option<Vec<ReportFormat>>,
    pub output_path: Option<String>,
    pub timestamp_format: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| GroupSplitError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_ROSTER)
    }

    /// 替換環境變數 (例如 ${ROSTER_NAME})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| GroupSplitError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn roster_name(&self) -> &str {
        self.roster.name.as_deref().unwrap_or("unnamed roster")
    }

    pub fn validation_enabled(&self) -> bool {
        self.split.validate.unwrap_or(true)
    }

    pub fn formats(&self) -> Vec<ReportFormat> {
        self.report
            .formats
            .clone()
            .filter(|formats| !formats.is_empty())
            .unwrap_or_else(|| vec![ReportFormat::Text])
    }

    pub fn output_path(&self) -> Option<&str> {
        self.report.output_path.as_deref()
    }

    pub fn timestamp_format(&self) -> &str {
        self.report
            .timestamp_format
            .as_deref()
            .unwrap_or(DEFAULT_TIMESTAMP_FORMAT)
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        if let Some(path) = self.output_path() {
            validate_path("report.output_path", path)?;
        }

        if self.validation_enabled() {
            validate_roster(&self.roster.participants, &self.roster.groups, &self.priors)?;
        }

        Ok(())
    }
}

impl RosterProvider for TomlConfig {
    fn participants(&self) -> &[Participant] {
        &self.roster.participants
    }

    fn group_names(&self) -> &[String] {
        &self.roster.groups
    }

    fn priors(&self) -> &PriorAssignment {
        &self.priors
    }

    fn seed(&self) -> Option<u64> {
        self.split.seed
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[roster]
name = "weekly"
participants = ["P1", "P2", "P3", "P4"]
groups = ["A", "B"]

[[priors]]
group = "B"
members = ["P4"]

[split]
seed = 9

[report]
formats = ["json", "csv"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.roster_name(), "weekly");
        assert_eq!(config.participants().len(), 4);
        assert_eq!(config.priors().len(), 1);
        assert_eq!(config.seed(), Some(9));
        assert_eq!(config.formats(), vec![ReportFormat::Json, ReportFormat::Csv]);
        assert!(config.validation_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_optional_sections_default() {
        let toml_content = r#"
[roster]
participants = ["P1", "P2"]
groups = ["A"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert!(config.priors().is_empty());
        assert_eq!(config.seed(), None);
        assert_eq!(config.formats(), vec![ReportFormat::Text]);
        assert_eq!(config.output_path(), None);
        assert_eq!(config.timestamp_format(), DEFAULT_TIMESTAMP_FORMAT);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("GROUP_SPLIT_TEST_NAME", "friday league");

        let toml_content = r#"
[roster]
name = "${GROUP_SPLIT_TEST_NAME}"
participants = ["P1", "P2"]
groups = ["A", "B"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.roster_name(), "friday league");

        std::env::remove_var("GROUP_SPLIT_TEST_NAME");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[roster]
participants = ["P1", "P2", "P3"]
groups = ["A", "B"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_disabled_validation_skips_roster_checks() {
        let toml_content = r#"
[roster]
participants = ["P1", "P2"]
groups = ["A", "B"]

[[priors]]
group = "A"
members = ["P9"]

[split]
validate = false
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(!config.validation_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_format_is_a_parse_error() {
        let toml_content = r#"
[roster]
participants = ["P1"]
groups = ["A"]

[report]
formats = ["xml"]
"#;

        assert!(matches!(
            TomlConfig::from_toml_str(toml_content),
            Err(GroupSplitError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_builtin_roster_is_valid() {
        let config = TomlConfig::builtin().unwrap();
        assert_eq!(config.participants().len(), 18);
        assert_eq!(config.group_names(), &["A".to_string(), "B".to_string()]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[roster]
name = "file-test"
participants = ["P1", "P2"]
groups = ["A", "B"]
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.roster_name(), "file-test");
    }
}
