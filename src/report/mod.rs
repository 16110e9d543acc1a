use crate::domain::model::SplitOutcome;
use crate::domain::ports::{Reporter, Storage};
use crate::utils::error::{GroupSplitError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Text,
    Json,
    Csv,
}

impl ReportFormat {
    pub fn file_name(&self) -> &'static str {
        match self {
            ReportFormat::Text => "groups.txt",
            ReportFormat::Json => "groups.json",
            ReportFormat::Csv => "groups.csv",
        }
    }

    pub fn render(&self, outcome: &SplitOutcome, timestamp_format: &str) -> Result<String> {
        match self {
            ReportFormat::Text => Ok(render_text(outcome, timestamp_format)),
            ReportFormat::Json => render_json(outcome),
            ReportFormat::Csv => render_csv(outcome),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportFormat::Text => "text",
            ReportFormat::Json => "json",
            ReportFormat::Csv => "csv",
        };
        f.write_str(name)
    }
}

impl FromStr for ReportFormat {
    type Err = GroupSplitError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "csv" => Ok(ReportFormat::Csv),
            other => Err(GroupSplitError::InvalidConfigValueError {
                field: "report.formats".to_string(),
                value: other.to_string(),
                reason: "Unsupported format. Valid formats: text, json, csv".to_string(),
            }),
        }
    }
}

pub fn render_text(outcome: &SplitOutcome, timestamp_format: &str) -> String {
    let mut lines = vec![format!(
        "{}, the obtained groups split:",
        outcome.generated_at.format(timestamp_format)
    )];
    for (group, members) in outcome.groups.iter() {
        lines.push(format!("The group {}: [{}]", group, members.join(", ")));
    }
    lines.join("\n") + "\n"
}

pub fn render_json(outcome: &SplitOutcome) -> Result<String> {
    Ok(serde_json::to_string_pretty(outcome)?)
}

pub fn render_csv(outcome: &SplitOutcome) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["group", "position", "participant"])?;

    for (group, members) in outcome.groups.iter() {
        for (position, member) in members.iter().enumerate() {
            let position = (position + 1).to_string();
            writer.write_record([group, position.as_str(), member.as_str()])?;
        }
    }

    let data = writer.into_inner().map_err(|e| GroupSplitError::ReportError {
        message: format!("Failed to flush CSV writer: {}", e),
    })?;
    String::from_utf8(data).map_err(|e| GroupSplitError::ReportError {
        message: format!("CSV output is not valid UTF-8: {}", e),
    })
}

/// 將分組結果寫入日誌
pub fn log_split(outcome: &SplitOutcome, timestamp_format: &str) {
    tracing::info!(
        "{}, the obtained groups split:",
        outcome.generated_at.format(timestamp_format)
    );
    for (group, members) in outcome.groups.iter() {
        tracing::info!("The group {}: {:?}", group, members);
    }
    if let Some(seed) = outcome.seed {
        tracing::info!("🎲 Split seed: {} (pass --seed {} to reproduce)", seed, seed);
    }
}

/// Prints every requested format to stdout.
#[derive(Debug, Clone)]
pub struct ConsoleReporter {
    formats: Vec<ReportFormat>,
    timestamp_format: String,
}

impl ConsoleReporter {
    pub fn new(formats: Vec<ReportFormat>, timestamp_format: impl Into<String>) -> Self {
        Self {
            formats,
            timestamp_format: timestamp_format.into(),
        }
    }
}

impl Reporter for ConsoleReporter {
    fn report(&self, outcome: &SplitOutcome) -> Result<Vec<String>> {
        log_split(outcome, &self.timestamp_format);

        for format in &self.formats {
            print!("{}", format.render(outcome, &self.timestamp_format)?);
        }
        Ok(vec!["stdout".to_string()])
    }
}

/// 將每種格式寫成檔案
#[derive(Debug, Clone)]
pub struct FileReporter<S: Storage> {
    storage: S,
    formats: Vec<ReportFormat>,
    timestamp_format: String,
}

impl<S: Storage> FileReporter<S> {
    pub fn new(storage: S, formats: Vec<ReportFormat>, timestamp_format: impl Into<String>) -> Self {
        Self {
            storage,
            formats,
            timestamp_format: timestamp_format.into(),
        }
    }
}

impl<S: Storage> Reporter for FileReporter<S> {
    fn report(&self, outcome: &SplitOutcome) -> Result<Vec<String>> {
        log_split(outcome, &self.timestamp_format);

        let mut written = Vec::with_capacity(self.formats.len());
        for format in &self.formats {
            let content = format.render(outcome, &self.timestamp_format)?;
            let path = self
                .storage
                .write_file(format.file_name(), content.as_bytes())?;
            tracing::debug!("Wrote {} report to {}", format, path);
            written.push(path);
        }
        Ok(written)
    }
}
