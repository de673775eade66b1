//! Structured output writer supporting JSON and human-readable modes.

use serde::Serialize;

use crate::cli_style::{format_bytes, format_count, print_error, print_info, Theme};
use crate::core::CombineResult;

/// Output mode for CLI results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

/// Structured combine report for JSON output
#[derive(Debug, Serialize)]
pub struct CombineReport {
    pub operation: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunks: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes_written: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub md5: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CombineReport {
    pub fn success(result: &CombineResult, chunks: usize) -> Self {
        Self {
            operation: "combine".to_string(),
            success: true,
            output: Some(result.output_path.display().to_string()),
            chunks: Some(chunks),
            bytes_written: Some(result.bytes_written),
            md5: Some(result.md5_hex.clone()),
            sha256: Some(result.sha256_hex.clone()),
            duration_secs: Some(result.duration.as_secs_f64()),
            error: None,
        }
    }

    pub fn failure(message: &str) -> Self {
        Self {
            operation: "combine".to_string(),
            success: false,
            output: None,
            chunks: None,
            bytes_written: None,
            md5: None,
            sha256: None,
            duration_secs: None,
            error: Some(message.to_string()),
        }
    }
}

/// Structured output writer that supports both human-readable and JSON output
#[derive(Debug, Clone)]
pub struct OutputWriter {
    pub mode: OutputMode,
}

impl OutputWriter {
    pub fn new(json: bool) -> Self {
        Self {
            mode: if json { OutputMode::Json } else { OutputMode::Human },
        }
    }

    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Print the final combine report
    pub fn report(&self, result: &CombineResult, chunks: usize) {
        match self.mode {
            OutputMode::Json => {
                if let Ok(json) = serde_json::to_string(&CombineReport::success(result, chunks)) {
                    println!("{}", json);
                }
            }
            OutputMode::Human => {
                println!();
                println!(
                    "{} Output: {}",
                    Theme::success("Done!"),
                    result.output_path.display()
                );
                println!(
                    "  Size:   {} bytes ({})",
                    format_count(result.bytes_written),
                    format_bytes(result.bytes_written)
                );
                println!("  MD5:    {}", result.md5_hex);
                println!("  SHA256: {}", result.sha256_hex);
                println!(
                    "  Time:   {:.2}s ({}/s)",
                    result.duration.as_secs_f64(),
                    format_bytes(result.throughput() as u64)
                );
            }
        }
    }

    /// Print an error in the active mode
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Json => {
                if let Ok(json) = serde_json::to_string(&CombineReport::failure(message)) {
                    println!("{}", json);
                }
            }
            OutputMode::Human => print_error(message),
        }
    }

    /// Print an informational message (suppressed in JSON mode)
    pub fn info(&self, message: &str) {
        if self.mode == OutputMode::Human {
            print_info(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    fn sample_result() -> CombineResult {
        CombineResult {
            output_path: PathBuf::from("/data/backup.tar.gz"),
            bytes_written: 1048576,
            md5_hex: "d41d8cd98f00b204e9800998ecf8427e".to_string(),
            sha256_hex: "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
                .to_string(),
            duration: Duration::from_millis(1500),
        }
    }

    #[test]
    fn test_success_report_serializes_without_error_field() {
        let report = CombineReport::success(&sample_result(), 3);
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"operation\":\"combine\""));
        assert!(json.contains("\"success\":true"));
        assert!(json.contains("\"chunks\":3"));
        assert!(json.contains("\"bytes_written\":1048576"));
        assert!(!json.contains("\"error\""));
    }

    #[test]
    fn test_failure_report_omits_result_fields() {
        let report = CombineReport::failure("no chunk files found");
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"success\":false"));
        assert!(json.contains("\"error\":\"no chunk files found\""));
        assert!(!json.contains("\"md5\""));
        assert!(!json.contains("\"bytes_written\""));
    }

    #[test]
    fn test_writer_mode_selection() {
        assert_eq!(OutputWriter::new(true).mode, OutputMode::Json);
        assert_eq!(OutputWriter::new(false).mode, OutputMode::Human);
        assert!(OutputWriter::new(true).is_json());
        assert!(!OutputWriter::new(false).is_json());
    }
}
