use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};

use regex::Regex;
use thiserror::Error;
use tokio::process::Command;

use super::models::{ExternalToolConfig, PostProcessor};
use crate::domain::SavedMedia;

/// Prints one JSON object per file once it reached its final path.
const PRINT_TEMPLATE: &str = "after_move:%(.{title,filepath})j";

#[derive(Error, Debug)]
pub enum YtDlpError {
    #[error("Failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("yt-dlp {status}: {reason}")]
    Exited { status: ExitStatus, reason: String },
}

pub type Result<T> = std::result::Result<T, YtDlpError>;

#[derive(Debug, Clone)]
pub struct YtDlpClient {
    program: PathBuf,
}

impl YtDlpClient {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Command line for a single URL.
    pub fn build_args(config: &ExternalToolConfig, url: &str) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::new();

        args.push("-o".into());
        args.push(config.output_template.clone().into());

        if config.quiet {
            args.push("--quiet".into());
        }
        if config.no_warnings {
            args.push("--no-warnings".into());
        }

        args.push("--ffmpeg-location".into());
        args.push(config.ffmpeg_location.clone().into_os_string());

        for runtime in &config.js_runtimes {
            args.push("--js-runtimes".into());
            args.push(runtime.into());
        }

        args.push("-f".into());
        args.push(config.format.clone().into());

        if let Some(container) = &config.merge_output_format {
            args.push("--merge-output-format".into());
            args.push(container.into());
        }

        for processor in &config.postprocessors {
            match processor {
                PostProcessor::ExtractAudio {
                    preferred_codec,
                    preferred_quality,
                } => {
                    args.push("-x".into());
                    args.push("--audio-format".into());
                    args.push(preferred_codec.into());
                    args.push("--audio-quality".into());
                    args.push(format!("{}K", preferred_quality).into());
                }
            }
        }

        for extra in &config.postprocessor_args {
            args.push("--postprocessor-args".into());
            args.push(format!("{}:{}", extra.executable, extra.args.join(" ")).into());
        }

        args.push("--print".into());
        args.push(PRINT_TEMPLATE.into());
        args.push("--no-simulate".into());

        // Keeps a URL starting with '-' from being read as an option.
        args.push("--".into());
        args.push(url.into());

        args
    }

    /// Downloads and post-processes one URL, waiting for `yt-dlp` to exit.
    pub async fn download(&self, url: &str, config: &ExternalToolConfig) -> Result<Vec<SavedMedia>> {
        let args = Self::build_args(config, url);
        tracing::debug!(program = %self.program.display(), ?args, "launching yt-dlp");

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| YtDlpError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            return Err(YtDlpError::Exited {
                status: output.status,
                reason: failure_reason(&stderr),
            });
        }

        if !stderr.trim().is_empty() {
            tracing::debug!(%url, stderr = %stderr.trim(), "yt-dlp diagnostics");
        }

        Ok(parse_saved_media(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Reads the JSON lines produced by the `--print` template.
pub fn parse_saved_media(stdout: &str) -> Vec<SavedMedia> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| match serde_json::from_str::<SavedMedia>(line) {
            Ok(media) => Some(media),
            Err(e) => {
                tracing::debug!(%line, error = %e, "skipping unexpected yt-dlp output");
                None
            }
        })
        .collect()
}

fn extract_error_line(stderr: &str) -> Option<String> {
    // Matches "ERROR: [extractor] id: message", the extractor tag is optional
    let re = Regex::new(r"(?m)^ERROR:\s*(?:\[[^\]]*\]\s*)?(.+?)\s*$").ok()?;
    re.captures_iter(stderr)
        .last()
        .map(|caps| caps[1].to_string())
}

/// Best human-readable reason for a failed run.
pub fn failure_reason(stderr: &str) -> String {
    extract_error_line(stderr)
        .or_else(|| {
            stderr
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .last()
                .map(str::to_string)
        })
        .unwrap_or_else(|| "no error output".to_string())
}
