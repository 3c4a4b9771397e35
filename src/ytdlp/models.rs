use std::path::PathBuf;

use serde::Serialize;

/// Options handed to one `yt-dlp` invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalToolConfig {
    pub output_template: String,
    pub quiet: bool,
    pub no_warnings: bool,
    pub ffmpeg_location: PathBuf,
    /// Entries of the form `<runtime>:<path>`.
    pub js_runtimes: Vec<String>,
    pub format: String,
    pub merge_output_format: Option<String>,
    pub postprocessors: Vec<PostProcessor>,
    pub postprocessor_args: Vec<PostProcessorArgs>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "key")]
pub enum PostProcessor {
    #[serde(rename = "FFmpegExtractAudio")]
    ExtractAudio {
        preferred_codec: String,
        /// Bitrate in kbit/s.
        preferred_quality: String,
    },
}

/// Extra arguments for one post-processing executable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostProcessorArgs {
    pub executable: String,
    pub args: Vec<String>,
}

/// Resolved locations of the external executables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    pub downloader: PathBuf,
    pub transcoder: PathBuf,
    pub script_runtime: PathBuf,
}

/// Base names of the external executables, without platform suffix.
#[derive(Debug, Clone)]
pub struct ToolNames {
    pub downloader: String,
    pub transcoder: String,
    pub script_runtime: String,
}

impl Default for ToolNames {
    fn default() -> Self {
        Self {
            downloader: "yt-dlp".to_string(),
            transcoder: "ffmpeg".to_string(),
            script_runtime: "qjs".to_string(),
        }
    }
}
