//! Downloader options builder
//!
//! Turns the user's job settings into the option set passed to `yt-dlp`
//! for every URL of a batch.

use crate::domain::{JobConfig, MediaType, QualityTier};
use crate::ytdlp::{ExternalToolConfig, PostProcessor, PostProcessorArgs, ToolPaths};

/// Fixed encoding parameters
#[derive(Debug, Clone)]
pub struct OptionDefaults {
    pub audio_codec: String,
    /// kbit/s
    pub audio_bitrate: u32,
    pub merge_container: String,
    pub loudnorm_filter: String,
    /// Identifier of the script runtime for `--js-runtimes`
    pub js_runtime_kind: String,
}

impl Default for OptionDefaults {
    fn default() -> Self {
        Self {
            audio_codec: "mp3".to_string(),
            audio_bitrate: 192,
            merge_container: "mp4".to_string(),
            loudnorm_filter: "loudnorm=I=-16:TP=-1.5:LRA=11".to_string(),
            js_runtime_kind: "quickjs".to_string(),
        }
    }
}

/// Downloader options builder
#[derive(Debug, Clone)]
pub struct OptionsBuilder {
    tools: ToolPaths,
    defaults: OptionDefaults,
}

impl OptionsBuilder {
    /// Create a builder with the default encoding parameters
    pub fn new(tools: ToolPaths) -> Self {
        Self {
            tools,
            defaults: OptionDefaults::default(),
        }
    }

    /// Build the option set for one invocation
    pub fn build(&self, job: &JobConfig) -> ExternalToolConfig {
        let output_template = job
            .destination
            .join("%(title)s.%(ext)s")
            .display()
            .to_string();

        let mut config = ExternalToolConfig {
            output_template,
            quiet: true,
            no_warnings: true,
            ffmpeg_location: self.tools.transcoder.clone(),
            js_runtimes: vec![format!(
                "{}:{}",
                self.defaults.js_runtime_kind,
                self.tools.script_runtime.display()
            )],
            format: String::new(),
            merge_output_format: None,
            postprocessors: Vec::new(),
            postprocessor_args: Vec::new(),
        };

        if job.normalize_loudness {
            config.postprocessor_args.push(PostProcessorArgs {
                executable: "ffmpeg".to_string(),
                args: vec!["-af".to_string(), self.defaults.loudnorm_filter.clone()],
            });
        }

        match job.media_type {
            MediaType::Audio => {
                config.format = "bestaudio/best".to_string();
                config.postprocessors.push(PostProcessor::ExtractAudio {
                    preferred_codec: self.defaults.audio_codec.clone(),
                    preferred_quality: self.defaults.audio_bitrate.to_string(),
                });
            }
            MediaType::Video => {
                config.format = format_expression(job.quality);
                config.merge_output_format = Some(self.defaults.merge_container.clone());
            }
        }

        config
    }
}

/// Format selection for video jobs.
///
/// Capped tiers prefer a split mp4/m4a pair under the cap and fall back to
/// the best single file under the same cap.
pub fn format_expression(quality: QualityTier) -> String {
    match quality.max_height() {
        Some(height) => format!(
            "bestvideo[height<={h}][ext=mp4]+bestaudio[ext=m4a]/best[height<={h}]",
            h = height
        ),
        None => "bestvideo+bestaudio/best".to_string(),
    }
}
