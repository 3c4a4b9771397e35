use std::path::{Path, PathBuf};

use crate::ytdlp::{ToolNames, ToolPaths};

/// Platform file name of an executable.
pub fn executable_name(base: &str) -> String {
    if cfg!(target_os = "windows") {
        format!("{}.exe", base)
    } else {
        base.to_string()
    }
}

/// Where the external executables are shipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeploymentMode {
    /// Tools ship next to the application binary.
    Bundled(PathBuf),
    /// Running from a source checkout, tools live in the working directory.
    Checkout(PathBuf),
}

impl DeploymentMode {
    /// Bundled when the transcoder sits beside the binary (or in the macOS
    /// `Resources` directory), otherwise a checkout rooted at the working
    /// directory.
    pub fn detect(names: &ToolNames) -> Self {
        let transcoder = executable_name(&names.transcoder);

        let bundle_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .and_then(|dir| {
                [dir.clone(), dir.join("..").join("Resources")]
                    .into_iter()
                    .find(|candidate| candidate.join(&transcoder).is_file())
            });

        match bundle_dir {
            Some(dir) => DeploymentMode::Bundled(dir),
            None => DeploymentMode::Checkout(
                std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            ),
        }
    }

    /// Path of a tool for this deployment. Existence is not checked.
    pub fn resolve(&self, base: &str) -> PathBuf {
        match self {
            DeploymentMode::Bundled(dir) | DeploymentMode::Checkout(dir) => {
                dir.join(executable_name(base))
            }
        }
    }

    pub fn tool_paths(&self, names: &ToolNames) -> ToolPaths {
        let downloader = match self {
            DeploymentMode::Bundled(_) => self.resolve(&names.downloader),
            DeploymentMode::Checkout(_) => {
                let local = self.resolve(&names.downloader);
                if local.is_file() {
                    local
                } else {
                    // Fall back to the copy on PATH
                    PathBuf::from(executable_name(&names.downloader))
                }
            }
        };

        ToolPaths {
            downloader,
            transcoder: self.resolve(&names.transcoder),
            script_runtime: self.resolve(&names.script_runtime),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_executable_name() {
        let name = executable_name("ffmpeg");
        if cfg!(target_os = "windows") {
            assert_eq!(name, "ffmpeg.exe");
        } else {
            assert_eq!(name, "ffmpeg");
        }
    }

    #[test]
    fn test_bundled_paths() {
        let mode = DeploymentMode::Bundled(PathBuf::from("/opt/app"));
        let paths = mode.tool_paths(&ToolNames::default());
        assert_eq!(paths.downloader, Path::new("/opt/app").join(executable_name("yt-dlp")));
        assert_eq!(paths.transcoder, Path::new("/opt/app").join(executable_name("ffmpeg")));
        assert_eq!(paths.script_runtime, Path::new("/opt/app").join(executable_name("qjs")));
    }

    #[test]
    fn test_checkout_paths_fall_back_to_path_lookup() {
        let mode = DeploymentMode::Checkout(PathBuf::from("/nonexistent/checkout"));
        let paths = mode.tool_paths(&ToolNames::default());
        assert_eq!(paths.downloader, PathBuf::from(executable_name("yt-dlp")));
        assert_eq!(
            paths.transcoder,
            Path::new("/nonexistent/checkout").join(executable_name("ffmpeg"))
        );
    }
}
