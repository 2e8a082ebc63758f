use crate::error::{QvizError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Where a rendered image ends up: a user-supplied file, or the platform
/// image viewer when no output path was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    File(PathBuf),
    Viewer,
}

impl OutputTarget {
    pub fn resolve(output: Option<PathBuf>) -> Self {
        match output {
            Some(path) => OutputTarget::File(path),
            None => OutputTarget::Viewer,
        }
    }
}

/// Hands an image file to the platform viewer (the CLI stand-in for an
/// interactive plot window). Does not wait for the viewer to close.
pub fn show_image(image_path: &Path) -> Result<()> {
    let mut command = viewer_command(image_path);
    log::info!("opening {} in the system image viewer", image_path.display());
    command
        .spawn()
        .map_err(|e| QvizError::Viewer(e.to_string()))?;
    Ok(())
}

#[cfg(target_os = "macos")]
fn viewer_command(image_path: &Path) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(image_path);
    cmd
}

#[cfg(windows)]
fn viewer_command(image_path: &Path) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", ""]).arg(image_path);
    cmd
}

#[cfg(not(any(target_os = "macos", windows)))]
fn viewer_command(image_path: &Path) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(image_path);
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_with_output_path() {
        let target = OutputTarget::resolve(Some(PathBuf::from("out.png")));
        assert_eq!(target, OutputTarget::File(PathBuf::from("out.png")));
    }

    #[test]
    fn test_resolve_without_output_path() {
        assert_eq!(OutputTarget::resolve(None), OutputTarget::Viewer);
    }
}
