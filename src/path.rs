//! Output path derivation for configuration snapshots
//!
//! The snapshot lives next to the project's other intermediate build outputs:
//! `<project dir>/<IntermediateOutputPath>/project.razor.json`. Build
//! properties may use either separator regardless of host platform.

use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use crate::project::{ProjectPropertyView, properties};

/// Fixed file name consumers look for
pub const CONFIGURATION_FILE_NAME: &str = "project.razor.json";

/// Derives where a project's snapshot document is written.
///
/// Pure: reads properties only, never touches the file system. A project
/// without an intermediate output directory is not one we track, so that
/// case yields `None` rather than an error.
#[derive(Debug, Clone)]
pub struct PathResolver {
    file_name: String,
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::new(CONFIGURATION_FILE_NAME)
    }
}

impl PathResolver {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    pub fn try_resolve_output_path<P>(&self, project: &P) -> Option<PathBuf>
    where
        P: ProjectPropertyView + ?Sized,
    {
        let intermediate = project.property(properties::INTERMEDIATE_OUTPUT_PATH);
        if intermediate.trim().is_empty() {
            return None;
        }

        let intermediate = PathBuf::from(normalize_separators(intermediate));
        let directory = if is_rooted(&intermediate) {
            intermediate
        } else {
            let project_dir = project.property(properties::PROJECT_DIRECTORY);
            if project_dir.trim().is_empty() {
                return None;
            }
            PathBuf::from(normalize_separators(project_dir))
                .join(intermediate)
        };

        Some(directory.join(&self.file_name))
    }
}

/// Rewrite both `/` and `\` to the host's native separator
pub fn normalize_separators(path: &str) -> String {
    path.chars()
        .map(|c| if c == '/' || c == '\\' { MAIN_SEPARATOR } else { c })
        .collect()
}

fn is_rooted(path: &Path) -> bool {
    // `has_root` keeps `\obj` rooted on Windows, where `is_absolute` needs a drive
    path.is_absolute() || path.has_root()
}
