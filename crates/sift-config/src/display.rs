//! Human-friendly path rendering.

use std::path::Path;

use directories::BaseDirs;

/// Formats `path` for display relative to `cwd`.
///
/// Paths inside `cwd` are shown relative to it, paths under the home directory are shown with
/// a `~/` prefix, and anything else is shown as-is.
pub fn format_path_for_display(path: &Path, cwd: Option<&Path>) -> String {
    if let Some(cwd) = cwd
        && path.is_absolute()
        && let Some(relative) = pathdiff::diff_paths(path, cwd)
        && !relative.starts_with("..")
    {
        if relative.as_os_str().is_empty() {
            return ".".to_string();
        }
        return relative.display().to_string();
    }

    if let Some(dirs) = BaseDirs::new()
        && let Ok(rest) = path.strip_prefix(dirs.home_dir())
    {
        return Path::new("~").join(rest).display().to_string();
    }

    path.display().to_string()
}
