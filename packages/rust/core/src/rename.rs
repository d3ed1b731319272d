//! Prefix renamer: strips a fixed prefix from file names in one section.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use docsmith_shared::{DocsmithError, Result};

/// One copy performed (or planned) by the renamer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renamed {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Options for a prefix-stripping pass.
#[derive(Debug, Clone)]
pub struct RenameOptions {
    /// Directory whose files are renamed.
    pub dir: PathBuf,
    /// Prefix removed from matching file names.
    pub prefix: String,
    /// Delete the source after a successful copy.
    pub remove_original: bool,
    /// Plan only, touch nothing.
    pub dry_run: bool,
}

/// Target name for `name`, or `None` if it does not carry the prefix.
pub fn stripped_name<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    name.strip_prefix(prefix).filter(|rest| !rest.is_empty())
}

/// Copy every prefixed file in `opts.dir` to its un-prefixed name.
///
/// Existing targets are overwritten. Files are handled in file-name order.
#[instrument(skip_all, fields(dir = %opts.dir.display(), prefix = %opts.prefix))]
pub fn strip_prefix_copies(opts: &RenameOptions) -> Result<Vec<Renamed>> {
    let plan = plan_renames(&opts.dir, &opts.prefix)?;

    if opts.dry_run {
        debug!(count = plan.len(), "dry run, nothing copied");
        return Ok(plan);
    }

    for item in &plan {
        std::fs::copy(&item.from, &item.to).map_err(|e| DocsmithError::io(&item.to, e))?;
        if opts.remove_original {
            std::fs::remove_file(&item.from).map_err(|e| DocsmithError::io(&item.from, e))?;
        }
        info!(from = %item.from.display(), to = %item.to.display(), "file renamed");
    }

    Ok(plan)
}

fn plan_renames(dir: &Path, prefix: &str) -> Result<Vec<Renamed>> {
    let entries = std::fs::read_dir(dir).map_err(|e| DocsmithError::io(dir, e))?;

    let mut plan = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| DocsmithError::io(dir, e))?;
        let from = entry.path();
        if from.is_dir() {
            continue;
        }

        let name = entry.file_name();
        let Some(target) = name.to_str().and_then(|n| stripped_name(n, prefix)) else {
            continue;
        };

        plan.push(Renamed {
            to: dir.join(target),
            from,
        });
    }

    plan.sort_by(|a, b| a.from.file_name().cmp(&b.from.file_name()));
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_opts(dir: &Path) -> RenameOptions {
        RenameOptions {
            dir: dir.to_path_buf(),
            prefix: "setup_".into(),
            remove_original: false,
            dry_run: false,
        }
    }

    fn seed(dir: &Path) {
        std::fs::write(dir.join("setup_python.md"), "python").unwrap();
        std::fs::write(dir.join("setup_rust.md"), "rust").unwrap();
        std::fs::write(dir.join("index.md"), "index").unwrap();
    }

    #[test]
    fn stripped_name_requires_prefix() {
        assert_eq!(stripped_name("setup_vim.md", "setup_"), Some("vim.md"));
        assert_eq!(stripped_name("vim.md", "setup_"), None);
        assert_eq!(stripped_name("setup_", "setup_"), None);
    }

    #[test]
    fn copies_prefixed_files_and_keeps_sources() {
        let tmp = tempfile::tempdir().unwrap();
        seed(tmp.path());

        let done = strip_prefix_copies(&make_opts(tmp.path())).unwrap();
        assert_eq!(done.len(), 2);
        assert_eq!(done[0].to, tmp.path().join("python.md"));
        assert_eq!(std::fs::read_to_string(tmp.path().join("rust.md")).unwrap(), "rust");
        assert!(tmp.path().join("setup_rust.md").exists());
    }

    #[test]
    fn remove_original_makes_it_a_rename() {
        let tmp = tempfile::tempdir().unwrap();
        seed(tmp.path());
        let mut opts = make_opts(tmp.path());
        opts.remove_original = true;

        strip_prefix_copies(&opts).unwrap();
        assert!(!tmp.path().join("setup_python.md").exists());
        assert!(tmp.path().join("python.md").exists());
        assert!(tmp.path().join("index.md").exists());
    }

    #[test]
    fn dry_run_touches_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        seed(tmp.path());
        let mut opts = make_opts(tmp.path());
        opts.dry_run = true;

        let plan = strip_prefix_copies(&opts).unwrap();
        assert_eq!(plan.len(), 2);
        assert!(!tmp.path().join("python.md").exists());
    }

    #[test]
    fn existing_target_overwritten() {
        let tmp = tempfile::tempdir().unwrap();
        seed(tmp.path());
        std::fs::write(tmp.path().join("python.md"), "stale").unwrap();

        strip_prefix_copies(&make_opts(tmp.path())).unwrap();
        assert_eq!(std::fs::read_to_string(tmp.path().join("python.md")).unwrap(), "python");
    }
}
