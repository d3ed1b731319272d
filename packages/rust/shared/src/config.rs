//! Application configuration for docsmith.
//!
//! The site config lives at `<root>/docsmith.toml`, with a user-level
//! fallback at `~/.docsmith/docsmith.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DocsmithError, Result};
use crate::types::{DEFAULT_SECTIONS, Section};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "docsmith.toml";

/// User-level config directory name under the home directory.
const CONFIG_DIR_NAME: &str = ".docsmith";

// ---------------------------------------------------------------------------
// Config structs (matching docsmith.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Content layout.
    #[serde(default)]
    pub site: SiteConfig,

    /// Navigation document settings.
    #[serde(default)]
    pub nav: NavConfig,

    /// Notebook export settings.
    #[serde(default)]
    pub notebooks: NotebookConfig,

    /// Prefix renamer settings.
    #[serde(default)]
    pub rename: RenameConfig,
}

/// `[site]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Directory containing one sub-directory per section.
    #[serde(default = "default_docs_dir")]
    pub docs_dir: PathBuf,

    /// Sections, in navigation order.
    #[serde(default = "default_sections")]
    pub sections: Vec<String>,

    /// Stem of the per-section landing page, excluded from listings.
    #[serde(default = "default_index_stem")]
    pub index_stem: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            docs_dir: default_docs_dir(),
            sections: default_sections(),
            index_stem: default_index_stem(),
        }
    }
}

impl SiteConfig {
    /// Configured sections as domain values.
    pub fn sections(&self) -> Vec<Section> {
        self.sections.iter().map(|s| Section::new(s.as_str())).collect()
    }
}

fn default_docs_dir() -> PathBuf {
    PathBuf::from("docs")
}
fn default_sections() -> Vec<String> {
    DEFAULT_SECTIONS.iter().map(|s| (*s).to_string()).collect()
}
fn default_index_stem() -> String {
    "index".into()
}

/// `[nav]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavConfig {
    /// Navigation document to rewrite.
    #[serde(default = "default_nav_file")]
    pub file: PathBuf,

    /// Where the pre-run copy of the navigation document goes.
    #[serde(default = "default_backup_file")]
    pub backup_file: PathBuf,

    /// Marker line; everything from here on is generated.
    #[serde(default = "default_marker")]
    pub marker: String,

    /// Key line emitted right after the marker.
    #[serde(default = "default_root_key")]
    pub root_key: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            file: default_nav_file(),
            backup_file: default_backup_file(),
            marker: default_marker(),
            root_key: default_root_key(),
        }
    }
}

fn default_nav_file() -> PathBuf {
    PathBuf::from("mkdocs.yml")
}
fn default_backup_file() -> PathBuf {
    PathBuf::from(".bak.mkdocs.yml")
}
fn default_marker() -> String {
    "# NAV".into()
}
fn default_root_key() -> String {
    "nav:".into()
}

/// `[notebooks]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotebookConfig {
    /// Directory scanned for `*.ipynb` files.
    #[serde(default = "default_notebook_source")]
    pub source_dir: PathBuf,

    /// Directory receiving the exported `.md` files.
    #[serde(default = "default_notebook_output")]
    pub output_dir: PathBuf,

    /// Cells carrying any of these tags are dropped.
    #[serde(default = "default_remove_cell_tags")]
    pub remove_cell_tags: Vec<String>,

    /// Cells carrying any of these tags lose their outputs.
    #[serde(default = "default_remove_output_tags")]
    pub remove_all_outputs_tags: Vec<String>,

    /// Cells carrying any of these tags lose their source.
    #[serde(default = "default_remove_input_tags")]
    pub remove_input_tags: Vec<String>,

    /// Embed PNG outputs as base64 data URIs.
    #[serde(default = "default_true")]
    pub inline_png: bool,

    /// Alt text for inlined images.
    #[serde(default = "default_image_alt")]
    pub image_alt: String,
}

impl Default for NotebookConfig {
    fn default() -> Self {
        Self {
            source_dir: default_notebook_source(),
            output_dir: default_notebook_output(),
            remove_cell_tags: default_remove_cell_tags(),
            remove_all_outputs_tags: default_remove_output_tags(),
            remove_input_tags: default_remove_input_tags(),
            inline_png: true,
            image_alt: default_image_alt(),
        }
    }
}

fn default_notebook_source() -> PathBuf {
    PathBuf::from("docs/notebooks")
}
fn default_notebook_output() -> PathBuf {
    PathBuf::from("docs/blog")
}
fn default_remove_cell_tags() -> Vec<String> {
    vec!["remove_cell".into()]
}
fn default_remove_output_tags() -> Vec<String> {
    vec!["remove_output".into()]
}
fn default_remove_input_tags() -> Vec<String> {
    vec!["remove_input".into()]
}
fn default_true() -> bool {
    true
}
fn default_image_alt() -> String {
    "Cell Output".into()
}

/// `[rename]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameConfig {
    /// Section whose files get their prefix stripped.
    #[serde(default = "default_rename_section")]
    pub section: String,

    /// Prefix removed from file names.
    #[serde(default = "default_rename_prefix")]
    pub prefix: String,

    /// Delete the prefixed file after copying it.
    #[serde(default)]
    pub remove_original: bool,
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            section: default_rename_section(),
            prefix: default_rename_prefix(),
            remove_original: false,
        }
    }
}

fn default_rename_section() -> String {
    "setups".into()
}
fn default_rename_prefix() -> String {
    "setup_".into()
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the user-level config directory (`~/.docsmith/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| DocsmithError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Resolve which config file applies to a site root, if any.
///
/// `<root>/docsmith.toml` wins over the user-level file.
pub fn find_config(root: &Path) -> Option<PathBuf> {
    let local = root.join(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    let user = config_dir().ok()?.join(CONFIG_FILE_NAME);
    user.is_file().then_some(user)
}

/// Load the config for a site root. Returns defaults if no file exists.
pub fn load_config(root: &Path) -> Result<AppConfig> {
    match find_config(root) {
        Some(path) => load_config_from(&path),
        None => {
            tracing::debug!(root = %root.display(), "config file not found, using defaults");
            Ok(AppConfig::default())
        }
    }
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| DocsmithError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        DocsmithError::config(format!("failed to parse {}: {e}", path.display()))
    })?;

    validate_config(&config)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Write a default config file into the site root.
/// Returns the path to the created file.
pub fn init_config(root: &Path) -> Result<PathBuf> {
    let path = root.join(CONFIG_FILE_NAME);
    if path.exists() {
        return Err(DocsmithError::config(format!(
            "{} already exists",
            path.display()
        )));
    }

    let content = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| DocsmithError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| DocsmithError::io(&path, e))?;
    tracing::info!(path = %path.display(), "created default config file");

    Ok(path)
}

/// Reject configurations the tools cannot act on.
pub fn validate_config(config: &AppConfig) -> Result<()> {
    if config.site.sections.is_empty() {
        return Err(DocsmithError::validation("site.sections must not be empty"));
    }
    if config.site.sections.iter().any(|s| s.trim().is_empty()) {
        return Err(DocsmithError::validation("site.sections contains an empty name"));
    }
    if config.nav.marker.is_empty() {
        return Err(DocsmithError::validation("nav.marker must not be empty"));
    }
    if config.rename.prefix.is_empty() {
        return Err(DocsmithError::validation("rename.prefix must not be empty"));
    }
    Ok(())
}
