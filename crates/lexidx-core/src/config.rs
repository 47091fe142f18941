//! Configuration loader and path helpers.
//!
//! Uses Figment to merge built-in defaults + `lexidx.toml` +
//! `lexidx.<env>.toml` + `LEXIDX_*` env vars. Nested keys are addressed with a
//! double underscore, e.g. `LEXIDX_DATA__INDEX_FILE`. Relative paths are
//! resolved against a caller-provided base directory, never against global
//! state.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::Error;

pub const CONFIG_FILE: &str = "lexidx.toml";
pub const ENV_PREFIX: &str = "LEXIDX_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub data: DataSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSettings {
    /// Directory holding one `page<N>/lemmas.txt` per document.
    pub lemma_dir: String,
    /// Persisted inverted index.
    pub index_file: String,
    /// Optional `<docId>\t<url>` registry.
    pub registry_file: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data: DataSettings {
                lemma_dir: "tokenized_pages".to_string(),
                index_file: "inverted_index.txt".to_string(),
                registry_file: "index.txt".to_string(),
            },
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), Error> {
        let fields = [
            ("data.lemma_dir", &self.data.lemma_dir),
            ("data.index_file", &self.data.index_file),
            ("data.registry_file", &self.data.registry_file),
        ];
        for (key, value) in fields {
            if value.trim().is_empty() {
                return Err(Error::InvalidConfig(format!("'{key}' must not be empty")));
            }
        }
        Ok(())
    }

    /// Expand and resolve every configured path against `base`.
    pub fn resolve(&self, base: &Path) -> IndexPaths {
        IndexPaths {
            lemma_dir: resolve_with_base(base, &self.data.lemma_dir),
            index_file: resolve_with_base(base, &self.data.index_file),
            registry_file: resolve_with_base(base, &self.data.registry_file),
        }
    }
}

/// Concrete locations handed to the build, load and search operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexPaths {
    pub lemma_dir: PathBuf,
    pub index_file: PathBuf,
    pub registry_file: PathBuf,
}

impl IndexPaths {
    /// Default file names laid out under `root`.
    pub fn under(root: &Path) -> Self {
        Settings::default().resolve(root)
    }
}

pub struct Config {
    figment: Figment,
}

impl Config {
    /// Load `lexidx.toml` from the working directory (missing files are skipped).
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::from(Serialized::defaults(Settings::default())).merge(Toml::file(path));
        if let Some(profile) = profile_file(path, &env_name) {
            figment = figment.merge(Toml::file(profile));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config = Self { figment };
        config.settings()?.validate()?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    pub fn settings(&self) -> anyhow::Result<Settings> {
        self.figment
            .extract()
            .map_err(|e| anyhow::anyhow!("Failed to read settings: {}", e))
    }
}

/// `lexidx.toml` + `prod` -> `lexidx.prod.toml`, next to the base file.
fn profile_file(path: &Path, env_name: &str) -> Option<PathBuf> {
    let suffix = match env_name {
        "dev" | "development" => "dev",
        "prod" | "production" => "prod",
        "test" | "testing" => "test",
        _ => return None,
    };
    let stem = path.file_stem()?.to_string_lossy();
    Some(path.with_file_name(format!("{stem}.{suffix}.toml")))
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
