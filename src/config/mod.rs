use std::path::{Path, PathBuf};
use std::{env, fs, io};

use anyhow::{bail, Context, Result};
use log::warn;
use serde::de::DeserializeOwned;

/// Directories every deployment reads its configuration from and keeps its
/// data in. `name` is the deployment (`booking` or `drinks`) and names the
/// default files inside them.
pub struct PathSet {
    pub name: String,
    pub config_path: PathBuf,
    pub data_path: PathBuf,
    pub pki_path: PathBuf,
}

impl PathSet {
    pub fn new(
        name: &str,
        config_path: Option<PathBuf>,
        data_path: Option<PathBuf>,
    ) -> Result<Self> {
        let is_root = is_root();

        let config_path = if let Some(path) = config_path {
            path
        } else if let Ok(path) = env::var("ENCORE_CONFIG") {
            PathBuf::from(path)
        } else if is_root {
            PathBuf::from("/etc/encore")
        } else {
            home_dir()?.join(".config").join("encore")
        };

        let data_path = if let Some(path) = data_path {
            path
        } else if let Ok(path) = env::var("ENCORE_DATA") {
            PathBuf::from(path)
        } else if is_root {
            PathBuf::from("/var/lib/encore")
        } else {
            home_dir()?.join(".local").join("share").join("encore")
        };

        // PKI path is always under config path
        let pki_path = config_path.join("pki");

        ensure_dir_exists(&config_path)
            .with_context(|| format!("ensure config directory: {}", config_path.display()))?;
        ensure_dir_exists(&data_path)
            .with_context(|| format!("ensure data directory: {}", data_path.display()))?;

        Ok(Self {
            name: name.to_string(),
            config_path,
            data_path,
            pki_path,
        })
    }

    /// Loads `{name}.toml` from the config directory, falling back to
    /// `default_func` when the file does not exist. The loaded value is
    /// completed (validated, env-expanded) before being returned.
    pub fn load_config<T, F>(&self, default_func: F) -> Result<T>
    where
        T: CommonConfig + DeserializeOwned,
        F: FnOnce() -> T,
    {
        let name = &self.name;
        let path = self.config_path.join(format!("{name}.toml"));
        let mut cfg: T = match fs::read_to_string(&path) {
            Ok(s) => toml::from_str(&s)
                .with_context(|| format!("parse config file '{}' toml", path.display()))?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                warn!("Config file for {name} not found, using defaults");
                default_func()
            }
            Err(err) => {
                return Err(err).context(format!("read config file: {}", path.display()));
            }
        };

        cfg.complete(self).context("validate config")?;
        Ok(cfg)
    }
}

pub trait CommonConfig {
    fn default() -> Self;
    fn complete(&mut self, ps: &PathSet) -> Result<()>;
}

/// See: [`shellexpand::full`].
pub fn expandenv(name: &str, s: impl AsRef<str>) -> Result<String> {
    let s =
        shellexpand::full(s.as_ref()).with_context(|| format!("expand env value for '{name}'"))?;
    Ok(s.to_string())
}

pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

fn home_dir() -> Result<PathBuf> {
    let dir = env::var_os("HOME") // Unix/Linux/macOS
        .or_else(|| env::var_os("USERPROFILE")) // Windows
        .map(PathBuf::from);
    match dir {
        Some(dir) => Ok(dir),
        None => {
            bail!("could not determine home directory, please specify config path manually")
        }
    }
}

#[cfg(unix)]
fn is_root() -> bool {
    unsafe { libc::geteuid() == 0 }
}

#[cfg(not(unix))]
fn is_root() -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expandenv() {
        env::set_var("ENCORE_TEST_EXPAND", "/tmp/encore");
        let value = expandenv("path", "$ENCORE_TEST_EXPAND/data.db").unwrap();
        assert_eq!(value, "/tmp/encore/data.db");

        assert!(expandenv("path", "$ENCORE_TEST_NOT_SET_VAR").is_err());
    }

    #[test]
    fn test_path_set() {
        let base = env::temp_dir().join("_encore_test_path_set");
        let ps = PathSet::new(
            "booking",
            Some(base.join("config")),
            Some(base.join("data")),
        )
        .unwrap();
        assert_eq!(ps.name, "booking");
        assert!(ps.config_path.is_dir());
        assert!(ps.data_path.is_dir());
        assert_eq!(ps.pki_path, base.join("config").join("pki"));

        fs::remove_dir_all(&base).unwrap();
    }
}
