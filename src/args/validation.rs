use super::types::{Args, CleanArgs};
use crate::storage::StorageKind;

impl Args {
    /// # Errors
    ///
    /// Will return `Err` if the selected backend is missing its location or
    /// the bind address is empty
    pub fn validate(self) -> Result<CleanArgs, String> {
        let db_name = sqlite_path_from_url(&self.db_name);
        if self.db_type == StorageKind::Sqlite && db_name.is_empty() {
            return Err("Sqlite database name is required".to_string());
        }
        if self.db_type == StorageKind::Json && self.data_dir.trim().is_empty() {
            return Err("Data directory is required for the json backend".to_string());
        }
        if self.bind.trim().is_empty() {
            return Err("Bind address is required".to_string());
        }
        let openai_api_key = self
            .openai_api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        Ok(CleanArgs {
            db_type: self.db_type,
            db_name,
            data_dir: self.data_dir.trim().to_string(),
            bind: self.bind.trim().to_string(),
            openai_api_key,
            openai_model: self.openai_model,
        })
    }
}

/// Accepts a bare path or a `sqlite:///path` style url and returns the path.
#[must_use]
pub fn sqlite_path_from_url(value: &str) -> String {
    let value = value.trim();
    value
        .strip_prefix("sqlite:///")
        .or_else(|| value.strip_prefix("sqlite://"))
        .unwrap_or(value)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(db_type: StorageKind, db_name: &str) -> Args {
        Args {
            db_type,
            db_name: db_name.to_string(),
            data_dir: "data".to_string(),
            bind: "127.0.0.1:8081".to_string(),
            openai_api_key: Some("  ".to_string()),
            openai_model: "gpt-4.1-nano".to_string(),
        }
    }

    #[test]
    fn strips_sqlite_url_prefixes() {
        assert_eq!(sqlite_path_from_url("sqlite:///instance/golf.db"), "instance/golf.db");
        assert_eq!(sqlite_path_from_url("sqlite://golf.db"), "golf.db");
        assert_eq!(sqlite_path_from_url(" golf.db "), "golf.db");
    }

    #[test]
    fn sqlite_requires_a_name() {
        assert!(args(StorageKind::Sqlite, "sqlite:///").validate().is_err());
        assert!(args(StorageKind::Memory, "").validate().is_ok());
    }

    #[test]
    fn blank_api_key_is_dropped() {
        let clean = args(StorageKind::Sqlite, "golf.db").validate().unwrap();
        assert_eq!(clean.openai_api_key, None);
        assert_eq!(clean.db_name, "golf.db");
    }
}
