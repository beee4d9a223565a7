use std::{fs, path::Path};

use api_types::settings::{RegistrationTableSettings, UserSettings};
use engine::{ColumnStore, EngineError, TableHeader, parse_columns};
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LocalState {
    #[serde(default)]
    pub user_settings: UserSettings,
}

impl LocalState {
    pub fn load(path: &str) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let parent = Path::new(path).parent();
        if let Some(parent) = parent {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(self)?;
        fs::write(path, payload)?;
        Ok(())
    }

    /// Saved column selection, `None` when the user never picked one.
    pub fn columns(&self) -> Result<Option<Vec<TableHeader>>> {
        match &self.user_settings.registrations_table_settings {
            Some(settings) => Ok(Some(parse_columns(&settings.columns)?)),
            None => Ok(None),
        }
    }

    pub fn set_columns(&mut self, columns: &[TableHeader]) {
        self.user_settings.registrations_table_settings = Some(RegistrationTableSettings {
            columns: columns
                .iter()
                .map(|header| header.value().to_string())
                .collect(),
        });
    }
}

/// Column store backed by the local state file.
///
/// Answers with the selection read back from disk.
pub struct FileColumnStore {
    path: String,
}

impl FileColumnStore {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    fn save(&self, columns: &[TableHeader]) -> Result<Vec<TableHeader>> {
        let mut state = LocalState::load(&self.path)?;
        state.set_columns(columns);
        state.save(&self.path)?;
        Ok(LocalState::load(&self.path)?
            .columns()?
            .unwrap_or_default())
    }
}

impl ColumnStore for FileColumnStore {
    fn save_columns(
        &mut self,
        columns: &[TableHeader],
    ) -> std::result::Result<Vec<TableHeader>, EngineError> {
        self.save(columns)
            .map_err(|err| EngineError::ColumnStore(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_path(name: &str) -> String {
        let dir = std::env::temp_dir().join(format!("registry-{}-{name}", std::process::id()));
        dir.join("state.json").to_string_lossy().into_owned()
    }

    #[test]
    fn missing_file_is_empty_state() {
        let state = LocalState::load(&state_path("missing")).unwrap();
        assert_eq!(state.columns().unwrap(), None);
    }

    #[test]
    fn columns_round_trip_through_file() {
        let path = state_path("columns");
        let mut store = FileColumnStore::new(path.clone());
        let saved = engine::set_columns(
            &[TableHeader::ExpireDays, TableHeader::RegistrationNumber],
            &mut store,
        )
        .unwrap();

        assert_eq!(saved, [TableHeader::RegistrationNumber, TableHeader::ExpireDays]);
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"registrationsTableSettings\""));
        assert!(content.contains("\"expireDays\""));
        let _ = fs::remove_dir_all(Path::new(&path).parent().unwrap());
    }
}
