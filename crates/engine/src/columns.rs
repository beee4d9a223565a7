//! Column selection of the registration table.
//!
//! The table has a fixed set of headers. A user picks a subset, which is
//! kept in canonical header order and persisted through a [`ColumnStore`].

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{EngineError, ResultEngine};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TableHeader {
    RegistrationNumber,
    RegistrationType,
    CreateDateTime,
    StatusType,
    RegisteredBy,
    RegisteringParty,
    SecuredParties,
    ClientReferenceId,
    ExpireDays,
    Actions,
}

impl TableHeader {
    /// Every header, in display order.
    pub const ALL: [TableHeader; 10] = [
        Self::RegistrationNumber,
        Self::RegistrationType,
        Self::CreateDateTime,
        Self::StatusType,
        Self::RegisteredBy,
        Self::RegisteringParty,
        Self::SecuredParties,
        Self::ClientReferenceId,
        Self::ExpireDays,
        Self::Actions,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::RegistrationNumber => "Registration Number",
            Self::RegistrationType => "Registration Type",
            Self::CreateDateTime => "Registration Date",
            Self::StatusType => "Status",
            Self::RegisteredBy => "Registered By",
            Self::RegisteringParty => "Registering Party",
            Self::SecuredParties => "Secured Parties",
            Self::ClientReferenceId => "Folio/Reference Number",
            Self::ExpireDays => "Days to Expiry",
            Self::Actions => "Actions",
        }
    }

    /// Value stored in the user settings.
    #[must_use]
    pub const fn value(self) -> &'static str {
        match self {
            Self::RegistrationNumber => "registrationNumber",
            Self::RegistrationType => "registrationType",
            Self::CreateDateTime => "createDateTime",
            Self::StatusType => "statusType",
            Self::RegisteredBy => "registeredBy",
            Self::RegisteringParty => "registeringParty",
            Self::SecuredParties => "securedParties",
            Self::ClientReferenceId => "clientReferenceId",
            Self::ExpireDays => "expireDays",
            Self::Actions => "actions",
        }
    }
}

impl fmt::Display for TableHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TableHeader {
    type Err = EngineError;

    /// Accepts the settings value or the display label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|header| header.value() == wanted || header.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| EngineError::InvalidColumns(format!("unknown header \"{wanted}\"")))
    }
}

/// Persists a column selection.
pub trait ColumnStore {
    /// Saves the selection and returns what was persisted, which may differ
    /// from the input.
    fn save_columns(&mut self, columns: &[TableHeader]) -> ResultEngine<Vec<TableHeader>>;
}

/// Parses settings values into headers, rejecting unknown ones.
pub fn parse_columns<S: AsRef<str>>(values: &[S]) -> ResultEngine<Vec<TableHeader>> {
    values.iter().map(|value| value.as_ref().parse()).collect()
}

/// Keeps the preferred headers in canonical order, without duplicates.
#[must_use]
pub fn select_columns(preferred: &[TableHeader]) -> Vec<TableHeader> {
    TableHeader::ALL
        .into_iter()
        .filter(|header| preferred.contains(header))
        .collect()
}

/// Selects and persists columns. The stored selection is authoritative.
pub fn set_columns(
    preferred: &[TableHeader],
    store: &mut impl ColumnStore,
) -> ResultEngine<Vec<TableHeader>> {
    let selection = select_columns(preferred);
    let persisted = store.save_columns(&selection)?;
    info!(columns = persisted.len(), "saved registration table columns");
    Ok(persisted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MemoryStore {
        saved: Vec<Vec<TableHeader>>,
        response: Option<Vec<TableHeader>>,
    }

    impl ColumnStore for MemoryStore {
        fn save_columns(&mut self, columns: &[TableHeader]) -> ResultEngine<Vec<TableHeader>> {
            self.saved.push(columns.to_vec());
            Ok(self.response.clone().unwrap_or_else(|| columns.to_vec()))
        }
    }

    #[test]
    fn selection_follows_canonical_order() {
        let selection = select_columns(&[
            TableHeader::Actions,
            TableHeader::RegistrationNumber,
            TableHeader::Actions,
        ]);
        assert_eq!(
            selection,
            [TableHeader::RegistrationNumber, TableHeader::Actions]
        );
    }

    #[test]
    fn parse_rejects_unknown_header() {
        assert_eq!(
            parse_columns(&["registrationNumber", "Days to Expiry"]).unwrap(),
            [TableHeader::RegistrationNumber, TableHeader::ExpireDays]
        );
        assert!(matches!(
            parse_columns(&["colour"]),
            Err(EngineError::InvalidColumns(_))
        ));
    }

    #[test]
    fn store_response_is_authoritative() {
        let mut store = MemoryStore {
            response: Some(vec![TableHeader::RegistrationNumber]),
            ..MemoryStore::default()
        };
        let columns = TableHeader::ALL[3..].to_vec();
        let persisted = set_columns(&columns, &mut store).unwrap();

        assert_eq!(store.saved, [columns]);
        assert_eq!(persisted, [TableHeader::RegistrationNumber]);
    }
}
