//! Rows of the "My Registrations" table.
//!
//! Drafts and registrations live in two disjoint identifier domains:
//! [`DocumentId`] for drafts and [`RegistrationNumber`] for registrations and
//! their changes.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{EngineError, RegistrationType, ResultEngine};

const REGISTRATION_NUMBER_MIN_LEN: usize = 6;
const REGISTRATION_NUMBER_MAX_LEN: usize = 10;

/// Identifier of a draft.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a registration (base or change).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistrationNumber(String);

impl RegistrationNumber {
    /// Wraps an identifier coming from the backend as is.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Parses a registration number typed by a user.
    ///
    /// Input is trimmed and upper-cased, and must be 6 to 10 ASCII
    /// alphanumerics.
    pub fn parse(input: &str) -> ResultEngine<Self> {
        let value = input.trim().to_ascii_uppercase();
        let valid_len =
            (REGISTRATION_NUMBER_MIN_LEN..=REGISTRATION_NUMBER_MAX_LEN).contains(&value.len());
        if !valid_len || !value.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(EngineError::InvalidRegistrationNumber(input.to_string()));
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegistrationNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    Active,
    Expired,
    Discharged,
}

impl RegistrationStatus {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Expired => "Expired",
            Self::Discharged => "Discharged",
        }
    }
}

/// What a draft (or a completed change) does to its registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    FinancingStatement,
    Amendment,
    Renewal,
    Discharge,
}

impl ChangeKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FinancingStatement => "Financing Statement",
            Self::Amendment => "Amendment",
            Self::Renewal => "Renewal",
            Self::Discharge => "Total Discharge",
        }
    }
}

/// An unfinished registration or change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftRecord {
    pub document_id: DocumentId,
    /// Set when the draft is a pending change of a base registration.
    pub base_registration_number: Option<RegistrationNumber>,
    pub registration_type: RegistrationType,
    pub change_kind: ChangeKind,
    pub created_at: DateTime<Utc>,
}

/// A completed amendment, renewal or discharge of a base registration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub registration_number: RegistrationNumber,
    pub base_registration_number: RegistrationNumber,
    pub change_kind: ChangeKind,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChildRecord {
    Draft(DraftRecord),
    Change(ChangeRecord),
}

impl ChildRecord {
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            Self::Draft(draft) => draft.created_at,
            Self::Change(change) => change.created_at,
        }
    }

    /// The draft document id, if the child is a draft.
    #[must_use]
    pub fn document_id(&self) -> Option<&DocumentId> {
        match self {
            Self::Draft(draft) => Some(&draft.document_id),
            Self::Change(_) => None,
        }
    }
}

/// A finalized registration and the changes filed against it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRecord {
    pub base_registration_number: RegistrationNumber,
    pub registration_type: RegistrationType,
    pub status: RegistrationStatus,
    pub expire_days: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub changes: Vec<ChildRecord>,
    #[serde(default)]
    pub expand: bool,
}

impl RegistrationRecord {
    /// Most recent of the registration's own creation and any child's.
    #[must_use]
    pub fn last_activity(&self) -> DateTime<Utc> {
        self.changes
            .iter()
            .map(ChildRecord::created_at)
            .fold(self.created_at, |latest, at| latest.max(at))
    }

    fn has_draft(&self, document_id: &DocumentId) -> bool {
        self.changes
            .iter()
            .any(|child| child.document_id() == Some(document_id))
    }

    /// Adds a child draft in front of the existing changes, unless present.
    pub(crate) fn attach_draft(&mut self, draft: DraftRecord) {
        if !self.has_draft(&draft.document_id) {
            self.changes.insert(0, ChildRecord::Draft(draft));
        }
    }

    /// Removes a child draft, returning whether it was present.
    pub(crate) fn detach_draft(&mut self, document_id: &DocumentId) -> bool {
        let before = self.changes.len();
        self.changes
            .retain(|child| child.document_id() != Some(document_id));
        before != self.changes.len()
    }
}

/// A top-level row of the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TableRow {
    Draft(DraftRecord),
    Registration(RegistrationRecord),
}

impl TableRow {
    #[must_use]
    pub fn last_activity(&self) -> DateTime<Utc> {
        match self {
            Self::Draft(draft) => draft.created_at,
            Self::Registration(registration) => registration.last_activity(),
        }
    }

    /// The row identifier, in its own domain.
    #[must_use]
    pub fn identifier(&self) -> &str {
        match self {
            Self::Draft(draft) => draft.document_id.as_str(),
            Self::Registration(registration) => registration.base_registration_number.as_str(),
        }
    }

    #[must_use]
    pub fn as_registration(&self) -> Option<&RegistrationRecord> {
        match self {
            Self::Registration(registration) => Some(registration),
            Self::Draft(_) => None,
        }
    }

    #[must_use]
    pub fn as_draft(&self) -> Option<&DraftRecord> {
        match self {
            Self::Draft(draft) => Some(draft),
            Self::Registration(_) => None,
        }
    }

    pub(crate) fn is_draft(&self, document_id: &DocumentId) -> bool {
        matches!(self, Self::Draft(draft) if &draft.document_id == document_id)
    }

    pub(crate) fn is_registration(&self, number: &RegistrationNumber) -> bool {
        matches!(self, Self::Registration(registration) if &registration.base_registration_number == number)
    }

    /// Identity within the row's domain, so a draft and a registration never
    /// compare equal even if their text coincides.
    pub(crate) fn same_identity(&self, other: &TableRow) -> bool {
        match other {
            Self::Draft(draft) => self.is_draft(&draft.document_id),
            Self::Registration(registration) => {
                self.is_registration(&registration.base_registration_number)
            }
        }
    }
}
