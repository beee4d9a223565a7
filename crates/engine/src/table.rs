//! The "My Registrations" table model.
//!
//! [`RegistrationTableView`] is a value: every operation returns a new view
//! and leaves the receiver untouched.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    ChildRecord, DocumentId, DraftRecord, EngineError, RegistrationNumber, RegistrationRecord,
    ResultEngine, TableRow,
};

/// Row just added to the table, highlighted for a short while.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    /// Registration number (or draft document id) of the added item.
    pub added_reg: String,
    /// Base registration the item belongs to, when it is a change.
    pub added_reg_parent: Option<RegistrationNumber>,
    pub added_reg_summary: TableRow,
    /// Draft replaced by the item.
    pub prev_draft: Option<DocumentId>,
}

/// Draft to delete: a parent draft by document id alone, a child draft by
/// document id and base registration number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeleteTarget {
    pub document_id: DocumentId,
    pub base_registration_number: Option<RegistrationNumber>,
}

impl DeleteTarget {
    #[must_use]
    pub fn draft(document_id: DocumentId) -> Self {
        Self {
            document_id,
            base_registration_number: None,
        }
    }

    #[must_use]
    pub fn child_draft(document_id: DocumentId, base: RegistrationNumber) -> Self {
        Self {
            document_id,
            base_registration_number: Some(base),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationTableView {
    rows: Vec<TableRow>,
}

impl RegistrationTableView {
    /// Merges drafts into the registration history.
    ///
    /// Drafts pointing at a known base registration become its children;
    /// every other draft is a top-level row. Rows are ordered by most recent
    /// activity, ties by identifier.
    #[must_use]
    pub fn build(drafts: Vec<DraftRecord>, registrations: Vec<RegistrationRecord>) -> Self {
        let mut bases: Vec<RegistrationRecord> = Vec::with_capacity(registrations.len());
        for registration in registrations {
            if !bases
                .iter()
                .any(|base| base.base_registration_number == registration.base_registration_number)
            {
                bases.push(registration);
            }
        }

        // Oldest first, so that attaching in front leaves the newest on top.
        let mut drafts = drafts;
        drafts.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.document_id.cmp(&b.document_id))
        });
        drafts.dedup_by(|a, b| a.document_id == b.document_id);

        let mut rows = Vec::with_capacity(bases.len() + drafts.len());
        let mut orphans = 0usize;
        for draft in drafts {
            let parent = draft.base_registration_number.as_ref().and_then(|number| {
                bases
                    .iter_mut()
                    .find(|base| &base.base_registration_number == number)
            });
            match parent {
                Some(base) => base.attach_draft(draft),
                None => {
                    if draft.base_registration_number.is_some() {
                        orphans += 1;
                    }
                    if !rows.iter().any(|row: &TableRow| row.is_draft(&draft.document_id)) {
                        rows.push(TableRow::Draft(draft));
                    }
                }
            }
        }
        if orphans > 0 {
            debug!(orphans, "child drafts without base registration kept as top-level rows");
        }
        rows.extend(bases.into_iter().map(TableRow::Registration));
        sort_rows(&mut rows);

        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    #[must_use]
    pub fn registration(&self, number: &RegistrationNumber) -> Option<&RegistrationRecord> {
        self.rows
            .iter()
            .filter_map(TableRow::as_registration)
            .find(|registration| &registration.base_registration_number == number)
    }

    /// Top-level draft rows.
    pub fn drafts(&self) -> impl Iterator<Item = &DraftRecord> {
        self.rows.iter().filter_map(TableRow::as_draft)
    }

    /// Base registration rows.
    pub fn registrations(&self) -> impl Iterator<Item = &RegistrationRecord> {
        self.rows.iter().filter_map(TableRow::as_registration)
    }

    /// Number of top-level rows, as shown in the table header.
    #[must_use]
    pub fn registration_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of drafts, top-level or attached to a base registration.
    #[must_use]
    pub fn draft_count(&self) -> usize {
        let children = self
            .registrations()
            .flat_map(|registration| registration.changes.iter())
            .filter(|child| child.document_id().is_some())
            .count();
        self.drafts().count() + children
    }

    /// Number of rows including nested changes.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
            + self
                .registrations()
                .map(|registration| registration.changes.len())
                .sum::<usize>()
    }

    /// Puts a newly added item on top of the table.
    ///
    /// The draft the item replaces is dropped first. An item with a parent is
    /// nested under (or becomes) that base registration, which moves to the
    /// top.
    #[must_use]
    pub fn apply_new_item(&self, item: &NewItem) -> Self {
        let mut rows = self.rows.clone();
        if let Some(prev_draft) = &item.prev_draft {
            remove_draft_everywhere(&mut rows, prev_draft);
        }

        match (&item.added_reg_parent, &item.added_reg_summary) {
            (Some(parent), TableRow::Registration(summary)) => {
                let mut base = summary.clone();
                if let Some(index) = rows.iter().position(|row| row.is_registration(parent)) {
                    if let TableRow::Registration(old) = rows.remove(index) {
                        carry_child_drafts(old, &mut base);
                    }
                }
                base.expand = true;
                let row = TableRow::Registration(base);
                rows.retain(|existing| !existing.same_identity(&row));
                rows.insert(0, row);
            }
            (Some(parent), TableRow::Draft(draft)) => {
                match rows.iter().position(|row| row.is_registration(parent)) {
                    Some(index) => {
                        let mut row = rows.remove(index);
                        if let TableRow::Registration(base) = &mut row {
                            base.attach_draft(draft.clone());
                            base.expand = true;
                        }
                        rows.insert(0, row);
                    }
                    None => insert_on_top(&mut rows, item.added_reg_summary.clone()),
                }
            }
            (None, summary) => insert_on_top(&mut rows, summary.clone()),
        }

        debug!(added = %item.added_reg, "applied new table item");
        Self { rows }
    }

    /// Deletes a draft.
    ///
    /// A child draft is removed from its base registration, which stays in the
    /// table even when it has no changes left.
    pub fn delete(&self, target: &DeleteTarget) -> ResultEngine<Self> {
        let mut rows = self.rows.clone();
        let document_id = &target.document_id;

        let found = match &target.base_registration_number {
            Some(base_number) => {
                if rows.iter().any(|row| row.is_registration(base_number)) {
                    rows.iter_mut().any(|row| match row {
                        TableRow::Registration(base)
                            if &base.base_registration_number == base_number =>
                        {
                            base.detach_draft(document_id)
                        }
                        _ => false,
                    })
                } else {
                    // An orphan child draft still carries both keys.
                    remove_rows(&mut rows, |row| {
                        matches!(row, TableRow::Draft(draft)
                            if &draft.document_id == document_id
                                && draft.base_registration_number.as_ref() == Some(base_number))
                    })
                }
            }
            None => remove_rows(&mut rows, |row| row.is_draft(document_id)),
        };

        if !found {
            return Err(EngineError::KeyNotFound(match &target.base_registration_number {
                Some(base) => format!("draft {document_id} of {base}"),
                None => format!("draft {document_id}"),
            }));
        }
        debug!(%document_id, "deleted draft");
        Ok(Self { rows })
    }

    /// Removes a completed registration together with its changes.
    pub fn remove(&self, number: &RegistrationNumber) -> ResultEngine<Self> {
        let mut rows = self.rows.clone();
        if !remove_rows(&mut rows, |row| row.is_registration(number)) {
            return Err(EngineError::KeyNotFound(format!("registration {number}")));
        }
        debug!(%number, "removed registration");
        Ok(Self { rows })
    }

    /// Flips the expanded state of a base registration.
    pub fn toggle_expand(&self, number: &RegistrationNumber) -> ResultEngine<Self> {
        let mut rows = self.rows.clone();
        let base = rows
            .iter_mut()
            .find_map(|row| match row {
                TableRow::Registration(base) if &base.base_registration_number == number => {
                    Some(base)
                }
                _ => None,
            })
            .ok_or_else(|| EngineError::KeyNotFound(format!("registration {number}")))?;
        base.expand = !base.expand;
        Ok(Self { rows })
    }
}

fn sort_rows(rows: &mut [TableRow]) {
    rows.sort_by(|a, b| {
        b.last_activity()
            .cmp(&a.last_activity())
            .then_with(|| a.identifier().cmp(b.identifier()))
    });
}

fn insert_on_top(rows: &mut Vec<TableRow>, row: TableRow) {
    rows.retain(|existing| !existing.same_identity(&row));
    rows.insert(0, row);
}

/// Removes the matching rows, returning whether any matched.
fn remove_rows(rows: &mut Vec<TableRow>, matches: impl Fn(&TableRow) -> bool) -> bool {
    let before = rows.len();
    rows.retain(|row| !matches(row));
    before != rows.len()
}

fn remove_draft_everywhere(rows: &mut Vec<TableRow>, document_id: &DocumentId) {
    rows.retain(|row| !row.is_draft(document_id));
    for row in rows.iter_mut() {
        if let TableRow::Registration(base) = row {
            base.detach_draft(document_id);
        }
    }
}

/// Keeps pending drafts of a base registration when a fresh copy replaces it.
fn carry_child_drafts(old: RegistrationRecord, fresh: &mut RegistrationRecord) {
    let drafts: Vec<DraftRecord> = old
        .changes
        .into_iter()
        .filter_map(|child| match child {
            ChildRecord::Draft(draft) => Some(draft),
            ChildRecord::Change(_) => None,
        })
        .collect();
    for draft in drafts.into_iter().rev() {
        fresh.attach_draft(draft);
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};

    use super::*;
    use crate::{ChangeKind, RegistrationStatus, RegistrationType};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap()
    }

    fn draft(id: &str, base: Option<&str>, hour: u32) -> DraftRecord {
        DraftRecord {
            document_id: DocumentId::new(id),
            base_registration_number: base.map(RegistrationNumber::new),
            registration_type: RegistrationType::SecurityAgreement,
            change_kind: if base.is_some() {
                ChangeKind::Amendment
            } else {
                ChangeKind::FinancingStatement
            },
            created_at: at(hour),
        }
    }

    fn registration(number: &str, hour: u32) -> RegistrationRecord {
        RegistrationRecord {
            base_registration_number: RegistrationNumber::new(number),
            registration_type: RegistrationType::SecurityAgreement,
            status: RegistrationStatus::Active,
            expire_days: Some(365),
            created_at: at(hour),
            changes: Vec::new(),
            expand: false,
        }
    }

    #[test]
    fn child_drafts_attach_newest_first() {
        let view = RegistrationTableView::build(
            vec![draft("D2", Some("100001A"), 4), draft("D1", Some("100001A"), 3)],
            vec![registration("100001A", 1)],
        );
        let base = view.registration(&RegistrationNumber::new("100001A")).unwrap();
        let ids: Vec<_> = base
            .changes
            .iter()
            .filter_map(ChildRecord::document_id)
            .map(DocumentId::as_str)
            .collect();
        assert_eq!(ids, ["D2", "D1"]);
        assert_eq!(view.registration_count(), 1);
        assert_eq!(view.draft_count(), 2);
        assert_eq!(view.row_count(), 3);
    }

    #[test]
    fn ties_break_on_identifier() {
        let view = RegistrationTableView::build(
            vec![draft("D9", None, 2), draft("D1", None, 2)],
            vec![registration("100001A", 2)],
        );
        let ids: Vec<_> = view.rows().iter().map(TableRow::identifier).collect();
        assert_eq!(ids, ["100001A", "D1", "D9"]);
    }

    #[test]
    fn duplicate_drafts_are_merged() {
        let view = RegistrationTableView::build(
            vec![draft("D1", None, 2), draft("D1", None, 2)],
            Vec::new(),
        );
        assert_eq!(view.rows().len(), 1);
    }

    #[test]
    fn toggle_expand_flips_flag() {
        let number = RegistrationNumber::new("100001A");
        let view = RegistrationTableView::build(Vec::new(), vec![registration("100001A", 1)]);
        let view = view.toggle_expand(&number).unwrap();
        assert!(view.registration(&number).unwrap().expand);
        let view = view.toggle_expand(&number).unwrap();
        assert!(!view.registration(&number).unwrap().expand);
        assert!(view.toggle_expand(&RegistrationNumber::new("999999Z")).is_err());
    }

    #[test]
    fn orphan_child_draft_deletes_with_both_keys() {
        let view = RegistrationTableView::build(vec![draft("D1", Some("404040X"), 1)], Vec::new());
        assert!(view.delete(&DeleteTarget::draft(DocumentId::new("D1"))).is_ok());
        let deleted = view
            .delete(&DeleteTarget::child_draft(
                DocumentId::new("D1"),
                RegistrationNumber::new("404040X"),
            ))
            .unwrap();
        assert!(deleted.rows().is_empty());
    }

    #[test]
    fn refreshed_base_keeps_pending_drafts() {
        let view = RegistrationTableView::build(
            vec![draft("D1", Some("100001A"), 2), draft("D2", Some("100001A"), 3)],
            vec![registration("100001A", 1), registration("100002A", 5)],
        );
        let mut fresh = registration("100001A", 1);
        fresh.changes.push(ChildRecord::Change(crate::ChangeRecord {
            registration_number: RegistrationNumber::new("200001A"),
            base_registration_number: RegistrationNumber::new("100001A"),
            change_kind: ChangeKind::Amendment,
            created_at: at(6),
        }));
        let item = NewItem {
            added_reg: "200001A".to_string(),
            added_reg_parent: Some(RegistrationNumber::new("100001A")),
            added_reg_summary: TableRow::Registration(fresh),
            prev_draft: Some(DocumentId::new("D2")),
        };

        let view = view.apply_new_item(&item);
        let top = view.rows()[0].as_registration().unwrap();
        assert_eq!(top.base_registration_number.as_str(), "100001A");
        assert!(top.expand);
        let kinds: Vec<_> = top
            .changes
            .iter()
            .map(|child| match child {
                ChildRecord::Draft(draft) => draft.document_id.to_string(),
                ChildRecord::Change(change) => change.registration_number.to_string(),
            })
            .collect();
        assert_eq!(kinds, ["D1", "200001A"]);
        assert_eq!(view.registration_count(), 2);
    }
}
