//! Mapping between the backend JSON and the engine records.

use api_types::{
    fee::FeeSummaryView,
    registration::{
        ChangeRegistration, DraftResult, ItemSummary, RegTableNewItem, RegistrationChange,
        RegistrationSummary,
    },
};
use engine::{
    ChangeKind, ChangeRecord, ChildRecord, DocumentId, DraftRecord, FeeSummary, NewItem,
    RegistrationNumber, RegistrationRecord, RegistrationStatus, TableRow,
};

use crate::error::{AppError, Result};

fn optional_number(value: &str) -> Option<RegistrationNumber> {
    let value = value.trim();
    (!value.is_empty()).then(|| RegistrationNumber::new(value))
}

fn statement_kind(statement_type: &str) -> Result<ChangeKind> {
    match statement_type {
        "FINANCING_STATEMENT" => Ok(ChangeKind::FinancingStatement),
        "AMENDMENT_STATEMENT" | "CHANGE_STATEMENT" => Ok(ChangeKind::Amendment),
        "RENEWAL_STATEMENT" => Ok(ChangeKind::Renewal),
        "DISCHARGE_STATEMENT" => Ok(ChangeKind::Discharge),
        other => Err(AppError::Invalid(format!("unknown draft type {other}"))),
    }
}

fn change_kind(registration_class: &str) -> Result<ChangeKind> {
    match registration_class {
        "AMENDMENT" | "COURTORDER" | "CHANGE" => Ok(ChangeKind::Amendment),
        "RENEWAL" => Ok(ChangeKind::Renewal),
        "DISCHARGE" => Ok(ChangeKind::Discharge),
        other => Err(AppError::Invalid(format!(
            "unknown registration class {other}"
        ))),
    }
}

fn status(status_type: &str) -> Result<RegistrationStatus> {
    match status_type {
        "ACT" => Ok(RegistrationStatus::Active),
        "EXP" => Ok(RegistrationStatus::Expired),
        "DIS" => Ok(RegistrationStatus::Discharged),
        other => Err(AppError::Invalid(format!("unknown status {other}"))),
    }
}

pub fn draft_record(draft: DraftResult) -> Result<DraftRecord> {
    Ok(DraftRecord {
        document_id: DocumentId::new(draft.document_id),
        base_registration_number: optional_number(&draft.base_registration_number),
        registration_type: draft.registration_type.parse()?,
        change_kind: statement_kind(&draft.statement_type)?,
        created_at: draft.create_date_time,
    })
}

fn change_record(change: ChangeRegistration) -> Result<ChangeRecord> {
    Ok(ChangeRecord {
        registration_number: RegistrationNumber::new(change.registration_number),
        base_registration_number: RegistrationNumber::new(change.base_registration_number),
        change_kind: change_kind(&change.registration_class)?,
        created_at: change.create_date_time,
    })
}

pub fn registration_record(summary: RegistrationSummary) -> Result<RegistrationRecord> {
    let changes = summary
        .changes
        .into_iter()
        .map(|change| match change {
            RegistrationChange::Draft(draft) => draft_record(draft).map(ChildRecord::Draft),
            RegistrationChange::Registration(change) => {
                change_record(change).map(ChildRecord::Change)
            }
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(RegistrationRecord {
        base_registration_number: RegistrationNumber::new(summary.base_registration_number),
        registration_type: summary.registration_type.parse()?,
        status: status(&summary.status_type)?,
        expire_days: summary.expire_days,
        created_at: summary.create_date_time,
        changes,
        expand: summary.expand,
    })
}

pub fn new_item(item: RegTableNewItem) -> Result<NewItem> {
    let added_reg_summary = match item.added_reg_summary {
        ItemSummary::Registration(summary) => TableRow::Registration(registration_record(summary)?),
        ItemSummary::Draft(draft) => TableRow::Draft(draft_record(draft)?),
    };
    let prev_draft = item.prev_draft.trim();

    Ok(NewItem {
        added_reg: item.added_reg,
        added_reg_parent: optional_number(&item.added_reg_parent),
        added_reg_summary,
        prev_draft: (!prev_draft.is_empty()).then(|| DocumentId::new(prev_draft)),
    })
}

/// The new item for a registration found by number.
///
/// Adding a change registration puts its base on top.
pub fn added_registration(number: &RegistrationNumber, summary: RegistrationSummary) -> Result<NewItem> {
    let parent = (summary.base_registration_number != number.as_str())
        .then(|| RegistrationNumber::new(summary.base_registration_number.as_str()));
    Ok(NewItem {
        added_reg: number.to_string(),
        added_reg_parent: parent,
        added_reg_summary: TableRow::Registration(registration_record(summary)?),
        prev_draft: None,
    })
}

pub fn fee_summary_view(summary: &FeeSummary) -> FeeSummaryView {
    FeeSummaryView {
        fee_amount: summary.fee_amount.as_dollars(),
        quantity: summary.quantity,
        service_fee: summary.service_fee.as_dollars(),
        total_fees: summary.total_fees.as_dollars(),
        total_amount: summary.total_amount.as_dollars(),
        is_complete: summary.is_complete,
        hint_fee: summary.hint_fee.clone(),
        fee_label: summary.fee_label.clone(),
    }
}
