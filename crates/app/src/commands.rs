use std::{fs, path::Path, time::Duration};

use api_types::registration::{DraftResult, RegTableNewItem, RegistrationSummary};
use engine::{
    AuthRole, ChildRecord, DeleteTarget, DocumentId, FeeOverride, FeeRequest, FeeSchedule,
    FeeType, NewItem, RegistrationLength, RegistrationNumber, RegistrationRecord,
    RegistrationStatus, RegistrationTable, StaffPaymentOption, TableHeader, TableRow,
    select_columns,
};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::{
    convert,
    error::{AppError, Result},
    local_state::{FileColumnStore, LocalState},
    settings::{ColumnsArgs, FeeAction, FeeArgs, Payment, Role, Settings, TableArgs},
};

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn read_list<T: DeserializeOwned>(path: Option<&Path>) -> Result<Vec<T>> {
    match path {
        Some(path) => read_json(path),
        None => Ok(Vec::new()),
    }
}

pub fn table(settings: &Settings, args: TableArgs) -> Result<()> {
    let drafts = read_list::<DraftResult>(args.drafts.as_deref())?
        .into_iter()
        .map(convert::draft_record)
        .collect::<Result<Vec<_>>>()?;
    let history = read_list::<RegistrationSummary>(args.history.as_deref())?
        .into_iter()
        .map(convert::registration_record)
        .collect::<Result<Vec<_>>>()?;
    info!(drafts = drafts.len(), registrations = history.len(), "loaded exports");

    let mut table = RegistrationTable::builder()
        .highlight_for(Duration::from_millis(settings.highlight_ms))
        .build()?;
    table.load(drafts, history);

    if let Some(path) = &args.add {
        let item: RegTableNewItem = read_json(path)?;
        table.apply_new_item(convert::new_item(item)?);
    }
    if let Some(number) = &args.add_registration {
        let source = read_list::<RegistrationSummary>(args.source.as_deref())?;
        table.apply_new_item(find_registration(number, source)?);
    }
    if let Some(document_id) = &args.delete {
        let document_id = DocumentId::new(document_id.as_str());
        let target = match &args.base {
            Some(base) => DeleteTarget::child_draft(document_id, RegistrationNumber::parse(base)?),
            None => DeleteTarget::draft(document_id),
        };
        table.delete(&target)?;
    }
    if let Some(number) = &args.remove {
        table.remove(&RegistrationNumber::parse(number)?)?;
    }
    if args.restore {
        table.restore()?;
    }
    if let Some(number) = &args.expand {
        table.toggle_expand(&RegistrationNumber::parse(number)?)?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(table.view())?);
        return Ok(());
    }

    let columns = LocalState::load(&settings.state_path)?
        .columns()?
        .unwrap_or_else(|| TableHeader::ALL.to_vec());
    let highlighted = table.new_item().map(|item| item.added_reg);
    print_table(&table, &columns, highlighted.as_deref());
    Ok(())
}

/// Builds the new item for a registration the user typed in.
fn find_registration(input: &str, source: Vec<RegistrationSummary>) -> Result<NewItem> {
    let number = RegistrationNumber::parse(input)?;
    let summary = source
        .into_iter()
        .find(|summary| {
            summary.registration_number == number.as_str()
                || summary.base_registration_number == number.as_str()
        })
        .ok_or_else(|| AppError::Invalid(format!("registration {number} not found")))?;
    convert::added_registration(&number, summary)
}

fn print_table(table: &RegistrationTable, columns: &[TableHeader], highlighted: Option<&str>) {
    let columns: Vec<TableHeader> = select_columns(columns)
        .into_iter()
        .filter(|header| *header != TableHeader::Actions)
        .collect();
    let view = table.view();

    println!("Registrations ({})", view.registration_count());
    println!(
        "  {}",
        columns
            .iter()
            .map(|header| header.label())
            .collect::<Vec<_>>()
            .join(" | ")
    );
    for row in view.rows() {
        let marker = if Some(row.identifier()) == highlighted { "*" } else { " " };
        let cells: Vec<String> = columns.iter().map(|header| row_cell(row, *header)).collect();
        println!("{marker} {}", cells.join(" | "));

        if let TableRow::Registration(base) = row {
            if base.expand {
                for child in &base.changes {
                    let cells: Vec<String> = columns
                        .iter()
                        .map(|header| child_cell(base, child, *header))
                        .collect();
                    println!("    {}", cells.join(" | "));
                }
            } else if !base.changes.is_empty() {
                println!("    ({} changes)", base.changes.len());
            }
        }
    }
}

fn row_cell(row: &TableRow, header: TableHeader) -> String {
    match (row, header) {
        (_, TableHeader::RegistrationNumber) => row.identifier().to_string(),
        (TableRow::Draft(draft), TableHeader::RegistrationType) => {
            draft.registration_type.label().to_string()
        }
        (TableRow::Registration(base), TableHeader::RegistrationType) => {
            base.registration_type.label().to_string()
        }
        (TableRow::Draft(draft), TableHeader::CreateDateTime) => {
            draft.created_at.format("%B %-d, %Y").to_string()
        }
        (TableRow::Registration(base), TableHeader::CreateDateTime) => {
            base.created_at.format("%B %-d, %Y").to_string()
        }
        (TableRow::Draft(_), TableHeader::StatusType) => "Draft".to_string(),
        (TableRow::Registration(base), TableHeader::StatusType) => {
            base.status.label().to_string()
        }
        (TableRow::Registration(base), TableHeader::ExpireDays) => match base.expire_days {
            Some(days) if base.status == RegistrationStatus::Active => days.to_string(),
            Some(_) => "N/A".to_string(),
            None => "Never".to_string(),
        },
        _ => String::new(),
    }
}

fn child_cell(base: &RegistrationRecord, child: &ChildRecord, header: TableHeader) -> String {
    match (child, header) {
        (ChildRecord::Draft(draft), TableHeader::RegistrationNumber) => {
            draft.document_id.to_string()
        }
        (ChildRecord::Change(change), TableHeader::RegistrationNumber) => {
            change.registration_number.to_string()
        }
        (ChildRecord::Draft(draft), TableHeader::RegistrationType) => {
            draft.change_kind.label().to_string()
        }
        (ChildRecord::Change(change), TableHeader::RegistrationType) => {
            change.change_kind.label().to_string()
        }
        (_, TableHeader::CreateDateTime) => child.created_at().format("%B %-d, %Y").to_string(),
        (ChildRecord::Draft(_), TableHeader::StatusType) => "Draft".to_string(),
        (ChildRecord::Change(_), TableHeader::StatusType) => base.status.label().to_string(),
        _ => String::new(),
    }
}

pub fn fee(args: FeeArgs) -> Result<()> {
    let fee_type = match args.fee_type {
        FeeAction::New => FeeType::New,
        FeeAction::Renew => FeeType::Renew,
        FeeAction::Amend => FeeType::Amend,
        FeeAction::Discharge => FeeType::Discharge,
    };
    let roles: Vec<AuthRole> = args
        .roles
        .iter()
        .map(|role| match role {
            Role::Staff => AuthRole::Staff,
            Role::Sbc => AuthRole::Sbc,
            Role::Client => AuthRole::Client,
        })
        .collect();
    let payment = match args.payment {
        Payment::None => StaffPaymentOption::None,
        Payment::NoFee => StaffPaymentOption::NoFee,
        Payment::Fas => StaffPaymentOption::Fas,
        Payment::Bcol => StaffPaymentOption::Bcol,
        Payment::CreditCard => StaffPaymentOption::CreditCard,
    };

    let mut request = FeeRequest::new(fee_type, args.registration_type.parse()?);
    if args.infinite {
        request = request.length(RegistrationLength::infinite());
    } else if let Some(years) = args.years {
        request = request.length(RegistrationLength::years(years));
    }
    if let Some(fee_override) = FeeOverride::for_staff_payment(&roles, payment) {
        debug!("staff no fee override applied");
        request = request.fee_override(fee_override);
    }

    let summary = FeeSchedule::default().summary(&request)?;
    let view = convert::fee_summary_view(&summary);
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

pub fn columns(settings: &Settings, args: ColumnsArgs) -> Result<()> {
    let columns = if args.headers.is_empty() {
        LocalState::load(&settings.state_path)?
            .columns()?
            .unwrap_or_else(|| TableHeader::ALL.to_vec())
    } else {
        let preferred = engine::parse_columns(args.headers.as_slice())?;
        let mut store = FileColumnStore::new(settings.state_path.as_str());
        engine::set_columns(&preferred, &mut store)?
    };

    for header in columns {
        println!("{} ({})", header.label(), header.value());
    }
    Ok(())
}
