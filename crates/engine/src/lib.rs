//! Registry engines.
//!
//! Two independent, I/O free engines:
//!
//! - the registration table: merges drafts, base registrations and their
//!   changes into the ordered "My Registrations" table, see
//!   [`RegistrationTableView`] and [`RegistrationTable`];
//! - the fee summary: computes the itemized fee of a registration action, see
//!   [`FeeSchedule`].
//!
//! Callers fetch the data and hand it over; the engines never talk to the
//! backend themselves.

pub use columns::{ColumnStore, TableHeader, parse_columns, select_columns, set_columns};
pub use error::EngineError;
pub use fees::{
    AuthRole, FeeOverride, FeeRequest, FeeRule, FeeSchedule, FeeScheduleBuilder, FeeSummary,
    FeeType, LengthPolicy, RegistrationLength, StaffPaymentOption,
};
pub use money::MoneyCents;
pub use records::{
    ChangeKind, ChangeRecord, ChildRecord, DocumentId, DraftRecord, RegistrationNumber,
    RegistrationRecord, RegistrationStatus, TableRow,
};
pub use registration_type::{RegistrationClass, RegistrationType};
pub use session::{NEW_ITEM_HIGHLIGHT, RegistrationTable, RegistrationTableBuilder};
pub use table::{DeleteTarget, NewItem, RegistrationTableView};
pub use timer::{Task, Timer, TimerHandle, TokioTimer};

mod columns;
mod error;
mod fees;
mod money;
mod records;
mod registration_type;
mod session;
mod table;
mod timer;

type ResultEngine<T> = Result<T, EngineError>;
