use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod registration {
    use super::*;

    /// Draft as returned by the drafts endpoint.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DraftResult {
        pub document_id: String,
        /// Registration type code, e.g. `SECURITY_AGREEMENT`.
        pub registration_type: String,
        /// Statement kind, e.g. `FINANCING_STATEMENT` or `AMENDMENT_STATEMENT`.
        #[serde(rename = "type")]
        pub statement_type: String,
        /// Empty for a new financing statement.
        #[serde(default)]
        pub base_registration_number: String,
        pub create_date_time: DateTime<Utc>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub client_reference_id: Option<String>,
    }

    /// Completed amendment, renewal or discharge listed under its base
    /// registration.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ChangeRegistration {
        pub registration_number: String,
        pub base_registration_number: String,
        /// `AMENDMENT`, `COURTORDER`, `RENEWAL` or `DISCHARGE`.
        pub registration_class: String,
        pub create_date_time: DateTime<Utc>,
    }

    /// Entry of the `changes` list of a registration summary.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum RegistrationChange {
        Draft(DraftResult),
        Registration(ChangeRegistration),
    }

    /// Base registration as returned by the registration history endpoint.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RegistrationSummary {
        pub registration_number: String,
        pub base_registration_number: String,
        pub registration_type: String,
        /// `ACT`, `EXP` or `DIS`.
        pub status_type: String,
        #[serde(default)]
        pub expire_days: Option<i64>,
        pub create_date_time: DateTime<Utc>,
        #[serde(default)]
        pub changes: Vec<RegistrationChange>,
        #[serde(default)]
        pub expand: bool,
    }

    /// Summary of a table item: a registration or a draft.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum ItemSummary {
        Registration(RegistrationSummary),
        Draft(DraftResult),
    }

    /// Item just added to the registrations table.
    ///
    /// Empty strings stand for "none", as the backend sends them.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RegTableNewItem {
        pub added_reg: String,
        #[serde(default)]
        pub added_reg_parent: String,
        pub added_reg_summary: ItemSummary,
        #[serde(default)]
        pub prev_draft: String,
    }
}

pub mod fee {
    use super::*;

    /// Fee summary as shown to the user, amounts in dollars.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct FeeSummaryView {
        pub fee_amount: f64,
        pub quantity: u32,
        pub service_fee: f64,
        pub total_fees: f64,
        pub total_amount: f64,
        pub is_complete: bool,
        pub hint_fee: String,
        pub fee_label: String,
    }
}

pub mod settings {
    use super::*;

    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RegistrationTableSettings {
        /// Selected header values, e.g. `registrationNumber`.
        #[serde(default)]
        pub columns: Vec<String>,
    }

    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct UserSettings {
        #[serde(default)]
        pub registrations_table_settings: Option<RegistrationTableSettings>,
    }
}
