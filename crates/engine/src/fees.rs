//! Fee computation.
//!
//! A [`FeeSchedule`] maps `(RegistrationType, FeeType)` to a [`FeeRule`] and
//! turns a [`FeeRequest`] into an itemized [`FeeSummary`]. The built-in rules
//! cover every registration type, so a lookup never fails; callers can layer
//! their own rules on top with [`FeeSchedule::builder`].
//!
//! Statutory fees are never waived: a [`FeeOverride`] only replaces the service
//! fee, and only for rules whose length is not user selectable. Free filings
//! such as discharges stay free whatever the override says.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{EngineError, MoneyCents, RegistrationClass, RegistrationType, ResultEngine};

const UNIT_FEE: MoneyCents = MoneyCents::dollars(5);
const INFINITE_FEE: MoneyCents = MoneyCents::dollars(500);
const SERVICE_FEE: MoneyCents = MoneyCents::new(150);
const REPAIRERS_LIEN_FEE: MoneyCents = MoneyCents::dollars(5);
const MARRIAGE_MH_FEE: MoneyCents = MoneyCents::dollars(10);
const AMENDMENT_FEE: MoneyCents = MoneyCents::dollars(10);

const HINT_DEFAULT_INFINITE: &str = "Infinite Registration (default)";
const HINT_DEFAULT_180_DAYS: &str = "180 Day Registration (default)";
const HINT_INFINITE: &str = "Infinite Registration";
const HINT_SELECT_LENGTH: &str = "Select registration length";
const HINT_SELECT_RENEWAL_LENGTH: &str = "Select registration renewal length";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeeType {
    New,
    Renew,
    Amend,
    Discharge,
}

impl FeeType {
    /// Label of the fee line for this action.
    #[must_use]
    pub const fn fee_label(self, registration_type: RegistrationType) -> &'static str {
        match self {
            Self::New => registration_type.label(),
            Self::Renew => "Registration Renewal",
            Self::Amend => "Registration Amendment",
            Self::Discharge => "Total Discharge",
        }
    }
}

/// Requested life of a registration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationLength {
    pub life_years: u32,
    pub life_infinite: bool,
}

impl RegistrationLength {
    #[must_use]
    pub const fn years(life_years: u32) -> Self {
        Self {
            life_years,
            life_infinite: false,
        }
    }

    #[must_use]
    pub const fn infinite() -> Self {
        Self {
            life_years: 0,
            life_infinite: true,
        }
    }
}

/// Staff-asserted fee substitution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeOverride {
    pub fee_amount: MoneyCents,
    pub service_fee: MoneyCents,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthRole {
    Staff,
    Sbc,
    Client,
}

/// How a staff member collects payment for a filing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffPaymentOption {
    #[default]
    None,
    NoFee,
    Fas,
    Bcol,
    CreditCard,
}

impl FeeOverride {
    /// The override a session is entitled to, if any.
    ///
    /// Only staff may file without fee, and only when they picked the "no fee"
    /// payment option.
    #[must_use]
    pub fn for_staff_payment(roles: &[AuthRole], option: StaffPaymentOption) -> Option<Self> {
        (option == StaffPaymentOption::NoFee && roles.contains(&AuthRole::Staff))
            .then(Self::default)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LengthPolicy {
    /// One fixed term at a fixed fee.
    Fixed { fee: MoneyCents, hint: &'static str },
    /// Yearly fee times the selected years, or the infinite fee.
    SelectableYears { infinite_fee: MoneyCents },
    /// Only an infinite life can be registered.
    InfiniteOnly { infinite_fee: MoneyCents },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeeRule {
    pub unit_fee: MoneyCents,
    pub service_fee: MoneyCents,
    pub billable: bool,
    pub length_policy: LengthPolicy,
}

impl FeeRule {
    const NOT_BILLABLE: FeeRule = FeeRule {
        unit_fee: MoneyCents::ZERO,
        service_fee: MoneyCents::ZERO,
        billable: false,
        length_policy: LengthPolicy::Fixed {
            fee: MoneyCents::ZERO,
            hint: HINT_DEFAULT_INFINITE,
        },
    };

    const fn fixed(fee: MoneyCents, hint: &'static str) -> FeeRule {
        FeeRule {
            unit_fee: fee,
            service_fee: SERVICE_FEE,
            billable: true,
            length_policy: LengthPolicy::Fixed { fee, hint },
        }
    }

    /// Built-in rule for a registration type and action.
    #[must_use]
    pub const fn builtin(registration_type: RegistrationType, fee_type: FeeType) -> FeeRule {
        if let FeeType::Discharge = fee_type {
            return FeeRule {
                unit_fee: MoneyCents::ZERO,
                service_fee: MoneyCents::ZERO,
                billable: true,
                length_policy: LengthPolicy::Fixed {
                    fee: MoneyCents::ZERO,
                    hint: "",
                },
            };
        }
        match registration_type.class() {
            RegistrationClass::NoFeeStandard | RegistrationClass::Miscellaneous => {
                Self::NOT_BILLABLE
            }
            RegistrationClass::Standard => match (fee_type, registration_type) {
                (FeeType::Amend, _) => Self::fixed(AMENDMENT_FEE, ""),
                (_, RegistrationType::RepairersLien) => {
                    Self::fixed(REPAIRERS_LIEN_FEE, HINT_DEFAULT_180_DAYS)
                }
                (_, RegistrationType::MarriageMh) => {
                    Self::fixed(MARRIAGE_MH_FEE, HINT_DEFAULT_INFINITE)
                }
                _ => FeeRule {
                    unit_fee: UNIT_FEE,
                    service_fee: SERVICE_FEE,
                    billable: true,
                    length_policy: LengthPolicy::SelectableYears {
                        infinite_fee: INFINITE_FEE,
                    },
                },
            },
        }
    }
}

/// Input of a fee computation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeeRequest {
    pub fee_type: FeeType,
    pub registration_type: RegistrationType,
    pub registration_length: Option<RegistrationLength>,
    pub fee_override: Option<FeeOverride>,
}

impl FeeRequest {
    #[must_use]
    pub fn new(fee_type: FeeType, registration_type: RegistrationType) -> Self {
        Self {
            fee_type,
            registration_type,
            registration_length: None,
            fee_override: None,
        }
    }

    #[must_use]
    pub fn length(mut self, length: RegistrationLength) -> Self {
        self.registration_length = Some(length);
        self
    }

    #[must_use]
    pub fn fee_override(mut self, fee_override: FeeOverride) -> Self {
        self.fee_override = Some(fee_override);
        self
    }
}

/// Itemized fee of a registration action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSummary {
    pub fee_amount: MoneyCents,
    pub quantity: u32,
    pub service_fee: MoneyCents,
    pub total_fees: MoneyCents,
    pub total_amount: MoneyCents,
    pub is_complete: bool,
    pub hint_fee: String,
    pub fee_label: String,
}

impl FeeSummary {
    fn new(
        fee_amount: MoneyCents,
        quantity: u32,
        service_fee: MoneyCents,
        is_complete: bool,
        hint_fee: impl Into<String>,
        fee_label: &str,
    ) -> ResultEngine<Self> {
        let overflow = || {
            EngineError::InvalidAmount(format!(
                "{fee_amount} x {quantity} + {service_fee} does not fit"
            ))
        };
        let total_fees = fee_amount.checked_mul(quantity).ok_or_else(overflow)?;
        let total_amount = total_fees.checked_add(service_fee).ok_or_else(overflow)?;
        Ok(Self {
            fee_amount,
            quantity,
            service_fee,
            total_fees,
            total_amount,
            is_complete,
            hint_fee: hint_fee.into(),
            fee_label: fee_label.to_string(),
        })
    }
}

/// The fee rules in effect. Immutable once built.
#[derive(Clone, Debug, Default)]
pub struct FeeSchedule {
    rules: HashMap<(RegistrationType, FeeType), FeeRule>,
}

impl FeeSchedule {
    /// Return a builder for `FeeSchedule`. Help to replace built-in rules.
    pub fn builder() -> FeeScheduleBuilder {
        FeeScheduleBuilder::default()
    }

    /// Rule in effect for a registration type and action.
    #[must_use]
    pub fn rule(&self, registration_type: RegistrationType, fee_type: FeeType) -> FeeRule {
        self.rules
            .get(&(registration_type, fee_type))
            .copied()
            .unwrap_or_else(|| FeeRule::builtin(registration_type, fee_type))
    }

    /// Computes the fee summary of a request.
    ///
    /// Fails only when a custom rule makes the totals overflow.
    pub fn summary(&self, request: &FeeRequest) -> ResultEngine<FeeSummary> {
        let rule = self.rule(request.registration_type, request.fee_type);
        let label = request.fee_type.fee_label(request.registration_type);
        let length = request.registration_length;
        let select_hint = if request.fee_type == FeeType::Renew {
            HINT_SELECT_RENEWAL_LENGTH
        } else {
            HINT_SELECT_LENGTH
        };
        // Statutory amounts are never replaced, only a charged service fee.
        let override_service = match request.fee_override {
            Some(fee_override) if !rule.service_fee.is_zero() => fee_override.service_fee,
            _ => rule.service_fee,
        };

        let summary = if !rule.billable {
            FeeSummary::new(
                MoneyCents::ZERO,
                1,
                MoneyCents::ZERO,
                true,
                HINT_DEFAULT_INFINITE,
                label,
            )
        } else {
            match rule.length_policy {
                LengthPolicy::Fixed { fee, hint } => {
                    FeeSummary::new(fee, 1, override_service, true, hint, label)
                }
                LengthPolicy::InfiniteOnly { infinite_fee } => match length {
                    Some(length) if length.life_infinite => FeeSummary::new(
                        infinite_fee,
                        1,
                        override_service,
                        true,
                        HINT_INFINITE,
                        label,
                    ),
                    _ => FeeSummary::new(infinite_fee, 0, override_service, false, select_hint, label),
                },
                LengthPolicy::SelectableYears { infinite_fee } => match length {
                    Some(length) if length.life_infinite => FeeSummary::new(
                        infinite_fee,
                        1,
                        rule.service_fee,
                        true,
                        HINT_INFINITE,
                        label,
                    ),
                    Some(length) if length.life_years > 0 => {
                        let years = length.life_years;
                        let unit = if years == 1 { "Year" } else { "Years" };
                        FeeSummary::new(
                            rule.unit_fee,
                            years,
                            rule.service_fee,
                            true,
                            format!("{years} {unit} @ {}/year", rule.unit_fee),
                            label,
                        )
                    }
                    _ => FeeSummary::new(
                        rule.unit_fee,
                        0,
                        rule.service_fee,
                        false,
                        select_hint,
                        label,
                    ),
                },
            }
        }?;

        debug!(
            fee_type = ?request.fee_type,
            registration_type = request.registration_type.as_str(),
            total = %summary.total_amount,
            complete = summary.is_complete,
            "computed fee summary"
        );
        Ok(summary)
    }
}

/// The builder for `FeeSchedule`
#[derive(Default)]
pub struct FeeScheduleBuilder {
    rules: HashMap<(RegistrationType, FeeType), FeeRule>,
}

impl FeeScheduleBuilder {
    /// Replace the rule of a registration type and action.
    pub fn rule(
        mut self,
        registration_type: RegistrationType,
        fee_type: FeeType,
        rule: FeeRule,
    ) -> FeeScheduleBuilder {
        self.rules.insert((registration_type, fee_type), rule);
        self
    }

    /// Construct `FeeSchedule`
    pub fn build(self) -> FeeSchedule {
        FeeSchedule { rules: self.rules }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fee_labels() {
        let kind = RegistrationType::SecurityAgreement;
        assert_eq!(FeeType::New.fee_label(kind), "Security Agreement");
        assert_eq!(FeeType::Renew.fee_label(kind), "Registration Renewal");
        assert_eq!(FeeType::Amend.fee_label(kind), "Registration Amendment");
        assert_eq!(FeeType::Discharge.fee_label(kind), "Total Discharge");
    }

    #[test]
    fn builtin_covers_every_type_and_action() {
        for kind in RegistrationType::ALL {
            for fee_type in [FeeType::New, FeeType::Renew, FeeType::Amend, FeeType::Discharge] {
                let rule = FeeRule::builtin(kind, fee_type);
                if !rule.billable {
                    assert!(rule.unit_fee.is_zero());
                }
            }
        }
    }

    #[test]
    fn only_staff_no_fee_gets_an_override() {
        assert_eq!(
            FeeOverride::for_staff_payment(&[AuthRole::Staff], StaffPaymentOption::NoFee),
            Some(FeeOverride::default())
        );
        assert_eq!(
            FeeOverride::for_staff_payment(&[AuthRole::Client], StaffPaymentOption::NoFee),
            None
        );
        assert_eq!(
            FeeOverride::for_staff_payment(&[AuthRole::Staff], StaffPaymentOption::Fas),
            None
        );
    }

    #[test]
    fn custom_rule_replaces_builtin() {
        let rule = FeeRule {
            unit_fee: MoneyCents::dollars(7),
            service_fee: SERVICE_FEE,
            billable: true,
            length_policy: LengthPolicy::SelectableYears {
                infinite_fee: INFINITE_FEE,
            },
        };
        let schedule = FeeSchedule::builder()
            .rule(RegistrationType::SaleOfGoods, FeeType::New, rule)
            .build();
        assert_eq!(schedule.rule(RegistrationType::SaleOfGoods, FeeType::New), rule);
        assert_eq!(
            schedule.rule(RegistrationType::SaleOfGoods, FeeType::Renew),
            FeeRule::builtin(RegistrationType::SaleOfGoods, FeeType::Renew)
        );
    }
}
