//! Registration types known to the registry.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Broad fee class of a registration type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegistrationClass {
    /// Standard registration with a selectable length.
    Standard,
    /// Standard registration filed without a fee.
    NoFeeStandard,
    /// Miscellaneous registration (Crown charges and other acts), no fee.
    Miscellaneous,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistrationType {
    SecurityAgreement,
    RepairersLien,
    MarriageMh,
    SaleOfGoods,
    LandTaxLien,
    ManufacturedHomeLien,
    ForestryContractorLien,
    ForestryContractorCharge,
    ForestrySubcontractorLien,
    CarbonTax,
    ExciseTax,
    Forest,
    IncomeTax,
    InsurancePremiumTax,
    LoggingTax,
    MineralLandTax,
    MotorFuelTax,
    PropertyTransferTax,
    PetroleumNaturalGasTax,
    ProvincialSalesTax,
    RuralPropertyTax,
    SchoolAct,
    SpeculationVacancyTax,
    TobaccoTax,
    Other,
    LienUnpaidWages,
    HeritageConservationNotice,
    ManufacturedHomeNotice,
    MaintenanceLien,
    ProceedsCrimeNotice,
}

impl RegistrationType {
    pub const ALL: [RegistrationType; 30] = [
        Self::SecurityAgreement,
        Self::RepairersLien,
        Self::MarriageMh,
        Self::SaleOfGoods,
        Self::LandTaxLien,
        Self::ManufacturedHomeLien,
        Self::ForestryContractorLien,
        Self::ForestryContractorCharge,
        Self::ForestrySubcontractorLien,
        Self::CarbonTax,
        Self::ExciseTax,
        Self::Forest,
        Self::IncomeTax,
        Self::InsurancePremiumTax,
        Self::LoggingTax,
        Self::MineralLandTax,
        Self::MotorFuelTax,
        Self::PropertyTransferTax,
        Self::PetroleumNaturalGasTax,
        Self::ProvincialSalesTax,
        Self::RuralPropertyTax,
        Self::SchoolAct,
        Self::SpeculationVacancyTax,
        Self::TobaccoTax,
        Self::Other,
        Self::LienUnpaidWages,
        Self::HeritageConservationNotice,
        Self::ManufacturedHomeNotice,
        Self::MaintenanceLien,
        Self::ProceedsCrimeNotice,
    ];

    /// Human readable label, also used as fee label for new registrations.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::SecurityAgreement => "Security Agreement",
            Self::RepairersLien => "Repairer's Lien",
            Self::MarriageMh => {
                "Marriage / Separation Agreement affecting Manufactured Home under Family Law Act"
            }
            Self::SaleOfGoods => "Sale of Goods Act (s. 30 or s. 31)",
            Self::LandTaxLien => "Land Tax Deferment Lien on a Manufactured Home",
            Self::ManufacturedHomeLien => "Tax Lien under the Manufactured Home Act",
            Self::ForestryContractorLien => "Forestry - Contractor Lien",
            Self::ForestryContractorCharge => "Forestry - Contractor Charge",
            Self::ForestrySubcontractorLien => "Forestry - Sub-contractor Charge",
            Self::CarbonTax => "Carbon Tax Act",
            Self::ExciseTax => "Excise Tax Act",
            Self::Forest => "Forest Act",
            Self::IncomeTax => "Income Tax Act",
            Self::InsurancePremiumTax => "Insurance Premium Tax Act",
            Self::LoggingTax => "Logging Tax Act",
            Self::MineralLandTax => "Mineral Land Tax Act",
            Self::MotorFuelTax => "Motor Fuel Tax Act",
            Self::PropertyTransferTax => "Property Transfer Tax Act",
            Self::PetroleumNaturalGasTax => "Petroleum and Natural Gas Act",
            Self::ProvincialSalesTax => "Provincial Sales Tax Act",
            Self::RuralPropertyTax => "Taxation (Rural Area) Act",
            Self::SchoolAct => "School Act",
            Self::SpeculationVacancyTax => "Speculation and Vacancy Tax Act",
            Self::TobaccoTax => "Tobacco Tax Act",
            Self::Other => "Other",
            Self::LienUnpaidWages => "Lien for Unpaid Wages",
            Self::HeritageConservationNotice => "Heritage Conservation Notice",
            Self::ManufacturedHomeNotice => "Manufactured Home Notice",
            Self::MaintenanceLien => "Maintenance Lien",
            Self::ProceedsCrimeNotice => "Proceeds of Crime Notice",
        }
    }

    /// Wire name, as serialized.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SecurityAgreement => "SECURITY_AGREEMENT",
            Self::RepairersLien => "REPAIRERS_LIEN",
            Self::MarriageMh => "MARRIAGE_MH",
            Self::SaleOfGoods => "SALE_OF_GOODS",
            Self::LandTaxLien => "LAND_TAX_LIEN",
            Self::ManufacturedHomeLien => "MANUFACTURED_HOME_LIEN",
            Self::ForestryContractorLien => "FORESTRY_CONTRACTOR_LIEN",
            Self::ForestryContractorCharge => "FORESTRY_CONTRACTOR_CHARGE",
            Self::ForestrySubcontractorLien => "FORESTRY_SUBCONTRACTOR_LIEN",
            Self::CarbonTax => "CARBON_TAX",
            Self::ExciseTax => "EXCISE_TAX",
            Self::Forest => "FOREST",
            Self::IncomeTax => "INCOME_TAX",
            Self::InsurancePremiumTax => "INSURANCE_PREMIUM_TAX",
            Self::LoggingTax => "LOGGING_TAX",
            Self::MineralLandTax => "MINERAL_LAND_TAX",
            Self::MotorFuelTax => "MOTOR_FUEL_TAX",
            Self::PropertyTransferTax => "PROPERTY_TRANSFER_TAX",
            Self::PetroleumNaturalGasTax => "PETROLEUM_NATURAL_GAS_TAX",
            Self::ProvincialSalesTax => "PROVINCIAL_SALES_TAX",
            Self::RuralPropertyTax => "RURAL_PROPERTY_TAX",
            Self::SchoolAct => "SCHOOL_ACT",
            Self::SpeculationVacancyTax => "SPECULATION_VACANCY_TAX",
            Self::TobaccoTax => "TOBACCO_TAX",
            Self::Other => "OTHER",
            Self::LienUnpaidWages => "LIEN_UNPAID_WAGES",
            Self::HeritageConservationNotice => "HERITAGE_CONSERVATION_NOTICE",
            Self::ManufacturedHomeNotice => "MANUFACTURED_HOME_NOTICE",
            Self::MaintenanceLien => "MAINTENANCE_LIEN",
            Self::ProceedsCrimeNotice => "PROCEEDS_CRIME_NOTICE",
        }
    }

    #[must_use]
    pub const fn class(self) -> RegistrationClass {
        match self {
            Self::SecurityAgreement
            | Self::RepairersLien
            | Self::MarriageMh
            | Self::SaleOfGoods
            | Self::ForestryContractorLien
            | Self::ForestryContractorCharge
            | Self::ForestrySubcontractorLien => RegistrationClass::Standard,
            Self::LandTaxLien | Self::ManufacturedHomeLien => RegistrationClass::NoFeeStandard,
            _ => RegistrationClass::Miscellaneous,
        }
    }
}

impl fmt::Display for RegistrationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RegistrationType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| EngineError::InvalidRegistrationType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_wire_and_cli_spelling() {
        assert_eq!(
            "SECURITY_AGREEMENT".parse::<RegistrationType>().unwrap(),
            RegistrationType::SecurityAgreement
        );
        assert_eq!(
            "repairers-lien".parse::<RegistrationType>().unwrap(),
            RegistrationType::RepairersLien
        );
        assert!("SA".parse::<RegistrationType>().is_err());
    }

    #[test]
    fn wire_name_matches_serde() {
        for kind in RegistrationType::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn no_fee_standard_types() {
        assert_eq!(
            RegistrationType::LandTaxLien.class(),
            RegistrationClass::NoFeeStandard
        );
        assert_eq!(
            RegistrationType::TobaccoTax.class(),
            RegistrationClass::Miscellaneous
        );
        assert_eq!(
            RegistrationType::RepairersLien.class(),
            RegistrationClass::Standard
        );
    }
}
