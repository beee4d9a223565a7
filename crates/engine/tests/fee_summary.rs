use engine::{
    EngineError, FeeOverride, FeeRequest, FeeRule, FeeSchedule, FeeSummary, FeeType,
    LengthPolicy, MoneyCents, RegistrationClass, RegistrationLength, RegistrationType,
};

const SELECTABLE: [RegistrationType; 5] = [
    RegistrationType::SecurityAgreement,
    RegistrationType::SaleOfGoods,
    RegistrationType::ForestryContractorLien,
    RegistrationType::ForestryContractorCharge,
    RegistrationType::ForestrySubcontractorLien,
];

fn summary(request: FeeRequest) -> FeeSummary {
    FeeSchedule::default().summary(&request).unwrap()
}

fn cents(value: i64) -> MoneyCents {
    MoneyCents::new(value)
}

fn no_fee_types() -> impl Iterator<Item = RegistrationType> {
    RegistrationType::ALL
        .into_iter()
        .filter(|kind| kind.class() != RegistrationClass::Standard)
}

#[test]
fn repairers_lien_is_a_fixed_180_day_registration() {
    for length in [None, Some(RegistrationLength::years(12)), Some(RegistrationLength::infinite())] {
        let mut request = FeeRequest::new(FeeType::New, RegistrationType::RepairersLien);
        request.registration_length = length;
        let fee = summary(request);

        assert_eq!(fee.fee_amount, cents(500));
        assert_eq!(fee.quantity, 1);
        assert_eq!(fee.service_fee, cents(150));
        assert_eq!(fee.total_fees, cents(500));
        assert_eq!(fee.total_amount, cents(650));
        assert!(fee.is_complete);
        assert_eq!(fee.hint_fee, "180 Day Registration (default)");
        assert_eq!(fee.fee_label, "Repairer's Lien");
    }
}

#[test]
fn marriage_mh_is_a_fixed_infinite_registration() {
    let fee = summary(FeeRequest::new(FeeType::New, RegistrationType::MarriageMh));

    assert_eq!(fee.fee_amount, cents(1000));
    assert_eq!(fee.quantity, 1);
    assert_eq!(fee.total_amount, cents(1150));
    assert!(fee.is_complete);
    assert_eq!(fee.hint_fee, "Infinite Registration (default)");
}

#[test]
fn selectable_length_without_years_is_incomplete() {
    for kind in SELECTABLE {
        let fee = summary(FeeRequest::new(FeeType::New, kind).length(RegistrationLength::years(0)));

        assert_eq!(fee.fee_amount, cents(500));
        assert_eq!(fee.quantity, 0);
        assert_eq!(fee.service_fee, cents(150));
        assert_eq!(fee.total_fees, MoneyCents::ZERO);
        assert_eq!(fee.total_amount, cents(150));
        assert!(!fee.is_complete);
        assert_eq!(fee.hint_fee, "Select registration length");
    }

    let missing = summary(FeeRequest::new(FeeType::New, RegistrationType::SecurityAgreement));
    assert!(!missing.is_complete);
    assert_eq!(missing.quantity, 0);
}

#[test]
fn renewal_without_years_asks_for_renewal_length() {
    let fee = summary(
        FeeRequest::new(FeeType::Renew, RegistrationType::SecurityAgreement)
            .length(RegistrationLength::years(0)),
    );

    assert!(!fee.is_complete);
    assert_eq!(fee.total_amount, cents(150));
    assert_eq!(fee.hint_fee, "Select registration renewal length");
    assert_eq!(fee.fee_label, "Registration Renewal");
}

#[test]
fn selectable_length_charges_per_year() {
    let fee = summary(
        FeeRequest::new(FeeType::New, RegistrationType::SecurityAgreement)
            .length(RegistrationLength::years(12)),
    );
    assert_eq!(fee.quantity, 12);
    assert_eq!(fee.total_fees, cents(6000));
    assert_eq!(fee.total_amount, cents(6150));
    assert!(fee.is_complete);
    assert_eq!(fee.hint_fee, "12 Years @ $5.00/year");

    let fee = summary(
        FeeRequest::new(FeeType::New, RegistrationType::SaleOfGoods)
            .length(RegistrationLength::years(1)),
    );
    assert_eq!(fee.quantity, 1);
    assert_eq!(fee.total_amount, cents(650));
    assert_eq!(fee.hint_fee, "1 Year @ $5.00/year");
}

#[test]
fn selectable_length_infinite() {
    for kind in SELECTABLE {
        let fee = summary(FeeRequest::new(FeeType::New, kind).length(RegistrationLength::infinite()));

        assert_eq!(fee.fee_amount, cents(50_000));
        assert_eq!(fee.quantity, 1);
        assert_eq!(fee.total_fees, cents(50_000));
        assert_eq!(fee.total_amount, cents(50_150));
        assert!(fee.is_complete);
        assert_eq!(fee.hint_fee, "Infinite Registration");
    }
}

#[test]
fn override_is_ignored_for_selectable_length() {
    let fee = summary(
        FeeRequest::new(FeeType::New, RegistrationType::SecurityAgreement)
            .length(RegistrationLength::years(12))
            .fee_override(FeeOverride {
                fee_amount: MoneyCents::ZERO,
                service_fee: cents(250),
            }),
    );

    assert_eq!(fee.fee_amount, cents(500));
    assert_eq!(fee.service_fee, cents(150));
    assert_eq!(fee.total_amount, cents(6150));
}

#[test]
fn override_replaces_only_the_service_fee_of_fixed_rules() {
    let fee = summary(
        FeeRequest::new(FeeType::New, RegistrationType::RepairersLien).fee_override(FeeOverride {
            fee_amount: MoneyCents::ZERO,
            service_fee: MoneyCents::ZERO,
        }),
    );

    assert_eq!(fee.fee_amount, cents(500));
    assert_eq!(fee.service_fee, MoneyCents::ZERO);
    assert_eq!(fee.total_amount, cents(500));
}

#[test]
fn no_fee_types_ignore_length_and_override() {
    let fee_override = FeeOverride {
        fee_amount: MoneyCents::ZERO,
        service_fee: cents(400),
    };
    for kind in no_fee_types() {
        for fee_type in [FeeType::New, FeeType::Renew, FeeType::Amend] {
            let fee = summary(
                FeeRequest::new(fee_type, kind)
                    .length(RegistrationLength::years(5))
                    .fee_override(fee_override),
            );

            assert_eq!(fee.fee_amount, MoneyCents::ZERO);
            assert_eq!(fee.quantity, 1);
            assert_eq!(fee.service_fee, MoneyCents::ZERO);
            assert_eq!(fee.total_amount, MoneyCents::ZERO);
            assert!(fee.is_complete);
            assert_eq!(fee.hint_fee, "Infinite Registration (default)");
        }
    }
}

#[test]
fn discharge_is_free_for_every_type() {
    for kind in RegistrationType::ALL {
        let fee = summary(FeeRequest::new(FeeType::Discharge, kind));

        assert_eq!(fee.fee_amount, MoneyCents::ZERO);
        assert_eq!(fee.quantity, 1);
        assert_eq!(fee.service_fee, MoneyCents::ZERO);
        assert_eq!(fee.total_amount, MoneyCents::ZERO);
        assert!(fee.is_complete);
        assert_eq!(fee.hint_fee, "");
        assert_eq!(fee.fee_label, "Total Discharge");
    }
}

#[test]
fn discharge_stays_free_with_an_override() {
    let fee_override = FeeOverride {
        fee_amount: MoneyCents::ZERO,
        service_fee: cents(250),
    };
    for kind in RegistrationType::ALL {
        let fee = summary(FeeRequest::new(FeeType::Discharge, kind).fee_override(fee_override));

        assert_eq!(fee.fee_amount, MoneyCents::ZERO);
        assert_eq!(fee.service_fee, MoneyCents::ZERO);
        assert_eq!(fee.total_amount, MoneyCents::ZERO);
        assert!(fee.is_complete);
    }
}

#[test]
fn overflowing_custom_rule_is_an_error() {
    let schedule = FeeSchedule::builder()
        .rule(
            RegistrationType::SecurityAgreement,
            FeeType::New,
            FeeRule {
                unit_fee: MoneyCents::new(i64::MAX / 2),
                service_fee: cents(150),
                billable: true,
                length_policy: LengthPolicy::SelectableYears {
                    infinite_fee: MoneyCents::dollars(500),
                },
            },
        )
        .build();

    let result = schedule.summary(
        &FeeRequest::new(FeeType::New, RegistrationType::SecurityAgreement)
            .length(RegistrationLength::years(3)),
    );
    assert!(matches!(result, Err(EngineError::InvalidAmount(_))));

    let result = schedule.summary(
        &FeeRequest::new(FeeType::New, RegistrationType::SecurityAgreement)
            .length(RegistrationLength::infinite()),
    );
    assert_eq!(result.unwrap().total_amount, cents(50_150));
}

#[test]
fn new_registration_label_is_the_type_label() {
    for kind in RegistrationType::ALL {
        let fee = summary(FeeRequest::new(FeeType::New, kind));
        assert_eq!(fee.fee_label, kind.label());
    }
}

#[test]
fn amendment_has_a_flat_fee() {
    let fee = summary(FeeRequest::new(FeeType::Amend, RegistrationType::SecurityAgreement));

    assert_eq!(fee.fee_amount, cents(1000));
    assert_eq!(fee.total_amount, cents(1150));
    assert_eq!(fee.hint_fee, "");
    assert_eq!(fee.fee_label, "Registration Amendment");
}

#[test]
fn infinite_only_rule_requires_infinite_length() {
    let schedule = FeeSchedule::builder()
        .rule(
            RegistrationType::SaleOfGoods,
            FeeType::New,
            FeeRule {
                unit_fee: MoneyCents::dollars(5),
                service_fee: cents(150),
                billable: true,
                length_policy: LengthPolicy::InfiniteOnly {
                    infinite_fee: MoneyCents::dollars(500),
                },
            },
        )
        .build();

    let pending = schedule
        .summary(
            &FeeRequest::new(FeeType::New, RegistrationType::SaleOfGoods)
                .length(RegistrationLength::years(3)),
        )
        .unwrap();
    assert!(!pending.is_complete);
    assert_eq!(pending.total_amount, cents(150));

    let staff = schedule
        .summary(
            &FeeRequest::new(FeeType::New, RegistrationType::SaleOfGoods)
                .length(RegistrationLength::infinite())
                .fee_override(FeeOverride::default()),
        )
        .unwrap();
    assert!(staff.is_complete);
    assert_eq!(staff.hint_fee, "Infinite Registration");
    assert_eq!(staff.fee_amount, cents(50_000));
    assert_eq!(staff.total_amount, cents(50_000));
}
