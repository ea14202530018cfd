//! Registry behaviour with profiles.

use std::borrow::Cow;

use autovalidator::prelude::*;
use autovalidator::{ConfigurationIssue, ProfileValidationResult};
use pretty_assertions::assert_eq;

#[derive(Debug, Default)]
struct Model1 {
    name: String,
    age: i32,
}

#[derive(Debug, Default)]
struct Model2 {
    email_address: String,
    number: i32,
    category: String,
}

/// Maps `Model1` with the age check registered twice.
#[derive(Default)]
struct DuplicateMappingProfile;

impl ValidationProfile for DuplicateMappingProfile {
    fn name(&self) -> Cow<'static, str> {
        "duplicate-mapping".into()
    }

    fn configure(&self, config: &mut ProfileConfig) -> Result<(), ConfigError> {
        config
            .create_map::<Model1>()
            .for_member_check(member!(|m| m.age), check!(|a, exp| exp.min_value(a, 18, None)))?
            .for_member_check(member!(|m| m.age), check!(|a, exp| exp.min_value(a, 18, None)))?
            .for_member_check(member!(|m| m.name), check!(|n, exp| exp.not_null_or_empty(n, None)))?;
        Ok(())
    }
}

#[derive(Default)]
struct SignUpProfile;

impl ValidationProfile for SignUpProfile {
    fn configure(&self, config: &mut ProfileConfig) -> Result<(), ConfigError> {
        config
            .create_map::<Model2>()
            .for_member_check(
                member!(|m| m.email_address),
                check!(|e, exp| exp.is_email_address(e, None)),
            )?
            .for_member_check(member!(|m| m.number), check!(|n, exp| exp.min_value(n, 5, None)))?
            .for_member(member!(|m| m.category), |c| !c.is_empty(), None)?;
        Ok(())
    }
}

struct BrokenProfile;

impl ValidationProfile for BrokenProfile {
    fn configure(&self, config: &mut ProfileConfig) -> Result<(), ConfigError> {
        struct Outer {
            inner: Model1,
        }
        config
            .create_map::<Outer>()
            .for_member(member!(|m| m.inner.age), |_| true, None)?;
        Ok(())
    }
}

#[test]
fn permissive_registry_accepts_duplicates() {
    let mut registry = ValidatorRegistry::new();
    registry.add_profile::<DuplicateMappingProfile>().unwrap();

    assert!(registry.assert_configuration_is_valid().is_ok());
    let report = registry.configuration_validation();
    assert_eq!(
        report,
        vec![ProfileValidationResult {
            profile: "duplicate-mapping".to_string(),
            map_count: 1,
            issues: Vec::new(),
        }]
    );
}

#[test]
fn strict_registry_reports_duplicate_member() {
    let mut registry = ValidatorRegistry::with_policy(DuplicateMemberPolicy);
    registry.add_profile::<DuplicateMappingProfile>().unwrap();

    let report = registry.configuration_validation();
    assert_eq!(report.len(), 1);
    assert_eq!(
        report[0].issues,
        vec![ConfigurationIssue::DuplicateMember {
            profile: "duplicate-mapping".to_string(),
            type_name: std::any::type_name::<Model1>(),
            member: "age".to_string(),
            count: 2,
        }]
    );

    let err = registry.assert_configuration_is_valid().unwrap_err();
    assert!(matches!(err, ProfileError::InvalidConfiguration { .. }));
    assert!(err.to_string().contains("constrains"));
}

#[test]
fn registry_validates_the_sign_up_scenario() {
    let mut registry = ValidatorRegistry::new();
    registry
        .add_profiles([
            Box::new(SignUpProfile) as Box<dyn ValidationProfile>,
            Box::new(DuplicateMappingProfile),
        ])
        .unwrap();
    assert_eq!(registry.profile_count(), 2);

    let model = Model2 {
        email_address: "a.com".to_string(),
        number: 3,
        category: "dev".to_string(),
    };
    let result = registry.validate(&model).unwrap();
    assert!(!result.success());
    assert_eq!(result.error_count(), 2);
    assert_eq!(result.error("email_address"), Some("Invalid Email"));
    assert_eq!(result.error("number"), Some("number should be at least 5"));

    let young = registry.validate(&Model1 { name: "Jon".into(), age: 3 }).unwrap();
    assert_eq!(young.error("age"), Some("age should be at least 18"));
}

#[test]
fn settings_flow_through_registry() {
    let mut registry = ValidatorRegistry::new();
    registry.add_profile::<SignUpProfile>().unwrap();

    let settings = ValidationSettings::new().with_locale("de");
    let result = registry.validate_with(&Model2::default(), &settings).unwrap();
    assert_eq!(result.settings(), &settings);
    assert_eq!(result.error("category"), Some("|m| m.category did not pass validation"));
}

#[test]
fn unregistered_type_is_an_error() {
    let mut registry = ValidatorRegistry::new();
    registry.add_profile::<SignUpProfile>().unwrap();

    let err = registry.validate(&Model1::default()).unwrap_err();
    assert_eq!(
        err,
        ProfileError::NotRegistered {
            type_name: std::any::type_name::<Model1>()
        }
    );
}

#[test]
fn profile_configuration_errors_surface_on_registration() {
    let mut registry = ValidatorRegistry::new();
    let err = registry.add_profile_instance(BrokenProfile).unwrap_err();
    assert!(matches!(
        err,
        ProfileError::Configuration(ConfigError::InvalidSelector { .. })
    ));
    assert_eq!(registry.profile_count(), 0);
}
