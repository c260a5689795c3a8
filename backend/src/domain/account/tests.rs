//! Tests for account construction, derived fields, and JSON forms.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const RATER: &str = "6b0c7d2e-32b4-4c83-9d6f-1f9e0c5a7a11";

fn core(email: &str) -> AccountCore {
    AccountCore::new(
        RecordId::random(),
        Email::new(email).expect("fixture email is valid"),
        "$argon2id$hash",
    )
}

#[fixture]
fn user_profile() -> UserProfile {
    UserProfile {
        first_name: "Ada".to_owned(),
        last_name: "Lovelace".to_owned(),
        profile_image: Some("https://img.example.org/ada.png".to_owned()),
        date_of_birth: "1815-12-10".to_owned(),
        preferred_cities: vec!["London".to_owned()],
        interests: vec!["education".to_owned()],
        gender: Some(Gender::Female),
        followed_events: Vec::new(),
        followed_funds: Vec::new(),
        followed_users: Vec::new(),
        followed_organizations: Vec::new(),
    }
}

#[fixture]
fn organization_profile() -> OrganizationProfile {
    OrganizationProfile {
        name: "Green Streets".to_owned(),
        description: "Urban tree planting".to_owned(),
        cover_image: "https://img.example.org/cover.png".to_owned(),
        categories: vec!["environment".to_owned()],
        city: "Berlin".to_owned(),
        rates: Vec::new(),
        website_url: None,
    }
}

fn rating(value: u8) -> Rating {
    Rating {
        user_id: RecordId::new(RATER).expect("fixture id is valid"),
        rate: RateValue::new(value).expect("fixture rate is valid"),
    }
}

#[rstest]
fn full_name_joins_first_and_last(user_profile: UserProfile) {
    let user = UserAccount::new(core("ada@example.org"), user_profile).expect("valid user");
    assert_eq!(user.full_name(), "Ada Lovelace");
}

#[rstest]
#[case(Vec::new(), 0.0)]
#[case(vec![4, 2], 3.0)]
#[case(vec![4, 5], 4.5)]
#[case(vec![1, 2, 2], 5.0 / 3.0)]
#[case(vec![3], 3.0)]
fn rate_is_mean_or_zero(
    mut organization_profile: OrganizationProfile,
    #[case] values: Vec<u8>,
    #[case] expected: f64,
) {
    organization_profile.rates = values.into_iter().map(rating).collect();
    let organization =
        OrganizationAccount::new(core("org@example.org"), organization_profile).expect("valid org");
    assert!((organization.rate() - expected).abs() < f64::EPSILON);
}

#[rstest]
#[case(0)]
#[case(6)]
#[case(255)]
fn rate_values_outside_range_are_rejected(#[case] value: u8) {
    assert_eq!(
        RateValue::new(value),
        Err(AccountValidationError::RateOutOfRange { value })
    );
}

#[rstest]
#[case("ada@example.org", Some("ada@example.org"))]
#[case("  Ada@Example.ORG ", Some("ada@example.org"))]
#[case("", None)]
#[case("ada.example.org", None)]
#[case("@example.org", None)]
#[case("ada@", None)]
#[case("ada@ex@ample.org", None)]
#[case("a da@example.org", None)]
fn email_normalisation(#[case] input: &str, #[case] expected: Option<&str>) {
    let parsed = Email::new(input).ok();
    assert_eq!(parsed.as_ref().map(AsRef::as_ref), expected);
}

#[rstest]
fn blank_required_user_fields_are_rejected(mut user_profile: UserProfile) {
    user_profile.last_name = "  ".to_owned();
    let err = UserAccount::new(core("ada@example.org"), user_profile).expect_err("blank name");
    assert_eq!(err, AccountValidationError::BlankField { field: "lastName" });
}

#[rstest]
fn blank_password_hash_is_rejected(user_profile: UserProfile) {
    let mut account_core = core("ada@example.org");
    account_core.hashed_password = String::new();
    let err = UserAccount::new(account_core, user_profile).expect_err("blank hash");
    assert_eq!(
        err,
        AccountValidationError::BlankField {
            field: "hashedPassword"
        }
    );
}

#[rstest]
fn blank_organization_city_is_rejected(mut organization_profile: OrganizationProfile) {
    organization_profile.city = String::new();
    let err = OrganizationAccount::new(core("org@example.org"), organization_profile)
        .expect_err("blank city");
    assert_eq!(err, AccountValidationError::BlankField { field: "city" });
}

#[rstest]
fn vocabulary_check_names_offending_value(mut user_profile: UserProfile) {
    user_profile.preferred_cities.push("Atlantis".to_owned());
    let account = Account::User(
        UserAccount::new(core("ada@example.org"), user_profile).expect("valid user"),
    );
    let err = account
        .check_vocabulary(&Vocabulary::default())
        .expect_err("unknown city");
    assert_eq!(
        err,
        VocabularyError::UnknownCity {
            field: "preferredCities",
            value: "Atlantis".to_owned(),
        }
    );
}

#[rstest]
fn vocabulary_check_accepts_known_values(organization_profile: OrganizationProfile) {
    let account = Account::Organization(
        OrganizationAccount::new(core("org@example.org"), organization_profile)
            .expect("valid org"),
    );
    assert!(account.check_vocabulary(&Vocabulary::default()).is_ok());
}

#[rstest]
fn organization_city_is_free_text(mut organization_profile: OrganizationProfile) {
    organization_profile.city = "Tbilisi".to_owned();
    let account = Account::Organization(
        OrganizationAccount::new(core("org@example.org"), organization_profile)
            .expect("valid org"),
    );
    assert!(account.check_vocabulary(&Vocabulary::default()).is_ok());
}

#[rstest]
fn user_json_carries_kind_and_full_name_without_password(user_profile: UserProfile) {
    let account = Account::User(
        UserAccount::new(core("ada@example.org"), user_profile).expect("valid user"),
    );
    let value = serde_json::to_value(&account).expect("serialise account");

    assert_eq!(value["kind"], json!("User"));
    assert_eq!(value["fullName"], json!("Ada Lovelace"));
    assert_eq!(value["firstName"], json!("Ada"));
    assert_eq!(value["provider"], json!("email"));
    assert_eq!(value["isVerified"], json!(false));
    assert!(value.get("hashedPassword").is_none());
    assert!(value.get("rate").is_none());
}

#[rstest]
fn organization_json_carries_rate(mut organization_profile: OrganizationProfile) {
    organization_profile.rates = vec![rating(2), rating(4)];
    let account = Account::Organization(
        OrganizationAccount::new(core("org@example.org"), organization_profile)
            .expect("valid org"),
    );
    let value = serde_json::to_value(&account).expect("serialise account");

    assert_eq!(value["kind"], json!("Organization"));
    assert_eq!(value["rate"], json!(3.0));
    assert_eq!(value["rates"][0]["userId"], json!(RATER));
    assert!(value.get("fullName").is_none());
    assert!(value.get("hashedPassword").is_none());
}

#[rstest]
fn document_round_trip_preserves_variant(user_profile: UserProfile) {
    let account = Account::User(
        UserAccount::new(core("ada@example.org"), user_profile).expect("valid user"),
    );
    let document = AccountDocument::from(&account);
    let json = serde_json::to_value(&document).expect("serialise document");
    assert_eq!(json["kind"], json!("User"));
    assert_eq!(json["hashedPassword"], json!("$argon2id$hash"));

    let parsed: AccountDocument = serde_json::from_value(json).expect("parse document");
    let restored = Account::try_from(parsed).expect("valid account");
    assert_eq!(restored, account);
}

#[rstest]
fn document_defaults_optional_fields() {
    let document: AccountDocument = serde_json::from_value(json!({
        "id": RATER,
        "kind": "Organization",
        "email": "Hello@Shelter.org",
        "hashedPassword": "hash",
        "isVerified": true,
        "name": "Paws",
        "description": "Animal shelter",
        "coverImage": "cover.png",
        "city": "Madrid",
    }))
    .expect("parse document");
    let account = Account::try_from(document).expect("valid account");

    assert_eq!(account.kind(), AccountKind::Organization);
    assert_eq!(account.email().as_ref(), "hello@shelter.org");
    assert_eq!(account.core().provider, Provider::Email);
    assert!(account.core().followers.is_empty());
    assert!(account.as_user().is_none());
}

#[rstest]
fn document_rejects_out_of_range_rating() {
    let result: Result<AccountDocument, _> = serde_json::from_value(json!({
        "id": RATER,
        "kind": "Organization",
        "email": "org@example.org",
        "hashedPassword": "hash",
        "isVerified": true,
        "name": "Paws",
        "description": "Animal shelter",
        "coverImage": "cover.png",
        "city": "Madrid",
        "rates": [{ "userId": RATER, "rate": 7 }],
    }));
    assert!(result.is_err());
}

#[rstest]
#[case("User", Some(AccountKind::User))]
#[case("Organization", Some(AccountKind::Organization))]
#[case("BaseUser", None)]
fn kind_parses_stored_tags(#[case] raw: &str, #[case] expected: Option<AccountKind>) {
    assert_eq!(raw.parse::<AccountKind>().ok(), expected);
}
