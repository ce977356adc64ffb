use tbodemy::presentation::Environment;

#[test]
fn given_production_alias_when_parsing_then_maps_to_prod() {
    assert_eq!(
        Environment::try_from("Production".to_string()),
        Ok(Environment::Prod)
    );
}

#[test]
fn given_unknown_name_when_parsing_then_fails() {
    assert!(Environment::try_from("staging".to_string()).is_err());
}

#[test]
fn given_environment_when_asking_file_suffix_then_lowercase_name() {
    assert_eq!(Environment::Local.file_suffix(), "local");
    assert_eq!(Environment::Prod.file_suffix(), "prod");
}
