use clap::Parser;
use ss12000_client::FilterValue;

use super::*;

#[test]
fn parses_resources_without_argument() {
    let cli = Cli::try_parse_from(["ss12000-cli", "resources"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Resources { resource: None }));
}

#[test]
fn resource_accepts_path_or_kebab_name() {
    for name in ["studyplans", "study-plans", "/StudyPlans"] {
        let cli = Cli::try_parse_from(["ss12000-cli", "resources", name]).unwrap();
        assert!(
            matches!(
                cli.command,
                Commands::Resources {
                    resource: Some(Resource::StudyPlans)
                }
            ),
            "{name}"
        );
    }
}

#[test]
fn unknown_resource_is_a_parse_error() {
    let result = Cli::try_parse_from(["ss12000-cli", "list", "teachers"]);
    assert!(result.is_err());
}

#[test]
fn parses_list_with_filters_and_paging() {
    let cli = Cli::try_parse_from([
        "ss12000-cli",
        "list",
        "persons",
        "-f",
        "name_contains=Anna",
        "--filter",
        "relationship_entity_type=enrolment",
        "--limit",
        "10",
        "--page-token",
        "abc==",
    ])
    .unwrap();

    match cli.command {
        Commands::List {
            resource,
            filters,
            limit,
            page_token,
        } => {
            assert_eq!(resource, Resource::Persons);
            assert_eq!(filters.len(), 2);
            assert_eq!(filters[0], ("name_contains".to_owned(), "Anna".to_owned()));
            assert_eq!(limit, Some(10));
            assert_eq!(page_token.as_deref(), Some("abc=="));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn filter_without_equals_is_rejected() {
    let result = Cli::try_parse_from(["ss12000-cli", "list", "persons", "-f", "name_contains"]);
    assert!(result.is_err());
}

#[test]
fn parse_key_value_keeps_equals_in_value() {
    assert_eq!(
        parse_key_value("page_token=a=b"),
        Ok(("page_token".to_owned(), "a=b".to_owned()))
    );
    assert!(parse_key_value("=x").is_err());
}

#[test]
fn repeated_filter_names_become_lists() {
    let pairs = vec![
        ("school_types".to_owned(), "GR".to_owned()),
        ("parent".to_owned(), "org-1".to_owned()),
        ("school_types".to_owned(), "GY".to_owned()),
    ];
    let filters = build_filters(&pairs);

    assert_eq!(
        filters.get("school_types"),
        Some(&FilterValue::List(vec!["GR".to_owned(), "GY".to_owned()]))
    );
    assert_eq!(
        filters.get("parent"),
        Some(&FilterValue::Text("org-1".to_owned()))
    );
}

#[test]
fn parses_lookup_with_keys_and_expand() {
    let cli = Cli::try_parse_from([
        "ss12000-cli",
        "lookup",
        "persons",
        "--id",
        "p1",
        "--key",
        "civic_nos=191212121212",
        "--expand",
        "duties",
        "--expand-reference-names",
    ])
    .unwrap();

    assert!(matches!(
        cli.command,
        Commands::Lookup {
            resource: Resource::Persons,
            ref ids,
            ref keys,
            ref expand,
            expand_reference_names: true,
        } if ids == &["p1"] && keys.len() == 1 && expand == &["duties"]
    ));
}

#[test]
fn deleted_entities_requires_an_entity() {
    assert!(Cli::try_parse_from(["ss12000-cli", "deleted-entities"]).is_err());

    let cli = Cli::try_parse_from([
        "ss12000-cli",
        "deleted-entities",
        "--entity",
        "Person",
        "--since",
        "2024-06-01T00:00:00Z",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Commands::DeletedEntities { ref entities, since: Some(_) } if entities == &["Person"]
    ));
}

#[test]
fn parses_subscription_create() {
    let cli = Cli::try_parse_from([
        "ss12000-cli",
        "subscriptions",
        "create",
        "--name",
        "sync",
        "--target",
        "https://hooks.example.se/ss12000-webhook",
        "--resource-type",
        "Person",
        "--resource-type",
        "Activity",
    ])
    .unwrap();

    assert!(matches!(
        cli.command,
        Commands::Subscriptions {
            command: SubscriptionCommands::Create { ref resource_types, .. }
        } if resource_types.len() == 2
    ));
}

#[test]
fn renew_requires_valid_timestamp() {
    let result = Cli::try_parse_from([
        "ss12000-cli",
        "subscriptions",
        "renew",
        "sub-1",
        "--expires",
        "next week",
    ]);
    assert!(result.is_err());
}

#[test]
fn no_content_renders_marker() {
    assert_eq!(
        output::render_body(&ResponseBody::NoContent).unwrap(),
        "no content"
    );
}

#[test]
fn describe_marks_required_and_repeatable_filters() {
    let text = output::describe_resource(Resource::DeletedEntities);
    assert!(text.contains("entities"));
    assert!(text.contains("[repeatable] [required]"));
    assert!(text.contains("meta.modified.after"));
    assert!(!text.contains("lookup keys"));
}

#[test]
fn capabilities_reflect_descriptor_table() {
    assert_eq!(
        output::capabilities(Resource::Attendances),
        vec!["list", "lookup", "get", "delete", "expand"]
    );
    assert_eq!(output::capabilities(Resource::Log), vec!["list"]);
}
