//! Focused unit tests covering score configuration and the scoring pipeline.

use super::helpers::{
    COFFEE_ID, OFFICES_JSON, POBLENOU, SCHOOL_ID, StubSourceBuilder, score_args, score_config,
    workspace, write_utf8,
};
use super::*;
use camino::Utf8Path;
use crate::score::{
    CategorySpec, ScoreArgs, ScoreConfig, config_from_layers_for_test, load_offices,
    run_score_with, score_offices,
};
use officescout_core::source::DEFAULT_FALLBACK_ORIGIN;
use officescout_core::table::{Cell, TableError};
use officescout_core::{GeoSourceError, Radius};
use officescout_data::test_support::{StubGeocoder, StubVenueSource};
use officescout_scorer::WeightSpecError;
use rstest::rstest;
use serde_json::Value;

#[rstest]
#[case("coffee=4bf58dd8d48988d1e0931735:10", "coffee", "4bf58dd8d48988d1e0931735", 10.0)]
#[case(" schools = 4bf58dd8d48988d13b941735 : 4.5 ", "schools", "4bf58dd8d48988d13b941735", 4.5)]
#[case("gym=ns:gym:2", "gym", "ns:gym", 2.0)]
fn category_specs_parse(
    #[case] spec: &str,
    #[case] label: &str,
    #[case] category_id: &str,
    #[case] weight: f64,
) {
    let parsed: CategorySpec = spec.parse().expect("well-formed category");
    assert_eq!(parsed.label, label);
    assert_eq!(parsed.category_id, category_id);
    assert_eq!(parsed.weight, weight);
}

#[rstest]
#[case("coffee")]
#[case("coffee=4bf58dd8d48988d1e0931735")]
#[case("=4bf58dd8d48988d1e0931735:10")]
#[case("coffee=:10")]
#[case("coffee=4bf58dd8d48988d1e0931735:ten")]
fn malformed_category_specs_are_rejected(#[case] spec: &str) {
    let err = spec
        .parse::<CategorySpec>()
        .expect_err("malformed category should fail");
    match err {
        CliError::InvalidCategory { spec: reported, .. } => assert_eq!(reported, spec),
        other => panic!("expected InvalidCategory, found {other:?}"),
    }
}

#[rstest]
#[case(ARG_SCORE_OFFICES, ENV_SCORE_OFFICES)]
#[case(ARG_SCORE_ADDRESS, ENV_SCORE_ADDRESS)]
#[case(ARG_SCORE_CATEGORY, ENV_SCORE_CATEGORIES)]
#[case(ARG_SCORE_CLIENT_ID, ENV_SCORE_CLIENT_ID)]
#[case(ARG_SCORE_CLIENT_SECRET, ENV_SCORE_CLIENT_SECRET)]
fn converting_without_required_fields_errors(
    #[case] field: &'static str,
    #[case] env_var: &'static str,
) {
    let mut args = score_args(Utf8Path::new("offices.json"));
    match field {
        ARG_SCORE_OFFICES => args.offices = None,
        ARG_SCORE_ADDRESS => args.address = None,
        ARG_SCORE_CATEGORY => args.categories = Some(Vec::new()),
        ARG_SCORE_CLIENT_ID => args.foursquare_client_id = None,
        _ => args.foursquare_client_secret = None,
    }
    let err = ScoreConfig::try_from(args).expect_err("missing field should error");
    match err {
        CliError::MissingArgument {
            field: missing,
            env,
        } => {
            assert_eq!(missing, field);
            assert_eq!(env, env_var);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn conversion_applies_defaults() {
    let config = score_config(Utf8Path::new("offices.json"));
    assert_eq!(config.radius, Radius::DEFAULT);
    assert_eq!(config.geocoder.base_url, "https://geocode.xyz");
    assert_eq!(config.foursquare.base_url, "https://api.foursquare.com");
    assert_eq!(config.foursquare.client_id, "client-id");
    assert_eq!(
        config.weights.columns().collect::<Vec<_>>(),
        ["coffee", "schools"]
    );
}

#[rstest]
fn conversion_honours_overrides() {
    let args = ScoreArgs {
        radius_km: Some(0.5),
        geocode_url: Some("http://localhost:9000".to_owned()),
        foursquare_url: Some("http://localhost:9001".to_owned()),
        ..score_args(Utf8Path::new("offices.json"))
    };
    let config = ScoreConfig::try_from(args).expect("overrides should convert");
    assert_eq!(config.radius.km(), 0.5);
    assert_eq!(config.geocoder.base_url, "http://localhost:9000");
    assert_eq!(config.foursquare.base_url, "http://localhost:9001");
}

#[rstest]
fn non_positive_radius_is_rejected() {
    let args = ScoreArgs {
        radius_km: Some(0.0),
        ..score_args(Utf8Path::new("offices.json"))
    };
    let err = ScoreConfig::try_from(args).expect_err("zero radius should fail");
    assert!(matches!(err, CliError::Radius(_)), "unexpected {err:?}");
}

#[rstest]
#[case(vec!["coffee=a:10".to_owned(), "coffee=b:4".to_owned()])]
#[case(vec!["coffee=a:-1".to_owned()])]
fn invalid_weights_are_rejected(#[case] categories: Vec<String>) {
    let args = ScoreArgs {
        categories: Some(categories),
        ..score_args(Utf8Path::new("offices.json"))
    };
    let err = ScoreConfig::try_from(args).expect_err("weights should be rejected");
    match err {
        CliError::Weights(
            WeightSpecError::DuplicateColumn { .. } | WeightSpecError::Negative { .. },
        ) => {}
        other => panic!("expected Weights, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_reports_missing_offices() {
    let (_tmp, root) = workspace();
    let config = score_config(&root.join("absent.json"));
    let err = config
        .validate_sources()
        .expect_err("missing offices file should fail validation");
    match err {
        CliError::MissingSourceFile { field, path } => {
            assert_eq!(field, ARG_SCORE_OFFICES);
            assert_eq!(path, root.join("absent.json"));
        }
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_rejects_directories() {
    let (_tmp, root) = workspace();
    let offices = root.join("offices");
    std::fs::create_dir(&offices).expect("create dir");
    let err = score_config(&offices)
        .validate_sources()
        .expect_err("directory path should fail validation");
    match err {
        CliError::SourcePathNotFile { field, path } => {
            assert_eq!(field, ARG_SCORE_OFFICES);
            assert_eq!(path, offices);
        }
        other => panic!("expected SourcePathNotFile, found {other:?}"),
    }
}

#[rstest]
fn load_offices_decodes_records() {
    let (_tmp, root) = workspace();
    let path = root.join("offices.json");
    write_utf8(&path, OFFICES_JSON.as_bytes());

    let offices = load_offices(&path).expect("offices should decode");
    let labels: Vec<String> = offices.iter().map(officescout_core::Office::label).collect();
    assert_eq!(labels, ["Poblenou 1", "Gracia 2"]);
    assert_eq!(offices.first().map(|office| office.location), Some(POBLENOU));
}

#[rstest]
fn load_offices_reports_open_and_parse_failures() {
    let (_tmp, root) = workspace();
    let path = root.join("offices.json");

    let err = load_offices(&path).expect_err("missing file should error");
    assert!(matches!(err, CliError::OpenOffices { .. }), "unexpected {err:?}");

    write_utf8(&path, b"{ not valid json");
    let parse_err = load_offices(&path).expect_err("invalid json should error");
    match parse_err {
        CliError::ParseOffices { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected ParseOffices, found {other:?}"),
    }
}

#[rstest]
fn load_offices_rejects_empty_arrays() {
    let (_tmp, root) = workspace();
    let path = root.join("offices.json");
    write_utf8(&path, b"[]");
    let err = load_offices(&path).expect_err("no offices should error");
    assert!(matches!(err, CliError::NoOffices { .. }), "unexpected {err:?}");
}

#[rstest]
fn load_offices_names_the_malformed_record() {
    let (_tmp, root) = workspace();
    let path = root.join("offices.json");
    write_utf8(
        &path,
        br#"[
            { "_id": "1", "name": "Poblenou", "geojson": { "coordinates": [2.19, 41.40] } },
            { "_id": "2", "geojson": { "coordinates": [2.156, 41.403] } }
        ]"#,
    );
    let err = load_offices(&path).expect_err("nameless office should error");
    match err {
        CliError::InvalidOffice { index, source, .. } => {
            assert_eq!(index, 1);
            assert_eq!(source.field, "name");
        }
        other => panic!("expected InvalidOffice, found {other:?}"),
    }
}

#[rstest]
fn score_offices_counts_and_scores_each_category() {
    let (_tmp, root) = workspace();
    let path = root.join("offices.json");
    write_utf8(&path, OFFICES_JSON.as_bytes());
    let config = score_config(&path);
    let offices = load_offices(&path).expect("offices should decode");
    let builder = StubSourceBuilder::barcelona();

    let table = score_offices(
        &config,
        &offices,
        &builder.geocoder,
        &builder.venues,
    )
    .expect("scoring should succeed");

    assert_eq!(
        table.column_names().collect::<Vec<_>>(),
        ["office", "coffee", "schools", "coffee_points", "schools_points"]
    );
    assert_eq!(table.cell("coffee", 0), Some(&Cell::Integer(2)));
    assert_eq!(table.cell("coffee", 1), Some(&Cell::Integer(0)));
    assert_eq!(table.cell("schools", 1), Some(&Cell::Integer(1)));
    assert_eq!(table.cell("coffee_points", 0), Some(&Cell::Float(10.0)));
    assert_eq!(table.cell("schools_points", 0), Some(&Cell::Float(0.0)));
    assert_eq!(table.cell("schools_points", 1), Some(&Cell::Float(2.8)));

    let queries = builder.queries();
    let categories: Vec<&str> = queries.iter().map(|query| query.category.as_str()).collect();
    assert_eq!(categories, [COFFEE_ID, SCHOOL_ID]);
    assert!(queries.iter().all(|query| query.origin == POBLENOU));
}

#[rstest]
fn rejected_address_searches_around_fallback() {
    let (_tmp, root) = workspace();
    let path = root.join("offices.json");
    write_utf8(&path, OFFICES_JSON.as_bytes());
    let config = score_config(&path);
    let offices = load_offices(&path).expect("offices should decode");
    let builder = StubSourceBuilder::new(
        StubGeocoder::rejected("Your request did not produce any results."),
        StubVenueSource::new(),
    );

    let table = score_offices(&config, &offices, &builder.geocoder, &builder.venues)
        .expect("fallback keeps scoring alive");
    assert_eq!(table.cell("coffee_points", 0), Some(&Cell::Float(0.0)));
    assert!(
        builder
            .queries()
            .iter()
            .all(|query| query.origin == DEFAULT_FALLBACK_ORIGIN)
    );
}

#[rstest]
fn geocoder_failures_are_not_masked() {
    let (_tmp, root) = workspace();
    let path = root.join("offices.json");
    write_utf8(&path, OFFICES_JSON.as_bytes());
    let config = score_config(&path);
    let offices = load_offices(&path).expect("offices should decode");
    let builder = StubSourceBuilder::new(
        StubGeocoder::with_error(GeoSourceError::Timeout {
            url: "https://geocode.xyz/Barcelona".into(),
            timeout_secs: 30,
        }),
        StubVenueSource::new(),
    );

    let err = score_offices(&config, &offices, &builder.geocoder, &builder.venues)
        .expect_err("timeouts propagate");
    match err {
        CliError::Geocode { address, source } => {
            assert_eq!(address, config.address);
            assert!(matches!(source, GeoSourceError::Timeout { .. }));
        }
        other => panic!("expected Geocode, found {other:?}"),
    }
    assert!(builder.queries().is_empty());
}

#[rstest]
fn venue_failures_name_the_category() {
    let (_tmp, root) = workspace();
    let path = root.join("offices.json");
    write_utf8(&path, OFFICES_JSON.as_bytes());
    let config = score_config(&path);
    let offices = load_offices(&path).expect("offices should decode");
    let builder = StubSourceBuilder::new(
        StubGeocoder::found(POBLENOU),
        StubVenueSource::with_error(GeoSourceError::Service {
            code: "400".into(),
            message: "Must provide a valid categoryId.".into(),
        }),
    );

    let err = score_offices(&config, &offices, &builder.geocoder, &builder.venues)
        .expect_err("service errors propagate");
    match err {
        CliError::FetchVenues { label, .. } => assert_eq!(label, "coffee"),
        other => panic!("expected FetchVenues, found {other:?}"),
    }
}

#[rstest]
fn label_clashing_with_office_column_is_rejected() {
    let (_tmp, root) = workspace();
    let path = root.join("offices.json");
    write_utf8(&path, OFFICES_JSON.as_bytes());
    let args = ScoreArgs {
        categories: Some(vec![format!("office={COFFEE_ID}:10")]),
        ..score_args(&path)
    };
    let config = ScoreConfig::try_from(args).expect("arguments should convert");
    let offices = load_offices(&path).expect("offices should decode");
    let builder = StubSourceBuilder::barcelona();

    let err = score_offices(&config, &offices, &builder.geocoder, &builder.venues)
        .expect_err("label clashes with the office column");
    match err {
        CliError::Table(TableError::DuplicateColumn { column }) => assert_eq!(column, "office"),
        other => panic!("expected Table, found {other:?}"),
    }
}

#[rstest]
fn run_score_with_prints_scored_records() {
    let (_tmp, root) = workspace();
    let path = root.join("offices.json");
    write_utf8(&path, OFFICES_JSON.as_bytes());
    let builder = StubSourceBuilder::barcelona();
    let mut stdout = Vec::new();

    run_score_with(score_args(&path), &builder, &mut stdout).expect("score should succeed");

    let output = String::from_utf8(stdout).expect("stdout utf-8");
    assert!(output.ends_with('\n'));
    let records: Vec<Value> = serde_json::from_str(&output).expect("output should be JSON");
    let offices: Vec<&str> = records
        .iter()
        .filter_map(|record| record.get("office").and_then(Value::as_str))
        .collect();
    assert_eq!(offices, ["Poblenou 1", "Gracia 2"]);
    let coffee_points = records
        .first()
        .and_then(|record| record.get("coffee_points"))
        .and_then(Value::as_f64);
    assert_eq!(coffee_points, Some(10.0));
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "radius_km": "wide" }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "offices": "from-file.json",
            "address": "Carrer de Pallars 99, Barcelona",
            "categories": [format!("coffee={COFFEE_ID}:10")],
            "foursquare_client_id": "file-id",
            "foursquare_client_secret": "file-secret",
            "radius_km": 2.0,
        }),
        None,
    );
    composer.push_environment(json!({
        "foursquare_client_secret": "env-secret",
        "radius_km": 1.5,
    }));
    composer.push_cli(json!({
        "offices": "from-cli.json",
        "radius_km": 0.5,
    }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.offices.as_str(), "from-cli.json");
    assert_eq!(config.address, "Carrer de Pallars 99, Barcelona");
    assert_eq!(config.foursquare.client_id, "file-id");
    assert_eq!(config.foursquare.client_secret, "env-secret");
    assert_eq!(config.radius.km(), 0.5);
    assert_eq!(config.weights.weight("coffee"), Some(10.0));
}
