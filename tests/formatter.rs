//! Tests for record formatting: default templates, substitution rules, and
//! the JSON access path.

use chrono::{DateTime, TimeZone, Utc};
use logline::{AccessData, FormatterBuilder, Level, Payload, Record};

fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
}

fn sample_access() -> AccessData {
    AccessData {
        remote_ip: "1.2.3.4".to_string(),
        method: "GET".to_string(),
        url: "/x".to_string(),
        http_version: "1.1".to_string(),
        status: 200,
        length: 512,
        response_time: 3,
        referer: Some("http://ref".to_string()),
        agent: Some("curl/8".to_string()),
    }
}

#[test]
fn generic_default_template_without_name() {
    let formatter = FormatterBuilder::new().build().unwrap();
    let line = formatter.generic(noon(), Level::Info, "", "hello", &[]);
    assert_eq!(line, "2024-01-01T12:00:00 info: hello");
}

#[test]
fn generic_named_default_template_renders_every_field_once() {
    let formatter = FormatterBuilder::new().name("app").build().unwrap();
    let tags = vec!["a".to_string(), "b".to_string()];
    let line = formatter.generic(noon(), Level::Warn, "", "disk low", &tags);
    assert_eq!(line, "2024-01-01T12:00:00 app.warn[a,b]: disk low");
}

#[test]
fn generic_has_no_trailing_newline() {
    let formatter = FormatterBuilder::new().build().unwrap();
    let line = formatter.generic(noon(), Level::Info, "", "x", &[]);
    assert!(!line.ends_with('\n'));
}

#[test]
fn module_overrides_default_name() {
    let formatter = FormatterBuilder::new()
        .name("app")
        .format(":name :data")
        .build()
        .unwrap();
    let line = formatter.generic(noon(), Level::Info, "worker", "up", &[]);
    assert_eq!(line, "worker up");
}

#[test]
fn name_token_left_literal_without_any_name() {
    let formatter = FormatterBuilder::new()
        .format(":name :data")
        .build()
        .unwrap();
    let line = formatter.generic(noon(), Level::Info, "", "hello", &[]);
    assert_eq!(line, ":name hello");
}

#[test]
fn token_substituted_at_first_occurrence_only() {
    let formatter = FormatterBuilder::new()
        .timestamp_format("%H:%M")
        .format(":time :time")
        .build()
        .unwrap();
    let line = formatter.generic(noon(), Level::Info, "", "", &[]);
    assert_eq!(line, "12:00 :time");
}

#[test]
fn unrecognized_token_passes_through_verbatim() {
    let formatter = FormatterBuilder::new()
        .format(":level :bogus :data")
        .no_timestamp()
        .build()
        .unwrap();
    let line = formatter.generic(noon(), Level::Info, "", "hi", &[]);
    assert_eq!(line, "info :bogus hi");
}

#[test]
fn no_timestamp_removes_time_token_and_following_space() {
    let formatter = FormatterBuilder::new()
        .no_timestamp()
        .format(":time :level: :data")
        .build()
        .unwrap();
    let line = formatter.generic(noon(), Level::Info, "", "hello", &[]);
    assert_eq!(line, "info: hello");
}

#[test]
fn invalid_timestamp_pattern_fails_at_build_not_render() {
    let err = FormatterBuilder::new()
        .timestamp_format("%Q")
        .build()
        .unwrap_err();
    assert!(matches!(err, logline::Error::Format(_)));
}

#[test]
fn valid_timestamp_pattern_with_literal_percent_is_accepted() {
    let formatter = FormatterBuilder::new()
        .timestamp_format("%H:%M%%")
        .format(":time :data")
        .build()
        .unwrap();
    let line = formatter.generic(noon(), Level::Info, "", "x", &[]);
    assert_eq!(line, "12:00% x");
}

#[test]
fn empty_timestamp_pattern_behaves_as_disabled() {
    let formatter = FormatterBuilder::new()
        .timestamp_format("")
        .format(":time :level: :data")
        .build()
        .unwrap();
    let line = formatter.generic(noon(), Level::Info, "", "hello", &[]);
    assert_eq!(line, "info: hello");
}

#[test]
fn tags_render_bracket_joined_or_empty() {
    let formatter = FormatterBuilder::new()
        .no_timestamp()
        .format(":tags")
        .build()
        .unwrap();
    assert_eq!(formatter.generic(noon(), Level::Info, "", "", &[]), "");
    let tags = vec!["a".to_string(), "b".to_string()];
    assert_eq!(
        formatter.generic(noon(), Level::Info, "", "", &tags),
        "[a,b]"
    );
}

#[test]
fn access_default_template_full_record() {
    let formatter = FormatterBuilder::new().build().unwrap();
    let line = formatter.access(noon(), "", &sample_access(), &[]);
    assert_eq!(
        line,
        "1.2.3.4 - - [2024-01-01T12:00:00] \"GET /x HTTP/1.1\" 200 512 3 \"http://ref\" \"curl/8\"\n"
    );
}

#[test]
fn access_without_pattern_uses_rfc1123_time() {
    let formatter = FormatterBuilder::new()
        .no_timestamp()
        .access_format("[:time] :status")
        .build()
        .unwrap();
    let line = formatter.access(noon(), "", &sample_access(), &[]);
    assert_eq!(line, "[Mon, 01 Jan 2024 12:00:00 GMT] 200\n");
}

#[test]
fn access_absent_optional_fields_render_empty() {
    let formatter = FormatterBuilder::new()
        .access_format("\":referer\" \":agent\"")
        .build()
        .unwrap();
    let data = AccessData {
        referer: None,
        agent: None,
        ..sample_access()
    };
    let line = formatter.access(noon(), "", &data, &[]);
    assert_eq!(line, "\"\" \"\"\n");
}

#[test]
fn access_json_mapping_preserves_declaration_order_and_types() {
    let formatter = FormatterBuilder::new()
        .json(true)
        .access_fields([("status", ":status"), ("path", ":url")])
        .build()
        .unwrap();
    let line = formatter.access(noon(), "", &sample_access(), &[]);
    assert_eq!(line, "{\"status\":200,\"path\":\"/x\"}\n");
}

#[test]
fn access_json_absent_field_is_null() {
    let formatter = FormatterBuilder::new()
        .json(true)
        .access_fields([("ref", ":referer")])
        .build()
        .unwrap();
    let data = AccessData {
        referer: None,
        ..sample_access()
    };
    let line = formatter.access(noon(), "", &data, &[]);
    assert_eq!(line, "{\"ref\":null}\n");
}

#[test]
fn access_json_resolves_name_and_tags() {
    let formatter = FormatterBuilder::new()
        .json(true)
        .name("app")
        .access_fields([("who", ":name"), ("tags", ":tags")])
        .build()
        .unwrap();
    let tags = vec!["edge".to_string()];
    let line = formatter.access(noon(), "", &sample_access(), &tags);
    assert_eq!(line, "{\"who\":\"app\",\"tags\":\"[edge]\"}\n");
}

#[test]
fn access_json_empty_mapping_renders_an_empty_object_line() {
    let formatter = FormatterBuilder::new()
        .json(true)
        .access_fields(Vec::<(String, String)>::new())
        .build()
        .unwrap();
    let line = formatter.access(noon(), "", &sample_access(), &[]);
    assert_eq!(line, "{}\n");
}

#[test]
fn json_mode_without_mapping_fails_at_build() {
    let err = FormatterBuilder::new().json(true).build().unwrap_err();
    assert!(matches!(err, logline::Error::MissingAccessFields));
}

#[test]
fn json_mode_with_string_template_fails_at_build() {
    let err = FormatterBuilder::new()
        .json(true)
        .access_format(":remote :status")
        .build()
        .unwrap_err();
    assert!(matches!(err, logline::Error::MissingAccessFields));
}

#[test]
fn unknown_token_in_mapping_fails_at_build() {
    let err = FormatterBuilder::new()
        .json(true)
        .access_fields([("status", ":status"), ("oops", ":nope")])
        .build()
        .unwrap_err();
    match err {
        logline::Error::UnknownToken { key, token } => {
            assert_eq!(key, "oops");
            assert_eq!(token, ":nope");
        }
        other => panic!("expected UnknownToken, got {other:?}"),
    }
}

#[test]
fn exception_fixes_level_and_appends_newline() {
    let formatter = FormatterBuilder::new().build().unwrap();
    let line = formatter.exception(noon(), "", "boom", "at main", &[]);
    assert_eq!(line, "2024-01-01T12:00:00 exception: boom\n at main\n");
}

#[test]
fn exception_named_default_template_renders_tags() {
    let formatter = FormatterBuilder::new().name("app").build().unwrap();
    let tags = vec!["a".to_string(), "b".to_string()];
    let line = formatter.exception(noon(), "", "boom", "at main", &tags);
    assert_eq!(
        line,
        "2024-01-01T12:00:00 app.exception[a,b]: boom\n at main\n"
    );
}

#[test]
fn stat_fixes_level_and_substitutes_stat_fields() {
    let formatter = FormatterBuilder::new().name("app").build().unwrap();
    let line = formatter.stat(noon(), "", "requests", "counter", 17.0, &[]);
    assert_eq!(line, "2024-01-01T12:00:00 app.stat: requests(counter)17\n");
}

#[test]
fn render_dispatches_over_the_record_union() {
    let formatter = FormatterBuilder::new().build().unwrap();

    let generic = Record::generic(noon(), Level::Info, "", "hello", vec![]);
    assert_eq!(formatter.render(&generic), "2024-01-01T12:00:00 info: hello");

    let access = Record::access(noon(), "", sample_access(), vec![]);
    assert!(formatter.render(&access).ends_with('\n'));

    let exception = Record::exception(noon(), "", "boom", "stack", vec![]);
    assert!(formatter.render(&exception).contains("exception: boom"));

    let stat = Record::stat(noon(), "", "reqs", "counter", 1.0, vec![]);
    assert!(formatter.render(&stat).contains("reqs(counter)1"));
}

#[test]
fn record_constructors_fill_the_expected_variants() {
    let record = Record::stat(noon(), "db", "lat", "gauge", 2.5, vec!["t".to_string()]);
    assert_eq!(record.module, "db");
    assert!(matches!(record.payload, Payload::Stat { .. }));
}
