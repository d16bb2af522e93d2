use graphdash_rs::DashError;
use graphdash_rs::core::graph_def::GraphDef;
use graphdash_rs::core::ident::{Ident, Selector};
use graphdash_rs::core::series::{SeriesData, series_list_from_json_str};

const CPU_DEF_JSON: &str = r##"{
  "title": "CPU usage",
  "vertical_label": "Jiffies",
  "defs": [
    {
      "select": {
        "host": "/any/",
        "plugin": "cpu",
        "plugin_instance": "0",
        "type": "cpu",
        "type_instance": "idle"
      },
      "ds_name": "value",
      "legend": "Idle",
      "color": "#00e000",
      "stack": true,
      "area": true
    },
    {
      "select": { "plugin": "cpu", "type": "cpu", "type_instance": "user" }
    }
  ]
}"##;

#[test]
fn server_definitions_parse_with_defaults() {
    let def = GraphDef::from_json_str(CPU_DEF_JSON).expect("parse");

    assert_eq!(def.title.as_deref(), Some("CPU usage"));
    assert_eq!(def.vertical_label.as_deref(), Some("Jiffies"));
    assert_eq!(def.defs.len(), 2);

    let first = &def.defs[0];
    assert_eq!(first.select.host.as_deref(), Some("/any/"));
    assert_eq!(first.select.type_.as_deref(), Some("cpu"));
    assert_eq!(first.ds_name.as_deref(), Some("value"));
    assert_eq!(first.legend.as_deref(), Some("Idle"));
    assert!(first.stack);
    assert!(first.area);

    let second = &def.defs[1];
    assert_eq!(second.select.host, None);
    assert_eq!(second.legend, None);
    assert!(!second.stack);
    assert!(!second.area);
    assert_eq!(second.fixed_color(), None);
}

#[test]
fn random_color_is_not_a_fixed_color() {
    let def = GraphDef::from_json_str(
        r#"{"defs":[{"select":{"plugin":"load"},"color":"random"}]}"#,
    )
    .expect("parse");
    assert_eq!(def.defs[0].color.as_deref(), Some("random"));
    assert_eq!(def.defs[0].fixed_color(), None);
}

#[test]
fn unknown_selector_fields_are_rejected() {
    let err = GraphDef::from_json_str(
        r#"{"defs":[{"select":{"plugin":"cpu","graph":"nope"}}]}"#,
    )
    .expect_err("unknown field");
    assert!(matches!(err, DashError::InvalidData(_)));
    assert!(err.to_string().contains("graph definition"));
}

#[test]
fn selector_serialization_skips_absent_fields() {
    let selector = Selector::new().with_host("alpha").with_type("cpu");
    let json = serde_json::to_string(&selector).expect("serialize");
    assert_eq!(json, r#"{"host":"alpha","type":"cpu"}"#);
}

#[test]
fn identifiers_require_all_five_fields() {
    let complete = r#"{
      "host": "alpha",
      "plugin": "cpu",
      "plugin_instance": "0",
      "type": "cpu",
      "type_instance": "idle"
    }"#;
    let ident: Ident = serde_json::from_str(complete).expect("parse");
    assert_eq!(ident.type_, "cpu");

    let missing = r#"{"host":"alpha","plugin":"cpu","plugin_instance":"0","type":"cpu"}"#;
    assert!(serde_json::from_str::<Ident>(missing).is_err());

    let unknown = r#"{
      "host": "alpha",
      "plugin": "cpu",
      "plugin_instance": "0",
      "type": "cpu",
      "type_instance": "idle",
      "interval": 10
    }"#;
    assert!(serde_json::from_str::<Ident>(unknown).is_err());
}

#[test]
fn series_data_parses_with_null_gaps() {
    let json = r#"[{
      "data_source": "value",
      "file": {
        "host": "alpha",
        "plugin": "cpu",
        "plugin_instance": "0",
        "type": "cpu",
        "type_instance": "idle"
      },
      "interval": 10,
      "first_value_time": 1700000000,
      "data": [1.5, null, 3.0]
    }]"#;

    let list = series_list_from_json_str(json).expect("parse");
    assert_eq!(list.len(), 1);

    let series = &list[0];
    assert_eq!(series.data_source, "value");
    assert_eq!(series.interval, 10.0);
    assert_eq!(series.first_value_time, 1_700_000_000.0);
    assert_eq!(series.data, vec![Some(1.5), None, Some(3.0)]);
    assert_eq!(series.sample_count(), 3);
    assert_eq!(series.gap_count(), 1);
}

#[test]
fn empty_and_null_data_payloads_mean_no_series() {
    assert!(series_list_from_json_str("").expect("empty").is_empty());
    assert!(series_list_from_json_str("  \n").expect("blank").is_empty());
    assert!(series_list_from_json_str("null").expect("null").is_empty());
    assert!(series_list_from_json_str("[]").expect("array").is_empty());
}

#[test]
fn malformed_data_payloads_error_out() {
    let err = series_list_from_json_str("{not json").expect_err("parse");
    assert!(matches!(err, DashError::InvalidData(_)));
}

#[test]
fn definitions_round_trip_through_json() {
    let def = GraphDef::from_json_str(CPU_DEF_JSON).expect("parse");
    let json = serde_json::to_string(&def).expect("serialize");
    let back = GraphDef::from_json_str(&json).expect("reparse");
    assert_eq!(back, def);
}

#[test]
fn series_data_round_trips_through_json() {
    let series = SeriesData::new(
        "value",
        Ident::new("alpha", "cpu", "0", "cpu", "idle"),
        10.0,
        1_700_000_000.0,
        vec![Some(1.0), None],
    );
    let json = serde_json::to_string(&series).expect("serialize");
    assert!(json.contains("\"type\":\"cpu\""));
    let back: SeriesData = serde_json::from_str(&json).expect("parse");
    assert_eq!(back, series);
}
