//! tests/export_tests.rs
//! Projection, CSV output and the export run end to end

mod common;
use common::{alice, bob, csv_body, export_date, setup, TEST_KEY};

use serde_json::json;
use user_csv_exporter::export::{export_filename, to_csv_bytes};
use user_csv_exporter::{
    parse_field_spec, project, run_export_on, Cipher, ExportConfig, ExportError, ExportTable,
    MemoryUserSource, UserEntity,
};

#[test]
fn encrypted_metadata_is_decrypted_on_export() {
    setup();
    let config = ExportConfig::new("ID\nuser_login\n*secret_code", TEST_KEY);
    let users = MemoryUserSource::new(vec![alice()]);

    let file = run_export_on(&config, &users, export_date()).expect("export failed");

    assert_eq!(csv_body(&file.bytes), "ID,user_login,secret_code\n7,alice,42\n");
    assert_eq!(file.filename, "bf-users-export-2025-01-31.csv");
    assert_eq!(file.content_type(), "text/csv; charset=utf-8");
    assert_eq!(
        file.content_disposition(),
        "attachment; filename=bf-users-export-2025-01-31.csv"
    );
}

#[test]
fn no_users_is_reported() {
    let config = ExportConfig::new("ID", TEST_KEY);
    let result = run_export_on(&config, &MemoryUserSource::default(), export_date());
    let err = result.unwrap_err();
    assert!(matches!(err, ExportError::NoUsers));
    assert_eq!(err.code(), "no_users");
    assert!(err.is_user_error());
}

#[test]
fn blank_field_text_is_reported() {
    let config = ExportConfig::new("\n   \n\t\n", TEST_KEY);
    let users = MemoryUserSource::new(vec![alice()]);
    let err = run_export_on(&config, &users, export_date()).unwrap_err();
    assert!(matches!(err, ExportError::NoFields));
    assert_eq!(err.notice().code, "no_fields");
}

#[test]
fn structured_metadata_becomes_one_quoted_cell() {
    let config = ExportConfig::new("user_login\ntags\naddress", "");
    let users = MemoryUserSource::new(vec![bob()]);

    let file = run_export_on(&config, &users, export_date()).unwrap();

    assert_eq!(
        csv_body(&file.bytes),
        "user_login,tags,address\n\
         bob,\"[\"\"red\"\",\"\"blue\"\"]\",\"{\"\"city\"\":\"\"東京\"\",\"\"zip\"\":\"\"100-0001\"\"}\"\n"
    );
}

#[test]
fn rows_match_header_width() {
    let fields = parse_field_spec(
        "ID\n*secret_code\nmissing\nuser_registered\nage\nnickname\nID\n*user_login",
    );
    let users = vec![alice(), bob(), UserEntity::new(99)];
    let table = project(&users, &fields, &Cipher::new(TEST_KEY));

    assert_eq!(table.header.len(), fields.len());
    assert_eq!(table.rows.len(), users.len());
    for row in &table.rows {
        assert_eq!(row.len(), table.width());
    }
}

#[test]
fn every_schema_attribute_is_rendered() {
    let fields = parse_field_spec(
        "ID\nuser_login\nuser_email\nfirst_name\nlast_name\ndisplay_name\nuser_registered",
    );
    let table = project(&[bob()], &fields, &Cipher::new(""));
    assert_eq!(
        table.rows[0],
        vec![
            "8",
            "bob",
            "bob@example.com",
            "Bob",
            "Builder",
            "Bob B.",
            "2024-03-09 14:05:00"
        ]
    );
}

#[test]
fn missing_values_are_empty_cells() {
    let fields = parse_field_spec("ID\nfirst_name\nuser_registered\nno_such_meta\n*no_such_secret");
    let table = project(&[UserEntity::new(3)], &fields, &Cipher::new(TEST_KEY));
    assert_eq!(table.rows[0], vec!["3", "", "", "", ""]);
}

#[test]
fn schema_attributes_shadow_metadata_with_the_same_name() {
    let user = UserEntity::new(5)
        .with_login("real")
        .with_meta("user_login", "from-meta");
    let table = project(&[user], &parse_field_spec("user_login"), &Cipher::new(""));
    assert_eq!(table.rows[0], vec!["real"]);
}

#[test]
fn undecryptable_values_become_empty() {
    let user = UserEntity::new(1)
        .with_meta("pin", "1234 not encrypted")
        .with_meta("code", Cipher::new("another key").encrypt("42"));
    let fields = parse_field_spec("*pin\n*code\npin");
    let table = project(&[user], &fields, &Cipher::new(TEST_KEY));
    assert_eq!(table.rows[0], vec!["", "", "1234 not encrypted"]);
}

#[test]
fn encrypted_schema_attributes_are_decrypted_too() {
    let cipher = Cipher::new(TEST_KEY);
    let user = UserEntity::new(2).with_email(cipher.encrypt("hidden@example.com"));
    let table = project(&[user], &parse_field_spec("*user_email"), &cipher);
    assert_eq!(table.header, vec!["user_email"]);
    assert_eq!(table.rows[0], vec!["hidden@example.com"]);
}

#[test]
fn scalar_metadata_formats() {
    let user = UserEntity::new(4)
        .with_meta("age", 41i64)
        .with_meta("ratio", json!(0.5))
        .with_meta("active", json!(true))
        .with_meta("deleted", json!(false))
        .with_meta("nothing", json!(null));
    let fields = parse_field_spec("age\nratio\nactive\ndeleted\nnothing");
    let table = project(&[user], &fields, &Cipher::new(""));
    assert_eq!(table.rows[0], vec!["41", "0.5", "1", "", ""]);
}

#[test]
fn csv_quotes_only_when_needed() {
    let table = ExportTable {
        header: vec!["a".into(), "b".into(), "c".into(), "d".into()],
        rows: vec![vec![
            "plain text".into(),
            "with,comma".into(),
            "say \"hi\"".into(),
            "two\nlines".into(),
        ]],
    };
    let bytes = to_csv_bytes(&table).unwrap();
    assert_eq!(
        csv_body(&bytes),
        "a,b,c,d\nplain text,\"with,comma\",\"say \"\"hi\"\"\",\"two\nlines\"\n"
    );
}

#[test]
fn csv_starts_with_bom_and_keeps_utf8() {
    let table = ExportTable {
        header: vec!["name".into()],
        rows: vec![vec!["山田太郎".into()]],
    };
    let bytes = to_csv_bytes(&table).unwrap();
    assert_eq!(&bytes[..3], b"\xEF\xBB\xBF");
    assert_eq!(csv_body(&bytes), "name\n山田太郎\n");
}

#[test]
fn multiple_users_keep_source_order() {
    let config = ExportConfig::new("ID\nuser_login", "");
    let users = MemoryUserSource::new(vec![bob(), alice()]);
    let file = run_export_on(&config, &users, export_date()).unwrap();
    assert_eq!(csv_body(&file.bytes), "ID,user_login\n8,bob\n7,alice\n");
}

#[test]
fn filename_embeds_iso_date() {
    let date = chrono::NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
    assert_eq!(export_filename(date), "bf-users-export-2024-12-01.csv");
}

#[test]
fn single_empty_cell_is_a_bare_line() {
    let config = ExportConfig::new("first_name", "");
    let users = MemoryUserSource::new(vec![UserEntity::new(1), bob()]);
    let file = run_export_on(&config, &users, export_date()).unwrap();
    assert_eq!(csv_body(&file.bytes), "first_name\n\nBob\n");
}

#[test]
fn stored_value_with_trailing_newline_still_decrypts() {
    let user = UserEntity::new(7).with_meta("secret_code", "AjICWYEx5UunwyPTCzak8g==\n");
    let table = project(&[user], &parse_field_spec("*secret_code"), &Cipher::new(TEST_KEY));
    assert_eq!(table.rows[0], vec!["42"]);
}
