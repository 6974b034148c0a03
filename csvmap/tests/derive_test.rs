//! Derived records, write & read through `CsvExecutor`

use csvmap::chrono::{Duration, NaiveDate, NaiveDateTime};
use csvmap::rust_decimal::Decimal;
use csvmap::{CsvConfig, CsvExecutor, CsvRecord, CsvSource, TypeSchema, ValueType};

#[derive(CsvRecord, Default, Debug, Clone, PartialEq)]
struct User {
    row_number: usize,

    #[csv(index = 0, name = "identifier")]
    id: Option<Decimal>,

    #[csv(index = 2, name = "forename")]
    first_name: Option<String>,

    #[csv(index = 1, name = "surname")]
    last_name: Option<String>,

    #[csv(index = 3)]
    title: Option<String>,

    #[csv(index = 4)]
    birth_date: Option<NaiveDateTime>,

    #[csv(index = 5, name = "status")]
    work_status: Option<char>,

    not_mapped: i32,
}

#[derive(CsvRecord, Default, Debug, PartialEq)]
struct Line {
    #[csv(row_number)]
    line: u32,

    #[csv(index = 1)]
    code: u16,

    #[csv(index = 0)]
    label: String,
}

#[derive(CsvRecord, Default, Debug, PartialEq)]
struct Event {
    row_number: usize,

    #[csv(index = 0)]
    name: String,

    #[csv(index = 1)]
    at: Option<NaiveDateTime>,
}

#[derive(CsvRecord, Default, Debug, PartialEq)]
struct ShortLine {
    #[csv(row_number)]
    line: u8,

    #[csv(index = 0)]
    label: String,
}

const DATE_TIME_FORMAT: &str = "%Y%m%d %H:%M:%S";

fn prepare_users(count: usize) -> Vec<User> {
    let base = NaiveDate::from_ymd_opt(1970, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    (0..count)
        .map(|i| {
            let row_number = i + 2;
            User {
                row_number,
                id: Some(Decimal::from(100 + row_number as i64)),
                first_name: Some(format!("first-{}", i)),
                last_name: Some(format!("last-{}", i)),
                title: if i % 2 == 0 { Some("Dr".to_owned()) } else { None },
                // whole seconds only, the format drops anything finer
                birth_date: if i % 3 == 0 {
                    None
                } else {
                    Some(base + Duration::seconds(i as i64 * 86_399_937))
                },
                work_status: Some((b'A' + i as u8) as char),
                not_mapped: 0,
            }
        })
        .collect()
}

#[test]
fn schema_from_derive() {
    let schema = TypeSchema::build::<User>().unwrap();

    assert_eq!(User::type_name(), "User");
    assert_eq!(
        schema.column_names(),
        vec![
            "identifier",
            "surname",
            "forename",
            "title",
            "birth_date",
            "status"
        ]
    );

    let birth_date = schema.get("birth_date").unwrap();
    assert_eq!(birth_date.value_type, ValueType::DateTime);
    assert!(birth_date.nullable);
    assert!(schema.get("not_mapped").is_none());
}

#[test]
fn write_read_round_trip() {
    let users = prepare_users(10);

    let config = CsvConfig::new()
        .with_delimiter('\t')
        .has_header(true)
        .with_date_time_format(Some(DATE_TIME_FORMAT));
    let executor = CsvExecutor::<User>::new_with_config(config).unwrap();

    let doc = executor.write(&users).unwrap();
    let res = executor.read_str(&doc).unwrap();

    assert_eq!(res.errors, Vec::<String>::new());
    assert_eq!(res.records.len(), users.len());
    assert_eq!(res.records, users);
}

#[test]
fn round_trip_without_header() {
    let users = prepare_users(4)
        .into_iter()
        .enumerate()
        .map(|(i, u)| User {
            row_number: i + 1,
            ..u
        })
        .collect::<Vec<_>>();

    let executor =
        CsvExecutor::<User>::new_with_config(CsvConfig::new().has_header(false)).unwrap();

    let doc = executor.write(&users).unwrap();
    assert!(doc.starts_with("102,last-0,first-0,Dr,,A\n"));
    assert_eq!(doc.lines().count(), 4);

    let res = executor.read_str(&doc).unwrap();
    assert!(!res.has_errors());
    assert_eq!(res.records, users);
}

#[test]
fn date_time_format() {
    let executor = CsvExecutor::<User>::new_with_config(
        CsvConfig::new().with_date_time_format(Some(DATE_TIME_FORMAT)),
    )
    .unwrap();
    let birth = NaiveDate::from_ymd_opt(2024, 3, 5)
        .unwrap()
        .and_hms_milli_opt(8, 15, 30, 999)
        .unwrap();
    let user = User {
        birth_date: Some(birth),
        ..Default::default()
    };

    let doc = executor.write([&user]).unwrap();
    assert_eq!(
        doc.lines().nth(1),
        Some(",,,,20240305 08:15:30,")
    );

    let res = executor.read_str(&doc).unwrap();
    assert_eq!(
        res.records[0].birth_date,
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(8, 15, 30)
    );
}

#[test]
fn date_only_format_round_trip() {
    let executor = CsvExecutor::<Event>::new_with_config(
        CsvConfig::new().with_date_time_format(Some("%Y%m%d")),
    )
    .unwrap();
    let events = vec![
        Event {
            row_number: 2,
            name: "a".to_owned(),
            at: NaiveDate::from_ymd_opt(2024, 3, 5)
                .unwrap()
                .and_hms_opt(0, 0, 0),
        },
        Event {
            row_number: 3,
            name: "b".to_owned(),
            at: None,
        },
    ];

    let doc = executor.write(&events).unwrap();
    assert_eq!(doc, "name,at\na,20240305\nb,\n");

    let res = executor.read_str(&doc).unwrap();
    assert!(res.errors.is_empty());
    assert_eq!(res.records, events);
}

#[test]
fn narrow_row_number_saturates() {
    let executor =
        CsvExecutor::<ShortLine>::new_with_config(CsvConfig::new().has_header(false)).unwrap();
    let doc = (1..=300).map(|i| format!("l{}\n", i)).collect::<String>();

    let res = executor.read_str(&doc).unwrap();

    assert_eq!(res.records.len(), 300);
    assert_eq!(res.records[254].line, 255);
    assert_eq!(res.records[299].line, u8::MAX);
    assert_eq!(res.records[299].label, "l300");
    assert_eq!(res.records[299].row_number(), 255);
}

#[test]
fn rejecting_header_validator() {
    let executor = CsvExecutor::<Line>::new_with_config(
        CsvConfig::new()
            .with_delimiter('\t')
            .with_header_validator(|cells| cells.first() == Some(&"name")),
    )
    .unwrap();

    let res = executor.read_str("label\tcode\nalpha\t1\n").unwrap();

    // the header is still never decoded as data
    assert_eq!(
        res.errors,
        vec!["Line 1 - incorrect file header starting with: label.".to_owned()]
    );
    assert_eq!(
        res.records,
        vec![Line {
            line: 2,
            code: 1,
            label: "alpha".to_owned(),
        }]
    );
}

#[test]
fn optional_fields_stay_absent() {
    let executor = CsvExecutor::<User>::new().unwrap();

    let res = executor
        .read_str("identifier,surname,forename,title,birth_date,status\n7,,,,,\n")
        .unwrap();

    assert!(res.errors.is_empty());
    assert_eq!(
        res.records,
        vec![User {
            row_number: 2,
            id: Some(Decimal::from(7)),
            ..Default::default()
        }]
    );

    // and re-encode as empty cells
    let doc = executor.write(&res.records).unwrap();
    assert_eq!(doc.lines().nth(1), Some("7,,,,,"));
}

#[test]
fn tab_delimited_scenario() {
    let executor = CsvExecutor::<Line>::new_with_config(
        CsvConfig::new()
            .with_delimiter('\t')
            .with_header_validator(|cells| cells.len() == 2),
    )
    .unwrap();

    let res = executor.read_str("name\tcode\nalpha\t1\nbeta\t\n").unwrap();

    assert!(res.errors.is_empty());
    assert_eq!(
        res.records,
        vec![
            Line {
                line: 2,
                code: 1,
                label: "alpha".to_owned(),
            },
            Line {
                line: 3,
                code: 0,
                label: "beta".to_owned(),
            },
        ]
    );
}

#[test]
fn read_mock_file() {
    let executor = CsvExecutor::<User>::new_with_config(
        CsvConfig::new()
            .with_delimiter(';')
            .with_date_time_format(Some(DATE_TIME_FORMAT)),
    )
    .unwrap();

    let res = executor
        .read_source(CsvSource::Path("../mock/users.csv".into()))
        .unwrap();

    assert_eq!(
        res.errors,
        vec![
            "Line 4 - insufficient number of elements ('2') - required '6'.".to_owned(),
            "Line 5 - the format of field birth_date is invalid.".to_owned(),
        ]
    );
    assert_eq!(res.records.len(), 3);

    let jane = &res.records[0];
    assert_eq!(jane.row_number, 2);
    assert_eq!(jane.first_name.as_deref(), Some("Jane"));
    assert_eq!(
        jane.birth_date,
        NaiveDate::from_ymd_opt(1980, 1, 1)
            .unwrap()
            .and_hms_opt(7, 30, 0)
    );
    assert_eq!(jane.work_status, Some('A'));

    assert_eq!(res.records[1].first_name, None);

    // kept, without the unparsable field
    let max = &res.records[2];
    assert_eq!(max.row_number, 5);
    assert_eq!(max.title.as_deref(), Some("Mr"));
    assert_eq!(max.birth_date, None);
}
