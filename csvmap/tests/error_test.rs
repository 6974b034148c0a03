//! Misconfigured records and malformed input

use csvmap::rust_decimal::Decimal;
use csvmap::{CsvError, CsvExecutor, CsvRecord, CsvSource};

#[derive(CsvRecord, Default, Debug)]
struct NoAttributes {
    row_number: usize,
    first: String,
    second: i32,
}

#[derive(CsvRecord, Default, Debug)]
struct DuplicatedIndex {
    row_number: usize,

    #[csv(index = 0)]
    first: String,

    #[csv(index = 0)]
    second: String,

    #[csv(index = 1)]
    third: String,
}

#[derive(CsvRecord, Default, Debug, PartialEq)]
struct Counter {
    row_number: usize,

    #[csv(index = 0, name = "name")]
    name: String,

    #[csv(index = 1, name = "count")]
    count: u8,
}

#[derive(CsvRecord, Default, Debug, PartialEq)]
struct Amount {
    row_number: usize,

    #[csv(index = 0, name = "v")]
    v: Option<Decimal>,
}

#[test]
fn missing_field_mapping() {
    let err = CsvExecutor::<NoAttributes>::new().unwrap_err();

    assert!(matches!(err, CsvError::Configuration(_)));
    assert!(err
        .to_string()
        .starts_with("Missing 'field-mapping' configuration in"));
}

#[test]
fn duplicated_indexes() {
    let err = CsvExecutor::<DuplicatedIndex>::new().unwrap_err();

    assert_eq!(
        err.to_string(),
        "Duplicated index/es '0' in 'DuplicatedIndex' type."
    );
}

#[test]
fn malformed_rows_do_not_abort() -> anyhow::Result<()> {
    let executor = CsvExecutor::<Counter>::new()?;

    let doc = "name,count\na,1\nb\nc,3\nd,999\ne,x\n";
    let res = executor.read_source(CsvSource::Text(doc))?;

    assert_eq!(
        res.errors,
        vec![
            "Line 3 - insufficient number of elements ('1') - required '2'.",
            "Line 5 - value '999' was either too large or too small for U8.",
            "Line 6 - the format of field count is invalid.",
        ]
    );
    assert_eq!(
        res.records,
        vec![
            Counter {
                row_number: 2,
                name: "a".to_owned(),
                count: 1,
            },
            Counter {
                row_number: 4,
                name: "c".to_owned(),
                count: 3,
            },
            Counter {
                row_number: 6,
                name: "e".to_owned(),
                count: 0,
            },
        ]
    );

    Ok(())
}

#[test]
fn empty_input_is_an_argument_error() {
    let executor = CsvExecutor::<Counter>::new().unwrap();

    let err = executor.read_str("").unwrap_err();
    assert!(err.is_fatal());
    assert_eq!(err.to_string(), "invalid argument: csv content is empty");

    let err = executor.read(&b""[..]).unwrap_err();
    assert!(matches!(err, CsvError::InvalidArgument(_)));

    // whitespace only: same answer for text and stream
    assert!(matches!(
        executor.read_str("\n"),
        Err(CsvError::InvalidArgument(_))
    ));
    assert!(matches!(
        executor.read(&b"\n"[..]),
        Err(CsvError::InvalidArgument(_))
    ));
}

#[test]
fn decimal_overflow_rejects_the_line() -> anyhow::Result<()> {
    let executor = CsvExecutor::<Amount>::new()?;

    let res = executor.read_str("v\n99999999999999999999999999999999999\n1.5\n")?;

    assert_eq!(
        res.errors,
        vec![
            "Line 2 - value '99999999999999999999999999999999999' was either too large or too small for Decimal."
        ]
    );
    assert_eq!(
        res.records,
        vec![Amount {
            row_number: 3,
            v: Some(Decimal::new(15, 1)),
        }]
    );

    Ok(())
}

#[test]
fn missing_file_is_fatal() {
    let executor = CsvExecutor::<Counter>::new().unwrap();

    let err = executor
        .read_source(CsvSource::Path("../mock/does_not_exist.csv".into()))
        .unwrap_err();
    assert!(matches!(err, CsvError::IO(_)));
}

#[test]
fn header_only_document() {
    let executor = CsvExecutor::<Counter>::new().unwrap();

    let res = executor.read_str("name,count\n").unwrap();
    assert!(res.records.is_empty());
    assert!(res.errors.is_empty());
}
