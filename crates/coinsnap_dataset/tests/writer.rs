use chrono::NaiveDate;
use coinsnap_dataset::{COLUMNS, Row, SnapshotName, to_datetime, write_csv, write_snapshot};

fn name(date: NaiveDate) -> SnapshotName<'static> {
    SnapshotName {
        prefix: "Cryptocurrencies_to",
        to_symbol: "USD",
        exchange: "default",
        interval: "day",
        date,
    }
}

fn row(time: i64, close: f64) -> Row {
    Row {
        datetime: to_datetime(time).unwrap(),
        low: 1.5,
        high: 2.0,
        open: 1.75,
        close,
        volumefrom: 10.0,
        volumeto: 20.5,
        cryptocurrency: "BTC".to_string(),
        image_url: "https://www.cryptocompare.com/media/37746251/btc.png".to_string(),
        coin_name: "Bitcoin".to_string(),
    }
}

#[test]
fn filename_is_deterministic() {
    let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

    assert_eq!(
        name(date).filename(),
        "Cryptocurrencies_to_USD_default_day_2024-01-15.csv"
    );
    assert_eq!(name(date).filename(), name(date).filename());
}

#[test]
fn writes_fixed_columns_in_order() {
    let mut out = Vec::new();
    write_csv(&mut out, &[row(0, 1.8), row(3600, 1.9)]).unwrap();

    let text = String::from_utf8(out).unwrap();
    let lines = text.lines().collect::<Vec<_>>();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], COLUMNS.join(","));
    assert_eq!(
        lines[0],
        "datetime,low,high,open,close,volumefrom,volumeto,cryptocurrency,image_url,coin_name"
    );
    assert_eq!(
        lines[1],
        "1970-01-01 00:00:00,1.5,2.0,1.75,1.8,10.0,20.5,BTC,https://www.cryptocompare.com/media/37746251/btc.png,Bitcoin"
    );
    assert!(lines[2].starts_with("1970-01-01 01:00:00,"));
}

#[test]
fn empty_table_still_has_header() {
    let mut out = Vec::new();
    write_csv(&mut out, &[]).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), format!("{}\n", COLUMNS.join(",")));
}

#[test]
fn snapshot_overwrites_previous_file() {
    let dir = tempfile::tempdir().unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    let out_dir = dir.path().join("snapshots");

    write_snapshot(&out_dir, &name(date), &[row(0, 1.0), row(60, 2.0)]).unwrap();
    let path = write_snapshot(&out_dir, &name(date), &[row(0, 3.0)]).unwrap();

    assert_eq!(
        path,
        out_dir.join("Cryptocurrencies_to_USD_default_day_2024-01-15.csv")
    );

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let records = reader.records().collect::<Result<Vec<_>, _>>().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(&records[0][4], "3.0");
    assert_eq!(&records[0][9], "Bitcoin");
}
