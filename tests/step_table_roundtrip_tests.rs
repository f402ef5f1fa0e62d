use rhombus_plotter::table::PEN_LIFT_SENTINEL;
use rhombus_plotter::{app, decode, encode, StepCommand, StepTable, TableFormat};

fn sample_commands() -> Vec<StepCommand> {
    vec![
        StepCommand::actuate(986, -986),
        StepCommand::actuate(-1450, 1210),
        StepCommand::PenLift,
        StepCommand::actuate(0, 0),
        StepCommand::actuate(i16::MIN as i32, 32766),
        StepCommand::PenLift,
        StepCommand::actuate(12, -7),
    ]
}

#[test]
fn test_encode_layout() {
    let table = encode(&sample_commands()).unwrap();

    assert_eq!(table.row_count, 7);
    assert_eq!(table.rows[0], [986, -986]);
    assert_eq!(table.rows[2], PEN_LIFT_SENTINEL);
    assert_eq!(table.rows[4], [i16::MIN, 32766]);
    assert_eq!(table.pen_lift_count(), 2);
}

#[test]
fn test_every_format_roundtrips() {
    let commands = sample_commands();
    let table = encode(&commands).unwrap();

    for format in [TableFormat::Text, TableFormat::Binary, TableFormat::Json] {
        let bytes = format.render(&table).unwrap();
        let parsed = format.parse(&bytes).unwrap();
        assert_eq!(parsed, table, "Format {format:?}");
        assert_eq!(decode(&parsed).unwrap(), commands, "Format {format:?}");
    }
}

#[test]
fn test_text_format_is_c_header() {
    let table = encode(&[StepCommand::actuate(986, -986), StepCommand::PenLift]).unwrap();
    let text = String::from_utf8(TableFormat::Text.render(&table).unwrap()).unwrap();

    assert!(text.contains("const uint32_t STEP_TABLE_ROWS = 2;"));
    assert!(text.contains("const int16_t STEP_TABLE[2][2] = {"));
    assert!(text.contains("    {986, -986},"));
    assert!(text.contains("    {32767, 32767},"));
    assert!(text.trim_end().ends_with("};"));
}

#[test]
fn test_empty_table_roundtrips() {
    let table = encode(&[]).unwrap();
    assert!(table.is_empty());

    for format in [TableFormat::Text, TableFormat::Binary, TableFormat::Json] {
        let bytes = format.render(&table).unwrap();
        let parsed = format.parse(&bytes).unwrap();
        assert!(decode(&parsed).unwrap().is_empty());
    }
}

#[test]
fn test_encode_rejects_out_of_range_steps() {
    let err = encode(&[StepCommand::PenLift, StepCommand::actuate(40_000, 0)])
        .expect_err("40000 passt nicht in i16");
    assert!(format!("{err:#}").contains("Befehl 1"));

    let err = encode(&[StepCommand::actuate(32767, 32767)]).expect_err("Sentinel-Kollision");
    assert!(format!("{err:#}").contains("Befehl 0"));
}

#[test]
fn test_decode_rejects_header_mismatch() {
    let table = StepTable {
        row_count: 3,
        rows: vec![[1, 2], PEN_LIFT_SENTINEL],
    };
    assert!(decode(&table).is_err());
}

#[test]
fn test_truncated_binary_is_rejected() {
    let table = encode(&sample_commands()).unwrap();
    let bytes = TableFormat::Binary.render(&table).unwrap();
    assert!(TableFormat::Binary.parse(&bytes[..bytes.len() - 2]).is_err());
}

#[test]
fn test_table_file_roundtrip() {
    let dir = std::env::temp_dir().join("test_rhombus_step_table_files");
    std::fs::create_dir_all(&dir).unwrap();
    let commands = sample_commands();
    let table = encode(&commands).unwrap();

    for (format, name) in [
        (TableFormat::Text, "table.h"),
        (TableFormat::Binary, "table.bin"),
        (TableFormat::Json, "table.json"),
    ] {
        let file = dir.join(name);
        app::write_table_file(&table, format, &file).unwrap();
        assert_eq!(app::read_table_file(&file, format).unwrap(), commands);
    }

    let _ = std::fs::remove_dir_all(&dir);
}
