//! Integration tests for keymap-core.
//!
//! These tests load a realistic table through the public API and verify that
//! the web mapping and the firmware dispatch are two views of the same
//! record set.

use keymap_core::{
    parse_table, DispatchOptions, FirmwareDispatch, KeyTable, LoadError, WebMapping,
};

/// A slice of the real table: letters, digits, modifiers and an alias.
const TABLE: &str = "\
# code  firmware_symbol      web_key_name
1       KEY_A                KeyA
2       KEY_B                KeyB
3       KEY_C                KeyC
27      KEY_1                Digit1
36      KEY_0                Digit0
37      KEY_ENTER            Enter
38      KEY_ESC              Escape

# modifiers
77      KEY_LEFT_CTRL        ControlLeft
78      KEY_LEFT_SHIFT       ShiftLeft
79      KEY_LEFT_ALT         AltLeft
80      KEY_LEFT_GUI         MetaLeft

# numpad enter shares the firmware constant
104     KEY_ENTER            NumpadEnter
";

fn load() -> KeyTable {
    parse_table(TABLE).expect("fixture table must load")
}

#[test]
fn test_every_entry_appears_in_both_projections() {
    // Arrange
    let table = load();

    // Act
    let web = WebMapping::project(&table);
    let firmware = FirmwareDispatch::project(&table, DispatchOptions::default());

    // Assert
    assert_eq!(web.len(), table.len());
    assert_eq!(firmware.branches().len(), table.len());
    for entry in table.entries() {
        assert_eq!(
            web.get(&entry.web_key_name),
            Some(entry.code),
            "web mapping must contain {}",
            entry.web_key_name
        );
        assert_eq!(
            firmware.resolve(entry.code),
            entry.firmware_symbol,
            "dispatch must map code {}",
            entry.code
        );
    }
}

#[test]
fn test_web_then_firmware_lookup_recovers_the_symbol() {
    let table = load();
    let web = WebMapping::project(&table);
    let firmware = FirmwareDispatch::project(&table, DispatchOptions::default());

    for (name, code) in web.iter() {
        let entry = table.by_web_name(name).expect("name comes from the table");
        assert_eq!(firmware.resolve(code), entry.firmware_symbol);
    }
}

#[test]
fn test_rendered_dispatch_lists_cases_in_ascending_code_order() {
    let firmware = FirmwareDispatch::project(&load(), DispatchOptions::default());
    let text = firmware.to_string();

    let codes: Vec<u32> = text
        .lines()
        .filter_map(|line| line.trim().strip_prefix("case "))
        .filter_map(|rest| rest.split(':').next())
        .map(|code| code.parse().expect("case label is numeric"))
        .collect();

    let mut sorted = codes.clone();
    sorted.sort_unstable();
    assert_eq!(codes, sorted);
    assert_eq!(codes.len(), 12);
    assert!(text.trim_end().ends_with("default: return 0;\n\t}\n}"));
}

#[test]
fn test_rendered_web_mapping_keys_are_ascending() {
    let json = WebMapping::project(&load()).to_json().expect("serialize");

    let keys: Vec<&str> = json
        .lines()
        .filter_map(|line| line.trim().strip_prefix('"'))
        .filter_map(|rest| rest.split('"').next())
        .collect();

    let mut sorted = keys.clone();
    sorted.sort_unstable();
    assert_eq!(keys, sorted);
    assert_eq!(keys.first(), Some(&"AltLeft"));
}

#[test]
fn test_projections_are_deterministic() {
    let first_web = WebMapping::project(&load()).to_json().expect("serialize");
    let second_web = WebMapping::project(&load()).to_json().expect("serialize");
    assert_eq!(first_web, second_web);

    let first_fw = FirmwareDispatch::project(&load(), DispatchOptions::default()).to_string();
    let second_fw = FirmwareDispatch::project(&load(), DispatchOptions::default()).to_string();
    assert_eq!(first_fw, second_fw);
}

#[test]
fn test_example_scenario_from_two_rows() {
    // Arrange
    let table = parse_table("# comment\n10 KEY_A a\n11 KEY_B b\n").expect("valid");

    // Act
    let json = WebMapping::project(&table).to_json().expect("serialize");
    let source = FirmwareDispatch::project(&table, DispatchOptions::default()).to_string();

    // Assert
    assert_eq!(json, "{\n  \"a\": 10,\n  \"b\": 11\n}\n");
    let case_a = source.find("case 10: return KEY_A;").expect("case 10");
    let case_b = source.find("case 11: return KEY_B;").expect("case 11");
    let default = source.find("default: return 0;").expect("default");
    assert!(case_a < case_b && case_b < default);
}

#[test]
fn test_appending_a_duplicate_row_breaks_the_load() {
    let broken = format!("{TABLE}105 KEY_A KeyA2\n106 KEY_Z KeyA\n");
    let err = parse_table(&broken).unwrap_err();
    assert!(matches!(
        err,
        LoadError::DuplicateWebName { ref name, first_line: 2, .. } if name == "KeyA"
    ));
}

#[test]
fn test_repository_key_table_loads_and_projects() {
    let text = include_str!("../../../keymap.in");

    let table = parse_table(text).expect("the checked-in keymap.in must be valid");
    let web = WebMapping::project(&table);
    let firmware = FirmwareDispatch::project(&table, DispatchOptions::default());

    assert_eq!(web.get("KeyA"), Some(1));
    assert_eq!(firmware.resolve(1), "KEY_A");
    assert_eq!(web.len(), firmware.branches().len());
}
