use std::process::{Command, Output};

use serde_json::Value;

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_solar-sizer"))
        .args(args)
        .output()
        .expect("solar-sizer process should run")
}

fn run_json(args: &[&str]) -> Value {
    let mut all = args.to_vec();
    all.push("--json");
    let output = run(&all);
    assert!(
        output.status.success(),
        "run failed for {args:?}: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn scenario_files_size_distinct_systems() {
    let lead = run_json(&["--config", "scenarios/lead_acid_home.toml"]);
    let lithium = run_json(&["--config", "scenarios/lithium_home.toml"]);
    let workshop = run_json(&["--config", "scenarios/three_phase_workshop.toml"]);

    assert_eq!(lead["battery"]["unit_count"], 8);
    assert_eq!(lead["inverter"]["kva_display"], 3.9);
    assert_eq!(lead["panels"]["panel_count"], 6);

    assert_eq!(lithium["battery"]["unit_count"], 4);
    assert_eq!(lithium["inverter"]["kva_display"], 10.0);

    assert_eq!(workshop["load"]["load_watts"], 6600.0);
    assert_eq!(workshop["battery"]["unit_count"], 9);
    assert_eq!(workshop["panels"]["panel_count"], 25);
}

#[test]
fn scenario_files_match_presets() {
    for name in ["lead_acid_home", "lithium_home", "three_phase_workshop"] {
        let from_file = run_json(&["--config", &format!("scenarios/{name}.toml")]);
        let from_preset = run_json(&["--preset", name]);
        assert_eq!(from_file, from_preset, "scenario file and preset {name} differ");
    }
}

#[test]
fn table_report_has_labels_and_summary() {
    let output = run(&[]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("stdout should be valid UTF-8");

    assert_eq!(parse_value(&stdout, "Inverter size (kVA)"), "3.9 kVA");
    assert_eq!(parse_value(&stdout, "Solar panels (550W)"), "6 panels");
    assert!(stdout.contains("Daily energy:          13.20 kWh"));
    assert!(stdout.contains("Required battery:      13.20 kWh"));
}

#[test]
fn flag_overrides_apply() {
    let json = run_json(&["--amperes", "5", "--phases", "3"]);
    assert_eq!(json["load"]["load_watts"], 3300.0);

    let json = run_json(&["--battery", "lithium", "--battery-kwh", "5"]);
    assert_eq!(json["battery"]["chemistry"], "lithium_48v");
    assert_eq!(json["battery"]["unit_count"], 2);
}

#[test]
fn invalid_input_exits_nonzero_with_field() {
    let output = run(&["--panel-width", "0"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("panel.width_m").count(), 1, "stderr: {stderr}");
}

#[test]
fn each_invalid_field_reported_once() {
    let output = run(&["--panel-width", "0", "--amperes", "0"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("panel.width_m").count(), 1, "stderr: {stderr}");
    assert_eq!(
        stderr.matches("load.ampere_per_phase").count(),
        1,
        "stderr: {stderr}"
    );
    assert!(stderr.contains("2 invalid inputs"), "stderr: {stderr}");
}

#[test]
fn tiny_battery_unit_is_rejected_not_wrapped() {
    for chemistry in ["lead-acid", "lithium"] {
        let output = run(&["--battery", chemistry, "--battery-kwh", "1e-10"]);
        assert!(!output.status.success(), "{chemistry} should fail");
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("battery.unit_kwh"), "stderr: {stderr}");
    }
}

#[test]
fn unknown_preset_is_reported() {
    let output = run(&["--preset", "bogus"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown preset"), "stderr: {stderr}");
}

#[test]
fn csv_out_writes_table() {
    let path = std::env::temp_dir().join(format!("solar-sizer-{}.csv", std::process::id()));
    let path_str = path.to_string_lossy().to_string();
    let output = run(&["--csv-out", &path_str]);
    assert!(output.status.success());

    let csv = std::fs::read_to_string(&path).expect("csv should be written");
    let _ = std::fs::remove_file(&path);
    assert!(csv.starts_with("item,value,notes"));
    assert_eq!(csv.lines().count(), 7);
}

#[test]
fn dump_config_round_trips() {
    let output = run(&["--preset", "three_phase_workshop", "--dump-config"]);
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).expect("stdout should be valid UTF-8");
    let cfg = solar_sizer::config::SizingConfig::from_toml_str(&text).expect("dump should parse");
    assert_eq!(cfg, solar_sizer::config::SizingConfig::three_phase_workshop());
}

/// Value column of the table row starting with `label`.
fn parse_value(stdout: &str, label: &str) -> String {
    let line = stdout
        .lines()
        .find(|line| line.starts_with(label))
        .unwrap_or_else(|| panic!("missing row `{label}` in output: {stdout}"));
    line[label.len()..]
        .trim_start()
        .split("  ")
        .next()
        .unwrap_or_else(|| panic!("invalid row format `{line}`"))
        .trim()
        .to_string()
}
