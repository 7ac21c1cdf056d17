//! End-to-end tests for `wardrive build` driven through TestWorld.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use wardrive_testing::{CaptureBuilder, CaptureRow, TestWorld, assertions};

fn drive() -> CaptureBuilder {
    CaptureBuilder::wigle().rows([
        CaptureRow::wifi("c0:a3:6e:00:00:01", -70, 51.5001, -0.1201)
            .ssid("Net1")
            .at("2024-06-01 10:00:00"),
        CaptureRow::wifi("c0:a3:6e:00:00:01", -40, 51.5002, -0.1202)
            .ssid("Net2")
            .at("2024-06-01 10:05:00"),
        CaptureRow::wifi("02:aa:bb:cc:dd:ee", -60, 51.5003, -0.1203)
            .ssid("")
            .at("2024-06-01 10:10:00"),
        CaptureRow::wifi("44:55:66:77:88:99", -80, 51.5004, -0.1204)
            .kind("BLE")
            .at("2024-06-01 10:11:00"),
    ])
}

#[test]
fn test_build_writes_geojson() {
    let world = TestWorld::new()
        .with_oui(&[("C0A36E", "SKY UK LIMITED"), ("02AABB", "Acme")])
        .with_capture("2024-06-01_wardriving.csv", &drive());

    let mut cmd = cargo_bin_cmd!("wardrive");
    world
        .configure_command(&mut cmd)
        .arg("build")
        .arg("--no-jitter");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Files processed:  1/1"))
        .stdout(predicate::str::contains("Skipped (Bluetooth): 1"))
        .stdout(predicate::str::contains("2024-06-01: 2 APs, 10min"));

    let doc = world.read_output().unwrap();
    assert_eq!(doc["type"], "FeatureCollection");
    assertions::assert_layer_count(&doc, "access_points", 2).unwrap();
    assertions::assert_layer_count(&doc, "route", 1).unwrap();
    assertions::assert_points_before_lines(&doc).unwrap();
    assertions::assert_totals(&doc, 2, 1).unwrap();

    let merged = assertions::access_point(&doc, "c0:a3:6e:00:00:01").unwrap();
    assert_eq!(merged["best_rssi"], -40);
    assert_eq!(merged["SSID"], "Net2");
    assert_eq!(merged["count"], 2);
    assert_eq!(merged["Vendor"], "SKY UK LIMITED");
    assert_eq!(merged["AuthMode"], "WPA2-PSK-CCMPESS");
    assert_eq!(merged["first_seen"], "Jun 01, 2024 10:00");
    assert_eq!(merged["sessions"], "2024-06-01");

    let randomized = assertions::access_point(&doc, "02:aa:bb:cc:dd:ee").unwrap();
    assert_eq!(randomized["Vendor"], "Randomized");
    assert_eq!(randomized["SSID"], "(Hidden)");

    let route = assertions::route_coordinates(&doc, "2024-06-01").unwrap();
    assert_eq!(
        route,
        vec![[-0.1201, 51.5001], [-0.1202, 51.5002], [-0.1203, 51.5003]]
    );

    let session = &doc["metadata"]["sessions"][0];
    assert_eq!(session["name"], "2024-06-01");
    assert_eq!(session["date"], "2024-06-01");
    assert_eq!(session["ap_count"], 2);
    assert_eq!(session["duration_minutes"], 10);
}

#[test]
fn test_default_command_is_build() {
    let world = TestWorld::new().with_capture("drive.csv", &drive());

    let mut cmd = cargo_bin_cmd!("wardrive");
    world.configure_command(&mut cmd);
    cmd.assert().success();

    assert!(world.output_path().exists());
}

#[test]
fn test_headerless_file_is_skipped_and_run_continues() {
    let world = TestWorld::new()
        .with_capture("a_wardriving.csv", &drive())
        .with_file("b_wardriving.csv", "this is not,a capture\n1,2\n");

    let mut cmd = cargo_bin_cmd!("wardrive");
    world
        .configure_command(&mut cmd)
        .args(["build", "--format", "json"]);
    let output = cmd.output().unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["files_found"], 2);
    assert_eq!(summary["files_processed"], 1);
    assert_eq!(summary["rows_read"], 4);
    assert_eq!(summary["skipped_bluetooth"], 1);
    assert_eq!(summary["unique_aps"], 2);
    assert_eq!(summary["sessions"].as_array().unwrap().len(), 1);
    assert_eq!(summary["top_vendors"][0]["vendor"], "Unknown");
    assert_eq!(summary["top_vendors"][0]["count"], 2);
}

#[test]
fn test_missing_data_dir_fails_without_output() {
    let world = TestWorld::new();
    let missing = world.temp_dir().join("missing");

    let mut cmd = cargo_bin_cmd!("wardrive");
    cmd.arg("--data-dir").arg(&missing).arg("build").arg("--offline");
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: Data directory not found"));

    assert!(!missing.join("wardrive.geojson").exists());
}

#[test]
fn test_empty_data_dir_fails_without_output() {
    let world = TestWorld::new();

    let mut cmd = cargo_bin_cmd!("wardrive");
    world.configure_command(&mut cmd).arg("build");
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No CSV capture files found"));

    assert!(!world.output_path().exists());
}

#[test]
fn test_output_flag_and_seeded_jitter() {
    let world = TestWorld::new().with_capture("drive.csv", &drive());
    let first = world.temp_dir().join("out/first.geojson");
    let second = world.temp_dir().join("out/second.geojson");

    for path in [&first, &second] {
        let mut cmd = cargo_bin_cmd!("wardrive");
        world
            .configure_command(&mut cmd)
            .arg("build")
            .arg("--seed")
            .arg("42")
            .arg("--output")
            .arg(path);
        cmd.assert().success();
    }

    let a = world.read_json(&first).unwrap();
    let b = world.read_json(&second).unwrap();
    assert_eq!(a["features"], b["features"]);
    assert!(!world.output_path().exists());

    let point = &a["features"][0]["geometry"]["coordinates"];
    let lon = point[0].as_f64().unwrap();
    let lat = point[1].as_f64().unwrap();
    assert!((lon - -0.1202).abs() <= 0.0002 + 1e-12);
    assert!((lat - 51.5002).abs() <= 0.0002 + 1e-12);
}

#[test]
fn test_data_dir_from_environment() {
    let world = TestWorld::new().with_capture("drive.csv", &drive());

    let mut cmd = cargo_bin_cmd!("wardrive");
    cmd.current_dir(world.temp_dir())
        .env("WARDRIVE_DATA", world.data_dir())
        .arg("build");
    cmd.assert().success();

    assert!(world.output_path().exists());
}
