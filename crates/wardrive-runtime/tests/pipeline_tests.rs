use chrono::NaiveDate;
use wardrive_core::VendorTable;
use wardrive_engine::{FeatureProperties, Layer};
use wardrive_runtime::{
    Config, Error, NullReporter, Pipeline, RecordingReporter, RunEvent, RunOutcome,
};
use wardrive_testing::{CaptureBuilder, CaptureRow, TestWorld};

fn offline_config() -> Config {
    let mut config = Config::default();
    config.oui.offline = true;
    config.jitter_degrees = 0.0;
    config
}

fn run(world: &TestWorld) -> RunOutcome {
    Pipeline::new(world.data_dir(), offline_config())
        .run(&mut NullReporter)
        .expect("run should succeed")
}

#[test]
fn test_missing_data_dir_is_fatal() {
    let world = TestWorld::new();
    let missing = world.temp_dir().join("nope");

    let err = Pipeline::new(&missing, offline_config())
        .run(&mut NullReporter)
        .unwrap_err();
    assert!(matches!(err, Error::InputDirMissing(path) if path == missing));
}

#[test]
fn test_no_capture_files_is_fatal() {
    let world = TestWorld::new()
        .with_file("notes.txt", "not a capture")
        .with_oui(&[("C0A36E", "SKY UK LIMITED")]);

    let err = Pipeline::new(world.data_dir(), offline_config())
        .run(&mut NullReporter)
        .unwrap_err();
    assert!(matches!(err, Error::NoInputFiles(_)));
}

#[test]
fn test_bluetooth_rows_only_count_as_skipped() {
    let world = TestWorld::new().with_capture(
        "drive.csv",
        &CaptureBuilder::wigle()
            .row(CaptureRow::wifi("aa:bb:cc:00:00:01", -60, 51.5, -0.1).at("2024-06-01 10:00:00"))
            .row(
                CaptureRow::wifi("aa:bb:cc:00:00:02", -60, 51.6, -0.2)
                    .at("2024-06-01 10:01:00")
                    .kind("BLE"),
            ),
    );

    let outcome = run(&world);
    assert_eq!(outcome.stats.rows_read, 2);
    assert_eq!(outcome.stats.rejected.bluetooth(), 1);
    assert_eq!(outcome.document.access_point_count(), 1);
    assert_eq!(outcome.document.route_count(), 0);
}

#[test]
fn test_file_without_header_is_skipped() {
    let world = TestWorld::new()
        .with_capture(
            "a_wardriving.csv",
            &CaptureBuilder::wigle()
                .row(CaptureRow::wifi("aa:bb:cc:00:00:01", -60, 51.5, -0.1)),
        )
        .with_file("b_wardriving.csv", "just,some\nnumbers,here\n");

    let mut reporter = RecordingReporter::default();
    let outcome = Pipeline::new(world.data_dir(), offline_config())
        .run(&mut reporter)
        .unwrap();

    assert_eq!(outcome.stats.files_found, 2);
    assert_eq!(outcome.stats.files_processed, 1);
    assert_eq!(outcome.sessions.len(), 1);
    assert_eq!(outcome.sessions[0].name.as_str(), "a");
    assert!(reporter.events.contains(&RunEvent::HeaderMissing {
        file_name: "b_wardriving.csv".to_string()
    }));
    assert!(reporter.events.contains(&RunEvent::HeaderFound {
        file_name: "a_wardriving.csv".to_string(),
        line: 2
    }));
}

#[test]
fn test_sample_capture_counts() {
    let world = TestWorld::new().with_oui(&[("C0A36E", "SKY UK LIMITED")]);
    world
        .copy_sample("2024-06-01_wardriving.csv", "2024-06-01_wardriving.csv")
        .unwrap();

    let outcome = run(&world);
    let stats = &outcome.stats;
    assert_eq!(stats.files_processed, 1);
    assert_eq!(stats.rows_read, 7);
    assert_eq!(stats.rejected.bluetooth(), 1);
    assert_eq!(stats.rejected.invalid(), 2);
    assert_eq!(outcome.document.access_point_count(), 4);
    assert_eq!(outcome.document.route_count(), 1);

    let session = &outcome.sessions[0];
    assert_eq!(session.name.as_str(), "2024-06-01");
    assert_eq!(session.address_count, 4);
    assert_eq!(session.duration_minutes(), 0);

    let vendors: Vec<&str> = outcome
        .top_vendors
        .iter()
        .map(|share| share.vendor.as_str())
        .collect();
    assert_eq!(vendors, vec!["Unknown", "SKY UK LIMITED", "Randomized"]);
}

#[test]
fn test_randomized_address_beats_vendor_table() {
    let world = TestWorld::new().with_capture(
        "drive.csv",
        &CaptureBuilder::wigle().row(CaptureRow::wifi("02:AA:BB:CC:DD:EE", -50, 51.5, -0.1)),
    );

    let outcome = Pipeline::new(world.data_dir(), offline_config())
        .with_vendors(VendorTable::from_entries([("02AABB", "Acme")]))
        .run(&mut NullReporter)
        .unwrap();

    let FeatureProperties::AccessPoint(props) = &outcome.document.features[0].properties else {
        panic!("expected an access point");
    };
    assert_eq!(props.vendor, "Randomized");
}

#[test]
fn test_sessions_merge_across_files() {
    let world = TestWorld::new()
        .with_capture(
            "2024-06-01_wardriving.csv",
            &CaptureBuilder::wigle().rows([
                CaptureRow::wifi("aa:bb:cc:00:00:01", -70, 51.50, -0.10)
                    .ssid("Net1")
                    .at("2024-06-01 10:00:00"),
                CaptureRow::wifi("aa:bb:cc:00:00:02", -70, 51.51, -0.11).at("2024-06-01 10:30:00"),
            ]),
        )
        .with_capture(
            "2024-06-02_wardriving.csv",
            &CaptureBuilder::wigle().rows([
                CaptureRow::wifi("aa:bb:cc:00:00:01", -40, 51.52, -0.12)
                    .ssid("Net2")
                    .at("2024-06-02 09:00:00"),
                CaptureRow::wifi("aa:bb:cc:00:00:03", -80, 51.53, -0.13).at("2024-06-02 09:05:00"),
            ]),
        );

    let outcome = run(&world);
    assert_eq!(outcome.document.access_point_count(), 3);
    assert_eq!(outcome.document.route_count(), 2);

    let merged = outcome
        .document
        .features
        .iter()
        .find_map(|f| match &f.properties {
            FeatureProperties::AccessPoint(p) if p.address == "aa:bb:cc:00:00:01" => Some(p),
            _ => None,
        })
        .unwrap();
    assert_eq!(merged.best_rssi, -40);
    assert_eq!(merged.ssid, "Net2");
    assert_eq!(merged.count, 2);
    assert_eq!(merged.sessions, "2024-06-01,2024-06-02");
    assert_eq!(merged.first_seen, "Jun 01, 2024 10:00");
    assert_eq!(merged.last_seen, "Jun 02, 2024 09:00");

    let metadata = &outcome.document.metadata;
    assert_eq!(metadata.sessions[0].duration_minutes, 30);
    assert_eq!(metadata.sessions[1].duration_minutes, 5);
}

#[test]
fn test_identical_runs_are_identical() {
    let world = TestWorld::new().with_capture(
        "drive.csv",
        &CaptureBuilder::wigle().rows([
            CaptureRow::wifi("aa:bb:cc:00:00:01", -70, 51.50, -0.10).at("2024-06-01 10:00:00"),
            CaptureRow::wifi("aa:bb:cc:00:00:02", -60, 51.51, -0.11).at("2024-06-01 10:01:00"),
            CaptureRow::wifi("aa:bb:cc:00:00:01", -50, 51.52, -0.12).at("2024-06-01 10:02:00"),
        ]),
    );
    let generated = NaiveDate::from_ymd_opt(2024, 6, 2)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap();

    let mut config = offline_config();
    config.jitter_degrees = 0.0002;
    let pipeline = Pipeline::new(world.data_dir(), config)
        .with_seed(Some(7))
        .with_generated(generated);

    let first = pipeline.run(&mut NullReporter).unwrap();
    let second = pipeline.run(&mut NullReporter).unwrap();
    assert_eq!(first.document, second.document);
    assert_eq!(first.stats.rows_read, second.stats.rows_read);

    let layers: Vec<Layer> = first.document.features.iter().map(|f| f.layer()).collect();
    assert_eq!(layers, vec![Layer::AccessPoints, Layer::AccessPoints, Layer::Route]);
}

#[test]
fn test_progress_every_hundred_rows() {
    let rows = (0..250).map(|i| {
        CaptureRow::wifi(&format!("aa:bb:cc:00:{:02x}:{:02x}", i / 256, i % 256), -70, 51.5, -0.1)
    });
    let world = TestWorld::new().with_capture("big.csv", &CaptureBuilder::wigle().rows(rows));

    let mut reporter = RecordingReporter::default();
    Pipeline::new(world.data_dir(), offline_config())
        .run(&mut reporter)
        .unwrap();

    let progress: Vec<u64> = reporter
        .events
        .iter()
        .filter_map(|event| match event {
            RunEvent::Progress { rows, .. } => Some(*rows),
            _ => None,
        })
        .collect();
    assert_eq!(progress, vec![100, 200]);

    assert!(reporter.events.iter().any(|event| matches!(
        event,
        RunEvent::FileFinished { rows: 250, addresses: 250, .. }
    )));
}
