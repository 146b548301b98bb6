use spacecraft::{
    data::LOG_HEADER,
    scene::tube::fill_level,
    world::block::colour,
    AstroPiDataReader, AstroPiDataWriter, Block, BlockPos, InMemoryWorld, JoystickState,
    Orientation, SceneComposer, SceneConfig, ScenePhase, SensorReading, SpaceCraftError,
    TubeRange, TubeSettings, WorldConfig,
};
use std::io::Write;

fn fast_config() -> SceneConfig {
    SceneConfig::default().with_launch_step_ms(0)
}

fn scene() -> SceneComposer<InMemoryWorld> {
    SceneComposer::new(InMemoryWorld::new(), BlockPos::new(0, 0, 0), fast_config())
        .expect("Should build scene")
}

/// Every row written to a log file is read back, in order
#[test]
fn test_log_file_row_count() {
    let file = tempfile::NamedTempFile::new().expect("Should create temp file");

    let mut writer = AstroPiDataWriter::create(file.path()).expect("Should create log");
    for step in 0..25 {
        writer.write(&SensorReading::simulated(step)).unwrap();
    }
    writer.flush().unwrap();
    assert_eq!(writer.rows_written(), 25);

    let mut reader = AstroPiDataReader::open(file.path()).expect("Should open log");
    assert_eq!(reader.row_count(), 25);
    assert_eq!(reader.path(), file.path());

    let mut seen = 1;
    while reader.next_row() {
        seen += 1;
    }
    assert_eq!(seen, 25);
    assert!(reader.current().is_none());

    reader.rewind();
    assert_eq!(reader.current(), Some(&SensorReading::simulated(0)));
}

/// Reading a log and writing it out again gives the same bytes
#[test]
fn test_log_rewrite_is_identical() {
    let mut original = AstroPiDataWriter::from_writer(Vec::new()).unwrap();
    for step in 0..10 {
        original.write(&SensorReading::simulated(step * 7)).unwrap();
    }
    let bytes = original.into_inner().unwrap();

    let reader = AstroPiDataReader::from_reader(bytes.as_slice()).unwrap();
    let mut copy = AstroPiDataWriter::from_writer(Vec::new()).unwrap();
    for reading in &reader {
        copy.write(reading).unwrap();
    }

    assert_eq!(copy.into_inner().unwrap(), bytes);
}

/// A hand written log parses field by field
#[test]
fn test_hand_written_log() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "{}", LOG_HEADER.join(",")).unwrap();
    writeln!(
        file,
        "2016-02-14 09:15:30.250000,41.5,36.2,27.1,26.4,1003.5,12.0,-4.5,270.0,\
         0.2094,-0.0785,4.7124,10.0,20.0,30.0,0.01,0.02,0.03,0.0,0.0,1.0"
    )
    .unwrap();
    file.flush().unwrap();

    let reader = AstroPiDataReader::open(file.path()).unwrap();
    assert_eq!(reader.row_count(), 1);
    assert_eq!(reader.humidity(), Some(36.2));
    assert_eq!(reader.pressure(), Some(1003.5));
    assert_eq!(
        reader.orientation_in_degrees(),
        Some(Orientation::new(12.0, -4.5, 270.0))
    );
    assert_eq!(reader.accelerometer_raw().map(|a| a.z), Some(1.0));

    assert_eq!(
        reader.current().unwrap().to_line(),
        "2016-02-14 09:15:30.250000 27.1 26.4 1003.5 [12.0,-4.5,270.0] \
         [0.2094,-0.0785,4.7124] [10.0,20.0,30.0] [0.01,0.02,0.03] [0.0,0.0,1.0]"
    );
}

/// Opening a missing log reports the path
#[test]
fn test_missing_log_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no_such_log.csv");

    let err = AstroPiDataReader::open(&path).unwrap_err();
    assert!(err.is_log_error());
    match &err {
        SpaceCraftError::LogOpen { path: p, .. } => assert_eq!(p, &path),
        other => panic!("Expected LogOpen, got {:?}", other),
    }
    assert!(err.to_string().contains("no_such_log.csv"));
}

/// Test error types and formatting
#[test]
fn test_error_types() {
    let config_error = SpaceCraftError::config_error("Invalid configuration");
    assert!(config_error.to_string().contains("Configuration error"));

    let protocol_error = SpaceCraftError::protocol_error("Fail");
    assert_eq!(protocol_error.to_string(), "Protocol error: Fail");

    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
    let err: SpaceCraftError = io_error.into();
    assert!(err.to_string().contains("I/O error"));
    assert!(!err.is_log_error());
}

#[test]
fn test_world_config() {
    let config = WorldConfig::default();
    assert_eq!(config.host, "localhost");
    assert_eq!(config.port, spacecraft::DEFAULT_MCPI_PORT);

    let custom = WorldConfig::default().with_host("raspberrypi.local").with_port(4712);
    assert_eq!(custom.address(), "raspberrypi.local:4712");
}

#[test]
fn test_scene_config_builders() {
    let config = SceneConfig::default()
        .with_round_degrees_to(30.0)
        .with_launch_height(10)
        .with_clock_radius(6);
    assert_eq!(config.round_degrees_to, 30.0);
    assert_eq!(config.launch_height, 10);
    assert_eq!(config.clock_radius, 6);
    assert!(config.validate().is_ok());

    let inverted = TubeSettings {
        pressure: TubeRange::new(1050.0, 950.0, Block::OBSIDIAN),
        ..TubeSettings::default()
    };
    let err = SceneConfig::default().with_tubes(inverted).validate().unwrap_err();
    assert!(err.to_string().contains("pressure"));
}

#[test]
fn test_scene_config_json_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "round_degrees_to": 45.0, "launch_height": 20 }}"#).unwrap();
    file.flush().unwrap();

    let config = SceneConfig::from_json_file(file.path()).unwrap();
    assert_eq!(config.round_degrees_to, 45.0);
    assert_eq!(config.launch_height, 20);
    assert_eq!(config.clock_radius, SceneConfig::default().clock_radius);

    let mut bad = tempfile::NamedTempFile::new().unwrap();
    write!(bad, r#"{{ "round_degrees_to": 0.0 }}"#).unwrap();
    bad.flush().unwrap();
    assert!(matches!(
        SceneConfig::from_json_file(bad.path()),
        Err(SpaceCraftError::Config(_))
    ));
}

/// Rounding an orientation twice changes nothing
#[test]
fn test_rounding_idempotent() {
    for granularity in [5.0, 15.0, 45.0, 90.0] {
        let mut degrees = -360.0;
        while degrees <= 360.0 {
            let once = spacecraft::round_degrees(degrees, granularity);
            assert_eq!(spacecraft::round_degrees(once, granularity), once);
            assert_eq!(once % granularity, 0.0);
            degrees += 0.7;
        }
    }
}

/// Tubes saturate outside their range and never overflow
#[test]
fn test_tube_saturation() {
    assert_eq!(fill_level(5.0, 10.0, 40.0, 20), 0);
    assert_eq!(fill_level(10.0, 10.0, 40.0, 20), 0);
    assert_eq!(fill_level(25.0, 10.0, 40.0, 20), 10);
    assert_eq!(fill_level(40.0, 10.0, 40.0, 20), 20);
    assert_eq!(fill_level(400.0, 10.0, 40.0, 20), 20);
    assert_eq!(fill_level(f64::NAN, 10.0, 40.0, 20), 0);

    let mut scene = scene();
    let hot = SensorReading {
        temperature_from_humidity: 90.0,
        ..SensorReading::simulated(0)
    };
    scene.update(&hot, JoystickState::IDLE).unwrap();
    // 2,0,0 is the temperature tube; full means lava all the way up
    assert_eq!(scene.world().block_at(BlockPos::new(2, 19, 0)), Block::LAVA);
    assert!(scene.world().block_at(BlockPos::new(2, 20, 0)).is_air());
}

/// The rocket launches on each new press, not while a button is held
#[test]
fn test_launch_edge_triggered() {
    let mut scene = scene();
    let reading = SensorReading::simulated(3);
    let press = JoystickState {
        button: true,
        ..JoystickState::IDLE
    };

    let up = JoystickState {
        up: true,
        ..JoystickState::IDLE
    };

    let sequence = [
        (JoystickState::IDLE, 0),
        (press, 1),
        (press, 1),
        (JoystickState::ALL, 2),
        (JoystickState::ALL, 2),
        (up, 2),
        (JoystickState::IDLE, 2),
        (up, 3),
        (JoystickState { button: true, ..up }, 4),
        (press, 4),
    ];
    for (joystick, launches) in sequence {
        scene.update(&reading, joystick).unwrap();
        assert_eq!(scene.launches(), launches, "after {:?}", joystick);
    }
    assert_eq!(scene.phase(), ScenePhase::Displaying);

    // the rocket is back on the pad
    let pad_top = BlockPos::new(15, 1, -10);
    assert_eq!(scene.world().block_at(pad_top), Block::wool(colour::WHITE));
}

/// Clearing removes everything the scene placed
#[test]
fn test_clear_leaves_empty_world() {
    let mut scene = scene();
    for step in 0..5 {
        let joystick = if step == 2 {
            JoystickState::ALL
        } else {
            JoystickState::IDLE
        };
        scene.update(&SensorReading::simulated(step * 11), joystick).unwrap();
    }
    assert!(scene.world().solid_count() > 0);

    scene.clear().unwrap();
    assert_eq!(scene.phase(), ScenePhase::Idle);
    assert!(scene.last_reading().is_none());
    assert_eq!(scene.world().solid_count(), 0);
}

/// Playing a whole log through the scene
#[tokio::test]
async fn test_replay_into_scene() {
    use futures_util::StreamExt;

    let mut writer = AstroPiDataWriter::from_writer(Vec::new()).unwrap();
    for step in 0..4 {
        writer.write(&SensorReading::simulated(step * 5)).unwrap();
    }
    let reader = AstroPiDataReader::from_reader(writer.into_inner().unwrap().as_slice()).unwrap();

    let mut scene = scene();
    let mut stream = reader.replay(1);
    let mut applied = 0;
    while let Some(reading) = stream.next().await {
        scene.update(&reading, JoystickState::IDLE).unwrap();
        applied += 1;
    }

    assert_eq!(applied, 4);
    assert_eq!(scene.last_reading(), reader.iter().last());
}
