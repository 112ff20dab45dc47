use chrono::{DateTime, TimeZone, Utc};
use usage_charts::data_types::{Sample, ValueKey};
use usage_charts::usage::{
    CpuMetric, FileSystemMetric, LoadOutcome, MemoryMetric, NetworkMetric, UsageData, UsageMetric,
};
use usage_charts::view_controller::WindowBounds;

const T0: i64 = 1_700_000_000;
const MIB: f64 = 1024.0 * 1024.0;
const GIB: f64 = 1024.0 * MIB;

fn at(offset: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(T0 + offset, 0).unwrap()
}

fn bounds() -> WindowBounds {
    WindowBounds::new(T0 as f64, (T0 + 3600) as f64, 60.0)
}

#[test]
fn test_cpu_points() {
    let samples = vec![
        Sample::new(at(0)).with_cpu(0.5),
        Sample::new(at(60)),
        Sample::new(at(120)).with_cpu(1.25),
    ];
    let mut data = UsageData::new(CpuMetric, bounds());
    data.process_values(&samples);

    let ys: Vec<Option<f64>> = data.points().iter().map(|p| p.y).collect();
    assert_eq!(ys, vec![Some(0.5), None, Some(1.25)]);
    assert_eq!(data.points()[1].x, (T0 + 60) as f64);
    assert_eq!((data.ranges().y.min, data.ranges().y.max), (0.5, 1.25));
}

#[test]
fn test_memory_mebibytes_and_percent() {
    let sample = Sample::new(at(0)).with_memory(512.0 * MIB, 2048.0 * MIB);
    let point = MemoryMetric.extract(&sample, &[]);
    assert_eq!(point.y, Some(512.0));
    assert_eq!(point.percent, Some(25.0));

    let no_capacity = Sample::new(at(0)).with_memory(1.0, 0.0);
    assert_eq!(MemoryMetric.extract(&no_capacity, &[]).percent, None);
}

#[test]
fn test_network_keys_come_from_first_sample() {
    let samples = vec![
        Sample::new(at(0)).with_cpu(1.0),
        Sample::new(at(60))
            .with_interface("eth0", 100.0, 50.0)
            .with_interface("wlan0", 10.0, 5.0),
        Sample::new(at(120))
            .with_interface("eth0", 200.0, 80.0)
            .with_interface("docker0", 1.0, 1.0),
    ];
    let mut data = UsageData::new(NetworkMetric, bounds());
    data.process_values(&samples);
    assert_eq!(data.keys(), &["eth0".to_string(), "wlan0".to_string()]);

    let last = &data.points()[2];
    assert_eq!(last.value(&NetworkMetric::rx_key("eth0")), Some(200.0));
    assert_eq!(last.value(&NetworkMetric::tx_key("eth0")), Some(80.0));
    // Missing on this sample: a gap, not an error.
    assert_eq!(last.value(&NetworkMetric::rx_key("wlan0")), None);
    assert_eq!(last.value(&ValueKey::field("docker0.rx")), None);
    assert_eq!(last.y, Some(280.0));

    assert_eq!(data.points()[0].y, None);
    let rx = data.ranges().get(&NetworkMetric::rx_key("eth0"));
    assert_eq!((rx.min, rx.max), (100.0, 200.0));
}

#[test]
fn test_filesystem_devices() {
    let samples = vec![
        Sample::new(at(0)).with_device("/dev/sda1", 60.0 * GIB, 100.0 * GIB),
        Sample::new(at(60))
            .with_device("/dev/sda1", 50.0 * GIB, 100.0 * GIB)
            .with_device("/dev/sdb1", 10.0 * GIB, 40.0 * GIB),
    ];
    let mut data = UsageData::new(FileSystemMetric, bounds());
    data.process_values(&samples);

    assert_eq!(data.keys(), &["/dev/sda1".to_string()]);
    let devices = data.devices();
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].name, "/dev/sda1");
    assert_eq!(devices[0].used, Some(50.0 * GIB));
    assert_eq!(devices[0].capacity, Some(100.0 * GIB));
    assert_eq!(devices[0].percent, Some(50.0));

    let last = data.points().last().unwrap();
    assert_eq!(last.percent, Some(50.0));
    assert_eq!(last.value(&FileSystemMetric::used_key("/dev/sda1")), Some(50.0 * GIB));
}

#[test]
fn test_filesystem_without_samples_has_no_devices() {
    let data = UsageData::new(FileSystemMetric, bounds());
    assert!(data.devices().is_empty());
}

#[test]
fn test_points_are_sorted_by_time() {
    let samples = vec![
        Sample::new(at(120)).with_cpu(3.0),
        Sample::new(at(0)).with_cpu(1.0),
        Sample::new(at(60)).with_cpu(2.0),
    ];
    let mut data = UsageData::new(CpuMetric, bounds());
    data.process_values(&samples);
    let ys: Vec<Option<f64>> = data.points().iter().map(|p| p.y).collect();
    assert_eq!(ys, vec![Some(1.0), Some(2.0), Some(3.0)]);
    assert!(data.snapshot().sorted);
}

#[test]
fn test_load_applies_and_advances_bounds() {
    let mut data = UsageData::new(CpuMetric, bounds());
    let request = data.begin_load();
    assert!(data.pending());
    assert_eq!((request.from, request.to), data.window());

    let now = (T0 + 4000) as f64;
    let outcome = data.finish_load(request, Ok(vec![Sample::new(at(0)).with_cpu(1.0)]), now);
    assert_eq!(outcome, LoadOutcome::Applied);
    assert!(!data.pending());
    assert_eq!(data.points().len(), 1);
    assert_eq!(data.bounds().instance_to, now);
    assert_eq!(data.revision(), 1);
}

#[test]
fn test_stale_response_changes_nothing() {
    let mut data = UsageData::new(CpuMetric, bounds());
    let first = data.begin_load();
    data.finish_load(first, Ok(vec![Sample::new(at(0)).with_cpu(1.0)]), (T0 + 3600) as f64);
    let points_before = data.points().to_vec();
    let ranges_before = data.ranges().clone();

    let stale = data.begin_load();
    data.set_window((T0 + 60) as f64, (T0 + 600) as f64);
    let outcome = data.finish_load(
        stale,
        Ok(vec![Sample::new(at(30)).with_cpu(9.0)]),
        (T0 + 3600) as f64,
    );
    assert_eq!(outcome, LoadOutcome::Stale);
    assert_eq!(data.points(), &points_before[..]);
    assert_eq!(data.ranges(), &ranges_before);
    assert_eq!(data.error(), None);
    assert_eq!(data.revision(), 1);

    let stale = data.begin_load();
    data.set_window(T0 as f64, (T0 + 600) as f64);
    let outcome = data.finish_load(stale, Err(eyre::eyre!("timeout")), (T0 + 3600) as f64);
    assert_eq!(outcome, LoadOutcome::Stale);
    assert_eq!(data.error(), None);
}

#[test]
fn test_failed_load_keeps_previous_points() {
    let mut data = UsageData::new(CpuMetric, bounds());
    let request = data.begin_load();
    data.finish_load(request, Ok(vec![Sample::new(at(0)).with_cpu(1.0)]), (T0 + 3600) as f64);

    let request = data.begin_load();
    let outcome = data.finish_load(request, Err(eyre::eyre!("connection refused")), (T0 + 3600) as f64);
    assert_eq!(outcome, LoadOutcome::Failed);
    assert!(!data.pending());
    assert_eq!(data.error(), Some("connection refused"));
    assert_eq!(data.points().len(), 1);

    // The next successful load clears the error.
    let request = data.begin_load();
    data.finish_load(request, Ok(vec![]), (T0 + 3600) as f64);
    assert_eq!(data.error(), None);
    assert!(data.points().is_empty());
}

#[test]
fn test_correct_date_clamps_into_bounds() {
    let data = UsageData::new(CpuMetric, bounds());
    assert_eq!(data.correct_date_to_fix_range((T0 - 10) as f64), T0 as f64);
    assert_eq!(data.correct_date_to_fix_range((T0 + 9999) as f64), (T0 + 3600) as f64);
    assert_eq!(data.correct_date_to_fix_range((T0 + 10) as f64), (T0 + 10) as f64);
}

#[test]
fn test_sample_json_shape() {
    let json = r#"{
        "timestamp": "2023-11-14T22:13:20Z",
        "cpuLoad": 0.75,
        "memoryUsage": 1048576,
        "memoryCapacity": 4194304,
        "networkStatsByInterface": { "eth0": { "rxBytes": 10, "txBytes": 20 } },
        "diskStatsByDevice": { "/dev/sda1": { "usableSpace": 30, "capacity": 100 } }
    }"#;
    let sample: Sample = serde_json::from_str(json).unwrap();
    assert_eq!(sample.unix_seconds(), T0 as f64);
    assert_eq!(sample.cpu_load, Some(0.75));
    let disk = &sample.disk_stats_by_device.as_ref().unwrap()["/dev/sda1"];
    assert_eq!(disk.used(), Some(70.0));

    let sparse: Sample = serde_json::from_str(r#"{ "timestamp": "2023-11-14T22:13:20Z" }"#).unwrap();
    assert_eq!(sparse.cpu_load, None);
    assert!(sparse.network_stats_by_interface.is_none());
}
