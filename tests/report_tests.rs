// Report rendering, report file and CPU graph output

use std::collections::BTreeMap;

use netman::config::OutputConfig;
use netman::models::{AddressBook, CpuSample, InterfaceState, InterfaceStatus, Report};
use netman::report::{render_graph, render_report, write_artifacts, write_report};
use netman::telemetry::PollSnapshot;

fn addresses() -> BTreeMap<String, AddressBook> {
    let mut m = BTreeMap::new();
    m.insert(
        "R1".to_string(),
        AddressBook {
            v4: vec!["10.0.0.1".into()],
            v6: vec!["2001:0db8:0000:0000:0000:0000:0000:0001".into()],
        },
    );
    m.insert("R2".to_string(), AddressBook::default());
    m
}

fn statuses() -> BTreeMap<String, InterfaceStatus> {
    let mut r1 = InterfaceStatus::new();
    r1.insert("FastEthernet0/0".into(), InterfaceState::Up);
    let mut r3 = InterfaceStatus::new();
    r3.insert("FastEthernet0/1".into(), InterfaceState::Other("7".into()));
    let mut m = BTreeMap::new();
    m.insert("R1".to_string(), r1);
    m.insert("R3".to_string(), r3);
    m
}

#[test]
fn test_render_report_covers_union_of_devices() {
    let report = render_report(&addresses(), &statuses());
    let names: Vec<&str> = report.keys().map(String::as_str).collect();
    assert_eq!(names, ["R1", "R2", "R3"]);
    assert_eq!(report["R1"].addresses.v4, ["10.0.0.1"]);
    assert_eq!(
        report["R1"].interface_status["FastEthernet0/0"],
        InterfaceState::Up
    );
    assert!(report["R2"].interface_status.is_empty());
    assert_eq!(report["R3"].addresses, AddressBook::default());
}

#[test]
fn test_render_report_empty_inputs() {
    assert!(render_report(&BTreeMap::new(), &BTreeMap::new()).is_empty());
}

#[test]
fn test_report_json_shape() {
    let report = render_report(&addresses(), &statuses());
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(
        json["R1"],
        serde_json::json!({
            "addresses": {
                "v4": ["10.0.0.1"],
                "v6": ["2001:0db8:0000:0000:0000:0000:0000:0001"]
            },
            "interface-status": {"FastEthernet0/0": "up"}
        })
    );
    assert_eq!(
        json["R3"]["interface-status"]["FastEthernet0/1"],
        "other: 7"
    );
}

#[test]
fn test_write_report_creates_parent_and_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("report.json");
    let report = render_report(&addresses(), &statuses());
    write_report(&report, &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let back: Report = serde_json::from_str(&text).unwrap();
    assert_eq!(back, report);
}

#[test]
fn test_render_graph_writes_svg() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cpu.svg");
    let samples = vec![
        CpuSample::new(0, 12),
        CpuSample::new(5, 40),
        CpuSample::new(10, 7),
    ];
    render_graph(&samples, "R1 CPU Utilization", &path).unwrap();
    let svg = std::fs::read_to_string(&path).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("R1 CPU Utilization"));
}

#[test]
fn test_render_graph_with_no_samples() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.svg");
    render_graph(&[], "R1 CPU Utilization", &path).unwrap();
    assert!(path.is_file());
}

#[test]
fn test_write_artifacts_writes_both_files() {
    let dir = tempfile::tempdir().unwrap();
    let output = OutputConfig {
        report_path: dir.path().join("out/report.json").display().to_string(),
        graph_path: dir.path().join("out/cpu.svg").display().to_string(),
    };
    let snapshot = PollSnapshot {
        timestamp: 1,
        report: render_report(&addresses(), &statuses()),
        cpu_device: "R1".into(),
        cpu: vec![CpuSample::new(0, 20), CpuSample::new(5, 25)],
    };
    let files = write_artifacts(&snapshot, &output).unwrap();
    assert_eq!(files.len(), 2);
    assert!(files.iter().all(|f| f.is_file()));
    let svg = std::fs::read_to_string(&files[1]).unwrap();
    assert!(svg.contains("R1 CPU Utilization"));
}

#[test]
fn test_publish_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let existing = dir.path().join("report.json");
    std::fs::write(&existing, "{}").unwrap();
    let published = netman::publish::publish(&[existing.clone(), dir.path().join("missing.svg")]);
    assert!(published.is_empty());
    assert!(existing.is_file());
}
