//! Whole-pipeline integration tests: measure with a scripted invoker, derive
//! speedups, and render the charts to a temporary directory.

use std::cell::Cell;

use speedup_core::observer::NoOpObserver;
use speedup_core::results::{load_results, save_results};
use speedup_core::{
    measure, plan_charts, BenchConfig, ExecutionMode, MeasurementKey, SkewPolicy, SpeedupError,
};
use speedup_plot::render_charts;
use tempfile::TempDir;

fn config() -> BenchConfig {
    BenchConfig {
        workload_sizes: vec![10, 25, 50],
        thread_counts: vec![2, 4, 8],
        repetitions: 2,
        ..BenchConfig::default()
    }
}

/// Scripted program: sequential runs take `size` seconds, parallel runs scale
/// perfectly with work stealing and at half efficiency with work balancing.
fn ideal_program(args: &[String]) -> Result<Vec<u8>, SpeedupError> {
    let size: f64 = args[0].parse().unwrap();
    let seconds = match args[1].as_str() {
        "s" => size,
        "ws" => size / args[2].parse::<f64>().unwrap(),
        "wb" => 2.0 * size / args[2].parse::<f64>().unwrap(),
        other => panic!("unexpected mode {other}"),
    };
    Ok(format!("{seconds:.2}\n").into_bytes())
}

#[test]
fn measure_plan_render() {
    let dir = TempDir::new().unwrap();
    let config = config();

    let averages = measure(&config, &ideal_program, &NoOpObserver).unwrap();
    assert_eq!(averages.len(), 3 + 3 * 3 * 2);

    let plans = plan_charts(&config, &averages, dir.path()).unwrap();
    assert_eq!(plans.len(), 2);

    let ws = &plans[0];
    assert_eq!(ws.mode, ExecutionMode::WorkStealing);
    assert_eq!(ws.series.len(), 3);
    assert_eq!(ws.series[0].label, "10 epochs");
    for (threads, speedup) in &ws.series[2].points {
        assert!((speedup - f64::from(*threads)).abs() < 1e-9);
    }

    let wb = &plans[1];
    for (threads, speedup) in &wb.series[1].points {
        assert!((speedup - f64::from(*threads) / 2.0).abs() < 1e-2);
    }

    let written = render_charts(&plans).unwrap();
    assert_eq!(
        written,
        vec![dir.path().join("speedup-ws"), dir.path().join("speedup-wb")]
    );
    for path in written {
        let svg = std::fs::read_to_string(path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("50 epochs"));
    }
}

#[test]
fn missing_measurement_writes_no_chart() {
    let dir = TempDir::new().unwrap();
    let config = config();
    let mut averages = measure(&config, &ideal_program, &NoOpObserver).unwrap();
    let gone = MeasurementKey::parallel(50, ExecutionMode::WorkBalancing, 8);
    averages.remove(&gone);

    let err = plan_charts(&config, &averages, dir.path()).unwrap_err();
    assert!(matches!(err, SpeedupError::MissingKey(key) if key == gone));
    assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[test]
fn unparseable_samples_follow_policy() {
    let calls = Cell::new(0u32);
    // Every other sequential sample is garbage
    let flaky = |args: &[String]| -> Result<Vec<u8>, SpeedupError> {
        if args[1] == "s" {
            calls.set(calls.get() + 1);
            if calls.get() % 2 == 0 {
                return Ok(b"panic: runtime error\n".to_vec());
            }
        }
        ideal_program(args)
    };

    let mut config = config();
    let excluded = measure(&config, &flaky, &NoOpObserver).unwrap();
    let summary = excluded.summary(&MeasurementKey::sequential(10)).unwrap();
    assert_eq!((summary.valid, summary.failed), (1, 1));
    assert!((summary.mean - 10.0).abs() < 1e-9);

    calls.set(0);
    config.skew_policy = SkewPolicy::Legacy;
    let legacy = measure(&config, &flaky, &NoOpObserver).unwrap();
    let summary = legacy.summary(&MeasurementKey::sequential(10)).unwrap();
    assert!((summary.mean - 5.0).abs() < 1e-9);
}

#[test]
fn saved_results_chart_identically() {
    let dir = TempDir::new().unwrap();
    let config = config();
    let averages = measure(&config, &ideal_program, &NoOpObserver).unwrap();

    let results = dir.path().join("averages.json");
    save_results(&results, &averages, &config).unwrap();

    let content = std::fs::read_to_string(&results).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json["version"], 1);
    assert_eq!(json["skew_policy"], "exclude");
    let entries = json["entries"].as_array().unwrap();
    assert_eq!(entries.len(), averages.len());
    assert_eq!(entries[0]["mode"], "s");
    assert!(entries[0].get("threads").is_none());
    let last = entries.last().unwrap();
    assert_eq!(last["size"], 50);
    assert_eq!(last["mode"], "wb");
    assert_eq!(last["threads"], 8);

    let reloaded = load_results(&results).unwrap().into_averages();
    assert_eq!(reloaded.len(), averages.len());

    let fresh = plan_charts(&config, &averages, dir.path()).unwrap();
    let restored = plan_charts(&config, &reloaded, dir.path()).unwrap();
    for (a, b) in fresh.iter().zip(&restored) {
        assert_eq!(a.series, b.series);
    }
}

#[test]
fn launch_failure_aborts_run() {
    let calls = Cell::new(0u32);
    let broken = |_: &[String]| -> Result<Vec<u8>, SpeedupError> {
        calls.set(calls.get() + 1);
        Err(SpeedupError::Launch {
            program: "go".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        })
    };
    let err = measure(&config(), &broken, &NoOpObserver).unwrap_err();
    assert_eq!(err.exit_code(), 1);
    assert_eq!(calls.get(), 1);
}
