//! Measurement loop: run every grid cell `repetitions` times and average.

use tracing::{debug, info, warn};

use crate::config::BenchConfig;
use crate::error::SpeedupError;
use crate::invoker::ProcessInvoker;
use crate::measurement::{Averages, MeasurementKey};
use crate::observer::MeasureObserver;
use crate::sample::parse_sample;
use crate::stats::aggregate;

/// Keys in the order they are measured.
///
/// Sequential baselines for every size come first, then for each thread
/// count, each size, each parallel mode.
#[must_use]
pub fn plan_keys(config: &BenchConfig) -> Vec<MeasurementKey> {
    let sequential = config
        .workload_sizes
        .iter()
        .map(|&size| MeasurementKey::sequential(size));

    let parallel = config.thread_counts.iter().flat_map(|&threads| {
        config.workload_sizes.iter().flat_map(move |&size| {
            config
                .parallel_modes
                .iter()
                .map(move |&mode| MeasurementKey::parallel(size, mode, threads))
        })
    });

    sequential.chain(parallel).collect()
}

/// Measure every key of the grid and return the averages.
///
/// Invocations run one at a time. A launch failure aborts the whole run;
/// unparseable output is recorded per sample and handled by the configured
/// skew policy.
pub fn measure(
    config: &BenchConfig,
    invoker: &dyn ProcessInvoker,
    observer: &dyn MeasureObserver,
) -> Result<Averages, SpeedupError> {
    config.validate()?;

    let keys = plan_keys(config);
    observer.on_start(config.total_invocations());
    info!(
        keys = keys.len(),
        repetitions = config.repetitions,
        policy = %config.skew_policy,
        "starting measurement"
    );

    let mut averages = Averages::new();
    for key in keys {
        let args = key.args();
        let mut samples = Vec::with_capacity(config.repetitions as usize);

        for repetition in 0..config.repetitions {
            debug!(command = %invoker.describe(&args), repetition, "invoking");
            let stdout = invoker.invoke(&args)?;
            let outcome = parse_sample(&stdout);
            match &outcome {
                Ok(seconds) => debug!(%key, repetition, seconds, "sample"),
                Err(e) => warn!(%key, repetition, error = %e, "discarding unparseable sample"),
            }
            observer.on_sample(&key, repetition, &outcome);
            samples.push(outcome);
        }

        let summary =
            aggregate(&samples, config.skew_policy).ok_or(SpeedupError::NoValidSamples {
                key,
                failed: config.repetitions,
                attempts: config.repetitions,
            })?;
        info!(%key, mean = summary.mean, failed = summary.failed, "averaged");
        observer.on_key_complete(&key, &summary);
        averages.insert(key, summary);
    }

    observer.on_finish();
    Ok(averages)
}
