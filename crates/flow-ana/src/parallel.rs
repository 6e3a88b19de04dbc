use std::ops::Range;

use flow_core::errors::{ErrorInfo, FlowError};
use flow_core::ParticleSample;
use log::{debug, info};
use rayon::prelude::*;

use crate::config::AnalysisConfig;
use crate::mc::McEventGenerator;
use crate::task::{FlowTask, TaskOutput};

fn pool_error(err: impl ToString) -> FlowError {
    FlowError::Config(ErrorInfo::new("thread-pool", err.to_string()))
}

/// Splits `0..events` into at most `shards` contiguous, near-equal ranges.
pub fn shard_ranges(events: u64, shards: usize) -> Vec<Range<u64>> {
    let shards = (shards.max(1) as u64).min(events.max(1));
    let base = events / shards;
    let extra = events % shards;
    let mut start = 0;
    (0..shards)
        .map(|shard| {
            let len = base + u64::from(shard < extra);
            let range = start..start + len;
            start += len;
            range
        })
        .collect()
}

/// Processes events `0..events` with one private [`FlowTask`] per shard.
///
/// `source` fills the (already cleared) sample for an event index. Shard
/// outputs are merged in shard order, so a given thread count always
/// produces the same result.
pub fn process_sharded<F>(
    config: &AnalysisConfig,
    events: u64,
    source: F,
) -> Result<TaskOutput, FlowError>
where
    F: Fn(u64, &mut ParticleSample) -> Result<(), FlowError> + Sync,
{
    config.validate()?;
    let ranges = shard_ranges(events, config.threads);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads.max(1))
        .build()
        .map_err(pool_error)?;

    let results: Result<Vec<_>, FlowError> = pool.install(|| {
        ranges
            .par_iter()
            .enumerate()
            .map(|(shard, range)| -> Result<(usize, TaskOutput), FlowError> {
                let mut task = FlowTask::from_config(config)?;
                let mut sample = ParticleSample::new();
                for event in range.clone() {
                    sample.clear();
                    source(event, &mut sample)?;
                    task.process_event(&sample)?;
                }
                debug!("shard {shard} processed events {range:?}");
                Ok((shard, task.into_output()))
            })
            .collect()
    });

    let mut ordered = results?;
    ordered.sort_by_key(|(shard, _)| *shard);
    let mut outputs = ordered.into_iter().map(|(_, output)| output);
    let mut merged = match outputs.next() {
        Some(first) => first,
        None => FlowTask::from_config(config)?.into_output(),
    };
    for output in outputs {
        merged.merge(&output)?;
    }
    Ok(merged)
}

/// Generates and analyses the configured Monte Carlo sample, then fills the
/// theory result set.
pub fn run_monte_carlo(config: &AnalysisConfig) -> Result<TaskOutput, FlowError> {
    let mc = config.monte_carlo.clone().ok_or_else(|| {
        FlowError::Config(
            ErrorInfo::new("no-monte-carlo", "configuration has no monte_carlo section")
                .with_hint("add `monte_carlo` with events, multiplicity and flow_harmonics"),
        )
    })?;
    let generator = McEventGenerator::new(mc, config.seed_policy.master_seed)?;
    info!(
        "generating {} events on {} threads",
        generator.events(),
        config.threads
    );
    let mut output = process_sharded(config, generator.events(), |event, sample| {
        generator.generate(event, sample)
    })?;

    let mut theory = FlowTask::from_config(config)?;
    theory.fill_theory(generator.flow_harmonics())?;
    output.profiles.merge(theory.profiles())?;
    info!(
        "processed {} events, {} correlator skips",
        output.diagnostics.events(),
        output.diagnostics.total_skipped()
    );
    Ok(output)
}
