use std::collections::BTreeMap;

use approx::assert_relative_eq;
use flow_ana::serde::{from_json_slice, to_canonical_json_bytes};
use flow_ana::{
    expected_value, process_sharded, run_monte_carlo, shard_ranges, AcceptanceMap,
    AnalysisConfig, McEventGenerator, MonteCarloConfig, Multiplicity, ResultSet, RunReport,
};
use flow_core::{CorrelatorSpec, KinematicChannel, ParticleSample};

fn mc_config(events: u64, threads: usize) -> AnalysisConfig {
    let mut config = AnalysisConfig::new(
        [vec![2, -2], vec![3, -3], vec![2, 2, -2, -2], vec![1, -1]]
            .into_iter()
            .map(|h| CorrelatorSpec::new(h).unwrap())
            .collect(),
    );
    config.seed_policy.master_seed = 7;
    config.threads = threads;
    config.monte_carlo = Some(MonteCarloConfig {
        events,
        multiplicity: Multiplicity::Range { min: 150, max: 250 },
        flow_harmonics: vec![0.0, 0.1, 0.05],
        acceptance: BTreeMap::new(),
    });
    config
}

#[test]
fn events_are_reproducible_per_index() {
    let config = mc_config(10, 1);
    let generator = McEventGenerator::new(config.monte_carlo.clone().unwrap(), 7).unwrap();
    let mut first = ParticleSample::new();
    let mut second = ParticleSample::new();
    generator.generate(3, &mut first).unwrap();
    generator.generate(4, &mut second).unwrap();
    assert_ne!(first, second);
    generator.generate(3, &mut second).unwrap();
    assert_eq!(first, second);
    assert!((150..=250).contains(&first.len()));
    assert!(first
        .angles()
        .iter()
        .all(|phi| (0.0..std::f64::consts::TAU).contains(phi)));

    let other_seed = McEventGenerator::new(config.monte_carlo.unwrap(), 8).unwrap();
    other_seed.generate(3, &mut second).unwrap();
    assert_ne!(first, second);
}

#[test]
fn runs_are_reproducible_per_seed() {
    let config = mc_config(40, 2);
    assert_eq!(
        run_monte_carlo(&config).unwrap(),
        run_monte_carlo(&config).unwrap()
    );
}

#[test]
fn sharded_run_matches_serial_run() {
    let serial = run_monte_carlo(&mc_config(60, 1)).unwrap();
    let sharded = run_monte_carlo(&mc_config(60, 4)).unwrap();
    assert_eq!(serial.diagnostics, sharded.diagnostics);
    for set in [ResultSet::Data, ResultSet::Theory] {
        let a = serial.profiles.profile(set).unwrap();
        let b = sharded.profiles.profile(set).unwrap();
        for (x, y) in a.bins().iter().zip(b.bins()) {
            assert_eq!(x.entries(), y.entries());
            assert_relative_eq!(x.sum_weights(), y.sum_weights(), max_relative = 1e-12);
            assert_relative_eq!(
                x.mean().unwrap(),
                y.mean().unwrap(),
                epsilon = 1e-14,
                max_relative = 1e-9
            );
        }
    }
}

#[test]
fn generated_flow_is_recovered() {
    let output = run_monte_carlo(&mc_config(400, 4)).unwrap();
    let data = output.profiles.profile(ResultSet::Data).unwrap();
    let theory = output.profiles.profile(ResultSet::Theory).unwrap();

    let two = data.bin(0).unwrap().mean().unwrap();
    assert!((two - 0.01).abs() < 2e-3, "<2>_{{2,-2}} = {two}");
    let three = data.bin(1).unwrap().mean().unwrap();
    assert!((three - 0.0025).abs() < 2e-3, "<2>_{{3,-3}} = {three}");
    let one = data.bin(3).unwrap().mean().unwrap();
    assert!(one.abs() < 2e-3, "<2>_{{1,-1}} = {one}");

    assert_relative_eq!(theory.bin(0).unwrap().mean().unwrap(), 0.01, max_relative = 1e-12);
    assert_relative_eq!(theory.bin(2).unwrap().mean().unwrap(), 1e-4, max_relative = 1e-12);
    assert_eq!(theory.bin(3).unwrap().mean(), Some(0.0));
    assert_eq!(theory.bin(0).unwrap().sum_weights(), 1.0);
    assert!(output
        .profiles
        .profile(ResultSet::DataWeightsReset)
        .unwrap()
        .bins()
        .iter()
        .all(|bin| bin.entries() == 0));
}

#[test]
fn theory_values_follow_input_amplitudes() {
    let flow = [0.02, 0.06, 0.03];
    let value = |h: Vec<i32>| expected_value(&CorrelatorSpec::new(h).unwrap(), &flow);
    assert_relative_eq!(value(vec![2, -2]), 0.0036);
    assert_relative_eq!(value(vec![3, -1, -2]), 0.03 * 0.02 * 0.06);
    assert_eq!(value(vec![0, 0]), 1.0);
    assert_eq!(value(vec![4, -4]), 0.0);
}

#[test]
fn acceptance_map_drops_particles_and_sets_weights() {
    let mut config = mc_config(1, 1).monte_carlo.unwrap();
    config.multiplicity = Multiplicity::Fixed { fixed: 500 };
    config.acceptance.insert(
        KinematicChannel::Phi,
        AcceptanceMap {
            bins: vec![1.0, 0.0],
            weights: vec![1.5, 4.0],
        },
    );
    let generator = McEventGenerator::new(config, 11).unwrap();
    let mut sample = ParticleSample::new();
    generator.generate(0, &mut sample).unwrap();
    assert!(sample.len() < 500);
    assert!(!sample.is_empty());
    assert!(sample.angles().iter().all(|phi| *phi < std::f64::consts::PI));
    assert_eq!(sample.channel(KinematicChannel::Phi).len(), sample.len());
    assert!(sample
        .channel(KinematicChannel::Phi)
        .iter()
        .all(|w| *w == 1.5));
}

#[test]
fn external_sources_are_processed_in_shards() {
    let config = {
        let mut config = mc_config(0, 3);
        config.monte_carlo = None;
        config
    };
    let output = process_sharded(&config, 10, |event, sample| {
        for k in 0..=event {
            sample.push(0.4 * k as f64);
        }
        Ok(())
    })
    .unwrap();
    assert_eq!(output.diagnostics.events(), 10);
    assert_eq!(output.diagnostics.empty_events(), 0);
    let data = output.profiles.profile(ResultSet::Data).unwrap();
    assert_eq!(data.bin(0).unwrap().entries(), 9);
    assert_eq!(data.bin(2).unwrap().entries(), 7);
    assert!(run_monte_carlo(&config).is_err());
}

#[test]
fn shard_ranges_cover_events_once() {
    let ranges = shard_ranges(10, 3);
    assert_eq!(ranges, vec![0..4, 4..7, 7..10]);
    assert_eq!(shard_ranges(2, 8), vec![0..1, 1..2]);
    assert_eq!(shard_ranges(0, 4), vec![0..0]);
}

#[test]
fn report_survives_json_round_trip() {
    let config = mc_config(6, 2);
    let output = run_monte_carlo(&config).unwrap();
    let report = RunReport::new(&config, &output).unwrap();
    assert_eq!(report.provenance.events, 6);
    assert_eq!(report.provenance.seed, 7);

    let bytes = to_canonical_json_bytes(&report).unwrap();
    let decoded: RunReport = from_json_slice(&bytes).unwrap();
    assert_eq!(decoded.provenance, report.provenance);
    assert_eq!(decoded.diagnostics, report.diagnostics);
    for set in ResultSet::ALL {
        let (before, after) = (report.result_set(set), decoded.result_set(set));
        assert_eq!(before.len(), 4);
        assert_eq!(after.len(), before.len());
        for (a, b) in before.iter().zip(after) {
            assert_eq!(a.label, b.label);
            assert_eq!(a.entries, b.entries);
            assert_eq!(a.mean.is_some(), b.mean.is_some());
            if let (Some(x), Some(y)) = (a.mean, b.mean) {
                assert_relative_eq!(x, y, max_relative = 1e-12);
            }
        }
    }

    let err = from_json_slice::<RunReport>(b"{ \"schema_version\": 1 }").unwrap_err();
    assert_eq!(err.info().code, "json-deserialize");
}
