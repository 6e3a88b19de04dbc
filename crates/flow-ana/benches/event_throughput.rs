use criterion::{criterion_group, criterion_main, Criterion};
use flow_ana::{AnalysisConfig, FlowTask, McEventGenerator, MonteCarloConfig, Multiplicity};
use flow_core::{CorrelatorSpec, ParticleSample};

fn sample_config() -> AnalysisConfig {
    let mut config = AnalysisConfig::new(
        [vec![2, -2], vec![2, 2, -2, -2], vec![2, 2, 2, -2, -2, -2], vec![3, 3, 3, 3, -3, -3, -3, -3]]
            .into_iter()
            .map(|h| CorrelatorSpec::new(h).unwrap())
            .collect(),
    );
    config.monte_carlo = Some(MonteCarloConfig {
        events: 1,
        multiplicity: Multiplicity::Fixed { fixed: 1_000 },
        flow_harmonics: vec![0.0, 0.08, 0.03],
        acceptance: Default::default(),
    });
    config
}

fn bench_process_event(c: &mut Criterion) {
    let config = sample_config();
    let generator = McEventGenerator::new(config.monte_carlo.clone().unwrap(), 3).unwrap();
    let mut sample = ParticleSample::new();
    generator.generate(0, &mut sample).unwrap();
    let mut task = FlowTask::from_config(&config).unwrap();

    c.bench_function("process_event_1000", |b| {
        b.iter(|| task.process_event(&sample).unwrap())
    });
    c.bench_function("generate_event_1000", |b| {
        b.iter(|| generator.generate(1, &mut sample).unwrap())
    });
}

criterion_group!(benches, bench_process_event);
criterion_main!(benches);
