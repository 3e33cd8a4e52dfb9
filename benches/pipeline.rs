use criterion::{black_box, criterion_group, criterion_main, Criterion};

use shearflow_rs::analysis::run;
use shearflow_rs::config::AnalysisConfig;
use shearflow_rs::shear::solve;

fn benchmark(c: &mut Criterion) {
    let config = AnalysisConfig::default();
    c.bench_function("Full pipeline", |b| b.iter(|| run(black_box(&config))));

    let analysis = run(&config).expect("reference case solves");
    c.bench_function("Shear flow solve", |b| {
        b.iter(|| {
            solve(
                black_box(&analysis.contour),
                black_box(&analysis.properties),
                black_box(&config.load),
            )
        })
    });
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
