use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use kmeans_scaling::{thread_progression, AccumulationStrategy, KMeans, KMeansHooks, RunConfig};
use std::time::Duration;

fn benchmark_update_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("centroid_update");
    group.sample_size(10);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    let num_points = 500_000;
    group.throughput(Throughput::Elements(num_points as u64));
    for threads in thread_progression(kmeans_scaling::default_num_threads()) {
        for strategy in [AccumulationStrategy::DirectAtomic, AccumulationStrategy::LocalMerge] {
            let config = RunConfig::default()
                .with_num_points(num_points)
                .with_k(50)
                .with_num_threads(threads)
                .with_strategy(strategy);
            let kmean = KMeans::new(config).unwrap();
            let mut store = kmean.generate::<f64>(1337).unwrap();
            kmean.update_cluster_assignments(&mut store);

            group.bench_with_input(BenchmarkId::new(strategy.to_string(), threads), &threads, |b, _| {
                b.iter(|| kmean.accumulate(black_box(&store)))
            });
        }
    }
    group.finish();
}

fn benchmark_lloyd(c: &mut Criterion) {
    let mut group = c.benchmark_group("lloyd");
    group.sample_size(10);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(3));

    for threads in thread_progression(kmeans_scaling::default_num_threads()) {
        let config = RunConfig::default()
            .with_num_points(200_000)
            .with_k(25)
            .with_max_iterations(10)
            .with_num_threads(threads);
        let kmean = KMeans::new(config).unwrap();
        let store = kmean.generate::<f64>(42).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(threads), &threads, |b, _| {
            b.iter(|| {
                let mut store = store.clone();
                kmean.kmeans_lloyd(&mut store, &KMeansHooks::default())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_update_strategies, benchmark_lloyd);
criterion_main!(benches);
