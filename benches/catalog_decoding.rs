use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use spectro_ingest::IngestionConfig;
use spectro_ingest::export::catalog_to_dataframe;
use spectro_ingest::parsers::{decode_catalog, decode_partition_function};

/// Synthetic asymmetric-top ladder with `count` lines
fn generate_catalog(count: usize) -> String {
    (0..count)
        .map(|i| {
            let n = (i % 90) as i32 + 1;
            let ka = (i % 7) as i32;
            let frequency = 10_000.0 + i as f64 * 1.2345;
            let lower_energy = (n * (n - 1)) as f64 * 0.6;
            format!(
                "{:>13.4}{:>8.4}{:>8.4}{:>2}{:>10.4}{:>3}{:>7}{:>4}{:>2}{:>2}{:>2}      {:>2}{:>2}{:>2}      ",
                frequency,
                0.005,
                -4.5,
                3,
                lower_energy,
                2 * n + 1,
                30501,
                303,
                n,
                ka,
                n - ka.min(n),
                n - 1,
                ka,
                (n - 1 - ka).max(0)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn bench_decode(c: &mut Criterion) {
    let partition =
        decode_partition_function("300.000 2883.1190\n150.000 1020.4510\n").expect("qpart");
    let config = IngestionConfig::from_label_str("N, Ka, Kc", false, None);

    let mut group = c.benchmark_group("decode_catalog");
    for count in [1_000, 10_000] {
        let catalog = generate_catalog(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &catalog, |b, text| {
            b.iter(|| decode_catalog(black_box(text), &config, &partition).expect("decode"))
        });
    }
    group.finish();

    let records = decode_catalog(&generate_catalog(10_000), &config, &partition).expect("decode");
    c.bench_function("catalog_to_dataframe/10000", |b| {
        b.iter(|| catalog_to_dataframe(black_box(&records), config.labels()).expect("frame"))
    });
}

criterion_group!(benches, bench_decode);
criterion_main!(benches);
