use async_trait::async_trait;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use feed_etl::bucket::{self, Bucket, FlushMode};
use feed_etl::load::{Sink, SinkError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone)]
struct MockRecord {
    id: u64,
    payload: String,
}

#[derive(Default)]
struct CountingSink {
    written: AtomicUsize,
}

#[async_trait]
impl Sink<MockRecord> for CountingSink {
    async fn write_one(
        &self,
        _cancel: &CancellationToken,
        item: &MockRecord,
    ) -> Result<(), SinkError> {
        std::hint::black_box((item.id, item.payload.len()));
        self.written.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    async fn write_many(
        &self,
        _cancel: &CancellationToken,
        items: &[MockRecord],
    ) -> Result<(), SinkError> {
        std::hint::black_box(items.iter().map(|item| item.payload.len()).sum::<usize>());
        self.written.fetch_add(items.len(), Ordering::Relaxed);
        Ok(())
    }
}

fn bulk_config(batch_size: usize) -> Arc<bucket::Config> {
    Arc::new(
        bucket::ConfigBuilder::default()
            .mode(FlushMode::Bulk)
            .batch_size(batch_size)
            .flush_interval(Duration::from_secs(30))
            .build()
            .unwrap(),
    )
}

// Pushes `count` records through one channel into the engine and waits for it to drain.
async fn drain(config: Arc<bucket::Config>, count: u64, channel_size: usize) -> usize {
    let bucket: Bucket<MockRecord> = Bucket::new(config);
    let sink = CountingSink::default();
    let (tx, rx) = mpsc::channel(channel_size);

    let producer = tokio::spawn(async move {
        for id in 0..count {
            let record = MockRecord {
                id,
                payload: format!("record-{id}"),
            };
            if tx.send(record).await.is_err() {
                break;
            }
        }
    });

    bucket
        .run(&CancellationToken::new(), &sink, rx)
        .await
        .unwrap();
    producer.await.unwrap();
    sink.written.load(Ordering::Relaxed)
}

fn bench_single_vs_bulk(c: &mut Criterion) {
    let mut group = c.benchmark_group("flush_engine_modes");
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let records = 5_000u64;

    group.throughput(Throughput::Elements(records));
    group.bench_function("single", |b| {
        b.to_async(&runtime).iter(|| async move {
            let config = Arc::new(bucket::ConfigBuilder::default().build().unwrap());
            drain(config, records, 10).await
        });
    });
    group.bench_function("bulk_100", |b| {
        b.to_async(&runtime)
            .iter(|| async move { drain(bulk_config(100), records, 10).await });
    });
    group.finish();
}

fn bench_batch_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("flush_engine_batch_sizes");
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let records = 5_000u64;

    for batch_size in [10usize, 50, 100, 500] {
        group.throughput(Throughput::Elements(records));
        group.bench_with_input(
            BenchmarkId::new("batch_size", batch_size),
            &batch_size,
            |b, &batch_size| {
                b.to_async(&runtime)
                    .iter(|| async move { drain(bulk_config(batch_size), records, 10).await });
            },
        );
    }
    group.finish();
}

fn bench_channel_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("flush_engine_channel_sizes");
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let records = 5_000u64;

    for channel_size in [1usize, 10, 100, 1000] {
        group.throughput(Throughput::Elements(records));
        group.bench_with_input(
            BenchmarkId::new("channel_size", channel_size),
            &channel_size,
            |b, &channel_size| {
                b.to_async(&runtime)
                    .iter(|| async move { drain(bulk_config(100), records, channel_size).await });
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_single_vs_bulk,
    bench_batch_sizes,
    bench_channel_sizes
);
criterion_main!(benches);
