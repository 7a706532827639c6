use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use search_core::{with_status, DocumentStatus, ExecutionPolicy, SearchServer};

const WORDS: [&str; 16] = [
    "cat", "dog", "bird", "city", "house", "tail", "fluffy", "grey", "big", "rat", "curly", "hair",
    "collar", "fancy", "sparrow", "leash",
];

fn corpus(documents: usize) -> SearchServer {
    let mut server = SearchServer::from_stop_words_text("and with in the").unwrap();
    for id in 0..documents {
        // Cheap deterministic mix of vocabulary per document
        let text: Vec<&str> = (0..12).map(|i| WORDS[(id * 7 + i * i * 3 + id / 5) % WORDS.len()]).collect();
        let rating = (id % 11) as i32 - 5;
        server.add_document(id as i32, &text.join(" "), DocumentStatus::Actual, &[rating]).unwrap();
    }
    server
}

fn bench_find_top(c: &mut Criterion) {
    let server = corpus(10_000);
    let query = "cat fluffy curly sparrow leash grey -rat -collar";
    let mut group = c.benchmark_group("find_top_documents");
    for (name, policy) in [("seq", ExecutionPolicy::Sequential), ("par", ExecutionPolicy::Parallel)] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &policy, |b, &policy| {
            b.iter(|| {
                server
                    .find_top_documents_policy(policy, query, with_status(DocumentStatus::Actual))
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_document");
    for (name, policy) in [("seq", ExecutionPolicy::Sequential), ("par", ExecutionPolicy::Parallel)] {
        group.bench_function(name, |b| {
            b.iter_batched(
                || corpus(1_000),
                |mut server| {
                    for id in 0..100 {
                        server.remove_document_policy(policy, id);
                    }
                    server
                },
                criterion::BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_find_top, bench_remove);
criterion_main!(benches);
