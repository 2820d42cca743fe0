use criterion::{Criterion, criterion_group, criterion_main};
use spam_predictor::neighbors::{SAMPLE_POINTS, nearest};
use spam_predictor::{Corpus, SpamModel};
use std::path::Path;

fn trained() -> (Corpus, SpamModel) {
    let corpus = Corpus::from_csv(Path::new("data/standardSpamData.csv")).unwrap();
    let (model, _) = SpamModel::train(&corpus, 0.25, Some(42)).unwrap();
    (corpus, model)
}

fn bench_predict_single(c: &mut Criterion) {
    let (_, model) = trained();

    c.bench_function("predict single message", |b| {
        b.iter(|| {
            let _ = model.predict(&["WINNER!! Claim your free prize now, call 09061701461"]);
        })
    });
}

fn bench_bulk_prediction(c: &mut Criterion) {
    let (corpus, model) = trained();
    let texts: Vec<&str> = corpus
        .samples()
        .iter()
        .cycle()
        .take(10_000)
        .map(|s| s.text.as_str())
        .collect();

    c.bench_function("bulk predict 10k messages", |b| {
        b.iter(|| {
            let _ = model.predict(&texts);
        });
    });
}

fn bench_nearest(c: &mut Criterion) {
    c.bench_function("nearest 3 of sample points", |b| {
        b.iter(|| {
            let _ = nearest(&SAMPLE_POINTS, &SAMPLE_POINTS[0], 3);
        })
    });
}

criterion_group!(benches, bench_predict_single, bench_bulk_prediction, bench_nearest);
criterion_main!(benches);
