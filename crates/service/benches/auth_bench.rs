use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use service::accounts::domain::{LoginInput, RegisterInput};
use service::accounts::AccountDirectory;
use service::credentials::Argon2Hasher;
use service::phrases::domain::PhraseInput;
use service::phrases::PhraseRegistry;
use service::repo::MemoryStore;

fn bench_authenticate(c: &mut Criterion) {
    let store = Arc::new(MemoryStore::default());
    let dir = AccountDirectory::new(store.clone(), Arc::new(Argon2Hasher::default()));

    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(dir.register(RegisterInput {
        handle: "bench".into(),
        display_name: "Bench".into(),
        secret: "Benchmark1".into(),
    }))
    .unwrap();

    c.bench_function("account_authenticate", |b| {
        b.iter(|| {
            rt.block_on(dir.authenticate(LoginInput { handle: "bench".into(), secret: "Benchmark1".into() })).unwrap();
        });
    });
}

fn bench_phrase_list(c: &mut Criterion) {
    let store = Arc::new(MemoryStore::default());
    let account = store.seed_account("bench");
    let reg = PhraseRegistry::new(store);

    let rt = tokio::runtime::Runtime::new().unwrap();
    for i in 0..200 {
        rt.block_on(reg.insert(account, PhraseInput { key: format!("key-{i}"), value: format!("value {i}") })).unwrap();
    }

    c.bench_function("phrase_list_200", |b| {
        b.iter(|| rt.block_on(reg.list(account)).unwrap());
    });
}

criterion_group!(benches, bench_authenticate, bench_phrase_list);
criterion_main!(benches);
