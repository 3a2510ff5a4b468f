//! # Assignment Engine Benchmarks
//!
//! | Operation | Expectation |
//! |-----------|-------------|
//! | Full draw, 7 people | well under 1ms |
//! | Full draw, 50 people | completion search stays within budget |
//! | Verify, 50 people | linear in assignments |
//! | Record fingerprint | dominated by JSON encoding |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gx_01_assignment_engine::{
    AssignmentApi, AssignmentService, AssignmentState, EngineConfig, StdRandomSource,
};
use gx_02_state_store::fingerprint;
use gx_tests::fixtures::{cyclic_roster, family};
use shared_types::Roster;

fn full_draw(service: &AssignmentService<StdRandomSource>, roster: &Roster) -> AssignmentState {
    let mut state = service.initialize();
    for giver in roster.participants() {
        if let Ok(assignment) = service.request_assignment(&state, giver) {
            state = assignment.state;
        }
    }
    state
}

fn bench_full_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("gx-01-full-draw");

    let family = family();
    let service = AssignmentService::new(family.clone(), StdRandomSource::from_seed(1));
    group.bench_function("family_7", |b| {
        b.iter(|| black_box(full_draw(&service, &family)))
    });

    for size in [10usize, 25, 50] {
        let roster = cyclic_roster(size);
        group.throughput(Throughput::Elements(size as u64));

        let searching = AssignmentService::new(roster.clone(), StdRandomSource::from_seed(1));
        group.bench_with_input(BenchmarkId::new("with_search", size), &roster, |b, roster| {
            b.iter(|| black_box(full_draw(&searching, roster)))
        });

        let one_step = AssignmentService::with_config(
            roster.clone(),
            StdRandomSource::from_seed(1),
            EngineConfig {
                completion_search_budget: 0,
                ..Default::default()
            },
        );
        group.bench_with_input(BenchmarkId::new("one_step", size), &roster, |b, roster| {
            b.iter(|| black_box(full_draw(&one_step, roster)))
        });
    }

    group.finish();
}

fn bench_verify_and_fingerprint(c: &mut Criterion) {
    let mut group = c.benchmark_group("gx-verify");

    let roster = cyclic_roster(50);
    let service = AssignmentService::new(roster.clone(), StdRandomSource::from_seed(7));
    let state = full_draw(&service, &roster);

    group.bench_function("verify_50", |b| b.iter(|| black_box(service.verify(&state))));
    group.bench_function("fingerprint_50", |b| {
        b.iter(|| black_box(fingerprint(&state)))
    });

    group.finish();
}

criterion_group!(benches, bench_full_draw, bench_verify_and_fingerprint);
criterion_main!(benches);
