#![allow(missing_docs, clippy::cast_possible_wrap)]

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use taskboard_core::{ListSelector, NewTask, Priority, Task, TaskFilter, TaskId};
use time::macros::date;
use time::{Duration, OffsetDateTime};

fn build_tasks(count: usize) -> Vec<Task> {
    let base = OffsetDateTime::UNIX_EPOCH;
    (0..count)
        .map(|idx| {
            let priority = Priority::ALL[idx % Priority::ALL.len()];
            let mut input = NewTask::new(format!("task {idx} milk"))
                .with_priority(priority)
                .with_list(if idx % 2 == 0 { "work" } else { "home" });
            if idx % 3 == 0 {
                let offset = Duration::days((idx % 30) as i64);
                input = input.with_due_date(date!(2024 - 01 - 01) + offset);
            }
            let created_at = base + Duration::seconds(idx as i64);
            let mut task = Task::create(input, TaskId::from(idx.to_string()), created_at);
            task.completed = idx % 5 == 0;
            task
        })
        .collect()
}

fn derive_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("task_filter_apply");
    let today = date!(2024 - 01 - 10);
    for &count in &[64usize, 512, 4096] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let filter = TaskFilter::new(ListSelector::List("work".into()), "MILK");
            b.iter_batched(
                || build_tasks(count),
                |tasks| {
                    black_box(filter.apply(&tasks, today));
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, derive_benchmark);
criterion_main!(benches);
