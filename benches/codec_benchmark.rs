//! Benchmarks for the set-line codec
//!
//! This benchmark suite measures:
//! - Encoding resources with many repeated blocks
//! - Decoding large `display set relative` outputs
//! - A full create through the provider against an in-memory device

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use junos_resources::config::SessionSettings;
use junos_resources::provider::Provider;
use junos_resources::resources::security_policy::PolicyRule;
use junos_resources::resources::{Resource, SecurityPolicy};
use junos_resources::session::MemoryDevice;
use tokio::runtime::Runtime;

// ============================================================================
// Test Data Generators
// ============================================================================

/// A zone pair with `count` policies.
fn generate_policy(count: usize) -> SecurityPolicy {
    SecurityPolicy {
        from_zone: "trust".to_string(),
        to_zone: "untrust".to_string(),
        policy: (0..count)
            .map(|i| {
                let mut rule = PolicyRule::permit(
                    format!("rule-{}", i),
                    &["any"],
                    &["any"],
                    &["junos-http", "junos-https"],
                );
                rule.count = i % 2 == 0;
                rule.log_init = i % 3 == 0;
                rule
            })
            .collect(),
    }
}

/// Device output for `policy`, as the device would return it.
fn generate_output(policy: &SecurityPolicy) -> String {
    let prefix = "set security policies from-zone trust to-zone untrust ";
    let mut raw = String::from("\n<configuration-output>\n");
    for line in policy.set_lines().unwrap_or_default() {
        raw.push_str("set ");
        raw.push_str(line.strip_prefix(prefix).unwrap_or(&line));
        raw.push('\n');
    }
    raw.push_str("</configuration-output>\n");
    raw
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    for size in [10, 100, 1000] {
        let policy = generate_policy(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("security_policy", size), &policy, |b, p| {
            b.iter(|| black_box(p.set_lines().unwrap()))
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    for size in [10, 100, 1000] {
        let raw = generate_output(&generate_policy(size));
        group.throughput(Throughput::Bytes(raw.len() as u64));
        group.bench_with_input(BenchmarkId::new("security_policy", size), &raw, |b, raw| {
            b.iter(|| black_box(SecurityPolicy::from_config(raw, "trust_-_untrust").unwrap()))
        });
    }
    group.finish();
}

fn bench_provider_create(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let policy = generate_policy(100);

    c.bench_function("provider_create_100_policies", |b| {
        b.to_async(&rt).iter(|| async {
            let mut provider = Provider::new(MemoryDevice::new("bench"), SessionSettings::default());
            black_box(provider.create(&policy).await.unwrap())
        })
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_provider_create);
criterion_main!(benches);
