use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kube::core::{DynamicObject, ObjectMeta, TypeMeta};
use serde_json::json;

use opa_scorecard_exporter::{parse_constraint, synthesize, ConstraintInstance};

fn constraint_doc(name: &str, violation_count: usize) -> DynamicObject {
    let violations: Vec<_> = (0..violation_count)
        .map(|i| {
            json!({
                "kind": "Pod",
                "name": format!("pod-{}", i),
                "namespace": "default",
                "message": "missing required label owner",
                "enforcementAction": "deny",
            })
        })
        .collect();

    DynamicObject {
        types: Some(TypeMeta {
            api_version: "constraints.gatekeeper.sh/v1beta1".to_string(),
            kind: "K8sRequiredLabels".to_string(),
        }),
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            ..Default::default()
        },
        data: json!({
            "spec": {"enforcementAction": "deny"},
            "status": {
                "totalViolations": violation_count,
                "violations": violations,
            },
        }),
    }
}

fn constraint_parsing_benchmark(c: &mut Criterion) {
    let doc = constraint_doc("must-have-owner", 50);

    c.bench_function("parse_constraint_50_violations", |b| {
        b.iter(|| black_box(parse_constraint(black_box(&doc), "K8sRequiredLabels")))
    });
}

fn synthesis_benchmark(c: &mut Criterion) {
    let instances: Vec<ConstraintInstance> = (0..20)
        .map(|i| {
            parse_constraint(&constraint_doc(&format!("constraint-{}", i), 25), "K8sRequiredLabels")
                .map(|parsed| parsed.instance)
                .unwrap()
        })
        .collect();

    c.bench_function("synthesize_20_constraints", |b| {
        b.iter(|| black_box(synthesize(black_box(&instances))))
    });
}

criterion_group!(benches, constraint_parsing_benchmark, synthesis_benchmark);
criterion_main!(benches);
