//! Dispatch Benchmarks
//!
//! Compares plain data property access with access routed through a
//! property controller.

use criterion::{Criterion, criterion_group, criterion_main};
use otter_object::{Getter, JsObject, PropertyKey, Value};
use otter_property::{Callback, DescriptorRecord, PropertyController};
use std::hint::black_box;
use std::sync::Arc;

/// Benchmark: plain data property vs backing-slot passthrough vs getter
fn bench_get(c: &mut Criterion) {
    let key = PropertyKey::string("x");

    c.bench_function("get_plain_data", |b| {
        let obj = JsObject::new();
        obj.set(key.clone(), Value::from(1)).unwrap();
        b.iter(|| black_box(obj.get(&key).unwrap()));
    });

    c.bench_function("get_backing_slot", |b| {
        let obj = Arc::new(JsObject::new());
        let mut ctl = PropertyController::new(obj.clone(), key.clone());
        ctl.attach().unwrap();
        obj.set(key.clone(), Value::from(1)).unwrap();
        b.iter(|| black_box(obj.get(&key).unwrap()));
    });

    c.bench_function("get_through_getter", |b| {
        let obj = Arc::new(JsObject::new());
        let mut ctl = PropertyController::new(obj.clone(), key.clone());
        ctl.add_descriptor(DescriptorRecord::new().getter(Getter::new(|_| Ok(Value::from(1)))))
            .unwrap();
        ctl.attach().unwrap();
        b.iter(|| black_box(obj.get(&key).unwrap()));
    });
}

/// Benchmark: toggling activation on a deep chain
fn bench_toggle(c: &mut Criterion) {
    c.bench_function("toggle_on_get_8_layers", |b| {
        let obj = Arc::new(JsObject::new());
        let mut ctl = PropertyController::new(obj, "x");
        for i in 0..8 {
            ctl.add_descriptor(
                DescriptorRecord::new().getter(Getter::new(move |_| Ok(Value::from(i)))),
            )
            .unwrap();
        }
        ctl.attach().unwrap();

        b.iter(|| {
            ctl.deactivate(Callback::OnGet).unwrap();
            ctl.activate(Callback::OnGet).unwrap();
        });
    });
}

criterion_group!(benches, bench_get, bench_toggle);
criterion_main!(benches);
