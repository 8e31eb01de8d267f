//! Benchmarks for whole-program conversion
//!
//! Measures throughput of the cycle linearizer on a drilling grid and of the
//! Mach3 arc cleanup on an arc-heavy program.

use criterion::{criterion_group, criterion_main, Criterion};
use cyclekit_engine::{CycleLinearizer, Mach3Converter, ProgramConverter};
use std::hint::black_box;

fn drilling_grid(columns: usize, rows: usize) -> String {
    let mut program = String::from("G21 G90\nM3 S2400\nG0 Z10\nG99\n");
    for row in 0..rows {
        for column in 0..columns {
            let cycle = match (row + column) % 3 {
                0 => "G81",
                1 => "G83",
                _ => "G73",
            };
            program.push_str(&format!(
                "{} X{} Y{} Z-12 R1 Q1.5 F120\n",
                cycle,
                column * 10,
                row * 10
            ));
        }
    }
    program.push_str("G80\nM30\n");
    program
}

fn arc_program(arcs: usize) -> String {
    let mut program = String::from("G17 G90\nM3 S8000\n");
    for i in 0..arcs {
        program.push_str(&format!("G2 X{} Y0 I2.5 J0 K0\n\n", i * 5));
    }
    program
}

fn bench_linearize(c: &mut Criterion) {
    let program = drilling_grid(20, 20);
    let converter = CycleLinearizer::default();

    c.bench_function("linearize_400_cycles", |b| {
        b.iter(|| {
            let report = converter.convert(black_box(&program));
            black_box(report)
        })
    });
}

fn bench_mach3(c: &mut Criterion) {
    let program = arc_program(2000);
    let converter = Mach3Converter::default();

    c.bench_function("mach3_2000_arcs", |b| {
        b.iter(|| {
            let report = converter.convert(black_box(&program));
            black_box(report)
        })
    });
}

criterion_group!(benches, bench_linearize, bench_mach3);
criterion_main!(benches);
