// Copyright (C) 2025 Ethan Uppal. All rights reserved.

//! End-to-end runs of the demo programs through the loader.

use ember_vm::{
    loader,
    machine::{Machine, Status},
};

fn run_source(source: &str) -> Vec<u8> {
    let image = loader::parse_source(source).expect("demo source parses");
    let mut machine = Machine::new();
    machine.load(&image).expect("demo fits in memory");
    let mut out = Vec::new();
    machine.run(&mut out).expect("demo runs without faults");
    assert_eq!(Status::Halted, machine.status());
    out
}

#[test]
fn print8_emits_exactly_one_eight() {
    assert_eq!(vec![8], run_source(include_str!("../../demos/print8.ember")));
}

#[test]
fn countdown_emits_five_through_one() {
    assert_eq!(
        vec![5, 4, 3, 2, 1],
        run_source(include_str!("../../demos/countdown.ember"))
    );
}
