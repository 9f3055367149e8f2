mod common;

use std::fs;
use std::sync::Mutex;

use common::synthetic_image::{scratch_dir, vertical_edge};
use log::{LevelFilter, Log, Metadata, Record};
use sobel_bench::{BatchConfig, BatchDriver, ReferenceKernel};

static LINES: Mutex<Vec<String>> = Mutex::new(Vec::new());

struct Capture;

impl Log for Capture {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        LINES.lock().unwrap().push(record.args().to_string());
    }

    fn flush(&self) {}
}

static CAPTURE: Capture = Capture;

fn position(lines: &[String], needle: &str) -> usize {
    lines
        .iter()
        .position(|line| line.contains(needle))
        .unwrap_or_else(|| panic!("no log line containing {needle:?} in {lines:#?}"))
}

#[test]
fn failures_are_logged_before_the_next_image() {
    log::set_logger(&CAPTURE).unwrap();
    log::set_max_level(LevelFilter::Info);

    let root = scratch_dir("log-order");
    let input = root.join("images");
    fs::create_dir(&input).unwrap();
    fs::write(input.join("a_corrupt.png"), b"not an image").unwrap();
    vertical_edge(8, 8).save(input.join("b.png")).unwrap();

    let config =
        BatchConfig { input_dir: input, output_dir: root.join("out"), ..Default::default() };
    let summary = BatchDriver::new(config, ReferenceKernel, ReferenceKernel).run().unwrap();
    assert_eq!(summary.processed(), 1);
    assert_eq!(summary.failed.len(), 1);

    let lines = LINES.lock().unwrap().clone();
    let failure = position(&lines, "Failed to load a_corrupt.png");
    let loaded = position(&lines, "Loaded b.png");
    let timing = position(&lines, "b.png | CPU:");
    assert!(failure < loaded, "failure logged after the next image: {lines:#?}");
    assert!(loaded < timing);

    fs::remove_dir_all(root).unwrap();
}
