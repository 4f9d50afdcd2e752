// Standalone benchmark for the row codec and line reader
//
// Run: cargo bench --bench codec_bench
//
// Compares:
//   - encode with minimal vs forced quoting
//   - decode with the serial vs parallel unescape path (wide rows)
//   - end-to-end reading through the line reader at several buffer sizes

use std::hint::black_box;
use std::io::Cursor;
use std::time::{Duration, Instant};

use csvline::codec::encode_row_into;
use csvline::{CsvConfig, CsvReader, QuoteStyle, RowDecoder};

/// Generate clean rows (no fields need quoting)
fn generate_clean_rows(num_rows: usize, fields_per_row: usize) -> Vec<Vec<String>> {
    (0..num_rows)
        .map(|i| {
            (0..fields_per_row)
                .map(|j| format!("field_{}_{}_value", i, j))
                .collect()
        })
        .collect()
}

/// Generate mixed rows (some fields need quoting)
fn generate_mixed_rows(num_rows: usize, fields_per_row: usize) -> Vec<Vec<String>> {
    (0..num_rows)
        .map(|i| {
            (0..fields_per_row)
                .map(|j| match j % 5 {
                    0 => format!("plain_value_{}", i),
                    1 => format!("has,comma_{}", i),
                    2 => format!("has\"quote_{}", i),
                    3 => format!("has\nnewline_{}", i),
                    _ => format!("normal_field_{}_{}", i, j),
                })
                .collect()
        })
        .collect()
}

fn encode_all(rows: &[Vec<String>], style: QuoteStyle) -> String {
    let mut out = String::new();
    for row in rows {
        encode_row_into(&mut out, row, ',', "\n", style);
    }
    out
}

struct BenchResult {
    name: String,
    iterations: u64,
    total_time: Duration,
    work_size: usize,
}

impl BenchResult {
    fn avg_ns(&self) -> f64 {
        self.total_time.as_nanos() as f64 / self.iterations as f64
    }

    fn throughput_mb_s(&self) -> f64 {
        let secs_per_iter = self.avg_ns() / 1_000_000_000.0;
        self.work_size as f64 / secs_per_iter / 1_000_000.0
    }
}

/// Time `f`, which returns the number of bytes it processed.
fn bench_fn<F: Fn() -> usize>(name: &str, f: F, warmup_secs: f64, bench_secs: f64) -> BenchResult {
    let warmup_deadline = Instant::now() + Duration::from_secs_f64(warmup_secs);
    let mut work_size = 0;
    while Instant::now() < warmup_deadline {
        work_size = black_box(f());
    }

    let mut iterations: u64 = 0;
    let start = Instant::now();
    let deadline = start + Duration::from_secs_f64(bench_secs);
    while Instant::now() < deadline {
        black_box(f());
        iterations += 1;
    }

    BenchResult {
        name: name.to_string(),
        iterations,
        total_time: start.elapsed(),
        work_size,
    }
}

fn print_results(label: &str, results: &[BenchResult]) {
    println!("\n--- {} ---", label);
    let max_name_len = results.iter().map(|r| r.name.len()).max().unwrap_or(0);
    let fastest_ns = results
        .iter()
        .map(|r| r.avg_ns())
        .fold(f64::MAX, f64::min);

    for r in results {
        let avg = r.avg_ns();
        let speedup = avg / fastest_ns;
        let marker = if (speedup - 1.0).abs() < 0.01 { " (fastest)" } else { "" };
        println!(
            "  {:<width$}  {:>10.2} µs/iter  {:>8.1} MB/s  {:>6.2}x{}",
            r.name,
            avg / 1000.0,
            r.throughput_mb_s(),
            speedup,
            marker,
            width = max_name_len,
        );
    }
}

fn bench_encode(label: &str, rows: &[Vec<String>], warmup: f64, time: f64) {
    let results = vec![
        bench_fn("Minimal quoting", || encode_all(rows, QuoteStyle::Necessary).len(), warmup, time),
        bench_fn("Forced quoting", || encode_all(rows, QuoteStyle::Always).len(), warmup, time),
    ];
    print_results(label, &results);
}

fn bench_decode_wide(label: &str, fields: usize, width: usize, warmup: f64, time: f64) {
    let row: Vec<String> = (0..fields)
        .map(|i| format!("\"{:x>width$}\"\"{}\"", "", i, width = width))
        .collect();
    let line = row.join(",");

    // Both paths must agree before timing them
    let serial = RowDecoder::new(',').decode(&line).unwrap();
    let parallel = RowDecoder::new(',')
        .with_parallel_unescape(true)
        .decode(&line)
        .unwrap();
    assert_eq!(serial, parallel, "parallel decode differs from serial!");

    let results = vec![
        bench_fn(
            "Serial unescape",
            || {
                let mut decoder = RowDecoder::new(',');
                decoder.decode(&line).unwrap();
                line.len()
            },
            warmup,
            time,
        ),
        bench_fn(
            "Parallel unescape",
            || {
                let mut decoder = RowDecoder::new(',').with_parallel_unescape(true);
                decoder.decode(&line).unwrap();
                line.len()
            },
            warmup,
            time,
        ),
    ];
    print_results(label, &results);
}

fn bench_read(label: &str, input: &str, warmup: f64, time: f64) {
    let results: Vec<BenchResult> = [64usize, 1024, 8192, 65536]
        .iter()
        .map(|&cap| {
            bench_fn(
                &format!("Buffer {} B", cap),
                || {
                    let config = CsvConfig::new().with_buffer_capacity(cap);
                    let reader =
                        CsvReader::with_config(Cursor::new(input.as_bytes()), &config).unwrap();
                    let mut rows = 0usize;
                    for row in reader {
                        rows += row.unwrap().len();
                    }
                    black_box(rows);
                    input.len()
                },
                warmup,
                time,
            )
        })
        .collect();
    print_results(label, &results);
}

fn main() {
    println!("=== csvline Codec Benchmark ===");

    let warmup = 0.5;
    let time = 2.0;

    let clean = generate_clean_rows(10_000, 10);
    bench_encode("Encode 10K rows x 10 fields (clean)", &clean, warmup, time);

    let mixed = generate_mixed_rows(10_000, 10);
    bench_encode("Encode 10K rows x 10 fields (mixed)", &mixed, warmup, time);

    bench_decode_wide("Decode 1 row x 64 fields x 512 B", 64, 512, warmup, time);
    bench_decode_wide("Decode 1 row x 4096 fields x 64 B", 4096, 64, warmup, time);

    let input = encode_all(&mixed, QuoteStyle::Necessary);
    bench_read("Read 10K mixed rows", &input, warmup, time);

    println!("\nDone.");
}
