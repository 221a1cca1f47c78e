use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

#[derive(Clone, Copy)]
enum Orientation {
    Forward,
    /// Rows written from the right end of the chromosome.
    ReversedRows,
    /// Query coordinates run backwards (reverse complement).
    Inverted,
}

/// Short arm and long arm, separated by a gap wider than the default eps.
const ARMS: [(f64, f64); 2] = [(1.0e6, 4.8e7), (8.5e7, 1.45e8)];
const QUERY_LEN: f64 = 1.5e8;
const NOISE_X: [f64; 3] = [1.9e8, 2.3e8, 2.7e8];

fn generate_points(rng: &mut SimpleRng, step: f64, orientation: Orientation) -> Vec<(f64, f64)> {
    let mut points = Vec::new();
    for &(start, end) in &ARMS {
        let mut x = start;
        while x <= end {
            let jitter = rng.gauss(0.0, step * 0.2);
            let y = x * 0.97 + rng.gauss(0.0, 4e5);
            points.push((x + jitter, y));
            x += step;
        }
    }
    for &x in &NOISE_X {
        points.push((x, rng.next_f64() * QUERY_LEN));
    }

    match orientation {
        Orientation::Forward => {}
        Orientation::ReversedRows => points.reverse(),
        Orientation::Inverted => {
            for p in &mut points {
                p.1 = QUERY_LEN - p.1;
            }
        }
    }
    points
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let out_dir = args.get(1).map(String::as_str).unwrap_or("sample_data");
    let chrom = args.get(2).map(String::as_str).unwrap_or("1");

    std::fs::create_dir_all(out_dir).expect("Failed to create output directory");
    let mut rng = SimpleRng::new(42);

    let populations = [
        ("PJL", Orientation::Forward),
        ("BEB", Orientation::ReversedRows),
        ("ITU", Orientation::Inverted),
    ];
    // marker spacing shrinks with depth
    let coverages = [("6x", 2.0e6), ("9x", 1.5e6), ("12x", 1.0e6), ("15x", 0.8e6)];

    let mut written = 0;
    for &(cov, step) in &coverages {
        for &(pop, orientation) in &populations {
            if pop == "ITU" && cov == "9x" {
                continue; // exercise the missing-file path
            }
            let points = generate_points(&mut rng, step, orientation);
            let name = format!("header_filt_chr{chrom}_{pop}_{cov}");
            let path = Path::new(out_dir).join(&name);
            let mut writer = BufWriter::new(File::create(&path).expect("Failed to create output file"));
            for (x, y) in &points {
                writeln!(writer, "{:.0}\t{:.0}", x, y).expect("Failed to write row");
            }
            written += 1;
        }
    }

    println!("Wrote {written} coordinate files for chr{chrom} to {out_dir}");
}
