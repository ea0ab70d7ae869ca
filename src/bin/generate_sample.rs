//! Writes a synthetic training log in the reference sheet layout:
//! title/header rows, then blocks of 8 rows per week whose summary row
//! (9, 17, 25, ...) holds distance, heart rate, rating and sleep in
//! columns 8, 13, 14 and 15.

use anyhow::{Context, Result};

const WIDTH: usize = 16;
const WEEKS: usize = 30;

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

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

fn blank_row() -> Vec<String> {
    vec![String::new(); WIDTH]
}

fn day_row(rng: &mut SimpleRng, day: &str) -> Vec<String> {
    let mut row = blank_row();
    row[0] = day.to_string();
    if rng.next_f64() < 0.7 {
        row[8] = format!("{:.1}", rng.uniform(2.0, 9.0));
        row[13] = format!("{:.0}", rng.uniform(125.0, 165.0));
    }
    row
}

fn summary_row(rng: &mut SimpleRng, week: usize) -> Vec<String> {
    let progress = week as f64 / WEEKS as f64;
    let mut row = blank_row();
    row[0] = format!("Week {}", week + 1);

    // Occasional rest week or formula error, as real sheets have.
    let roll = rng.next_f64();
    row[8] = if roll < 0.05 {
        "0".to_string()
    } else {
        format!("{:.1}", 20.0 + 15.0 * progress + rng.uniform(-4.0, 4.0))
    };
    row[13] = if roll > 0.95 {
        "#DIV/0!".to_string()
    } else {
        format!("{:.0}", 152.0 - 8.0 * progress + rng.uniform(-3.0, 3.0))
    };
    row[14] = format!("{:.0}", rng.uniform(5.0, 9.0).round());

    let sleep_minutes = (rng.uniform(6.0, 8.5) * 60.0).round() as u32;
    row[15] = format!("{}:{:02}", sleep_minutes / 60, sleep_minutes % 60);
    row
}

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_log.csv".to_string());
    let mut rng = SimpleRng::new(42);

    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;

    let mut title = blank_row();
    title[0] = "Training Log 2024-2025".to_string();
    writer.write_record(&title)?;

    let mut header = blank_row();
    header[0] = "Day".to_string();
    header[8] = "Distance".to_string();
    header[13] = "Heart Rate".to_string();
    header[14] = "Rating".to_string();
    header[15] = "Sleep".to_string();
    writer.write_record(&header)?;

    // Rows 2..9: the first (partial) week has no summary.
    let days = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
    for day in days {
        writer.write_record(&day_row(&mut rng, day))?;
    }

    for week in 0..WEEKS {
        writer.write_record(&summary_row(&mut rng, week))?;
        for day in days {
            writer.write_record(&day_row(&mut rng, day))?;
        }
    }

    writer.flush().context("flushing CSV")?;
    println!(
        "Wrote {WEEKS} weeks ({} rows) to {output_path}",
        2 + days.len() + WEEKS * (1 + days.len())
    );
    Ok(())
}
