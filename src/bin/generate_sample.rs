use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::Serialize;

const SAMPLING_RATE_HZ: f64 = 500.0;
const N_SAMPLES: usize = 5_000;
const DURATION_S: f64 = N_SAMPLES as f64 / SAMPLING_RATE_HZ;
const LEADS: [&str; 12] = [
    "lead1", "lead2", "lead3", "aVR", "aVL", "aVF", "V1", "V2", "V3", "V4", "V5", "V6",
];

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// One landmark of the synthetic beat: label, offset from the R peak (s),
/// width (s) and amplitude (mV).
static WAVES: [(&str, f64, f64, f64); 5] = [
    ("P", -0.20, 0.025, 0.15),
    ("Q", -0.03, 0.010, -0.12),
    ("R", 0.00, 0.012, 1.10),
    ("S", 0.03, 0.010, -0.25),
    ("T", 0.28, 0.045, 0.30),
];

/// Deterministic beat-jitter and noise source: xoshiro256** seeded
/// through splitmix64.
struct BeatRng {
    state: [u64; 4],
}

impl BeatRng {
    fn new(seed: u64) -> Self {
        let mut x = seed;
        let mut splitmix = || {
            x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
            let mut z = x;
            z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
            z ^ (z >> 31)
        };
        Self {
            state: [splitmix(), splitmix(), splitmix(), splitmix()],
        }
    }

    fn next_u64(&mut self) -> u64 {
        let [s0, s1, s2, s3] = &mut self.state;
        let result = s1.wrapping_mul(5).rotate_left(7).wrapping_mul(9);
        let t = *s1 << 17;
        *s2 ^= *s0;
        *s3 ^= *s1;
        *s1 ^= *s2;
        *s0 ^= *s3;
        *s2 ^= t;
        *s3 = s3.rotate_left(45);
        result
    }

    /// Uniform in [0, 1).
    fn uniform(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Normal sample via Box-Muller.
    fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.uniform().max(f64::MIN_POSITIVE);
        let u2 = self.uniform();
        let z = (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos();
        mean + std_dev * z
    }
}

/// Nearest sample index for a time in seconds; `None` before the start.
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
fn sample_index(time_s: f64) -> Option<usize> {
    let index = (time_s * SAMPLING_RATE_HZ).round();
    (index >= 0.0).then_some(index as usize)
}

#[derive(Serialize)]
struct PeakJson {
    peaks: BTreeMap<&'static str, Vec<usize>>,
    intervals: IntervalJson,
}

#[derive(Serialize)]
struct IntervalJson {
    #[serde(rename = "RR")]
    rr: Vec<f64>,
}

fn main() -> Result<()> {
    let mut rng = BeatRng::new(42);
    let n_samples = N_SAMPLES;

    // R peak times (s): ~72 bpm with a little beat-to-beat variability.
    let mut r_times = Vec::new();
    let mut t = 0.45;
    while t < DURATION_S - 0.4 {
        r_times.push(t);
        t += rng.normal(0.83, 0.03);
    }

    let mut peaks: BTreeMap<&'static str, Vec<usize>> = BTreeMap::new();
    for &(label, offset, _, _) in &WAVES {
        let indices = r_times
            .iter()
            .filter_map(|&r| sample_index(r + offset))
            .filter(|&i| i < n_samples)
            .collect();
        peaks.insert(label, indices);
    }

    let rr: Vec<f64> = r_times
        .windows(2)
        .map(|w| ((w[1] - w[0]) * 100.0).round() / 100.0)
        .collect();

    // Each lead scales the same beat and adds its own noise and wander.
    let csv_path = "sample_ecg.csv";
    let mut writer = csv::Writer::from_path(csv_path).context("creating sample CSV")?;
    let mut header = vec!["lead".to_string()];
    header.extend((0..n_samples).map(|i| i.to_string()));
    writer.write_record(&header).context("writing CSV header")?;

    for (k, lead) in LEADS.iter().enumerate() {
        let gain = 1.0 - 0.12 * k as f64;
        let mut row = vec![(*lead).to_string()];
        for i in 0..n_samples {
            let time = i as f64 / SAMPLING_RATE_HZ;
            let beat: f64 = r_times
                .iter()
                .flat_map(|&r| {
                    WAVES
                        .iter()
                        .map(move |&(_, offset, sigma, amp)| gaussian(time, r + offset, sigma, amp))
                })
                .sum();
            let wander = 0.05 * (2.0 * std::f64::consts::PI * 0.25 * time).sin();
            let value = gain * beat + wander + rng.normal(0.0, 0.01);
            row.push(format!("{value:.4}"));
        }
        writer.write_record(&row).context("writing CSV row")?;
    }
    writer.flush().context("flushing sample CSV")?;

    let json_path = "sample_peaks.json";
    let json = serde_json::to_string_pretty(&PeakJson {
        peaks,
        intervals: IntervalJson { rr },
    })
    .context("serializing peaks")?;
    std::fs::write(json_path, json).context("writing sample JSON")?;

    println!(
        "Wrote {} leads ({n_samples} samples each) to {csv_path} and {} beats to {json_path}",
        LEADS.len(),
        r_times.len()
    );
    Ok(())
}
