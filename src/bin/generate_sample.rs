use anyhow::{Context, Result};

/// Minimal deterministic PRNG (xoshiro256**), so every run writes the same
/// sample file without pulling in a `rand` dependency.
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

    fn pick<'a>(&mut self, options: &[&'a str]) -> &'a str {
        options[(self.next_u64() % options.len() as u64) as usize]
    }
}

/// Prescription rule of thumb: high Na/K ratio first, then blood pressure,
/// then age or cholesterol.
fn prescribe(age: u32, bp: &str, cholesterol: &str, na_to_k: f64) -> &'static str {
    if na_to_k > 14.83 {
        return "DrugY";
    }
    match bp {
        "HIGH" if age <= 50 => "drugA",
        "HIGH" => "drugB",
        "LOW" if cholesterol == "HIGH" => "drugC",
        _ => "drugX",
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let output_path = "Classification.csv";
    let n_rows = 200;

    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer
        .write_record(["Age", "Sex", "BP", "Cholesterol", "Na_to_K", "Drug"])
        .context("writing header")?;

    for _ in 0..n_rows {
        let age = 15 + (rng.next_u64() % 60) as u32;
        let sex = rng.pick(&["F", "M"]);
        let bp = rng.pick(&["LOW", "NORMAL", "HIGH"]);
        let cholesterol = rng.pick(&["NORMAL", "HIGH"]);
        let na_to_k = rng.gauss(16.0, 7.0).clamp(6.2, 38.3);
        let drug = prescribe(age, bp, cholesterol, na_to_k);

        writer
            .write_record([
                age.to_string(),
                sex.to_string(),
                bp.to_string(),
                cholesterol.to_string(),
                format!("{na_to_k:.3}"),
                drug.to_string(),
            ])
            .context("writing row")?;
    }
    writer.flush().context("flushing CSV writer")?;

    println!("Wrote {n_rows} patient records to {output_path}");
    Ok(())
}
