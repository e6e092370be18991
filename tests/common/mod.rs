use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const MID: i32 = 127;
const LO: u8 = (MID - 32) as u8;
const HI: u8 = (MID + 32) as u8;
const MIN_DURATION: usize = 2;
const MAX_DURATION: usize = 10;
const NOISE: i32 = 20;

/// Square wave alternating between two levels with random dwell times
pub fn square_wave(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut level = if rng.gen_bool(0.5) { LO } else { HI };
    let mut signal = Vec::with_capacity(len);

    while signal.len() < len {
        let duration = rng.gen_range(MIN_DURATION..MAX_DURATION).min(len - signal.len());
        signal.extend(std::iter::repeat(level).take(duration));
        level = if level == HI { LO } else { HI };
    }

    signal
}

/// Square wave with uniform additive noise, clamped to the sample range
pub fn noisy_square_wave(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(1));
    square_wave(len, seed)
        .into_iter()
        .map(|s| (s as i32 + rng.gen_range(-NOISE..=NOISE)).clamp(0, 255) as u8)
        .collect()
}

/// Median of a window computed directly from the unpadded input, treating
/// out-of-range neighbours as the nearest edge sample
pub fn reference_median(input: &[u8], ws: usize, center: usize) -> u8 {
    let half = ws as isize / 2;
    let last = input.len() as isize - 1;
    let mut window: Vec<u8> = (-half..=half)
        .map(|offset| input[(center as isize + offset).clamp(0, last) as usize])
        .collect();
    window.sort_unstable();
    window[window.len() / 2]
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
