// nn::init — Weight initialization
//
// AVAILABLE INITIALIZERS:
//
//   xavier_uniform(in, out, rng)  — U(-b, b), b = sqrt(6 / (in + out))
//   he_normal(in, out, rng)       — N(0, σ²), σ = sqrt(2 / in)
//
// Xavier/Glorot keeps activation variance roughly constant through linear and
// saturating (sigmoid) layers. He/Kaiming compensates for ReLU zeroing half of
// its inputs. Both return a fresh `[in, out]` weight matrix; the random source
// is always supplied by the caller.

use rand::Rng;
use wren_core::{Result, Tensor};

/// Bound of the Xavier/Glorot uniform distribution for an `in x out` weight.
pub fn xavier_bound(fan_in: usize, fan_out: usize) -> f32 {
    (6.0 / (fan_in + fan_out) as f32).sqrt()
}

/// Standard deviation of the He/Kaiming normal distribution.
pub fn he_std(fan_in: usize) -> f32 {
    (2.0 / fan_in as f32).sqrt()
}

/// A `[fan_in, fan_out]` matrix drawn from U(-b, b), b = sqrt(6 / (in + out)).
pub fn xavier_uniform<R: Rng + ?Sized>(fan_in: usize, fan_out: usize, rng: &mut R) -> Result<Tensor> {
    let bound = xavier_bound(fan_in, fan_out);
    Tensor::random(fan_in, fan_out, -bound, bound, rng)
}

/// A `[fan_in, fan_out]` matrix drawn from N(0, 2 / in).
pub fn he_normal<R: Rng + ?Sized>(fan_in: usize, fan_out: usize, rng: &mut R) -> Result<Tensor> {
    let mut t = Tensor::new(fan_in, fan_out)?;
    t.fill_normal(0.0, he_std(fan_in), rng)?;
    Ok(t)
}
