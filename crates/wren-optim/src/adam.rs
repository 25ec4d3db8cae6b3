// Adam — Adaptive Moment Estimation
//
// Adam keeps two running averages for every parameter:
//   m = β₁·m + (1-β₁)·g        (first moment, the mean)
//   v = β₂·v + (1-β₂)·g²       (second moment, the uncentered variance)
//
// Both start at zero, which biases them toward zero during the first steps.
// The correction is folded into one effective learning rate:
//
//   lr_t = lr · √(1 - β₂ᵗ) / (1 - β₁ᵗ)
//   θ ← θ - lr_t · m / (√v + ε)
//
// STATE: one step counter t shared by all layers, advanced once per step()
// call. Moments are stored per layer POSITION and created lazily (zeroed) the
// first time a position is seen. A later call that puts a layer of a
// different shape at a known position is rejected before anything changes.

use tracing::{debug, trace, warn};
use wren_core::{bail, Error, Result, Tensor};
use wren_nn::Dense;

use crate::optimizer::Optimizer;

/// Adam hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdamConfig {
    pub learning_rate: f32,
    pub beta1: f32,
    pub beta2: f32,
    pub epsilon: f32,
}

impl Default for AdamConfig {
    fn default() -> Self {
        AdamConfig {
            learning_rate: 1e-3,
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-8,
        }
    }
}

impl AdamConfig {
    /// Default betas and epsilon with the given learning rate.
    pub fn new(learning_rate: f32) -> Self {
        AdamConfig {
            learning_rate,
            ..Default::default()
        }
    }

    pub fn with_betas(mut self, beta1: f32, beta2: f32) -> Self {
        self.beta1 = beta1;
        self.beta2 = beta2;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Betas must lie in `[0, 1)`, epsilon and the learning rate must be
    /// finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        for (name, beta) in [("beta1", self.beta1), ("beta2", self.beta2)] {
            if !(0.0..1.0).contains(&beta) {
                bail!("adam: {name} must be in [0, 1), got {beta}");
            }
        }
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            bail!("adam: epsilon must be finite and >= 0, got {}", self.epsilon);
        }
        if !self.learning_rate.is_finite() || self.learning_rate < 0.0 {
            bail!(
                "adam: learning rate must be finite and >= 0, got {}",
                self.learning_rate
            );
        }
        Ok(())
    }
}

/// First and second moments for one layer, shaped like its parameters.
#[derive(Debug, Clone)]
struct Moments {
    m_weight: Tensor,
    v_weight: Tensor,
    m_bias: Tensor,
    v_bias: Tensor,
}

impl Moments {
    fn zeros_for(layer: &Dense) -> Result<Self> {
        Ok(Moments {
            m_weight: layer.weight().zeros_like()?,
            v_weight: layer.weight().zeros_like()?,
            m_bias: layer.bias().zeros_like()?,
            v_bias: layer.bias().zeros_like()?,
        })
    }

    fn check(&self, index: usize, layer: &Dense) -> Result<()> {
        let pairs = [
            (self.m_weight.shape(), layer.weight().shape()),
            (self.m_bias.shape(), layer.bias().shape()),
        ];
        for (stored, actual) in pairs {
            if stored != actual {
                warn!(
                    index,
                    stored = %stored,
                    actual = %actual,
                    "adam: layer shape changed at a known position"
                );
                return Err(Error::shape_mismatch("adam step", stored, actual));
            }
        }
        Ok(())
    }
}

/// Per-element Adam update over one parameter buffer.
fn update(
    params: &mut [f32],
    grads: &[f32],
    m: &mut [f32],
    v: &mut [f32],
    cfg: &AdamConfig,
    lr_t: f32,
) {
    let (b1, b2) = (cfg.beta1, cfg.beta2);
    for (((p, &g), m), v) in params.iter_mut().zip(grads).zip(m).zip(v) {
        *m = b1 * *m + (1.0 - b1) * g;
        *v = b2 * *v + (1.0 - b2) * g * g;
        *p -= lr_t * *m / (v.sqrt() + cfg.epsilon);
    }
}

/// The Adam optimizer.
#[derive(Debug, Clone)]
pub struct Adam {
    config: AdamConfig,
    step: u64,
    moments: Vec<Moments>,
}

impl Adam {
    /// Adam with default betas (0.9, 0.999) and epsilon 1e-8.
    pub fn new(learning_rate: f32) -> Self {
        Adam {
            config: AdamConfig::new(learning_rate),
            step: 0,
            moments: Vec::new(),
        }
    }

    /// Adam with explicit hyperparameters, checked by [`AdamConfig::validate`].
    pub fn with_config(config: AdamConfig) -> Result<Self> {
        config.validate()?;
        Ok(Adam {
            config,
            step: 0,
            moments: Vec::new(),
        })
    }

    pub fn config(&self) -> &AdamConfig {
        &self.config
    }

    /// Number of completed `step` calls.
    pub fn step_count(&self) -> u64 {
        self.step
    }

    /// Number of layer positions with allocated moments.
    pub fn tracked_layers(&self) -> usize {
        self.moments.len()
    }

    /// Forget all moments and restart the step counter.
    pub fn reset(&mut self) {
        self.step = 0;
        self.moments.clear();
    }

    /// Effective learning rate for step `t` (1-based).
    fn corrected_lr(&self, t: u64) -> f32 {
        let t = t as f32;
        let c = &self.config;
        c.learning_rate * (1.0 - c.beta2.powf(t)).sqrt() / (1.0 - c.beta1.powf(t))
    }
}

impl Optimizer for Adam {
    fn step(&mut self, layers: &mut [Dense]) -> Result<()> {
        for (index, (stored, layer)) in self.moments.iter().zip(layers.iter()).enumerate() {
            stored.check(index, layer)?;
        }
        let mut fresh = Vec::new();
        for (index, layer) in layers.iter().enumerate().skip(self.moments.len()) {
            debug!(
                index,
                weight = %layer.weight().shape(),
                "adam: allocating moments"
            );
            fresh.push(Moments::zeros_for(layer)?);
        }
        self.moments.extend(fresh);

        self.step += 1;
        let lr_t = self.corrected_lr(self.step);
        trace!(step = self.step, lr_t, layers = layers.len(), "adam step");

        let cfg = self.config;
        for (layer, state) in layers.iter_mut().zip(self.moments.iter_mut()) {
            let (weight, grad) = layer.weight_with_grad_mut();
            update(
                weight,
                grad,
                state.m_weight.data_mut(),
                state.v_weight.data_mut(),
                &cfg,
                lr_t,
            );
            let (bias, grad) = layer.bias_with_grad_mut();
            update(
                bias,
                grad,
                state.m_bias.data_mut(),
                state.v_bias.data_mut(),
                &cfg,
                lr_t,
            );
        }
        Ok(())
    }

    fn learning_rate(&self) -> f32 {
        self.config.learning_rate
    }

    fn set_learning_rate(&mut self, lr: f32) {
        self.config.learning_rate = lr;
    }
}
