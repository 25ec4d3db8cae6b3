// MLP XOR — training a two-layer perceptron from scratch
//
// XOR is not linearly separable, so a single dense layer cannot learn it. One
// hidden ReLU layer is enough:
//
//   Input(2) → Dense(2, H, ReLU) → Dense(H, 1, Sigmoid) → probability
//
// The loop is the usual four steps per epoch: forward, binary cross-entropy
// gradient, backward through both layers, Adam step. The whole truth table is
// one batch.
//
//   RUST_LOG=debug cargo run -p mlp_xor -- --seed 3

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use wren::prelude::*;
use wren::rng::Rng;

#[derive(Parser, Debug)]
#[command(name = "mlp_xor")]
#[command(about = "Train a small MLP on the XOR truth table", long_about = None)]
struct Args {
    /// Number of full-batch training epochs
    #[arg(long, default_value_t = 5000)]
    epochs: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 0.1)]
    lr: f32,

    /// Hidden layer width
    #[arg(long, default_value_t = 4)]
    hidden: usize,

    /// Seed for weight initialization (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Log the loss every N epochs
    #[arg(long, default_value_t = 1000)]
    log_every: usize,
}

const INPUTS: [[f32; 2]; 4] = [[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]];
const TARGETS: [f32; 4] = [0.0, 1.0, 1.0, 0.0];

fn main() -> wren::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(|| rng::from_entropy().gen());
    let mut rng = rng::seeded(seed);

    let x = Tensor::from_vec(INPUTS.iter().flatten().copied().collect(), 4, 2)?;
    let y = Tensor::from_slice(&TARGETS, 4, 1)?;

    let mut model = Sequential::new()
        .add(Dense::new(2, args.hidden, Activation::Relu, &mut rng)?)
        .add(Dense::new(args.hidden, 1, Activation::Sigmoid, &mut rng)?);
    let mut optimizer = Adam::with_config(AdamConfig::new(args.lr))?;
    let loss_fn = Loss::BinaryCrossEntropy;

    info!(
        seed,
        hidden = args.hidden,
        params = model.param_count(),
        lr = args.lr,
        epochs = args.epochs,
        "training XOR"
    );

    let log_every = args.log_every.max(1);
    for epoch in 0..args.epochs {
        let pred = model.forward(&x)?.clone();
        let loss = loss_fn.compute(&pred, &y)?;
        let grad = loss_fn.gradient(&pred, &y)?;
        model.backward(&grad)?;
        optimizer.step(model.layers_mut())?;

        if (epoch + 1) % log_every == 0 {
            info!(epoch = epoch + 1, loss, "epoch");
        }
    }

    let pred = model.forward(&x)?.clone();
    let final_loss = loss_fn.compute(&pred, &y)?;
    let accuracy = binary_accuracy(&pred, &y, 0.5)?;
    let classes = threshold_classes(&pred, 0.5);

    println!();
    println!("  input   target  output   class");
    println!("  {:-<34}", "");
    for (i, ([a, b], &target)) in INPUTS.iter().zip(TARGETS.iter()).enumerate() {
        let p = pred.row(i)[0];
        let mark = if classes[i] as f32 == target { "ok" } else { "MISS" };
        println!(
            "  ({}, {})  {:>6}  {:>6.4}  {:>5}  {}",
            a, b, target, p, classes[i], mark
        );
    }
    println!();
    println!("  loss     {:.6}", final_loss);
    println!("  accuracy {:.1}%", accuracy * 100.0);

    Ok(())
}
