use log::warn;
use prob_sim_core::model::naive_bayes::NaiveBayes;
use prob_sim_core::model::transition_table::TransitionTable;
use prob_sim_core::random::RngSource;
use prob_sim_core::sampling::{coin_toss, dice_roll, sample_normal};
use prob_sim_core::simulation_input::SimulationInput;
use prob_sim_core::walk;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr, RUST_LOG=debug shows training and walk details
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Trial counts, normal parameters and walk length
    let input = SimulationInput::default();

    // Each simulation gets its own entropy-seeded generator
    let mut rng = rand::rng();
    println!("\n[Coin Toss Simulation]");
    println!("{}", coin_toss(&mut rng, input.coin_trials)?);

    let mut rng = rand::rng();
    println!("\n[Dice Roll Simulation]");
    println!("{}", dice_roll(&mut rng, input.dice_trials)?);

    let mut rng = rand::rng();
    let sample = sample_normal(&mut rng, input.normal_samples, input.mean(), input.std_dev())?;
    println!("\n[Normal Distribution Sample] (first {} values)", input.normal_preview);
    for (i, value) in sample.preview(input.normal_preview).iter().enumerate() {
        println!("Sample {}: {}", i + 1, value);
    }

    // Fixed training data, so the predictions are deterministic
    let mut classifier = NaiveBayes::new();
    classifier.train(&[
        ("spam", "buy"),
        ("spam", "cheap"),
        ("ham", "hello"),
        ("ham", "friend"),
        ("spam", "offer"),
    ]);
    println!("\n[Naive Bayes Prediction]");
    for word in ["buy", "hello"] {
        println!("Word '{}' -> Class: {}", word, classifier.predict(word)?);
    }

    let table = TransitionTable::new()
        .with_transition("Sunny", "Sunny", 0.8)
        .with_transition("Sunny", "Rainy", 0.2)
        .with_transition("Rainy", "Sunny", 0.4)
        .with_transition("Rainy", "Rainy", 0.6);

    // The walk tolerates malformed rows, only report them
    if let Err(e) = table.validate() {
        warn!("{}", e);
    }

    let mut source = RngSource::from_entropy();
    println!("\n[Markov Chain Simulation]");
    for (i, state) in walk(&table, &input.markov_start, input.markov_steps, &mut source)?
        .iter()
        .enumerate()
    {
        println!("Step {}: {}", i, state);
    }

    Ok(())
}
