#![allow(dead_code)]

use luma_engine::{Config, Domain, QuestionGenerator, QuizSession};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

pub fn seeded_generator(seed: u64) -> QuestionGenerator<StdRng> {
    QuestionGenerator::new(StdRng::seed_from_u64(seed))
}

pub fn test_config() -> Config {
    Config {
        rng_seed: Some(42),
        ..Config::default()
    }
}

pub fn create_test_session(domain: Domain) -> QuizSession {
    init_tracing();
    QuizSession::new(domain, &test_config()).expect("Failed to create test session")
}
