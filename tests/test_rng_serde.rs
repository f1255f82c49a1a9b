//! Test RNG serialization/deserialization fidelity
//!
//! Both RNG streams that end up in a snapshot must resume exactly: the
//! game's ChaCha12 stream and the random controller's Xoshiro256++ stream.

use ember_crawl::config::Ruleset;
use ember_crawl::core::PlayerClass;
use ember_crawl::game::GameState;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use rand_xoshiro::Xoshiro256PlusPlus;

#[test]
fn test_xoshiro_serialize_deserialize_fidelity() {
    let mut rng1 = Xoshiro256PlusPlus::seed_from_u64(42);
    for _ in 0..10 {
        rng1.gen::<u64>();
    }

    let json = serde_json::to_string(&rng1).expect("Failed to serialize RNG");
    let mut rng2: Xoshiro256PlusPlus =
        serde_json::from_str(&json).expect("Failed to deserialize RNG");

    for i in 0..100 {
        let val1 = rng1.gen::<u64>();
        let val2 = rng2.gen::<u64>();
        assert_eq!(val1, val2, "RNG divergence at iteration {}", i);
    }
}

#[test]
fn test_chacha_serialize_deserialize_fidelity() {
    let mut rng1 = ChaCha12Rng::seed_from_u64(12345);
    let _: Vec<u32> = (0..5).map(|_| rng1.gen_range(1..=5)).collect();

    let json = serde_json::to_string(&rng1).expect("Failed to serialize");
    let mut rng2: ChaCha12Rng = serde_json::from_str(&json).expect("Failed to deserialize");

    let after1: Vec<u32> = (0..20).map(|_| rng1.gen_range(1..=5)).collect();
    let after2: Vec<u32> = (0..20).map(|_| rng2.gen_range(1..=5)).collect();
    assert_eq!(after1, after2);
}

#[test]
fn test_game_state_rng_survives_serde() {
    let mut game = GameState::new(PlayerClass::Warrior, Ruleset::default(), 99);
    game.start_campaign().unwrap();

    let json = serde_json::to_string(&game).expect("Failed to serialize game");
    let mut restored: GameState = serde_json::from_str(&json).expect("Failed to deserialize game");

    for _ in 0..3 {
        game.end_turn().unwrap();
        restored.end_turn().unwrap();
    }
    assert_eq!(game.player, restored.player);
    assert_eq!(game.zones.hand.cards, restored.zones.hand.cards);
}
