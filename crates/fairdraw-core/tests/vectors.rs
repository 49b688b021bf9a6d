//! Cross-implementation vectors
//!
//! Every expected value below was computed by an independent implementation
//! over the same HMAC-SHA256. A mismatch means the byte-consumption order,
//! the rejection limit, or the message layout changed, and previously
//! published rounds would no longer verify.

use fairdraw_core::{DrawStats, Engine, Round};

const SERVER: &str = "server-seed-1";
const CLIENT: &str = "client-seed-1";

#[test]
fn single_number_vector() {
    let engine = Engine::sha256();
    assert_eq!(engine.generate_number(0..=10_000, "abc", 1, "x").unwrap(), 6211);
    assert_eq!(engine.generate_number(0..=10_000, "abc", 1, "x").unwrap(), 6211);
}

#[test]
fn dice_vectors() {
    let engine = Engine::sha256();
    let expected = [4906, 3749, 6098, 4525, 4799];

    for (nonce, hundredths) in expected.into_iter().enumerate() {
        let outcome = engine.dice(&Round::new(SERVER, CLIENT, nonce as u64)).unwrap();
        assert_eq!(outcome.result.hundredths, hundredths, "nonce {nonce}");
    }

    let outcome = engine.dice(&Round::new(SERVER, CLIENT, 0)).unwrap();
    assert_eq!(outcome.result.to_string(), "49.06");
    assert_eq!(
        outcome.commitment,
        "78174e84e74e81018d713e79a4a763ee1368420e749fd09ca9900d11be96ee90"
    );
}

#[test]
fn wheel_and_cases_vectors() {
    let engine = Engine::sha256();
    assert_eq!(engine.wheel(SERVER, CLIENT, 12).unwrap().result.sector, 3);
    assert_eq!(engine.cases(&Round::new(SERVER, CLIENT, 3), 1000).unwrap().result.value, 816);
}

#[test]
fn direct_draw_vector_keeps_draw_order() {
    let engine = Engine::sha256();
    let draw = engine.generate_unique_numbers_traced(5, 1..=25, SERVER, 7, CLIENT).unwrap();

    assert_eq!(draw.values, vec![25, 5, 19, 24, 22]);
    assert_eq!(
        draw.stats,
        DrawStats { blocks: 1, bytes_consumed: 28, rejections: 0, duplicates: 2, inverted: false }
    );
}

#[test]
fn mines_vector() {
    let engine = Engine::sha256();
    let layout = engine.mines(&Round::new(SERVER, CLIENT, 7), 3, 25).unwrap().result;

    assert_eq!(layout.mines, vec![25, 5, 19]);
    assert_eq!(layout.sorted, vec![5, 19, 25]);
}

#[test]
fn inverted_draw_vector_is_ascending_complement() {
    let engine = Engine::sha256();
    let draw = engine.generate_unique_numbers_traced(20, 1..=25, SERVER, 7, CLIENT).unwrap();

    assert_eq!(
        draw.values,
        vec![1, 2, 3, 4, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 20, 21, 23]
    );
    assert!(draw.stats.inverted);
    assert_eq!(draw.stats.bytes_consumed, 28);
}

#[test]
fn multi_block_vector() {
    let engine = Engine::sha256();
    let draw = engine.generate_unique_numbers_traced(40, 1..=100, SERVER, 9, CLIENT).unwrap();

    assert_eq!(
        draw.values,
        vec![
            28, 66, 35, 30, 60, 7, 29, 48, 36, 71, 74, 63, 16, 9, 23, 39, 82, 22, 31, 64, 13, 54,
            43, 4, 73, 61, 92, 62, 5, 56, 21, 14, 19, 25, 96, 20, 38, 37, 91, 8,
        ]
    );
    assert_eq!(
        draw.stats,
        DrawStats { blocks: 6, bytes_consumed: 184, rejections: 0, duplicates: 6, inverted: false }
    );
}

#[test]
fn rejection_vector() {
    // 2^31 + 1 rejects almost half of all candidates.
    let engine = Engine::sha256();
    let draw =
        engine.generate_unique_numbers_traced(1, 0..=(1 << 31), "abc", 1, "x").unwrap();

    assert_eq!(draw.values, vec![563_166_260]);
    assert_eq!(draw.stats.rejections, 1);
    assert_eq!(draw.stats.bytes_consumed, 8);
}

#[test]
fn duplicates_consume_bytes_vector() {
    let engine = Engine::sha256();
    let draw = engine.generate_unique_numbers_traced(5, 0..=9, "s", 0, "c").unwrap();

    assert_eq!(draw.values, vec![6, 8, 4, 1, 3]);
    assert_eq!(draw.stats.duplicates, 3);
    assert_eq!(draw.stats.bytes_consumed, 32);
}

#[test]
fn negative_range_vector() {
    let engine = Engine::sha256();
    assert_eq!(engine.generate_unique_numbers(3, -5..=5, "abc", 2, "x").unwrap(), vec![-1, -2, -4]);
}
