use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use serde_json::{json, Value};
use utilkit::array::{random_item_with, shuffle_array_with, sort_by, SortOrder};
use utilkit::number::generate_number_with_length_with;
use utilkit::string::{random_hex_color_code_with, random_str_with};

fn seeds() -> [u64; 8] {
    [
        0x5eed_c0de_u64,
        0x0000_0000_0000_0001_u64,
        0x0000_0000_00c0_ffee_u64,
        0x0123_4567_89ab_cdef_u64,
        0x1111_2222_3333_4444_u64,
        0x89ab_cdef_0123_4567_u64,
        0xfedc_ba98_7654_3210_u64,
        0xa5a5_5a5a_dead_beef_u64,
    ]
}

#[test]
fn seeded_shuffle_is_a_permutation_and_reproducible() {
    let items: Vec<u32> = (0..64).collect();
    for seed in seeds() {
        let a = shuffle_array_with(&mut Xoshiro256StarStar::seed_from_u64(seed), &items);
        let b = shuffle_array_with(&mut Xoshiro256StarStar::seed_from_u64(seed), &items);
        assert_eq!(a, b, "shuffle not reproducible seed={seed}");
        let mut sorted = a.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, items, "shuffle lost elements seed={seed}");
    }
}

#[test]
fn seeded_random_item_draws_from_input() {
    let items = ["red", "green", "blue", "cyan"];
    for seed in seeds() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
        let picks = random_item_with(&mut rng, &items, 3);
        assert_eq!(picks.len(), 3);
        assert!(picks.iter().all(|p| items.contains(p)), "foreign pick seed={seed}");
    }
}

#[test]
fn seeded_random_strings_have_expected_shape() {
    for seed in seeds() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
        let color = random_hex_color_code_with(&mut rng);
        assert_eq!(color.len(), 7);
        assert!(color[1..].chars().all(|c| c.is_ascii_hexdigit()), "bad color {color}");

        let token = random_str_with(&mut rng, 24, "tok_");
        assert!(token.starts_with("tok_"));
        assert_eq!(token.len(), 24);

        for len in [1, 6, 12] {
            let n = generate_number_with_length_with(&mut rng, len).unwrap();
            assert_eq!(n.to_string().len(), len as usize, "wrong digit count seed={seed}");
        }
    }
}

#[test]
fn sort_by_desc_reverses_asc_for_distinct_keys() {
    for seed in seeds() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
        let keys: Vec<u32> = (0..16).collect();
        let items: Vec<Value> = shuffle_array_with(&mut rng, &keys)
            .into_iter()
            .map(|k| json!({"rank": k, "label": format!("item-{k}")}))
            .collect();

        let asc = sort_by(&items, SortOrder::Asc, "rank");
        let mut desc = sort_by(&items, SortOrder::Desc, "rank");
        desc.reverse();
        assert_eq!(asc, desc, "asc/desc mismatch seed={seed}");
        assert_eq!(asc[0]["rank"], json!(0));
    }
}
