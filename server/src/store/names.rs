use rand::Rng;
use rand::seq::SliceRandom;

const ADJECTIVES: &[&str] = &[
    "amber", "brisk", "calm", "dusty", "eager", "fuzzy", "gentle", "hollow", "icy", "jolly",
    "keen", "lucky", "misty", "nimble", "odd", "plain", "quiet", "rusty", "sunny", "tidy",
    "urban", "vivid", "windy", "young", "zesty",
];

const NOUNS: &[&str] = &[
    "anchor", "badger", "canyon", "dahlia", "ember", "falcon", "garden", "harbor", "island",
    "jasper", "kettle", "lantern", "meadow", "nebula", "otter", "pepper", "quartz", "river",
    "sparrow", "tulip", "umbra", "valley", "walrus", "yarrow", "zephyr",
];

/// Generates a human readable mailbox name such as `quiet-otter-42`.
pub fn random_mailbox_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let adjective = ADJECTIVES.choose(rng).copied().unwrap_or("plain");
    let noun = NOUNS.choose(rng).copied().unwrap_or("mailbox");
    let number: u16 = rng.gen_range(10..1000);
    format!("{adjective}-{noun}-{number}")
}

/// Generates a name that is not contained in `taken`, giving up after a few
/// attempts by appending a counter.
pub fn unique_mailbox_name<R, F>(rng: &mut R, taken: F) -> String
where
    R: Rng + ?Sized,
    F: Fn(&str) -> bool,
{
    for _ in 0..16 {
        let candidate = random_mailbox_name(rng);
        if !taken(&candidate) {
            return candidate;
        }
    }

    let base = random_mailbox_name(rng);
    let mut counter = 1u32;
    loop {
        let candidate = format!("{base}-{counter}");
        if !taken(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}
