use dicebag::consts::DEFAULT_SEED;
use dicebag::data::FaceCounts;
use dicebag::dist::{BagOfDice, Die, Draw};
use dicebag::posterior::dice_posterior;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

fn main() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(DEFAULT_SEED);

    // A four-sided die that comes up 3 more often than it should, and a fair
    // four-sided die. There are twice as many fair dice in the bag.
    let loaded = Die::new(&[0.125, 0.125, 0.125, 0.625]).unwrap();
    let fair = Die::uniform(4);
    let bag = BagOfDice::new(vec![1.0, 2.0], vec![loaded, fair]).unwrap();

    println!("{}", bag);

    // Pull ten dice and roll each one eight times
    let draws: Vec<Draw<u8>> = bag.generate_labeled_sample(10, 8, &mut rng);

    for draw in draws.iter() {
        let counts = FaceCounts::from_rolls(4, &draw.rolls);
        let p_loaded =
            dice_posterior(counts.counts(), bag.weights(), bag.dice()).unwrap();

        println!(
            "pulled type {}, rolled {:?}, counts {}, P(loaded | counts) = {:.3}",
            draw.die_type, draw.rolls, counts, p_loaded
        );
    }
}
