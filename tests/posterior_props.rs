use dicebag::dist::Die;
use dicebag::posterior::{posterior, safe_pow};
use proptest::prelude::*;

// Random die with `k` faces; faces may have zero probability but at least one
// face does not.
fn arb_die(k: usize) -> impl Strategy<Value = Die> {
    prop::collection::vec(prop_oneof![Just(0.0), 0.01_f64..1.0], k)
        .prop_filter("some face must be possible", |ws| {
            ws.iter().any(|&w| w > 0.0)
        })
        .prop_map(|ws| {
            let total: f64 = ws.iter().sum();
            let ps: Vec<f64> = ws.iter().map(|w| w / total).collect();
            Die::new(&ps).unwrap()
        })
}

fn arb_problem() -> impl Strategy<Value = (Vec<u32>, Vec<f64>, Vec<Die>)> {
    (2_usize..8, 1_usize..5).prop_flat_map(|(k, n_dice)| {
        (
            prop::collection::vec(0_u32..20, k),
            prop::collection::vec(0.01_f64..10.0, n_dice),
            prop::collection::vec(arb_die(k), n_dice),
        )
    })
}

proptest! {
    #[test]
    fn posterior_is_a_distribution((counts, prior, dice) in arb_problem()) {
        if let Ok(post) = posterior(&counts, &prior, &dice) {
            prop_assert_eq!(post.len(), dice.len());
            prop_assert!(post.iter().all(|&p| (0.0..=1.0 + 1E-12).contains(&p)));
            prop_assert!((post.iter().sum::<f64>() - 1.0).abs() < 1E-10);
        }
    }

    #[test]
    fn posterior_with_identical_dice_is_normalized_prior(
        (counts, prior, dice) in arb_problem()
    ) {
        let same = vec![dice[0].clone(); dice.len()];
        let total: f64 = prior.iter().sum();
        if let Ok(post) = posterior(&counts, &prior, &same) {
            for (p, w) in post.iter().zip(prior.iter()) {
                prop_assert!((p - w / total).abs() < 1E-10);
            }
        }
    }

    #[test]
    fn safe_pow_matches_powf_for_positive_base(
        base in 1E-6_f64..10.0,
        exponent in 0.0_f64..10.0,
    ) {
        prop_assert_eq!(safe_pow(base, exponent), base.powf(exponent));
    }
}
