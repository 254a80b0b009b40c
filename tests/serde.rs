#![cfg(feature = "serde1")]

use dicebag::dist::{BagOfDice, Die};

#[test]
fn bag_survives_json() {
    let bag = BagOfDice::new(
        vec![1.0, 2.0],
        vec![
            Die::new(&[0.125, 0.125, 0.125, 0.625]).unwrap(),
            Die::uniform(4),
        ],
    )
    .unwrap();

    let json = serde_json::to_string(&bag).unwrap();
    assert!(json.contains("face_probs"));

    let bag2: BagOfDice = serde_json::from_str(&json).unwrap();
    assert_eq!(bag, bag2);
}

#[test]
fn face_counts_and_draws_survive_json() {
    use dicebag::data::FaceCounts;
    use dicebag::dist::Draw;

    let counts = FaceCounts::from_counts(vec![1, 0, 1, 4]);
    let json = serde_json::to_string(&counts).unwrap();
    let counts2: FaceCounts = serde_json::from_str(&json).unwrap();
    assert_eq!(counts, counts2);
    assert_eq!(counts2.n(), 6);

    let draw: Draw<u8> = Draw {
        die_type: 1,
        rolls: vec![3, 0, 2],
    };
    let json = serde_json::to_string(&draw).unwrap();
    assert!(json.contains("die_type"));
    let draw2: Draw<u8> = serde_json::from_str(&json).unwrap();
    assert_eq!(draw, draw2);
}

#[test]
fn errors_survive_json() {
    use dicebag::dist::{BagError, DieError};
    use dicebag::posterior::PosteriorError;

    let die_err = DieError::NegativeFaceProb { ix: 1, prob: -0.5 };
    let json = serde_json::to_string(&die_err).unwrap();
    assert!(json.contains("negative_face_prob"));
    assert_eq!(die_err, serde_json::from_str::<DieError>(&json).unwrap());

    let bag_err = BagError::LengthMismatch {
        n_weights: 1,
        n_dice: 2,
    };
    let json = serde_json::to_string(&bag_err).unwrap();
    assert_eq!(bag_err, serde_json::from_str::<BagError>(&json).unwrap());

    for post_err in [
        PosteriorError::NotTwoDice { n: 3 },
        PosteriorError::ImpossibleEvidence,
    ] {
        let json = serde_json::to_string(&post_err).unwrap();
        assert_eq!(
            post_err,
            serde_json::from_str::<PosteriorError>(&json).unwrap()
        );
    }
}
