//! Integration tests for duel resolution and post-duel bookkeeping.

use district_games::{
    play_out, play_round, resolve_duel, District, Duel, DuelOutcome, DuelPair, EffectivenessDuel, Person,
    Registry, RegistryError, Slot,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Test duel that always lets the given side win.
struct Fixed(Slot);

impl Duel for Fixed {
    fn resolve(&self, _odd: &Person, _even: &Person, _rng: &mut StdRng) -> Slot {
        self.0
    }
}

fn person(name: &str, birth_month: u32, age: u32, district_id: i32) -> Person {
    Person::new(name, "Test", birth_month, age, district_id, 5)
}

fn registry_with_district(id: i32, people: Vec<Person>) -> Registry {
    let mut d = District::new(id);
    for p in people {
        d.add_person(p);
    }
    let mut r = Registry::new(11);
    r.admit(d);
    r
}

#[test]
fn winner_goes_back_to_the_end_of_their_population() {
    let mut r = registry_with_district(
        3,
        vec![person("A", 1, 14, 3), person("B", 5, 30, 3), person("C", 2, 15, 3)],
    );
    let pair = r.select_pair().unwrap();
    let outcome = resolve_duel(&mut r, pair, &Fixed(Slot::Odd));

    match outcome {
        DuelOutcome::Fought {
            winner,
            winner_name,
            loser,
            eliminated_district,
        } => {
            assert_eq!(winner, Slot::Odd);
            assert_eq!(winner_name, "A Test");
            assert_eq!(loser.first_name, "C");
            assert_eq!(eliminated_district, None);
        }
        other => panic!("unexpected outcome {other:?}"),
    }
    let d = r.find_district(3).unwrap();
    let names: Vec<_> = d.odd_population.iter().map(|p| p.first_name.as_str()).collect();
    assert_eq!(names, vec!["B", "A"]);
    assert!(d.even_population.is_empty());
}

#[test]
fn even_winner_returns_to_even_population() {
    let mut r = registry_with_district(3, vec![person("A", 1, 14, 3), person("C", 2, 15, 3)]);
    let pair = r.select_pair().unwrap();
    resolve_duel(&mut r, pair, &Fixed(Slot::Even));
    let d = r.find_district(3).unwrap();
    assert!(d.odd_population.is_empty());
    assert_eq!(d.even_population[0].first_name, "C");
}

#[test]
fn losing_side_does_not_eliminate_the_district() {
    let mut r = registry_with_district(3, vec![person("A", 1, 14, 3), person("C", 2, 15, 3)]);
    let pair = r.select_pair().unwrap();
    resolve_duel(&mut r, pair, &Fixed(Slot::Odd));
    assert!(r.contains(3));
    assert_eq!(r.select_pair(), Err(RegistryError::NotEnoughCandidates));
}

#[test]
fn incomplete_pair_is_returned_without_a_duel() {
    let mut r = registry_with_district(8, vec![person("A", 1, 14, 8)]);
    let pair = DuelPair {
        odd: None,
        even: Some(person("Lone", 4, 16, 8)),
    };
    assert!(!pair.is_complete());
    assert_eq!(resolve_duel(&mut r, pair, &Fixed(Slot::Odd)), DuelOutcome::Returned);
    let d = r.find_district(8).unwrap();
    assert_eq!(d.even_population[0].first_name, "Lone");
    assert_eq!(d.odd_population.len(), 1);
}

#[test]
fn empty_pair_is_a_no_op() {
    let mut r = registry_with_district(8, vec![person("A", 1, 14, 8)]);
    let before = r.root().cloned();
    assert_eq!(resolve_duel(&mut r, DuelPair::default(), &Fixed(Slot::Odd)), DuelOutcome::Empty);
    assert_eq!(r.root().cloned(), before);
}

#[test]
fn winner_from_removed_district_drops_out() {
    let mut r = registry_with_district(3, vec![person("A", 1, 14, 3), person("C", 2, 15, 3)]);
    let pair = r.select_pair().unwrap();
    r.eliminate(3);
    let outcome = resolve_duel(&mut r, pair, &Fixed(Slot::Odd));
    assert!(matches!(outcome, DuelOutcome::Fought { eliminated_district: None, .. }));
    assert!(r.is_empty());
}

#[test]
fn effectiveness_decides_lopsided_duels() {
    let strong = Person::new("Strong", "Odd", 1, 20, 1, 100);
    let weak = Person::new("Weak", "Even", 2, 20, 1, 0);
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..20 {
        assert_eq!(EffectivenessDuel.resolve(&strong, &weak, &mut rng), Slot::Odd);
        assert_eq!(EffectivenessDuel.resolve(&weak, &strong, &mut rng), Slot::Even);
    }
}

#[test]
fn play_out_runs_until_no_pair_is_left() {
    let mut r = Registry::new(2023);
    for id in [2, 1, 3] {
        let mut d = District::new(id);
        d.add_person(person("O", 1, 14, id));
        d.add_person(person("E", 2, 20, id));
        d.add_person(person("E2", 4, 21, id));
        r.admit(d);
    }
    let rounds = play_out(&mut r, &EffectivenessDuel, 100);
    assert!(!rounds.is_empty());
    assert!(rounds.iter().all(|rep| matches!(rep.outcome, DuelOutcome::Fought { .. })));
    assert_eq!(rounds[0].district_id, 2);
    assert_eq!(r.select_pair(), Err(RegistryError::NotEnoughCandidates));
    assert_eq!(r.survivors().len(), 3);

    let capped = play_out(&mut Registry::new(1), &EffectivenessDuel, 5);
    assert!(capped.is_empty());
}

#[test]
fn round_numbers_continue_across_calls() {
    let mut r = Registry::new(4);
    for id in [3, 1, 5] {
        let mut d = District::new(id);
        d.add_person(person("O", 1, 14, id));
        d.add_person(person("E", 2, 15, id));
        r.admit(d);
    }
    let first = play_round(&mut r, &Fixed(Slot::Odd)).unwrap();
    assert_eq!(first.round, 1);
    assert_eq!(first.district_id, 3);

    let rest = play_out(&mut r, &Fixed(Slot::Odd), 10);
    assert_eq!(rest.iter().map(|rep| rep.round).collect::<Vec<_>>(), vec![2, 3]);
    assert_eq!(r.rounds_played(), 3);
    assert!(play_round(&mut r, &Fixed(Slot::Odd)).is_err());
    assert_eq!(r.rounds_played(), 3);
}
