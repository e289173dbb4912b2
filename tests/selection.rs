//! Integration tests for pair selection across the district tree.

use district_games::{District, Person, Registry, RegistryError};

fn person(name: &str, birth_month: u32, age: u32, district_id: i32) -> Person {
    Person::new(name, "Test", birth_month, age, district_id, 5)
}

fn district(id: i32, people: Vec<Person>) -> District {
    let mut d = District::new(id);
    for p in people {
        d.add_person(p);
    }
    d
}

#[test]
fn empty_tree_has_no_candidates() {
    let mut r = Registry::new(1);
    assert_eq!(r.select_pair(), Err(RegistryError::NotEnoughCandidates));
}

#[test]
fn eligible_people_are_chosen_regardless_of_seed() {
    for seed in [0, 1, 2023, 99_999] {
        let mut r = Registry::new(seed);
        r.admit(district(
            5,
            vec![person("A", 1, 14, 5), person("B", 3, 30, 5), person("C", 2, 15, 5)],
        ));
        let pair = r.select_pair().unwrap();
        assert_eq!(pair.odd.unwrap().first_name, "A");
        assert_eq!(pair.even.unwrap().first_name, "C");
    }
}

#[test]
fn first_eligible_in_insertion_order_wins_over_earlier_ineligible() {
    for seed in 0..20 {
        let mut r = Registry::new(seed);
        r.admit(district(
            9,
            vec![
                person("Old", 5, 40, 9),
                person("Kid", 7, 13, 9),
                person("Kid2", 9, 16, 9),
                person("Adult", 4, 25, 9),
                person("Teen", 6, 17, 9),
            ],
        ));
        let pair = r.select_pair().unwrap();
        assert_eq!(pair.odd.unwrap().first_name, "Kid");
        assert_eq!(pair.even.unwrap().first_name, "Teen");
    }
}

#[test]
fn random_fallback_picks_from_the_same_district() {
    let mut r = Registry::new(42);
    r.admit(district(4, vec![person("O1", 1, 30, 4), person("O2", 3, 31, 4), person("E1", 2, 40, 4)]));
    let pair = r.select_pair().unwrap();
    let odd = pair.odd.unwrap();
    let even = pair.even.unwrap();
    assert!(odd.first_name == "O1" || odd.first_name == "O2");
    assert_eq!(even.first_name, "E1");
    assert_eq!(odd.district_id, even.district_id);
}

#[test]
fn selected_people_leave_their_populations() {
    let mut r = Registry::new(3);
    r.admit(district(5, vec![person("A", 1, 14, 5), person("B", 3, 30, 5), person("C", 2, 15, 5)]));
    r.select_pair().unwrap();
    let d = r.find_district(5).unwrap();
    assert_eq!(d.odd_population.iter().map(|p| p.first_name.as_str()).collect::<Vec<_>>(), vec!["B"]);
    assert!(d.even_population.is_empty());
    // District 5 cannot supply another pair.
    assert_eq!(r.select_pair(), Err(RegistryError::NotEnoughCandidates));
}

#[test]
fn one_sided_district_is_skipped_for_its_subtree() {
    let mut r = Registry::new(1);
    r.admit(district(7, vec![person("D", 2, 14, 7)]));
    r.admit(district(3, vec![person("L1", 1, 14, 3), person("L2", 2, 14, 3)]));
    r.admit(district(9, vec![person("R1", 1, 14, 9), person("R2", 2, 14, 9)]));

    let pair = r.select_pair().unwrap();
    assert_eq!(pair.odd.as_ref().unwrap().district_id, 3);
    assert_eq!(pair.even.as_ref().unwrap().district_id, 3);

    // Left side is spent, so the right subtree supplies the next pair.
    let pair = r.select_pair().unwrap();
    assert_eq!(pair.odd.unwrap().first_name, "R1");

    assert_eq!(r.select_pair(), Err(RegistryError::NotEnoughCandidates));
    // District 7 was never touched.
    assert_eq!(r.find_district(7).unwrap().even_population.len(), 1);
}

#[test]
fn root_is_preferred_over_smaller_keys() {
    let mut r = Registry::new(1);
    r.admit(district(5, vec![person("Root1", 1, 20, 5), person("Root2", 2, 20, 5)]));
    r.admit(district(2, vec![person("Kid1", 1, 13, 2), person("Kid2", 2, 13, 2)]));
    let pair = r.select_pair().unwrap();
    assert_eq!(pair.odd.unwrap().district_id, 5);
}

#[test]
fn same_seed_gives_same_selections() {
    fn run(seed: u64) -> Vec<(String, String)> {
        let mut r = Registry::new(seed);
        r.admit(district(
            1,
            (0..10)
                .map(|i| person(&format!("P{i}"), (i % 12) + 1, 20 + i, 1))
                .collect(),
        ));
        let mut picks = Vec::new();
        while let Ok(pair) = r.select_pair() {
            picks.push((pair.odd.unwrap().first_name, pair.even.unwrap().first_name));
        }
        picks
    }
    let first = run(2023);
    assert_eq!(first.len(), 5);
    assert_eq!(first, run(2023));
}
