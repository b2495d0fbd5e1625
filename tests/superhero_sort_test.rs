//! Sorting documents by dvstring doc values.

use std::collections::{HashMap, HashSet};

use dvstring::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde_json::json;

const HEROES: &[&str] = &[
    "Ant-Man",
    "Aquaman",
    "Batgirl",
    "Batman",
    "Beast",
    "Black Canary",
    "Black Panther",
    "Black Widow",
    "Blade",
    "Captain America",
    "Captain Marvel",
    "Catwoman",
    "Colossus",
    "Cyborg",
    "Cyclops",
    "Daredevil",
    "Deadpool",
    "Doctor Strange",
    "Falcon",
    "Firestorm",
    "Flash",
    "Gambit",
    "Green Arrow",
    "Green Lantern",
    "Hawkeye",
    "Hawkgirl",
    "Hellboy",
    "Hulk",
    "Iceman",
    "Invisible Woman",
    "Iron Fist",
    "Iron Man",
    "Jean Grey",
    "Luke Cage",
    "Martian Manhunter",
    "Moon Knight",
    "Mystique",
    "Nightcrawler",
    "Nightwing",
    "Nova",
    "Phoenix",
    "Punisher",
    "Raven",
    "Robin",
    "Rogue",
    "She-Hulk",
    "Silver Surfer",
    "Spider-Man",
    "Starfire",
    "Storm",
    "Superman",
    "Thor",
    "Vision",
    "Wasp",
    "Wolverine",
    "Wonder Woman",
];

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn superhero_mapper() -> Result<DocumentMapper> {
    let mapping = json!({
        "superhero": {
            "properties": {
                "name": {"type": "dvstring", "doc_values": true}
            }
        }
    });
    DocumentMapper::parse(&mapping, &MapperRegistry::new(), &AnalyzerRegistry::new())
}

/// `count` distinct heroes with random casing.
fn random_names(rng: &mut StdRng, count: usize) -> Vec<String> {
    let mut heroes: Vec<&str> = HEROES.to_vec();
    heroes.shuffle(rng);

    heroes
        .into_iter()
        .take(count)
        .map(|hero| {
            hero.chars()
                .map(|c| {
                    if rng.random_bool(0.5) {
                        c.to_ascii_uppercase()
                    } else {
                        c.to_ascii_lowercase()
                    }
                })
                .collect()
        })
        .collect()
}

#[test]
fn test_sort_by_name_ignores_case() -> Result<()> {
    init_logger();

    let mut rng = StdRng::seed_from_u64(42);
    let names = random_names(&mut rng, 50);
    let distinct: HashSet<String> = names.iter().map(|name| name.to_lowercase()).collect();
    assert_eq!(distinct.len(), 50);

    let mapper = superhero_mapper()?;
    let index = MemoryIndex::new();
    let mut sources = HashMap::new();

    for (i, name) in names.iter().enumerate() {
        let id = i.to_string();
        let doc = mapper.parse_document(&id, &json!({ "name": name }))?;
        index.add_document(&doc)?;
        sources.insert(id, name.clone());
    }
    assert_eq!(index.doc_count(), 50);

    let hits = index.sort_by("name", SortOrder::Ascending)?;
    assert_eq!(hits.len(), 50);

    let sorted: Vec<String> = hits.iter().map(|hit| sources[&hit.id].clone()).collect();
    for pair in sorted.windows(2) {
        assert!(
            pair[0].to_lowercase() < pair[1].to_lowercase(),
            "[{}] sorted before [{}]",
            pair[0],
            pair[1]
        );
    }

    let mut expected: Vec<String> = names.iter().map(|name| name.to_lowercase()).collect();
    expected.sort();
    let values: Vec<String> = hits
        .iter()
        .filter_map(|hit| hit.value_str().map(str::to_string))
        .collect();
    assert_eq!(values, expected);

    Ok(())
}

#[test]
fn test_sort_descending_reverses_order() -> Result<()> {
    init_logger();

    let mut rng = StdRng::seed_from_u64(7);
    let names = random_names(&mut rng, 20);

    let mapper = superhero_mapper()?;
    let index = MemoryIndex::new();
    for (i, name) in names.iter().enumerate() {
        index.add_document(&mapper.parse_document(&i.to_string(), &json!({ "name": name }))?)?;
    }

    let ascending: Vec<String> = index
        .sort_by("name", SortOrder::Ascending)?
        .into_iter()
        .map(|hit| hit.id)
        .collect();
    let mut descending: Vec<String> = index
        .sort_by("name", SortOrder::Descending)?
        .into_iter()
        .map(|hit| hit.id)
        .collect();
    descending.reverse();

    assert_eq!(ascending, descending);
    Ok(())
}

#[test]
fn test_wonder_woman_is_searchable_and_sortable() -> Result<()> {
    init_logger();

    let mapper = superhero_mapper()?;
    let doc = mapper.parse_document("1", &json!({"name": "Wonder Woman"}))?;

    let terms: Vec<&str> = doc
        .entries_for("name")
        .flat_map(|entry| entry.terms.iter().map(|token| token.text.as_str()))
        .collect();
    assert_eq!(terms, vec!["wonder", "woman"]);

    let doc_values: Vec<&DocValue> = doc.doc_values().collect();
    assert_eq!(doc_values.len(), 1);
    assert_eq!(doc_values[0].as_str(), Some("wonder woman"));

    let index = MemoryIndex::new();
    index.add_document(&doc)?;
    assert_eq!(index.term_docs("name", "woman"), vec![0]);
    assert_eq!(index.term_docs("name", "wonder woman"), Vec::<u32>::new());

    let hits = index.sort_by("name", SortOrder::Ascending)?;
    assert_eq!(hits[0].value_str(), Some("wonder woman"));
    Ok(())
}
