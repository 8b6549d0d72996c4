//! Bundled animal dataset
//!
//! This module contains the static list of animals used when every live source
//! is unavailable, plus the category and name lookups over it. Images are empty
//! and get backfilled from Wikipedia at lookup time.

use serde::Serialize;

/// An entry of the bundled dataset
///
/// Uses `&'static str` fields so the dataset can be a plain static array.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LocalAnimal {
    pub name: &'static str,
    /// Alternate names matched by name search and tried for image backfill
    pub common_names: &'static [&'static str],
    pub category: &'static str,
    pub habitat: &'static str,
    pub diet: &'static str,
    pub lifespan: &'static str,
    pub image: &'static str,
    pub fact: &'static str,
    pub danger: &'static str,
}

/// Static array of all bundled animals
pub static ANIMALS: [LocalAnimal; 18] = [
    LocalAnimal {
        name: "African Elephant",
        common_names: &["Elephant", "Savanna elephant"],
        category: "Mammal",
        habitat: "Savanna, forest",
        diet: "Herbivore",
        lifespan: "60-70 years",
        image: "",
        fact: "Elephants can recognise themselves in a mirror.",
        danger: "Moderate",
    },
    LocalAnimal {
        name: "Red Fox",
        common_names: &["Fox"],
        category: "Mammal",
        habitat: "Forest, grassland, urban areas",
        diet: "Omnivore",
        lifespan: "2-5 years",
        image: "",
        fact: "Red foxes use the Earth's magnetic field to pounce on prey hidden under snow.",
        danger: "Low",
    },
    LocalAnimal {
        name: "Giant Panda",
        common_names: &["Panda", "Panda bear"],
        category: "Mammal",
        habitat: "Temperate bamboo forest",
        diet: "Herbivore",
        lifespan: "20 years",
        image: "",
        fact: "A giant panda spends up to 14 hours a day eating bamboo.",
        danger: "Low",
    },
    LocalAnimal {
        name: "Bald Eagle",
        common_names: &["American eagle"],
        category: "Bird",
        habitat: "Coasts, lakes, rivers",
        diet: "Carnivore",
        lifespan: "20-30 years",
        image: "",
        fact: "Bald eagle nests can weigh more than a tonne.",
        danger: "Low",
    },
    LocalAnimal {
        name: "Emperor Penguin",
        common_names: &["Penguin"],
        category: "Bird",
        habitat: "Antarctic sea ice",
        diet: "Carnivore",
        lifespan: "20 years",
        image: "",
        fact: "Emperor penguins can dive deeper than 500 metres.",
        danger: "Low",
    },
    LocalAnimal {
        name: "Ruby-throated Hummingbird",
        common_names: &["Hummingbird"],
        category: "Bird",
        habitat: "Woodland, gardens",
        diet: "Nectar, insects",
        lifespan: "3-5 years",
        image: "",
        fact: "Hummingbirds can beat their wings more than 50 times per second.",
        danger: "None",
    },
    LocalAnimal {
        name: "Honey Bee",
        common_names: &["Bee", "Western honey bee"],
        category: "Insect",
        habitat: "Meadows, orchards, gardens",
        diet: "Nectar, pollen",
        lifespan: "6 weeks (workers)",
        image: "",
        fact: "Honey bees communicate the location of flowers with a waggle dance.",
        danger: "Low",
    },
    LocalAnimal {
        name: "Monarch Butterfly",
        common_names: &["Monarch"],
        category: "Insect",
        habitat: "Fields, meadows",
        diet: "Milkweed, nectar",
        lifespan: "2-6 weeks",
        image: "",
        fact: "Monarchs migrate up to 4,800 kilometres to overwinter in Mexico.",
        danger: "None",
    },
    LocalAnimal {
        name: "Leafcutter Ant",
        common_names: &["Leaf-cutter ant", "Ant"],
        category: "Insect",
        habitat: "Tropical forest",
        diet: "Cultivated fungus",
        lifespan: "1-2 years (workers)",
        image: "",
        fact: "Leafcutter ants farm fungus on the leaves they carry home.",
        danger: "Low",
    },
    LocalAnimal {
        name: "Blue Whale",
        common_names: &["Whale"],
        category: "Sea",
        habitat: "Open ocean",
        diet: "Krill",
        lifespan: "80-90 years",
        image: "",
        fact: "The blue whale is the largest animal known to have ever lived.",
        danger: "Low",
    },
    LocalAnimal {
        name: "Common Octopus",
        common_names: &["Octopus"],
        category: "Sea",
        habitat: "Coastal reefs",
        diet: "Carnivore",
        lifespan: "1-2 years",
        image: "",
        fact: "An octopus has three hearts and blue blood.",
        danger: "Low",
    },
    LocalAnimal {
        name: "Great White Shark",
        common_names: &["White shark", "Shark"],
        category: "Sea",
        habitat: "Coastal and offshore waters",
        diet: "Carnivore",
        lifespan: "70 years",
        image: "",
        fact: "Great white sharks can sense a drop of blood in 100 litres of water.",
        danger: "High",
    },
    LocalAnimal {
        name: "Komodo Dragon",
        common_names: &["Komodo monitor"],
        category: "Reptile",
        habitat: "Tropical savanna",
        diet: "Carnivore",
        lifespan: "30 years",
        image: "",
        fact: "Komodo dragons are the largest living lizards.",
        danger: "High",
    },
    LocalAnimal {
        name: "Green Sea Turtle",
        common_names: &["Sea turtle", "Green turtle"],
        category: "Reptile",
        habitat: "Tropical oceans",
        diet: "Seagrass, algae",
        lifespan: "80 years",
        image: "",
        fact: "Green sea turtles return to the beach where they hatched to lay eggs.",
        danger: "None",
    },
    LocalAnimal {
        name: "Panther Chameleon",
        common_names: &["Chameleon"],
        category: "Reptile",
        habitat: "Madagascar rainforest",
        diet: "Insectivore",
        lifespan: "5-7 years",
        image: "",
        fact: "Chameleons change colour mostly to signal mood, not for camouflage.",
        danger: "None",
    },
    LocalAnimal {
        name: "Axolotl",
        common_names: &["Mexican walking fish"],
        category: "Amphibian",
        habitat: "Freshwater lakes",
        diet: "Carnivore",
        lifespan: "10-15 years",
        image: "",
        fact: "Axolotls can regrow limbs, parts of their heart and even their brain.",
        danger: "None",
    },
    LocalAnimal {
        name: "Poison Dart Frog",
        common_names: &["Dart frog", "Poison arrow frog"],
        category: "Amphibian",
        habitat: "Tropical rainforest",
        diet: "Insectivore",
        lifespan: "10 years",
        image: "",
        fact: "Poison dart frogs get their toxins from the insects they eat.",
        danger: "High",
    },
    LocalAnimal {
        name: "Fire Salamander",
        common_names: &["Salamander"],
        category: "Amphibian",
        habitat: "Deciduous forest",
        diet: "Insectivore",
        lifespan: "20 years",
        image: "",
        fact: "Fire salamanders can spray a toxic secretion from glands behind their eyes.",
        danger: "Moderate",
    },
];

/// Returns the bundled dataset
pub fn all_animals() -> &'static [LocalAnimal] {
    &ANIMALS
}

/// Entries whose category matches `category`, ignoring case
pub fn in_category<'a>(dataset: &'a [LocalAnimal], category: &str) -> Vec<&'a LocalAnimal> {
    let wanted = category.trim().to_lowercase();
    dataset
        .iter()
        .filter(|a| a.category.to_lowercase() == wanted)
        .collect()
}

/// Entries whose name or any common name contains `query`, ignoring case
///
/// A blank query matches nothing.
pub fn find_by_name<'a>(dataset: &'a [LocalAnimal], query: &str) -> Vec<&'a LocalAnimal> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    dataset
        .iter()
        .filter(|a| {
            a.name.to_lowercase().contains(&needle)
                || a
                    .common_names
                    .iter()
                    .any(|n| n.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Distinct categories in dataset order
pub fn categories(dataset: &[LocalAnimal]) -> Vec<&'static str> {
    let mut seen: Vec<&'static str> = Vec::new();
    for animal in dataset {
        if !seen.iter().any(|c| c.eq_ignore_ascii_case(animal.category)) {
            seen.push(animal.category);
        }
    }
    seen
}
