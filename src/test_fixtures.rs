use std::sync::Arc;

use crate::catalog::{AvailableTypes, Schema, SchemaRef};

#[derive(Debug, Clone, PartialEq)]
pub struct Coach {
    pub name: String,
    pub titles: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub name: String,
    pub surname: String,
    pub age: i32,
    pub victory: f64,
    pub ranking: i64,
    pub active: bool,
    pub coach: Coach,
}

impl Player {
    pub fn new(name: &str, age: i32, victory: f64) -> Self {
        Self {
            name: name.to_string(),
            surname: String::new(),
            age,
            victory,
            ranking: 0,
            active: true,
            coach: Coach {
                name: String::new(),
                titles: 0,
            },
        }
    }
}

pub fn coach_schema() -> SchemaRef<Coach> {
    Arc::new(
        Schema::builder("Coach")
            .varchar("name", |c: &Coach| c.name.as_str())
            .integer("titles", |c: &Coach| c.titles)
            .build()
            .unwrap(),
    )
}

pub fn player_schema() -> SchemaRef<Player> {
    Arc::new(
        Schema::builder("Player")
            .varchar("name", |p: &Player| p.name.as_str())
            .varchar("surname", |p: &Player| p.surname.as_str())
            .integer("age", |p: &Player| p.age)
            .double("victory", |p: &Player| p.victory)
            .bigint("ranking", |p: &Player| p.ranking)
            .boolean("active", |p: &Player| p.active)
            .record("coach", |p: &Player| &p.coach, coach_schema())
            .build()
            .unwrap(),
    )
}

pub fn available_types() -> AvailableTypes {
    let mut types = AvailableTypes::new();
    types.register(player_schema()).unwrap();
    types.register(coach_schema()).unwrap();
    types
}

/// The two players every predicate path is checked against.
pub fn seed() -> Vec<Player> {
    vec![
        Player {
            name: "Rafael".to_string(),
            surname: "Nadal".to_string(),
            age: 35,
            victory: 15_400_000.0,
            ranking: 2,
            active: true,
            coach: Coach {
                name: "Carlos".to_string(),
                titles: 3,
            },
        },
        Player {
            name: "Roger".to_string(),
            surname: "Federer".to_string(),
            age: 37,
            victory: 37_640_000.0,
            ranking: 1,
            active: false,
            coach: Coach {
                name: "Ivan".to_string(),
                titles: 8,
            },
        },
    ]
}

pub fn names<'a>(players: impl IntoIterator<Item = &'a Player>) -> Vec<&'a str> {
    players.into_iter().map(|p| p.name.as_str()).collect()
}
