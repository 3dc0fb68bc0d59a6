use std::sync::Arc;

use anyhow::Result;
use predrs::catalog::{AvailableTypes, Schema, SchemaRef};
use predrs::compiler::compile;
use predrs::executor::filter;
use predrs::expression::{lit, param};
use predrs::predicate::Predicate;
use predrs::source::SourceCompiler;
use predrs::util::pretty_records;

pub const THRESHOLD: i32 = 19_400_000;

#[derive(Debug, Clone)]
pub struct Coach {
    pub name: String,
    pub titles: i32,
}

#[derive(Debug, Clone)]
pub struct TennisPlayer {
    pub name: String,
    pub surname: String,
    pub age: i32,
    pub victory: f64,
    pub coach: Coach,
}

fn coach_schema() -> Result<SchemaRef<Coach>> {
    let schema = Schema::builder("Coach")
        .varchar("name", |c: &Coach| c.name.as_str())
        .integer("titles", |c: &Coach| c.titles)
        .build()?;
    Ok(Arc::new(schema))
}

fn player_schema() -> Result<SchemaRef<TennisPlayer>> {
    let schema = Schema::builder("TennisPlayer")
        .varchar("name", |tp: &TennisPlayer| tp.name.as_str())
        .varchar("surname", |tp: &TennisPlayer| tp.surname.as_str())
        .integer("age", |tp: &TennisPlayer| tp.age)
        .double("victory", |tp: &TennisPlayer| tp.victory)
        .record("coach", |tp: &TennisPlayer| &tp.coach, coach_schema()?)
        .build()?;
    Ok(Arc::new(schema))
}

fn seed() -> Vec<TennisPlayer> {
    vec![
        TennisPlayer {
            name: "Rafael".to_string(),
            surname: "Nadal".to_string(),
            age: 35,
            victory: 15_400_000.0,
            coach: Coach {
                name: "Carlos Moya".to_string(),
                titles: 3,
            },
        },
        TennisPlayer {
            name: "Roger".to_string(),
            surname: "Federer".to_string(),
            age: 37,
            victory: 37_640_000.0,
            coach: Coach {
                name: "Ivan Ljubicic".to_string(),
                titles: 8,
            },
        },
    ]
}

/// The seeded players together with everything needed to filter them.
pub struct Demo {
    pub schema: SchemaRef<TennisPlayer>,
    pub compiler: SourceCompiler,
    pub players: Vec<TennisPlayer>,
}

impl Demo {
    pub fn new() -> Result<Self> {
        let schema = player_schema()?;
        let mut types = AvailableTypes::new();
        types.register(schema.clone())?;
        types.register(coach_schema()?)?;
        Ok(Self {
            schema,
            compiler: SourceCompiler::new(types),
            players: seed(),
        })
    }

    /// Build `victory > 19400000` three ways and filter the players with each.
    pub async fn run_paths(&self) -> Result<()> {
        let native = Predicate::from_fn(|tp: &TennisPlayer| tp.victory > f64::from(THRESHOLD))
            .with_description("tp -> tp.victory > 19400000");
        let tree = compile(
            &param("tp").field("victory").gt(lit(THRESHOLD)),
            &self.schema,
        )?;
        let source = self
            .compiler
            .compile_async::<TennisPlayer>("(tp: TennisPlayer) -> tp.victory > 19_400_000")
            .await?;

        for (path, predicate) in [("native", native), ("tree", tree), ("source", source)] {
            println!("{} predicate: {}", path, predicate.description());
            self.print(&predicate)?;
        }
        Ok(())
    }

    pub fn print(&self, predicate: &Predicate<TennisPlayer>) -> Result<()> {
        let matched = filter(predicate, &self.players).collect::<Vec<_>>();
        if matched.is_empty() {
            println!("(no players)");
        } else {
            println!("{}", pretty_records(self.schema.as_ref(), matched)?);
        }
        Ok(())
    }
}
