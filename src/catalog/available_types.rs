use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

use downcast_rs::{impl_downcast, DowncastSync};

use super::{CatalogError, FieldResolver, Schema, SchemaRef};

/// A schema with its record type erased, so schemas of different record types can share one
/// allow-list.
pub trait AnySchema: DowncastSync {
    fn name(&self) -> &str;

    fn record_type_id(&self) -> TypeId;

    fn column_names(&self) -> Vec<String>;
}
impl_downcast!(sync AnySchema);

impl<R: Send + Sync + 'static> AnySchema for Schema<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn record_type_id(&self) -> TypeId {
        TypeId::of::<R>()
    }

    fn column_names(&self) -> Vec<String> {
        FieldResolver::field_names(self)
    }
}

/// The explicit allow-list of record schemas that predicate source text may reference by name.
/// Nothing outside of it is reachable from source text.
#[derive(Default, Clone)]
pub struct AvailableTypes {
    /// schema name -> type erased schema
    types: HashMap<String, Arc<dyn AnySchema>>,
}

impl AvailableTypes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<R: Send + Sync + 'static>(
        &mut self,
        schema: SchemaRef<R>,
    ) -> Result<(), CatalogError> {
        if self.types.contains_key(&schema.name) {
            return Err(CatalogError::DuplicateType(schema.name.clone()));
        }
        self.types.insert(schema.name.clone(), schema);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn AnySchema>> {
        self.types.get(name).cloned()
    }

    /// The schema registered under `name`, if it describes record type `R`.
    pub fn get_typed<R: Send + Sync + 'static>(
        &self,
        name: &str,
    ) -> Option<Result<SchemaRef<R>, Arc<dyn AnySchema>>> {
        self.get_by_name(name)
            .map(|schema| schema.downcast_arc::<Schema<R>>())
    }

    /// All registered schemas describing record type `R`.
    pub fn schemas_for<R: Send + Sync + 'static>(&self) -> Vec<SchemaRef<R>> {
        let mut found = self
            .types
            .values()
            .filter(|schema| schema.record_type_id() == TypeId::of::<R>())
            .filter_map(|schema| schema.clone().downcast_arc::<Schema<R>>().ok())
            .collect::<Vec<_>>();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        found
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names = self.types.keys().map(String::as_str).collect::<Vec<_>>();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for AvailableTypes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod available_types_test {
    use super::*;

    struct Player {
        name: String,
    }

    struct Umpire {
        name: String,
    }

    fn player_schema(name: &str) -> SchemaRef<Player> {
        Arc::new(
            Schema::builder(name)
                .varchar("name", |p: &Player| p.name.as_str())
                .build()
                .unwrap(),
        )
    }

    fn umpire_schema() -> SchemaRef<Umpire> {
        Arc::new(
            Schema::builder("Umpire")
                .varchar("name", |u: &Umpire| u.name.as_str())
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_register_and_lookup() {
        let mut types = AvailableTypes::new();
        types.register(player_schema("Player")).unwrap();
        types.register(umpire_schema()).unwrap();

        assert!(types.contains("Player"));
        assert!(!types.contains("Console"));
        assert_eq!(types.names(), vec!["Player", "Umpire"]);

        let player = types.get_typed::<Player>("Player").unwrap();
        assert!(player.is_ok());
        let wrong = types.get_typed::<Player>("Umpire").unwrap();
        assert!(wrong.is_err());
        assert!(types.get_typed::<Player>("Console").is_none());
    }

    #[test]
    fn test_duplicate_type() {
        let mut types = AvailableTypes::new();
        types.register(player_schema("Player")).unwrap();
        assert_eq!(
            types.register(player_schema("Player")),
            Err(CatalogError::DuplicateType("Player".to_string()))
        );
    }

    #[test]
    fn test_schemas_for_record_type() {
        let mut types = AvailableTypes::new();
        types.register(player_schema("Player")).unwrap();
        types.register(player_schema("Athlete")).unwrap();
        types.register(umpire_schema()).unwrap();

        let names = types
            .schemas_for::<Player>()
            .iter()
            .map(|s| s.name.clone())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Athlete", "Player"]);
        assert_eq!(types.schemas_for::<Umpire>().len(), 1);
        assert_eq!(format!("{:?}", types), "{\"Athlete\", \"Player\", \"Umpire\"}");
    }
}
