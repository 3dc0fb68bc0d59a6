use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::accessor::{record_accessor, varchar_accessor, Projection};
use super::{CatalogError, FieldResolver, Getter, ResolvedField};
use crate::types::LogicalType;

pub type SchemaRef<R> = Arc<Schema<R>>;

/// use field name as id for simplicity
pub type ColumnId = String;

/// The readable fields of a record type `R`: a lookup table from field name to a typed accessor,
/// built once per record type.
pub struct Schema<R> {
    pub name: String,
    /// column_ids to keep the declaration order of fields
    pub column_ids: Vec<ColumnId>,
    pub columns: BTreeMap<ColumnId, Column<R>>,
}

pub struct Column<R> {
    pub name: String,
    pub data_type: LogicalType,
    pub(crate) kind: ColumnKind<R>,
}

pub(crate) enum ColumnKind<R> {
    Scalar(Getter<R>),
    Record(Arc<dyn FieldResolver<R>>),
}

impl<R> Clone for ColumnKind<R> {
    fn clone(&self) -> Self {
        match self {
            ColumnKind::Scalar(getter) => ColumnKind::Scalar(getter.clone()),
            ColumnKind::Record(resolver) => ColumnKind::Record(resolver.clone()),
        }
    }
}

impl<R: Send + Sync + 'static> Schema<R> {
    pub fn builder(name: impl Into<String>) -> SchemaBuilder<R> {
        SchemaBuilder {
            name: name.into(),
            column_ids: Vec::new(),
            columns: BTreeMap::new(),
        }
    }
}

impl<R> Schema<R> {
    pub fn get_column_by_name(&self, name: &str) -> Option<&Column<R>> {
        self.columns.get(name)
    }

    pub fn get_all_columns(&self) -> impl Iterator<Item = &Column<R>> {
        self.column_ids.iter().filter_map(|id| self.columns.get(id))
    }
}

impl<R: Send + Sync> FieldResolver<R> for Schema<R> {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn resolve(&self, name: &str) -> Option<ResolvedField<R>> {
        let column = self.get_column_by_name(name)?;
        Some(match &column.kind {
            ColumnKind::Scalar(getter) => ResolvedField::Scalar {
                data_type: column.data_type.clone(),
                getter: getter.clone(),
            },
            ColumnKind::Record(resolver) => ResolvedField::Record(resolver.clone()),
        })
    }

    fn field_names(&self) -> Vec<String> {
        self.column_ids.clone()
    }
}

impl<R> fmt::Debug for Schema<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("name", &self.name)
            .field("columns", &self.get_all_columns().collect::<Vec<_>>())
            .finish()
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.data_type)
    }
}

pub struct SchemaBuilder<R> {
    name: String,
    column_ids: Vec<ColumnId>,
    columns: BTreeMap<ColumnId, Column<R>>,
}

impl<R: Send + Sync + 'static> SchemaBuilder<R> {
    pub fn boolean<F>(self, name: &str, f: F) -> Self
    where
        F: Fn(&R) -> bool + Send + Sync + 'static,
    {
        self.scalar(name, LogicalType::Boolean, Getter::Boolean(Arc::new(f)))
    }

    pub fn integer<F>(self, name: &str, f: F) -> Self
    where
        F: Fn(&R) -> i32 + Send + Sync + 'static,
    {
        let getter = Getter::Integer(Arc::new(move |r: &R| i64::from(f(r))));
        self.scalar(name, LogicalType::Integer, getter)
    }

    pub fn bigint<F>(self, name: &str, f: F) -> Self
    where
        F: Fn(&R) -> i64 + Send + Sync + 'static,
    {
        self.scalar(name, LogicalType::Bigint, Getter::Integer(Arc::new(f)))
    }

    pub fn double<F>(self, name: &str, f: F) -> Self
    where
        F: Fn(&R) -> f64 + Send + Sync + 'static,
    {
        self.scalar(name, LogicalType::Double, Getter::Double(Arc::new(f)))
    }

    pub fn varchar<F>(self, name: &str, f: F) -> Self
    where
        F: for<'a> Fn(&'a R) -> &'a str + Send + Sync + 'static,
    {
        self.scalar(name, LogicalType::Varchar, Getter::Varchar(varchar_accessor(f)))
    }

    /// A field holding another record; its fields resolve through `schema`.
    pub fn record<S, F>(mut self, name: &str, f: F, schema: SchemaRef<S>) -> Self
    where
        S: Send + Sync + 'static,
        F: for<'a> Fn(&'a R) -> &'a S + Send + Sync + 'static,
    {
        let data_type = LogicalType::Record(schema.name.clone());
        let projection = Projection {
            accessor: record_accessor(f),
            inner: schema as Arc<dyn FieldResolver<S>>,
        };
        self.push(Column {
            name: name.to_string(),
            data_type,
            kind: ColumnKind::Record(Arc::new(projection)),
        });
        self
    }

    fn scalar(mut self, name: &str, data_type: LogicalType, getter: Getter<R>) -> Self {
        self.push(Column {
            name: name.to_string(),
            data_type,
            kind: ColumnKind::Scalar(getter),
        });
        self
    }

    fn push(&mut self, column: Column<R>) {
        // duplicates are kept in `column_ids` and reported by `build`
        self.column_ids.push(column.name.clone());
        self.columns.insert(column.name.clone(), column);
    }

    pub fn build(self) -> Result<Schema<R>, CatalogError> {
        if self.column_ids.is_empty() {
            return Err(CatalogError::EmptySchema(self.name));
        }
        if self.column_ids.len() != self.columns.len() {
            let mut seen = std::collections::HashSet::new();
            let duplicate = self
                .column_ids
                .iter()
                .find(|id| !seen.insert(id.as_str()))
                .cloned()
                .unwrap_or_default();
            return Err(CatalogError::DuplicateColumn(self.name, duplicate));
        }
        Ok(Schema {
            name: self.name,
            column_ids: self.column_ids,
            columns: self.columns,
        })
    }
}

#[cfg(test)]
mod schema_test {
    use pretty_assertions::assert_eq;

    use super::*;

    struct Coach {
        name: String,
        titles: i32,
    }

    struct Player {
        name: String,
        victory: f64,
        active: bool,
        coach: Coach,
    }

    fn coach_schema() -> SchemaRef<Coach> {
        Arc::new(
            Schema::builder("Coach")
                .varchar("name", |c: &Coach| c.name.as_str())
                .integer("titles", |c: &Coach| c.titles)
                .build()
                .unwrap(),
        )
    }

    fn player_schema() -> Schema<Player> {
        Schema::builder("Player")
            .varchar("name", |p: &Player| p.name.as_str())
            .double("victory", |p: &Player| p.victory)
            .boolean("active", |p: &Player| p.active)
            .record("coach", |p: &Player| &p.coach, coach_schema())
            .build()
            .unwrap()
    }

    fn roger() -> Player {
        Player {
            name: "Roger".to_string(),
            victory: 37_640_000.0,
            active: false,
            coach: Coach {
                name: "Ivan".to_string(),
                titles: 8,
            },
        }
    }

    #[test]
    fn test_field_order_is_declaration_order() {
        let schema = player_schema();
        assert_eq!(
            schema.field_names(),
            vec!["name", "victory", "active", "coach"]
        );
        assert_eq!(
            format!("{:?}", schema),
            "Schema { name: \"Player\", columns: [name:VARCHAR, victory:DOUBLE, active:BOOLEAN, coach:RECORD(Coach)] }"
        );
    }

    #[test]
    fn test_resolve_scalar_field() {
        let schema = player_schema();
        let player = roger();
        match schema.resolve("victory") {
            Some(ResolvedField::Scalar {
                data_type,
                getter: Getter::Double(get),
            }) => {
                assert_eq!(data_type, LogicalType::Double);
                assert_eq!(get(&player), 37_640_000.0);
            }
            _ => panic!("victory should resolve to a double field"),
        }
        assert!(schema.resolve("Victory").is_none());
    }

    #[test]
    fn test_resolve_nested_field() {
        let schema = player_schema();
        let player = roger();
        let coach = match schema.resolve("coach") {
            Some(ResolvedField::Record(coach)) => coach,
            _ => panic!("coach should resolve to a record"),
        };
        assert_eq!(coach.type_name(), "Coach");
        match coach.resolve("name") {
            Some(ResolvedField::Scalar {
                getter: Getter::Varchar(get),
                ..
            }) => assert_eq!(get(&player), "Ivan"),
            _ => panic!("coach.name should resolve to a varchar field"),
        }
        match coach.resolve("titles") {
            Some(ResolvedField::Scalar {
                data_type,
                getter: Getter::Integer(get),
            }) => {
                assert_eq!(data_type, LogicalType::Integer);
                assert_eq!(get(&player), 8);
            }
            _ => panic!("coach.titles should resolve to an integer field"),
        }
    }

    #[test]
    fn test_duplicate_column() {
        let err = Schema::builder("Coach")
            .varchar("name", |c: &Coach| c.name.as_str())
            .varchar("name", |c: &Coach| c.name.as_str())
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            CatalogError::DuplicateColumn("Coach".to_string(), "name".to_string())
        );
    }

    #[test]
    fn test_empty_schema() {
        let err = Schema::<Coach>::builder("Coach").build().unwrap_err();
        assert_eq!(err, CatalogError::EmptySchema("Coach".to_string()));
    }
}
