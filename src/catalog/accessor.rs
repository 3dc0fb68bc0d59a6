use std::sync::Arc;

use crate::types::LogicalType;

pub type BooleanAccessor<R> = Arc<dyn Fn(&R) -> bool + Send + Sync>;
pub type IntegerAccessor<R> = Arc<dyn Fn(&R) -> i64 + Send + Sync>;
pub type DoubleAccessor<R> = Arc<dyn Fn(&R) -> f64 + Send + Sync>;
pub type VarcharAccessor<R> = Arc<dyn for<'a> Fn(&'a R) -> &'a str + Send + Sync>;
pub type RecordAccessor<P, R> = Arc<dyn for<'a> Fn(&'a P) -> &'a R + Send + Sync>;

pub(crate) fn varchar_accessor<R, F>(f: F) -> VarcharAccessor<R>
where
    F: for<'a> Fn(&'a R) -> &'a str + Send + Sync + 'static,
{
    Arc::new(f)
}

pub(crate) fn record_accessor<P, R, F>(f: F) -> RecordAccessor<P, R>
where
    F: for<'a> Fn(&'a P) -> &'a R + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A typed read of one scalar field. Integer fields of any width are widened to `i64`, the
/// declared width is kept in the column's [`LogicalType`].
pub enum Getter<R> {
    Boolean(BooleanAccessor<R>),
    Integer(IntegerAccessor<R>),
    Double(DoubleAccessor<R>),
    Varchar(VarcharAccessor<R>),
}

impl<R> Clone for Getter<R> {
    fn clone(&self) -> Self {
        match self {
            Getter::Boolean(f) => Getter::Boolean(f.clone()),
            Getter::Integer(f) => Getter::Integer(f.clone()),
            Getter::Double(f) => Getter::Double(f.clone()),
            Getter::Varchar(f) => Getter::Varchar(f.clone()),
        }
    }
}

impl<R: 'static> Getter<R> {
    /// Rebase the getter onto an outer record that holds `R`.
    pub fn project<P: 'static>(self, outer: RecordAccessor<P, R>) -> Getter<P> {
        match self {
            Getter::Boolean(f) => Getter::Boolean(Arc::new(move |p: &P| f(outer(p)))),
            Getter::Integer(f) => Getter::Integer(Arc::new(move |p: &P| f(outer(p)))),
            Getter::Double(f) => Getter::Double(Arc::new(move |p: &P| f(outer(p)))),
            Getter::Varchar(f) => Getter::Varchar(varchar_accessor(move |p: &P| f(outer(p)))),
        }
    }
}

/// The outcome of looking a field name up on a record type.
pub enum ResolvedField<R> {
    Scalar {
        data_type: LogicalType,
        getter: Getter<R>,
    },
    /// The field is itself a record, its own fields resolve through the returned resolver.
    Record(Arc<dyn FieldResolver<R>>),
}

impl<R> ResolvedField<R> {
    pub fn data_type(&self) -> LogicalType {
        match self {
            ResolvedField::Scalar { data_type, .. } => data_type.clone(),
            ResolvedField::Record(resolver) => {
                LogicalType::Record(resolver.type_name().to_string())
            }
        }
    }
}

/// Name-based field lookup on a record type `R`, done once per field at compile time.
pub trait FieldResolver<R>: Send + Sync {
    fn type_name(&self) -> &str;

    fn resolve(&self, name: &str) -> Option<ResolvedField<R>>;

    /// field names in declaration order
    fn field_names(&self) -> Vec<String>;
}

/// Resolves fields of an inner record `R` reachable from an outer record `P`.
pub(crate) struct Projection<P, R> {
    pub(crate) accessor: RecordAccessor<P, R>,
    pub(crate) inner: Arc<dyn FieldResolver<R>>,
}

impl<P: 'static, R: 'static> FieldResolver<P> for Projection<P, R> {
    fn type_name(&self) -> &str {
        self.inner.type_name()
    }

    fn resolve(&self, name: &str) -> Option<ResolvedField<P>> {
        Some(match self.inner.resolve(name)? {
            ResolvedField::Scalar { data_type, getter } => ResolvedField::Scalar {
                data_type,
                getter: getter.project(self.accessor.clone()),
            },
            ResolvedField::Record(inner) => ResolvedField::Record(Arc::new(Projection {
                accessor: self.accessor.clone(),
                inner,
            })),
        })
    }

    fn field_names(&self) -> Vec<String> {
        self.inner.field_names()
    }
}
