use std::any::type_name;
use std::sync::Arc;
use std::time::Duration;

use log::debug;

use super::{SourceError, SourceOptions};
use crate::catalog::{AvailableTypes, SchemaRef};
use crate::compiler::{CompileError, PredicateCompiler};
use crate::parser::{Lambda, LambdaParser};
use crate::predicate::Predicate;

static LOGGING_TARGET: &str = "predrs::source";

/// Compile lambda source text against an allow-list of record schemas.
pub fn compile_from_source<R: Send + Sync + 'static>(
    source: &str,
    types: &AvailableTypes,
) -> Result<Predicate<R>, SourceError> {
    compile_lambda(source, types, &SourceOptions::default())
}

/// Same as [`compile_from_source`], without blocking the calling task.
pub async fn compile_from_source_async<R: Send + Sync + 'static>(
    source: impl Into<String>,
    types: Arc<AvailableTypes>,
) -> Result<Predicate<R>, SourceError> {
    SourceCompiler::new(types).compile_async(source).await
}

/// Compiles source text into predicates. Cloning is cheap and clones share the allow-list.
#[derive(Debug, Clone)]
pub struct SourceCompiler {
    types: Arc<AvailableTypes>,
    options: SourceOptions,
}

impl SourceCompiler {
    pub fn new(types: impl Into<Arc<AvailableTypes>>) -> Self {
        Self::with_options(types, SourceOptions::default())
    }

    pub fn with_options(types: impl Into<Arc<AvailableTypes>>, options: SourceOptions) -> Self {
        Self {
            types: types.into(),
            options,
        }
    }

    pub fn available_types(&self) -> &AvailableTypes {
        &self.types
    }

    pub fn options(&self) -> &SourceOptions {
        &self.options
    }

    pub fn compile<R: Send + Sync + 'static>(
        &self,
        source: &str,
    ) -> Result<Predicate<R>, SourceError> {
        compile_lambda(source, &self.types, &self.options)
    }

    /// Parse and compile on the blocking pool, bounded by `options.timeout`. A compilation that
    /// times out or whose task dies yields no predicate.
    pub async fn compile_async<R: Send + Sync + 'static>(
        &self,
        source: impl Into<String>,
    ) -> Result<Predicate<R>, SourceError> {
        let source = source.into();
        let compiler = self.clone();
        run_bounded(self.options.timeout, move || compiler.compile::<R>(&source)).await?
    }
}

/// Run `f` on the blocking pool. Its output is dropped unseen when it is not ready within
/// `timeout`, when the task panics, or when the returned future is dropped.
async fn run_bounded<T, F>(timeout: Duration, f: F) -> Result<T, SourceError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let task = tokio::task::spawn_blocking(f);
    match tokio::time::timeout(timeout, task).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(err)) => {
            debug!(target: LOGGING_TARGET, "Source compilation task failed: {}", err);
            Err(SourceError::Cancelled)
        }
        Err(_) => {
            debug!(target: LOGGING_TARGET, "Source compilation exceeded {:?}", timeout);
            Err(SourceError::TimedOut(timeout))
        }
    }
}

fn compile_lambda<R: Send + Sync + 'static>(
    source: &str,
    types: &AvailableTypes,
    options: &SourceOptions,
) -> Result<Predicate<R>, SourceError> {
    if source.len() > options.max_source_len {
        return Err(SourceError::SourceTooLong {
            len: source.len(),
            limit: options.max_source_len,
        });
    }

    let lambda = LambdaParser::new(source, options.max_nesting)?.parse()?;
    debug!(target: LOGGING_TARGET, "Source parsed lambda: {}", lambda);

    let schema = resolve_record_type::<R>(&lambda, types)?;
    check_free_references(&lambda, types)?;

    let predicate = PredicateCompiler::new(schema.as_ref()).compile(&lambda.body)?;
    Ok(predicate.with_description(lambda.to_string()))
}

/// The schema the lambda parameter is typed with, taken from the allow-list only.
fn resolve_record_type<R: Send + Sync + 'static>(
    lambda: &Lambda,
    types: &AvailableTypes,
) -> Result<SchemaRef<R>, SourceError> {
    if let Some(name) = &lambda.parameter_type {
        return match types.get_typed::<R>(name) {
            Some(Ok(schema)) => Ok(schema),
            Some(Err(_)) => Err(SourceError::RecordTypeMismatch {
                name: name.clone(),
                requested: type_name::<R>().to_string(),
            }),
            None => {
                debug!(
                    target: LOGGING_TARGET,
                    "Source rejected record type {}, available: {:?}", name, types
                );
                Err(SourceError::UnauthorizedReference(name.clone()))
            }
        };
    }

    let mut candidates = types.schemas_for::<R>();
    match candidates.len() {
        0 => Err(SourceError::UnauthorizedReference(
            type_name::<R>().to_string(),
        )),
        1 => Ok(candidates.remove(0)),
        _ => Err(SourceError::AmbiguousRecordType(
            type_name::<R>().to_string(),
            candidates.iter().map(|s| s.name.clone()).collect(),
        )),
    }
}

/// Every path must start at the lambda parameter. Type names have no static fields, and any other
/// name is outside of the allow-list.
fn check_free_references(lambda: &Lambda, types: &AvailableTypes) -> Result<(), SourceError> {
    match lambda.free_references().first() {
        None => Ok(()),
        Some(name) if types.contains(name) => Err(CompileError::MalformedTree(format!(
            "`{}` is a record type, only `{}` can be read from",
            name, lambda.parameter
        ))
        .into()),
        Some(name) => Err(SourceError::UnauthorizedReference(name.to_string())),
    }
}

#[cfg(test)]
mod evaluator_test {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;
    use crate::catalog::Schema;
    use crate::parser::{Location, SyntaxError};
    use crate::source::SourceOptionsBuilder;
    use crate::test_fixtures::{available_types, names, seed, Coach, Player};

    fn run(source: &str) -> Vec<String> {
        let predicate = compile_from_source::<Player>(source, &available_types()).unwrap();
        names(seed().iter().filter(|p| predicate.test(p)))
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test_case("tp -> tp.victory > 19400000", vec!["Roger"])]
    #[test_case("tp -> tp.victory > 19_400_000", vec!["Roger"])]
    #[test_case("(tp: Player) -> tp.victory > 19400000", vec!["Roger"])]
    #[test_case("tp -> tp.victory > 100_000_000", vec![])]
    #[test_case("tp => tp.coach.name == 'Carlos'", vec!["Rafael"])]
    #[test_case("tp -> 'Nadal' = tp.surname", vec!["Rafael"])]
    #[test_case("tp -> tp.active <> true", vec!["Roger"])]
    #[test_case("tp -> (tp.age >= 36) = false", vec!["Rafael"])]
    #[test_case("tp -> tp.ranking <= tp.coach.titles", vec!["Rafael", "Roger"])]
    fn test_compile_and_filter(source: &str, expected: Vec<&str>) {
        assert_eq!(run(source), expected);
    }

    #[test]
    fn test_description_is_normalised_source() {
        let predicate =
            compile_from_source::<Player>("tp=>tp.victory>19_400_000", &available_types()).unwrap();
        assert_eq!(predicate.description(), "tp -> tp.victory > 19400000");
    }

    #[test]
    fn test_unknown_field() {
        let err = compile_from_source::<Player>("tp -> tp.unknownField > 1", &available_types())
            .unwrap_err();
        assert_eq!(
            err,
            SourceError::Compile(CompileError::UnknownField("unknownField".to_string()))
        );
    }

    #[test]
    fn test_type_mismatch() {
        let err = compile_from_source::<Player>("tp -> tp.name > 1", &available_types())
            .unwrap_err();
        assert!(matches!(
            err,
            SourceError::Compile(CompileError::TypeMismatch(..))
        ));
    }

    #[test]
    fn test_syntax_error() {
        let err = compile_from_source::<Player>("tp -> tp.victory >", &available_types())
            .unwrap_err();
        assert_eq!(
            err,
            SourceError::SyntaxError(SyntaxError::new(
                Location::new(1, 19),
                "expected an operand, found end of input"
            ))
        );
    }

    #[test]
    fn test_unregistered_typed_header() {
        let err = compile_from_source::<Player>(
            "(tp: TennisPlayer) -> tp.victory > 1",
            &available_types(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            SourceError::UnauthorizedReference("TennisPlayer".to_string())
        );
    }

    #[test]
    fn test_unregistered_record_type() {
        let err = compile_from_source::<Player>("tp -> tp.victory > 1", &AvailableTypes::new())
            .unwrap_err();
        assert_eq!(
            err,
            SourceError::UnauthorizedReference(type_name::<Player>().to_string())
        );
    }

    #[test]
    fn test_typed_header_of_other_record() {
        let err = compile_from_source::<Player>("(c: Coach) -> c.titles > 1", &available_types())
            .unwrap_err();
        assert_eq!(
            err,
            SourceError::RecordTypeMismatch {
                name: "Coach".to_string(),
                requested: type_name::<Player>().to_string(),
            }
        );

        let coach = compile_from_source::<Coach>("(c: Coach) -> c.titles > 5", &available_types())
            .unwrap();
        assert!(coach.test(&seed()[1].coach));
    }

    #[test]
    fn test_free_references() {
        let err = compile_from_source::<Player>(
            "tp -> std.env.HOME == tp.name",
            &available_types(),
        )
        .unwrap_err();
        assert_eq!(err, SourceError::UnauthorizedReference("std".to_string()));

        let err = compile_from_source::<Player>("tp -> Coach.name == tp.name", &available_types())
            .unwrap_err();
        assert!(matches!(
            err,
            SourceError::Compile(CompileError::MalformedTree(_))
        ));
    }

    #[test]
    fn test_ambiguous_record_type() {
        let mut types = available_types();
        let veteran = Schema::builder("Veteran")
            .integer("age", |p: &Player| p.age)
            .build()
            .unwrap();
        types.register(Arc::new(veteran)).unwrap();

        let err = compile_from_source::<Player>("tp -> tp.age > 36", &types).unwrap_err();
        assert_eq!(
            err,
            SourceError::AmbiguousRecordType(
                type_name::<Player>().to_string(),
                vec!["Player".to_string(), "Veteran".to_string()]
            )
        );
        // a typed header picks one
        let predicate =
            compile_from_source::<Player>("(tp: Veteran) -> tp.age > 36", &types).unwrap();
        assert!(predicate.test(&seed()[1]));
    }

    #[test]
    fn test_limits() {
        let options = SourceOptionsBuilder::default()
            .max_source_len(16)
            .build()
            .unwrap();
        let compiler = SourceCompiler::with_options(available_types(), options);
        let err = compiler
            .compile::<Player>("tp -> tp.victory > 19400000")
            .unwrap_err();
        assert_eq!(err, SourceError::SourceTooLong { len: 27, limit: 16 });

        let options = SourceOptionsBuilder::default()
            .max_nesting(1)
            .build()
            .unwrap();
        let compiler = SourceCompiler::with_options(available_types(), options);
        assert!(compiler.compile::<Player>("t -> (t.age) > 1").is_ok());
        let err = compiler.compile::<Player>("t -> ((t.age)) > 1").unwrap_err();
        assert_eq!(
            err,
            SourceError::SyntaxError(SyntaxError::new(
                Location::new(1, 7),
                "expression nested deeper than 1 levels"
            ))
        );
    }

    #[tokio::test]
    async fn test_compile_async() {
        let compiler = SourceCompiler::new(available_types());
        let predicate = compiler
            .compile_async::<Player>("tp -> tp.victory > 19_400_000")
            .await
            .unwrap();
        assert_eq!(names(seed().iter().filter(|p| predicate.test(p))), vec!["Roger"]);

        let err = compile_from_source_async::<Player>(
            "tp -> tp.unknownField > 1",
            Arc::new(available_types()),
        )
        .await
        .unwrap_err();
        assert_eq!(
            err,
            SourceError::Compile(CompileError::UnknownField("unknownField".to_string()))
        );
    }

    #[tokio::test]
    async fn test_run_bounded_timed_out() {
        let timeout = Duration::from_millis(10);
        let err = run_bounded(timeout, || {
            std::thread::sleep(Duration::from_millis(200));
            Predicate::<Player>::from_fn(|p| p.age > 1)
        })
        .await
        .unwrap_err();
        assert_eq!(err, SourceError::TimedOut(timeout));
    }

    #[tokio::test]
    async fn test_run_bounded_task_panicked() {
        let err = run_bounded::<Predicate<Player>, _>(Duration::from_secs(5), || {
            panic!("compilation aborted")
        })
        .await
        .unwrap_err();
        assert_eq!(err, SourceError::Cancelled);
    }

    #[tokio::test]
    async fn test_dropped_compilation_yields_nothing() {
        let token = Arc::new(());
        let alive = Arc::downgrade(&token);
        let compilation = run_bounded(Duration::from_secs(5), move || {
            std::thread::sleep(Duration::from_millis(50));
            Predicate::<Player>::from_fn(move |p| {
                let _ = &token;
                p.age > 1
            })
        });
        // the caller gives up before the blocking task completes
        let abandoned = tokio::time::timeout(Duration::from_millis(5), compilation).await;
        assert!(abandoned.is_err());

        // once the task finishes, its predicate is dropped instead of handed out
        let mut waited = Duration::ZERO;
        while alive.upgrade().is_some() && waited < Duration::from_secs(2) {
            tokio::time::sleep(Duration::from_millis(10)).await;
            waited += Duration::from_millis(10);
        }
        assert!(alive.upgrade().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_compilations() {
        let compiler = SourceCompiler::new(available_types());
        let sources = ["tp -> tp.age > 35", "tp -> tp.age > 36", "tp -> tp.age > 37"];
        let results = futures::future::join_all(
            sources
                .iter()
                .map(|source| compiler.compile_async::<Player>(*source)),
        )
        .await;
        let counts = results
            .into_iter()
            .map(|predicate| {
                let predicate = predicate.unwrap();
                seed().iter().filter(|p| predicate.test(p)).count()
            })
            .collect::<Vec<_>>();
        assert_eq!(counts, vec![1, 1, 0]);
    }
}
