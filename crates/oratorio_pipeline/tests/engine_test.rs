//! Integration tests for the pipeline execution engine.

use async_trait::async_trait;
use oratorio_core::{Field, Shape};
use oratorio_error::{ConfigError, OratorioErrorKind, OratorioResult, PipelineErrorKind};
use oratorio_pipeline::{InputBinding, Pipeline, Step, StepInputs, StepStatus, TRIGGER_KEY};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

type StepFn = Box<dyn Fn(&StepInputs) -> OratorioResult<Value> + Send + Sync>;

/// Scripted step that records its execution in a shared log.
struct TestStep {
    name: &'static str,
    inputs: Vec<InputBinding>,
    output_shape: Shape,
    log: Arc<Mutex<Vec<&'static str>>>,
    run: StepFn,
}

impl TestStep {
    fn new(
        name: &'static str,
        inputs: Vec<InputBinding>,
        output_shape: Shape,
        log: &Arc<Mutex<Vec<&'static str>>>,
        run: impl Fn(&StepInputs) -> OratorioResult<Value> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            name,
            inputs,
            output_shape,
            log: log.clone(),
            run: Box::new(run),
        })
    }

    fn constant(
        name: &'static str,
        log: &Arc<Mutex<Vec<&'static str>>>,
        output: Value,
    ) -> Arc<Self> {
        Self::new(name, vec![], Shape::Any, log, move |_| Ok(output.clone()))
    }
}

#[async_trait]
impl Step for TestStep {
    fn name(&self) -> &str {
        self.name
    }

    fn inputs(&self) -> &[InputBinding] {
        &self.inputs
    }

    fn output_shape(&self) -> &Shape {
        &self.output_shape
    }

    async fn execute(&self, inputs: &StepInputs) -> OratorioResult<Value> {
        self.log.lock().unwrap().push(self.name);
        (self.run)(inputs)
    }
}

fn trigger_shape() -> Shape {
    Shape::Object(vec![Field::required("topic", Shape::String)])
}

fn trigger() -> Value {
    json!({"topic": "startups"})
}

fn configuration_kind(err: &oratorio_error::PipelineError) -> &str {
    match &err.kind {
        PipelineErrorKind::Configuration(message) => message.as_str(),
        other => panic!("expected a configuration error, got {other}"),
    }
}

#[tokio::test]
async fn steps_run_in_registration_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut pipeline = Pipeline::new("ordering", trigger_shape());
    pipeline
        .register(TestStep::constant("first", &log, json!(1)))
        .unwrap();
    pipeline
        .register(TestStep::constant("second", &log, json!(2)))
        .unwrap();
    pipeline
        .register(TestStep::constant("third", &log, json!(3)))
        .unwrap();
    pipeline.commit().unwrap();

    let outcome = pipeline.run(trigger()).await.unwrap();
    assert!(outcome.succeeded());
    assert_eq!(*log.lock().unwrap(), vec!["first", "second", "third"]);
    for name in ["first", "second", "third"] {
        assert_eq!(outcome.status(name), Some(StepStatus::Success));
    }
}

#[tokio::test]
async fn dependent_step_reads_predecessor_output() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut pipeline = Pipeline::new("dependency", trigger_shape());
    pipeline
        .register(TestStep::constant("double", &log, json!({"x": 5})))
        .unwrap();
    pipeline
        .register(TestStep::new(
            "increment",
            vec![InputBinding::new(
                "double",
                Shape::Object(vec![Field::required("x", Shape::Integer)]),
            )],
            Shape::Integer,
            &log,
            |inputs| {
                let x = inputs.require("double")?["x"].as_i64().unwrap_or(0);
                Ok(json!(x + 1))
            },
        ))
        .unwrap();
    pipeline.commit().unwrap();

    let outcome = pipeline.run(trigger()).await.unwrap();
    assert_eq!(outcome.output("increment"), Some(&json!(6)));
}

#[tokio::test]
async fn trigger_payload_is_visible_to_steps() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut pipeline = Pipeline::new("trigger-read", trigger_shape());
    pipeline
        .register(TestStep::new(
            "echo",
            vec![InputBinding::trigger(trigger_shape())],
            Shape::String,
            &log,
            |inputs| {
                let topic = inputs.require(TRIGGER_KEY)?["topic"]
                    .as_str()
                    .unwrap_or_default()
                    .to_string();
                Ok(Value::String(topic))
            },
        ))
        .unwrap();
    pipeline.commit().unwrap();

    let outcome = pipeline.run(trigger()).await.unwrap();
    assert_eq!(outcome.output("echo"), Some(&json!("startups")));
}

#[test]
fn registration_after_commit_is_rejected() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut pipeline = Pipeline::new("sealed", trigger_shape());
    pipeline.commit().unwrap();

    let err = pipeline
        .register(TestStep::constant("late", &log, json!(null)))
        .unwrap_err();
    assert!(configuration_kind(&err).contains("committed"));
}

#[test]
fn duplicate_step_names_are_rejected() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut pipeline = Pipeline::new("dupes", trigger_shape());
    pipeline
        .register(TestStep::constant("step", &log, json!(1)))
        .unwrap();

    let err = pipeline
        .register(TestStep::constant("step", &log, json!(2)))
        .unwrap_err();
    assert!(configuration_kind(&err).contains("duplicate"));
}

#[test]
fn reserved_trigger_name_is_rejected() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut pipeline = Pipeline::new("reserved", trigger_shape());

    let err = pipeline
        .register(TestStep::constant(TRIGGER_KEY, &log, json!(1)))
        .unwrap_err();
    assert!(configuration_kind(&err).contains("reserved"));
}

#[test]
fn bindings_may_only_reach_backwards() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut pipeline = Pipeline::new("dangling", trigger_shape());

    let err = pipeline
        .register(TestStep::new(
            "reader",
            vec![InputBinding::new("missing", Shape::Any)],
            Shape::Any,
            &log,
            |_| Ok(json!(null)),
        ))
        .unwrap_err();
    assert!(configuration_kind(&err).contains("missing"));
}

#[test]
fn double_commit_is_rejected() {
    let mut pipeline = Pipeline::new("twice", trigger_shape());
    pipeline.commit().unwrap();
    let err = pipeline.commit().unwrap_err();
    assert!(configuration_kind(&err).contains("already committed"));
}

#[tokio::test]
async fn uncommitted_pipeline_refuses_to_run() {
    let pipeline = Pipeline::new("open", trigger_shape());
    let err = pipeline.run(trigger()).await.unwrap_err();
    assert!(err.to_string().contains("committed"));
}

#[tokio::test]
async fn invalid_trigger_fails_before_any_step_runs() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut pipeline = Pipeline::new("validation", trigger_shape());
    pipeline
        .register(TestStep::constant("only", &log, json!(1)))
        .unwrap();
    pipeline.commit().unwrap();

    let err = pipeline.run(json!({"topic": 42})).await.unwrap_err();
    match err.kind() {
        OratorioErrorKind::Pipeline(pipeline_err) => {
            assert!(matches!(
                pipeline_err.kind,
                PipelineErrorKind::Validation { .. }
            ));
        }
        other => panic!("expected a pipeline validation error, got {other}"),
    }
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn trigger_defaults_are_filled_before_seeding() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let shape = Shape::Object(vec![
        Field::required("topic", Shape::String),
        Field::with_default("length", Shape::Integer, json!(1000)),
    ]);
    let mut pipeline = Pipeline::new("defaults", shape.clone());
    pipeline
        .register(TestStep::new(
            "reader",
            vec![InputBinding::trigger(shape)],
            Shape::Integer,
            &log,
            |inputs| Ok(inputs.require(TRIGGER_KEY)?["length"].clone()),
        ))
        .unwrap();
    pipeline.commit().unwrap();

    let outcome = pipeline.run(json!({"topic": "startups"})).await.unwrap();
    assert_eq!(outcome.output("reader"), Some(&json!(1000)));
}

#[tokio::test]
async fn failed_step_cascades_to_dependents_but_not_bystanders() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut pipeline = Pipeline::new("cascade", trigger_shape());
    pipeline
        .register(TestStep::new(
            "flaky",
            vec![],
            Shape::Any,
            &log,
            |_| Err(ConfigError::new("scripted failure").into()),
        ))
        .unwrap();
    pipeline
        .register(TestStep::new(
            "dependent",
            vec![InputBinding::new("flaky", Shape::Any)],
            Shape::Any,
            &log,
            |_| Ok(json!(null)),
        ))
        .unwrap();
    pipeline
        .register(TestStep::new(
            "grandchild",
            vec![InputBinding::new("dependent", Shape::Any)],
            Shape::Any,
            &log,
            |_| Ok(json!(null)),
        ))
        .unwrap();
    pipeline
        .register(TestStep::constant("bystander", &log, json!("ran")))
        .unwrap();
    pipeline.commit().unwrap();

    let outcome = pipeline.run(trigger()).await.unwrap();
    assert_eq!(outcome.status("flaky"), Some(StepStatus::Failed));
    assert_eq!(outcome.status("dependent"), Some(StepStatus::Skipped));
    assert_eq!(outcome.status("grandchild"), Some(StepStatus::Skipped));
    assert_eq!(outcome.status("bystander"), Some(StepStatus::Success));
    // Skipped steps never execute
    assert_eq!(*log.lock().unwrap(), vec!["flaky", "bystander"]);

    let err = outcome.into_result().unwrap_err();
    match err.kind() {
        OratorioErrorKind::Pipeline(pipeline_err) => {
            assert_eq!(pipeline_err.kind.step(), Some("flaky"));
            assert!(matches!(
                pipeline_err.kind,
                PipelineErrorKind::StepExecution { .. }
            ));
        }
        other => panic!("expected a step execution error, got {other}"),
    }
}

#[tokio::test]
async fn output_contract_violation_fails_the_step() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut pipeline = Pipeline::new("contract", trigger_shape());
    pipeline
        .register(TestStep::new(
            "mistyped",
            vec![],
            Shape::String,
            &log,
            |_| Ok(json!(42)),
        ))
        .unwrap();
    pipeline.commit().unwrap();

    let outcome = pipeline.run(trigger()).await.unwrap();
    assert_eq!(outcome.status("mistyped"), Some(StepStatus::Failed));
    assert!(!outcome.succeeded());
    assert!(outcome.output("mistyped").is_none());
}

#[tokio::test]
async fn first_fault_wins_when_several_steps_fail() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut pipeline = Pipeline::new("faults", trigger_shape());
    for name in ["early", "late"] {
        pipeline
            .register(TestStep::new(name, vec![], Shape::Any, &log, move |_| {
                Err(ConfigError::new(format!("{name} failure")).into())
            }))
            .unwrap();
    }
    pipeline.commit().unwrap();

    let outcome = pipeline.run(trigger()).await.unwrap();
    assert_eq!(outcome.status("early"), Some(StepStatus::Failed));
    assert_eq!(outcome.status("late"), Some(StepStatus::Failed));
    let fault = outcome.fault().as_ref().unwrap();
    assert_eq!(fault.kind.step(), Some("early"));
}

#[tokio::test]
async fn committed_pipeline_supports_concurrent_runs() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut pipeline = Pipeline::new("concurrent", trigger_shape());
    pipeline
        .register(TestStep::new(
            "echo",
            vec![InputBinding::trigger(trigger_shape())],
            Shape::String,
            &log,
            |inputs| Ok(inputs.require(TRIGGER_KEY)?["topic"].clone()),
        ))
        .unwrap();
    pipeline.commit().unwrap();
    let pipeline = Arc::new(pipeline);

    let runs = ["alpha", "beta", "gamma"].map(|topic| {
        let pipeline = pipeline.clone();
        tokio::spawn(async move { pipeline.run(json!({"topic": topic})).await })
    });
    for (expected, handle) in ["alpha", "beta", "gamma"].into_iter().zip(runs) {
        let outcome = handle.await.unwrap().unwrap();
        assert_eq!(outcome.output("echo"), Some(&json!(expected)));
    }
}
