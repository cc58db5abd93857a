//! Route title resolution.
//!
//! # Responsibilities
//! - Produce the title for a matched route and its request
//! - Invoke `_title_callback` with resolved arguments
//! - Wrap `_title` with raw-variable substitutions and `_title_context`
//!
//! # Design Decisions
//! - Stateless: a pure function of (request, route) plus the injected collaborators
//! - Every raw variable is offered as both `@name` and `%name`, whether or
//!   not the template uses it
//! - A route's pre-bound callback skips the registry lookup

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::controller::argument::ArgumentResolver;
use crate::controller::callable::CallableResolver;
use crate::controller::error::TitleError;
use crate::controller::title::Title;
use crate::http::request::{ParameterBag, TitleRequest};
use crate::routing::Route;
use crate::translation::Translator;

/// Resolves page titles from route definitions.
#[derive(Clone)]
pub struct TitleResolver {
    callables: Arc<dyn CallableResolver>,
    translator: Arc<dyn Translator>,
    arguments: Arc<dyn ArgumentResolver>,
}

impl TitleResolver {
    pub fn new(
        callables: Arc<dyn CallableResolver>,
        translator: Arc<dyn Translator>,
        arguments: Arc<dyn ArgumentResolver>,
    ) -> Self {
        Self {
            callables,
            translator,
            arguments,
        }
    }

    /// The translator titles are wrapped with, for rendering them later.
    pub fn translator(&self) -> &dyn Translator {
        self.translator.as_ref()
    }

    /// Compute the title for `route`.
    ///
    /// Returns `Ok(None)` when the route defines neither `_title` nor
    /// `_title_callback`; the caller decides on a fallback.
    pub fn get_title(
        &self,
        request: &TitleRequest,
        route: &Route,
    ) -> Result<Option<Title>, TitleError> {
        if let Some(identifier) = route.title_callback() {
            let callable = match route.bound_callback() {
                Some(callable) => callable.clone(),
                None => self.callables.resolve(identifier)?,
            };
            let arguments = self.arguments.arguments(request, callable.as_ref())?;
            tracing::trace!(
                route = %route.name(),
                callback = %identifier,
                arguments = arguments.len(),
                "Invoking title callback"
            );
            return Ok(Some(callable.invoke(arguments)));
        }

        if let Some(template) = route.title() {
            let substitutions = substitutions(request.raw_variables());
            let markup = self
                .translator
                .wrap(template, substitutions, route.title_context());
            return Ok(Some(Title::Translatable(markup)));
        }

        Ok(None)
    }
}

/// `@name` and `%name` for every raw variable; "no value" becomes `""`.
fn substitutions(raw_variables: &ParameterBag) -> BTreeMap<String, String> {
    let mut arguments = BTreeMap::new();
    for (name, value) in raw_variables.iter() {
        let value = value.unwrap_or_default();
        arguments.insert(format!("@{name}"), value.to_string());
        arguments.insert(format!("%{name}"), value.to_string());
    }
    arguments
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use serde_json::Value;

    use crate::controller::argument::RequestArgumentResolver;
    use crate::controller::callable::{CallbackRegistry, FnCallback, ParameterSpec, TitleCallback};
    use crate::routing::route::{TITLE, TITLE_CALLBACK, TITLE_CONTEXT};
    use crate::translation::{PassthroughTranslator, TranslatableMarkup, TranslationOptions};

    /// Records lookups and answers from a fixed registry.
    #[derive(Default)]
    struct RecordingCallables {
        registry: CallbackRegistry,
        calls: Mutex<Vec<String>>,
    }

    impl CallableResolver for RecordingCallables {
        fn resolve(&self, identifier: &str) -> Result<Arc<dyn TitleCallback>, TitleError> {
            self.calls.lock().unwrap().push(identifier.to_string());
            self.registry.resolve(identifier)
        }
    }

    /// Returns canned arguments and counts invocations.
    struct FixedArguments {
        values: Vec<Value>,
        calls: Mutex<usize>,
    }

    impl ArgumentResolver for FixedArguments {
        fn arguments(
            &self,
            _request: &TitleRequest,
            _callable: &dyn TitleCallback,
        ) -> Result<Vec<Value>, TitleError> {
            *self.calls.lock().unwrap() += 1;
            Ok(self.values.clone())
        }
    }

    fn example_callback() -> FnCallback {
        FnCallback::new(
            "title_callback.example",
            vec![ParameterSpec::required("value")],
            |args| {
                let value = args.first().and_then(Value::as_str).unwrap_or_default();
                Title::Text(format!("test {value}"))
            },
        )
    }

    fn resolver() -> TitleResolver {
        TitleResolver::new(
            Arc::new(CallbackRegistry::new()),
            Arc::new(PassthroughTranslator),
            Arc::new(RequestArgumentResolver),
        )
    }

    fn markup(source: &str, arguments: &[(&str, &str)], context: Option<&str>) -> Title {
        Title::Translatable(TranslatableMarkup::new(
            source,
            arguments
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            TranslationOptions {
                context: context.map(str::to_string),
                langcode: None,
            },
        ))
    }

    #[test]
    fn test_static_title() {
        let route = Route::new("/test-route").with_default(TITLE, "static title");
        let title = resolver().get_title(&TitleRequest::new(), &route).unwrap();
        assert_eq!(title, Some(markup("static title", &[], None)));
    }

    #[test]
    fn test_static_title_with_context() {
        let route = Route::new("/test-route")
            .with_default(TITLE, "static title")
            .with_default(TITLE_CONTEXT, "context");
        let title = resolver().get_title(&TitleRequest::new(), &route).unwrap();
        assert_eq!(title, Some(markup("static title", &[], Some("context"))));
    }

    #[test]
    fn test_static_title_with_parameter() {
        let raw: ParameterBag = [("test", Some("value")), ("test2", Some("value2"))]
            .into_iter()
            .collect();
        let request = TitleRequest::new().with_raw_variables(raw);
        let expected_args = [
            ("@test", "value"),
            ("%test", "value"),
            ("@test2", "value2"),
            ("%test2", "value2"),
        ];

        for template in ["static title @test", "static title %test"] {
            let route = Route::new("/test-route").with_default(TITLE, template);
            let title = resolver().get_title(&request, &route).unwrap();
            assert_eq!(title, Some(markup(template, &expected_args, None)));
        }
    }

    #[test]
    fn test_static_title_with_null_value_parameter() {
        let raw: ParameterBag = [("test", None), ("test2", Some("value"))].into_iter().collect();
        let request = TitleRequest::new().with_raw_variables(raw);
        let route = Route::new("/test-route").with_default(TITLE, "static title %test @test");

        let title = resolver().get_title(&request, &route).unwrap().unwrap();
        let args = title.as_translatable().unwrap().arguments();

        assert_eq!(args["@test"], "");
        assert_eq!(args["%test"], "");
        assert_eq!(args["@test2"], "value");
        assert_eq!(args["%test2"], "value");
        assert_eq!(
            title.render(&PassthroughTranslator),
            "static title <em class=\"placeholder\"></em> "
        );
    }

    #[test]
    fn test_dynamic_title() {
        let callables = Arc::new(RecordingCallables::default());
        callables.registry.register(example_callback());
        let arguments = Arc::new(FixedArguments {
            values: vec![Value::from("example")],
            calls: Mutex::new(0),
        });
        let resolver = TitleResolver::new(
            callables.clone(),
            Arc::new(PassthroughTranslator),
            arguments.clone(),
        );

        let route = Route::new("/test-route")
            .with_default(TITLE, "static title")
            .with_default(TITLE_CALLBACK, "title_callback.example");

        let title = resolver.get_title(&TitleRequest::new(), &route).unwrap();

        assert_eq!(title, Some(Title::Text("test example".into())));
        assert_eq!(
            *callables.calls.lock().unwrap(),
            vec!["title_callback.example".to_string()]
        );
        assert_eq!(*arguments.calls.lock().unwrap(), 1);
    }

    #[test]
    fn test_dynamic_title_arguments_from_request() {
        let registry = CallbackRegistry::new();
        registry.register(example_callback());
        let resolver = TitleResolver::new(
            Arc::new(registry),
            Arc::new(PassthroughTranslator),
            Arc::new(RequestArgumentResolver),
        );
        let raw: ParameterBag = [("value", Some("example"))].into_iter().collect();
        let request = TitleRequest::new().with_raw_variables(raw);
        let route =
            Route::new("/test/{value}").with_default(TITLE_CALLBACK, "title_callback.example");

        let title = resolver.get_title(&request, &route).unwrap();
        assert_eq!(title, Some(Title::Text("test example".into())));
    }

    #[test]
    fn test_bound_callback_skips_lookup() {
        let callables = Arc::new(RecordingCallables::default());
        let resolver = TitleResolver::new(
            callables.clone(),
            Arc::new(PassthroughTranslator),
            Arc::new(FixedArguments {
                values: vec![Value::from("bound")],
                calls: Mutex::new(0),
            }),
        );
        let route = Route::new("/test-route")
            .with_default(TITLE_CALLBACK, "title_callback.example")
            .with_bound_callback(Arc::new(example_callback()));

        let title = resolver.get_title(&TitleRequest::new(), &route).unwrap();

        assert_eq!(title, Some(Title::Text("test bound".into())));
        assert!(callables.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_callback_does_not_fall_back() {
        let route = Route::new("/test-route")
            .with_default(TITLE, "static title")
            .with_default(TITLE_CALLBACK, "missing.callback");

        let err = resolver().get_title(&TitleRequest::new(), &route).unwrap_err();
        assert_eq!(
            err,
            TitleError::CallableNotFound {
                identifier: "missing.callback".into()
            }
        );
    }

    #[test]
    fn test_missing_argument_propagates() {
        let registry = CallbackRegistry::new();
        registry.register(example_callback());
        let resolver = TitleResolver::new(
            Arc::new(registry),
            Arc::new(PassthroughTranslator),
            Arc::new(RequestArgumentResolver),
        );
        let route =
            Route::new("/test-route").with_default(TITLE_CALLBACK, "title_callback.example");

        let err = resolver.get_title(&TitleRequest::new(), &route).unwrap_err();
        assert_eq!(err.kind(), "missing_argument");
    }

    #[test]
    fn test_no_title() {
        let route = Route::new("/test-route");
        assert_eq!(resolver().get_title(&TitleRequest::new(), &route).unwrap(), None);
    }

    #[test]
    fn test_static_title_is_idempotent() {
        let raw: ParameterBag = [("test", Some("value"))].into_iter().collect();
        let request = TitleRequest::new().with_raw_variables(raw);
        let route = Route::new("/test-route").with_default(TITLE, "static title @test");
        let resolver = resolver();

        let first = resolver.get_title(&request, &route).unwrap();
        let second = resolver.get_title(&request, &route).unwrap();
        assert_eq!(first, second);
    }
}
