//! Argument resolution for title callbacks.
//!
//! # Responsibilities
//! - Inspect a callback's declared parameters
//! - Supply a value for each one from the request
//!
//! # Lookup Order (per parameter)
//! 1. Request attribute with the same name
//! 2. Raw variable with the same name (`null` for "no value")
//! 3. Declared default
//! 4. `null` if the parameter is nullable
//! 5. Otherwise `TitleError::MissingArgument`

use serde_json::Value;

use crate::controller::callable::TitleCallback;
use crate::controller::error::TitleError;
use crate::http::request::TitleRequest;

/// Computes the ordered argument list for a callable.
pub trait ArgumentResolver: Send + Sync {
    fn arguments(
        &self,
        request: &TitleRequest,
        callable: &dyn TitleCallback,
    ) -> Result<Vec<Value>, TitleError>;
}

/// Matches parameters by name against request attributes and raw variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestArgumentResolver;

impl ArgumentResolver for RequestArgumentResolver {
    fn arguments(
        &self,
        request: &TitleRequest,
        callable: &dyn TitleCallback,
    ) -> Result<Vec<Value>, TitleError> {
        callable
            .parameters()
            .iter()
            .map(|param| {
                if let Some(value) = request.attribute(&param.name) {
                    return Ok(value.clone());
                }
                if let Some(raw) = request.raw_variables().get(&param.name) {
                    return Ok(raw.map_or(Value::Null, Value::from));
                }
                if let Some(default) = &param.default {
                    return Ok(default.clone());
                }
                if param.nullable {
                    return Ok(Value::Null);
                }
                Err(TitleError::MissingArgument {
                    callable: callable.name().to_string(),
                    parameter: param.name.clone(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::callable::{FnCallback, ParameterSpec};
    use crate::controller::title::Title;
    use crate::http::request::ParameterBag;

    fn callback(parameters: Vec<ParameterSpec>) -> FnCallback {
        FnCallback::new("test.args", parameters, |_| Title::Text(String::new()))
    }

    #[test]
    fn test_attribute_wins_over_raw_variable() {
        let raw: ParameterBag = [("node", Some("7"))].into_iter().collect();
        let request = TitleRequest::new()
            .with_raw_variables(raw)
            .with_attribute("node", serde_json::json!({"id": 7}));

        let args = RequestArgumentResolver
            .arguments(&request, &callback(vec![ParameterSpec::required("node")]))
            .unwrap();

        assert_eq!(args, vec![serde_json::json!({"id": 7})]);
    }

    #[test]
    fn test_raw_variable_defaults_and_nullable_in_order() {
        let raw: ParameterBag = [("a", Some("one")), ("b", None)].into_iter().collect();
        let request = TitleRequest::new().with_raw_variables(raw);

        let args = RequestArgumentResolver
            .arguments(
                &request,
                &callback(vec![
                    ParameterSpec::required("a"),
                    ParameterSpec::required("b"),
                    ParameterSpec::optional("c", 3),
                    ParameterSpec::nullable("d"),
                ]),
            )
            .unwrap();

        assert_eq!(
            args,
            vec![Value::from("one"), Value::Null, Value::from(3), Value::Null]
        );
    }

    #[test]
    fn test_missing_required_parameter() {
        let err = RequestArgumentResolver
            .arguments(&TitleRequest::new(), &callback(vec![ParameterSpec::required("value")]))
            .unwrap_err();

        assert_eq!(
            err,
            TitleError::MissingArgument {
                callable: "test.args".into(),
                parameter: "value".into(),
            }
        );
    }
}
