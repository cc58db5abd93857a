//! Title callbacks shipped with the server.
//!
//! - `system.route_name`: the matched route's machine name
//! - `system.echo_value`: the `value` path variable, verbatim

use serde_json::Value;

use crate::controller::callable::{CallbackRegistry, FnCallback, ParameterSpec};
use crate::controller::title::Title;
use crate::http::request::ROUTE_NAME_ATTRIBUTE;

pub const ROUTE_NAME: &str = "system.route_name";
pub const ECHO_VALUE: &str = "system.echo_value";

/// Register every built-in callback.
pub fn register_defaults(registry: &CallbackRegistry) {
    registry.register(FnCallback::new(
        ROUTE_NAME,
        vec![ParameterSpec::required(ROUTE_NAME_ATTRIBUTE)],
        |args| Title::Text(first_as_text(&args)),
    ));
    registry.register(FnCallback::new(
        ECHO_VALUE,
        vec![ParameterSpec::required("value")],
        |args| Title::Text(first_as_text(&args)),
    ));
}

fn first_as_text(args: &[Value]) -> String {
    match args.first() {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::callable::CallableResolver;

    #[test]
    fn test_defaults_registered() {
        let registry = CallbackRegistry::new();
        register_defaults(&registry);

        assert_eq!(
            registry.identifiers(),
            vec![ECHO_VALUE.to_string(), ROUTE_NAME.to_string()]
        );

        let echo = registry.resolve(ECHO_VALUE).unwrap();
        assert_eq!(echo.invoke(vec![Value::from("hello")]), Title::Text("hello".into()));
        assert_eq!(echo.invoke(vec![Value::Null]), Title::Text(String::new()));
        assert_eq!(echo.invoke(vec![Value::from(7)]), Title::Text("7".into()));
    }
}
