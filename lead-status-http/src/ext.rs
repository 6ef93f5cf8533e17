//! Extension methods for `http::Request` types

use std::collections::HashMap;

/// Path parameters extracted by the API Gateway route template,
/// e.g. `id` for a route declared as `/api/leads/{id}`.
///
/// ALB events never carry path parameters.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PathParameters(pub HashMap<String, String>);

impl PathParameters {
    /// Return the value of the named parameter, if present
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

impl From<HashMap<String, String>> for PathParameters {
    fn from(params: HashMap<String, String>) -> Self {
        PathParameters(params)
    }
}

/// Request extensions for the data proxy events attach to a request
pub trait RequestExt {
    /// Return the value of a path parameter captured by the route template.
    ///
    /// Returns `None` both when the parameter is missing and when the event
    /// carried no path parameters at all.
    fn path_parameter(&self, name: &str) -> Option<&str>;

    /// Configures the request with the given path parameters.
    ///
    /// Mostly useful to build requests in tests; the event conversion
    /// attaches them for real invocations.
    fn with_path_parameters<P>(self, parameters: P) -> Self
    where
        P: Into<PathParameters>;
}

impl<B> RequestExt for http::Request<B> {
    fn path_parameter(&self, name: &str) -> Option<&str> {
        self.extensions()
            .get::<PathParameters>()
            .and_then(|params| params.get(name))
    }

    fn with_path_parameters<P>(self, parameters: P) -> Self
    where
        P: Into<PathParameters>,
    {
        let mut request = self;
        request.extensions_mut().insert(parameters.into());
        request
    }
}

#[cfg(test)]
mod tests {
    use super::RequestExt;
    use crate::Body;
    use maplit::hashmap;

    #[test]
    fn path_parameters_are_read_back_from_extensions() {
        let request = http::Request::new(Body::Empty).with_path_parameters(hashmap! {
            "id".to_string() => "42".to_string()
        });
        assert_eq!(request.path_parameter("id"), Some("42"));
        assert_eq!(request.path_parameter("slug"), None);
    }

    #[test]
    fn requests_without_path_parameters_have_none() {
        let request = http::Request::new(Body::Empty);
        assert_eq!(request.path_parameter("id"), None);
    }
}
