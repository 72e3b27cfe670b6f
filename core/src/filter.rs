//! Query-string filter builder for collection endpoints.
//!
//! Renders ordered `(field, operator, value)` triples as repeated
//! `filter[field][operator]=value` segments. Segments are concatenated
//! without an `&` between them; existing callers and fixtures depend on that
//! exact output, so a multi-filter string is only meaningful to a service
//! that splits on the `filter[` prefix.

use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    filters: Vec<(String, String, String)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a triple, consuming and returning the builder.
    pub fn add(mut self, field: &str, operator: &str, value: impl ToString) -> Self {
        self.push(field, operator, value);
        self
    }

    /// Append a triple in place.
    pub fn push(&mut self, field: &str, operator: &str, value: impl ToString) -> &mut Self {
        self.filters
            .push((field.to_string(), operator.to_string(), value.to_string()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.filters
            .iter()
            .map(|(f, o, v)| (f.as_str(), o.as_str(), v.as_str()))
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (field, operator, value) in &self.filters {
            write!(f, "filter[{field}][{operator}]={value}")?;
        }
        Ok(())
    }
}
