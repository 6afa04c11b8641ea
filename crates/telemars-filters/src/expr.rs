//! Expression compiler.
//!
//! Renders validated values into the textual fragments the query service
//! embeds in its filter document:
//!
//! - one value: `field = v`
//! - several values: `field IN (v1, v2, ...)`
//! - composite filters: fragments joined with ` AND `

use std::fmt;

/// Separator between fragments of a composite filter.
pub const AND: &str = " AND ";

/// A filter, or filter component, that compiles to an expression fragment.
pub trait Expression {
    /// The rendered fragment, or `None` when nothing is filtered.
    fn expr(&self) -> Option<String>;
}

impl<E: Expression> Expression for Option<E> {
    fn expr(&self) -> Option<String> {
        self.as_ref().and_then(Expression::expr)
    }
}

/// Renders `values` for `field` in the order given.
///
/// # Example
///
/// ```
/// use telemars_filters::expr::compile;
///
/// assert_eq!(compile("locationId", &[1]), Some("locationId = 1".to_string()));
/// assert_eq!(compile("locationId", &[1, 4]), Some("locationId IN (1, 4)".to_string()));
/// assert_eq!(compile::<i64>("locationId", &[]), None);
/// ```
pub fn compile<V: fmt::Display>(field: &str, values: &[V]) -> Option<String> {
    match values {
        [] => None,
        [single] => Some(format!("{field} = {single}")),
        many => {
            let items: Vec<String> = many.iter().map(ToString::to_string).collect();
            Some(format!("{field} IN ({})", items.join(", ")))
        }
    }
}

/// Renders an inclusive numeric bound pair: `field >= min AND field <= max`.
pub fn between(field: &str, min: impl fmt::Display, max: impl fmt::Display) -> String {
    format!("{field} >= {min}{AND}{field} <= {max}")
}

/// Joins the present fragments with ` AND `; `None` if none are present.
pub fn all<I>(fragments: I) -> Option<String>
where
    I: IntoIterator<Item = Option<String>>,
{
    let parts: Vec<String> = fragments.into_iter().flatten().collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(AND))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_single_value() {
        assert_eq!(
            compile("researchWeekDay", &[1]).as_deref(),
            Some("researchWeekDay = 1")
        );
    }

    #[test]
    fn test_compile_text_values_unquoted() {
        assert_eq!(
            compile("researchDayType", &["W", "E"]).as_deref(),
            Some("researchDayType IN (W, E)")
        );
    }

    #[test]
    fn test_compile_keeps_order() {
        assert_eq!(
            compile("tvThematicId", &[19, 8]).as_deref(),
            Some("tvThematicId IN (19, 8)")
        );
    }

    #[test]
    fn test_between() {
        assert_eq!(between("age", 25, 50), "age >= 25 AND age <= 50");
    }

    #[test]
    fn test_all_skips_absent_fragments() {
        let joined = all([Some("sex = 1".to_string()), None, Some("age >= 18".to_string())]);
        assert_eq!(joined.as_deref(), Some("sex = 1 AND age >= 18"));
        assert_eq!(all([None, None]), None);
    }

    #[test]
    fn test_option_expression() {
        struct Fixed;
        impl Expression for Fixed {
            fn expr(&self) -> Option<String> {
                Some("x = 1".to_string())
            }
        }
        assert_eq!(Some(Fixed).expr().as_deref(), Some("x = 1"));
        assert_eq!(None::<Fixed>.expr(), None);
    }
}
